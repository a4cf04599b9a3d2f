use triage_types::{DatasetKey, DatasetStatus, TicketSession};

/// Aggregate completion over the required datasets.
///
/// Derived purely from which datasets currently hold non-empty values, never
/// from a counter, so it can only move forward as datasets fill in and is
/// recomputed (not decremented) by later events.
pub fn progress_percent(session: &TicketSession, required: &[DatasetKey]) -> u8 {
    if required.is_empty() {
        return 100;
    }
    let filled = required
        .iter()
        .filter(|key| session.status(**key) != DatasetStatus::Empty)
        .count();
    ((filled * 100) / required.len()) as u8
}

/// Every required dataset has reached its terminal state.
pub fn is_complete(session: &TicketSession, required: &[DatasetKey]) -> bool {
    required
        .iter()
        .all(|key| session.status(*key) == DatasetStatus::Complete)
}
