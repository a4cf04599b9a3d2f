use triage_types::{DatasetKey, DatasetUpdate, TicketMetadata, TicketSession};

/// Apply one dataset update to the session and return the dataset it
/// touched.
///
/// Streaming datasets append chunk content until the terminal update
/// replaces the accumulated text wholesale; one-shot datasets always replace.
/// Because terminal updates replace rather than merge, applying one twice
/// yields the same state as applying it once, which is what makes bridge
/// delta replays safe for completed datasets.
pub fn reduce(session: &mut TicketSession, update: &DatasetUpdate) -> DatasetKey {
    match update {
        DatasetUpdate::SummaryAppend { kind, content } => {
            session.append_summary(*kind, content);
        }
        DatasetUpdate::SummaryFinal {
            kind,
            content,
            hints,
        } => {
            session.finish_summary(*kind, content.clone(), hints.clone());
        }
        DatasetUpdate::ChatAppend { mode, content } => {
            session.append_chat(*mode, content);
        }
        DatasetUpdate::ChatFinal { mode, content } => {
            session.finish_chat(*mode, content.clone());
        }
        DatasetUpdate::SimilarTickets { items } => {
            session.set_similar_tickets(items.clone());
        }
        DatasetUpdate::Articles { items } => {
            session.set_articles(items.clone());
        }
        DatasetUpdate::Metadata {
            sentiment,
            quality_threshold,
        } => {
            session.set_metadata(TicketMetadata {
                sentiment: *sentiment,
                quality_threshold: *quality_threshold,
            });
        }
    }
    update.dataset()
}
