use serde::{Deserialize, Serialize};

use triage_types::{DatasetKey, DatasetStatus, TicketId};

/// What the rendering layer hears about after each applied mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionNotice {
    /// A dataset changed; repaint it.
    DatasetChanged {
        ticket_id: TicketId,
        dataset: DatasetKey,
        status: DatasetStatus,
        progress_percent: u8,
    },
    /// Pipeline-reported completion estimate, passed through untouched.
    ProgressReported { ticket_id: TicketId, percent: u8 },
    /// The backend pipeline reported an error for this request.
    UpstreamError { ticket_id: TicketId, message: String },
    /// Neither the cache nor any stream ever produced state for this ticket.
    /// The only failure surfaced to the rendering layer.
    BootstrapFailed { ticket_id: TicketId },
}
