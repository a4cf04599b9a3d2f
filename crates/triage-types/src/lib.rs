pub mod dataset;
pub mod events;
pub mod session;

pub use dataset::{ChatMode, DatasetKey, SummaryKind, TicketId};
pub use events::{DatasetUpdate, EventPayload, StreamEvent};
pub use session::{
    ChatMessage, ChatRole, ChatThread, DatasetPayload, DatasetStatus, KnowledgeArticle,
    RenderingHints, Sentiment, SimilarTicket, SummaryVariant, TicketMetadata, TicketSession,
};

/// Version of the persisted session layout. Bumping it makes every record
/// written under the previous naming scheme unreachable on next access.
pub const SCHEMA_VERSION: u32 = 2;
