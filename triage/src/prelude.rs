//! Convenience re-exports for the common widget wiring.
//!
//! ```rust
//! use triage::prelude::*;
//! ```

pub use triage_types::{
    ChatMessage, ChatMode, DatasetKey, DatasetStatus, DatasetUpdate, EventPayload, StreamEvent,
    SummaryKind, TicketId, TicketSession,
};

pub use triage_stream::{decode_response, decode_stream, StreamDecoder};

pub use triage_cache::{CacheConfig, CacheStore, Namespace, Tier};

pub use triage_sync::{
    ApplyOutcome, BootstrapReport, SessionNotice, StreamGeneration, SyncConfig, SyncCoordinator,
};

pub use triage_bridge::{
    in_process_pair, BridgeEndpoint, BridgeMessage, BridgePayload, InboundOutcome, OriginValidator,
};
