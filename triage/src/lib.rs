//! # Triage
//!
//! Client-side core of a support-ticket AI assistant widget: streaming
//! ingest, tiered caching, and cross-surface state synchronization.
//!
//! ## Overview
//!
//! Triage keeps a host surface and any number of embedded surfaces showing
//! the same ticket state while only one of them owns the live network
//! stream:
//!
//! - **Decode** an incremental, line-framed analysis stream without losing
//!   or duplicating events, however the bytes are chunked
//! - **Reduce** decoded events into one canonical per-ticket session
//! - **Persist** session state across two storage lifetimes with
//!   schema-version migration
//! - **Synchronize** surfaces over a validated snapshot/delta channel
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use triage::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cache = Arc::new(CacheStore::in_memory());
//!     let mut coordinator = SyncCoordinator::new(
//!         TicketId::from("T-1001"),
//!         cache,
//!         SyncConfig::default(),
//!     );
//!
//!     // Restore whatever a previous session left behind.
//!     let report = coordinator.bootstrap().await;
//!
//!     if report.needs_stream() {
//!         let generation = coordinator.begin_stream();
//!         let mut decoder = StreamDecoder::new(TicketId::from("T-1001"));
//!
//!         // Feed raw chunks exactly as the transport delivers them.
//!         for event in decoder.feed(b"data: {\"type\":\"progress\",\"percent\":10}\n") {
//!             coordinator.apply_stream_event(generation, event);
//!         }
//!         coordinator.finish_stream(generation);
//!     }
//!
//!     coordinator.flush_now().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Triage is organized into focused crates:
//!
//! - **`triage-stream`**: chunk-boundary-safe decoder for the analysis stream
//! - **`triage-sync`**: per-ticket coordinator with reducers, render locks,
//!   and debounced persistence
//! - **`triage-cache`**: tiered, namespaced cache with schema migration
//! - **`triage-bridge`**: snapshot/delta channel between surfaces
//! - **`triage-types`**: the shared data model
//!
//! ## License
//!
//! MIT

pub mod prelude;

pub use triage_types::{
    ChatMessage, ChatMode, ChatRole, ChatThread, DatasetKey, DatasetPayload, DatasetStatus,
    DatasetUpdate, EventPayload, KnowledgeArticle, RenderingHints, Sentiment, SimilarTicket,
    StreamEvent, SummaryKind, SummaryVariant, TicketId, TicketMetadata, TicketSession,
    SCHEMA_VERSION,
};

pub use triage_stream::{
    decode_response, decode_stream, CoalescingEmitter, FrameBuffer, FramePayload, StreamDecoder,
    FRAME_MARKER, TERMINAL_SENTINEL,
};

pub use triage_cache::{
    to_alias, to_canonical, CacheBackend, CacheConfig, CacheError, CacheRecord, CacheStore,
    FileBackend, MemoryBackend, Namespace, NullBackend, Tier,
};

pub use triage_sync::{
    ApplyOutcome, BootstrapReport, FlushDelay, LockHeld, NoDelay, RenderLockGuard, RenderLocks,
    SessionNotice, StreamGeneration, SyncConfig, SyncCoordinator, TimerDelay, WriteDebouncer,
};

pub use triage_bridge::{
    in_process_pair, BridgeEndpoint, BridgeLink, BridgeMessage, BridgePayload, BridgeTransport,
    InProcessTransport, InboundOutcome, OriginValidator,
};
