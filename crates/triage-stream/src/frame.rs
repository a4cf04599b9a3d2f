use serde::{Deserialize, Serialize};

use triage_types::{
    ChatMode, DatasetUpdate, EventPayload, KnowledgeArticle, RenderingHints, Sentiment,
    SimilarTicket, SummaryKind,
};

/// Prefix every frame line carries on the wire.
pub const FRAME_MARKER: &str = "data: ";

/// Literal payload that terminates the stream. Never forwarded as an event.
pub const TERMINAL_SENTINEL: &str = "[DONE]";

/// Wire payload of one frame, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FramePayload {
    SummaryChunk {
        kind: SummaryKind,
        content: String,
    },
    SummaryComplete {
        kind: SummaryKind,
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        rendering_hints: Option<RenderingHints>,
    },
    ChatChunk {
        mode: ChatMode,
        content: String,
    },
    ChatComplete {
        mode: ChatMode,
        content: String,
    },
    RelatedTickets {
        items: Vec<SimilarTicket>,
    },
    KnowledgeArticles {
        items: Vec<KnowledgeArticle>,
    },
    Metadata {
        #[serde(skip_serializing_if = "Option::is_none")]
        sentiment: Option<Sentiment>,
        #[serde(skip_serializing_if = "Option::is_none")]
        quality_threshold: Option<f32>,
    },
    Progress {
        percent: u8,
    },
    Error {
        message: String,
    },
}

impl FramePayload {
    /// Translate the wire shape into the coordinator-facing payload.
    pub fn into_event_payload(self) -> EventPayload {
        match self {
            FramePayload::SummaryChunk { kind, content } => {
                EventPayload::Dataset(DatasetUpdate::SummaryAppend { kind, content })
            }
            FramePayload::SummaryComplete {
                kind,
                content,
                rendering_hints,
            } => EventPayload::Dataset(DatasetUpdate::SummaryFinal {
                kind,
                content,
                hints: rendering_hints,
            }),
            FramePayload::ChatChunk { mode, content } => {
                EventPayload::Dataset(DatasetUpdate::ChatAppend { mode, content })
            }
            FramePayload::ChatComplete { mode, content } => {
                EventPayload::Dataset(DatasetUpdate::ChatFinal { mode, content })
            }
            FramePayload::RelatedTickets { items } => {
                EventPayload::Dataset(DatasetUpdate::SimilarTickets { items })
            }
            FramePayload::KnowledgeArticles { items } => {
                EventPayload::Dataset(DatasetUpdate::Articles { items })
            }
            FramePayload::Metadata {
                sentiment,
                quality_threshold,
            } => EventPayload::Dataset(DatasetUpdate::Metadata {
                sentiment,
                quality_threshold,
            }),
            FramePayload::Progress { percent } => EventPayload::Progress { percent },
            FramePayload::Error { message } => EventPayload::Upstream { message },
        }
    }
}
