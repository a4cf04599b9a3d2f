use serde::{Deserialize, Serialize};

use crate::dataset::{ChatMode, DatasetKey, SummaryKind, TicketId};
use crate::session::{KnowledgeArticle, RenderingHints, Sentiment, SimilarTicket};

/// Reducer input for one dataset.
///
/// Produced by the stream decoder from wire frames and carried verbatim in
/// bridge `partial-update` messages, so both surfaces mutate state through
/// the same reducers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DatasetUpdate {
    SummaryAppend {
        kind: SummaryKind,
        content: String,
    },
    SummaryFinal {
        kind: SummaryKind,
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        hints: Option<RenderingHints>,
    },
    ChatAppend {
        mode: ChatMode,
        content: String,
    },
    ChatFinal {
        mode: ChatMode,
        content: String,
    },
    SimilarTickets {
        items: Vec<SimilarTicket>,
    },
    Articles {
        items: Vec<KnowledgeArticle>,
    },
    Metadata {
        #[serde(skip_serializing_if = "Option::is_none")]
        sentiment: Option<Sentiment>,
        #[serde(skip_serializing_if = "Option::is_none")]
        quality_threshold: Option<f32>,
    },
}

impl DatasetUpdate {
    pub fn dataset(&self) -> DatasetKey {
        match self {
            DatasetUpdate::SummaryAppend { kind, .. } | DatasetUpdate::SummaryFinal { kind, .. } => {
                DatasetKey::Summary(*kind)
            }
            DatasetUpdate::ChatAppend { mode, .. } | DatasetUpdate::ChatFinal { mode, .. } => {
                DatasetKey::Chat(*mode)
            }
            DatasetUpdate::SimilarTickets { .. } => DatasetKey::SimilarTickets,
            DatasetUpdate::Articles { .. } => DatasetKey::Articles,
            DatasetUpdate::Metadata { .. } => DatasetKey::Metadata,
        }
    }

    /// Terminal updates close their dataset: one-shot replacements and the
    /// `*_final` variants of streaming datasets.
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            DatasetUpdate::SummaryAppend { .. } | DatasetUpdate::ChatAppend { .. }
        )
    }
}

/// What one decoded frame means to the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    Dataset(DatasetUpdate),
    /// Pipeline-reported completion estimate. Informational only; aggregate
    /// progress is always recomputed from dataset states.
    Progress { percent: u8 },
    /// Backend pipeline error for this request. The stream itself continues.
    Upstream { message: String },
}

/// One typed event decoded from the stream, in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamEvent {
    pub ticket_id: TicketId,
    pub payload: EventPayload,
    /// First event touching this dataset within the current stream.
    pub is_first_of_kind: bool,
    /// This event closes its dataset.
    pub is_terminal: bool,
}

impl StreamEvent {
    pub fn dataset(&self) -> Option<DatasetKey> {
        match &self.payload {
            EventPayload::Dataset(update) => Some(update.dataset()),
            _ => None,
        }
    }
}
