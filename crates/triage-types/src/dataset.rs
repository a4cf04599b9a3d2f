use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the support ticket all widget state is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(pub String);

impl TicketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TicketId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Summary variants the backend pipeline produces for a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    Concise,
    Detailed,
    Timeline,
}

impl SummaryKind {
    pub const ALL: [SummaryKind; 3] = [
        SummaryKind::Concise,
        SummaryKind::Detailed,
        SummaryKind::Timeline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryKind::Concise => "concise",
            SummaryKind::Detailed => "detailed",
            SummaryKind::Timeline => "timeline",
        }
    }
}

/// Conversation modes of the assistant chat panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    Qa,
    DraftReply,
}

impl ChatMode {
    pub const ALL: [ChatMode; 2] = [ChatMode::Qa, ChatMode::DraftReply];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Qa => "qa",
            ChatMode::DraftReply => "draft_reply",
        }
    }
}

/// One named slice of a ticket session's state.
///
/// The canonical string form is what cache namespaces and bridge payloads
/// carry; historical alias spellings are resolved at the cache layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKey {
    Summary(SummaryKind),
    SimilarTickets,
    Articles,
    Metadata,
    Chat(ChatMode),
}

impl DatasetKey {
    /// Canonical dotted name, stable across releases.
    pub fn canonical_name(&self) -> String {
        match self {
            DatasetKey::Summary(kind) => format!("summary.{}", kind.as_str()),
            DatasetKey::SimilarTickets => "related.tickets".to_string(),
            DatasetKey::Articles => "related.articles".to_string(),
            DatasetKey::Metadata => "ticket.metadata".to_string(),
            DatasetKey::Chat(mode) => format!("chat.{}", mode.as_str()),
        }
    }

    /// Parse a canonical dotted name back into a key.
    pub fn from_canonical(name: &str) -> Option<Self> {
        match name {
            "summary.concise" => Some(DatasetKey::Summary(SummaryKind::Concise)),
            "summary.detailed" => Some(DatasetKey::Summary(SummaryKind::Detailed)),
            "summary.timeline" => Some(DatasetKey::Summary(SummaryKind::Timeline)),
            "related.tickets" => Some(DatasetKey::SimilarTickets),
            "related.articles" => Some(DatasetKey::Articles),
            "ticket.metadata" => Some(DatasetKey::Metadata),
            "chat.qa" => Some(DatasetKey::Chat(ChatMode::Qa)),
            "chat.draft_reply" => Some(DatasetKey::Chat(ChatMode::DraftReply)),
            _ => None,
        }
    }

    /// Every dataset a session can hold, in display order.
    pub fn all() -> Vec<DatasetKey> {
        let mut keys: Vec<DatasetKey> = SummaryKind::ALL.iter().map(|k| DatasetKey::Summary(*k)).collect();
        keys.push(DatasetKey::SimilarTickets);
        keys.push(DatasetKey::Articles);
        keys.push(DatasetKey::Metadata);
        keys.extend(ChatMode::ALL.iter().map(|m| DatasetKey::Chat(*m)));
        keys
    }

    /// Streaming datasets accumulate chunks; one-shot datasets replace wholesale.
    pub fn is_streaming(&self) -> bool {
        matches!(self, DatasetKey::Summary(_) | DatasetKey::Chat(_))
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}
