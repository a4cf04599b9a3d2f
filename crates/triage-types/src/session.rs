use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::dataset::{ChatMode, DatasetKey, SummaryKind, TicketId};
use crate::SCHEMA_VERSION;

/// Presentation hints attached to a finished summary variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderingHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlight_terms: Vec<String>,
}

/// One summary variant: text accumulates while streaming, then the terminal
/// event replaces it wholesale and flips `complete`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryVariant {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<RenderingHints>,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarTicket {
    pub id: String,
    pub title: String,
    pub score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeArticle {
    pub id: String,
    pub title: String,
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Frustrated,
    Angry,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_threshold: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::User,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::Assistant,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Ordered message list for one conversation mode, plus the assistant reply
/// currently being streamed (if any).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatThread {
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<String>,
}

/// Coarse per-dataset state used for progress and snapshot reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetStatus {
    Empty,
    InProgress,
    Complete,
}

/// One dataset's full materialized value, as persisted to the cache and as
/// carried in bridge snapshots. Always written whole, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dataset", rename_all = "snake_case")]
pub enum DatasetPayload {
    Summary {
        kind: SummaryKind,
        variant: SummaryVariant,
    },
    SimilarTickets {
        items: Vec<SimilarTicket>,
    },
    Articles {
        items: Vec<KnowledgeArticle>,
    },
    Metadata {
        metadata: TicketMetadata,
    },
    Chat {
        mode: ChatMode,
        thread: ChatThread,
    },
}

impl DatasetPayload {
    pub fn key(&self) -> DatasetKey {
        match self {
            DatasetPayload::Summary { kind, .. } => DatasetKey::Summary(*kind),
            DatasetPayload::SimilarTickets { .. } => DatasetKey::SimilarTickets,
            DatasetPayload::Articles { .. } => DatasetKey::Articles,
            DatasetPayload::Metadata { .. } => DatasetKey::Metadata,
            DatasetPayload::Chat { mode, .. } => DatasetKey::Chat(*mode),
        }
    }
}

/// Canonical in-memory state for one open ticket.
///
/// Owned exclusively by one coordinator per surface; other surfaces see it
/// only as serialized snapshots and deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketSession {
    pub ticket_id: TicketId,
    pub summaries: HashMap<SummaryKind, SummaryVariant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar_tickets: Option<Vec<SimilarTicket>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub articles: Option<Vec<KnowledgeArticle>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TicketMetadata>,
    pub chat_threads: HashMap<ChatMode, ChatThread>,
    pub schema_version: u32,
}

impl TicketSession {
    pub fn new(ticket_id: TicketId) -> Self {
        Self {
            ticket_id,
            summaries: HashMap::new(),
            similar_tickets: None,
            articles: None,
            metadata: None,
            chat_threads: HashMap::new(),
            schema_version: SCHEMA_VERSION,
        }
    }

    pub fn status(&self, key: DatasetKey) -> DatasetStatus {
        match key {
            DatasetKey::Summary(kind) => match self.summaries.get(&kind) {
                None => DatasetStatus::Empty,
                Some(v) if v.complete => DatasetStatus::Complete,
                Some(v) if v.text.is_empty() => DatasetStatus::Empty,
                Some(_) => DatasetStatus::InProgress,
            },
            DatasetKey::SimilarTickets => {
                if self.similar_tickets.is_some() {
                    DatasetStatus::Complete
                } else {
                    DatasetStatus::Empty
                }
            }
            DatasetKey::Articles => {
                if self.articles.is_some() {
                    DatasetStatus::Complete
                } else {
                    DatasetStatus::Empty
                }
            }
            DatasetKey::Metadata => {
                if self.metadata.is_some() {
                    DatasetStatus::Complete
                } else {
                    DatasetStatus::Empty
                }
            }
            DatasetKey::Chat(mode) => match self.chat_threads.get(&mode) {
                None => DatasetStatus::Empty,
                Some(t) if t.draft.is_some() => DatasetStatus::InProgress,
                Some(t) if t.messages.is_empty() => DatasetStatus::Empty,
                Some(_) => DatasetStatus::Complete,
            },
        }
    }

    pub fn append_summary(&mut self, kind: SummaryKind, chunk: &str) {
        let variant = self.summaries.entry(kind).or_default();
        // A chunk after the terminal event reopens nothing; content was
        // already replaced wholesale.
        if !variant.complete {
            variant.text.push_str(chunk);
        }
    }

    pub fn finish_summary(&mut self, kind: SummaryKind, text: String, hints: Option<RenderingHints>) {
        self.summaries.insert(
            kind,
            SummaryVariant {
                text,
                hints,
                complete: true,
            },
        );
    }

    pub fn append_chat(&mut self, mode: ChatMode, chunk: &str) {
        let thread = self.chat_threads.entry(mode).or_default();
        thread.draft.get_or_insert_with(String::new).push_str(chunk);
    }

    pub fn finish_chat(&mut self, mode: ChatMode, text: String) {
        let thread = self.chat_threads.entry(mode).or_default();
        thread.draft = None;
        thread.messages.push(ChatMessage::assistant(text));
    }

    pub fn push_chat_message(&mut self, mode: ChatMode, message: ChatMessage) {
        self.chat_threads.entry(mode).or_default().messages.push(message);
    }

    pub fn set_similar_tickets(&mut self, items: Vec<SimilarTicket>) {
        self.similar_tickets = Some(items);
    }

    pub fn set_articles(&mut self, items: Vec<KnowledgeArticle>) {
        self.articles = Some(items);
    }

    pub fn set_metadata(&mut self, metadata: TicketMetadata) {
        self.metadata = Some(metadata);
    }

    /// Materialize one dataset for persistence or a bridge snapshot.
    pub fn payload_for(&self, key: DatasetKey) -> Option<DatasetPayload> {
        match key {
            DatasetKey::Summary(kind) => self.summaries.get(&kind).map(|variant| {
                DatasetPayload::Summary {
                    kind,
                    variant: variant.clone(),
                }
            }),
            DatasetKey::SimilarTickets => {
                self.similar_tickets.as_ref().map(|items| DatasetPayload::SimilarTickets {
                    items: items.clone(),
                })
            }
            DatasetKey::Articles => self.articles.as_ref().map(|items| DatasetPayload::Articles {
                items: items.clone(),
            }),
            DatasetKey::Metadata => self.metadata.as_ref().map(|metadata| DatasetPayload::Metadata {
                metadata: metadata.clone(),
            }),
            DatasetKey::Chat(mode) => self.chat_threads.get(&mode).map(|thread| DatasetPayload::Chat {
                mode,
                thread: thread.clone(),
            }),
        }
    }

    /// Direct load of one dataset, used when restoring from cache or applying
    /// a snapshot. Replaces the slice wholesale; no append semantics.
    pub fn load(&mut self, payload: DatasetPayload) -> DatasetKey {
        let key = payload.key();
        match payload {
            DatasetPayload::Summary { kind, variant } => {
                self.summaries.insert(kind, variant);
            }
            DatasetPayload::SimilarTickets { items } => self.similar_tickets = Some(items),
            DatasetPayload::Articles { items } => self.articles = Some(items),
            DatasetPayload::Metadata { metadata } => self.metadata = Some(metadata),
            DatasetPayload::Chat { mode, thread } => {
                self.chat_threads.insert(mode, thread);
            }
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_empty() {
        let session = TicketSession::new(TicketId::from("T-1"));
        for key in DatasetKey::all() {
            assert_eq!(session.status(key), DatasetStatus::Empty);
        }
    }

    #[test]
    fn summary_status_transitions() {
        let mut session = TicketSession::new(TicketId::from("T-1"));
        let key = DatasetKey::Summary(SummaryKind::Concise);

        session.append_summary(SummaryKind::Concise, "partial");
        assert_eq!(session.status(key), DatasetStatus::InProgress);

        session.finish_summary(SummaryKind::Concise, "final".into(), None);
        assert_eq!(session.status(key), DatasetStatus::Complete);
    }

    #[test]
    fn chunk_after_terminal_does_not_mutate() {
        let mut session = TicketSession::new(TicketId::from("T-1"));
        session.finish_summary(SummaryKind::Concise, "done".into(), None);
        session.append_summary(SummaryKind::Concise, " extra");
        assert_eq!(session.summaries[&SummaryKind::Concise].text, "done");
    }

    #[test]
    fn chat_draft_then_finish() {
        let mut session = TicketSession::new(TicketId::from("T-1"));
        let key = DatasetKey::Chat(ChatMode::Qa);

        session.append_chat(ChatMode::Qa, "Let me ");
        session.append_chat(ChatMode::Qa, "check.");
        assert_eq!(session.status(key), DatasetStatus::InProgress);
        assert_eq!(session.chat_threads[&ChatMode::Qa].draft.as_deref(), Some("Let me check."));

        session.finish_chat(ChatMode::Qa, "Let me check.".into());
        assert_eq!(session.status(key), DatasetStatus::Complete);
        assert_eq!(session.chat_threads[&ChatMode::Qa].messages.len(), 1);
        assert!(session.chat_threads[&ChatMode::Qa].draft.is_none());
    }

    #[test]
    fn payload_round_trip() {
        let mut session = TicketSession::new(TicketId::from("T-1"));
        session.set_similar_tickets(vec![SimilarTicket {
            id: "T-9".into(),
            title: "Printer on fire".into(),
            score: 0.91,
            url: None,
        }]);

        let payload = session.payload_for(DatasetKey::SimilarTickets).unwrap();
        let mut other = TicketSession::new(TicketId::from("T-1"));
        let key = other.load(payload);

        assert_eq!(key, DatasetKey::SimilarTickets);
        assert_eq!(other.similar_tickets, session.similar_tickets);
    }
}
