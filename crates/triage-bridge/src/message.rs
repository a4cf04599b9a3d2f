use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use triage_types::{DatasetUpdate, TicketSession};

/// Message body exchanged between surfaces.
///
/// The embedded surface opens with `ready`; the host answers with a
/// `full-snapshot` and follows with `partial-update` deltas as its own
/// stream produces reductions. Deltas carry a single dataset's update — the
/// reducer input, not raw wire frames — so the receiver mutates state
/// through exactly the same code path as the sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BridgePayload {
    Ready,
    FullSnapshot { session: TicketSession },
    PartialUpdate { update: DatasetUpdate },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeMessage {
    #[serde(flatten)]
    pub payload: BridgePayload,
    pub source_principal: String,
    pub timestamp: DateTime<Utc>,
}

impl BridgeMessage {
    pub fn new(payload: BridgePayload, source_principal: impl Into<String>) -> Self {
        Self {
            payload,
            source_principal: source_principal.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_types::{ChatMode, TicketId};

    #[test]
    fn test_wire_tags_are_kebab_case() {
        let ready = BridgeMessage::new(BridgePayload::Ready, "embedded:panel");
        let json = serde_json::to_string(&ready).unwrap();
        assert!(json.contains("\"type\":\"ready\""));

        let snapshot = BridgeMessage::new(
            BridgePayload::FullSnapshot {
                session: TicketSession::new(TicketId::from("T-1")),
            },
            "host:widget",
        );
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"type\":\"full-snapshot\""));

        let update = BridgeMessage::new(
            BridgePayload::PartialUpdate {
                update: DatasetUpdate::ChatAppend {
                    mode: ChatMode::Qa,
                    content: "…".into(),
                },
            },
            "host:widget",
        );
        let json = serde_json::to_string(&update).unwrap();
        assert!(json.contains("\"type\":\"partial-update\""));

        let back: BridgeMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, update);
    }
}
