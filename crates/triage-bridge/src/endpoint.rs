use triage_sync::SyncCoordinator;
use triage_types::{DatasetKey, DatasetStatus, DatasetUpdate, TicketSession};

use crate::message::{BridgeMessage, BridgePayload};
use crate::origin::OriginValidator;
use crate::transport::BridgeTransport;

/// Result of handling one inbound bridge message.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundOutcome {
    /// Principal not on the allow-list; dropped without effect.
    Rejected,
    /// Peer announced readiness; a snapshot went out if state existed.
    ReadyAcknowledged { snapshot_sent: bool },
    /// Snapshot applied to the listed datasets (completed ones skipped).
    SnapshotApplied { datasets: Vec<DatasetKey> },
    /// One delta applied through the shared reducers.
    UpdateApplied { dataset: DatasetKey },
}

/// One surface's stateless protocol handler.
///
/// Owns the outbound transport and the injected origin validator; the
/// coordinator that actually holds state is passed in per call, so a single
/// endpoint never couples two tickets together.
pub struct BridgeEndpoint {
    principal: String,
    validator: OriginValidator,
    transport: Box<dyn BridgeTransport>,
}

impl BridgeEndpoint {
    pub fn new(
        principal: impl Into<String>,
        validator: OriginValidator,
        transport: Box<dyn BridgeTransport>,
    ) -> Self {
        Self {
            principal: principal.into(),
            validator,
            transport,
        }
    }

    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Embedded surface: announce readiness to the host.
    pub async fn announce_ready(&self) -> anyhow::Result<()> {
        self.transport
            .send(BridgeMessage::new(BridgePayload::Ready, self.principal.clone()))
            .await
    }

    /// Push the full current session to the peer.
    pub async fn publish_snapshot(&self, session: &TicketSession) -> anyhow::Result<()> {
        self.transport
            .send(BridgeMessage::new(
                BridgePayload::FullSnapshot {
                    session: session.clone(),
                },
                self.principal.clone(),
            ))
            .await
    }

    /// Push one dataset's update to the peer, post-reduction on this side.
    pub async fn publish_update(&self, update: &DatasetUpdate) -> anyhow::Result<()> {
        self.transport
            .send(BridgeMessage::new(
                BridgePayload::PartialUpdate {
                    update: update.clone(),
                },
                self.principal.clone(),
            ))
            .await
    }

    /// Validate and apply one inbound message.
    ///
    /// Untrusted principals are dropped silently. Snapshots skip datasets
    /// the local coordinator already considers complete; deltas run through
    /// the same reducers as local stream events.
    pub async fn handle_inbound(
        &self,
        message: BridgeMessage,
        coordinator: &mut SyncCoordinator,
    ) -> InboundOutcome {
        if !self.validator.is_trusted(&message.source_principal) {
            tracing::debug!(
                principal = %message.source_principal,
                "dropping bridge message from unrecognized principal"
            );
            return InboundOutcome::Rejected;
        }

        match message.payload {
            BridgePayload::Ready => {
                let mut snapshot_sent = false;
                if has_state(coordinator.session()) {
                    match self.publish_snapshot(coordinator.session()).await {
                        Ok(()) => snapshot_sent = true,
                        Err(e) => {
                            tracing::warn!(error = %e, "failed to answer ready with snapshot");
                        }
                    }
                }
                InboundOutcome::ReadyAcknowledged { snapshot_sent }
            }
            BridgePayload::FullSnapshot { session } => {
                let datasets = coordinator.apply_snapshot(&session);
                InboundOutcome::SnapshotApplied { datasets }
            }
            BridgePayload::PartialUpdate { update } => {
                let dataset = coordinator.apply_remote_update(&update);
                InboundOutcome::UpdateApplied { dataset }
            }
        }
    }
}

fn has_state(session: &TicketSession) -> bool {
    DatasetKey::all()
        .into_iter()
        .any(|key| session.status(key) != DatasetStatus::Empty)
}
