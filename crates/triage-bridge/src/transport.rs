use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::message::BridgeMessage;

/// Outbound half of a cross-surface channel.
///
/// The inbound half is a plain receiver the surface drains from its own
/// event loop; suspension happens only while awaiting the next message.
#[async_trait]
pub trait BridgeTransport: Send + Sync {
    async fn send(&self, message: BridgeMessage) -> Result<()>;
}

/// Channel-backed transport for surfaces hosted in one process.
#[derive(Clone)]
pub struct InProcessTransport {
    tx: mpsc::Sender<BridgeMessage>,
}

#[async_trait]
impl BridgeTransport for InProcessTransport {
    async fn send(&self, message: BridgeMessage) -> Result<()> {
        self.tx
            .send(message)
            .await
            .map_err(|_| anyhow::anyhow!("bridge peer hung up"))
    }
}

/// One surface's view of the bridge: a transport to the peer plus an inbox
/// of the peer's messages.
pub struct BridgeLink {
    pub transport: InProcessTransport,
    pub inbox: mpsc::Receiver<BridgeMessage>,
}

/// Build both ends of an in-process bridge.
pub fn in_process_pair(capacity: usize) -> (BridgeLink, BridgeLink) {
    let (to_b, inbox_b) = mpsc::channel(capacity);
    let (to_a, inbox_a) = mpsc::channel(capacity);

    (
        BridgeLink {
            transport: InProcessTransport { tx: to_b },
            inbox: inbox_a,
        },
        BridgeLink {
            transport: InProcessTransport { tx: to_a },
            inbox: inbox_b,
        },
    )
}
