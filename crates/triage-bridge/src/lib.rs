pub mod endpoint;
pub mod message;
pub mod origin;
pub mod transport;

pub use endpoint::{BridgeEndpoint, InboundOutcome};
pub use message::{BridgeMessage, BridgePayload};
pub use origin::OriginValidator;
pub use transport::{in_process_pair, BridgeLink, BridgeTransport, InProcessTransport};
