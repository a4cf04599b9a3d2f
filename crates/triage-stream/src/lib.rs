pub mod batching;
pub mod buffering;
pub mod decoder;
pub mod frame;
pub mod http;

pub use batching::CoalescingEmitter;
pub use buffering::FrameBuffer;
pub use decoder::{decode_stream, StreamDecoder};
pub use frame::{FramePayload, FRAME_MARKER, TERMINAL_SENTINEL};
pub use http::decode_response;
