use std::pin::Pin;

use futures::Stream;
use reqwest::Response;

use triage_types::{StreamEvent, TicketId};

use crate::decoder::decode_stream;

/// Decode the body of an already-issued ticket analysis request.
///
/// Building and authenticating the request is the transport layer's job;
/// this adapter only turns its byte stream into typed events.
pub fn decode_response(
    ticket_id: TicketId,
    response: Response,
) -> Pin<Box<dyn Stream<Item = StreamEvent> + Send>> {
    decode_stream(ticket_id, response.bytes_stream())
}
