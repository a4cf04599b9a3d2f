use std::collections::HashSet;
use std::pin::Pin;

use futures::{Stream, StreamExt};

use triage_types::{DatasetKey, EventPayload, StreamEvent, TicketId};

use crate::buffering::FrameBuffer;
use crate::frame::{FramePayload, FRAME_MARKER, TERMINAL_SENTINEL};

/// Push decoder for the ticket analysis stream.
///
/// Feed it raw chunks as they arrive; it emits typed events in arrival order
/// regardless of how the stream was chunked. A frame whose payload fails to
/// parse is dropped and decoding continues; the stream never aborts over one
/// bad frame.
pub struct StreamDecoder {
    ticket_id: TicketId,
    buffer: FrameBuffer,
    seen: HashSet<DatasetKey>,
    finished: bool,
}

impl StreamDecoder {
    pub fn new(ticket_id: TicketId) -> Self {
        Self {
            ticket_id,
            buffer: FrameBuffer::with_capacity(4096),
            seen: HashSet::new(),
            finished: false,
        }
    }

    /// The terminal sentinel has been seen; later chunks are ignored.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Decode one raw chunk into zero or more events.
    ///
    /// The first complete frame is returned as soon as it is available; a
    /// chunk carrying several frames yields them all in one batch.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        if self.finished {
            tracing::debug!(ticket = %self.ticket_id, "chunk after terminal sentinel ignored");
            return Vec::new();
        }

        self.buffer.extend(chunk);

        let mut events = Vec::new();
        while let Some(line_result) = self.buffer.next_line() {
            let line = match line_result {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(ticket = %self.ticket_id, error = %e, "dropping undecodable frame");
                    continue;
                }
            };

            if line.is_empty() {
                continue;
            }

            let Some(data) = line.strip_prefix(FRAME_MARKER) else {
                continue;
            };

            if data == TERMINAL_SENTINEL {
                self.finished = true;
                break;
            }

            match serde_json::from_str::<FramePayload>(data) {
                Ok(frame) => events.push(self.event_from(frame)),
                Err(e) => {
                    tracing::warn!(ticket = %self.ticket_id, error = %e, "dropping malformed frame payload");
                }
            }
        }

        events
    }

    fn event_from(&mut self, frame: FramePayload) -> StreamEvent {
        let payload = frame.into_event_payload();
        let (is_first_of_kind, is_terminal) = match &payload {
            EventPayload::Dataset(update) => {
                (self.seen.insert(update.dataset()), update.is_terminal())
            }
            _ => (false, false),
        };

        StreamEvent {
            ticket_id: self.ticket_id.clone(),
            payload,
            is_first_of_kind,
            is_terminal,
        }
    }
}

/// Adapt any fallible chunk stream into a stream of decoded events.
///
/// A transport error ends the stream; whatever datasets were still open stay
/// in progress until a new request supersedes them.
pub fn decode_stream<S, B, E>(
    ticket_id: TicketId,
    chunks: S,
) -> Pin<Box<dyn Stream<Item = StreamEvent> + Send>>
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut chunks = Box::pin(chunks);
        let mut decoder = StreamDecoder::new(ticket_id);

        while let Some(chunk_result) = chunks.next().await {
            match chunk_result {
                Ok(bytes) => {
                    for event in decoder.feed(bytes.as_ref()) {
                        yield event;
                    }
                    if decoder.is_finished() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "ticket stream transport error");
                    break;
                }
            }
        }
    })
}
