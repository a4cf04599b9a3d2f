use futures::StreamExt;
use triage_stream::{decode_stream, StreamDecoder};
use triage_types::{DatasetUpdate, EventPayload, StreamEvent, SummaryKind, TicketId};

const WIRE: &str = concat!(
    "data: {\"type\":\"summary_chunk\",\"kind\":\"concise\",\"content\":\"Hello \"}\n",
    "data: {\"type\":\"summary_chunk\",\"kind\":\"concise\",\"content\":\"world\"}\n",
    "data: {\"type\":\"related_tickets\",\"items\":[{\"id\":\"T-2\",\"title\":\"Same crash\",\"score\":0.8}]}\n",
    "data: {\"type\":\"metadata\",\"sentiment\":\"frustrated\",\"quality_threshold\":0.62}\n",
    "data: {\"type\":\"summary_complete\",\"kind\":\"concise\",\"content\":\"Hello world\"}\n",
    "data: [DONE]\n",
);

fn decode_in_one_chunk(wire: &str) -> Vec<StreamEvent> {
    let mut decoder = StreamDecoder::new(TicketId::from("T-1"));
    decoder.feed(wire.as_bytes())
}

fn decode_split_at(wire: &str, stride: usize) -> Vec<StreamEvent> {
    let mut decoder = StreamDecoder::new(TicketId::from("T-1"));
    let mut events = Vec::new();
    for chunk in wire.as_bytes().chunks(stride) {
        events.extend(decoder.feed(chunk));
    }
    events
}

#[test]
fn test_chunk_boundary_invariance() {
    let reference = decode_in_one_chunk(WIRE);
    assert_eq!(reference.len(), 5);

    for stride in 1..=WIRE.len() {
        let events = decode_split_at(WIRE, stride);
        assert_eq!(events, reference, "stride {}", stride);
    }
}

#[test]
fn test_event_sequence_shape() {
    let events = decode_in_one_chunk(WIRE);

    match &events[0].payload {
        EventPayload::Dataset(DatasetUpdate::SummaryAppend { kind, content }) => {
            assert_eq!(*kind, SummaryKind::Concise);
            assert_eq!(content, "Hello ");
        }
        other => panic!("Unexpected first event: {:?}", other),
    }
    assert!(events[0].is_first_of_kind);
    assert!(!events[0].is_terminal);

    // Terminal summary event replaces wholesale.
    match &events[4].payload {
        EventPayload::Dataset(DatasetUpdate::SummaryFinal { content, .. }) => {
            assert_eq!(content, "Hello world");
        }
        other => panic!("Unexpected last event: {:?}", other),
    }
    assert!(events[4].is_terminal);
    assert!(!events[4].is_first_of_kind);
}

#[test]
fn test_malformed_frame_dropped_silently() {
    let wire = concat!(
        "data: {\"type\":\"summary_chunk\",\"kind\":\"concise\",\"content\":\"ok\"}\n",
        "data: {not json at all\n",
        "data: {\"type\":\"unknown_frame\",\"x\":1}\n",
        "data: {\"type\":\"progress\",\"percent\":50}\n",
    );

    let events = decode_in_one_chunk(wire);
    assert_eq!(events.len(), 2);
    assert!(matches!(events[1].payload, EventPayload::Progress { percent: 50 }));
}

#[test]
fn test_frames_after_sentinel_ignored() {
    let wire = concat!(
        "data: {\"type\":\"progress\",\"percent\":99}\n",
        "data: [DONE]\n",
        "data: {\"type\":\"progress\",\"percent\":100}\n",
    );

    let events = decode_in_one_chunk(wire);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0].payload, EventPayload::Progress { percent: 99 }));
}

#[tokio::test]
async fn test_decode_stream_adapter() {
    // Chunks deliberately misaligned with frame boundaries.
    let chunks: Vec<Result<Vec<u8>, std::io::Error>> = WIRE
        .as_bytes()
        .chunks(7)
        .map(|c| Ok(c.to_vec()))
        .collect();

    let events: Vec<StreamEvent> =
        decode_stream(TicketId::from("T-1"), futures::stream::iter(chunks))
            .collect()
            .await;

    assert_eq!(events, decode_in_one_chunk(WIRE));
}

#[tokio::test]
async fn test_decode_stream_transport_error_ends_stream() {
    let chunks: Vec<Result<Vec<u8>, std::io::Error>> = vec![
        Ok(b"data: {\"type\":\"progress\",\"percent\":10}\n".to_vec()),
        Err(std::io::Error::other("connection reset")),
        Ok(b"data: {\"type\":\"progress\",\"percent\":20}\n".to_vec()),
    ];

    let events: Vec<StreamEvent> =
        decode_stream(TicketId::from("T-1"), futures::stream::iter(chunks))
            .collect()
            .await;

    assert_eq!(events.len(), 1);
}
