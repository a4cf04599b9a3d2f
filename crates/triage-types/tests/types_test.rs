use triage_types::{
    ChatMode, DatasetKey, DatasetPayload, DatasetStatus, DatasetUpdate, EventPayload, StreamEvent,
    SummaryKind, SummaryVariant, TicketId, TicketSession,
};

#[test]
fn test_dataset_payload_serialization() {
    let payload = DatasetPayload::Summary {
        kind: SummaryKind::Detailed,
        variant: SummaryVariant {
            text: "Customer cannot log in after password reset.".to_string(),
            hints: None,
            complete: true,
        },
    };

    let json = serde_json::to_string(&payload).unwrap();
    assert!(json.contains("\"dataset\":\"summary\""));

    let back: DatasetPayload = serde_json::from_str(&json).unwrap();
    assert_eq!(back, payload);
    assert_eq!(back.key(), DatasetKey::Summary(SummaryKind::Detailed));
}

#[test]
fn test_session_serialization_round_trip() {
    let mut session = TicketSession::new(TicketId::from("T-1001"));
    session.append_summary(SummaryKind::Concise, "Login broken");
    session.append_chat(ChatMode::DraftReply, "Hi, ");

    let json = serde_json::to_string(&session).unwrap();
    let back: TicketSession = serde_json::from_str(&json).unwrap();

    assert_eq!(back, session);
    assert_eq!(
        back.status(DatasetKey::Summary(SummaryKind::Concise)),
        DatasetStatus::InProgress
    );
}

#[test]
fn test_stream_event_wire_shape() {
    let json = r#"{
        "ticket_id": "T-7",
        "payload": {"type": "progress", "percent": 40},
        "is_first_of_kind": false,
        "is_terminal": false
    }"#;

    let event: StreamEvent = serde_json::from_str(json).unwrap();
    assert_eq!(event.ticket_id, TicketId::from("T-7"));
    assert_eq!(event.dataset(), None);
    match event.payload {
        EventPayload::Progress { percent } => assert_eq!(percent, 40),
        _ => panic!("Expected Progress payload"),
    }
}

#[test]
fn test_update_round_trip_through_json() {
    let update = DatasetUpdate::SummaryFinal {
        kind: SummaryKind::Timeline,
        content: "09:14 opened; 09:20 escalated".to_string(),
        hints: None,
    };

    let json = serde_json::to_string(&update).unwrap();
    assert!(json.contains("\"op\":\"summary_final\""));

    let back: DatasetUpdate = serde_json::from_str(&json).unwrap();
    assert_eq!(back, update);
    assert!(back.is_terminal());
}
