use serde_json::json;

use triage_cache::{
    CacheBackend, CacheConfig, CacheRecord, CacheStore, FileBackend, MemoryBackend, Namespace,
    NullBackend, Tier,
};
use triage_types::{DatasetKey, SummaryKind, TicketId, SCHEMA_VERSION};

fn ns(ticket: &str, key: DatasetKey) -> Namespace {
    Namespace::new(TicketId::from(ticket), key)
}

#[tokio::test]
async fn test_cache_round_trip() {
    let store = CacheStore::in_memory();
    let namespace = ns("T-1", DatasetKey::Summary(SummaryKind::Concise));

    let record = CacheRecord::new(json!({"text": "Hello world", "complete": true}));
    store.set(Tier::Durable, &namespace, &record).await;

    let back = store.get(Tier::Durable, &namespace).await.unwrap();
    assert_eq!(back, record);

    // Tiers are physically independent.
    assert!(store.get(Tier::Ephemeral, &namespace).await.is_none());
}

#[tokio::test]
async fn test_payload_fully_replaced_on_write() {
    let store = CacheStore::in_memory();
    let namespace = ns("T-1", DatasetKey::SimilarTickets);

    store
        .set(
            Tier::Durable,
            &namespace,
            &CacheRecord::new(json!({"items": [1, 2, 3], "stale_field": true})),
        )
        .await;
    store
        .set(
            Tier::Durable,
            &namespace,
            &CacheRecord::new(json!({"items": [4]})),
        )
        .await;

    let back = store.get(Tier::Durable, &namespace).await.unwrap();
    assert_eq!(back.payload, json!({"items": [4]}));
}

#[tokio::test]
async fn test_remove() {
    let store = CacheStore::in_memory();
    let namespace = ns("T-1", DatasetKey::Metadata);

    store
        .set(Tier::Ephemeral, &namespace, &CacheRecord::new(json!({})))
        .await;
    store.remove(Tier::Ephemeral, &namespace).await;

    assert!(store.get(Tier::Ephemeral, &namespace).await.is_none());
}

#[tokio::test]
async fn test_migration_sweeps_legacy_records() {
    let ephemeral = MemoryBackend::new();
    let durable = MemoryBackend::new();

    // Records written under the previous naming schemes.
    durable
        .write("assist:durable:T-1:summary.concise", "{\"old\": true}")
        .await
        .unwrap();
    durable
        .write("triage:durable:T-1:summary.chronological", "{\"old\": true}")
        .await
        .unwrap();
    ephemeral
        .write("assist:ephemeral:T-1:chat.qa", "{\"old\": true}")
        .await
        .unwrap();

    let store = CacheStore::with_backends(
        "triage:".to_string(),
        Box::new(ephemeral),
        Box::new(durable),
    );
    store.migrate_if_needed().await;

    // Legacy records are unreachable; a fresh write under the current
    // scheme works and the alias-named record stays gone.
    let canonical = ns("T-1", DatasetKey::Summary(SummaryKind::Timeline));
    assert!(store.get(Tier::Durable, &canonical).await.is_none());

    let record = CacheRecord::new(json!({"text": "ordered", "complete": true}));
    store.set(Tier::Durable, &canonical, &record).await;
    assert_eq!(store.get(Tier::Durable, &canonical).await.unwrap(), record);
}

#[tokio::test]
async fn test_migration_marker_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("durable.json");

    {
        let backend = FileBackend::open(&path).await.unwrap();
        backend
            .write("assist:durable:T-9:summary.concise", "{}")
            .await
            .unwrap();
    }

    // First session migrates and stamps the marker.
    {
        let store = CacheStore::open(CacheConfig::default().with_durable_path(&path)).await;
        store.migrate_if_needed().await;
        let namespace = ns("T-9", DatasetKey::Articles);
        store
            .set(Tier::Durable, &namespace, &CacheRecord::new(json!({"items": []})))
            .await;
    }

    // Second session: marker matches, sweep is a no-op, data written under
    // the current scheme survives.
    {
        let backend = FileBackend::open(&path).await.unwrap();
        let keys = backend.keys().await.unwrap();
        assert!(keys.contains(&"triage:schema".to_string()));
        assert!(!keys.iter().any(|k| k.starts_with("assist:")));

        let marker = backend.read("triage:schema").await.unwrap().unwrap();
        assert_eq!(marker.parse::<u32>().unwrap(), SCHEMA_VERSION);

        let store = CacheStore::open(CacheConfig::default().with_durable_path(&path)).await;
        let namespace = ns("T-9", DatasetKey::Articles);
        assert!(store.get(Tier::Durable, &namespace).await.is_some());
    }
}

#[tokio::test]
async fn test_degraded_durable_tier_is_a_soft_miss() {
    let store = CacheStore::with_backends(
        "triage:".to_string(),
        Box::new(MemoryBackend::new()),
        Box::new(NullBackend),
    );

    let namespace = ns("T-1", DatasetKey::Summary(SummaryKind::Detailed));
    store
        .set(Tier::Durable, &namespace, &CacheRecord::new(json!({"text": "x"})))
        .await;

    // Write was a no-op, read is a miss, nothing failed.
    assert!(store.get(Tier::Durable, &namespace).await.is_none());

    // Ephemeral tier still works.
    store
        .set(Tier::Ephemeral, &namespace, &CacheRecord::new(json!({"text": "x"})))
        .await;
    assert!(store.get(Tier::Ephemeral, &namespace).await.is_some());
}

#[tokio::test]
async fn test_corrupt_record_is_a_miss() {
    let ephemeral = MemoryBackend::new();
    let namespace = ns("T-1", DatasetKey::Metadata);

    ephemeral
        .write("triage:ephemeral:T-1:ticket.metadata", "not json")
        .await
        .unwrap();

    let store = CacheStore::with_backends(
        "triage:".to_string(),
        Box::new(ephemeral),
        Box::new(MemoryBackend::new()),
    );

    assert!(store.get(Tier::Ephemeral, &namespace).await.is_none());
}
