//! End-to-end demo: one host surface owns the live stream, one embedded
//! surface mirrors it over the bridge, and both flush into a shared cache.
//!
//! Run with `TRIAGE_CACHE_DURABLE_PATH=/tmp/triage.json` to see the second
//! invocation warm-start from the durable tier (see also `warm-start`).

use std::sync::Arc;
use std::time::Duration;

use triage::{
    in_process_pair, BridgeEndpoint, CacheConfig, CacheStore, CoalescingEmitter, EventPayload,
    OriginValidator, StreamDecoder, SyncConfig, SyncCoordinator, TicketId,
};
use triage_example::{init_logging, WidgetConfig};

/// Frames exactly as the analysis backend would emit them. Chunked at an
/// awkward stride below to exercise the partial-frame buffering.
const WIRE: &str = concat!(
    "data: {\"type\":\"metadata\",\"sentiment\":\"frustrated\",\"quality_threshold\":0.62}\n",
    "data: {\"type\":\"summary_chunk\",\"kind\":\"concise\",\"content\":\"Customer cannot log in \"}\n",
    "data: {\"type\":\"summary_chunk\",\"kind\":\"concise\",\"content\":\"after resetting their password.\"}\n",
    "data: {\"type\":\"progress\",\"percent\":40}\n",
    "data: {\"type\":\"related_tickets\",\"items\":[{\"id\":\"T-988\",\"title\":\"Password reset loop\",\"score\":0.93}]}\n",
    "data: {\"type\":\"knowledge_articles\",\"items\":[{\"id\":\"KB-12\",\"title\":\"Resetting SSO credentials\",\"snippet\":\"Walk the customer through…\"}]}\n",
    "data: {\"type\":\"summary_complete\",\"kind\":\"concise\",\"content\":\"Customer cannot log in after resetting their password.\"}\n",
    "data: {\"type\":\"summary_complete\",\"kind\":\"detailed\",\"content\":\"The customer reset their password at 09:14 and has been locked out since. SSO session tokens were not invalidated cleanly.\"}\n",
    "data: {\"type\":\"summary_complete\",\"kind\":\"timeline\",\"content\":\"09:14 reset requested; 09:15 lockout; 09:20 ticket opened.\"}\n",
    "data: [DONE]\n",
);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = WidgetConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    init_logging(&config);

    tracing::info!(ticket = %config.ticket.id, "starting widget demo");

    // Shared same-origin cache: both surfaces read and write it.
    let mut cache_config = CacheConfig::new().with_prefix(&config.cache.prefix);
    if !config.cache.durable_path.is_empty() {
        cache_config = cache_config.with_durable_path(&config.cache.durable_path);
    }
    let cache = Arc::new(CacheStore::open(cache_config).await);

    let ticket = TicketId::from(config.ticket.id.as_str());
    let sync_config =
        SyncConfig::default().with_debounce_window(Duration::from_millis(config.sync.debounce_ms));

    let mut host = SyncCoordinator::new(ticket.clone(), Arc::clone(&cache), sync_config.clone());
    let mut embedded = SyncCoordinator::new(ticket.clone(), Arc::clone(&cache), sync_config);
    let mut notices = host.subscribe();

    // Wire the two surfaces together.
    let (host_link, mut embedded_link) = in_process_pair(64);
    let host_endpoint = BridgeEndpoint::new(
        config.bridge.host_principal.clone(),
        OriginValidator::new(config.bridge.allowed_origins.clone()),
        Box::new(host_link.transport),
    );
    let embedded_endpoint = BridgeEndpoint::new(
        config.bridge.embedded_principal.clone(),
        OriginValidator::new(config.bridge.allowed_origins.clone()),
        Box::new(embedded_link.transport),
    );
    let mut host_inbox = host_link.inbox;

    // Handshake: the embedded surface announces itself before the host has
    // anything, so no snapshot goes out yet.
    embedded_endpoint.announce_ready().await?;
    if let Some(message) = host_inbox.recv().await {
        let outcome = host_endpoint.handle_inbound(message, &mut host).await;
        tracing::info!(?outcome, "handled embedded ready");
    }

    let report = host.bootstrap().await;
    tracing::info!(
        loaded = report.loaded.len(),
        missing = report.missing.len(),
        "bootstrap finished"
    );

    if report.needs_stream() {
        let generation = host.begin_stream();
        let mut decoder = StreamDecoder::new(ticket.clone());
        // The renderer paints the first event immediately and the rest in
        // coalesced batches.
        let mut emitter = CoalescingEmitter::new(50);

        // Chunk the wire at a stride that never lines up with frames.
        for chunk in WIRE.as_bytes().chunks(17) {
            for event in decoder.feed(chunk) {
                if let Some(first_paint) = emitter.push(event.clone()) {
                    tracing::info!(events = first_paint.len(), "first paint");
                }
                if let EventPayload::Dataset(update) = &event.payload {
                    host_endpoint.publish_update(update).await?;
                }
                host.apply_stream_event(generation, event);
            }
        }
        host.finish_stream(generation);

        let tail = emitter.drain();
        tracing::info!(events = tail.len(), "final render batch");
    } else {
        // Nothing missing: the embedded surface gets a snapshot instead of
        // a replayed stream.
        host_endpoint.publish_snapshot(host.session()).await?;
    }

    // Embedded surface drains whatever the host produced.
    while let Ok(message) = embedded_link.inbox.try_recv() {
        embedded_endpoint.handle_inbound(message, &mut embedded).await;
    }

    while let Ok(notice) = notices.try_recv() {
        tracing::debug!(?notice, "notice");
    }

    tracing::info!(
        host_progress = host.progress(),
        embedded_progress = embedded.progress(),
        in_step = host.session() == embedded.session(),
        "surfaces settled"
    );

    host.flush_now().await;
    embedded.flush_now().await;

    println!(
        "concise summary: {}",
        host.session()
            .summaries
            .get(&triage::SummaryKind::Concise)
            .map(|v| v.text.as_str())
            .unwrap_or("<none>")
    );
    println!(
        "surfaces in step: {}",
        host.session() == embedded.session()
    );

    Ok(())
}
