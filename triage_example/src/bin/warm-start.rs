//! Shows the bootstrap path: with a populated durable tier (run
//! `widget-demo` with `TRIAGE_CACHE_DURABLE_PATH` set first), the ticket is
//! served entirely from cache and no stream is requested.

use std::sync::Arc;
use std::time::Duration;

use triage::{CacheConfig, CacheStore, SyncConfig, SyncCoordinator, TicketId};
use triage_example::{init_logging, WidgetConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = WidgetConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    init_logging(&config);

    if config.cache.durable_path.is_empty() {
        anyhow::bail!("set TRIAGE_CACHE_DURABLE_PATH so there is a durable tier to warm-start from");
    }

    let cache_config = CacheConfig::new()
        .with_prefix(&config.cache.prefix)
        .with_durable_path(&config.cache.durable_path);
    let cache = Arc::new(CacheStore::open(cache_config).await);

    let sync_config =
        SyncConfig::default().with_debounce_window(Duration::from_millis(config.sync.debounce_ms));
    let mut coordinator = SyncCoordinator::new(
        TicketId::from(config.ticket.id.as_str()),
        cache,
        sync_config,
    );

    let report = coordinator.bootstrap().await;

    if report.needs_stream() {
        println!(
            "cache cold: {} of {} required datasets missing, a live stream would be requested",
            report.missing.len(),
            report.missing.len() + report.loaded.len()
        );
    } else {
        println!(
            "cache warm: all required datasets restored, no network request needed ({}% complete)",
            coordinator.progress()
        );
        for (kind, variant) in &coordinator.session().summaries {
            println!("  {:?}: {}", kind, variant.text);
        }
    }

    Ok(())
}
