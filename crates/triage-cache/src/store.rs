use tokio::sync::OnceCell;

use triage_types::SCHEMA_VERSION;

use crate::backend::{CacheBackend, MemoryBackend, NullBackend};
use crate::config::CacheConfig;
use crate::file_backend::FileBackend;
use crate::keys::{is_legacy_key, marker_key, physical_key, Namespace, Tier};
use crate::record::CacheRecord;

/// Tiered, namespaced persistence for ticket session state.
///
/// Strictly an optimization: every failure degrades to a miss or a no-op and
/// callers must tolerate `get` returning None at any time. The ephemeral
/// tier lives in memory; the durable tier survives reloads when a backing
/// file is configured.
pub struct CacheStore {
    prefix: String,
    ephemeral: Box<dyn CacheBackend>,
    durable: Box<dyn CacheBackend>,
    migration: OnceCell<()>,
}

impl CacheStore {
    /// Both tiers in memory. Used by tests and surfaces without storage
    /// access; the durable tier then lives exactly as long as the process.
    pub fn in_memory() -> Self {
        Self::with_backends(
            CacheConfig::default().prefix,
            Box::new(MemoryBackend::new()),
            Box::new(MemoryBackend::new()),
        )
    }

    /// Open per configuration. A durable path that cannot be opened degrades
    /// to the null backend rather than failing the widget.
    pub async fn open(config: CacheConfig) -> Self {
        let durable: Box<dyn CacheBackend> = match &config.durable_path {
            Some(path) => match FileBackend::open(path).await {
                Ok(backend) => Box::new(backend),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "durable tier unavailable, degrading to memory-only");
                    Box::new(NullBackend)
                }
            },
            None => Box::new(MemoryBackend::new()),
        };

        Self::with_backends(config.prefix, Box::new(MemoryBackend::new()), durable)
    }

    pub fn with_backends(
        prefix: String,
        ephemeral: Box<dyn CacheBackend>,
        durable: Box<dyn CacheBackend>,
    ) -> Self {
        Self {
            prefix,
            ephemeral,
            durable,
            migration: OnceCell::new(),
        }
    }

    fn backend(&self, tier: Tier) -> &dyn CacheBackend {
        match tier {
            Tier::Ephemeral => self.ephemeral.as_ref(),
            Tier::Durable => self.durable.as_ref(),
        }
    }

    /// Read one namespace. Any failure — backend error, corrupt record,
    /// schema mismatch — is a miss.
    pub async fn get(&self, tier: Tier, namespace: &Namespace) -> Option<CacheRecord> {
        self.migrate_if_needed().await;

        let key = physical_key(&self.prefix, tier, namespace);
        let raw = match self.backend(tier).read(&key).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(%namespace, error = %e, "cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str::<CacheRecord>(&raw) {
            Ok(record) if record.schema_version == SCHEMA_VERSION => Some(record),
            Ok(record) => {
                tracing::warn!(
                    %namespace,
                    found = record.schema_version,
                    expected = SCHEMA_VERSION,
                    "cache record from another schema version, treating as miss"
                );
                None
            }
            Err(e) => {
                tracing::warn!(%namespace, error = %e, "corrupt cache record, treating as miss");
                None
            }
        }
    }

    /// Replace one namespace's payload wholesale. Failures are absorbed.
    pub async fn set(&self, tier: Tier, namespace: &Namespace, record: &CacheRecord) {
        self.migrate_if_needed().await;

        let key = physical_key(&self.prefix, tier, namespace);
        let raw = match serde_json::to_string(record) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(%namespace, error = %e, "cache record not serializable, skipping write");
                return;
            }
        };

        if let Err(e) = self.backend(tier).write(&key, &raw).await {
            tracing::warn!(%namespace, error = %e, "cache write failed, state stays memory-only");
        }
    }

    pub async fn remove(&self, tier: Tier, namespace: &Namespace) {
        self.migrate_if_needed().await;

        let key = physical_key(&self.prefix, tier, namespace);
        if let Err(e) = self.backend(tier).delete(&key).await {
            tracing::warn!(%namespace, error = %e, "cache delete failed");
        }
    }

    /// Compare the stored schema marker against the current version and, on
    /// mismatch, sweep every record written under a legacy naming scheme
    /// from both tiers. Runs at most once per store instance, lazily before
    /// the first access; the sweep itself is idempotent.
    pub async fn migrate_if_needed(&self) {
        self.migration
            .get_or_init(|| async {
                self.run_migration().await;
            })
            .await;
    }

    async fn run_migration(&self) {
        let marker = marker_key(&self.prefix);

        match self.durable.read(&marker).await {
            Ok(Some(raw)) if raw.parse::<u32>().ok() == Some(SCHEMA_VERSION) => return,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "schema marker unreadable, running migration sweep");
            }
        }

        for tier in [Tier::Ephemeral, Tier::Durable] {
            let backend = self.backend(tier);
            let keys = match backend.keys().await {
                Ok(keys) => keys,
                Err(e) => {
                    tracing::warn!(%tier, error = %e, "cannot enumerate tier for migration");
                    continue;
                }
            };

            for key in keys.iter().filter(|k| is_legacy_key(&self.prefix, k)) {
                if let Err(e) = backend.delete(key).await {
                    tracing::warn!(%tier, key = %key, error = %e, "failed to remove legacy record");
                }
            }
        }

        if let Err(e) = self.durable.write(&marker, &SCHEMA_VERSION.to_string()).await {
            tracing::warn!(error = %e, "failed to persist schema marker; sweep will re-run next session");
        }

        tracing::info!(version = SCHEMA_VERSION, "cache schema migration complete");
    }
}
