use std::sync::Arc;

use tokio::sync::mpsc;

use triage_cache::{CacheRecord, CacheStore, Namespace, Tier};
use triage_types::{
    ChatMessage, ChatMode, DatasetKey, DatasetPayload, DatasetStatus, DatasetUpdate, EventPayload,
    StreamEvent, TicketId, TicketSession,
};

use crate::config::SyncConfig;
use crate::debounce::{FlushDelay, TimerDelay, WriteDebouncer};
use crate::locks::{LockHeld, RenderLockGuard, RenderLocks};
use crate::notice::SessionNotice;
use crate::progress;
use crate::reducer::reduce;

/// Handle identifying one live stream for a ticket. Events carrying a
/// superseded generation are discarded on arrival, which cancels the old
/// stream without touching its transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamGeneration(u64);

/// What happened to one incoming event.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// A reducer ran and the dataset changed.
    Applied { dataset: DatasetKey },
    /// Informational event (progress, upstream error); state untouched.
    Noted,
    /// Event belonged to a superseded stream; discarded.
    Stale,
}

/// Result of restoring a ticket from the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapReport {
    pub loaded: Vec<DatasetKey>,
    pub missing: Vec<DatasetKey>,
}

impl BootstrapReport {
    /// A live stream is only needed when some required dataset is absent.
    pub fn needs_stream(&self) -> bool {
        !self.missing.is_empty()
    }
}

/// Canonical state holder for one ticket on one surface.
///
/// Instantiated per ticket and passed around explicitly; nothing here is
/// process-global, so concurrent tickets and tests cannot contaminate each
/// other. All mutation funnels through the dataset reducers, whether the
/// update came from the local stream, a bridge delta, or user input.
pub struct SyncCoordinator {
    session: TicketSession,
    cache: Arc<CacheStore>,
    config: SyncConfig,
    debouncer: WriteDebouncer,
    locks: RenderLocks,
    generation: u64,
    bootstrap_loaded_any: bool,
    stream_applied_any: bool,
    listeners: Vec<mpsc::UnboundedSender<SessionNotice>>,
}

impl SyncCoordinator {
    pub fn new(ticket_id: TicketId, cache: Arc<CacheStore>, config: SyncConfig) -> Self {
        Self::with_flush_delay(ticket_id, cache, config, Arc::new(TimerDelay))
    }

    /// Inject the deferred-write port; tests pass a delay they control.
    pub fn with_flush_delay(
        ticket_id: TicketId,
        cache: Arc<CacheStore>,
        config: SyncConfig,
        delay: Arc<dyn FlushDelay>,
    ) -> Self {
        let debouncer = WriteDebouncer::new(Arc::clone(&cache), config.debounce_window, delay);
        Self {
            session: TicketSession::new(ticket_id),
            cache,
            config,
            debouncer,
            locks: RenderLocks::new(),
            generation: 0,
            bootstrap_loaded_any: false,
            stream_applied_any: false,
            listeners: Vec::new(),
        }
    }

    pub fn session(&self) -> &TicketSession {
        &self.session
    }

    pub fn ticket_id(&self) -> &TicketId {
        &self.session.ticket_id
    }

    pub fn locks(&self) -> &RenderLocks {
        &self.locks
    }

    /// Subscribe the rendering layer to applied-state notifications.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SessionNotice> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners.push(tx);
        rx
    }

    /// Storage lifetime per dataset: chat threads die with the session,
    /// everything else survives reloads.
    pub fn tier_for(dataset: DatasetKey) -> Tier {
        match dataset {
            DatasetKey::Chat(_) => Tier::Ephemeral,
            _ => Tier::Durable,
        }
    }

    /// Restore whatever the cache has for this ticket and report which
    /// required datasets still need a live stream. Cached payloads are
    /// loaded directly — no reducer append semantics apply here.
    pub async fn bootstrap(&mut self) -> BootstrapReport {
        let mut loaded = Vec::new();

        for dataset in DatasetKey::all() {
            let namespace = Namespace::new(self.session.ticket_id.clone(), dataset);
            let Some(record) = self.cache.get(Self::tier_for(dataset), &namespace).await else {
                continue;
            };

            match serde_json::from_value::<DatasetPayload>(record.payload) {
                Ok(payload) if payload.key() == dataset => {
                    self.session.load(payload);
                    loaded.push(dataset);
                }
                Ok(payload) => {
                    tracing::warn!(
                        ticket = %self.session.ticket_id,
                        expected = %dataset,
                        found = %payload.key(),
                        "cached payload stored under the wrong namespace, ignoring"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        ticket = %self.session.ticket_id,
                        %dataset,
                        error = %e,
                        "cached payload does not deserialize, ignoring"
                    );
                }
            }
        }

        let missing: Vec<DatasetKey> = self
            .config
            .required_datasets
            .iter()
            .copied()
            .filter(|key| self.session.status(*key) == DatasetStatus::Empty)
            .collect();

        self.bootstrap_loaded_any = !loaded.is_empty();

        for dataset in &loaded {
            self.emit_dataset(*dataset);
        }

        tracing::info!(
            ticket = %self.session.ticket_id,
            loaded = loaded.len(),
            missing = missing.len(),
            "bootstrap complete"
        );

        BootstrapReport { loaded, missing }
    }

    /// Start (or supersede) the live stream for this ticket.
    pub fn begin_stream(&mut self) -> StreamGeneration {
        self.generation += 1;
        self.stream_applied_any = false;
        StreamGeneration(self.generation)
    }

    pub fn current_generation(&self) -> StreamGeneration {
        StreamGeneration(self.generation)
    }

    /// Apply one decoded event, in arrival order.
    pub fn apply_stream_event(
        &mut self,
        generation: StreamGeneration,
        event: StreamEvent,
    ) -> ApplyOutcome {
        if generation.0 != self.generation {
            tracing::debug!(
                ticket = %self.session.ticket_id,
                stale = generation.0,
                current = self.generation,
                "discarding event from superseded stream"
            );
            return ApplyOutcome::Stale;
        }

        match event.payload {
            EventPayload::Dataset(update) => {
                let dataset = self.apply_update(&update);
                self.stream_applied_any = true;
                ApplyOutcome::Applied { dataset }
            }
            EventPayload::Progress { percent } => {
                self.emit(SessionNotice::ProgressReported {
                    ticket_id: self.session.ticket_id.clone(),
                    percent,
                });
                ApplyOutcome::Noted
            }
            EventPayload::Upstream { message } => {
                tracing::warn!(ticket = %self.session.ticket_id, %message, "pipeline error frame");
                self.emit(SessionNotice::UpstreamError {
                    ticket_id: self.session.ticket_id.clone(),
                    message,
                });
                ApplyOutcome::Noted
            }
        }
    }

    /// The stream for `generation` ended (terminal sentinel or transport
    /// close). Surfaces the bootstrap-failure state when neither the cache
    /// nor this stream ever produced anything.
    pub fn finish_stream(&mut self, generation: StreamGeneration) {
        if generation.0 != self.generation {
            return;
        }
        if !self.bootstrap_loaded_any && !self.stream_applied_any {
            self.emit(SessionNotice::BootstrapFailed {
                ticket_id: self.session.ticket_id.clone(),
            });
        }
    }

    /// Apply a delta received over the bridge. Same reducers as the local
    /// stream path.
    pub fn apply_remote_update(&mut self, update: &DatasetUpdate) -> DatasetKey {
        self.apply_update(update)
    }

    /// Apply a full snapshot from the host surface, skipping every dataset
    /// this surface already considers complete so a late snapshot cannot
    /// regress finished state.
    pub fn apply_snapshot(&mut self, snapshot: &TicketSession) -> Vec<DatasetKey> {
        let mut applied = Vec::new();

        for dataset in DatasetKey::all() {
            if self.session.status(dataset) == DatasetStatus::Complete {
                continue;
            }
            if let Some(payload) = snapshot.payload_for(dataset) {
                self.session.load(payload);
                self.persist(dataset);
                self.emit_dataset(dataset);
                applied.push(dataset);
            }
        }

        if !applied.is_empty() {
            self.bootstrap_loaded_any = true;
        }
        applied
    }

    /// Local user action: append a message to a chat thread.
    pub fn append_user_message(&mut self, mode: ChatMode, text: impl Into<String>) {
        self.session.push_chat_message(mode, ChatMessage::user(text.into()));
        self.persist(DatasetKey::Chat(mode));
        self.emit_dataset(DatasetKey::Chat(mode));
    }

    /// Fail-fast render lock for out-of-band mutations of one dataset.
    pub fn try_lock_dataset(&self, dataset: DatasetKey) -> Result<RenderLockGuard, LockHeld> {
        self.locks.try_acquire(self.session.ticket_id.clone(), dataset)
    }

    /// Queueing render lock; resolves when the current holder releases.
    pub async fn lock_dataset(&self, dataset: DatasetKey) -> RenderLockGuard {
        self.locks.acquire(self.session.ticket_id.clone(), dataset).await
    }

    pub fn progress(&self) -> u8 {
        progress::progress_percent(&self.session, &self.config.required_datasets)
    }

    pub fn is_complete(&self) -> bool {
        progress::is_complete(&self.session, &self.config.required_datasets)
    }

    /// Force every pending debounced write through to the cache.
    pub async fn flush_now(&self) {
        self.debouncer.flush_now().await;
    }

    fn apply_update(&mut self, update: &DatasetUpdate) -> DatasetKey {
        let dataset = reduce(&mut self.session, update);
        self.persist(dataset);
        self.emit_dataset(dataset);
        dataset
    }

    fn persist(&self, dataset: DatasetKey) {
        let Some(payload) = self.session.payload_for(dataset) else {
            return;
        };
        match serde_json::to_value(&payload) {
            Ok(value) => {
                let namespace = Namespace::new(self.session.ticket_id.clone(), dataset);
                self.debouncer
                    .enqueue(Self::tier_for(dataset), namespace, CacheRecord::new(value));
            }
            Err(e) => {
                tracing::warn!(ticket = %self.session.ticket_id, %dataset, error = %e, "payload not serializable, skipping cache write");
            }
        }
    }

    fn emit_dataset(&mut self, dataset: DatasetKey) {
        let notice = SessionNotice::DatasetChanged {
            ticket_id: self.session.ticket_id.clone(),
            dataset,
            status: self.session.status(dataset),
            progress_percent: self.progress(),
        };
        self.emit(notice);
    }

    fn emit(&mut self, notice: SessionNotice) {
        self.listeners.retain(|tx| tx.send(notice.clone()).is_ok());
    }
}
