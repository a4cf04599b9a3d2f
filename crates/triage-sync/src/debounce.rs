use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use triage_cache::{CacheRecord, CacheStore, Namespace, Tier};

/// Deferred-write port. Production waits on the tokio timer; tests inject
/// an implementation they control instead of relying on wall-clock delays.
#[async_trait]
pub trait FlushDelay: Send + Sync {
    async fn wait(&self, window: Duration);
}

/// Wall-clock delay used outside tests.
pub struct TimerDelay;

#[async_trait]
impl FlushDelay for TimerDelay {
    async fn wait(&self, window: Duration) {
        tokio::time::sleep(window).await;
    }
}

/// Zero-delay port: flush turns run as soon as the scheduler yields.
pub struct NoDelay;

#[async_trait]
impl FlushDelay for NoDelay {
    async fn wait(&self, _window: Duration) {}
}

/// Coalesces cache writes per namespace.
///
/// Rapid successive updates from one stream collapse into a single write per
/// debounce window; only the most recent pending record for a namespace is
/// ever persisted (last-write-wins within the window).
pub struct WriteDebouncer {
    cache: Arc<CacheStore>,
    window: Duration,
    delay: Arc<dyn FlushDelay>,
    pending: Arc<Mutex<HashMap<(Tier, Namespace), CacheRecord>>>,
    armed: Arc<AtomicBool>,
}

impl WriteDebouncer {
    pub fn new(cache: Arc<CacheStore>, window: Duration, delay: Arc<dyn FlushDelay>) -> Self {
        Self {
            cache,
            window,
            delay,
            pending: Arc::new(Mutex::new(HashMap::new())),
            armed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Queue one namespace for writing. An already-pending record for the
    /// same namespace is replaced.
    pub fn enqueue(&self, tier: Tier, namespace: Namespace, record: CacheRecord) {
        self.pending
            .lock()
            .expect("debouncer queue poisoned")
            .insert((tier, namespace), record);
        self.arm();
    }

    /// Drain and persist everything pending, bypassing the delay. Used on
    /// teardown and by tests that need deterministic flushing.
    pub async fn flush_now(&self) {
        let batch = self.take_pending();
        self.write_batch(batch).await;
    }

    pub fn pending_len(&self) -> usize {
        self.pending.lock().expect("debouncer queue poisoned").len()
    }

    fn take_pending(&self) -> HashMap<(Tier, Namespace), CacheRecord> {
        std::mem::take(&mut *self.pending.lock().expect("debouncer queue poisoned"))
    }

    async fn write_batch(&self, batch: HashMap<(Tier, Namespace), CacheRecord>) {
        for ((tier, namespace), record) in batch {
            self.cache.set(tier, &namespace, &record).await;
        }
    }

    fn arm(&self) {
        if self.armed.swap(true, Ordering::SeqCst) {
            return;
        }

        let cache = Arc::clone(&self.cache);
        let delay = Arc::clone(&self.delay);
        let pending = Arc::clone(&self.pending);
        let armed = Arc::clone(&self.armed);
        let window = self.window;

        tokio::spawn(async move {
            loop {
                delay.wait(window).await;

                let batch: Vec<((Tier, Namespace), CacheRecord)> = {
                    let mut map = pending.lock().expect("debouncer queue poisoned");
                    map.drain().collect()
                };
                for ((tier, namespace), record) in batch {
                    cache.set(tier, &namespace, &record).await;
                }

                if pending.lock().expect("debouncer queue poisoned").is_empty() {
                    armed.store(false, Ordering::SeqCst);
                    // An enqueue may have slipped in between the emptiness
                    // check and disarming; reclaim the flusher role if so.
                    if pending.lock().expect("debouncer queue poisoned").is_empty()
                        || armed.swap(true, Ordering::SeqCst)
                    {
                        break;
                    }
                }
            }
        });
    }
}
