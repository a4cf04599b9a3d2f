use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::oneshot;

use triage_types::{DatasetKey, TicketId};

/// A dataset is locked per `(ticket, dataset)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LockKey {
    pub ticket_id: TicketId,
    pub dataset: DatasetKey,
}

#[derive(Debug, Error)]
#[error("render lock held for {held_for:?}")]
pub struct LockHeld {
    pub held_for: Duration,
}

struct LockEntry {
    held_since: Instant,
    waiters: VecDeque<oneshot::Sender<()>>,
}

/// Mutual exclusion for out-of-band dataset mutations (forced re-fetches
/// and similar flows that bypass the normal stream-apply path).
///
/// Acquisition never blocks the thread: `try_acquire` fails fast while the
/// lock is held, and `acquire` queues the caller and resolves when the
/// current holder releases. Guards release on drop, unconditionally, and
/// hand the lock directly to the next waiter. Locks are never persisted.
#[derive(Clone, Default)]
pub struct RenderLocks {
    inner: Arc<Mutex<HashMap<LockKey, LockEntry>>>,
}

impl RenderLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail-fast acquisition: rejected immediately when the lock is held.
    pub fn try_acquire(
        &self,
        ticket_id: TicketId,
        dataset: DatasetKey,
    ) -> Result<RenderLockGuard, LockHeld> {
        let key = LockKey { ticket_id, dataset };
        let mut map = self.inner.lock().expect("render lock registry poisoned");

        match map.get(&key) {
            Some(entry) => Err(LockHeld {
                held_for: entry.held_since.elapsed(),
            }),
            None => {
                map.insert(
                    key.clone(),
                    LockEntry {
                        held_since: Instant::now(),
                        waiters: VecDeque::new(),
                    },
                );
                Ok(RenderLockGuard {
                    key,
                    locks: Arc::clone(&self.inner),
                })
            }
        }
    }

    /// Queueing acquisition: resolves once every earlier holder and waiter
    /// has released.
    pub async fn acquire(&self, ticket_id: TicketId, dataset: DatasetKey) -> RenderLockGuard {
        let key = LockKey { ticket_id, dataset };

        loop {
            let rx = {
                let mut map = self.inner.lock().expect("render lock registry poisoned");
                match map.get_mut(&key) {
                    Some(entry) => {
                        let (tx, rx) = oneshot::channel();
                        entry.waiters.push_back(tx);
                        Some(rx)
                    }
                    None => {
                        map.insert(
                            key.clone(),
                            LockEntry {
                                held_since: Instant::now(),
                                waiters: VecDeque::new(),
                            },
                        );
                        None
                    }
                }
            };

            match rx {
                None => {
                    return RenderLockGuard {
                        key,
                        locks: Arc::clone(&self.inner),
                    };
                }
                Some(rx) => {
                    // Ownership is transferred by the releasing guard; an
                    // error means the queue was torn down, so re-contend.
                    if rx.await.is_ok() {
                        return RenderLockGuard {
                            key,
                            locks: Arc::clone(&self.inner),
                        };
                    }
                }
            }
        }
    }

    pub fn is_held(&self, ticket_id: &TicketId, dataset: DatasetKey) -> bool {
        let key = LockKey {
            ticket_id: ticket_id.clone(),
            dataset,
        };
        self.inner
            .lock()
            .expect("render lock registry poisoned")
            .contains_key(&key)
    }
}

/// Held render lock. Dropping it releases the lock and wakes the next
/// queued waiter, if any.
pub struct RenderLockGuard {
    key: LockKey,
    locks: Arc<Mutex<HashMap<LockKey, LockEntry>>>,
}

impl Drop for RenderLockGuard {
    fn drop(&mut self) {
        let mut map = self.locks.lock().expect("render lock registry poisoned");
        if let Some(entry) = map.get_mut(&self.key) {
            while let Some(waiter) = entry.waiters.pop_front() {
                if waiter.send(()).is_ok() {
                    // Next waiter owns the lock now.
                    entry.held_since = Instant::now();
                    return;
                }
            }
            map.remove(&self.key);
        }
    }
}
