use tokio::time::{interval, Duration, Interval};

/// Event coalescer with a latency fast path.
///
/// The very first event pushed is handed back immediately so the surface can
/// paint something as soon as the stream opens; everything after that is
/// accumulated and drained once per flush turn.
pub struct CoalescingEmitter<T> {
    batch: Vec<T>,
    ticker: Interval,
    first_emitted: bool,
}

impl<T> CoalescingEmitter<T> {
    pub fn new(window_ms: u64) -> Self {
        Self {
            batch: Vec::new(),
            ticker: interval(Duration::from_millis(window_ms)),
            first_emitted: false,
        }
    }

    /// Push one event. Returns an immediate batch for the first event ever
    /// pushed; later events buffer until [`CoalescingEmitter::drain`].
    pub fn push(&mut self, event: T) -> Option<Vec<T>> {
        if !self.first_emitted {
            self.first_emitted = true;
            return Some(vec![event]);
        }
        self.batch.push(event);
        None
    }

    /// Take everything buffered for this flush turn.
    pub fn drain(&mut self) -> Vec<T> {
        std::mem::take(&mut self.batch)
    }

    pub fn len(&self) -> usize {
        self.batch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// Ticker for driving flush turns from a `tokio::select!` loop.
    pub fn ticker(&mut self) -> &mut Interval {
        &mut self.ticker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_event_bypasses_batching() {
        let mut emitter = CoalescingEmitter::new(50);

        let flushed = emitter.push(1);
        assert_eq!(flushed, Some(vec![1]));

        assert_eq!(emitter.push(2), None);
        assert_eq!(emitter.push(3), None);
        assert_eq!(emitter.drain(), vec![2, 3]);
        assert!(emitter.is_empty());
    }

    #[tokio::test]
    async fn test_drain_on_empty_batch() {
        let mut emitter = CoalescingEmitter::<u8>::new(50);
        assert!(emitter.drain().is_empty());
    }
}
