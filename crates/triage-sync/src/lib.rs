pub mod config;
pub mod coordinator;
pub mod debounce;
pub mod locks;
pub mod notice;
pub mod progress;
pub mod reducer;

pub use config::SyncConfig;
pub use coordinator::{ApplyOutcome, BootstrapReport, StreamGeneration, SyncCoordinator};
pub use debounce::{FlushDelay, NoDelay, TimerDelay, WriteDebouncer};
pub use locks::{LockHeld, RenderLockGuard, RenderLocks};
pub use notice::SessionNotice;
pub use progress::{is_complete, progress_percent};
pub use reducer::reduce;
