use std::time::Duration;

use triage_types::{DatasetKey, SummaryKind};

/// Tuning knobs for one coordinator instance.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Window within which successive writes to one namespace coalesce.
    pub debounce_window: Duration,
    /// Datasets that must be non-empty before the ticket counts as ready;
    /// aggregate progress is computed over this set.
    pub required_datasets: Vec<DatasetKey>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce_window: Duration::from_millis(250),
            required_datasets: vec![
                DatasetKey::Summary(SummaryKind::Concise),
                DatasetKey::Summary(SummaryKind::Detailed),
                DatasetKey::Summary(SummaryKind::Timeline),
                DatasetKey::SimilarTickets,
                DatasetKey::Articles,
                DatasetKey::Metadata,
            ],
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debounce_window(mut self, window: Duration) -> Self {
        self.debounce_window = window;
        self
    }

    pub fn with_required_datasets(mut self, datasets: Vec<DatasetKey>) -> Self {
        self.required_datasets = datasets;
        self
    }
}
