use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::metrics::MetricSample;

struct StoredSeries {
    inserted_at: Instant,
    samples: Vec<MetricSample>,
}

/// Keyed in-memory retention of step series so callers can poll a run's
/// metrics after the fact. One lock guards the map; runs execute
/// concurrently and each touches the store once, so contention is not a
/// concern. Purging is advisory housekeeping driven by the caller, not a
/// background task.
#[derive(Default)]
pub struct SeriesStore {
    inner: Mutex<HashMap<String, StoredSeries>>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, simulation_id: &str, samples: Vec<MetricSample>) {
        let mut inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());
        inner.insert(
            simulation_id.to_string(),
            StoredSeries {
                inserted_at: Instant::now(),
                samples,
            },
        );
    }

    pub fn get(&self, simulation_id: &str) -> Option<Vec<MetricSample>> {
        let inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());
        inner.get(simulation_id).map(|entry| entry.samples.clone())
    }

    /// Drops every series retained longer than `max_age`. Returns how many
    /// entries were removed.
    pub fn purge_older_than(&self, max_age: Duration) -> usize {
        let mut inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());
        let before = inner.len();
        inner.retain(|_, entry| entry.inserted_at.elapsed() <= max_age);
        let removed = before - inner.len();
        if removed > 0 {
            debug!(removed, retained = inner.len(), "purged stale series");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
