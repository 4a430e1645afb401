//! In-flight mutation tracking
//!
//! Records how many invocations of each mutation key are running. Callers
//! use it to disable a submit button or show a spinner while an identical
//! withdrawal is in flight. It never blocks or rejects an invocation.

use dashmap::DashMap;
use lendmark_core::QueryKey;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct MutationTracker {
    in_flight: Arc<DashMap<QueryKey, usize>>,
}

impl MutationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark one invocation of `key` as started. Ends when the guard drops.
    pub fn begin(&self, key: QueryKey) -> InFlightGuard {
        *self.in_flight.entry(key.clone()).or_insert(0) += 1;
        InFlightGuard {
            tracker: self.clone(),
            key,
        }
    }

    /// Number of running invocations for `key`
    pub fn in_flight(&self, key: &QueryKey) -> usize {
        self.in_flight.get(key).map(|count| *count).unwrap_or(0)
    }

    pub fn is_in_flight(&self, key: &QueryKey) -> bool {
        self.in_flight(key) > 0
    }

    /// Running invocations across all keys
    pub fn total(&self) -> usize {
        self.in_flight.iter().map(|entry| *entry.value()).sum()
    }

    fn finish(&self, key: &QueryKey) {
        if let Some(mut count) = self.in_flight.get_mut(key) {
            *count = count.saturating_sub(1);
        }
        // The RefMut above must be released before remove_if takes the shard lock
        self.in_flight.remove_if(key, |_, count| *count == 0);
    }
}

/// Marks a mutation as running for as long as it lives
pub struct InFlightGuard {
    tracker: MutationTracker,
    key: QueryKey,
}

impl InFlightGuard {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.tracker.finish(&self.key);
    }
}
