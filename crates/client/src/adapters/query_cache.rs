//! In-process query cache
//!
//! Holds the last fetched value of each query together with a staleness
//! flag. Readers refetch entries marked stale; invalidation never deletes.

use chrono::Utc;
use dashmap::DashMap;
use lendmark_core::{KeyMatch, QueryKey, Timestamp};
use lendmark_ports::QueryInvalidator;
use log::trace;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub value: Value,
    pub stale: bool,
    pub updated_at: Timestamp,
}

#[derive(Default)]
pub struct QueryCache {
    entries: DashMap<QueryKey, CacheEntry>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fresh value, clearing any stale mark
    pub fn set(&self, key: QueryKey, value: Value) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                stale: false,
                updated_at: Utc::now(),
            },
        );
    }

    pub fn get(&self, key: &QueryKey) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.clone())
    }

    /// None when the key was never cached
    pub fn is_stale(&self, key: &QueryKey) -> Option<bool> {
        self.entries.get(key).map(|entry| entry.stale)
    }

    /// Keys currently marked stale
    pub fn stale_keys(&self) -> Vec<QueryKey> {
        self.entries
            .iter()
            .filter(|entry| entry.stale)
            .map(|entry| entry.key().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl QueryInvalidator for QueryCache {
    fn invalidate(&self, key: &QueryKey, mode: KeyMatch) -> usize {
        let mut matched = 0;
        for mut entry in self.entries.iter_mut() {
            if key.selects(entry.key(), mode) {
                entry.stale = true;
                matched += 1;
            }
        }
        if matched > 0 {
            trace!("Invalidated {} ({:?}): {} entries", key, mode, matched);
        }
        matched
    }
}
