//! Tag-addressed cache, invalidated on write.
//!
//! Cached payloads are JSON strings keyed by request, each carrying one or
//! more tags; any write through the services evicts the relevant tag so
//! readers never see stale aggregates. Best-effort: a broken cache degrades
//! to the store, it never fails a request.

use std::collections::HashMap;
use std::sync::RwLock;

/// Tag carried by every cached customer payload.
pub const CUSTOMER_TAG: &str = "customer";
/// Tag carried by every cached work-order payload.
pub const WORK_ORDER_TAG: &str = "work-order";

pub trait TagCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String, tags: &[&str]);
    /// Evict every entry carrying `tag`; returns how many were dropped.
    fn remove_by_tag(&self, tag: &str) -> usize;
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    tags: Vec<String>,
}

/// In-memory tag cache. Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryTagCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryTagCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TagCache for InMemoryTagCache {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().ok()?;
        entries.get(key).map(|e| e.value.clone())
    }

    fn set(&self, key: &str, value: String, tags: &[&str]) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(
                key.to_string(),
                CacheEntry {
                    value,
                    tags: tags.iter().map(|t| t.to_string()).collect(),
                },
            );
        }
    }

    fn remove_by_tag(&self, tag: &str) -> usize {
        let Ok(mut entries) = self.entries.write() else {
            return 0;
        };
        let before = entries.len();
        entries.retain(|_, e| !e.tags.iter().any(|t| t == tag));
        before - entries.len()
    }
}
