// src/factcheck/cache.rs
//! Cache store for aggregated fact-check results, injected into the aggregator.
//!
//! Keys are claim hashes (`types::claim_key`). Entries live for the lifetime of
//! the store; there is no expiry.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::types::FactCheckResult;

pub trait FactCheckCache: Send + Sync {
    fn get(&self, key: &str) -> Option<FactCheckResult>;

    /// Insert-or-fetch: stores `result` only if `key` is vacant and returns
    /// whatever is stored under `key` afterwards.
    fn put(&self, key: &str, result: FactCheckResult) -> FactCheckResult;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local map behind a `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    inner: RwLock<HashMap<String, FactCheckResult>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FactCheckCache for InMemoryCache {
    fn get(&self, key: &str) -> Option<FactCheckResult> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(key).cloned()
    }

    fn put(&self, key: &str, result: FactCheckResult) -> FactCheckResult {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.entry(key.to_string()).or_insert(result).clone()
    }

    fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_keeps_first_value() {
        let cache = InMemoryCache::new();
        assert!(cache.is_empty());
        let first = cache.put("k", FactCheckResult::empty("first"));
        let second = cache.put("k", FactCheckResult::empty("second"));
        assert_eq!(first.request_id, "first");
        assert_eq!(second.request_id, "first");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k").unwrap().request_id, "first");
        assert!(cache.get("other").is_none());
    }

    #[test]
    fn concurrent_puts_converge() {
        use std::sync::Arc;
        let cache = Arc::new(InMemoryCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let c = Arc::clone(&cache);
                std::thread::spawn(move || c.put("same", FactCheckResult::empty(format!("r{i}"))))
            })
            .collect();
        let stored: Vec<String> = handles
            .into_iter()
            .map(|h| h.join().unwrap().request_id)
            .collect();
        assert!(stored.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cache.len(), 1);
    }
}
