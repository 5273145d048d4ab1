//! Optional time-expiring cache of resolution results.
//!
//! Constructed once and injected into the resolver, never ambient. Keys are
//! the exact query strings; entries expire after a fixed TTL because the
//! remote document changes rarely but not never. Hard failures are possibly
//! transient and are never cached.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use umbra_common::{Outcome, ResolutionResult};

struct CacheEntry {
    result: ResolutionResult,
    stored_at: Instant,
}

pub struct ResultCache {
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Fresh cached result for `name`, if any. Expired entries are evicted
    /// on access.
    pub fn get(&mut self, name: &str) -> Option<ResolutionResult> {
        match self.entries.get(name) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.result.clone()),
            Some(_) => {
                self.entries.remove(name);
                None
            }
            None => None,
        }
    }

    /// Store a result. Hard failures are ignored.
    pub fn insert(&mut self, result: &ResolutionResult) {
        if result.outcome() == Outcome::HardFail {
            return;
        }
        self.entries.insert(
            result.name.clone(),
            CacheEntry {
                result: result.clone(),
                stored_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caches_success_and_soft_fail_but_not_hard_fail() {
        let mut cache = ResultCache::new(Duration::from_secs(60));
        cache.insert(&ResolutionResult::success(
            "M87*",
            "6.5 x 10^9".into(),
            "http://example.test/".into(),
        ));
        cache.insert(&ResolutionResult::not_found(
            "Unknown",
            "http://example.test/".into(),
        ));
        cache.insert(&ResolutionResult::transport_failure("Flaky", "timeout"));

        assert!(cache.get("M87*").is_some());
        assert!(cache.get("Unknown").is_some());
        assert!(cache.get("Flaky").is_none());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn entries_expire() {
        let mut cache = ResultCache::new(Duration::ZERO);
        cache.insert(&ResolutionResult::success(
            "M87*",
            "6.5 x 10^9".into(),
            "http://example.test/".into(),
        ));
        assert!(cache.get("M87*").is_none());
        assert!(cache.is_empty());
    }
}
