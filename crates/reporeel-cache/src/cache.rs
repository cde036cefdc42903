use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::clock::{Clock, SystemClock};

struct Entry<V> {
    value: V,
    captured_at: Instant,
}

/// Time-boxed key/value cache
///
/// Entries are fresh for `ttl` after capture. Expired entries are treated as
/// absent and dropped when read; `sweep_expired` clears them in bulk. When the
/// cache is full, inserting a new key evicts the entry captured longest ago.
pub struct TtlCache<K, V> {
    entries: HashMap<K, Entry<V>>,
    ttl: Duration,
    max_entries: usize,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self::with_clock(ttl, max_entries, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            max_entries: max_entries.max(1),
            clock,
        }
    }

    /// Fresh value for `key`, if any. Stale entries are removed on the way out.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let fresh = match self.entries.get(key) {
            Some(entry) => now.saturating_duration_since(entry.captured_at) < self.ttl,
            None => return None,
        };

        if fresh {
            self.entries.get(key).map(|entry| entry.value.clone())
        } else {
            debug!("Cache entry expired: {:?}", key);
            self.entries.remove(key);
            None
        }
    }

    /// Store `value` under `key`, replacing whatever was there
    pub fn insert(&mut self, key: K, value: V) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }

        let captured_at = self.clock.now();
        self.entries.insert(key, Entry { value, captured_at });
    }

    /// Drop every expired entry, returning how many went
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now();
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.captured_at) < ttl);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.captured_at)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            debug!("Cache full, evicting {:?}", key);
            self.entries.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const TTL: Duration = Duration::from_secs(300);

    fn cache_with_clock(max: usize) -> (TtlCache<String, u32>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (TtlCache::with_clock(TTL, max, clock.clone()), clock)
    }

    #[test]
    fn test_hit_within_window() {
        let (mut cache, clock) = cache_with_clock(8);
        cache.insert("1-10--stars-desc".to_string(), 7);

        clock.advance(Duration::from_secs(299));
        assert_eq!(cache.get(&"1-10--stars-desc".to_string()), Some(7));
    }

    #[test]
    fn test_expired_entry_is_absent_and_dropped() {
        let (mut cache, clock) = cache_with_clock(8);
        cache.insert("k".to_string(), 1);

        clock.advance(TTL);
        assert_eq!(cache.get(&"k".to_string()), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_overwrites_and_restarts_window() {
        let (mut cache, clock) = cache_with_clock(8);
        cache.insert("k".to_string(), 1);
        clock.advance(Duration::from_secs(200));
        cache.insert("k".to_string(), 2);
        clock.advance(Duration::from_secs(200));

        assert_eq!(cache.get(&"k".to_string()), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_full_cache_evicts_oldest_capture() {
        let (mut cache, clock) = cache_with_clock(2);
        cache.insert("a".to_string(), 1);
        clock.advance(Duration::from_secs(1));
        cache.insert("b".to_string(), 2);
        clock.advance(Duration::from_secs(1));
        cache.insert("c".to_string(), 3);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a".to_string()), None);
        assert_eq!(cache.get(&"b".to_string()), Some(2));
        assert_eq!(cache.get(&"c".to_string()), Some(3));
    }

    #[test]
    fn test_sweep_only_removes_stale() {
        let (mut cache, clock) = cache_with_clock(8);
        cache.insert("old".to_string(), 1);
        clock.advance(Duration::from_secs(250));
        cache.insert("new".to_string(), 2);
        clock.advance(Duration::from_secs(100));

        assert_eq!(cache.sweep_expired(), 1);
        assert_eq!(cache.get(&"new".to_string()), Some(2));
    }
}
