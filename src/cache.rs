//! Resolution cache.
//!
//! Resolution is pure given a fixed as-of date and filter, so each
//! resolver keeps a per-instance map from `(input name, party hint)` to
//! the person it resolved to. Only successful resolutions are cached —
//! a miss re-runs the candidate sequence.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::warn;

use crate::person::Person;

/// Default maximum number of cached resolutions.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

type CacheKey = (String, Option<String>);

/// Bounded, thread-safe map from `(input name, party hint)` to the
/// resolved person.
///
/// Eviction is a full flush once the capacity is reached, which keeps the
/// map bounded without tracking recency. A poisoned lock degrades to a
/// cache miss rather than failing resolution.
#[derive(Debug)]
pub struct ResolutionCache {
    entries: RwLock<HashMap<CacheKey, Person>>,
    capacity: usize,
}

impl ResolutionCache {
    /// Creates a cache with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cache bounded to `capacity` entries. A capacity of zero
    /// disables caching entirely.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// Looks up a cached resolution.
    #[must_use]
    pub fn get(&self, name: &str, party_hint: Option<&str>) -> Option<Person> {
        let Ok(entries) = self.entries.read() else {
            warn!("resolution cache lock poisoned; treating as miss");
            return None;
        };
        entries
            .get(&(name.to_string(), party_hint.map(str::to_string)))
            .cloned()
    }

    /// Records a successful resolution.
    pub fn insert(&self, name: &str, party_hint: Option<&str>, person: Person) {
        if self.capacity == 0 {
            return;
        }
        let Ok(mut entries) = self.entries.write() else {
            warn!("resolution cache lock poisoned; dropping insert");
            return;
        };
        if entries.len() >= self.capacity {
            // Keep the cache bounded to avoid unbounded memory usage.
            entries.clear();
        }
        entries.insert(
            (name.to_string(), party_hint.map(str::to_string)),
            person,
        );
    }

    /// Number of cached resolutions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// True when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_then_hit() {
        let cache = ResolutionCache::new();
        assert!(cache.get("J Q Smith", None).is_none());

        let person = Person::new("John Quentin Smith");
        cache.insert("J Q Smith", None, person.clone());
        assert_eq!(cache.get("J Q Smith", None), Some(person));
    }

    #[test]
    fn test_party_hint_is_part_of_the_key() {
        let cache = ResolutionCache::new();
        let person = Person::new("John Quentin Smith");
        cache.insert("J Q Smith", Some("ANC"), person);

        assert!(cache.get("J Q Smith", None).is_none());
        assert!(cache.get("J Q Smith", Some("DA")).is_none());
        assert!(cache.get("J Q Smith", Some("ANC")).is_some());
    }

    #[test]
    fn test_capacity_flush() {
        let cache = ResolutionCache::with_capacity(2);
        cache.insert("a", None, Person::new("A"));
        cache.insert("b", None, Person::new("B"));
        assert_eq!(cache.len(), 2);

        // Third insert flushes, then stores.
        cache.insert("c", None, Person::new("C"));
        assert_eq!(cache.len(), 1);
        assert!(cache.get("a", None).is_none());
        assert!(cache.get("c", None).is_some());
    }

    #[test]
    fn test_zero_capacity_disables_caching() {
        let cache = ResolutionCache::with_capacity(0);
        cache.insert("a", None, Person::new("A"));
        assert!(cache.is_empty());
        assert!(cache.get("a", None).is_none());
    }
}
