//! Memoization for noise lookups.

use std::collections::HashMap;

/// Bounded memo table keyed by the exact bit pattern of `(x, y)`.
///
/// A hit returns the value a miss stored for the identical coordinates, so
/// sampling through the cache is indistinguishable from sampling without it.
/// Once `capacity` entries are stored new coordinates are computed but no
/// longer recorded.
#[derive(Debug, Default)]
pub struct NoiseCache {
    entries: HashMap<(u64, u64), f64>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl NoiseCache {
    /// Create a cache holding at most `capacity` entries. Zero disables it.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.min(4096)),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    /// Look up `(x, y)`, computing and recording it on a miss.
    #[inline]
    pub fn get_or_insert_with<F>(&mut self, x: f64, y: f64, compute: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        let key = (x.to_bits(), y.to_bits());
        if let Some(&value) = self.entries.get(&key) {
            self.hits += 1;
            return value;
        }
        self.misses += 1;
        let value = compute();
        if self.entries.len() < self.capacity {
            self.entries.insert(key, value);
        }
        value
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_returns_stored_value() {
        let mut cache = NoiseCache::new(8);
        let first = cache.get_or_insert_with(1.5, 2.5, || 0.25);
        let second = cache.get_or_insert_with(1.5, 2.5, || unreachable!());
        assert_eq!(first, second);
        assert_eq!(cache.stats(), (1, 1));
    }

    #[test]
    fn test_keys_are_exact() {
        let mut cache = NoiseCache::new(8);
        cache.get_or_insert_with(0.1, 0.2, || 1.0);
        let other = cache.get_or_insert_with(0.1 + f64::EPSILON, 0.2, || 2.0);
        assert_eq!(other, 2.0);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_capacity_is_respected() {
        let mut cache = NoiseCache::new(2);
        for i in 0..10 {
            cache.get_or_insert_with(i as f64, 0.0, || i as f64);
        }
        assert_eq!(cache.len(), 2);

        // Values past capacity are still computed correctly.
        assert_eq!(cache.get_or_insert_with(9.0, 0.0, || 9.0), 9.0);
    }

    #[test]
    fn test_disabled_cache_stores_nothing() {
        let mut cache = NoiseCache::disabled();
        cache.get_or_insert_with(0.0, 0.0, || 0.5);
        assert!(cache.is_empty());
    }
}
