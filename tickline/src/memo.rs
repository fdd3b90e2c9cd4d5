//! Indicator memoization keyed by series identity.
//!
//! A series is identified by its shared storage, not by its contents: two equal
//! series built separately are different entries. Each entry holds a weak
//! reference to the storage it was computed from, which keeps the allocation (and
//! therefore the address used in the key) from being reused while the entry
//! lives.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use lru::LruCache;
use tickline_core::indicators::compute;
use tickline_core::{CanonicalSeries, IndicatorKind, IndicatorOutput, PricePoint};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MemoKey {
    series: usize,
    kind: IndicatorKind,
}

impl MemoKey {
    fn new(series: &CanonicalSeries, kind: IndicatorKind) -> Self {
        Self {
            series: address(series),
            kind,
        }
    }
}

fn address(series: &CanonicalSeries) -> usize {
    Arc::as_ptr(series.storage()).cast::<()>() as usize
}

struct Entry {
    series: Weak<[PricePoint]>,
    output: Arc<IndicatorOutput>,
}

impl Entry {
    fn belongs_to(&self, series: &CanonicalSeries) -> bool {
        self.series
            .upgrade()
            .is_some_and(|s| Arc::ptr_eq(&s, series.storage()))
    }
}

/// LRU of computed indicator outputs. A capacity of zero disables caching.
pub struct IndicatorCache {
    inner: Option<Mutex<LruCache<MemoKey, Entry>>>,
}

impl std::fmt::Debug for IndicatorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicatorCache")
            .field("enabled", &self.inner.is_some())
            .field("len", &self.len())
            .finish()
    }
}

impl IndicatorCache {
    /// Cache holding at most `capacity` outputs.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    fn lock(&self) -> Option<std::sync::MutexGuard<'_, LruCache<MemoKey, Entry>>> {
        // a poisoned cache only ever holds complete entries
        self.inner
            .as_ref()
            .map(|m| m.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Cached output for `(series, kind)`, computing and storing it on a miss.
    ///
    /// The computation runs outside the lock; concurrent misses for the same key
    /// may both compute, and the later insert wins.
    pub fn get_or_compute(&self, series: &CanonicalSeries, kind: IndicatorKind) -> Arc<IndicatorOutput> {
        let key = MemoKey::new(series, kind);
        if let Some(mut guard) = self.lock() {
            let hit = guard
                .get(&key)
                .filter(|e| e.belongs_to(series))
                .map(|e| Arc::clone(&e.output));
            if let Some(output) = hit {
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "tickline::memo", indicator = %kind, "cache hit");
                return output;
            }
            guard.pop(&key);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "tickline::memo", indicator = %kind, points = series.len(), "cache miss");
        let output = Arc::new(compute(series, kind));
        if let Some(mut guard) = self.lock() {
            guard.put(
                key,
                Entry {
                    series: Arc::downgrade(series.storage()),
                    output: Arc::clone(&output),
                },
            );
        }
        output
    }

    /// Whether an output for `(series, kind)` is cached.
    #[must_use]
    pub fn contains(&self, series: &CanonicalSeries, kind: IndicatorKind) -> bool {
        let key = MemoKey::new(series, kind);
        self.lock()
            .is_some_and(|guard| guard.peek(&key).is_some_and(|e| e.belongs_to(series)))
    }

    /// Drop every output computed from `series`. Returns how many were dropped.
    pub fn invalidate(&self, series: &CanonicalSeries) -> usize {
        let target = address(series);
        self.remove_where(|k, _| k.series == target)
    }

    /// Drop outputs whose series no longer exists anywhere.
    pub fn prune(&self) -> usize {
        self.remove_where(|_, e| e.series.strong_count() == 0)
    }

    fn remove_where(&self, pred: impl Fn(&MemoKey, &Entry) -> bool) -> usize {
        let Some(mut guard) = self.lock() else {
            return 0;
        };
        let doomed: Vec<MemoKey> = guard
            .iter()
            .filter(|(k, e)| pred(k, e))
            .map(|(k, _)| k.clone())
            .collect();
        for k in &doomed {
            guard.pop(k);
        }
        doomed.len()
    }

    /// Drop everything.
    pub fn clear(&self) {
        if let Some(mut guard) = self.lock() {
            guard.clear();
        }
    }

    /// Number of cached outputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().map_or(0, |guard| guard.len())
    }

    /// True if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: i64) -> CanonicalSeries {
        let points = (0..n)
            .map(|i| PricePoint::close(i * 60, 1.0 + i as f64))
            .collect();
        CanonicalSeries::from_points(points)
    }

    #[test]
    fn hit_returns_the_same_allocation() {
        let cache = IndicatorCache::new(8);
        let s = series(10);
        let kind = IndicatorKind::Sma { period: 3 };
        let a = cache.get_or_compute(&s, kind);
        let b = cache.get_or_compute(&s.clone(), kind);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn equal_but_distinct_series_do_not_share_entries() {
        let cache = IndicatorCache::new(8);
        let kind = IndicatorKind::Ema { period: 3 };
        let a = cache.get_or_compute(&series(10), kind);
        let other = series(10);
        assert!(!cache.contains(&other, kind));
        let b = cache.get_or_compute(&other, kind);
        assert_eq!(a, b);
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let cache = IndicatorCache::new(0);
        let s = series(5);
        let kind = IndicatorKind::Rsi { period: 2 };
        let a = cache.get_or_compute(&s, kind);
        let b = cache.get_or_compute(&s, kind);
        assert_eq!(a, b);
        assert!(!Arc::ptr_eq(&a, &b));
        assert!(cache.is_empty());
    }

    #[test]
    fn prune_drops_entries_of_dropped_series() {
        let cache = IndicatorCache::new(8);
        let keep = series(6);
        cache.get_or_compute(&keep, IndicatorKind::Sma { period: 2 });
        {
            let gone = series(6);
            cache.get_or_compute(&gone, IndicatorKind::Sma { period: 2 });
        }
        assert_eq!(cache.prune(), 1);
        assert!(cache.contains(&keep, IndicatorKind::Sma { period: 2 }));
    }
}
