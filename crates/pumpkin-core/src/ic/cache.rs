//! Memoized MICA lookups.
//!
//! Keys are normalized so `(a, b)` and `(b, a)` share one slot, and carry the
//! namespace filter because a filtered MICA can differ from the unfiltered
//! one. Values are the MICA id, or `None` when the pair has no common
//! ancestor. Two threads missing on the same key both compute the same value
//! and the second insert overwrites the first.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::{Mutex, RwLock};

use crate::namespace::Namespace;
use crate::term::TermId;

/// Cache key for MICA lookups (normalized for symmetry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MicaKey {
    lo: TermId,
    hi: TermId,
    ns: Option<Namespace>,
}

impl MicaKey {
    #[must_use]
    pub const fn new(a: TermId, b: TermId, ns: Option<Namespace>) -> Self {
        if a <= b {
            Self { lo: a, hi: b, ns }
        } else {
            Self { lo: b, hi: a, ns }
        }
    }

    #[must_use]
    pub const fn as_pair(&self) -> (TermId, TermId) {
        (self.lo, self.hi)
    }
}

/// How many MICA results are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Keep every result for the lifetime of the graph.
    #[default]
    Unbounded,
    /// Keep the most recently used results, up to the given count.
    Lru(NonZeroUsize),
    /// Recompute on every lookup.
    Disabled,
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("unbounded"),
            Self::Lru(capacity) => write!(f, "lru({capacity})"),
            Self::Disabled => f.write_str("disabled"),
        }
    }
}

/// Point-in-time cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl CacheSnapshot {
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = self.hits as f64 / total as f64;
        rate
    }
}

enum Slots {
    Unbounded(RwLock<HashMap<MicaKey, Option<TermId>>>),
    Lru(Mutex<LruCache<MicaKey, Option<TermId>>>),
    Disabled,
}

/// Thread-safe MICA memo shared by all readers of an [`crate::IcGraph`].
pub struct MicaCache {
    policy: CachePolicy,
    slots: Slots,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MicaCache {
    #[must_use]
    pub fn new(policy: CachePolicy) -> Self {
        let slots = match policy {
            CachePolicy::Unbounded => Slots::Unbounded(RwLock::new(HashMap::new())),
            CachePolicy::Lru(capacity) => Slots::Lru(Mutex::new(LruCache::new(capacity))),
            CachePolicy::Disabled => Slots::Disabled,
        };
        Self {
            policy,
            slots,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub const fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&self, key: MicaKey, compute: F) -> Option<TermId>
    where
        F: FnOnce() -> Option<TermId>,
    {
        match &self.slots {
            Slots::Disabled => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                compute()
            }
            Slots::Unbounded(map) => {
                let cached = map.read().get(&key).copied();
                if let Some(value) = cached {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return value;
                }
                self.misses.fetch_add(1, Ordering::Relaxed);
                let value = compute();
                map.write().insert(key, value);
                value
            }
            Slots::Lru(lru) => {
                let cached = lru.lock().get(&key).copied();
                if let Some(value) = cached {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return value;
                }
                self.misses.fetch_add(1, Ordering::Relaxed);
                let value = compute();
                lru.lock().put(key, value);
                value
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.slots {
            Slots::Unbounded(map) => map.read().len(),
            Slots::Lru(lru) => lru.lock().len(),
            Slots::Disabled => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        match &self.slots {
            Slots::Unbounded(map) => map.write().clear(),
            Slots::Lru(lru) => lru.lock().clear(),
            Slots::Disabled => {}
        }
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    #[must_use]
    pub fn stats(&self) -> CacheSnapshot {
        CacheSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

impl fmt::Debug for MicaCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MicaCache")
            .field("policy", &self.policy)
            .field("stats", &self.stats())
            .finish()
    }
}
