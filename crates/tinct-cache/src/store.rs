//! Thread-safe fetch-or-compute stores.
//!
//! Every store follows the same contract: `fetch(key, compute)` returns the
//! stored value without evaluating the closure on a hit, and on a miss
//! evaluates it exactly once, stores the result behind an `Arc` (entries
//! are never mutated after insertion), and returns it.
//!
//! Three variants:
//!
//! - [`MemoryStore`] - unbounded map
//! - [`LruStore`] - bounded by approximate serialized byte size, evicting
//!   least-recently-used entries
//! - [`NullStore`] - always misses, never retains (disables caching)
//!
//! # Concurrency
//!
//! A single coarse mutex guards each store instance and the whole fetch is
//! serialized under it, which guarantees at most one compute per key under
//! concurrent access. Contention is expected to be low — computes are
//! bounded pure math, never I/O.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use tinct_core::Result;

use crate::identity::{serialized_size, Digest};

/// Unbounded thread-safe memoization store.
///
/// # Example
///
/// ```rust
/// use tinct_cache::{identity_of, MemoryStore};
///
/// let store: MemoryStore<f64> = MemoryStore::new();
/// let key = identity_of(&"answer").unwrap();
/// let v = store.fetch(key, || Ok(42.0)).unwrap();
/// assert_eq!(*v, 42.0);
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug)]
pub struct MemoryStore<V> {
    map: Mutex<HashMap<Digest, Arc<V>>>,
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MemoryStore<V> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            map: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the value for `key`, computing and storing it on a miss.
    pub fn fetch(&self, key: Digest, compute: impl FnOnce() -> Result<V>) -> Result<Arc<V>> {
        let mut map = self.map.lock().unwrap();
        if let Some(value) = map.get(&key) {
            return Ok(Arc::clone(value));
        }
        let value = Arc::new(compute()?);
        map.insert(key, Arc::clone(&value));
        Ok(value)
    }

    /// Whether `key` is currently stored.
    pub fn contains(&self, key: &Digest) -> bool {
        self.map.lock().unwrap().contains_key(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.map.lock().unwrap().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.map.lock().unwrap().clear();
    }
}

/// One resident LRU entry with its intrusive recency links.
#[derive(Debug)]
struct LruEntry<V> {
    value: Arc<V>,
    bytes: usize,
    newer: Option<Digest>,
    older: Option<Digest>,
}

#[derive(Debug)]
struct LruInner<V> {
    map: HashMap<Digest, LruEntry<V>>,
    /// Most recently used.
    head: Option<Digest>,
    /// Least recently used.
    tail: Option<Digest>,
    total_bytes: usize,
}

/// Thread-safe store bounded by approximate serialized byte size.
///
/// Recency is tracked with an intrusive doubly-linked list threaded through
/// the map entries. Whenever total bytes exceed the configured maximum —
/// after an insertion or after a read promotes an entry — least-recently
/// used entries are evicted until the budget holds.
///
/// # Example
///
/// ```rust
/// use tinct_cache::{identity_of, LruStore};
///
/// let store: LruStore<Vec<f64>> = LruStore::new(256);
/// let key = identity_of(&"ramp").unwrap();
/// store.fetch(key, || Ok(vec![0.0, 0.5, 1.0])).unwrap();
/// assert!(store.total_bytes() <= 256);
/// ```
#[derive(Debug)]
pub struct LruStore<V> {
    inner: Mutex<LruInner<V>>,
    max_bytes: usize,
}

impl<V: Serialize> LruStore<V> {
    /// Creates a store with a byte budget.
    pub fn new(max_bytes: usize) -> Self {
        Self {
            inner: Mutex::new(LruInner {
                map: HashMap::new(),
                head: None,
                tail: None,
                total_bytes: 0,
            }),
            max_bytes,
        }
    }

    /// The configured byte budget.
    #[inline]
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Returns the value for `key`, computing and storing it on a miss.
    ///
    /// A hit promotes the entry to most-recently-used.
    pub fn fetch(&self, key: Digest, compute: impl FnOnce() -> Result<V>) -> Result<Arc<V>> {
        let mut inner = self.inner.lock().unwrap();
        if inner.map.contains_key(&key) {
            Self::unlink(&mut inner, key);
            Self::push_front(&mut inner, key);
            Self::evict_over_budget(&mut inner, self.max_bytes);
            // The promoted entry can itself be evicted when it alone
            // exceeds the budget; recompute transparently in that case.
            if let Some(entry) = inner.map.get(&key) {
                return Ok(Arc::clone(&entry.value));
            }
        }

        let value = Arc::new(compute()?);
        let bytes = serialized_size(value.as_ref())?;
        inner.map.insert(
            key,
            LruEntry {
                value: Arc::clone(&value),
                bytes,
                newer: None,
                older: None,
            },
        );
        inner.total_bytes += bytes;
        Self::push_front(&mut inner, key);
        Self::evict_over_budget(&mut inner, self.max_bytes);
        Ok(value)
    }

    /// Whether `key` is currently resident.
    pub fn contains(&self, key: &Digest) -> bool {
        self.inner.lock().unwrap().map.contains_key(key)
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().map.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current total of approximate serialized entry sizes.
    pub fn total_bytes(&self) -> usize {
        self.inner.lock().unwrap().total_bytes
    }

    /// Detaches `key` from the recency list (entry stays in the map).
    fn unlink(inner: &mut LruInner<V>, key: Digest) {
        let (newer, older) = match inner.map.get(&key) {
            Some(entry) => (entry.newer, entry.older),
            None => return,
        };
        match newer {
            Some(n) => {
                if let Some(e) = inner.map.get_mut(&n) {
                    e.older = older;
                }
            }
            None => inner.head = older,
        }
        match older {
            Some(o) => {
                if let Some(e) = inner.map.get_mut(&o) {
                    e.newer = newer;
                }
            }
            None => inner.tail = newer,
        }
        if let Some(entry) = inner.map.get_mut(&key) {
            entry.newer = None;
            entry.older = None;
        }
    }

    /// Makes `key` the most-recently-used entry.
    fn push_front(inner: &mut LruInner<V>, key: Digest) {
        let old_head = inner.head;
        if let Some(h) = old_head {
            if let Some(e) = inner.map.get_mut(&h) {
                e.newer = Some(key);
            }
        }
        if let Some(entry) = inner.map.get_mut(&key) {
            entry.newer = None;
            entry.older = old_head;
        }
        inner.head = Some(key);
        if inner.tail.is_none() {
            inner.tail = Some(key);
        }
    }

    /// Evicts from the tail until the byte budget holds.
    fn evict_over_budget(inner: &mut LruInner<V>, max_bytes: usize) {
        while inner.total_bytes > max_bytes {
            let Some(victim) = inner.tail else { break };
            Self::unlink(inner, victim);
            if let Some(entry) = inner.map.remove(&victim) {
                inner.total_bytes -= entry.bytes;
                tracing::debug!(key = %victim, bytes = entry.bytes, "evicting least-recently-used cache entry");
            }
        }
    }
}

/// A store that never retains anything.
///
/// Every fetch is a miss; use it to disable caching without changing call
/// sites.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl NullStore {
    /// Creates a null store.
    pub fn new() -> Self {
        Self
    }

    /// Always evaluates `compute`; nothing is stored.
    pub fn fetch<V>(&self, _key: Digest, compute: impl FnOnce() -> Result<V>) -> Result<Arc<V>> {
        Ok(Arc::new(compute()?))
    }
}

/// A store backing selected by configuration.
///
/// Dispatches [`Store::fetch`] to the wrapped variant so callers do not
/// care which backing the configuration chose.
#[derive(Debug)]
pub enum Store<V> {
    /// Unbounded map.
    Memory(MemoryStore<V>),
    /// Byte-budgeted LRU.
    Lru(LruStore<V>),
    /// Caching disabled.
    Null(NullStore),
}

impl<V: Serialize> Store<V> {
    /// Creates an unbounded store.
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// Creates a byte-budgeted LRU store.
    pub fn lru(max_bytes: usize) -> Self {
        Self::Lru(LruStore::new(max_bytes))
    }

    /// Creates a store that never caches.
    pub fn null() -> Self {
        Self::Null(NullStore::new())
    }

    /// Returns the value for `key`, computing it when absent per the
    /// backing's policy.
    pub fn fetch(&self, key: Digest, compute: impl FnOnce() -> Result<V>) -> Result<Arc<V>> {
        match self {
            Self::Memory(store) => store.fetch(key, compute),
            Self::Lru(store) => store.fetch(key, compute),
            Self::Null(store) => store.fetch(key, compute),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::identity_of;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn key(n: usize) -> Digest {
        identity_of(&("key", n)).unwrap()
    }

    #[test]
    fn test_fetch_computes_once() {
        let store: MemoryStore<f64> = MemoryStore::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let v = store
                .fetch(key(1), || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7.0)
                })
                .unwrap();
            assert_eq!(*v, 7.0);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_distinct_keys_do_not_collide() {
        let store: MemoryStore<usize> = MemoryStore::new();
        for n in 0..50 {
            store.fetch(key(n), || Ok(n)).unwrap();
        }
        assert_eq!(store.len(), 50);
        for n in 0..50 {
            let v = store.fetch(key(n), || Ok(usize::MAX)).unwrap();
            assert_eq!(*v, n);
        }
    }

    #[test]
    fn test_compute_error_is_not_stored() {
        let store: MemoryStore<f64> = MemoryStore::new();
        let result = store.fetch(key(1), || Err(tinct_core::Error::division_by_zero("test")));
        assert!(result.is_err());
        assert!(store.is_empty());
        // A later successful compute goes through.
        let v = store.fetch(key(1), || Ok(1.0)).unwrap();
        assert_eq!(*v, 1.0);
    }

    #[test]
    fn test_lru_respects_byte_budget() {
        // Each Vec<f64> of 8 elements serializes to a few dozen bytes;
        // budget fits roughly 4 of them.
        let store: LruStore<Vec<f64>> = LruStore::new(150);
        for n in 0..20 {
            store.fetch(key(n), || Ok(vec![n as f64; 8])).unwrap();
            assert!(
                store.total_bytes() <= 150,
                "budget exceeded after write {n}: {}",
                store.total_bytes()
            );
        }
        assert!(store.len() < 20);
    }

    #[test]
    fn test_lru_read_refreshes_entry() {
        let store: LruStore<Vec<f64>> = LruStore::new(200);

        // Fill with entries 0..4.
        for n in 0..4 {
            store.fetch(key(n), || Ok(vec![n as f64; 8])).unwrap();
        }
        // Refresh entry 0, then write more until something must be evicted.
        store.fetch(key(0), || Ok(vec![])).unwrap();
        for n in 4..7 {
            store.fetch(key(n), || Ok(vec![n as f64; 8])).unwrap();
        }

        // Entry 0 was promoted and must outlive entry 1 (untouched, older).
        assert!(store.contains(&key(0)), "refreshed entry was evicted");
        assert!(!store.contains(&key(1)), "stale entry survived");
    }

    #[test]
    fn test_lru_eviction_order_is_least_recent_first() {
        let store: LruStore<Vec<f64>> = LruStore::new(70);
        store.fetch(key(0), || Ok(vec![0.0; 8])).unwrap();
        store.fetch(key(1), || Ok(vec![1.0; 8])).unwrap();
        store.fetch(key(2), || Ok(vec![2.0; 8])).unwrap();
        // 0 is the least recently used; it must be the first to go.
        assert!(!store.contains(&key(0)));
        assert!(store.contains(&key(2)));
    }

    #[test]
    fn test_null_store_always_misses() {
        let store = NullStore::new();
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            store
                .fetch::<f64>(key(1), || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(0.0)
                })
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_concurrent_fetch_single_compute() {
        use std::sync::Arc as StdArc;
        use std::thread;

        let store: StdArc<MemoryStore<u64>> = StdArc::new(MemoryStore::new());
        let calls = StdArc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = StdArc::clone(&store);
                let calls = StdArc::clone(&calls);
                thread::spawn(move || {
                    for _ in 0..10 {
                        store
                            .fetch(key(9), || {
                                calls.fetch_add(1, Ordering::SeqCst);
                                Ok(99)
                            })
                            .unwrap();
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.len(), 1);
    }
}
