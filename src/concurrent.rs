//! A [`RankMap`] behind a read/write lock for shared use across threads.

use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::compare::{Compare, NaturalOrder};
use crate::rank_map::RankMap;

/// A thread-safe rank-indexed map.
///
/// Wraps a [`RankMap`] in a [`parking_lot::RwLock`]: queries take the
/// shared lock and run concurrently, mutations take the exclusive lock.
/// Each method is one atomic operation; query results are returned by
/// clone so no lock outlives the call.
///
/// Cursors are not exposed here. A detached cursor is only coherent while
/// the map cannot change underneath it, so walk the map through a guard
/// instead: hold [`read`](ConcurrentRankMap::read) (or
/// [`write`](ConcurrentRankMap::write), to remove while walking) for the
/// whole traversal.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use rank_map::ConcurrentRankMap;
///
/// let league: Arc<ConcurrentRankMap<u32, u64>> = Arc::new(ConcurrentRankMap::new());
/// let writer = Arc::clone(&league);
/// std::thread::spawn(move || {
///     writer.insert(7, 1500);
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(league.rank_of(&7), Some(1));
/// assert_eq!(league.get_by_rank(1), Some((7, 1500)));
/// ```
pub struct ConcurrentRankMap<K, V, C = NaturalOrder> {
    inner: RwLock<RankMap<K, V, C>>,
}

impl<K, V> ConcurrentRankMap<K, V, NaturalOrder> {
    /// Creates an empty map ordered by the values' natural order.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RankMap::new()),
        }
    }

    /// Creates an empty map with preallocated space for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(RankMap::with_capacity(capacity)),
        }
    }
}

impl<K, V> Default for ConcurrentRankMap<K, V, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> ConcurrentRankMap<K, V, C> {
    /// Creates an empty map ordered by an injected comparator.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            inner: RwLock::new(RankMap::with_comparator(cmp)),
        }
    }

    /// Wraps an existing map, taking ownership of it.
    pub fn from_map(map: RankMap<K, V, C>) -> Self {
        Self {
            inner: RwLock::new(map),
        }
    }

    /// Unwraps the lock, returning the inner map.
    pub fn into_inner(self) -> RankMap<K, V, C> {
        self.inner.into_inner()
    }

    /// Acquires the shared lock for a multi-step read, e.g. a cursor walk.
    pub fn read(&self) -> RwLockReadGuard<'_, RankMap<K, V, C>> {
        self.inner.read()
    }

    /// Acquires the exclusive lock for a multi-step mutation.
    pub fn write(&self) -> RwLockWriteGuard<'_, RankMap<K, V, C>> {
        self.inner.write()
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns the number of distinct value classes currently stored.
    #[must_use]
    pub fn distinct_values(&self) -> usize {
        self.inner.read().distinct_values()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.inner.write().clear();
    }
}

impl<K, V, C> ConcurrentRankMap<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Compare<V>,
{
    /// Inserts a key-value pair, returning the previous value if the key
    /// was already present. See [`RankMap::insert`] for the re-ranking
    /// rules.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.write().remove(key)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.read().contains_key(key)
    }

    /// Returns the 1-based rank of `key`, or `None` if it is absent.
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.read().rank_of(key)
    }
}

impl<K, V, C> ConcurrentRankMap<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Compare<V>,
{
    /// Returns a clone of the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.read().get(key).cloned()
    }

    /// Returns `key`'s rank and a clone of its value in a single lookup.
    pub fn get_with_rank<Q>(&self, key: &Q) -> Option<(usize, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.read().get_with_rank(key).map(|(rank, v)| (rank, v.clone()))
    }

    /// Returns a clone of the entry at 1-based rank `rank`, or `None` for
    /// ranks outside `[1, len]`.
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(K, V)> {
        self.inner.read().get_by_rank(rank).map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Returns clones of the entries with ranks in `(start, end]`, bounds
    /// clipped to `[0, len]`.
    #[must_use]
    pub fn range_by_rank(&self, start: usize, end: usize) -> Vec<(K, V)> {
        clone_entries(self.inner.read().range_by_rank(start, end))
    }

    /// Returns clones of the entries whose values lie in `[low, high]`.
    #[must_use]
    pub fn range_by_value(&self, low: &V, high: &V) -> Vec<(K, V)> {
        clone_entries(self.inner.read().range_by_value(low, high))
    }

    /// Returns page `page` (1-based) of the rank order, `page_size`
    /// entries per page.
    #[must_use]
    pub fn page(&self, page_size: usize, page: usize) -> Vec<(K, V)> {
        clone_entries(self.inner.read().page(page_size, page))
    }

    /// Returns the window of the rank order around `key`: ranks in
    /// `(rank - before, rank + after]`, so `before` counts the key
    /// itself. See [`RankMap::around`].
    #[must_use]
    pub fn around<Q>(&self, key: &Q, before: usize, after: usize) -> Vec<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        clone_entries(self.inner.read().around(key, before, after))
    }
}

fn clone_entries<K: Clone, V: Clone>(entries: Vec<(&K, &V)>) -> Vec<(K, V)> {
    entries.into_iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

impl<K, V, C> fmt::Debug for ConcurrentRankMap<K, V, C>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
    C: Compare<V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner.read(), f)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn single_call_operations() {
        let map: ConcurrentRankMap<&str, i32> = ConcurrentRankMap::new();
        assert!(map.is_empty());
        assert_eq!(map.insert("a", 10), None);
        assert_eq!(map.insert("b", 5), None);
        assert_eq!(map.rank_of(&"b"), Some(1));
        assert_eq!(map.get_by_rank(2), Some(("a", 10)));
        assert_eq!(map.get(&"a"), Some(10));
        assert_eq!(map.remove(&"a"), Some(10));
        assert_eq!(map.len(), 1);
        map.clear();
        assert!(map.is_empty());
    }

    #[test]
    fn cursor_walk_through_a_guard() {
        let map: ConcurrentRankMap<u32, u32> = ConcurrentRankMap::new();
        for i in 1..=5 {
            map.insert(i, i * 10);
        }

        let guard = map.read();
        let mut cursor = guard.cursor(0).unwrap();
        let mut keys = Vec::new();
        while let Some((&k, _)) = cursor.next(&guard).unwrap() {
            keys.push(k);
        }
        assert_eq!(keys, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn removal_through_the_write_guard() {
        let map: ConcurrentRankMap<u32, u32> = ConcurrentRankMap::new();
        for i in 1..=5 {
            map.insert(i, i * 10);
        }

        let mut guard = map.write();
        let mut cursor = guard.cursor(0).unwrap();
        while let Some((&k, _)) = cursor.next(&guard).unwrap() {
            if k % 2 == 0 {
                cursor.remove(&mut guard).unwrap();
            }
        }
        drop(guard);
        assert_eq!(map.len(), 3);
        assert!(!map.contains_key(&2));
        assert!(!map.contains_key(&4));
    }

    #[test]
    fn into_inner_round_trip() {
        let mut plain: RankMap<u32, u32> = RankMap::new();
        plain.insert(1, 1);
        let shared = ConcurrentRankMap::from_map(plain);
        shared.insert(2, 2);
        let plain = shared.into_inner();
        assert_eq!(plain.len(), 2);
    }
}
