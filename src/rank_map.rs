//! The single-threaded rank-indexed map and its cursor.

use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;

use crate::compare::{Compare, NaturalOrder};
use crate::error::Error;
use crate::raw::RawRankTree;

mod cursor;

pub use cursor::RankCursor;

/// An ordered map with O(1) key lookup and O(log n) rank queries.
///
/// Keys are unique and hashable; values carry a total order, supplied
/// either by `V: Ord` (the default [`NaturalOrder`] comparator) or by an
/// explicit comparator via [`with_comparator`](RankMap::with_comparator).
/// Duplicate values are allowed and tie-break by arrival order, oldest
/// first. Ranks are 1-based: rank 1 is the smallest value.
///
/// # Examples
///
/// ```
/// use rank_map::RankMap;
///
/// let mut league: RankMap<u32, u64> = RankMap::new();
/// league.insert(7, 1500);
/// league.insert(11, 900);
/// league.insert(23, 1500); // same score as player 7, ranked after them
///
/// assert_eq!(league.rank_of(&11), Some(1));
/// assert_eq!(league.rank_of(&7), Some(2));
/// assert_eq!(league.rank_of(&23), Some(3));
///
/// // Moving a key to a new value re-ranks it in one call.
/// league.insert(11, 2000);
/// assert_eq!(league.rank_of(&11), Some(3));
/// ```
///
/// A comparator inverts or refines the order without touching the value
/// type:
///
/// ```
/// use rank_map::RankMap;
///
/// // Highest score first.
/// let mut league = RankMap::with_comparator(|a: &u64, b: &u64| b.cmp(a));
/// league.insert("alice", 90_u64);
/// league.insert("bob", 120);
/// assert_eq!(league.get_by_rank(1), Some((&"bob", &120)));
/// ```
pub struct RankMap<K, V, C = NaturalOrder> {
    raw: RawRankTree<K, V, C>,
}

impl<K, V> RankMap<K, V, NaturalOrder> {
    /// Creates an empty map ordered by the values' natural order.
    #[must_use]
    pub fn new() -> Self {
        Self {
            raw: RawRankTree::new(NaturalOrder),
        }
    }

    /// Creates an empty map with preallocated space for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: RawRankTree::with_capacity(capacity, NaturalOrder),
        }
    }
}

impl<K, V> Default for RankMap<K, V, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> RankMap<K, V, C> {
    /// Creates an empty map ordered by an injected comparator.
    ///
    /// The comparator must be a total order; values for which it returns
    /// `Ordering::Equal` share a rank neighborhood and tie-break by
    /// arrival.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            raw: RawRankTree::new(cmp),
        }
    }

    /// Creates an empty map with a comparator and preallocated space.
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self {
            raw: RawRankTree::with_capacity(capacity, cmp),
        }
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of distinct value classes currently stored.
    ///
    /// Entries whose values compare equal share one class; this is the
    /// node count of the underlying tree.
    #[must_use]
    pub fn distinct_values(&self) -> usize {
        self.raw.distinct_values()
    }

    /// Removes every entry and invalidates all outstanding cursors.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    pub(crate) fn version(&self) -> u64 {
        self.raw.version()
    }
}

impl<K, V, C> RankMap<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Compare<V>,
{
    /// Inserts a key-value pair, returning the previous value if the key
    /// was already present.
    ///
    /// Re-inserting a key with a value that compares equal to its current
    /// one overwrites in place: no rebalancing, no rank shift, and
    /// outstanding cursors stay valid. Inserting a *different* value
    /// re-ranks the key as if it had just arrived, placing it behind all
    /// existing entries of the new value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_map::RankMap;
    ///
    /// let mut map: RankMap<&str, i32> = RankMap::new();
    /// assert_eq!(map.insert("a", 10), None);
    /// assert_eq!(map.insert("a", 10), Some(10));
    /// assert_eq!(map.insert("a", 20), Some(10));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.remove(key)
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// O(1) to find the key's value class plus a scan of the entries
    /// sharing that value.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.get(key)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.contains_key(key)
    }

    /// Returns the 1-based rank of `key`, or `None` if it is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_map::RankMap;
    ///
    /// let mut map: RankMap<&str, i32> = RankMap::new();
    /// map.insert("low", 1);
    /// map.insert("high", 9);
    /// assert_eq!(map.rank_of(&"low"), Some(1));
    /// assert_eq!(map.rank_of(&"high"), Some(2));
    /// assert_eq!(map.rank_of(&"gone"), None);
    /// ```
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.rank_of(key)
    }

    /// Returns `key`'s rank and value in a single lookup.
    pub fn get_with_rank<Q>(&self, key: &Q) -> Option<(usize, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.get_with_rank(key)
    }

    /// Returns the entry at 1-based rank `rank`.
    ///
    /// Returns `None` for ranks outside `[1, len]`; unlike
    /// [`range_by_rank`](Self::range_by_rank), out-of-range ranks are
    /// rejected, never clamped to the nearest entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_map::RankMap;
    ///
    /// let mut map: RankMap<u32, u32> = RankMap::new();
    /// for i in 1..=99 {
    ///     map.insert(i, i);
    /// }
    /// assert_eq!(map.get_by_rank(50), Some((&50, &50)));
    /// assert_eq!(map.get_by_rank(0), None);
    /// assert_eq!(map.get_by_rank(100), None);
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.kth(rank).map(|e| self.raw.entry_pair(e))
    }

    /// Returns the entries with ranks in `(start, end]`, in rank order.
    ///
    /// Both bounds are clipped to `[0, len]`; a reversed or fully
    /// out-of-range window yields an empty vector. The exclusive start
    /// makes paging arithmetic natural: `range_by_rank(10, 20)` is "the
    /// second page of ten".
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_map::RankMap;
    ///
    /// let mut map: RankMap<u32, u32> = RankMap::new();
    /// for i in 1..=5 {
    ///     map.insert(i, i * 10);
    /// }
    /// let page: Vec<u32> = map.range_by_rank(1, 3).iter().map(|(k, _)| **k).collect();
    /// assert_eq!(page, vec![2, 3]);
    /// assert!(map.range_by_rank(9, 12).is_empty());
    /// ```
    #[must_use]
    pub fn range_by_rank(&self, start: usize, end: usize) -> Vec<(&K, &V)> {
        self.raw.range_by_rank(start, end)
    }

    /// Returns the entries whose values lie in `[low, high]`, in rank
    /// order.
    ///
    /// The probes need not be stored values; the bounds are resolved
    /// through the same descent that answers rank queries.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_map::RankMap;
    ///
    /// let mut map: RankMap<u32, u32> = RankMap::new();
    /// for i in 1..=10 {
    ///     map.insert(i, i * 10);
    /// }
    /// let keys: Vec<u32> = map.range_by_value(&30, &60).iter().map(|(k, _)| **k).collect();
    /// assert_eq!(keys, vec![3, 4, 5, 6]);
    /// ```
    #[must_use]
    pub fn range_by_value(&self, low: &V, high: &V) -> Vec<(&K, &V)> {
        self.raw.range_by_value(low, high)
    }

    /// Returns page `page` (1-based) of the rank order, `page_size`
    /// entries per page. A partial or absent page clips like
    /// [`range_by_rank`](Self::range_by_rank).
    #[must_use]
    pub fn page(&self, page_size: usize, page: usize) -> Vec<(&K, &V)> {
        let end = page_size.saturating_mul(page);
        self.range_by_rank(end.saturating_sub(page_size), end)
    }

    /// Returns the window of the rank order around `key`: the entries
    /// with ranks in `(rank - before, rank + after]`, where `rank` is the
    /// key's own rank. `before` counts the key itself, so `before >= 1`
    /// includes it and `around(&key, 1, n)` is the key plus its `n`
    /// runners-up. Both edges clip; empty if the key is absent.
    #[must_use]
    pub fn around<Q>(&self, key: &Q, before: usize, after: usize) -> Vec<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(rank) = self.rank_of(key) else {
            return Vec::new();
        };
        self.range_by_rank(rank.saturating_sub(before), rank.saturating_add(after))
    }

    /// Creates a cursor positioned at rank `start`, so that the first
    /// `next` returns the entry at rank `start + 1`.
    ///
    /// `start` may be anywhere in `[0, len]`; anything else is rejected
    /// with [`Error::RankOutOfRange`]. The cursor holds no borrow of the
    /// map: each cursor call takes the map again and fails fast with
    /// [`Error::ConcurrentModification`] if the map was structurally
    /// modified in between.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankOutOfRange`] if `start > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rank_map::RankMap;
    ///
    /// let mut map: RankMap<&str, i32> = RankMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    ///
    /// let mut cursor = map.cursor(0)?;
    /// assert_eq!(cursor.next(&map)?, Some((&"a", &1)));
    /// assert_eq!(cursor.next(&map)?, Some((&"b", &2)));
    /// assert_eq!(cursor.next(&map)?, None);
    /// # Ok::<(), rank_map::Error>(())
    /// ```
    pub fn cursor(&self, start: usize) -> Result<RankCursor, Error> {
        if start > self.len() {
            return Err(Error::RankOutOfRange {
                rank: start,
                len: self.len(),
            });
        }
        Ok(RankCursor::new(start, self.version()))
    }
}

impl<K, V, C> fmt::Debug for RankMap<K, V, C>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
    C: Compare<V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.range_by_rank(0, self.len())).finish()
    }
}

impl<K, V, C> Extend<(K, V)> for RankMap<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Compare<V>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for RankMap<K, V, NaturalOrder>
where
    K: Eq + Hash + Clone,
    V: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C> Clone for RankMap<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}
