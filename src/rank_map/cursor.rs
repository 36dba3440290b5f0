use core::hash::Hash;

use crate::compare::Compare;
use crate::error::Error;

use super::RankMap;

/// A detached cursor over a [`RankMap`] in rank order.
///
/// The cursor stores a position, not a borrow: every operation takes the
/// map as an argument and first checks that the map's structure has not
/// changed since the cursor last observed it. Any out-of-band `insert`,
/// `remove` or `clear` that reshapes the tree makes the next cursor call
/// fail with [`Error::ConcurrentModification`] instead of silently walking
/// shifted ranks. Mutating *through* the cursor keeps it synchronized.
///
/// A cursor at position `r` sits between ranks `r` and `r + 1`:
/// [`next`](RankCursor::next) returns the entry at rank `r + 1` and
/// advances, [`previous`](RankCursor::previous) returns the entry at rank
/// `r` and retreats. Stepping costs O(log n) per call; for bulk extraction
/// prefer [`RankMap::range_by_rank`].
///
/// The fail-fast check is a misuse detector, not a synchronization
/// mechanism; share a map across threads through
/// [`ConcurrentRankMap`](crate::ConcurrentRankMap) instead.
///
/// # Examples
///
/// ```
/// use rank_map::RankMap;
///
/// let mut map: RankMap<&str, i32> = RankMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
/// map.insert("c", 3);
///
/// // Walk forward from the middle, pruning as we go.
/// let mut cursor = map.cursor(1)?;
/// assert_eq!(cursor.next(&map)?, Some((&"b", &2)));
/// let (key, value) = cursor.remove(&mut map)?;
/// assert_eq!((key, value), ("b", 2));
/// assert_eq!(cursor.next(&map)?, Some((&"c", &3)));
/// # Ok::<(), rank_map::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RankCursor {
    /// Current position: the cursor sits after rank `pos`.
    pos: usize,
    /// Rank of the entry most recently returned, armed for `remove`.
    last: Option<usize>,
    /// Map version this cursor is synchronized with.
    version: u64,
}

impl RankCursor {
    pub(crate) fn new(pos: usize, version: u64) -> Self {
        Self {
            pos,
            last: None,
            version,
        }
    }

    /// The rank `next` would return, i.e. the position after the cursor.
    #[must_use]
    pub fn next_rank(&self) -> usize {
        self.pos + 1
    }

    /// The rank `previous` would return.
    #[must_use]
    pub fn previous_rank(&self) -> usize {
        self.pos
    }

    fn check<K, V, C>(&self, map: &RankMap<K, V, C>) -> Result<(), Error> {
        if self.version == map.version() {
            Ok(())
        } else {
            Err(Error::ConcurrentModification)
        }
    }

    /// Returns the entry after the cursor and advances past it, or
    /// `Ok(None)` at the end of the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConcurrentModification`] if the map was
    /// structurally modified since the cursor last observed it.
    pub fn next<'a, K, V, C>(&mut self, map: &'a RankMap<K, V, C>) -> Result<Option<(&'a K, &'a V)>, Error>
    where
        K: Eq + Hash + Clone,
        C: Compare<V>,
    {
        self.check(map)?;
        if self.pos >= map.len() {
            return Ok(None);
        }
        self.pos += 1;
        self.last = Some(self.pos);
        Ok(map.get_by_rank(self.pos))
    }

    /// Returns the entry before the cursor and retreats past it, or
    /// `Ok(None)` at the start of the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConcurrentModification`] if the map was
    /// structurally modified since the cursor last observed it.
    pub fn previous<'a, K, V, C>(&mut self, map: &'a RankMap<K, V, C>) -> Result<Option<(&'a K, &'a V)>, Error>
    where
        K: Eq + Hash + Clone,
        C: Compare<V>,
    {
        self.check(map)?;
        if self.pos == 0 {
            return Ok(None);
        }
        let rank = self.pos;
        self.pos -= 1;
        self.last = Some(rank);
        Ok(map.get_by_rank(rank))
    }

    /// Removes the entry most recently returned by
    /// [`next`](RankCursor::next) or [`previous`](RankCursor::previous)
    /// and re-synchronizes the cursor, so iteration continues across the
    /// closed gap.
    ///
    /// # Errors
    ///
    /// - [`Error::ConcurrentModification`] if the map was structurally
    ///   modified out-of-band.
    /// - [`Error::NothingToRemove`] if no entry has been returned yet, or
    ///   the last returned entry was already removed.
    pub fn remove<K, V, C>(&mut self, map: &mut RankMap<K, V, C>) -> Result<(K, V), Error>
    where
        K: Eq + Hash + Clone,
        C: Compare<V>,
    {
        self.check(map)?;
        let rank = self.last.take().ok_or(Error::NothingToRemove)?;
        let key = map
            .get_by_rank(rank)
            .map(|(k, _)| k.clone())
            .expect("`RankCursor::remove()` - synchronized cursor points past the map!");
        let value = map.remove(&key).expect("`RankCursor::remove()` - located key vanished!");
        // Entries behind the removed rank shifted down by one.
        if rank <= self.pos {
            self.pos -= 1;
        }
        self.version = map.version();
        Ok((key, value))
    }
}
