use thiserror::Error;

/// Errors surfaced by the fallible parts of the public API.
///
/// The tree operations themselves are total: `get`, `insert`, `remove` and
/// the range queries express absence through `Option` or empty results.
/// Errors arise only from rank-addressed cursors, where an out-of-range
/// position or a stale view is caller misuse that must not be papered over.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A cursor was requested at a rank outside `0..=len`.
    ///
    /// Note the asymmetry with [`range_by_rank`](crate::RankMap::range_by_rank),
    /// which clips its bounds instead of rejecting them. That asymmetry is
    /// deliberate: ranges are routinely computed from page arithmetic and
    /// benefit from clipping, while a cursor or k-th lookup at an
    /// impossible rank is a logic error.
    #[error("rank {rank} out of range for cursor over {len} entries")]
    RankOutOfRange {
        /// The requested starting rank.
        rank: usize,
        /// The number of entries in the map at the time of the request.
        len: usize,
    },

    /// The map was structurally modified since the cursor last observed it.
    ///
    /// Cursors fail fast instead of returning entries from a shifted rank
    /// order. Mutations performed through the cursor itself re-synchronize
    /// it and do not trigger this error.
    #[error("map was structurally modified behind the cursor")]
    ConcurrentModification,

    /// `RankCursor::remove` was called with no entry to remove.
    ///
    /// A cursor can only remove the entry most recently returned by `next`
    /// or `previous`, and only once per returned entry.
    #[error("cursor has no current entry to remove")]
    NothingToRemove,
}
