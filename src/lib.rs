//! Rank-indexed ordered map for Rust.
//!
//! This crate provides [`RankMap`], an ordered map keyed two ways at once:
//! by a hashable key (like `HashMap`) and by the *rank* of the stored value
//! in sorted order (like an order-statistic tree). Duplicate values are
//! allowed; among equal values, entries keep a stable tie-break by arrival
//! order. All rank operations are O(log n):
//!
//! - [`rank_of`](RankMap::rank_of) - Get the 1-based sorted position of a key
//! - [`get_by_rank`](RankMap::get_by_rank) - Get the entry at a given rank
//! - [`range_by_rank`](RankMap::range_by_rank) / [`range_by_value`](RankMap::range_by_value) -
//!   Extract a contiguous slice of the sorted order
//!
//! # Example
//!
//! ```
//! use rank_map::RankMap;
//!
//! let mut scores: RankMap<&str, u32> = RankMap::new();
//! scores.insert("alice", 100);
//! scores.insert("bob", 85);
//! scores.insert("carol", 92);
//!
//! // Key-based access is O(1).
//! assert_eq!(scores.get(&"bob"), Some(&85));
//!
//! // Ranks are 1-based and ascend with the value order.
//! assert_eq!(scores.rank_of(&"bob"), Some(1));
//! assert_eq!(scores.rank_of(&"alice"), Some(3));
//!
//! // The k-th entry in sorted order.
//! let (name, score) = scores.get_by_rank(2).unwrap();
//! assert_eq!((*name, *score), ("carol", 92));
//! ```
//!
//! # Duplicate values
//!
//! Keys are unique, values need not be. Entries with equal values occupy
//! adjacent ranks ordered by insertion time, oldest first. Re-inserting a
//! key with a value that compares equal to its current value is a cheap
//! in-place overwrite that does not disturb the tie-break order; changing a
//! key's value moves it behind all existing entries with the new value.
//!
//! # Concurrency
//!
//! [`RankMap`] is single-threaded. [`ConcurrentRankMap`] wraps one map
//! behind a single-writer/multi-reader lock, making every call one atomic
//! critical section.
//!
//! # Implementation
//!
//! The map is a red-black tree augmented with subtree sizes, with one tree
//! node per distinct value; entries sharing a value hang off their node in
//! a circular list ordered by arrival. Nodes live in an arena and refer to
//! each other through compact handles, so the parent/child and list links
//! never form owning cycles. A side table maps each key to its owning node
//! for O(1) lookup.

#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod compare;
mod error;
mod raw;

pub mod concurrent;
pub mod rank_map;

pub use compare::{Compare, NaturalOrder};
pub use concurrent::ConcurrentRankMap;
pub use error::Error;
pub use rank_map::{RankCursor, RankMap};
