use core::borrow::Borrow;
use core::cmp::Ordering;
use core::hash::Hash;
use core::mem;

use rustc_hash::FxHashMap;

use crate::compare::Compare;

use super::arena::Arena;
use super::entry::Entry;
use super::handle::Handle;
use super::node::{Color, Node};

/// The arena-backed order-statistic red-black tree backing `RankMap`.
///
/// Layout:
/// - `nodes` owns the tree structure; one node per distinct value class.
/// - `entries` owns the key/value pairs; entries with equal values form a
///   circular ring hanging off their node, oldest first.
/// - `index` maps every key to its owning node for O(1) lookup. Finding
///   the concrete entry within the node is an O(ring length) scan, which
///   is a known scaling limit when many keys share one value.
/// - `version` counts structural modifications for fail-fast cursors. A
///   pure in-place value overwrite (equal value re-insert) does not bump
///   it; everything that moves entries or nodes does.
#[derive(Clone)]
pub(crate) struct RawRankTree<K, V, C> {
    nodes: Arena<Node>,
    entries: Arena<Entry<K, V>>,
    root: Option<Handle>,
    index: FxHashMap<K, Handle>,
    cmp: C,
    version: u64,
}

impl<K, V, C> RawRankTree<K, V, C> {
    pub(crate) fn new(cmp: C) -> Self {
        Self {
            nodes: Arena::new(),
            entries: Arena::new(),
            root: None,
            index: FxHashMap::default(),
            cmp,
            version: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize, cmp: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            entries: Arena::with_capacity(capacity),
            root: None,
            index: FxHashMap::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher),
            cmp,
            version: 0,
        }
    }

    /// Total number of entries.
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of distinct value classes (tree nodes).
    pub(crate) fn distinct_values(&self) -> usize {
        self.nodes.len()
    }

    /// Structural modification counter, snapshotted by cursors.
    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.entries.clear();
        self.index.clear();
        self.root = None;
        self.version += 1;
    }

    #[inline]
    fn node(&self, h: Handle) -> &Node {
        self.nodes.get(h)
    }

    #[inline]
    fn node_mut(&mut self, h: Handle) -> &mut Node {
        self.nodes.get_mut(h)
    }

    #[inline]
    fn color_of(&self, h: Option<Handle>) -> Color {
        h.map_or(Color::Black, |h| self.node(h).color)
    }

    #[inline]
    fn size_of(&self, h: Option<Handle>) -> usize {
        h.map_or(0, |h| self.node(h).size)
    }

    fn set_color(&mut self, h: Option<Handle>, color: Color) {
        if let Some(h) = h {
            self.node_mut(h).color = color;
        }
    }

    fn set_parent(&mut self, h: Option<Handle>, parent: Option<Handle>) {
        if let Some(h) = h {
            self.node_mut(h).parent = parent;
        }
    }

    /// The value a node sorts by: the value of its ring head.
    #[inline]
    fn node_value(&self, h: Handle) -> &V {
        &self.entries.get(self.node(h).head()).value
    }

    fn minimum(&self, mut h: Handle) -> Handle {
        while let Some(left) = self.node(h).left {
            h = left;
        }
        h
    }

    /// In-order successor node, walking up through parent links.
    fn successor(&self, h: Handle) -> Option<Handle> {
        if let Some(right) = self.node(h).right {
            return Some(self.minimum(right));
        }
        let mut child = h;
        let mut parent = self.node(h).parent;
        while let Some(p) = parent {
            if self.node(p).right != Some(child) {
                break;
            }
            child = p;
            parent = self.node(p).parent;
        }
        parent
    }

    /// Restores `size = len + size(left) + size(right)` for one node.
    fn maintain(&mut self, h: Handle) {
        let left = self.size_of(self.node(h).left);
        let right = self.size_of(self.node(h).right);
        let node = self.node_mut(h);
        node.size = node.len + left + right;
    }

    /// Restores the augmentation invariant on the path `h -> root`.
    fn fix_size_upward(&mut self, mut h: Option<Handle>) {
        while let Some(current) = h {
            self.maintain(current);
            h = self.node(current).parent;
        }
    }

    fn rotate_left(&mut self, x: Handle) {
        let Some(y) = self.node(x).right else { return };
        let y_left = self.node(y).left;
        self.node_mut(x).right = y_left;
        self.set_parent(y_left, Some(x));

        let xp = self.node(x).parent;
        self.node_mut(y).parent = xp;
        match xp {
            None => self.root = Some(y),
            Some(p) if self.node(p).left == Some(x) => self.node_mut(p).left = Some(y),
            Some(p) => self.node_mut(p).right = Some(y),
        }

        self.node_mut(y).left = Some(x);
        self.node_mut(x).parent = Some(y);
        // x moved below y; repair sizes bottom-up.
        self.maintain(x);
        self.maintain(y);
    }

    fn rotate_right(&mut self, y: Handle) {
        let Some(x) = self.node(y).left else { return };
        let x_right = self.node(x).right;
        self.node_mut(y).left = x_right;
        self.set_parent(x_right, Some(y));

        let yp = self.node(y).parent;
        self.node_mut(x).parent = yp;
        match yp {
            None => self.root = Some(x),
            Some(p) if self.node(p).left == Some(y) => self.node_mut(p).left = Some(x),
            Some(p) => self.node_mut(p).right = Some(x),
        }

        self.node_mut(x).right = Some(y);
        self.node_mut(y).parent = Some(x);
        self.maintain(y);
        self.maintain(x);
    }

    /// Appends a detached entry at the back of a node's ring.
    fn ring_push_back(&mut self, node_h: Handle, e: Handle) {
        let head = self.node(node_h).head();
        let tail = self.entries.get(head).prev;
        self.entries.get_mut(e).prev = tail;
        self.entries.get_mut(e).next = head;
        self.entries.get_mut(tail).next = e;
        self.entries.get_mut(head).prev = e;
        self.node_mut(node_h).len += 1;
    }

    /// Unlinks an entry from its node's ring, leaving it self-linked.
    fn ring_unlink(&mut self, node_h: Handle, e: Handle) {
        let prev = self.entries.get(e).prev;
        let next = self.entries.get(e).next;
        if prev == e {
            self.node_mut(node_h).head = None;
        } else {
            if self.node(node_h).head == Some(e) {
                self.node_mut(node_h).head = Some(next);
            }
            self.entries.get_mut(prev).next = next;
            self.entries.get_mut(next).prev = prev;
        }
        self.entries.get_mut(e).prev = e;
        self.entries.get_mut(e).next = e;
        self.node_mut(node_h).len -= 1;
    }

    /// Selects the k-th entry (1-based) of a ring, scanning from whichever
    /// end is closer.
    fn ring_kth(&self, node_h: Handle, k: usize) -> Handle {
        let node = self.node(node_h);
        debug_assert!(k >= 1 && k <= node.len);
        if k > node.len / 2 {
            let mut e = self.entries.get(node.head()).prev;
            let mut i = node.len;
            while i > k {
                e = self.entries.get(e).prev;
                i -= 1;
            }
            e
        } else {
            let mut e = node.head();
            let mut i = 1;
            while i < k {
                e = self.entries.get(e).next;
                i += 1;
            }
            e
        }
    }
}

impl<K, V, C> RawRankTree<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Compare<V>,
{
    /// Finds a key's owning node, entry handle and 1-based ring position.
    fn locate<Q>(&self, key: &Q) -> Option<(Handle, Handle, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let &node_h = self.index.get(key)?;
        let head = self.node(node_h).head();
        let mut e = head;
        let mut pos = 1;
        loop {
            if self.entries.get(e).key.borrow() == key {
                return Some((node_h, e, pos));
            }
            e = self.entries.get(e).next;
            pos += 1;
            if e == head {
                panic!("`RawRankTree::locate()` - key index points at a node without the key!");
            }
        }
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (_, e, _) = self.locate(key)?;
        Some(&self.entries.get(e).value)
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains_key(key)
    }

    /// 1-based rank: left-subtree sizes along the node-to-root path plus
    /// the entry's position within its ring.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (node_h, _, pos) = self.locate(key)?;
        Some(self.rank_of_node(node_h) + pos)
    }

    /// Rank and value in one lookup.
    pub(crate) fn get_with_rank<Q>(&self, key: &Q) -> Option<(usize, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (node_h, e, pos) = self.locate(key)?;
        Some((self.rank_of_node(node_h) + pos, &self.entries.get(e).value))
    }

    /// Number of entries ranked before the first entry of `node_h`.
    fn rank_of_node(&self, node_h: Handle) -> usize {
        let mut before = self.size_of(self.node(node_h).left);
        let mut p = node_h;
        while let Some(parent) = self.node(p).parent {
            if self.node(parent).right == Some(p) {
                before += self.size_of(self.node(parent).left) + self.node(parent).len;
            }
            p = parent;
        }
        before
    }

    /// Inserts or updates a key. Returns the previous value, if any.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut previous = None;

        let e = if let Some((node_h, e, _)) = self.locate(&key) {
            if self.cmp.compare(&value, &self.entries.get(e).value) == Ordering::Equal {
                // Value unchanged under the order: overwrite in place.
                // No structural change, no version bump, ring position kept.
                return Some(mem::replace(&mut self.entries.get_mut(e).value, value));
            }
            // The entry moves to a different value class: pull it out of
            // its ring (dropping the node if that empties it) and re-home
            // it below. The new value rides along in the entry.
            previous = Some(mem::replace(&mut self.entries.get_mut(e).value, value));
            self.ring_unlink(node_h, e);
            if self.node(node_h).head.is_none() {
                self.delete_node(node_h);
            } else {
                self.fix_size_upward(Some(node_h));
            }
            e
        } else {
            self.entries.alloc_with(|h| Entry::new(h, key.clone(), value))
        };

        self.version += 1;

        // BST descent comparing the entry's value against node values.
        let mut x = self.root;
        let mut y = None;
        let mut went_left = false;
        while let Some(h) = x {
            y = Some(h);
            match self.cmp.compare(&self.entries.get(e).value, self.node_value(h)) {
                Ordering::Less => {
                    x = self.node(h).left;
                    went_left = true;
                }
                Ordering::Greater => {
                    x = self.node(h).right;
                    went_left = false;
                }
                Ordering::Equal => {
                    // Equal value class exists: append behind its peers.
                    self.ring_push_back(h, e);
                    self.fix_size_upward(Some(h));
                    self.index.insert(key, h);
                    return previous;
                }
            }
        }

        // No equal value class: a fresh red node under the descent's last
        // visited position, then the standard insertion fixup.
        let z = self.nodes.alloc(Node::new(y, e));
        match y {
            None => self.root = Some(z),
            Some(p) if went_left => self.node_mut(p).left = Some(z),
            Some(p) => self.node_mut(p).right = Some(z),
        }
        self.fix_size_upward(Some(z));
        self.insert_fixup(z);
        self.index.insert(key, z);
        previous
    }

    /// Removes a key. Returns its value, if present.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (node_h, e, _) = self.locate(key)?;
        self.index.remove(key);
        self.version += 1;
        self.ring_unlink(node_h, e);
        if self.node(node_h).head.is_none() {
            self.delete_node(node_h);
        } else {
            self.fix_size_upward(Some(node_h));
        }
        Some(self.entries.take(e).value)
    }

    /// Entry handle at a 1-based rank; `None` outside `[1, len]`.
    ///
    /// This deliberately rejects out-of-range ranks rather than clamping;
    /// `range_by_rank` is the clipping variant.
    pub(crate) fn kth(&self, rank: usize) -> Option<Handle> {
        if rank == 0 || rank > self.len() {
            return None;
        }
        let mut k = rank;
        let mut x = self.root;
        while let Some(h) = x {
            let ls = self.size_of(self.node(h).left);
            let here = self.node(h).len;
            if k <= ls {
                x = self.node(h).left;
            } else if k > ls + here {
                k -= ls + here;
                x = self.node(h).right;
            } else {
                return Some(self.ring_kth(h, k - ls));
            }
        }
        // The size augmentation invariant guarantees the descent lands.
        panic!("`RawRankTree::kth()` - size augmentation out of sync!");
    }

    pub(crate) fn entry_pair(&self, e: Handle) -> (&K, &V) {
        let entry = self.entries.get(e);
        (&entry.key, &entry.value)
    }

    /// The entry one rank after `e`, crossing into the successor node when
    /// the ring wraps.
    fn entry_after(&self, e: Handle) -> Option<Handle> {
        let entry = self.entries.get(e);
        let &node_h = self.index.get(&entry.key).expect("`RawRankTree::entry_after()` - entry key missing from index!");
        if entry.next == self.node(node_h).head() {
            let next_node = self.successor(node_h)?;
            return Some(self.node(next_node).head());
        }
        Some(entry.next)
    }

    /// Entries with ranks in `(start, end]`, both bounds clipped to
    /// `[0, len]`.
    pub(crate) fn range_by_rank(&self, start: usize, end: usize) -> Vec<(&K, &V)> {
        let len = self.len();
        let start = start.min(len);
        let end = end.min(len);
        if start >= end {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(end - start);
        let mut e = self.kth(start + 1).expect("`RawRankTree::range_by_rank()` - clipped rank must resolve!");
        let mut rank = start + 1;
        loop {
            out.push(self.entry_pair(e));
            if rank == end {
                break;
            }
            e = self.entry_after(e).expect("`RawRankTree::range_by_rank()` - ran off the tree before `end`!");
            rank += 1;
        }
        out
    }

    /// `(strictly_less, equal)` entry counts for a probe value.
    pub(crate) fn rank_info(&self, value: &V) -> (usize, usize) {
        let mut less = 0;
        let mut equal = 0;
        let mut x = self.root;
        while let Some(h) = x {
            match self.cmp.compare(value, self.node_value(h)) {
                Ordering::Equal => {
                    less += self.size_of(self.node(h).left);
                    equal = self.node(h).len;
                    break;
                }
                Ordering::Less => x = self.node(h).left,
                Ordering::Greater => {
                    less += self.size_of(self.node(h).left) + self.node(h).len;
                    x = self.node(h).right;
                }
            }
        }
        (less, equal)
    }

    /// Entries whose values fall in `[low, high]`, in rank order.
    pub(crate) fn range_by_value(&self, low: &V, high: &V) -> Vec<(&K, &V)> {
        let (start, _) = self.rank_info(low);
        let (below_high, at_high) = self.rank_info(high);
        self.range_by_rank(start, below_high + at_high)
    }

    /// Restores the red-black properties after linking the red node `z`.
    fn insert_fixup(&mut self, mut z: Handle) {
        loop {
            let Some(p) = self.node(z).parent else { break };
            if self.node(p).color == Color::Black {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let g = self.node(p).parent.expect("`RawRankTree::insert_fixup()` - red node has no grandparent!");
            if self.node(g).left == Some(p) {
                let uncle = self.node(g).right;
                if self.color_of(uncle) == Color::Red {
                    // Red uncle: recolor and continue from the grandparent.
                    self.node_mut(p).color = Color::Black;
                    self.set_color(uncle, Color::Black);
                    self.node_mut(g).color = Color::Red;
                    z = g;
                } else {
                    let mut z2 = z;
                    if self.node(p).right == Some(z) {
                        // Inner child: rotate onto the outside first.
                        z2 = p;
                        self.rotate_left(z2);
                    }
                    let p2 = self.node(z2).parent.expect("`RawRankTree::insert_fixup()` - rotated node lost its parent!");
                    let g2 = self.node(p2).parent.expect("`RawRankTree::insert_fixup()` - rotated node lost its grandparent!");
                    self.node_mut(p2).color = Color::Black;
                    self.node_mut(g2).color = Color::Red;
                    self.rotate_right(g2);
                    z = z2;
                }
            } else {
                let uncle = self.node(g).left;
                if self.color_of(uncle) == Color::Red {
                    self.node_mut(p).color = Color::Black;
                    self.set_color(uncle, Color::Black);
                    self.node_mut(g).color = Color::Red;
                    z = g;
                } else {
                    let mut z2 = z;
                    if self.node(p).left == Some(z) {
                        z2 = p;
                        self.rotate_right(z2);
                    }
                    let p2 = self.node(z2).parent.expect("`RawRankTree::insert_fixup()` - rotated node lost its parent!");
                    let g2 = self.node(p2).parent.expect("`RawRankTree::insert_fixup()` - rotated node lost its grandparent!");
                    self.node_mut(p2).color = Color::Black;
                    self.node_mut(g2).color = Color::Red;
                    self.rotate_left(g2);
                    z = z2;
                }
            }
        }
        let root = self.root.expect("`RawRankTree::insert_fixup()` - fixup on an empty tree!");
        self.node_mut(root).color = Color::Black;
    }

    /// Replaces the subtree rooted at `u` with the subtree rooted at `v`.
    fn transplant(&mut self, u: Handle, v: Option<Handle>) {
        let up = self.node(u).parent;
        match up {
            None => self.root = v,
            Some(p) if self.node(p).left == Some(u) => self.node_mut(p).left = v,
            Some(p) => self.node_mut(p).right = v,
        }
        self.set_parent(v, up);
    }

    /// Unlinks an emptied node from the tree and frees it.
    ///
    /// Standard three-case deletion: splice out a node with at most one
    /// child directly, otherwise splice its in-order successor into its
    /// place and continue from the successor's old position.
    fn delete_node(&mut self, z: Handle) {
        let z_left = self.node(z).left;
        let z_right = self.node(z).right;

        let removed_color;
        let x;
        let xp;
        if z_left.is_none() || z_right.is_none() {
            removed_color = self.node(z).color;
            x = z_left.or(z_right);
            xp = self.node(z).parent;
            self.transplant(z, x);
        } else {
            let y = self.minimum(z_right.expect("`RawRankTree::delete_node()` - checked right child vanished!"));
            removed_color = self.node(y).color;
            x = self.node(y).right;
            if self.node(y).parent == Some(z) {
                xp = Some(y);
            } else {
                xp = self.node(y).parent;
                self.transplant(y, x);
                self.node_mut(y).right = z_right;
                self.set_parent(z_right, Some(y));
            }
            self.transplant(z, Some(y));
            self.node_mut(y).left = z_left;
            self.set_parent(z_left, Some(y));
            let z_color = self.node(z).color;
            self.node_mut(y).color = z_color;
        }

        // The spliced position's path to the root needs fresh sizes; when
        // the successor moved, `xp` sits inside its new subtree so the walk
        // covers both.
        self.fix_size_upward(xp);
        if removed_color == Color::Black {
            self.delete_fixup(x, xp);
        }
        self.nodes.free(z);
    }

    /// Restores the red-black properties after removing a black node.
    ///
    /// `x` is the child that replaced the removed node (possibly nil) and
    /// `xp` its parent; `xp` is threaded explicitly because nil children
    /// have no back-reference.
    fn delete_fixup(&mut self, mut x: Option<Handle>, mut xp: Option<Handle>) {
        while x != self.root && self.color_of(x) == Color::Black {
            let p = xp.expect("`RawRankTree::delete_fixup()` - non-root double-black without a parent!");
            if self.node(p).left == x {
                let mut w = self.node(p).right.expect("`RawRankTree::delete_fixup()` - double-black without a sibling!");
                if self.node(w).color == Color::Red {
                    // Red sibling: rotate it away to expose a black one.
                    self.node_mut(w).color = Color::Black;
                    self.node_mut(p).color = Color::Red;
                    self.rotate_left(p);
                    w = self.node(p).right.expect("`RawRankTree::delete_fixup()` - rotation lost the sibling!");
                }
                let wl = self.node(w).left;
                let wr = self.node(w).right;
                if self.color_of(wl) == Color::Black && self.color_of(wr) == Color::Black {
                    // Push the blackness up one level.
                    self.node_mut(w).color = Color::Red;
                    x = Some(p);
                    xp = self.node(p).parent;
                } else {
                    if self.color_of(wr) == Color::Black {
                        self.set_color(wl, Color::Black);
                        self.node_mut(w).color = Color::Red;
                        self.rotate_right(w);
                        w = self.node(p).right.expect("`RawRankTree::delete_fixup()` - rotation lost the sibling!");
                    }
                    let p_color = self.node(p).color;
                    self.node_mut(w).color = p_color;
                    self.node_mut(p).color = Color::Black;
                    let wr = self.node(w).right;
                    self.set_color(wr, Color::Black);
                    self.rotate_left(p);
                    x = self.root;
                }
            } else {
                let mut w = self.node(p).left.expect("`RawRankTree::delete_fixup()` - double-black without a sibling!");
                if self.node(w).color == Color::Red {
                    self.node_mut(w).color = Color::Black;
                    self.node_mut(p).color = Color::Red;
                    self.rotate_right(p);
                    w = self.node(p).left.expect("`RawRankTree::delete_fixup()` - rotation lost the sibling!");
                }
                let wl = self.node(w).left;
                let wr = self.node(w).right;
                if self.color_of(wl) == Color::Black && self.color_of(wr) == Color::Black {
                    self.node_mut(w).color = Color::Red;
                    x = Some(p);
                    xp = self.node(p).parent;
                } else {
                    if self.color_of(wl) == Color::Black {
                        self.set_color(wr, Color::Black);
                        self.node_mut(w).color = Color::Red;
                        self.rotate_left(w);
                        w = self.node(p).left.expect("`RawRankTree::delete_fixup()` - rotation lost the sibling!");
                    }
                    let p_color = self.node(p).color;
                    self.node_mut(w).color = p_color;
                    self.node_mut(p).color = Color::Black;
                    let wl = self.node(w).left;
                    self.set_color(wl, Color::Black);
                    self.rotate_right(p);
                    x = self.root;
                }
            }
        }
        self.set_color(x, Color::Black);
    }
}

// Structural self-check, test-only. An invariant violation here is a bug
// in the tree, not a recoverable condition.
#[cfg(test)]
impl<K, V, C> RawRankTree<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Compare<V>,
{
    pub(crate) fn validate_invariants(&self) {
        let mut errors = Vec::new();

        if self.color_of(self.root) == Color::Red {
            errors.push("root is red".to_string());
        }
        if let Some(root) = self.root {
            if self.node(root).parent.is_some() {
                errors.push("root has a parent".to_string());
            }
            self.validate_node(root, &mut errors);
        }
        if self.size_of(self.root) != self.index.len() {
            errors.push(format!(
                "root size {} != index len {}",
                self.size_of(self.root),
                self.index.len()
            ));
        }
        if self.entries.len() != self.index.len() {
            errors.push(format!(
                "entry arena len {} != index len {}",
                self.entries.len(),
                self.index.len()
            ));
        }
        for (key, &node_h) in &self.index {
            let head = self.node(node_h).head();
            let mut e = head;
            let mut found = false;
            loop {
                if &self.entries.get(e).key == key {
                    found = true;
                    break;
                }
                e = self.entries.get(e).next;
                if e == head {
                    break;
                }
            }
            if !found {
                errors.push("index maps a key to a node that does not hold it".to_string());
            }
        }

        assert!(errors.is_empty(), "tree invariants violated: {errors:?}");
    }

    /// Returns the black height of the subtree; pushes problems into
    /// `errors`.
    fn validate_node(&self, h: Handle, errors: &mut Vec<String>) -> usize {
        let node = self.node(h);

        // Ring consistency.
        if node.len == 0 || node.head.is_none() {
            errors.push("node with an empty ring is linked in the tree".to_string());
            return 0;
        }
        let head = node.head();
        let mut count = 0;
        let mut e = head;
        loop {
            let entry = self.entries.get(e);
            if self.entries.get(entry.next).prev != e {
                errors.push("ring links out of sync".to_string());
            }
            if self.cmp.compare(&entry.value, self.node_value(h)) != Ordering::Equal {
                errors.push("ring holds entries with unequal values".to_string());
            }
            count += 1;
            e = entry.next;
            if e == head {
                break;
            }
        }
        if count != node.len {
            errors.push(format!("ring length {count} != recorded len {}", node.len));
        }

        // BST order and parent links.
        for (child, side) in [(node.left, "left"), (node.right, "right")] {
            if let Some(c) = child {
                if self.node(c).parent != Some(h) {
                    errors.push(format!("{side} child has a stale parent link"));
                }
                let ord = self.cmp.compare(self.node_value(c), self.node_value(h));
                let expected = if side == "left" { Ordering::Less } else { Ordering::Greater };
                if ord != expected {
                    errors.push(format!("{side} child violates the BST order"));
                }
            }
        }

        // No red node has a red parent.
        if node.color == Color::Red && self.color_of(node.parent) == Color::Red {
            errors.push("red node has a red parent".to_string());
        }

        // Size augmentation.
        let expected_size = node.len + self.size_of(node.left) + self.size_of(node.right);
        if node.size != expected_size {
            errors.push(format!("node size {} != expected {expected_size}", node.size));
        }

        let left_bh = node.left.map_or(0, |c| self.validate_node(c, errors));
        let right_bh = node.right.map_or(0, |c| self.validate_node(c, errors));
        if left_bh != right_bh {
            errors.push(format!("black height mismatch: {left_bh} vs {right_bh}"));
        }
        left_bh + usize::from(node.color == Color::Black)
    }
}
