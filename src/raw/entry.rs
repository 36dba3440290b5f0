use super::handle::Handle;

/// One stored key/value pair, threaded into its node's circular ring.
///
/// Entries that compare equal under the map's order share a single tree
/// node and form a circular doubly-linked list of entry handles, oldest
/// entry at the head. The ring order is the tie-break for rank among
/// equal values. A freshly allocated entry links to itself until the tree
/// splices it into a ring.
#[derive(Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// Previous entry in the ring; the head's `prev` is the newest entry.
    pub(crate) prev: Handle,
    /// Next entry in the ring; the newest entry's `next` is the head.
    pub(crate) next: Handle,
}

impl<K, V> Entry<K, V> {
    /// Creates a detached entry whose ring links point at `this`, its own
    /// future handle.
    pub(crate) fn new(this: Handle, key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: this,
            next: this,
        }
    }
}
