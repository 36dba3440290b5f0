use super::handle::Handle;

/// Red-black node color. Detached (nil) positions count as black.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// One tree node: a distinct value class plus its ring of equal entries.
///
/// The node itself stores no key or value; those live in the entry arena,
/// and the node's `head` points at the oldest entry of its ring. The BST
/// order over nodes is the order of their (shared) entry value.
///
/// Augmentation invariant: `size = len + size(left) + size(right)`.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) color: Color,
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    /// Total entry count of the subtree rooted here.
    pub(crate) size: usize,
    /// Head of the circular entry ring (the oldest entry).
    ///
    /// `None` only transiently, between detaching a node's last entry and
    /// unlinking the node from the tree.
    pub(crate) head: Option<Handle>,
    /// Number of entries in this node's ring.
    pub(crate) len: usize,
}

impl Node {
    /// Creates a red node holding a single entry, ready to be linked under
    /// `parent`.
    pub(crate) fn new(parent: Option<Handle>, head: Handle) -> Self {
        Self {
            color: Color::Red,
            parent,
            left: None,
            right: None,
            size: 1,
            head: Some(head),
            len: 1,
        }
    }

    /// Head of the entry ring; callers must not ask on an emptied node.
    #[inline]
    pub(crate) fn head(&self) -> Handle {
        self.head.expect("`Node::head()` - node has no entries!")
    }
}
