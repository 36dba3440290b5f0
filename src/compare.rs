use core::cmp::Ordering;

/// A total order over stored values, injected at map construction.
///
/// The map never inspects values directly; every ordering decision goes
/// through the comparator it was built with. [`NaturalOrder`] covers the
/// common case of a value type that is already [`Ord`]; any
/// `Fn(&V, &V) -> Ordering` closure works for everything else.
///
/// Two values for which the comparator returns [`Ordering::Equal`] share
/// one tree node and tie-break by arrival order.
pub trait Compare<V> {
    /// Compares two values under this order.
    fn compare(&self, a: &V, b: &V) -> Ordering;
}

/// The natural ordering of a value type that implements [`Ord`].
///
/// This is the default comparator of [`RankMap`](crate::RankMap); it is
/// zero-sized and adds no per-comparison overhead.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NaturalOrder;

impl<V: Ord> Compare<V> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &V, b: &V) -> Ordering {
        a.cmp(b)
    }
}

impl<V, F> Compare<V> for F
where
    F: Fn(&V, &V) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &V, b: &V) -> Ordering {
        self(a, b)
    }
}
