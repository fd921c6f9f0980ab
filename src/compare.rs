use core::cmp::Ordering;

/// A total order over values of type `T`.
///
/// Values which compare [`Ordering::Equal`] are treated as duplicates by [`RbTree`]; they are all
/// kept, and a later duplicate is placed after every earlier one in order.
///
/// [`RbTree`]: crate::RbTree
pub trait Compare<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders values by their [`Ord`] implementation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
