use opaqueseq_internals::traits::{Cursor, RetreatUnsupported, View};

/// An adapter view yielding only the elements of an inner view that a
/// predicate accepts.
///
/// Filtering is lazy: the predicate runs while a cursor moves, never
/// ahead of it. A [`FilteredCursor`] always rests on an accepted element
/// or at the end position, so positions that the predicate rejects are
/// unobservable from the outside.
///
/// The predicate is cloned into every cursor, so it should be a cheap
/// value such as a capture-light closure or a function pointer.
///
/// # Examples
///
/// ```
/// use opaqueseq::{OpaqueSequence, views::{Filtered, SharedSlice}};
///
/// let evens = Filtered::new(SharedSlice::new(0..10), |value: &i32| value % 2 == 0);
/// let sequence = OpaqueSequence::<i32>::new(evens);
/// assert_eq!(sequence.iter().collect::<Vec<_>>(), vec![0, 2, 4, 6, 8]);
/// ```
pub struct Filtered<V, P> {
    inner: V,
    predicate: P,
}

impl<V, P> Filtered<V, P>
where
    V: View,
    P: Fn(&V::Item) -> bool + Clone + 'static,
{
    /// Wraps `inner`, keeping only elements for which `predicate` returns
    /// `true`.
    #[must_use]
    pub fn new(inner: V, predicate: P) -> Self {
        Self { inner, predicate }
    }
}

impl<V, P> View for Filtered<V, P>
where
    V: View,
    P: Fn(&V::Item) -> bool + Clone + 'static,
{
    type Item = V::Item;
    type Cursor = FilteredCursor<V, P>;

    fn begin(&self) -> FilteredCursor<V, P> {
        let mut cursor = FilteredCursor {
            inner: self.inner.begin(),
            predicate: self.predicate.clone(),
        };
        cursor.skip_rejected_forward();
        cursor
    }

    fn end(&self) -> FilteredCursor<V, P> {
        FilteredCursor {
            inner: self.inner.end(),
            predicate: self.predicate.clone(),
        }
    }
}

/// Cursor for [`Filtered`]: the inner cursor plus a copy of the
/// predicate.
///
/// Invariant: the inner cursor is always at the end position or on an
/// element the predicate accepts.
pub struct FilteredCursor<V: View, P> {
    inner: V::Cursor,
    predicate: P,
}

impl<V, P> FilteredCursor<V, P>
where
    V: View,
    P: Fn(&V::Item) -> bool + Clone + 'static,
{
    /// Whether the inner cursor rests on an accepted element.
    fn on_accepted(&self) -> bool {
        self.inner
            .item()
            .is_some_and(|item| (self.predicate)(item))
    }

    /// Whether the inner cursor is at a resting position per the struct
    /// invariant.
    fn at_rest(&self) -> bool {
        match self.inner.item() {
            Some(item) => (self.predicate)(item),
            None => true,
        }
    }

    /// Advances the inner cursor until it reaches a resting position.
    fn skip_rejected_forward(&mut self) {
        while !self.at_rest() {
            self.inner.advance();
        }
    }
}

impl<V, P> Clone for FilteredCursor<V, P>
where
    V: View,
    P: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

impl<V: View, P> core::fmt::Debug for FilteredCursor<V, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FilteredCursor").finish_non_exhaustive()
    }
}

impl<V: View, P> PartialEq for FilteredCursor<V, P> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<V, P> Cursor for FilteredCursor<V, P>
where
    V: View,
    P: Fn(&V::Item) -> bool + Clone + 'static,
{
    type Item = V::Item;

    fn advance(&mut self) {
        self.inner.advance();
        self.skip_rejected_forward();
    }

    fn retreat(&mut self) -> Result<(), RetreatUnsupported> {
        self.inner.retreat()?;
        while !self.on_accepted() {
            self.inner.retreat()?;
        }
        Ok(())
    }

    fn item(&self) -> Option<&V::Item> {
        self.inner.item()
    }
}

#[cfg(test)]
mod tests {
    use std::{vec, vec::Vec};

    use super::*;
    use crate::views::SharedSlice;

    fn evens() -> Filtered<SharedSlice<i32>, fn(&i32) -> bool> {
        Filtered::new(SharedSlice::new(0..10), |value: &i32| value % 2 == 0)
    }

    fn collect<V: View>(view: &V) -> Vec<V::Item>
    where
        V::Item: Clone,
    {
        let mut cursor = view.begin();
        let end = view.end();
        let mut seen = Vec::new();
        while cursor != end {
            seen.push(cursor.item().unwrap().clone());
            cursor.advance();
        }
        seen
    }

    #[test]
    fn test_keeps_only_accepted_elements() {
        assert_eq!(collect(&evens()), vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_begin_skips_leading_rejected() {
        let odds = Filtered::new(SharedSlice::new(0..10), |value: &i32| value % 2 == 1);
        assert_eq!(odds.begin().item(), Some(&1));
    }

    #[test]
    fn test_all_rejected_is_empty() {
        let none = Filtered::new(SharedSlice::new(0..10), |_: &i32| false);
        assert_eq!(none.begin(), none.end());
    }

    #[test]
    fn test_retreat_lands_on_previous_accepted() {
        let view = evens();
        let mut cursor = view.begin();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.item(), Some(&4));

        cursor.retreat().unwrap();
        assert_eq!(cursor.item(), Some(&2));
    }

    #[test]
    fn test_retreat_from_end() {
        let view = evens();
        let mut cursor = view.end();
        cursor.retreat().unwrap();
        assert_eq!(cursor.item(), Some(&8));
    }
}
