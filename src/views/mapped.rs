use core::marker::PhantomData;

use opaqueseq_internals::traits::{Cursor, RetreatUnsupported, View};

/// An adapter view applying a transformation to every element of an inner
/// view.
///
/// The transformation produces owned values, so a [`MappedCursor`] caches
/// the output for its current position and recomputes it whenever it
/// moves. The transformation is cloned into every cursor and should be a
/// cheap value; it may run more than once per position (for example when
/// a cursor is cloned), so it must be deterministic.
///
/// # Examples
///
/// ```
/// use opaqueseq::{OpaqueSequence, views::{Mapped, SharedSlice}};
///
/// let doubled = Mapped::new(SharedSlice::new(1..4), |value: &i32| value * 2);
/// let sequence = OpaqueSequence::<i32>::new(doubled);
/// assert_eq!(sequence.iter().collect::<Vec<_>>(), vec![2, 4, 6]);
/// ```
pub struct Mapped<V, F, U> {
    inner: V,
    transform: F,
    _output: PhantomData<fn() -> U>,
}

impl<V, F, U> Mapped<V, F, U>
where
    V: View,
    F: Fn(&V::Item) -> U + Clone + 'static,
    U: 'static,
{
    /// Wraps `inner`, yielding `transform` applied to each of its
    /// elements.
    #[must_use]
    pub fn new(inner: V, transform: F) -> Self {
        Self {
            inner,
            transform,
            _output: PhantomData,
        }
    }
}

impl<V, F, U> View for Mapped<V, F, U>
where
    V: View,
    F: Fn(&V::Item) -> U + Clone + 'static,
    U: 'static,
{
    type Item = U;
    type Cursor = MappedCursor<V, F, U>;

    fn begin(&self) -> MappedCursor<V, F, U> {
        let mut cursor = MappedCursor {
            inner: self.inner.begin(),
            transform: self.transform.clone(),
            current: None,
        };
        cursor.refresh();
        cursor
    }

    fn end(&self) -> MappedCursor<V, F, U> {
        // The inner end cursor has no element, so the cache stays empty.
        MappedCursor {
            inner: self.inner.end(),
            transform: self.transform.clone(),
            current: None,
        }
    }
}

/// Cursor for [`Mapped`]: the inner cursor, a copy of the transformation,
/// and the cached output for the current position.
pub struct MappedCursor<V: View, F, U> {
    inner: V::Cursor,
    transform: F,
    current: Option<U>,
}

impl<V, F, U> MappedCursor<V, F, U>
where
    V: View,
    F: Fn(&V::Item) -> U + Clone + 'static,
    U: 'static,
{
    /// Recomputes the cached output from the inner cursor's element.
    fn refresh(&mut self) {
        self.current = self.inner.item().map(|item| (self.transform)(item));
    }
}

impl<V, F, U> Clone for MappedCursor<V, F, U>
where
    V: View,
    F: Fn(&V::Item) -> U + Clone + 'static,
    U: 'static,
{
    fn clone(&self) -> Self {
        // Recompute rather than require `U: Clone`.
        let mut copy = Self {
            inner: self.inner.clone(),
            transform: self.transform.clone(),
            current: None,
        };
        copy.refresh();
        copy
    }
}

impl<V: View, F, U> PartialEq for MappedCursor<V, F, U> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<V, F, U> Cursor for MappedCursor<V, F, U>
where
    V: View,
    F: Fn(&V::Item) -> U + Clone + 'static,
    U: 'static,
{
    type Item = U;

    fn advance(&mut self) {
        self.inner.advance();
        self.refresh();
    }

    fn retreat(&mut self) -> Result<(), RetreatUnsupported> {
        self.inner.retreat()?;
        self.refresh();
        Ok(())
    }

    fn item(&self) -> Option<&U> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::{vec, vec::Vec};

    use super::*;
    use crate::views::SharedSlice;

    fn doubled() -> Mapped<SharedSlice<i32>, fn(&i32) -> i32, i32> {
        Mapped::new(SharedSlice::new(1..4), |value: &i32| value * 2)
    }

    #[test]
    fn test_transforms_each_element() {
        let view = doubled();
        let mut cursor = view.begin();
        let end = view.end();

        let mut seen = Vec::new();
        while cursor != end {
            seen.push(*cursor.item().unwrap());
            cursor.advance();
        }
        assert_eq!(seen, vec![2, 4, 6]);
    }

    #[test]
    fn test_changes_element_type() {
        let lengths = Mapped::new(SharedSlice::new(["a", "bb", "ccc"]), |s: &&str| s.len());
        assert_eq!(lengths.begin().item(), Some(&1));
    }

    #[test]
    fn test_retreat_recomputes() {
        let view = doubled();
        let mut cursor = view.begin();
        cursor.advance();
        assert_eq!(cursor.item(), Some(&4));

        cursor.retreat().unwrap();
        assert_eq!(cursor.item(), Some(&2));
    }

    #[test]
    fn test_clone_carries_position() {
        let view = doubled();
        let mut cursor = view.begin();
        cursor.advance();

        let copy = cursor.clone();
        assert_eq!(copy.item(), Some(&4));
        assert!(copy == cursor);
    }

    #[test]
    fn test_end_has_no_element() {
        let view = doubled();
        assert_eq!(view.end().item(), None);
    }
}
