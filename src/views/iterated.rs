use opaqueseq_internals::traits::{Cursor, RetreatUnsupported, View};

/// A forward-only view adapting a cloneable std [`Iterator`].
///
/// Each [`IteratedCursor`] clones the iterator and pulls from its own
/// copy, so cursors stay independent; the iterator must therefore be
/// restartable by cloning (ranges, slice iterators, and most adapter
/// chains are). Backward movement is impossible for a plain iterator, so
/// [`IteratedCursor::retreat`] always fails with [`RetreatUnsupported`]
/// without moving the cursor.
///
/// # Examples
///
/// ```
/// use opaqueseq::{OpaqueSequence, views::Iterated};
///
/// let squares = Iterated::new((1..5).map(|value| value * value));
/// let sequence = OpaqueSequence::<i32>::new(squares);
/// assert_eq!(sequence.iter().collect::<Vec<_>>(), vec![1, 4, 9, 16]);
///
/// let mut cursor = sequence.begin();
/// cursor.advance();
/// assert!(cursor.retreat().is_err());
/// // The failed retreat did not move the cursor.
/// assert_eq!(cursor.get(), Some(&4));
/// ```
pub struct Iterated<I> {
    iter: I,
}

impl<I> Iterated<I>
where
    I: Iterator + Clone + 'static,
    I::Item: Clone + 'static,
{
    /// Wraps `iter` as a forward-only view.
    #[must_use]
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I> View for Iterated<I>
where
    I: Iterator + Clone + 'static,
    I::Item: Clone + 'static,
{
    type Item = I::Item;
    type Cursor = IteratedCursor<I>;

    fn begin(&self) -> IteratedCursor<I> {
        let mut iter = self.iter.clone();
        let current = iter.next();
        IteratedCursor {
            iter,
            current,
            position: 0,
        }
    }

    fn end(&self) -> IteratedCursor<I> {
        // The end cursor never pulls from the iterator; it exists only to
        // compare equal to an exhausted cursor.
        IteratedCursor {
            iter: self.iter.clone(),
            current: None,
            position: usize::MAX,
        }
    }
}

/// Cursor for [`Iterated`]: its own copy of the iterator, the element it
/// currently rests on, and how many elements have been pulled before it.
///
/// A cursor with no current element is exhausted; all exhausted cursors
/// of the same view compare equal, which is what makes the end cursor
/// work as the termination marker.
pub struct IteratedCursor<I: Iterator> {
    iter: I,
    current: Option<I::Item>,
    position: usize,
}

impl<I> Clone for IteratedCursor<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
            current: self.current.clone(),
            position: self.position,
        }
    }
}

impl<I: Iterator> PartialEq for IteratedCursor<I> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.current, &other.current) {
            (None, None) => true,
            (Some(_), Some(_)) => self.position == other.position,
            _ => false,
        }
    }
}

impl<I> Cursor for IteratedCursor<I>
where
    I: Iterator + Clone + 'static,
    I::Item: Clone + 'static,
{
    type Item = I::Item;

    fn advance(&mut self) {
        self.current = self.iter.next();
        self.position += 1;
    }

    fn retreat(&mut self) -> Result<(), RetreatUnsupported> {
        Err(RetreatUnsupported::new::<Self>())
    }

    fn item(&self) -> Option<&I::Item> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::{vec, vec::Vec};

    use super::*;

    #[test]
    fn test_yields_iterator_elements_in_order() {
        let view = Iterated::new(0..4);
        let mut cursor = view.begin();
        let end = view.end();

        let mut seen = Vec::new();
        while cursor != end {
            seen.push(*cursor.item().unwrap());
            cursor.advance();
        }
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_cursors_pull_independently() {
        let view = Iterated::new(0..4);
        let mut first = view.begin();
        let second = view.begin();

        first.advance();
        assert_eq!(first.item(), Some(&1));
        assert_eq!(second.item(), Some(&0));
    }

    #[test]
    fn test_retreat_fails_without_moving() {
        let view = Iterated::new(0..4);
        let mut cursor = view.begin();
        cursor.advance();

        let err = cursor.retreat().unwrap_err();
        assert!(err.cursor_type_name().contains("IteratedCursor"));
        assert_eq!(cursor.item(), Some(&1));
    }

    #[test]
    fn test_exhausted_cursor_equals_end() {
        let view = Iterated::new(0..2);
        let mut cursor = view.begin();
        cursor.advance();
        cursor.advance();

        assert_eq!(cursor.item(), None);
        assert!(cursor == view.end());
    }

    #[test]
    fn test_empty_iterator() {
        let view = Iterated::new(0..0);
        assert!(view.begin() == view.end());
    }
}
