use core::{iter::FusedIterator, marker::PhantomData};

use opaqueseq_internals::DEFAULT_INLINE_LIMIT;

use crate::{cursor::OpaqueCursor, sequence::OpaqueSequence};

/// A std iterator over the elements of an
/// [`OpaqueSequence`](crate::OpaqueSequence), yielding clones.
///
/// Created by [`OpaqueSequence::iter`](crate::OpaqueSequence::iter). The
/// iterator holds two erased cursors, one walking forward and one marking
/// the end, and stops as soon as they compare equal. The borrow on the
/// sequence keeps it alive for the duration of the iteration.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'static, const N: usize = DEFAULT_INLINE_LIMIT> {
    /// The current position; advanced after each yielded element.
    cursor: OpaqueCursor<T, N>,
    /// The end position, used only for the termination comparison.
    end: OpaqueCursor<T, N>,
    /// Ties the iterator to the sequence the cursors came from.
    _sequence: PhantomData<&'a OpaqueSequence<T, N>>,
}

impl<T: 'static, const N: usize> Iter<'_, T, N> {
    pub(crate) fn new(cursor: OpaqueCursor<T, N>, end: OpaqueCursor<T, N>) -> Self {
        Self {
            cursor,
            end,
            _sequence: PhantomData,
        }
    }
}

impl<T: Clone + 'static, const N: usize> Iterator for Iter<'_, T, N> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.cursor == self.end {
            return None;
        }
        let item = self.cursor.get().cloned()?;
        self.cursor.advance();
        Some(item)
    }
}

impl<T: Clone + 'static, const N: usize> FusedIterator for Iter<'_, T, N> {}
