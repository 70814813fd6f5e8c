use opaqueseq_internals::traits::{Cursor, RetreatUnsupported, View};
use triomphe::Arc;

/// A bidirectional view over reference-counted contiguous storage.
///
/// The elements live in a single `Arc<[T]>` allocation shared by the view
/// and every cursor created from it, so cursors stay valid regardless of
/// how long they outlive the view or the sequence it was erased into. The
/// view itself is two words and always fits the inline buffer.
///
/// # Examples
///
/// ```
/// use opaqueseq::{OpaqueSequence, views::SharedSlice};
///
/// let sequence = OpaqueSequence::<&str>::new(SharedSlice::new("a b c".split(' ')));
/// let words: Vec<&str> = sequence.iter().collect();
/// assert_eq!(words, vec!["a", "b", "c"]);
/// ```
pub struct SharedSlice<T: 'static> {
    /// Shared storage; cursors hold their own handle to it.
    data: Arc<[T]>,
}

impl<T: 'static> SharedSlice<T> {
    /// Creates a view by collecting `items` into shared storage.
    ///
    /// This is the one point where the elements are materialized; all
    /// later traversal is allocation-free.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            data: items.into_iter().collect(),
        }
    }

    /// Returns the number of elements in the underlying storage.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the underlying storage holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: 'static> Clone for SharedSlice<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + 'static> From<&[T]> for SharedSlice<T> {
    fn from(slice: &[T]) -> Self {
        Self::new(slice.iter().cloned())
    }
}

impl<T: 'static> View for SharedSlice<T> {
    type Item = T;
    type Cursor = SharedSliceCursor<T>;

    fn begin(&self) -> SharedSliceCursor<T> {
        SharedSliceCursor {
            data: Arc::clone(&self.data),
            index: 0,
        }
    }

    fn end(&self) -> SharedSliceCursor<T> {
        SharedSliceCursor {
            data: Arc::clone(&self.data),
            index: self.data.len(),
        }
    }
}

/// Cursor for [`SharedSlice`]: a shared handle to the storage plus an
/// index into it.
pub struct SharedSliceCursor<T: 'static> {
    data: Arc<[T]>,
    index: usize,
}

impl<T: 'static> Clone for SharedSliceCursor<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            index: self.index,
        }
    }
}

impl<T: 'static> core::fmt::Debug for SharedSliceCursor<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedSliceCursor")
            .field("index", &self.index)
            .field("len", &self.data.len())
            .finish()
    }
}

impl<T: 'static> PartialEq for SharedSliceCursor<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data) && self.index == other.index
    }
}

impl<T: 'static> Cursor for SharedSliceCursor<T> {
    type Item = T;

    fn advance(&mut self) {
        debug_assert!(
            self.index < self.data.len(),
            "advanced a cursor past the end position"
        );
        self.index += 1;
    }

    fn retreat(&mut self) -> Result<(), RetreatUnsupported> {
        debug_assert!(self.index > 0, "retreated a cursor past the first position");
        self.index = self.index.wrapping_sub(1);
        Ok(())
    }

    fn item(&self) -> Option<&T> {
        self.data.get(self.index)
    }
}

#[cfg(test)]
mod tests {
    use std::{vec, vec::Vec};

    use super::*;

    #[test]
    fn test_begin_end_span_all_elements() {
        let view = SharedSlice::new([1, 2, 3]);
        let mut cursor = view.begin();
        let end = view.end();

        let mut seen = Vec::new();
        while cursor != end {
            seen.push(*cursor.item().unwrap());
            cursor.advance();
        }
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_cursors_share_storage() {
        let view = SharedSlice::new(0..4);
        // Cursors from the same view compare equal at equal positions even
        // though each holds its own handle.
        assert_eq!(view.begin(), view.begin());
        assert_ne!(view.begin(), view.end());
    }

    #[test]
    fn test_cursor_outlives_view() {
        let cursor = SharedSlice::new([7]).begin();
        assert_eq!(cursor.item(), Some(&7));
    }

    #[test]
    fn test_empty() {
        let view = SharedSlice::<i32>::new([]);
        assert!(view.is_empty());
        assert_eq!(view.begin(), view.end());
        assert_eq!(view.begin().item(), None);
    }

    #[test]
    fn test_retreat_round_trip() {
        let view = SharedSlice::new([1, 2, 3]);
        let mut cursor = view.begin();
        cursor.advance();
        cursor.advance();
        cursor.retreat().unwrap();
        assert_eq!(cursor.item(), Some(&2));
    }
}
