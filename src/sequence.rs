use opaqueseq_internals::{DEFAULT_INLINE_LIMIT, RawSequence, traits::View};

use crate::{cursor::OpaqueCursor, iter::Iter};

/// A sequence whose concrete view type has been erased.
///
/// An [`OpaqueSequence`] is the public face of the erasure machinery: it
/// owns exactly one erased [`View`] and exposes a uniform bidirectional
/// iteration surface over it. The element type `T` is the only type
/// information that crosses the erasure boundary, and it is checked
/// statically at construction (`V: View<Item = T>`).
///
/// The sequence is move-only. Cursors created from it are independent
/// values; see [`OpaqueCursor`].
///
/// # Examples
///
/// ```
/// use opaqueseq::{OpaqueSequence, views::SharedSlice};
///
/// let sequence = OpaqueSequence::<i32>::new(SharedSlice::new([10, 20, 30]));
/// let collected: Vec<i32> = sequence.iter().collect();
/// assert_eq!(collected, vec![10, 20, 30]);
/// ```
pub struct OpaqueSequence<T: 'static, const N: usize = DEFAULT_INLINE_LIMIT> {
    /// The erased view container.
    raw: RawSequence<T, N>,
}

impl<T: 'static, const N: usize> OpaqueSequence<T, N> {
    /// Creates a sequence by erasing `view`.
    ///
    /// The view is moved into the sequence; it should be a cheap
    /// description of how to range over data (shared handles, generator
    /// state), not the exclusive owner of the data itself. Views no
    /// larger than `N` bytes are stored without heap allocation.
    #[must_use]
    pub fn new<V: View<Item = T>>(view: V) -> Self {
        Self {
            raw: RawSequence::new(view),
        }
    }

    /// Returns a cursor positioned at the first element.
    #[must_use]
    pub fn begin(&self) -> OpaqueCursor<T, N> {
        OpaqueCursor::from_raw(self.raw.begin())
    }

    /// Returns a cursor positioned one past the last element.
    ///
    /// Equality with this cursor is the sole termination test for an
    /// iteration.
    #[must_use]
    pub fn end(&self) -> OpaqueCursor<T, N> {
        OpaqueCursor::from_raw(self.raw.end())
    }

    /// Returns `true` if the sequence yields no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.begin() == self.end()
    }

    /// Returns a std iterator over cloned elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use opaqueseq::{OpaqueSequence, views::SharedSlice};
    ///
    /// let sequence = OpaqueSequence::<i32>::new(SharedSlice::new(0..4));
    /// assert_eq!(sequence.iter().sum::<i32>(), 6);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter::new(self.begin(), self.end())
    }

    /// Returns the [`core::any::type_name`] of the erased view type, for
    /// diagnostics.
    #[must_use]
    pub fn view_type_name(&self) -> &'static str {
        self.raw.view_type_name()
    }
}

impl<T: 'static, const N: usize> core::fmt::Debug for OpaqueSequence<T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OpaqueSequence")
            .field("view_type", &self.view_type_name())
            .finish()
    }
}

impl<'a, T: Clone + 'static, const N: usize> IntoIterator for &'a OpaqueSequence<T, N> {
    type Item = T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Iter<'a, T, N> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::{vec, vec::Vec};

    use super::*;
    use crate::views::SharedSlice;

    #[test]
    fn test_iteration_yields_all_elements() {
        let sequence = OpaqueSequence::<i32>::new(SharedSlice::new(0..4));
        assert_eq!(sequence.iter().collect::<Vec<i32>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_is_empty() {
        assert!(OpaqueSequence::<i32>::new(SharedSlice::<i32>::new([])).is_empty());
        assert!(!OpaqueSequence::<i32>::new(SharedSlice::new([1])).is_empty());
    }

    #[test]
    fn test_debug_names_the_view() {
        let sequence = OpaqueSequence::<i32>::new(SharedSlice::new([1, 2]));
        let rendered = std::format!("{sequence:?}");
        assert!(rendered.contains("OpaqueSequence"));
        assert!(rendered.contains("SharedSlice"));
    }

    #[test]
    fn test_send_sync() {
        // Erased containers hide whether the installed type is thread-safe,
        // so the wrappers must not promise either marker.
        static_assertions::assert_not_impl_any!(OpaqueSequence<i32>: Send, Sync);
        static_assertions::assert_not_impl_any!(crate::OpaqueCursor<i32>: Send, Sync);
    }
}
