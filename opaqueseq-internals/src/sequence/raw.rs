//! Type-erased sequence container.
//!
//! This module encapsulates the fields of [`RawSequence`], ensuring they
//! are only visible within this module. As with
//! [`RawCursor`](crate::cursor::raw), the vtable and the installed value
//! are only ever created together and cannot be modified afterwards, which
//! is what makes every dispatch through the vtable sound.

use core::any::TypeId;

use crate::{
    cursor::RawCursor,
    sequence::vtable::SequenceVtable,
    slot::{DEFAULT_INLINE_LIMIT, Slot, StorageKind},
    traits::View,
};

/// An erased sequence: a value of some concrete [`View`] type `V` with
/// `V::Item = T`, though we do not know which actual `V` it is.
///
/// The view is installed by value at construction and never mutated
/// afterwards; its only operations are creating begin and end cursors.
/// Small view types (per [`Slot::fits`]) are stored inline in the
/// container itself; larger ones live in a single heap allocation.
///
/// The container is move-only and deliberately not `Clone`: an erased
/// value cannot be duplicated without knowing its concrete type, and
/// unlike cursors, sequences have no duplication capability.
///
/// # Type Parameters
///
/// - `T`: the element type, which is *not* erased.
/// - `N`: the inline buffer size in bytes, defaulting to
///   [`DEFAULT_INLINE_LIMIT`].
pub struct RawSequence<T: 'static, const N: usize = DEFAULT_INLINE_LIMIT> {
    /// Dispatch table created for the installed view type.
    ///
    /// # Safety
    ///
    /// Always the vtable instantiated for the exact concrete type
    /// installed in `slot`; paired at construction and never replaced.
    vtable: &'static SequenceVtable<T, N>,
    /// Storage holding the installed view value.
    slot: Slot<N>,
}

impl<T: 'static, const N: usize> RawSequence<T, N> {
    /// Creates a new [`RawSequence`] by installing `view`, selecting
    /// inline or heap storage from the layout of `V`.
    ///
    /// This is the only point where the concrete view type and the element
    /// type meet, so the element type contract (`V::Item = T`) is enforced
    /// statically here rather than checked at run time behind the erasure
    /// boundary.
    #[inline]
    pub fn new<V: View<Item = T>>(view: V) -> Self {
        Self {
            vtable: SequenceVtable::new::<V>(),
            slot: Slot::install(view),
        }
    }

    /// Returns whether a view of type `V` would be stored inline by this
    /// container, without allocating.
    #[must_use]
    pub const fn stores_inline<V: View<Item = T>>() -> bool {
        Slot::<N>::fits::<V>()
    }

    /// Returns whether this sequence's view is stored inline.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.slot.kind() == StorageKind::Inline
    }

    /// Returns the [`TypeId`] of the installed concrete view type.
    #[inline]
    #[must_use]
    pub fn view_type_id(&self) -> TypeId {
        self.vtable.type_id()
    }

    /// Returns the [`core::any::type_name`] of the installed concrete view
    /// type.
    #[inline]
    #[must_use]
    pub fn view_type_name(&self) -> &'static str {
        self.vtable.type_name()
    }

    /// Creates an erased cursor positioned at the first element.
    #[inline]
    #[must_use]
    pub fn begin(&self) -> RawCursor<T, N> {
        let ptr = self.slot.value_ptr();
        // SAFETY:
        // 1. The vtable matches the installed view type (invariant of this
        //    struct).
        unsafe { self.vtable.begin(ptr) }
    }

    /// Creates an erased cursor positioned one past the last element.
    #[inline]
    #[must_use]
    pub fn end(&self) -> RawCursor<T, N> {
        let ptr = self.slot.value_ptr();
        // SAFETY:
        // 1. The vtable matches the installed view type (invariant of this
        //    struct).
        unsafe { self.vtable.end(ptr) }
    }
}

impl<T: 'static, const N: usize> core::ops::Drop for RawSequence<T, N> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY:
        // 1. The vtable matches the installed view type (invariant of this
        //    struct).
        // 2. We are in `drop`, so the value has not been dropped before
        //    and cannot be used afterwards.
        unsafe {
            self.vtable.drop_installed(&mut self.slot);
        }
    }
}

impl<T: 'static, const N: usize> core::fmt::Debug for RawSequence<T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawSequence")
            .field("view_type", &self.view_type_name())
            .field("inline", &self.is_inline())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Cursor, RetreatUnsupported};

    struct Counting {
        len: u32,
    }

    #[derive(Clone, PartialEq)]
    struct CountingCursor {
        position: u32,
        len: u32,
    }

    impl Cursor for CountingCursor {
        type Item = u32;

        fn advance(&mut self) {
            self.position += 1;
        }

        fn retreat(&mut self) -> Result<(), RetreatUnsupported> {
            self.position -= 1;
            Ok(())
        }

        fn item(&self) -> Option<&u32> {
            (self.position < self.len).then_some(&self.position)
        }
    }

    impl View for Counting {
        type Item = u32;
        type Cursor = CountingCursor;

        fn begin(&self) -> CountingCursor {
            CountingCursor {
                position: 0,
                len: self.len,
            }
        }

        fn end(&self) -> CountingCursor {
            CountingCursor {
                position: self.len,
                len: self.len,
            }
        }
    }

    #[test]
    fn test_begin_to_end_iteration() {
        let sequence = RawSequence::<u32>::new(Counting { len: 4 });
        let mut cursor = sequence.begin();
        let end = sequence.end();

        let mut collected = alloc::vec::Vec::new();
        while !cursor.eq(&end) {
            collected.push(*cursor.item().unwrap());
            cursor.advance();
        }
        assert_eq!(collected, [0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_sequence() {
        let sequence = RawSequence::<u32>::new(Counting { len: 0 });
        assert!(sequence.begin().eq(&sequence.end()));
        assert_eq!(sequence.begin().item(), None);
    }

    #[test]
    fn test_small_view_is_inline() {
        assert!(RawSequence::<u32>::stores_inline::<Counting>());
        let sequence = RawSequence::<u32>::new(Counting { len: 4 });
        assert!(sequence.is_inline());
    }

    #[test]
    fn test_type_identity() {
        let sequence = RawSequence::<u32>::new(Counting { len: 4 });
        assert_eq!(sequence.view_type_id(), TypeId::of::<Counting>());
        assert!(sequence.view_type_name().contains("Counting"));
    }

    #[test]
    fn test_raw_sequence_size() {
        // One vtable pointer plus the slot; the slot is the inline buffer
        // plus its discriminant, rounded up to the buffer alignment.
        assert!(size_of::<RawSequence<u32>>() <= size_of::<usize>() + DEFAULT_INLINE_LIMIT + 16);
    }

    #[test]
    fn test_send_sync() {
        static_assertions::assert_not_impl_any!(RawSequence<u32>: Send, Sync);
    }
}
