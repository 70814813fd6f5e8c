//! Vtable for type-erased sequence operations.
//!
//! This module contains the [`SequenceVtable`], which enables creating
//! begin and end cursors from a view whose concrete type `V` has been
//! erased. It is the sequence-side counterpart of
//! [`CursorVtable`](crate::cursor::vtable::CursorVtable) and follows the
//! same encapsulation rules: fields are module-private so the vtable can
//! never be separated from the value it was created for.

use core::{any::TypeId, ptr::NonNull};

use crate::{
    cursor::RawCursor,
    slot::{self, Slot, StorageKind},
    traits::View,
    util::Erased,
};

/// Vtable for type-erased sequence operations.
///
/// Contains function pointers for creating cursors from a view without
/// knowing its concrete type at compile time.
///
/// # Safety Invariant
///
/// All function pointer fields are guaranteed to point to the functions
/// defined below, instantiated with the view type `V` that was used to
/// create this [`SequenceVtable`].
pub(crate) struct SequenceVtable<T: 'static, const N: usize> {
    /// Gets the [`TypeId`] of the view type that was used to create this
    /// [`SequenceVtable`].
    type_id: fn() -> TypeId,
    /// Gets the [`core::any::type_name`] of the view type that was used to
    /// create this [`SequenceVtable`].
    type_name: fn() -> &'static str,
    /// Drops a view stored inline in a [`Slot`] buffer.
    drop_inline: unsafe fn(NonNull<Erased>),
    /// Drops a heap-stored view by reconstructing its `Box`.
    drop_heap: unsafe fn(NonNull<Erased>),
    /// Creates an erased cursor at the first element of the view.
    begin: unsafe fn(NonNull<Erased>) -> RawCursor<T, N>,
    /// Creates an erased cursor one past the last element of the view.
    end: unsafe fn(NonNull<Erased>) -> RawCursor<T, N>,
}

impl<T: 'static, const N: usize> SequenceVtable<T, N> {
    /// Creates a new [`SequenceVtable`] for the view type `V`.
    pub(super) const fn new<V: View<Item = T>>() -> &'static Self {
        const {
            &Self {
                type_id: TypeId::of::<V>,
                type_name: core::any::type_name::<V>,
                drop_inline: slot::drop_inline::<V>,
                drop_heap: slot::drop_heap::<V>,
                begin: begin::<V, N>,
                end: end::<V, N>,
            }
        }
    }

    /// Gets the [`TypeId`] of the view type that was used to create this
    /// [`SequenceVtable`].
    #[inline]
    pub(super) fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Gets the [`core::any::type_name`] of the view type that was used to
    /// create this [`SequenceVtable`].
    #[inline]
    pub(super) fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Drops the value installed in `slot`, dispatching on its storage
    /// case.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`SequenceVtable`] is the vtable for the view type
    ///    installed in `slot`.
    /// 2. The installed value has not previously been dropped and is not
    ///    used after this call.
    #[inline]
    pub(super) unsafe fn drop_installed(&self, slot: &mut Slot<N>) {
        let ptr = slot.value_ptr_mut();
        match slot.kind() {
            // SAFETY: The storage case matches and the vtable entry was
            // instantiated for the installed type, as guaranteed by the
            // caller; requirements 1 and 2 carry over directly.
            StorageKind::Inline => unsafe {
                (self.drop_inline)(ptr);
            },
            // SAFETY: As above; the pointer came from `Box::into_raw` for
            // the installed type because the slot selected heap storage at
            // installation.
            StorageKind::Heap => unsafe {
                (self.drop_heap)(ptr);
            },
        }
    }

    /// Creates a begin cursor using the [`View::begin`] of the type used
    /// when creating this [`SequenceVtable`].
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`SequenceVtable`] is the vtable for the view stored behind
    ///    `ptr`.
    #[inline]
    pub(super) unsafe fn begin(&self, ptr: NonNull<Erased>) -> RawCursor<T, N> {
        // SAFETY: `self.begin` points to `begin::<V, N>` below for the
        // stored type; its requirement is guaranteed by the caller.
        unsafe { (self.begin)(ptr) }
    }

    /// Creates an end cursor using the [`View::end`] of the type used when
    /// creating this [`SequenceVtable`].
    ///
    /// # Safety
    ///
    /// Same requirement as [`SequenceVtable::begin`].
    #[inline]
    pub(super) unsafe fn end(&self, ptr: NonNull<Erased>) -> RawCursor<T, N> {
        // SAFETY: `self.end` points to `end::<V, N>` below for the stored
        // type; its requirement is guaranteed by the caller.
        unsafe { (self.end)(ptr) }
    }
}

/// Creates an erased begin cursor from the view of type `V` behind `ptr`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` points to an initialized view of type `V`.
unsafe fn begin<V: View, const N: usize>(ptr: NonNull<Erased>) -> RawCursor<V::Item, N> {
    // SAFETY: The pointer has the correct type, as guaranteed by the
    // caller; `View::begin` only needs shared access.
    let view: &V = unsafe { ptr.cast::<V>().as_ref() };
    RawCursor::new(view.begin())
}

/// Creates an erased end cursor from the view of type `V` behind `ptr`.
///
/// # Safety
///
/// Same requirement as [`begin`].
unsafe fn end<V: View, const N: usize>(ptr: NonNull<Erased>) -> RawCursor<V::Item, N> {
    // SAFETY: The pointer has the correct type, as guaranteed by the
    // caller; `View::end` only needs shared access.
    let view: &V = unsafe { ptr.cast::<V>().as_ref() };
    RawCursor::new(view.end())
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
    fn test_sequence_vtable_identity() {
        let vtable1 = SequenceVtable::<u32, 48>::new::<Counting>();
        let vtable2 = SequenceVtable::<u32, 48>::new::<Counting>();
        assert!(core::ptr::eq(vtable1, vtable2));
    }

    #[test]
    fn test_sequence_vtable_type_id() {
        let vtable = SequenceVtable::<u32, 48>::new::<Counting>();
        assert_eq!(vtable.type_id(), TypeId::of::<Counting>());
        assert!(vtable.type_name().contains("Counting"));
    }
}
