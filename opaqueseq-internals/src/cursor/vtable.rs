//! Vtable for type-erased cursor operations.
//!
//! This module contains the [`CursorVtable`], which enables calling
//! [`Cursor`] methods on a value whose concrete cursor type `C` has been
//! erased. The vtable stores function pointers that dispatch to the
//! correct typed implementations.
//!
//! This module encapsulates the fields of [`CursorVtable`] so they cannot
//! be accessed directly. This visibility restriction guarantees the safety
//! invariant: **the vtable's function pointers must match the actual
//! cursor type stored in the paired [`Slot`]**.
//!
//! # Safety Invariant
//!
//! This invariant is maintained because vtables are created as `&'static`
//! references via [`CursorVtable::new`], which pairs the function pointers
//! with a specific type `C` at compile time, and because [`RawCursor`]
//! only ever creates a vtable together with the value it describes.
//!
//! [`RawCursor`]: super::raw::RawCursor

use core::{any::TypeId, ptr::NonNull};

use crate::{
    cursor::raw::RawCursor,
    slot::{self, Slot, StorageKind},
    traits::{Cursor, RetreatUnsupported},
    util::Erased,
};

/// Vtable for type-erased cursor operations.
///
/// Contains function pointers for performing operations on a cursor
/// without knowing its concrete type at compile time. `T` is the element
/// type, which is *not* erased; `N` is the inline buffer size of the slots
/// the cursor ops produce and consume.
///
/// # Safety Invariant
///
/// All function pointer fields are guaranteed to point to the functions
/// defined below, instantiated with the cursor type `C` that was used to
/// create this [`CursorVtable`].
pub(crate) struct CursorVtable<T: 'static, const N: usize> {
    /// Gets the [`TypeId`] of the cursor type that was used to create this
    /// [`CursorVtable`].
    type_id: fn() -> TypeId,
    /// Gets the [`core::any::type_name`] of the cursor type that was used
    /// to create this [`CursorVtable`].
    type_name: fn() -> &'static str,
    /// Drops a cursor stored inline in a [`Slot`] buffer.
    drop_inline: unsafe fn(NonNull<Erased>),
    /// Drops a heap-stored cursor by reconstructing its `Box`.
    drop_heap: unsafe fn(NonNull<Erased>),
    /// Moves the cursor forward by one element.
    advance: unsafe fn(NonNull<Erased>),
    /// Moves the cursor backward by one element, if the concrete type
    /// supports it.
    retreat: unsafe fn(NonNull<Erased>) -> Result<(), RetreatUnsupported>,
    /// Clones the cursor into a fresh erased container.
    duplicate: unsafe fn(NonNull<Erased>) -> RawCursor<T, N>,
    /// Returns the address of the currently referenced element, or `None`
    /// at the end position.
    item: unsafe fn(NonNull<Erased>) -> Option<NonNull<T>>,
    /// Compares two cursors of the same concrete type for position
    /// equality.
    eq: unsafe fn(NonNull<Erased>, NonNull<Erased>) -> bool,
}

impl<T: 'static, const N: usize> CursorVtable<T, N> {
    /// Creates a new [`CursorVtable`] for the cursor type `C`.
    pub(super) const fn new<C: Cursor<Item = T>>() -> &'static Self {
        const {
            &Self {
                type_id: TypeId::of::<C>,
                type_name: core::any::type_name::<C>,
                drop_inline: slot::drop_inline::<C>,
                drop_heap: slot::drop_heap::<C>,
                advance: advance::<C>,
                retreat: retreat::<C>,
                duplicate: duplicate::<C, N>,
                item: item::<C>,
                eq: eq::<C>,
            }
        }
    }

    /// Gets the [`TypeId`] of the cursor type that was used to create this
    /// [`CursorVtable`].
    #[inline]
    pub(super) fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Gets the [`core::any::type_name`] of the cursor type that was used
    /// to create this [`CursorVtable`].
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
    /// 1. This [`CursorVtable`] is the vtable for the cursor type installed
    ///    in `slot`.
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

    /// Moves the cursor forward using the [`Cursor::advance`] of the type
    /// used when creating this [`CursorVtable`].
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`CursorVtable`] is the vtable for the cursor stored behind
    ///    `ptr`.
    /// 2. The caller has exclusive access to the cursor for the duration
    ///    of the call.
    #[inline]
    pub(super) unsafe fn advance(&self, ptr: NonNull<Erased>) {
        // SAFETY: `self.advance` points to `advance::<C>` below for the
        // stored type; its requirements are guaranteed by the caller.
        unsafe {
            (self.advance)(ptr);
        }
    }

    /// Moves the cursor backward using the [`Cursor::retreat`] of the type
    /// used when creating this [`CursorVtable`].
    ///
    /// # Safety
    ///
    /// Same requirements as [`CursorVtable::advance`].
    #[inline]
    pub(super) unsafe fn retreat(&self, ptr: NonNull<Erased>) -> Result<(), RetreatUnsupported> {
        // SAFETY: `self.retreat` points to `retreat::<C>` below for the
        // stored type; its requirements are guaranteed by the caller.
        unsafe { (self.retreat)(ptr) }
    }

    /// Clones the cursor into a fresh [`RawCursor`] using the
    /// [`Cursor::clone`] of the type used when creating this
    /// [`CursorVtable`].
    ///
    /// [`Cursor::clone`]: Clone::clone
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`CursorVtable`] is the vtable for the cursor stored behind
    ///    `ptr`.
    #[inline]
    pub(super) unsafe fn duplicate(&self, ptr: NonNull<Erased>) -> RawCursor<T, N> {
        // SAFETY: `self.duplicate` points to `duplicate::<C, N>` below for
        // the stored type; its requirement is guaranteed by the caller.
        unsafe { (self.duplicate)(ptr) }
    }

    /// Returns the address of the currently referenced element using the
    /// [`Cursor::item`] of the type used when creating this
    /// [`CursorVtable`].
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`CursorVtable`] is the vtable for the cursor stored behind
    ///    `ptr`.
    ///
    /// The returned address is valid only as long as the cursor is neither
    /// moved nor mutated.
    #[inline]
    pub(super) unsafe fn item(&self, ptr: NonNull<Erased>) -> Option<NonNull<T>> {
        // SAFETY: `self.item` points to `item::<C>` below for the stored
        // type; its requirement is guaranteed by the caller.
        unsafe { (self.item)(ptr) }
    }

    /// Compares two cursors for position equality using the
    /// [`PartialEq`] of the type used when creating this [`CursorVtable`].
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`CursorVtable`] is the vtable for **both** cursors, i.e.
    ///    both store the same concrete cursor type.
    #[inline]
    pub(super) unsafe fn eq(&self, lhs: NonNull<Erased>, rhs: NonNull<Erased>) -> bool {
        // SAFETY: `self.eq` points to `eq::<C>` below for the stored type
        // of both operands, as guaranteed by the caller.
        unsafe { (self.eq)(lhs, rhs) }
    }
}

/// Moves the cursor of type `C` behind `ptr` forward by one element.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` points to an initialized cursor of type `C`.
/// 2. The caller has exclusive access to the cursor for the duration of
///    the call.
unsafe fn advance<C: Cursor>(ptr: NonNull<Erased>) {
    // SAFETY: The pointer has the correct type and we have exclusive
    // access, both guaranteed by the caller.
    let cursor: &mut C = unsafe { ptr.cast::<C>().as_mut() };
    cursor.advance();
}

/// Moves the cursor of type `C` behind `ptr` backward by one element, if
/// `C` supports backward iteration.
///
/// # Safety
///
/// Same requirements as [`advance`].
unsafe fn retreat<C: Cursor>(ptr: NonNull<Erased>) -> Result<(), RetreatUnsupported> {
    // SAFETY: The pointer has the correct type and we have exclusive
    // access, both guaranteed by the caller.
    let cursor: &mut C = unsafe { ptr.cast::<C>().as_mut() };
    cursor.retreat()
}

/// Clones the cursor of type `C` behind `ptr` into a fresh [`RawCursor`].
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` points to an initialized cursor of type `C`.
unsafe fn duplicate<C: Cursor, const N: usize>(ptr: NonNull<Erased>) -> RawCursor<C::Item, N> {
    // SAFETY: The pointer has the correct type, as guaranteed by the
    // caller; shared access suffices for cloning.
    let cursor: &C = unsafe { ptr.cast::<C>().as_ref() };
    RawCursor::new(cursor.clone())
}

/// Returns the address of the element referenced by the cursor of type `C`
/// behind `ptr`, or `None` at the end position.
///
/// # Safety
///
/// Same requirement as [`duplicate`].
unsafe fn item<C: Cursor>(ptr: NonNull<Erased>) -> Option<NonNull<C::Item>> {
    // SAFETY: The pointer has the correct type, as guaranteed by the
    // caller.
    let cursor: &C = unsafe { ptr.cast::<C>().as_ref() };
    cursor.item().map(NonNull::from)
}

/// Compares two cursors of type `C` for position equality.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. Both `lhs` and `rhs` point to initialized cursors of type `C`.
unsafe fn eq<C: Cursor>(lhs: NonNull<Erased>, rhs: NonNull<Erased>) -> bool {
    // SAFETY: The pointer has the correct type, as guaranteed by the
    // caller.
    let lhs: &C = unsafe { lhs.cast::<C>().as_ref() };
    // SAFETY: As above.
    let rhs: &C = unsafe { rhs.cast::<C>().as_ref() };
    lhs == rhs
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_cursor_vtable_identity() {
        let vtable1 = CursorVtable::<u32, 48>::new::<CountingCursor>();
        let vtable2 = CursorVtable::<u32, 48>::new::<CountingCursor>();

        // Both should be the exact same static instance
        assert!(core::ptr::eq(vtable1, vtable2));
    }

    #[test]
    fn test_cursor_vtable_type_id() {
        let vtable = CursorVtable::<u32, 48>::new::<CountingCursor>();
        assert_eq!(vtable.type_id(), TypeId::of::<CountingCursor>());
        assert!(vtable.type_name().contains("CountingCursor"));
    }
}
