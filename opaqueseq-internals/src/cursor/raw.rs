//! Type-erased cursor container.
//!
//! This module encapsulates the fields of [`RawCursor`], ensuring they are
//! only visible within this module. This visibility restriction guarantees
//! the safety invariant: **the vtable always matches the concrete cursor
//! type installed in the slot**, because the two are only ever created
//! together in [`RawCursor::new`] and cannot be modified afterwards.

use core::any::TypeId;

use crate::{
    cursor::vtable::CursorVtable,
    slot::{DEFAULT_INLINE_LIMIT, Slot, StorageKind},
    traits::{Cursor, RetreatUnsupported},
};

/// An erased cursor: one position within the iteration of an erased
/// sequence.
///
/// A [`RawCursor`] owns exactly one value of some concrete [`Cursor`]
/// type `C` with `C::Item = T`, though we do not know which actual `C` it
/// is. Small cursor types (per [`Slot::fits`]) are stored inline in the
/// container itself; larger ones live in a single heap allocation.
///
/// The container is move-only. Duplication is deliberately not `Clone`:
/// it is a capability-level operation ([`RawCursor::duplicate`]) that
/// dispatches to the concrete type's own `Clone` through the vtable.
///
/// # Type Parameters
///
/// - `T`: the element type, which is *not* erased.
/// - `N`: the inline buffer size in bytes, defaulting to
///   [`DEFAULT_INLINE_LIMIT`].
pub struct RawCursor<T: 'static, const N: usize = DEFAULT_INLINE_LIMIT> {
    /// Dispatch table created for the installed cursor type.
    ///
    /// # Safety
    ///
    /// Always the vtable instantiated for the exact concrete type
    /// installed in `slot`; paired at construction and never replaced.
    vtable: &'static CursorVtable<T, N>,
    /// Storage holding the installed cursor value.
    slot: Slot<N>,
}

impl<T: 'static, const N: usize> RawCursor<T, N> {
    /// Creates a new [`RawCursor`] by installing `cursor`, selecting
    /// inline or heap storage from the layout of `C`.
    #[inline]
    pub fn new<C: Cursor<Item = T>>(cursor: C) -> Self {
        Self {
            vtable: CursorVtable::new::<C>(),
            slot: Slot::install(cursor),
        }
    }

    /// Returns whether a cursor of type `C` would be stored inline by this
    /// container, without allocating.
    #[must_use]
    pub const fn stores_inline<C: Cursor<Item = T>>() -> bool {
        Slot::<N>::fits::<C>()
    }

    /// Returns whether this cursor's value is stored inline.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.slot.kind() == StorageKind::Inline
    }

    /// Returns the [`TypeId`] of the installed concrete cursor type.
    #[inline]
    #[must_use]
    pub fn cursor_type_id(&self) -> TypeId {
        self.vtable.type_id()
    }

    /// Returns the [`core::any::type_name`] of the installed concrete
    /// cursor type.
    #[inline]
    #[must_use]
    pub fn cursor_type_name(&self) -> &'static str {
        self.vtable.type_name()
    }

    /// Moves the cursor forward by one element.
    #[inline]
    pub fn advance(&mut self) {
        let ptr = self.slot.value_ptr_mut();
        // SAFETY:
        // 1. The vtable matches the installed cursor type (invariant of
        //    this struct).
        // 2. We hold `&mut self`, so access is exclusive.
        unsafe {
            self.vtable.advance(ptr);
        }
    }

    /// Moves the cursor backward by one element.
    ///
    /// Fails with [`RetreatUnsupported`] if the installed concrete cursor
    /// type only supports forward iteration; the cursor is left unchanged
    /// in that case.
    #[inline]
    pub fn retreat(&mut self) -> Result<(), RetreatUnsupported> {
        let ptr = self.slot.value_ptr_mut();
        // SAFETY:
        // 1. The vtable matches the installed cursor type (invariant of
        //    this struct).
        // 2. We hold `&mut self`, so access is exclusive.
        unsafe { self.vtable.retreat(ptr) }
    }

    /// Clones the installed cursor into a new, independent [`RawCursor`].
    ///
    /// The duplicate does not share state with the original: advancing one
    /// never moves the other.
    #[inline]
    #[must_use]
    pub fn duplicate(&self) -> RawCursor<T, N> {
        let ptr = self.slot.value_ptr();
        // SAFETY:
        // 1. The vtable matches the installed cursor type (invariant of
        //    this struct).
        unsafe { self.vtable.duplicate(ptr) }
    }

    /// Returns a reference to the element the cursor currently points at,
    /// or `None` exactly when the cursor is at the end position.
    #[inline]
    #[must_use]
    pub fn item(&self) -> Option<&T> {
        let value = self.slot.value_ptr();
        // SAFETY:
        // 1. The vtable matches the installed cursor type (invariant of
        //    this struct).
        let ptr = unsafe { self.vtable.item(value) }?;
        // SAFETY: The concrete cursor derived this pointer from its own
        // `item(&self)`. It remains valid while the cursor is neither
        // moved nor mutated, which the `&self` borrow of this container
        // enforces for the lifetime of the returned reference.
        Some(unsafe { ptr.as_ref() })
    }

    /// Compares two erased cursors for position equality.
    ///
    /// # Contract
    ///
    /// Equality is only meaningful between cursors created from the same
    /// erased sequence. Comparing cursors wrapping *different* concrete
    /// types is a caller contract violation: it trips a debug assertion
    /// and evaluates to `false` in release builds, but never inspects a
    /// value through the wrong type.
    #[inline]
    #[must_use]
    pub fn eq(&self, other: &RawCursor<T, N>) -> bool {
        // Cheap type tag check: never dispatch across mismatched concrete
        // types.
        if self.vtable.type_id() != other.vtable.type_id() {
            debug_assert!(
                false,
                "compared cursors of different concrete types: `{}` vs `{}`",
                self.vtable.type_name(),
                other.vtable.type_name(),
            );
            return false;
        }
        // SAFETY:
        // 1. Both operands store the same concrete cursor type as the
        //    vtable: `self` by the invariant of this struct, `other` by
        //    the `TypeId` equality checked above.
        unsafe { self.vtable.eq(self.slot.value_ptr(), other.slot.value_ptr()) }
    }
}

impl<T: 'static, const N: usize> core::ops::Drop for RawCursor<T, N> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY:
        // 1. The vtable matches the installed cursor type (invariant of
        //    this struct).
        // 2. We are in `drop`, so the value has not been dropped before
        //    and cannot be used afterwards.
        unsafe {
            self.vtable.drop_installed(&mut self.slot);
        }
    }
}

impl<T: 'static, const N: usize> core::fmt::Debug for RawCursor<T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawCursor")
            .field("cursor_type", &self.cursor_type_name())
            .field("inline", &self.is_inline())
            .finish()
    }
}
