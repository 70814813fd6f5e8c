//! Small-buffer-optimized storage for a single erased value.
//!
//! This module encapsulates the storage strategy shared by [`RawSequence`]
//! and [`RawCursor`]: a value of some concrete type `C` is stored either
//! inline in a fixed-size buffer or behind a heap pointer. The choice is
//! made exactly once, at installation time, from the size and alignment of
//! `C`, and never changes for the lifetime of the stored value.
//!
//! # Safety Invariant
//!
//! A [`Slot`] never exists without an installed value: the only
//! constructor is [`Slot::install`], and the value is only destroyed by
//! the owning container's `Drop` implementation, which dispatches through
//! the vtable entry matching the storage case. The "empty" state of
//! classic polymorphic containers is unrepresentable here; use-after-move
//! is rejected by the compiler instead of being detected at run time.
//!
//! The slot itself is oblivious to the concrete type it stores. The owning
//! container pairs it with a `&'static` vtable created for the same `C`
//! that was installed, which is what makes the [`drop_inline`] and
//! [`drop_heap`] dispatch sound.
//!
//! [`RawSequence`]: crate::RawSequence
//! [`RawCursor`]: crate::RawCursor

use alloc::boxed::Box;
use core::{mem::MaybeUninit, ptr::NonNull};

use crate::util::Erased;

/// Default size in bytes of the inline buffer.
///
/// Concrete view and cursor types up to this size (with compatible
/// alignment) are stored without heap allocation. This is the crate's only
/// tunable: the `N` parameter of [`RawSequence`] and [`RawCursor`]
/// defaults to it.
///
/// [`RawSequence`]: crate::RawSequence
/// [`RawCursor`]: crate::RawCursor
pub const DEFAULT_INLINE_LIMIT: usize = 48;

/// Alignment of the inline buffer.
///
/// Types with a stricter alignment requirement are always stored on the
/// heap, regardless of their size. A fixed buffer necessarily has a fixed
/// alignment, so alignment participates in the storage decision alongside
/// size.
pub const MAX_INLINE_ALIGN: usize = 16;

/// Fixed-size byte buffer for inline value storage.
///
/// The buffer is over-aligned to [`MAX_INLINE_ALIGN`] so that any type
/// whose alignment does not exceed it can be constructed at offset zero.
#[repr(C, align(16))]
pub(crate) struct InlineBuf<const N: usize>([MaybeUninit<u8>; N]);

/// Which of the two storage cases a [`Slot`] selected at installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StorageKind {
    /// The value lives in the slot's own buffer.
    Inline,
    /// The value lives in a separate heap allocation.
    Heap,
}

/// Storage for exactly one value of an erased concrete type.
///
/// The two cases mirror the classic small-buffer optimization as a tagged
/// variant: either the value's bytes live directly in [`InlineBuf`], or
/// the slot holds a pointer obtained from [`Box::into_raw`].
///
/// Moving a [`Slot`] moves the inline bytes (or the pointer) by plain
/// `memcpy`. This is sound because Rust values are trivially relocatable;
/// no captured move constructor is needed.
pub(crate) enum Slot<const N: usize> {
    /// Inline storage. The first `size_of::<C>()` bytes of the buffer hold
    /// an initialized value of the installed concrete type `C`.
    Inline(InlineBuf<N>),
    /// Heap storage. The pointer was created from a `Box<C>` for the
    /// installed concrete type `C` using [`Box::into_raw`].
    Heap(NonNull<Erased>),
}

impl<const N: usize> Slot<N> {
    /// Returns whether a value of type `C` would be stored inline by a
    /// slot with this buffer size.
    ///
    /// The rule is evaluated from layout alone: `C` fits if its size does
    /// not exceed `N` and its alignment does not exceed
    /// [`MAX_INLINE_ALIGN`].
    #[must_use]
    pub(crate) const fn fits<C>() -> bool {
        size_of::<C>() <= N && align_of::<C>() <= MAX_INLINE_ALIGN
    }

    /// Installs `value` into a fresh slot, selecting inline or heap
    /// storage per [`Slot::fits`].
    #[inline]
    pub(crate) fn install<C>(value: C) -> Self {
        if const { Self::fits::<C>() } {
            let mut buf = InlineBuf([MaybeUninit::uninit(); N]);
            let dst: *mut C = buf.0.as_mut_ptr().cast::<C>();
            // SAFETY: `fits::<C>()` guarantees that the buffer is large
            // enough for a `C` and at least as aligned as `C` requires, so
            // `dst` is valid for a write of `C`. The write takes ownership
            // of `value`.
            unsafe {
                dst.write(value);
            }
            Slot::Inline(buf)
        } else {
            let ptr: *mut C = Box::into_raw(Box::new(value));
            let ptr: *mut Erased = ptr.cast::<Erased>();
            // SAFETY: `Box::into_raw` returns a non-null pointer.
            let ptr = unsafe { NonNull::new_unchecked(ptr) };
            Slot::Heap(ptr)
        }
    }

    /// Returns which storage case was selected at installation.
    #[inline]
    pub(crate) fn kind(&self) -> StorageKind {
        match self {
            Slot::Inline(_) => StorageKind::Inline,
            Slot::Heap(_) => StorageKind::Heap,
        }
    }

    /// Returns a pointer to the installed value, for shared access.
    ///
    /// The pointer is valid as long as the slot is neither moved nor
    /// mutated; it must only be used for reads while the borrow of `self`
    /// is live.
    #[inline]
    pub(crate) fn value_ptr(&self) -> NonNull<Erased> {
        match self {
            Slot::Inline(buf) => NonNull::from(&buf.0).cast::<Erased>(),
            Slot::Heap(ptr) => *ptr,
        }
    }

    /// Returns a pointer to the installed value, for exclusive access.
    ///
    /// Mutation of an inline value must go through this method: a pointer
    /// derived from a shared borrow of the buffer must not be written
    /// through.
    #[inline]
    pub(crate) fn value_ptr_mut(&mut self) -> NonNull<Erased> {
        match self {
            Slot::Inline(buf) => NonNull::from(&mut buf.0).cast::<Erased>(),
            Slot::Heap(ptr) => *ptr,
        }
    }
}

/// Drops an inline-stored value of type `C` in place.
///
/// Vtables instantiate this function per concrete type as their
/// inline-drop entry.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` points to an initialized value of type `C` stored inline in a
///    [`Slot`] buffer.
/// 2. The value has not previously been dropped and is not used after this
///    call.
pub(crate) unsafe fn drop_inline<C>(ptr: NonNull<Erased>) {
    let ptr: *mut C = ptr.cast::<C>().as_ptr();
    // SAFETY: The pointer is valid, aligned, and points to an initialized
    // `C` that we are entitled to destroy, as guaranteed by the caller.
    unsafe {
        ptr.drop_in_place();
    }
}

/// Drops a heap-stored value of type `C` by reconstructing its `Box`.
///
/// Vtables instantiate this function per concrete type as their heap-drop
/// entry.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` comes from a `Box<C>` via [`Box::into_raw`].
/// 2. The allocation has not previously been freed and the pointer is not
///    used after this call.
pub(crate) unsafe fn drop_heap<C>(ptr: NonNull<Erased>) {
    let ptr: *mut C = ptr.cast::<C>().as_ptr();
    // SAFETY: The pointer has the correct type and came from
    // `Box::into_raw`, as guaranteed by the caller, so reconstructing the
    // `Box` transfers ownership back for deallocation.
    let boxed = unsafe { Box::from_raw(ptr) };
    core::mem::drop(boxed);
}
