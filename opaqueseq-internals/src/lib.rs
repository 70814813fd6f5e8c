#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`opaqueseq`].
//!
//! # Overview
//!
//! This crate contains the low-level, type-erased containers and unsafe
//! operations that power the [`opaqueseq`] sequence-erasure library. It
//! provides zero-cost type erasure through vtable-based dispatch, combined
//! with small-buffer storage that keeps small concrete types off the heap.
//!
//! **This crate is an implementation detail.** No semantic versioning
//! guarantees are provided. Users should depend on the [`opaqueseq`] crate,
//! not this one.
//!
//! # Architecture
//!
//! The crate is organized around two parallel type hierarchies, one for
//! erased sequence views and one for erased cursors, sharing a common
//! storage layer:
//!
//! - **[`slot`]**: Small-buffer-optimized value storage
//!   - [`Slot`]: Holds an erased value either inline in a fixed-size
//!     buffer or behind a heap pointer, chosen once at installation time
//! - **[`sequence`]**: Type-erased sequence storage
//!   - [`RawSequence`]: Owned, erased view with begin/end cursor creation
//!   - [`SequenceVtable`]: Function pointers for type-erased dispatch
//! - **[`cursor`]**: Type-erased cursor storage
//!   - [`RawCursor`]: Owned, erased cursor position
//!   - [`CursorVtable`]: Function pointers for advance/retreat/duplicate/
//!     item/eq dispatch
//! - **[`traits`]**: The capability traits concrete types implement
//!   - [`View`]: Produces begin and end cursors for a sequence
//!   - [`Cursor`]: A position within a sequence
//!
//! # Safety Strategy
//!
//! Type erasure requires careful handling to maintain Rust's type safety
//! guarantees. When we erase a concrete cursor type `C` behind a
//! [`NonNull<Erased>`] pointer, we must ensure that the vtable function
//! pointers still match the actual concrete type stored in memory.
//!
//! This crate maintains safety through:
//!
//! - **Module-based encapsulation**: Safety-critical types keep fields
//!   module-private, making invariants locally verifiable within a single
//!   file
//! - **Paired construction**: A vtable and the value it describes are only
//!   ever created together ([`RawSequence::new`], [`RawCursor::new`]), and
//!   neither can be swapped afterwards
//! - **Documented vtable contracts**: Each vtable method specifies exactly
//!   when it can be safely called
//!
//! Unlike the classic byte-buffer-plus-move-function trick, moving a
//! [`Slot`] needs no captured move constructor: Rust values are trivially
//! relocatable, so moving the container moves the bytes and the compiler
//! statically rejects any later use of the source.
//!
//! [`opaqueseq`]: https://docs.rs/opaqueseq/latest/opaqueseq/
//! [`Slot`]: slot::Slot
//! [`SequenceVtable`]: sequence::vtable::SequenceVtable
//! [`CursorVtable`]: cursor::vtable::CursorVtable
//! [`View`]: traits::View
//! [`Cursor`]: traits::Cursor
//! [`NonNull<Erased>`]: core::ptr::NonNull

extern crate alloc;

mod cursor;
mod sequence;
mod slot;
pub mod traits;
mod util;

pub use cursor::RawCursor;
pub use sequence::RawSequence;
pub use slot::{DEFAULT_INLINE_LIMIT, MAX_INLINE_ALIGN};
