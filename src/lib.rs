#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Type-erased, lazily-evaluated sequences behind a stable, non-generic
//! interface.
//!
//! ## Overview
//!
//! This crate lets a producer hand out a composed pipeline of sequence
//! transformations without exposing the pipeline's concrete type. The
//! producer builds an [`OpaqueSequence<T>`] from any [`View`]
//! implementation; the consumer iterates through [`OpaqueCursor`] handles
//! or the std [`Iterator`] adapter, never naming the producer's internal
//! types. Producer and consumer can therefore be compiled separately and
//! evolve independently.
//!
//! Small view and cursor types are stored inline in the erased containers
//! with no heap allocation; larger ones transparently move to the heap.
//! The inline limit is the crate's only tunable, exposed as the `N` const
//! parameter defaulting to [`DEFAULT_INLINE_LIMIT`].
//!
//! ## Quick Example
//!
//! ```
//! use opaqueseq::{OpaqueSequence, views::{Filtered, SharedSlice}};
//!
//! // The concrete pipeline type never appears in the signature.
//! fn even_values() -> OpaqueSequence<i32> {
//!     let source = SharedSlice::new(0..16);
//!     OpaqueSequence::new(Filtered::new(source, |value: &i32| value % 2 == 0))
//! }
//!
//! let evens: Vec<i32> = even_values().iter().collect();
//! assert_eq!(evens, vec![0, 2, 4, 6, 8, 10, 12, 14]);
//! ```
//!
//! ## Core Concepts
//!
//! - A **view** ([`View`]) is a cheap, lazily-evaluated description of how
//!   to traverse some elements: shared slices, generated values, or
//!   adapters stacked on other views (see [`views`]).
//! - A **cursor** ([`Cursor`], erased as [`OpaqueCursor`]) is one position
//!   in a traversal. Cursors advertise backward movement uniformly;
//!   forward-only sources reject [`OpaqueCursor::retreat`] at call time
//!   with [`RetreatUnsupported`].
//! - An [`OpaqueSequence<T>`] owns exactly one erased view. Each cursor it
//!   hands out owns its own erased state: cloning a cursor produces a
//!   fully independent position.
//!
//! Equality against a cursor obtained from [`OpaqueSequence::end`] is the
//! sole termination test; elements themselves are reached through
//! [`OpaqueCursor::get`].
//!
//! ## Ownership
//!
//! Sequences are move-only: an erased value cannot be duplicated without
//! knowing its concrete type. Use-after-move is rejected at compile time
//! rather than detected at run time:
//!
//! ```compile_fail
//! use opaqueseq::{OpaqueSequence, views::SharedSlice};
//!
//! let sequence = OpaqueSequence::new(SharedSlice::new([1, 2, 3]));
//! let moved = sequence;
//! sequence.begin(); // error: use of moved value
//! ```
//!
//! For the erasure machinery itself, see the [`opaqueseq-internals`]
//! crate.
//!
//! [`opaqueseq-internals`]: opaqueseq_internals

#[cfg(test)]
extern crate std;

mod cursor;
mod iter;
pub mod prelude;
mod sequence;
pub mod views;

pub use opaqueseq_internals::{
    DEFAULT_INLINE_LIMIT, MAX_INLINE_ALIGN,
    traits::{Cursor, RetreatUnsupported, View},
};

pub use crate::{cursor::OpaqueCursor, iter::Iter, sequence::OpaqueSequence};
