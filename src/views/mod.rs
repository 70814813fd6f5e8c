//! Ready-made [`View`](crate::View) implementations.
//!
//! Views come in two kinds:
//!
//! - **Sources** produce elements from somewhere: [`SharedSlice`] ranges
//!   over reference-counted contiguous storage, [`Iterated`] adapts any
//!   cloneable std [`Iterator`] as a forward-only view.
//! - **Adapters** wrap another view and transform its traversal:
//!   [`Filtered`] keeps the elements a predicate accepts, [`Mapped`]
//!   applies a transformation to each element.
//!
//! Adapters compose by value, so a pipeline like
//! `Filtered::new(Mapped::new(source, f), p)` is a single concrete view
//! type ready to be erased into an
//! [`OpaqueSequence`](crate::OpaqueSequence).

mod filtered;
mod iterated;
mod mapped;
mod shared_slice;

pub use self::{
    filtered::{Filtered, FilteredCursor},
    iterated::{Iterated, IteratedCursor},
    mapped::{Mapped, MappedCursor},
    shared_slice::{SharedSlice, SharedSliceCursor},
};
