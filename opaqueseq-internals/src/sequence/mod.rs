//! Type-erased sequence storage.
//!
//! See [`RawSequence`] for the main type of this module.

pub(crate) mod raw;
pub(crate) mod vtable;

pub use raw::RawSequence;
