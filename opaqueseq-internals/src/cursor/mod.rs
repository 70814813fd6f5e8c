//! Type-erased cursor storage.
//!
//! See [`RawCursor`] for the main type of this module.

pub(crate) mod raw;
pub(crate) mod vtable;

pub use raw::RawCursor;
