//! A prelude intended to be bulk-imported by users of this crate.
//!
//! ```
//! use opaqueseq::prelude::*;
//! ```

pub use crate::{
    Cursor, OpaqueCursor, OpaqueSequence, RetreatUnsupported, View,
    views::{Filtered, Iterated, Mapped, SharedSlice},
};
