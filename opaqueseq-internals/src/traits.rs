//! Capability traits that concrete sequence types implement in order to be
//! usable behind the erased interface.
//!
//! A concrete sequence participates in erasure by providing two types: a
//! *view* (a cheap description of how to traverse some data, implementing
//! [`View`]) and a *cursor* (a position within that traversal, implementing
//! [`Cursor`]). The erased containers in this crate ([`RawSequence`] and
//! [`RawCursor`]) dispatch every operation to these traits through
//! per-concrete-type vtables.
//!
//! [`RawSequence`]: crate::RawSequence
//! [`RawCursor`]: crate::RawCursor

/// A lazily-evaluated description of how to traverse a sequence of
/// elements.
///
/// A view does not own the elements it ranges over exclusively; it is a
/// cheap value (indices, shared handles, generator state) that can produce
/// cursors on demand. Views are installed by value into an erased sequence
/// container and are never mutated afterwards.
///
/// # Examples
///
/// A minimal generated view over `0..len`:
///
/// ```
/// use opaqueseq_internals::traits::{Cursor, RetreatUnsupported, View};
///
/// struct Counting {
///     len: u32,
/// }
///
/// #[derive(Clone, PartialEq)]
/// struct CountingCursor {
///     position: u32,
///     len: u32,
/// }
///
/// impl Cursor for CountingCursor {
///     type Item = u32;
///
///     fn advance(&mut self) {
///         self.position += 1;
///     }
///
///     fn retreat(&mut self) -> Result<(), RetreatUnsupported> {
///         self.position -= 1;
///         Ok(())
///     }
///
///     fn item(&self) -> Option<&u32> {
///         (self.position < self.len).then_some(&self.position)
///     }
/// }
///
/// impl View for Counting {
///     type Item = u32;
///     type Cursor = CountingCursor;
///
///     fn begin(&self) -> CountingCursor {
///         CountingCursor {
///             position: 0,
///             len: self.len,
///         }
///     }
///
///     fn end(&self) -> CountingCursor {
///         CountingCursor {
///             position: self.len,
///             len: self.len,
///         }
///     }
/// }
/// ```
pub trait View: 'static {
    /// The element type produced by this view.
    type Item: 'static;

    /// The cursor type that tracks a position within this view.
    type Cursor: Cursor<Item = Self::Item>;

    /// Creates a cursor positioned at the first element of the sequence.
    ///
    /// For an empty sequence the returned cursor compares equal to
    /// [`end`](View::end).
    fn begin(&self) -> Self::Cursor;

    /// Creates a cursor positioned one past the last element of the
    /// sequence.
    ///
    /// Equality with this cursor is the sole termination test for an
    /// iteration; there is no separate end-of-sequence sentinel.
    fn end(&self) -> Self::Cursor;
}

/// A position within the traversal of a [`View`].
///
/// Cursors must be cheap to clone and comparable for position equality.
/// Equality is only meaningful between cursors created from the same view
/// value; comparing cursors from unrelated views is a caller contract
/// violation at the erased layer (see [`RawCursor::eq`]).
///
/// [`RawCursor::eq`]: crate::RawCursor::eq
pub trait Cursor: Clone + PartialEq + 'static {
    /// The element type this cursor dereferences to.
    type Item: 'static;

    /// Moves the cursor forward by one element.
    ///
    /// Advancing a cursor that is already at the end position is a caller
    /// contract violation. Implementations may panic in debug builds but
    /// must not cause memory unsafety.
    fn advance(&mut self);

    /// Moves the cursor backward by one element.
    ///
    /// Every cursor advertises this operation uniformly, but support is
    /// decided per concrete type at call time: forward-only sources return
    /// [`RetreatUnsupported`] without mutating the cursor.
    fn retreat(&mut self) -> Result<(), RetreatUnsupported>;

    /// Returns a reference to the element the cursor currently points at,
    /// or `None` exactly when the cursor is at the end position.
    ///
    /// The reference is valid for as long as the cursor itself is neither
    /// moved nor mutated, which the `&self` borrow enforces.
    fn item(&self) -> Option<&Self::Item>;
}

/// Error returned when [`Cursor::retreat`] is invoked on a cursor whose
/// concrete type only supports forward iteration.
///
/// The erased cursor interface advertises bidirectional iteration
/// uniformly, so this failure surfaces at call time rather than at compile
/// time. The error records the concrete cursor type for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetreatUnsupported {
    /// The [`core::any::type_name`] of the concrete cursor type that
    /// rejected the operation.
    type_name: &'static str,
}

impl RetreatUnsupported {
    /// Creates a new [`RetreatUnsupported`] recording `C` as the offending
    /// cursor type.
    ///
    /// Intended to be called from a forward-only cursor's
    /// [`Cursor::retreat`] implementation as
    /// `Err(RetreatUnsupported::new::<Self>())`.
    #[must_use]
    pub fn new<C>() -> Self {
        Self {
            type_name: core::any::type_name::<C>(),
        }
    }

    /// Returns the [`core::any::type_name`] of the cursor type that does
    /// not support backward advancement.
    #[must_use]
    pub fn cursor_type_name(&self) -> &'static str {
        self.type_name
    }
}

impl core::fmt::Display for RetreatUnsupported {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "cursor type `{}` does not support backward advancement",
            self.type_name
        )
    }
}

impl core::error::Error for RetreatUnsupported {}
