use opaqueseq_internals::{DEFAULT_INLINE_LIMIT, RawCursor, traits::RetreatUnsupported};

/// A position in an [`OpaqueSequence`](crate::OpaqueSequence), with the
/// concrete cursor type erased.
///
/// Cursors are obtained from [`OpaqueSequence::begin`] and
/// [`OpaqueSequence::end`] and are fully independent values: each owns its
/// own erased traversal state, and [`Clone`] produces a new position that
/// moves separately from the original.
///
/// A cursor positioned on an element yields it through
/// [`get`](OpaqueCursor::get); a cursor at the end position yields `None`.
/// Equality compares positions within the same traversal; comparing
/// cursors whose concrete types differ is always `false` (and trips a
/// debug assertion, since it is almost certainly a mixed-up pair of
/// sequences).
///
/// [`OpaqueSequence::begin`]: crate::OpaqueSequence::begin
/// [`OpaqueSequence::end`]: crate::OpaqueSequence::end
///
/// # Examples
///
/// ```
/// use opaqueseq::{OpaqueSequence, views::SharedSlice};
///
/// let sequence = OpaqueSequence::<i32>::new(SharedSlice::new([10, 20, 30]));
/// let mut cursor = sequence.begin();
/// assert_eq!(cursor.get(), Some(&10));
///
/// cursor.advance();
/// assert_eq!(cursor.get(), Some(&20));
///
/// cursor.retreat().unwrap();
/// assert!(cursor == sequence.begin());
/// ```
pub struct OpaqueCursor<T: 'static, const N: usize = DEFAULT_INLINE_LIMIT> {
    /// The erased cursor container.
    raw: RawCursor<T, N>,
}

impl<T: 'static, const N: usize> OpaqueCursor<T, N> {
    /// Wraps an erased cursor handed out by a sequence.
    pub(crate) fn from_raw(raw: RawCursor<T, N>) -> Self {
        Self { raw }
    }

    /// Moves this cursor forward by one position.
    ///
    /// Must not be called on a cursor equal to the sequence's end cursor.
    pub fn advance(&mut self) {
        self.raw.advance();
    }

    /// Moves this cursor backward by one position.
    ///
    /// Forward-only sources return [`RetreatUnsupported`] and leave the
    /// cursor where it was; the cursor remains usable for forward
    /// movement. Must not be called on a cursor at the first position.
    ///
    /// # Errors
    ///
    /// Returns [`RetreatUnsupported`] if the underlying source cannot move
    /// backward.
    pub fn retreat(&mut self) -> Result<(), RetreatUnsupported> {
        self.raw.retreat()
    }

    /// Returns a reference to the element at this position, or `None` if
    /// the cursor is at the end position.
    ///
    /// The reference borrows from the cursor itself: the erased traversal
    /// state owns or pins the storage the element lives in, so the borrow
    /// ends when the cursor is next moved or dropped.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.raw.item()
    }

    /// Returns the [`core::any::type_name`] of the erased cursor type, for
    /// diagnostics.
    #[must_use]
    pub fn cursor_type_name(&self) -> &'static str {
        self.raw.cursor_type_name()
    }
}

impl<T: 'static, const N: usize> Clone for OpaqueCursor<T, N> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.duplicate(),
        }
    }
}

impl<T: 'static, const N: usize> PartialEq for OpaqueCursor<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.raw.eq(&other.raw)
    }
}

impl<T: 'static, const N: usize> core::fmt::Debug for OpaqueCursor<T, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OpaqueCursor")
            .field("cursor_type", &self.cursor_type_name())
            .field("at_end", &self.get().is_none())
            .finish()
    }
}
