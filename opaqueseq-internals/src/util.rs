//! Internal utility types.

/// Marker type used when type-erasing views or cursors.
///
/// This zero-sized type serves as a placeholder behind pointers whose
/// actual pointee type has been erased. For example, `NonNull<Erased>`
/// represents a pointer to a value whose concrete type is unknown at the
/// current scope and is only recoverable through the vtable paired with
/// it.
///
/// Using a distinct marker type (rather than `()`) makes the intent
/// clearer in type signatures and error messages.
pub(crate) struct Erased;
