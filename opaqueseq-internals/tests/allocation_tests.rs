//! Allocation-accounting tests for the small-buffer optimization.
//!
//! These live in their own test binary so the counting global allocator
//! does not interfere with the other test suites. Counters are kept in
//! thread-local storage so parallel test threads cannot pollute each
//! other's measurements.

use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
};

use opaqueseq_internals::{
    DEFAULT_INLINE_LIMIT, RawCursor, RawSequence,
    traits::{Cursor, RetreatUnsupported, View},
};

thread_local! {
    static ALLOCS: Cell<usize> = const { Cell::new(0) };
    static FREES: Cell<usize> = const { Cell::new(0) };
}

/// Forwards to the system allocator while counting calls per thread.
struct CountingAllocator;

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        ALLOCS.with(|count| count.set(count.get() + 1));
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        FREES.with(|count| count.set(count.get() + 1));
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator;

/// Runs `f` and returns `(allocations, deallocations, result)` observed on
/// the current thread during the call.
fn measured<R>(f: impl FnOnce() -> R) -> (usize, usize, R) {
    let allocs_before = ALLOCS.with(Cell::get);
    let frees_before = FREES.with(Cell::get);
    let result = f();
    let allocs = ALLOCS.with(Cell::get) - allocs_before;
    let frees = FREES.with(Cell::get) - frees_before;
    (allocs, frees, result)
}

/// A generated bidirectional view over `0..len`; both the view and its
/// cursor fit the inline buffer.
struct Counting {
    len: u32,
}

#[derive(Clone, PartialEq)]
struct CountingCursor {
    position: u32,
    len: u32,
}

impl Cursor for CountingCursor {
    type Item = u32;

    fn advance(&mut self) {
        self.position += 1;
    }

    fn retreat(&mut self) -> Result<(), RetreatUnsupported> {
        self.position -= 1;
        Ok(())
    }

    fn item(&self) -> Option<&u32> {
        (self.position < self.len).then_some(&self.position)
    }
}

impl View for Counting {
    type Item = u32;
    type Cursor = CountingCursor;

    fn begin(&self) -> CountingCursor {
        CountingCursor {
            position: 0,
            len: self.len,
        }
    }

    fn end(&self) -> CountingCursor {
        CountingCursor {
            position: self.len,
            len: self.len,
        }
    }
}

/// Same sequence semantics, but the cursor is padded past the inline
/// limit so installation must heap-allocate.
struct CountingPadded {
    len: u32,
}

#[derive(Clone, PartialEq)]
struct PaddedCursor {
    position: u32,
    len: u32,
    _padding: [u64; 16],
}

impl Cursor for PaddedCursor {
    type Item = u32;

    fn advance(&mut self) {
        self.position += 1;
    }

    fn retreat(&mut self) -> Result<(), RetreatUnsupported> {
        self.position -= 1;
        Ok(())
    }

    fn item(&self) -> Option<&u32> {
        (self.position < self.len).then_some(&self.position)
    }
}

impl View for CountingPadded {
    type Item = u32;
    type Cursor = PaddedCursor;

    fn begin(&self) -> PaddedCursor {
        PaddedCursor {
            position: 0,
            len: self.len,
            _padding: [0; 16],
        }
    }

    fn end(&self) -> PaddedCursor {
        PaddedCursor {
            position: self.len,
            len: self.len,
            _padding: [0; 16],
        }
    }
}

#[test]
fn test_small_types_never_allocate() {
    assert!(size_of::<Counting>() <= DEFAULT_INLINE_LIMIT);
    assert!(size_of::<CountingCursor>() <= DEFAULT_INLINE_LIMIT);

    let (allocs, frees, ()) = measured(|| {
        let sequence = RawSequence::<u32>::new(Counting { len: 16 });
        let mut cursor = sequence.begin();
        let end = sequence.end();
        let mut total = 0;
        while !cursor.eq(&end) {
            total += *cursor.item().unwrap();
            cursor.advance();
        }
        assert_eq!(total, 120);
    });

    assert_eq!(allocs, 0);
    assert_eq!(frees, 0);
}

#[test]
fn test_small_cursor_duplicate_never_allocates() {
    let sequence = RawSequence::<u32>::new(Counting { len: 16 });
    let cursor = sequence.begin();

    let (allocs, frees, copy) = measured(|| cursor.duplicate());
    assert_eq!(allocs, 0);
    assert_eq!(frees, 0);
    drop(copy);
}

#[test]
fn test_oversized_cursor_allocates_exactly_once() {
    assert!(size_of::<PaddedCursor>() > DEFAULT_INLINE_LIMIT);
    assert!(!RawCursor::<u32>::stores_inline::<PaddedCursor>());

    let sequence = RawSequence::<u32>::new(CountingPadded { len: 16 });

    let (allocs, frees, cursor) = measured(|| sequence.begin());
    assert_eq!(allocs, 1);
    assert_eq!(frees, 0);

    let (allocs, frees, ()) = measured(|| drop(cursor));
    assert_eq!(allocs, 0);
    assert_eq!(frees, 1);
}

#[test]
fn test_oversized_cursor_duplicate_allocates_exactly_once() {
    let sequence = RawSequence::<u32>::new(CountingPadded { len: 16 });
    let cursor = sequence.begin();

    let (allocs, frees, copy) = measured(|| cursor.duplicate());
    assert_eq!(allocs, 1);
    assert_eq!(frees, 0);

    let (allocs, frees, ()) = measured(|| drop(copy));
    assert_eq!(allocs, 0);
    assert_eq!(frees, 1);
}

#[test]
fn test_storage_choice_is_made_once() {
    // Advancing and retreating a heap-stored cursor must never migrate it
    // between storage cases or reallocate.
    let sequence = RawSequence::<u32>::new(CountingPadded { len: 16 });
    let mut cursor = sequence.begin();
    assert!(!cursor.is_inline());

    let (allocs, frees, ()) = measured(|| {
        for _ in 0..8 {
            cursor.advance();
        }
        for _ in 0..4 {
            cursor.retreat().unwrap();
        }
    });
    assert_eq!(allocs, 0);
    assert_eq!(frees, 0);
    assert!(!cursor.is_inline());
    assert_eq!(cursor.item(), Some(&4));
}
