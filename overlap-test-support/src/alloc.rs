//! Per-thread allocation counting.
//!
//! Install [`CountingAllocator`] as the global allocator of a test binary,
//! then wrap the code under test in [`measure`]:
//!
//! ```ignore
//! use overlap_test_support::alloc::{CountingAllocator, measure};
//!
//! #[global_allocator]
//! static GLOBAL: CountingAllocator = CountingAllocator;
//!
//! let (_, stats) = measure(|| vec![1_u8; 16]);
//! assert_eq!(stats.allocations, 1);
//! ```
//!
//! Counters are thread-local, so allocations made by other test threads
//! running concurrently do not leak into a measurement.

use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
};

thread_local! {
    static ALLOCATIONS: Cell<u64> = const { Cell::new(0) };
    static ALLOCATED_BYTES: Cell<u64> = const { Cell::new(0) };
}

/// Global allocator that forwards to [`System`] and counts every request
/// made by the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct CountingAllocator;

// SAFETY: every method forwards the caller's arguments unchanged to `System`,
// which upholds the `GlobalAlloc` contract. Counting touches only
// const-initialised thread locals, which never allocate.
unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        record(layout.size());
        // SAFETY: forwarded verbatim from the caller.
        unsafe { System.alloc(layout) }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        record(layout.size());
        // SAFETY: forwarded verbatim from the caller.
        unsafe { System.alloc_zeroed(layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        record(new_size);
        // SAFETY: forwarded verbatim from the caller.
        unsafe { System.realloc(ptr, layout, new_size) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: forwarded verbatim from the caller.
        unsafe { System.dealloc(ptr, layout) }
    }
}

fn record(bytes: usize) {
    let bytes = u64::try_from(bytes).unwrap_or(u64::MAX);
    // `try_with` fails only while the thread is tearing down its locals.
    let _ = ALLOCATIONS.try_with(|count| count.set(count.get().saturating_add(1)));
    let _ = ALLOCATED_BYTES.try_with(|total| total.set(total.get().saturating_add(bytes)));
}

/// Allocation activity observed on one thread.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AllocationStats {
    /// Number of allocation and reallocation requests.
    pub allocations: u64,
    /// Bytes requested across those calls.
    pub bytes: u64,
}

impl AllocationStats {
    /// Returns `true` when nothing was allocated.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.allocations == 0 && self.bytes == 0
    }

    const fn since(self, earlier: Self) -> Self {
        Self {
            allocations: self.allocations.saturating_sub(earlier.allocations),
            bytes: self.bytes.saturating_sub(earlier.bytes),
        }
    }
}

/// Returns the running totals for the current thread.
///
/// Totals stay at zero unless [`CountingAllocator`] is the global allocator.
#[must_use]
pub fn snapshot() -> AllocationStats {
    AllocationStats {
        allocations: ALLOCATIONS.with(Cell::get),
        bytes: ALLOCATED_BYTES.with(Cell::get),
    }
}

/// Runs `operation` and reports the allocations it made on this thread.
pub fn measure<T>(operation: impl FnOnce() -> T) -> (T, AllocationStats) {
    let before = snapshot();
    let value = operation();
    let after = snapshot();
    (value, after.since(before))
}
