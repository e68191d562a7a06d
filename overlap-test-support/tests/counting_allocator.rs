//! Behavioural tests for the per-thread allocation counter.

use std::{hint::black_box, thread};

use overlap_test_support::alloc::{AllocationStats, CountingAllocator, measure, snapshot};
use rstest::rstest;

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

#[rstest]
#[case(1)]
#[case(64)]
#[case(4096)]
fn counts_a_single_vector_allocation(#[case] len: usize) {
    let (buffer, stats) = measure(|| black_box(vec![7_u8; len]));
    assert_eq!(buffer.len(), len);
    assert_eq!(stats.allocations, 1);
    assert!(stats.bytes >= u64::try_from(len).expect("length fits in u64"));
}

#[test]
fn arithmetic_does_not_allocate() {
    let (sum, stats) = measure(|| black_box((1_u64..=100).sum::<u64>()));
    assert_eq!(sum, 5050);
    assert!(stats.is_zero(), "unexpected allocations: {stats:?}");
}

#[test]
fn other_threads_are_not_counted() {
    let before = snapshot();
    let handle = thread::spawn(|| {
        let (_, stats) = measure(|| black_box(vec![0_u64; 32]));
        stats
    });
    let child = handle.join().expect("worker thread must not panic");
    assert_eq!(child.allocations, 1);

    let (_, stats) = measure(|| black_box(1_u32 + 1));
    assert_eq!(stats, AllocationStats::default());
    assert!(snapshot().allocations >= before.allocations);
}
