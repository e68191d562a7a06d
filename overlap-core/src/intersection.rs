//! Two-pointer merge scan over ascending-sorted sequences.

use core::cmp::Ordering;

use crate::key::SortKey;

/// Counts the elements shared by two ascending-sorted sequences.
///
/// Both cursors walk forward in lockstep. The smaller element is skipped
/// because nothing left on the other side can equal it; equal elements count
/// once and consume one element from each side. Repeated values therefore
/// match pairwise, up to the smaller multiplicity.
///
/// Runs in `O(xs.len() + ys.len())` time with no heap allocation.
///
/// The ascending order of both inputs is a precondition and is **not**
/// checked. Unsorted input produces a deterministic but meaningless count;
/// it never panics. Use [`crate::SortedSlice::new`] to validate once where
/// the data enters the system.
///
/// # Examples
/// ```
/// use overlap_core::sorted_intersection_count;
///
/// assert_eq!(sorted_intersection_count(&[1, 2, 3], &[2, 3, 4]), 2);
/// assert_eq!(sorted_intersection_count(&[1, 1, 2], &[1, 2, 2]), 2);
/// assert_eq!(sorted_intersection_count::<i32>(&[], &[5]), 0);
/// ```
#[must_use]
pub fn sorted_intersection_count<K: SortKey>(xs: &[K], ys: &[K]) -> usize {
    let mut matches = 0;
    let mut xi = 0;
    let mut yi = 0;

    while let (Some(x), Some(y)) = (xs.get(xi), ys.get(yi)) {
        match x.cmp(y) {
            Ordering::Less => xi += 1,
            Ordering::Greater => yi += 1,
            Ordering::Equal => {
                matches += 1;
                xi += 1;
                yi += 1;
            }
        }
    }

    matches
}


// ============================================================================
// Kani Formal Verification
// ============================================================================

#[cfg(kani)]
mod kani_proofs {
    use super::sorted_intersection_count;

    fn assume_ascending(values: &[i32; 3]) {
        kani::assume(values[0] <= values[1] && values[1] <= values[2]);
    }

    /// Verifies symmetry: count(a, b) = count(b, a) for sorted inputs.
    #[kani::proof]
    #[kani::unwind(8)]
    fn verify_symmetry_3() {
        let a: [i32; 3] = [kani::any(), kani::any(), kani::any()];
        let b: [i32; 3] = [kani::any(), kani::any(), kani::any()];
        assume_ascending(&a);
        assume_ascending(&b);

        kani::assert(
            sorted_intersection_count(&a, &b) == sorted_intersection_count(&b, &a),
            "intersection count symmetry violated",
        );
    }

    /// Verifies a sorted sequence matches itself completely.
    #[kani::proof]
    #[kani::unwind(8)]
    fn verify_self_count_3() {
        let a: [i32; 3] = [kani::any(), kani::any(), kani::any()];
        assume_ascending(&a);

        kani::assert(
            sorted_intersection_count(&a, &a) == a.len(),
            "self intersection must equal the length",
        );
    }

    /// Verifies the count never exceeds the shorter input, sorted or not.
    #[kani::proof]
    #[kani::unwind(8)]
    fn verify_bounded_by_shorter_3() {
        let a: [i32; 3] = [kani::any(), kani::any(), kani::any()];
        let b: [i32; 2] = [kani::any(), kani::any()];

        kani::assert(
            sorted_intersection_count(&a, &b) <= b.len(),
            "count must not exceed the shorter input",
        );
    }
}
