//! Element types accepted by the intersection scan.

use core::fmt::Debug;

mod sealed {
    pub trait Sealed {}
}

/// Primitive integer usable as an element of a sorted sequence.
///
/// The trait is sealed: only the built-in integer types implement it, so
/// slices handed to [`crate::sorted_intersection_count`] are always
/// contiguous, unboxed values and the scan loop never chases a pointer per
/// element.
///
/// # Examples
/// ```
/// use overlap_core::SortKey;
///
/// fn accepts<K: SortKey>(_: &[K]) {}
///
/// accepts(&[1_i32, 2, 3]);
/// accepts(&[7_u64]);
/// ```
pub trait SortKey: Copy + Ord + Debug + Send + Sync + sealed::Sealed {}

macro_rules! impl_sort_key {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl SortKey for $ty {}
        )+
    };
}

impl_sort_key!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
);
