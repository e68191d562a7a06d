//! Borrowed views over sequences whose ascending order has been established.
//!
//! [`crate::sorted_intersection_count`] trusts its inputs. The helpers here
//! let callers check the precondition once, where data is ingested, and then
//! carry the result in the type.

use core::{fmt, ops::Deref};

use crate::{error::SortedInputError, intersection::sorted_intersection_count, key::SortKey};

/// Identifies whether a sequence was supplied as the left or right operand.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SliceKind {
    /// Value originating from the first argument.
    Left,
    /// Value originating from the second argument.
    Right,
}

impl fmt::Display for SliceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Returns the index of the first element smaller than its predecessor.
///
/// Equal neighbours are permitted, so `None` means the sequence is
/// non-decreasing.
///
/// # Examples
/// ```
/// use overlap_core::first_descent;
///
/// assert_eq!(first_descent(&[1, 1, 2, 5]), None);
/// assert_eq!(first_descent(&[1, 3, 2, 0]), Some(2));
/// assert_eq!(first_descent::<u8>(&[]), None);
/// ```
#[must_use]
pub fn first_descent<K: SortKey>(values: &[K]) -> Option<usize> {
    values
        .windows(2)
        .position(|pair| matches!(pair, [previous, current] if current < previous))
        .map(|position| position + 1)
}

/// Slice known to be sorted in ascending (non-decreasing) order.
///
/// # Examples
/// ```
/// use overlap_core::{SliceKind, SortedSlice};
///
/// let left = SortedSlice::new(&[1, 2, 3], SliceKind::Left)?;
/// let right = SortedSlice::new(&[2, 3, 4], SliceKind::Right)?;
/// assert_eq!(left.intersection_count(right), 2);
/// # Ok::<(), overlap_core::SortedInputError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SortedSlice<'a, K>(&'a [K]);

impl<'a, K: SortKey> SortedSlice<'a, K> {
    /// Validates the ordering of `values` and wraps them.
    ///
    /// # Errors
    ///
    /// Returns [`SortedInputError::NotAscending`] naming `which` and the index
    /// of the first element that is smaller than its predecessor.
    pub fn new(values: &'a [K], which: SliceKind) -> Result<Self, SortedInputError> {
        match first_descent(values) {
            Some(index) => Err(SortedInputError::NotAscending { which, index }),
            None => Ok(Self(values)),
        }
    }

    /// Wraps `values` without inspecting them.
    ///
    /// Nothing unsafe happens if the caller is wrong; intersection counts
    /// computed from the view are simply meaningless.
    ///
    /// # Examples
    /// ```
    /// use overlap_core::SortedSlice;
    ///
    /// let view = SortedSlice::assume_sorted(&[10_u32, 20, 30]);
    /// assert_eq!(view.len(), 3);
    /// ```
    #[must_use]
    pub const fn assume_sorted(values: &'a [K]) -> Self {
        Self(values)
    }

    /// Returns the number of elements in the view.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the view holds no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the underlying slice.
    #[must_use]
    pub const fn as_slice(&self) -> &'a [K] {
        self.0
    }

    /// Counts the elements shared with `other` under merge-scan semantics.
    ///
    /// # Examples
    /// ```
    /// use overlap_core::SortedSlice;
    ///
    /// let left = SortedSlice::assume_sorted(&[1_i64, 1, 2]);
    /// let right = SortedSlice::assume_sorted(&[1_i64, 2, 2]);
    /// assert_eq!(left.intersection_count(right), 2);
    /// ```
    #[must_use]
    pub fn intersection_count(&self, other: SortedSlice<'_, K>) -> usize {
        sorted_intersection_count(self.0, other.0)
    }
}

impl<K> AsRef<[K]> for SortedSlice<'_, K> {
    fn as_ref(&self) -> &[K] {
        self.0
    }
}

impl<K> Deref for SortedSlice<'_, K> {
    type Target = [K];

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

/// Validates both operands of an intersection, left first.
///
/// # Errors
///
/// Returns [`SortedInputError::NotAscending`] for the first operand found out
/// of order.
///
/// # Examples
/// ```
/// use overlap_core::{SliceKind, SortedInputError, verify_pair};
///
/// let (left, right) = verify_pair(&[1, 2], &[2, 3])?;
/// assert_eq!(left.intersection_count(right), 1);
///
/// let err = verify_pair(&[1, 2], &[3, 2]).expect_err("right side is unsorted");
/// assert_eq!(err, SortedInputError::NotAscending { which: SliceKind::Right, index: 1 });
/// # Ok::<(), SortedInputError>(())
/// ```
pub fn verify_pair<'a, 'b, K: SortKey>(
    xs: &'a [K],
    ys: &'b [K],
) -> Result<(SortedSlice<'a, K>, SortedSlice<'b, K>), SortedInputError> {
    let left = SortedSlice::new(xs, SliceKind::Left)?;
    let right = SortedSlice::new(ys, SliceKind::Right)?;
    Ok((left, right))
}
