//! Error types for the overlap core library.
//!
//! The intersection scan itself never fails. Errors arise only from the
//! opt-in ordering checks and from batch configuration.

use std::fmt;

use thiserror::Error;

use crate::{builder::ExecutionStrategy, sorted::SliceKind};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Raised when a sequence fails the ascending-order check.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SortedInputError {
    /// An element was smaller than its predecessor.
    #[error("{which} sequence is not ascending: element {index} is smaller than its predecessor")]
    NotAscending {
        /// Operand containing the descent.
        which: SliceKind,
        /// Position of the first out-of-order element.
        index: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`SortedInputError`] variants.
    enum SortedInputErrorCode for SortedInputError {
        /// An element was smaller than its predecessor.
        NotAscending => NotAscending { .. } => "SORTED_INPUT_NOT_ASCENDING",
    }
}

/// Error type produced when configuring or running a [`crate::BatchCounter`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum OverlapError {
    /// The parallel threshold must be greater than zero.
    #[error("parallel_threshold must be at least 1 (got {got})")]
    InvalidParallelThreshold {
        /// The invalid threshold supplied by the caller.
        got: usize,
    },
    /// Provided output buffer length did not match the number of candidates.
    #[error("output buffer has length {out} but {expected} candidates were given")]
    OutputLengthMismatch {
        /// Caller-provided buffer length.
        out: usize,
        /// Number of candidate sequences in the batch.
        expected: usize,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
}

define_error_codes! {
    /// Stable codes describing [`OverlapError`] variants.
    enum OverlapErrorCode for OverlapError {
        /// The parallel threshold must be greater than zero.
        InvalidParallelThreshold => InvalidParallelThreshold { .. } => "OVERLAP_INVALID_PARALLEL_THRESHOLD",
        /// Provided output buffer length did not match the number of candidates.
        OutputLengthMismatch => OutputLengthMismatch { .. } => "OVERLAP_OUTPUT_LENGTH_MISMATCH",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "OVERLAP_BACKEND_UNAVAILABLE",
    }
}

/// Convenient alias for results returned by the batch API.
pub type Result<T> = core::result::Result<T, OverlapError>;
