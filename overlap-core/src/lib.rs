//! Overlap core library.
//!
//! Counts the elements shared by two ascending-sorted integer sequences with
//! a two-pointer merge scan. The scan allocates nothing and never validates
//! its inputs; [`SortedSlice`] offers an opt-in ordering check for callers
//! that want one at ingestion time, and [`BatchCounter`] scores one query set
//! against many candidate sets.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod batch;
mod builder;
mod error;
mod intersection;
mod key;
mod sorted;

pub use crate::{
    batch::BatchCounter,
    builder::{BatchCounterBuilder, DEFAULT_PARALLEL_THRESHOLD, ExecutionStrategy},
    error::{OverlapError, OverlapErrorCode, Result, SortedInputError, SortedInputErrorCode},
    intersection::sorted_intersection_count,
    key::SortKey,
    sorted::{SliceKind, SortedSlice, first_descent, verify_pair},
};
