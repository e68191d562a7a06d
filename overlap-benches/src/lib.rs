//! Benchmark support crate for overlap.
//!
//! Generates seeded sorted feature-hash sets with a known overlap for the
//! Criterion benchmarks of the merge scan and the batch counter.

pub mod error;
pub mod params;
pub mod source;
