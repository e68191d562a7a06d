//! Shared test utilities used across overlap crates.
//!
//! - [`tracing::RecordingLayer`] captures spans and events so tests can
//!   assert instrumentation.
//! - [`alloc::CountingAllocator`] counts heap allocations per thread so
//!   tests can prove a code path is allocation-free.

pub mod alloc;
pub mod tracing;
