//! Builder utilities for configuring batch intersection counting.
//!
//! Exposes the execution strategy selection surface and the validation
//! performed before constructing [`BatchCounter`] instances.

use std::num::NonZeroUsize;

use crate::{Result, batch::BatchCounter, error::OverlapError};

/// Candidate count at which [`ExecutionStrategy::Auto`] switches to the
/// parallel backend.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Indicates how a [`BatchCounter`] spreads work across candidates.
///
/// `Auto` resolves deterministically: it runs in parallel when the `cpu`
/// feature is compiled and the batch holds at least the configured threshold
/// of candidates, and sequentially otherwise. Results never depend on the
/// strategy.
///
/// # Examples
/// ```
/// use overlap_core::ExecutionStrategy;
///
/// assert_eq!(ExecutionStrategy::default(), ExecutionStrategy::Auto);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Allow the library to select a backend from the batch size.
    #[default]
    Auto,
    /// Score candidates one after another on the calling thread.
    Sequential,
    /// Score candidates on the rayon thread pool.
    Parallel,
}

/// Configures and constructs [`BatchCounter`] instances.
///
/// # Examples
/// ```
/// use overlap_core::{BatchCounterBuilder, ExecutionStrategy};
///
/// let counter = BatchCounterBuilder::new()
///     .with_parallel_threshold(64)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(counter.parallel_threshold().get(), 64);
/// assert_eq!(counter.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone)]
pub struct BatchCounterBuilder {
    parallel_threshold: usize,
    execution_strategy: ExecutionStrategy,
}

impl Default for BatchCounterBuilder {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            execution_strategy: ExecutionStrategy::Auto,
        }
    }
}

impl BatchCounterBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use overlap_core::{BatchCounterBuilder, DEFAULT_PARALLEL_THRESHOLD, ExecutionStrategy};
    ///
    /// let builder = BatchCounterBuilder::new();
    /// assert_eq!(builder.parallel_threshold(), DEFAULT_PARALLEL_THRESHOLD);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the candidate count at which `Auto` goes parallel.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns the configured parallel threshold.
    #[must_use]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Sets the execution strategy used when counting.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Validates the configuration and constructs a [`BatchCounter`].
    ///
    /// # Errors
    /// Returns [`OverlapError::InvalidParallelThreshold`] when the threshold
    /// is zero.
    ///
    /// # Examples
    /// ```
    /// use overlap_core::{BatchCounterBuilder, OverlapError};
    ///
    /// let err = BatchCounterBuilder::new()
    ///     .with_parallel_threshold(0)
    ///     .build()
    ///     .expect_err("zero threshold is rejected");
    /// assert_eq!(err, OverlapError::InvalidParallelThreshold { got: 0 });
    /// ```
    pub fn build(self) -> Result<BatchCounter> {
        let parallel_threshold = NonZeroUsize::new(self.parallel_threshold).ok_or(
            OverlapError::InvalidParallelThreshold {
                got: self.parallel_threshold,
            },
        )?;

        Ok(BatchCounter::new(parallel_threshold, self.execution_strategy))
    }
}
