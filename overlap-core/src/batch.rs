//! Scores one query set against many candidate sets.
//!
//! Nearest-neighbour scoring compares a single query against every
//! candidate a search touches. [`BatchCounter`] runs the merge scan for each
//! candidate, on the calling thread or across the rayon pool, and can write
//! into a caller-owned buffer so steady-state scoring allocates nothing.

use std::num::NonZeroUsize;

use tracing::{debug, instrument};

use crate::{
    Result,
    builder::ExecutionStrategy,
    error::OverlapError,
    intersection::sorted_intersection_count,
    key::SortKey,
};

/// Backend selected for a single batch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Backend {
    Sequential,
    #[cfg(feature = "cpu")]
    Parallel,
}

/// Runs [`crate::sorted_intersection_count`] for a query against a batch of
/// candidates.
///
/// Every candidate, like the query, must already be sorted ascending; the
/// counter does not check.
///
/// # Examples
/// ```
/// use overlap_core::BatchCounterBuilder;
///
/// let counter = BatchCounterBuilder::new().build()?;
/// let candidates = [vec![1, 2, 3], vec![], vec![3, 4, 5]];
/// let counts = counter.count_all(&[2, 3, 4], &candidates)?;
/// assert_eq!(counts, [2, 0, 2]);
/// # Ok::<(), overlap_core::OverlapError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BatchCounter {
    parallel_threshold: NonZeroUsize,
    execution_strategy: ExecutionStrategy,
}

impl BatchCounter {
    pub(crate) const fn new(
        parallel_threshold: NonZeroUsize,
        execution_strategy: ExecutionStrategy,
    ) -> Self {
        Self {
            parallel_threshold,
            execution_strategy,
        }
    }

    /// Returns the candidate count at which `Auto` goes parallel.
    #[must_use]
    pub const fn parallel_threshold(&self) -> NonZeroUsize {
        self.parallel_threshold
    }

    /// Returns the execution strategy used when counting.
    #[must_use]
    pub const fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Counts the overlap between `query` and every candidate.
    ///
    /// Element `i` of the result equals
    /// `sorted_intersection_count(query, candidates[i])`.
    ///
    /// # Errors
    /// Returns [`OverlapError::BackendUnavailable`] when
    /// [`ExecutionStrategy::Parallel`] is requested without the `cpu`
    /// feature.
    #[instrument(
        name = "core.count_all",
        err,
        skip(self, query, candidates),
        fields(
            query_len = query.len(),
            candidates = candidates.len(),
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn count_all<K, C>(&self, query: &[K], candidates: &[C]) -> Result<Vec<usize>>
    where
        K: SortKey,
        C: AsRef<[K]> + Sync,
    {
        let backend = self.resolve(candidates.len())?;
        let mut counts = vec![0; candidates.len()];
        fill(backend, query, candidates, &mut counts);
        debug!(backend = ?backend, "batch intersection counts computed");
        Ok(counts)
    }

    /// Writes the overlap between `query` and every candidate into `out`.
    ///
    /// # Errors
    /// Returns [`OverlapError::OutputLengthMismatch`] when `out` and
    /// `candidates` differ in length, and [`OverlapError::BackendUnavailable`]
    /// when [`ExecutionStrategy::Parallel`] is requested without the `cpu`
    /// feature.
    ///
    /// # Examples
    /// ```
    /// use overlap_core::BatchCounterBuilder;
    ///
    /// let counter = BatchCounterBuilder::new().build()?;
    /// let candidates: [&[u32]; 2] = [&[1, 2], &[2, 9]];
    /// let mut out = [0; 2];
    /// counter.count_into(&[2_u32, 9], &candidates, &mut out)?;
    /// assert_eq!(out, [1, 2]);
    /// # Ok::<(), overlap_core::OverlapError>(())
    /// ```
    #[instrument(
        name = "core.count_into",
        err,
        skip(self, query, candidates, out),
        fields(
            query_len = query.len(),
            candidates = candidates.len(),
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn count_into<K, C>(&self, query: &[K], candidates: &[C], out: &mut [usize]) -> Result<()>
    where
        K: SortKey,
        C: AsRef<[K]> + Sync,
    {
        if out.len() != candidates.len() {
            return Err(OverlapError::OutputLengthMismatch {
                out: out.len(),
                expected: candidates.len(),
            });
        }
        let backend = self.resolve(candidates.len())?;
        fill(backend, query, candidates, out);
        debug!(backend = ?backend, "batch intersection counts computed");
        Ok(())
    }

    fn resolve(&self, candidates: usize) -> Result<Backend> {
        match self.execution_strategy {
            ExecutionStrategy::Sequential => Ok(Backend::Sequential),
            #[cfg(feature = "cpu")]
            ExecutionStrategy::Parallel => Ok(Backend::Parallel),
            #[cfg(not(feature = "cpu"))]
            ExecutionStrategy::Parallel => Err(OverlapError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            }),
            #[cfg(feature = "cpu")]
            ExecutionStrategy::Auto if candidates >= self.parallel_threshold.get() => {
                Ok(Backend::Parallel)
            }
            #[cfg(feature = "cpu")]
            ExecutionStrategy::Auto => Ok(Backend::Sequential),
            #[cfg(not(feature = "cpu"))]
            ExecutionStrategy::Auto => {
                let _ = candidates;
                Ok(Backend::Sequential)
            }
        }
    }
}

fn fill<K, C>(backend: Backend, query: &[K], candidates: &[C], out: &mut [usize])
where
    K: SortKey,
    C: AsRef<[K]> + Sync,
{
    match backend {
        Backend::Sequential => {
            for (slot, candidate) in out.iter_mut().zip(candidates) {
                *slot = sorted_intersection_count(query, candidate.as_ref());
            }
        }
        #[cfg(feature = "cpu")]
        Backend::Parallel => {
            use rayon::prelude::*;

            out.par_iter_mut()
                .zip(candidates.par_iter())
                .for_each(|(slot, candidate)| {
                    *slot = sorted_intersection_count(query, candidate.as_ref());
                });
        }
    }
}
