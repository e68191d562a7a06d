//! Benchmark parameter types used as Criterion benchmark ids.

use std::fmt;

use overlap_core::ExecutionStrategy;

/// Parameters for a pairwise scan benchmark.
#[derive(Clone, Copy, Debug)]
pub struct PairBenchParams {
    /// Length of each sorted set.
    pub len: usize,
    /// Number of keys present in both sets.
    pub shared: usize,
}

impl fmt::Display for PairBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},shared={}", self.len, self.shared)
    }
}

/// Parameters for a batch benchmark.
#[derive(Clone, Copy, Debug)]
pub struct BatchBenchParams {
    /// Number of candidate sets scored per iteration.
    pub candidates: usize,
    /// Execution strategy under test.
    pub strategy: ExecutionStrategy,
}

impl fmt::Display for BatchBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "candidates={},strategy={:?}", self.candidates, self.strategy)
    }
}
