//! Seeded generators for sorted feature-hash sets.
//!
//! Keys grow by random gaps so every generated set is strictly ascending,
//! which makes the overlap between two sets exactly the number of keys
//! assigned to both.

use std::iter;

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};
use thiserror::Error;

/// Largest gap drawn between consecutive keys.
const MAX_GAP: i32 = 8;

/// Errors raised while generating synthetic sets.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SyntheticError {
    /// More shared keys were requested than either set can hold.
    #[error("shared key count {shared} exceeds set length {len}")]
    SharedExceedsLength {
        /// Requested shared keys.
        shared: usize,
        /// Length of each set.
        len: usize,
    },
    /// Accumulated gaps overflowed the key type.
    #[error("generated keys exceed the i32 range")]
    KeyOverflow,
}

/// Configuration for [`SortedPair::generate`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PairConfig {
    /// Length of each set.
    pub len: usize,
    /// Keys present in both sets.
    pub shared: usize,
    /// Seed for the random number generator.
    pub seed: u64,
}

/// Two strictly ascending sets of equal length with a known overlap.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortedPair {
    /// First set.
    pub left: Vec<i32>,
    /// Second set.
    pub right: Vec<i32>,
    /// Number of keys the sets share.
    pub shared: usize,
}

#[derive(Clone, Copy)]
enum Owner {
    Both,
    Left,
    Right,
}

impl SortedPair {
    /// Generates a pair whose intersection count is exactly `config.shared`.
    ///
    /// # Errors
    /// Returns [`SyntheticError::SharedExceedsLength`] when `shared > len`
    /// and [`SyntheticError::KeyOverflow`] when the keys outgrow `i32`.
    pub fn generate(config: &PairConfig) -> Result<Self, SyntheticError> {
        let PairConfig { len, shared, seed } = *config;
        if shared > len {
            return Err(SyntheticError::SharedExceedsLength { shared, len });
        }
        let exclusive = len - shared;

        let mut rng = SmallRng::seed_from_u64(seed);
        let mut owners: Vec<Owner> = iter::repeat_n(Owner::Both, shared)
            .chain(iter::repeat_n(Owner::Left, exclusive))
            .chain(iter::repeat_n(Owner::Right, exclusive))
            .collect();
        owners.shuffle(&mut rng);

        let mut left = Vec::with_capacity(len);
        let mut right = Vec::with_capacity(len);
        let mut key = 0_i32;
        for owner in owners {
            key = next_key(&mut rng, key)?;
            match owner {
                Owner::Both => {
                    left.push(key);
                    right.push(key);
                }
                Owner::Left => left.push(key),
                Owner::Right => right.push(key),
            }
        }

        Ok(Self {
            left,
            right,
            shared,
        })
    }
}

/// Configuration for [`BatchFixture::generate`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BatchConfig {
    /// Length of the query set.
    pub query_len: usize,
    /// Number of candidate sets.
    pub candidates: usize,
    /// Length of each candidate set.
    pub candidate_len: usize,
    /// Seed for the random number generator.
    pub seed: u64,
}

/// A query set and candidates drawn from the same key range.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchFixture {
    /// Strictly ascending query keys.
    pub query: Vec<i32>,
    /// Ascending candidate sets; duplicates may occur.
    pub candidates: Vec<Vec<i32>>,
}

impl BatchFixture {
    /// Generates a query and candidates overlapping it at random.
    ///
    /// # Errors
    /// Returns [`SyntheticError::KeyOverflow`] when the keys outgrow `i32`.
    pub fn generate(config: &BatchConfig) -> Result<Self, SyntheticError> {
        let mut rng = SmallRng::seed_from_u64(config.seed);

        let mut query = Vec::with_capacity(config.query_len);
        let mut key = 0_i32;
        for _ in 0..config.query_len {
            key = next_key(&mut rng, key)?;
            query.push(key);
        }

        let candidates = (0..config.candidates)
            .map(|_| {
                let mut set: Vec<i32> = (0..config.candidate_len)
                    .map(|_| rng.gen_range(0..=key))
                    .collect();
                set.sort_unstable();
                set
            })
            .collect();

        Ok(Self { query, candidates })
    }
}

fn next_key(rng: &mut SmallRng, previous: i32) -> Result<i32, SyntheticError> {
    previous
        .checked_add(rng.gen_range(1..=MAX_GAP))
        .ok_or(SyntheticError::KeyOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    use overlap_core::{first_descent, sorted_intersection_count};
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(16, 0)]
    #[case(16, 5)]
    #[case(1_000, 1_000)]
    fn pair_has_requested_overlap(#[case] len: usize, #[case] shared: usize) {
        let pair = SortedPair::generate(&PairConfig {
            len,
            shared,
            seed: 7,
        })
        .expect("generation should succeed");
        assert_eq!(pair.left.len(), len);
        assert_eq!(pair.right.len(), len);
        assert_eq!(first_descent(&pair.left), None);
        assert_eq!(first_descent(&pair.right), None);
        assert_eq!(sorted_intersection_count(&pair.left, &pair.right), shared);
    }

    #[test]
    fn pair_generation_is_seeded() {
        let config = PairConfig {
            len: 64,
            shared: 10,
            seed: 42,
        };
        let first = SortedPair::generate(&config).expect("first generation should succeed");
        let second = SortedPair::generate(&config).expect("second generation should succeed");
        assert_eq!(first, second);
    }

    #[test]
    fn pair_rejects_excess_shared_keys() {
        let err = SortedPair::generate(&PairConfig {
            len: 4,
            shared: 5,
            seed: 1,
        })
        .expect_err("shared > len must fail");
        assert_eq!(err, SyntheticError::SharedExceedsLength { shared: 5, len: 4 });
    }

    #[test]
    fn batch_fixture_produces_sorted_candidates() {
        let fixture = BatchFixture::generate(&BatchConfig {
            query_len: 32,
            candidates: 12,
            candidate_len: 20,
            seed: 3,
        })
        .expect("generation should succeed");
        assert_eq!(fixture.query.len(), 32);
        assert_eq!(fixture.candidates.len(), 12);
        assert!(
            fixture
                .candidates
                .iter()
                .all(|set| set.len() == 20 && first_descent(set).is_none())
        );
    }
}
