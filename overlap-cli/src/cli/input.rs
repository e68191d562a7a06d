//! Parsing of comma-separated integer sets.

use std::{num::ParseIntError, str::FromStr};

use thiserror::Error;

/// Integer set given on the command line or on one line of a candidates
/// file, e.g. `1,2,3`. An empty string is the empty set.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeySet(Vec<i64>);

impl KeySet {
    /// Wraps already-parsed values.
    #[must_use]
    pub const fn new(values: Vec<i64>) -> Self {
        Self(values)
    }

    /// Returns the parsed values in input order.
    #[must_use]
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    /// Consumes the set, returning its values.
    #[must_use]
    pub fn into_inner(self) -> Vec<i64> {
        self.0
    }
}

/// Raised when a set contains a token that is not an integer.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseSetError {
    /// A comma-separated token failed to parse as `i64`.
    #[error("token {position} (`{token}`) is not an integer: {source}")]
    InvalidInteger {
        /// Zero-based position of the token within the set.
        position: usize,
        /// Offending token, trimmed.
        token: String,
        /// Underlying parse failure.
        #[source]
        source: ParseIntError,
    },
}

impl FromStr for KeySet {
    type Err = ParseSetError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        trimmed
            .split(',')
            .map(str::trim)
            .enumerate()
            .map(|(position, token)| {
                token
                    .parse::<i64>()
                    .map_err(|source| ParseSetError::InvalidInteger {
                        position,
                        token: token.to_owned(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}
