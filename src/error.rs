//! Error types for sorting and configuration.

use std::error::Error as StdError;

use thiserror::Error;

/// Error returned by the fallible sort entry points.
///
/// `E` is the error type of the caller supplied key extractor. The infallible entry points use
/// [`std::convert::Infallible`] and never produce a `KeyExtraction`.
#[derive(Error, Debug)]
pub enum SortError<E: StdError + 'static> {
    /// The inclusive range does not satisfy `left <= right < len`.
    #[error("range [{left}, {right}] is invalid for a collection of length {len}")]
    InvalidRange {
        left: usize,
        right: usize,
        len: usize,
    },

    /// The merge point does not split the range into two non-empty runs.
    #[error("merge point {mid} does not split the range [{left}, {right}] into two runs")]
    InvalidMergePoint { left: usize, mid: usize, right: usize },

    /// The key extractor failed. The sort was aborted and the collection holds a permutation of
    /// its input that is not necessarily sorted.
    #[error("key extraction failed")]
    KeyExtraction(#[source] E),
}

impl<E: StdError + 'static> SortError<E> {
    pub fn is_key_extraction(&self) -> bool {
        matches!(self, SortError::KeyExtraction(_))
    }
}

/// Error type for building a [`crate::SortConfig`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("run size must be at least 1")]
    ZeroRunSize,

    #[error("invalid value '{value}' for environment variable {var}: expected a positive integer")]
    InvalidEnvValue { var: &'static str, value: String },
}
