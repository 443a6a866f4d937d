//! Error types for Allocation Ordering

use thiserror::Error;

/// Errors raised while validating a block's allocation ordering.
///
/// Every variant means the block's ordering is invalid and the block must
/// be rejected by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    /// Sender/receiver graph contains a cycle
    #[error("Allocation graph is not acyclic: {remaining} vertices left unsorted")]
    NotAcyclic { remaining: usize },

    /// Reconstructed sequence lost or duplicated a transaction
    #[error("Sorted block transaction count {actual} does not match unsorted count {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl OrderingError {
    /// True for outcomes that invalidate the block ordering
    pub fn is_ordering_invalid(&self) -> bool {
        matches!(
            self,
            OrderingError::NotAcyclic { .. } | OrderingError::LengthMismatch { .. }
        )
    }
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: String, value: String },
}
