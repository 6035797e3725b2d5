//! Error types for replication configuration.
//!
//! There is a single taxonomy: configuration mistakes, detected eagerly at
//! strategy construction or validation time. Placement and range queries
//! have no recoverable error paths; a malformed ring is a precondition
//! violation, not an error to report.

use thiserror::Error;

/// Result type alias for strategy construction and validation.
pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// A static configuration mistake. Never raised mid-query and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The requested strategy class is not registered.
    #[error("Unknown replication strategy class '{name}'")]
    UnknownStrategy { name: String },

    /// An option key is outside the strategy's recognized set.
    #[error("Unrecognized strategy option {{{key}}} passed to {strategy} for keyspace {keyspace}")]
    UnrecognizedOption {
        key: String,
        strategy: String,
        keyspace: String,
    },

    /// A required option is missing from the option map.
    #[error("Missing required option '{key}' for {strategy}")]
    MissingOption { key: String, strategy: String },

    /// A replication factor string failed to parse.
    #[error("Replication factor must be numeric and non-negative, found '{value}'")]
    InvalidReplicationFactor { value: String },
}
