//! Strategy configuration options.

use std::collections::HashMap;

use crate::error::ConfigurationError;

/// Option map passed to a strategy at construction (`name -> value`).
pub type ConfigOptions = HashMap<String, String>;

/// Parse a replication factor from its configuration string.
///
/// Empty strings and strings with any non-digit character are rejected, so
/// negative values fail the digit check rather than a range comparison.
/// Values too large for `usize` are rejected by the parse itself.
pub fn parse_replication_factor(text: &str) -> Result<usize, ConfigurationError> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigurationError::InvalidReplicationFactor {
            value: text.to_string(),
        });
    }
    text.parse::<usize>()
        .map_err(|_| ConfigurationError::InvalidReplicationFactor {
            value: text.to_string(),
        })
}

/// Validate a replication factor string, discarding the parsed value.
pub fn validate_replication_factor(text: &str) -> Result<(), ConfigurationError> {
    parse_replication_factor(text).map(|_| ())
}
