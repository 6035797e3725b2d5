//! Simple replication strategy.
//!
//! Places RF replicas sequentially around the ring, clockwise from the
//! owning token. Works well for single-datacenter deployments where network
//! topology doesn't matter; replicas may land in the same failure domain.
//!
//! # Algorithm
//!
//! 1. Walk the ring in token order starting at the owning token
//! 2. Collect each distinct endpoint encountered
//! 3. Stop after RF endpoints (or after one full lap of the ring)

use corelib::{Endpoint, Token, TokenMetadata};

use crate::error::ConfigurationError;
use crate::options::{parse_replication_factor, validate_replication_factor, ConfigOptions};
use crate::strategy::ReplicationStrategy;

/// The single option key `SimpleStrategy` understands.
pub const REPLICATION_FACTOR: &str = "replication_factor";

/// Simple replication strategy: RF replicas placed sequentially around the
/// ring.
#[derive(Debug, Clone)]
pub struct SimpleStrategy {
    replication_factor: usize,
    options: ConfigOptions,
}

impl SimpleStrategy {
    /// Create a strategy with the given replication factor.
    pub fn new(replication_factor: usize) -> Self {
        let mut options = ConfigOptions::new();
        options.insert(REPLICATION_FACTOR.to_string(), replication_factor.to_string());
        Self {
            replication_factor,
            options,
        }
    }

    /// Build from a config-option map; `replication_factor` is required and
    /// must be a non-negative integer.
    pub fn from_options(options: &ConfigOptions) -> Result<Self, ConfigurationError> {
        let rf = options
            .get(REPLICATION_FACTOR)
            .ok_or_else(|| ConfigurationError::MissingOption {
                key: REPLICATION_FACTOR.to_string(),
                strategy: "SimpleStrategy".to_string(),
            })?;
        Ok(Self {
            replication_factor: parse_replication_factor(rf)?,
            options: options.clone(),
        })
    }
}

impl ReplicationStrategy for SimpleStrategy {
    fn calculate_natural_endpoints(
        &self,
        token: Token,
        metadata: &TokenMetadata,
    ) -> Vec<Endpoint> {
        if self.replication_factor == 0 {
            return Vec::new();
        }
        let mut endpoints = Vec::with_capacity(self.replication_factor);
        for (_token, owner) in metadata.ring_range(token) {
            if !endpoints.contains(&owner) {
                endpoints.push(owner);
                if endpoints.len() == self.replication_factor {
                    break;
                }
            }
        }
        endpoints
    }

    fn replication_factor(&self) -> usize {
        self.replication_factor
    }

    fn recognized_options(&self) -> Option<&'static [&'static str]> {
        Some(&[REPLICATION_FACTOR])
    }

    fn validate_options(&self) -> Result<(), ConfigurationError> {
        match self.options.get(REPLICATION_FACTOR) {
            Some(rf) => validate_replication_factor(rf),
            None => Err(ConfigurationError::MissingOption {
                key: REPLICATION_FACTOR.to_string(),
                strategy: "SimpleStrategy".to_string(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }
}
