//! Local-only strategy.
//!
//! Always returns the fixed local endpoint regardless of ring state. Used
//! for node-local system data that must never replicate.

use corelib::{Endpoint, Token, TokenMetadata};

use crate::error::ConfigurationError;
use crate::strategy::ReplicationStrategy;

/// Strategy that keeps every replica on the local node.
#[derive(Debug, Clone)]
pub struct LocalStrategy {
    local: Endpoint,
}

impl LocalStrategy {
    pub fn new(local: Endpoint) -> Self {
        Self { local }
    }
}

impl ReplicationStrategy for LocalStrategy {
    fn calculate_natural_endpoints(
        &self,
        _token: Token,
        _metadata: &TokenMetadata,
    ) -> Vec<Endpoint> {
        vec![self.local]
    }

    fn replication_factor(&self) -> usize {
        1
    }

    fn recognized_options(&self) -> Option<&'static [&'static str]> {
        // Takes no options at all.
        Some(&[])
    }

    fn validate_options(&self) -> Result<(), ConfigurationError> {
        Ok(())
    }

    fn allow_remove_node_being_replaced_from_natural_endpoints(&self) -> bool {
        // The local node never appears in pending endpoints, so filtering it
        // out while it is being replaced would leave no replicas at all.
        false
    }

    fn name(&self) -> &'static str {
        "LocalStrategy"
    }
}
