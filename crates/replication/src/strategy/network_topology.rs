//! Datacenter-aware replication strategy.
//!
//! Takes one option per datacenter (`datacenter name -> replica count`) and
//! places that many replicas on distinct nodes of each datacenter, walking
//! the ring in token order. A datacenter with no configured count takes no
//! replicas; endpoints missing from the topology are skipped.

use std::collections::HashMap;

use corelib::{Endpoint, Token, TokenMetadata};

use crate::error::ConfigurationError;
use crate::options::{parse_replication_factor, validate_replication_factor, ConfigOptions};
use crate::strategy::ReplicationStrategy;

/// Replication strategy with per-datacenter replica counts.
#[derive(Debug, Clone)]
pub struct NetworkTopologyStrategy {
    dc_replication: HashMap<String, usize>,
    options: ConfigOptions,
}

impl NetworkTopologyStrategy {
    /// Create a strategy from explicit per-datacenter replica counts.
    pub fn new(dc_replication: impl IntoIterator<Item = (String, usize)>) -> Self {
        let dc_replication: HashMap<String, usize> = dc_replication.into_iter().collect();
        let options = dc_replication
            .iter()
            .map(|(dc, rf)| (dc.clone(), rf.to_string()))
            .collect();
        Self {
            dc_replication,
            options,
        }
    }

    /// Build from a config-option map where every key is a datacenter name
    /// and every value a replica count.
    pub fn from_options(options: &ConfigOptions) -> Result<Self, ConfigurationError> {
        let mut dc_replication = HashMap::with_capacity(options.len());
        for (dc, rf) in options {
            dc_replication.insert(dc.clone(), parse_replication_factor(rf)?);
        }
        Ok(Self {
            dc_replication,
            options: options.clone(),
        })
    }

    /// Configured replica count for `datacenter` (zero when unconfigured).
    pub fn replication_factor_for(&self, datacenter: &str) -> usize {
        self.dc_replication.get(datacenter).copied().unwrap_or(0)
    }
}

impl ReplicationStrategy for NetworkTopologyStrategy {
    fn calculate_natural_endpoints(
        &self,
        token: Token,
        metadata: &TokenMetadata,
    ) -> Vec<Endpoint> {
        let want = self.replication_factor();
        if want == 0 {
            return Vec::new();
        }
        let topology = metadata.topology();
        let mut endpoints = Vec::with_capacity(want);
        let mut placed: HashMap<&str, usize> = HashMap::new();
        for (_token, owner) in metadata.ring_range(token) {
            if endpoints.len() == want {
                break;
            }
            let Some(dc) = topology.datacenter_of(&owner) else {
                continue;
            };
            let quota = self.replication_factor_for(dc);
            let count = placed.entry(dc).or_insert(0);
            if *count >= quota || endpoints.contains(&owner) {
                continue;
            }
            endpoints.push(owner);
            *count += 1;
        }
        endpoints
    }

    fn replication_factor(&self) -> usize {
        self.dc_replication.values().sum()
    }

    fn recognized_options(&self) -> Option<&'static [&'static str]> {
        // Option keys are datacenter names; the set is open-ended.
        None
    }

    fn validate_options(&self) -> Result<(), ConfigurationError> {
        for rf in self.options.values() {
            validate_replication_factor(rf)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "NetworkTopologyStrategy"
    }
}
