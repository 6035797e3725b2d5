//! Datacenter topology and snitches.
//!
//! `Topology` records which datacenter every endpoint belongs to, for
//! topology-aware replica placement. A `Snitch` answers the same question
//! from the deployment's point of view (static tables, config files, cloud
//! metadata); the ring's `Topology` is maintained from whatever source the
//! snitch reads.

use std::collections::{HashMap, HashSet};

use crate::endpoint::Endpoint;

/// Default datacenter name used when a deployment has no real topology.
pub const DEFAULT_DATACENTER: &str = "datacenter1";

/// Datacenter membership for the cluster.
#[derive(Clone, Debug, Default)]
pub struct Topology {
    dc_endpoints: HashMap<String, HashSet<Endpoint>>,
    endpoint_dc: HashMap<Endpoint, String>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `endpoint` as a member of `datacenter`, moving it if it was
    /// registered elsewhere.
    pub fn add_endpoint(&mut self, endpoint: Endpoint, datacenter: impl Into<String>) {
        let datacenter = datacenter.into();
        self.remove_endpoint(&endpoint);
        self.dc_endpoints
            .entry(datacenter.clone())
            .or_default()
            .insert(endpoint);
        self.endpoint_dc.insert(endpoint, datacenter);
    }

    /// Forget `endpoint` entirely. Empty datacenters are dropped.
    pub fn remove_endpoint(&mut self, endpoint: &Endpoint) {
        if let Some(dc) = self.endpoint_dc.remove(endpoint) {
            if let Some(members) = self.dc_endpoints.get_mut(&dc) {
                members.remove(endpoint);
                if members.is_empty() {
                    self.dc_endpoints.remove(&dc);
                }
            }
        }
    }

    /// Datacenter of `endpoint`, if registered.
    pub fn datacenter_of(&self, endpoint: &Endpoint) -> Option<&str> {
        self.endpoint_dc.get(endpoint).map(String::as_str)
    }

    /// Mapping from datacenter name to its member endpoints.
    pub fn datacenter_endpoints(&self) -> &HashMap<String, HashSet<Endpoint>> {
        &self.dc_endpoints
    }
}

/// Maps an endpoint to the datacenter it lives in.
///
/// Snitches are stateless from the caller's perspective and must be
/// shareable across threads.
pub trait Snitch: Send + Sync {
    /// Datacenter name for `endpoint`.
    fn datacenter_of(&self, endpoint: &Endpoint) -> String;

    /// Name of this snitch (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Snitch that places every endpoint in one fixed datacenter.
#[derive(Clone, Debug)]
pub struct SimpleSnitch {
    datacenter: String,
}

impl SimpleSnitch {
    pub fn new() -> Self {
        Self {
            datacenter: DEFAULT_DATACENTER.to_string(),
        }
    }

    pub fn with_datacenter(datacenter: impl Into<String>) -> Self {
        Self {
            datacenter: datacenter.into(),
        }
    }
}

impl Default for SimpleSnitch {
    fn default() -> Self {
        Self::new()
    }
}

impl Snitch for SimpleSnitch {
    fn datacenter_of(&self, _endpoint: &Endpoint) -> String {
        self.datacenter.clone()
    }

    fn name(&self) -> &'static str {
        "SimpleSnitch"
    }
}

/// Snitch backed by an explicit endpoint table, with a fallback datacenter
/// for endpoints the table does not mention.
#[derive(Clone, Debug)]
pub struct StaticSnitch {
    datacenters: HashMap<Endpoint, String>,
    default: String,
}

impl StaticSnitch {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            datacenters: HashMap::new(),
            default: default.into(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint, datacenter: impl Into<String>) -> Self {
        self.datacenters.insert(endpoint, datacenter.into());
        self
    }
}

impl Snitch for StaticSnitch {
    fn datacenter_of(&self, endpoint: &Endpoint) -> String {
        self.datacenters
            .get(endpoint)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }

    fn name(&self) -> &'static str {
        "StaticSnitch"
    }
}
