//! Natural-endpoint lookup and range queries over a bound strategy.
//!
//! `ReplicaLocator` wraps a placement oracle with the version-aware endpoint
//! cache and the token-range query engine consumed by storage routing and
//! cluster management. Ring state is passed into every query as a borrowed
//! snapshot; the caller must keep it consistent for the duration of the
//! call.

use std::collections::HashMap;
use std::sync::Arc;

use corelib::range::insert_unwrapping;
use corelib::{Endpoint, Snitch, Token, TokenMetadata, TokenRange};
use parking_lot::Mutex;
use tracing::debug;

use crate::cache::EndpointCache;
use crate::strategy::ReplicationStrategy;

/// A replication strategy bound to a keyspace and a snitch, with memoized
/// endpoint lookup.
pub struct ReplicaLocator {
    keyspace: String,
    strategy: Box<dyn ReplicationStrategy>,
    snitch: Arc<dyn Snitch>,
    cache: Mutex<EndpointCache>,
}

impl std::fmt::Debug for ReplicaLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplicaLocator")
            .field("keyspace", &self.keyspace)
            .field("strategy", &self.strategy.name())
            .finish_non_exhaustive()
    }
}

impl ReplicaLocator {
    pub fn new(
        keyspace: impl Into<String>,
        strategy: Box<dyn ReplicationStrategy>,
        snitch: Arc<dyn Snitch>,
    ) -> Self {
        Self {
            keyspace: keyspace.into(),
            strategy,
            snitch,
            cache: Mutex::new(EndpointCache::default()),
        }
    }

    /// Keyspace this locator serves.
    pub fn keyspace(&self) -> &str {
        &self.keyspace
    }

    /// The underlying placement oracle.
    pub fn strategy(&self) -> &dyn ReplicationStrategy {
        self.strategy.as_ref()
    }

    /// Number of endpoint-cache hits served so far (observability only).
    pub fn cache_hits(&self) -> u64 {
        self.cache.lock().hits()
    }

    /// Ordered replicas for the data owning `token`, primary first.
    ///
    /// Results are memoized per owning token, so every token inside one
    /// owned range shares a single cache entry. The whole cache is dropped
    /// when the ring version moves; the check happens lazily here, not when
    /// the ring mutates.
    pub fn natural_endpoints(&self, token: Token, metadata: &TokenMetadata) -> Vec<Endpoint> {
        let key_token = metadata.first_token(token);
        let mut cache = self.cache.lock();
        if let Some(cached) = cache.get(metadata.ring_version(), key_token) {
            return cached;
        }
        let endpoints = self.strategy.calculate_natural_endpoints(token, metadata);
        cache.insert(key_token, endpoints.clone());
        endpoints
    }

    /// Like [`Self::natural_endpoints`], minus any endpoint currently being
    /// replaced.
    ///
    /// A node being replaced still takes writes through the pending-endpoint
    /// path, but it must not count toward consistency-level accounting, so
    /// it is filtered out here. Strategies whose placement is a fixed local
    /// endpoint opt out via the capability flag; filtering would empty
    /// their result.
    pub fn natural_endpoints_without_node_being_replaced(
        &self,
        token: Token,
        metadata: &TokenMetadata,
    ) -> Vec<Endpoint> {
        let mut endpoints = self.natural_endpoints(token, metadata);
        if metadata.is_any_node_being_replaced()
            && self
                .strategy
                .allow_remove_node_being_replaced_from_natural_endpoints()
        {
            endpoints.retain(|ep| !metadata.is_being_replaced(ep));
        }
        endpoints
    }

    /// Every range for which `endpoint` holds any replica.
    pub fn ranges(&self, endpoint: Endpoint, metadata: &TokenMetadata) -> Vec<TokenRange> {
        let mut ret = Vec::new();
        let mut prev = last_token(metadata);
        for &token in metadata.sorted_tokens() {
            let endpoints = self.strategy.calculate_natural_endpoints(token, metadata);
            if endpoints.contains(&endpoint) {
                insert_unwrapping(prev, token, &mut ret);
            }
            prev = token;
        }
        ret
    }

    /// Ranges for which `endpoint` is the first-listed (primary) replica.
    pub fn primary_ranges(&self, endpoint: Endpoint, metadata: &TokenMetadata) -> Vec<TokenRange> {
        let mut ret = Vec::new();
        let mut prev = last_token(metadata);
        for &token in metadata.sorted_tokens() {
            let endpoints = self.strategy.calculate_natural_endpoints(token, metadata);
            if endpoints.first() == Some(&endpoint) {
                insert_unwrapping(prev, token, &mut ret);
            }
            prev = token;
        }
        ret
    }

    /// Ranges for which `endpoint` is the first replica *among the nodes of
    /// its own datacenter*.
    ///
    /// Unlike [`Self::primary_ranges`], which checks whether the endpoint is
    /// the globally first owner of a range, this checks whether it is first
    /// just among nodes of its local datacenter; a datacenter's first local
    /// replica need not be the globally first replica.
    pub fn primary_ranges_within_dc(
        &self,
        endpoint: Endpoint,
        metadata: &TokenMetadata,
    ) -> Vec<TokenRange> {
        let local_dc = self.snitch.datacenter_of(&endpoint);
        let local_nodes = metadata
            .topology()
            .datacenter_endpoints()
            .get(&local_dc)
            .expect("local datacenter missing from ring topology");
        let mut ret = Vec::new();
        let mut prev = last_token(metadata);
        for &token in metadata.sorted_tokens() {
            let endpoints = self.strategy.calculate_natural_endpoints(token, metadata);
            if let Some(first_local) = endpoints.iter().find(|ep| local_nodes.contains(*ep)) {
                if *first_local == endpoint {
                    insert_unwrapping(prev, token, &mut ret);
                }
            }
            prev = token;
        }
        ret
    }

    /// Every range each endpoint replicates, one range per distinct ring
    /// token (unmerged, unlike [`Self::ranges`]).
    pub fn address_ranges(&self, metadata: &TokenMetadata) -> HashMap<Endpoint, Vec<TokenRange>> {
        let mut ret: HashMap<Endpoint, Vec<TokenRange>> = HashMap::new();
        for &token in metadata.sorted_tokens() {
            let ranges = metadata.primary_range_for(token);
            let endpoints = self.strategy.calculate_natural_endpoints(token, metadata);
            debug!(token = %token, ranges = ?ranges, endpoints = ?endpoints, "address range walk");
            for endpoint in endpoints {
                ret.entry(endpoint).or_default().extend(ranges.iter().copied());
            }
        }
        ret
    }

    /// Dual of [`Self::address_ranges`]: each per-token primary range mapped
    /// to the endpoints replicating it.
    pub fn range_addresses(&self, metadata: &TokenMetadata) -> HashMap<TokenRange, Vec<Endpoint>> {
        let mut ret = HashMap::new();
        for &token in metadata.sorted_tokens() {
            let endpoints = self.strategy.calculate_natural_endpoints(token, metadata);
            for range in metadata.primary_range_for(token) {
                ret.insert(range, endpoints.clone());
            }
        }
        ret
    }

    /// Predict the ranges `pending_address` will replicate once
    /// `pending_tokens` join the ring.
    ///
    /// Simulates the join on a clone of the token map and recomputes the
    /// address ranges there; the live ring is untouched. Used to plan
    /// streaming for bootstrapping and replacing nodes.
    pub fn pending_address_ranges(
        &self,
        metadata: &TokenMetadata,
        pending_tokens: &[Token],
        pending_address: Endpoint,
    ) -> Vec<TokenRange> {
        let mut sim = metadata.clone_only_token_map();
        sim.update_normal_tokens(pending_tokens.iter().copied(), pending_address);
        self.address_ranges(&sim)
            .remove(&pending_address)
            .unwrap_or_default()
    }
}

fn last_token(metadata: &TokenMetadata) -> Token {
    *metadata
        .sorted_tokens()
        .last()
        .expect("range query on an empty token ring")
}
