//! Version-stamped endpoint cache.

use std::collections::HashMap;

use corelib::{Endpoint, RingVersion, Token};
use tracing::debug;

/// Memoized placement results, keyed by owning token.
///
/// Every entry was computed under `ring_version`; a version mismatch
/// invalidates the whole map, never individual entries. Invalidation is
/// lazy: it happens on the next read, not when the ring mutates. Growth is
/// unbounded between version changes (one entry per distinct owning token
/// queried).
#[derive(Debug, Default)]
pub(crate) struct EndpointCache {
    endpoints: HashMap<Token, Vec<Endpoint>>,
    ring_version: RingVersion,
    hits: u64,
}

impl EndpointCache {
    /// Cached endpoint list for `key_token`, returned by value, after
    /// discarding every entry if `current` differs from the stamped version.
    pub(crate) fn get(&mut self, current: RingVersion, key_token: Token) -> Option<Vec<Endpoint>> {
        if self.ring_version != current {
            debug!(
                from = self.ring_version.0,
                to = current.0,
                entries = self.endpoints.len(),
                "ring version changed, invalidating endpoint cache"
            );
            self.endpoints.clear();
            self.ring_version = current;
        }
        let cached = self.endpoints.get(&key_token).cloned();
        if cached.is_some() {
            self.hits += 1;
        }
        cached
    }

    /// Record the placement result for `key_token` under the version set by
    /// the preceding `get`.
    pub(crate) fn insert(&mut self, key_token: Token, endpoints: Vec<Endpoint>) {
        self.endpoints.insert(key_token, endpoints);
    }

    /// Number of cache hits served so far (observability only).
    pub(crate) fn hits(&self) -> u64 {
        self.hits
    }
}
