//! Mutable ring state: token ownership, versioning, replacement tracking.
//!
//! `TokenMetadata` is the view of the ring that placement strategies and the
//! range-query engine consume. Mutations go through `&mut self`; queries
//! assume the caller holds a consistent snapshot for the duration of the
//! call. The ring version moves on every token-ownership change and drives
//! cache invalidation downstream.

use std::collections::{BTreeMap, HashSet};

use crate::endpoint::Endpoint;
use crate::range::{insert_unwrapping, TokenRange};
use crate::token::Token;
use crate::topology::Topology;

/// Monotonically increasing counter, bumped whenever the ring's
/// token-ownership changes.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct RingVersion(pub u64);

impl RingVersion {
    fn bump(&mut self) {
        self.0 += 1;
    }
}

/// Token ownership for the whole cluster.
///
/// Holds the sorted token ring, the datacenter topology, and the set of
/// endpoints currently being replaced by another node. Cloning the token map
/// (`clone_only_token_map`) supports what-if simulation of topology changes
/// without touching the live ring.
#[derive(Clone, Debug, Default)]
pub struct TokenMetadata {
    ring: BTreeMap<Token, Endpoint>,
    sorted_tokens: Vec<Token>,
    version: RingVersion,
    topology: Topology,
    replacing: HashSet<Endpoint>,
}

impl TokenMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `tokens` to `endpoint` as normal (non-pending) tokens,
    /// overwriting any previous owners, and bump the ring version.
    pub fn update_normal_tokens(
        &mut self,
        tokens: impl IntoIterator<Item = Token>,
        endpoint: Endpoint,
    ) {
        for token in tokens {
            self.ring.insert(token, endpoint);
        }
        self.rebuild_sorted_tokens();
        self.version.bump();
    }

    /// Drop every token owned by `endpoint`. The ring version moves only if
    /// ownership actually changed.
    pub fn remove_endpoint(&mut self, endpoint: &Endpoint) {
        let before = self.ring.len();
        self.ring.retain(|_, owner| owner != endpoint);
        if self.ring.len() != before {
            self.rebuild_sorted_tokens();
            self.version.bump();
        }
    }

    /// All ring tokens in sorted order.
    pub fn sorted_tokens(&self) -> &[Token] {
        &self.sorted_tokens
    }

    /// Number of tokens on the ring.
    pub fn token_count(&self) -> usize {
        self.sorted_tokens.len()
    }

    /// Distinct endpoints owning at least one token.
    pub fn endpoints(&self) -> HashSet<Endpoint> {
        self.ring.values().copied().collect()
    }

    /// Owner of `token`, if it is a ring token.
    pub fn endpoint_for(&self, token: &Token) -> Option<Endpoint> {
        self.ring.get(token).copied()
    }

    /// The owning token for `token`: the first ring token >= `token`,
    /// wrapping to the ring minimum when `token` exceeds the last.
    ///
    /// # Panics
    /// Panics if the ring is empty; callers must not query an empty ring.
    pub fn first_token(&self, token: Token) -> Token {
        assert!(!self.sorted_tokens.is_empty(), "first_token on an empty ring");
        let idx = self.sorted_tokens.partition_point(|&t| t < token);
        self.sorted_tokens[idx % self.sorted_tokens.len()]
    }

    /// Iterate `(token, owner)` pairs in ring order, starting at the token
    /// owning `start` and wrapping once around the whole ring.
    pub fn ring_range(&self, start: Token) -> impl Iterator<Item = (Token, Endpoint)> + '_ {
        let idx = self.sorted_tokens.partition_point(|&t| t < start);
        let len = self.sorted_tokens.len();
        (0..len).map(move |i| {
            let token = self.sorted_tokens[(idx + i) % len];
            (token, self.ring[&token])
        })
    }

    /// The primary range(s) ending at ring token `token`: `(pred, token]`,
    /// split in two when it wraps past the ring minimum.
    ///
    /// # Panics
    /// Panics if the ring is empty. `token` must be a ring token.
    pub fn primary_range_for(&self, token: Token) -> Vec<TokenRange> {
        assert!(
            !self.sorted_tokens.is_empty(),
            "primary_range_for on an empty ring"
        );
        let idx = self.sorted_tokens.partition_point(|&t| t < token);
        debug_assert!(
            idx < self.sorted_tokens.len() && self.sorted_tokens[idx] == token,
            "primary_range_for called with a token not on the ring"
        );
        let prev = if idx == 0 {
            self.sorted_tokens[self.sorted_tokens.len() - 1]
        } else {
            self.sorted_tokens[idx - 1]
        };
        let mut ranges = Vec::with_capacity(2);
        insert_unwrapping(prev, token, &mut ranges);
        ranges
    }

    /// Current ring version.
    pub fn ring_version(&self) -> RingVersion {
        self.version
    }

    /// Datacenter membership view.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Register `endpoint` in `datacenter`. Topology changes do not bump the
    /// ring version; only token ownership does.
    pub fn update_topology(&mut self, endpoint: Endpoint, datacenter: impl Into<String>) {
        self.topology.add_endpoint(endpoint, datacenter);
    }

    /// Mark `endpoint` as being replaced by a joining node.
    pub fn add_replacing_endpoint(&mut self, endpoint: Endpoint) {
        self.replacing.insert(endpoint);
    }

    /// Clear the replacement mark for `endpoint` (replace finished or aborted).
    pub fn remove_replacing_endpoint(&mut self, endpoint: &Endpoint) {
        self.replacing.remove(endpoint);
    }

    /// True if `endpoint` is currently being replaced.
    pub fn is_being_replaced(&self, endpoint: &Endpoint) -> bool {
        self.replacing.contains(endpoint)
    }

    /// True if any replacement is in progress.
    pub fn is_any_node_being_replaced(&self) -> bool {
        !self.replacing.is_empty()
    }

    /// Deep-copy the minimal state needed to simulate topology changes:
    /// token ownership, topology, and the current version. Replacement marks
    /// are not carried over.
    pub fn clone_only_token_map(&self) -> TokenMetadata {
        TokenMetadata {
            ring: self.ring.clone(),
            sorted_tokens: self.sorted_tokens.clone(),
            version: self.version,
            topology: self.topology.clone(),
            replacing: HashSet::new(),
        }
    }

    fn rebuild_sorted_tokens(&mut self) {
        self.sorted_tokens = self.ring.keys().copied().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata_with_tokens(tokens: &[(i64, [u8; 4])]) -> TokenMetadata {
        let mut tm = TokenMetadata::new();
        for &(token, addr) in tokens {
            tm.update_normal_tokens([Token(token)], Endpoint::from(addr));
        }
        tm
    }

    #[test]
    fn first_token_wraps_past_the_last_token() {
        let tm = metadata_with_tokens(&[
            (10, [10, 0, 0, 1]),
            (40, [10, 0, 0, 2]),
            (90, [10, 0, 0, 3]),
        ]);
        assert_eq!(tm.first_token(Token(10)), Token(10), "exact match owns itself");
        assert_eq!(tm.first_token(Token(11)), Token(40));
        assert_eq!(tm.first_token(Token(90)), Token(90));
        assert_eq!(tm.first_token(Token(91)), Token(10), "past the last wraps to first");
    }

    #[test]
    fn ring_version_moves_on_ownership_not_topology() {
        let mut tm = TokenMetadata::new();
        let ep = Endpoint::from([10, 0, 0, 1]);
        let v0 = tm.ring_version();

        tm.update_normal_tokens([Token(10)], ep);
        let v1 = tm.ring_version();
        assert!(v1 > v0);

        tm.update_topology(ep, "dc1");
        assert_eq!(tm.ring_version(), v1, "topology updates must not bump the version");

        tm.update_normal_tokens([Token(10)], ep);
        assert!(tm.ring_version() > v1, "re-assignment still bumps");
    }

    #[test]
    fn remove_endpoint_drops_all_its_tokens() {
        let a = Endpoint::from([10, 0, 0, 1]);
        let b = Endpoint::from([10, 0, 0, 2]);
        let mut tm = TokenMetadata::new();
        tm.update_normal_tokens([Token(10), Token(90)], a);
        tm.update_normal_tokens([Token(40)], b);
        let v = tm.ring_version();

        tm.remove_endpoint(&a);
        assert_eq!(tm.sorted_tokens(), &[Token(40)]);
        assert!(tm.ring_version() > v);

        // Removing again is a no-op and keeps the version still.
        let v = tm.ring_version();
        tm.remove_endpoint(&a);
        assert_eq!(tm.ring_version(), v);
    }

    #[test]
    fn ring_range_walks_in_ring_order_from_owning_token() {
        let tm = metadata_with_tokens(&[
            (10, [10, 0, 0, 1]),
            (40, [10, 0, 0, 2]),
            (90, [10, 0, 0, 3]),
        ]);
        let walk: Vec<Token> = tm.ring_range(Token(41)).map(|(t, _)| t).collect();
        assert_eq!(walk, vec![Token(90), Token(10), Token(40)]);
    }

    #[test]
    fn primary_range_for_splits_the_wrapping_range() {
        let tm = metadata_with_tokens(&[
            (10, [10, 0, 0, 1]),
            (40, [10, 0, 0, 2]),
            (90, [10, 0, 0, 3]),
        ]);
        assert_eq!(
            tm.primary_range_for(Token(40)),
            vec![TokenRange::new(Some(Token(10)), Some(Token(40)))]
        );
        // (90, 10] wraps, so it comes back as two sentinel-bounded pieces.
        assert_eq!(
            tm.primary_range_for(Token(10)),
            vec![
                TokenRange::new(None, Some(Token(10))),
                TokenRange::new(Some(Token(90)), None),
            ]
        );
    }

    #[test]
    fn clone_only_token_map_is_independent() {
        let a = Endpoint::from([10, 0, 0, 1]);
        let b = Endpoint::from([10, 0, 0, 2]);
        let mut tm = metadata_with_tokens(&[(10, [10, 0, 0, 1])]);
        tm.add_replacing_endpoint(a);

        let mut clone = tm.clone_only_token_map();
        assert!(!clone.is_any_node_being_replaced(), "replacement marks are not copied");

        clone.update_normal_tokens([Token(60)], b);
        assert_eq!(clone.token_count(), 2);
        assert_eq!(tm.token_count(), 1, "the live ring is untouched");
        assert!(tm.ring_version() < clone.ring_version());
    }
}
