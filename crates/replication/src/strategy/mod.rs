//! Replication strategy abstractions.
//!
//! A strategy is the placement oracle: given a token and a ring snapshot it
//! returns the ordered endpoint list that must hold replicas of the data
//! owning that token, primary first. Strategies differ in how they spread
//! replicas:
//!
//! - **SimpleStrategy**: RF replicas placed sequentially around the ring
//! - **NetworkTopologyStrategy**: per-datacenter replica counts
//! - **LocalStrategy**: the local node only, no real replication

pub mod local;
pub mod network_topology;
pub mod simple;

pub use local::LocalStrategy;
pub use network_topology::NetworkTopologyStrategy;
pub use simple::SimpleStrategy;

use corelib::{Endpoint, Token, TokenMetadata};

use crate::error::ConfigurationError;

/// Placement oracle for a replication strategy.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (Send + Sync) as one instance may be
/// shared across threads behind a [`crate::ReplicaLocator`].
pub trait ReplicationStrategy: Send + Sync + 'static {
    /// Ordered endpoints replicating the data owning `token`.
    ///
    /// The first element is the primary owner. The ring snapshot must stay
    /// consistent for the duration of the call.
    fn calculate_natural_endpoints(&self, token: Token, metadata: &TokenMetadata)
        -> Vec<Endpoint>;

    /// Total number of replicas this strategy places.
    fn replication_factor(&self) -> usize;

    /// Option keys this strategy understands, or `None` when the key set is
    /// open-ended (network topology options are keyed by datacenter name).
    fn recognized_options(&self) -> Option<&'static [&'static str]>;

    /// Strategy-specific validation of the configured options.
    fn validate_options(&self) -> Result<(), ConfigurationError>;

    /// Whether endpoints being replaced may be filtered out of natural
    /// endpoints. Strategies that always return a fixed local endpoint must
    /// opt out, as filtering could empty their result.
    fn allow_remove_node_being_replaced_from_natural_endpoints(&self) -> bool {
        true
    }

    /// Get the strategy name (for logging/errors).
    fn name(&self) -> &'static str;
}
