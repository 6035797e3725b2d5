//! Replica placement for a token ring.
//!
//! This crate decides which endpoints hold replicas for any ring token:
//! - Pluggable placement strategies (simple, network-topology, local)
//! - Version-aware natural-endpoint cache
//! - Token-range queries for routing and data-movement planning
//! - Strategy factory with configuration validation

mod cache;
pub mod error;
pub mod factory;
pub mod locator;
pub mod options;
pub mod strategy;

pub use error::ConfigurationError;
pub use factory::{create_replication_strategy, validate_replication_strategy};
pub use locator::ReplicaLocator;
pub use options::{parse_replication_factor, validate_replication_factor, ConfigOptions};
pub use strategy::{
    LocalStrategy, NetworkTopologyStrategy, ReplicationStrategy, SimpleStrategy,
};
