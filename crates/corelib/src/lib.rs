//! Core library for token-ring replica placement.
//!
//! This crate provides the fundamental abstractions for locating data on a
//! token ring:
//! - Token and token-range value types (wraparound-aware range algebra)
//! - Endpoint identity
//! - Ring state: token ownership, versioning, replacement tracking
//! - Datacenter topology and snitches
//! - Key-to-token partitioners

pub mod endpoint;
pub mod metadata;
pub mod partitioner;
pub mod range;
pub mod token;
pub mod topology;

pub use endpoint::Endpoint;
pub use metadata::{RingVersion, TokenMetadata};
pub use partitioner::{Partitioner, SipHashPartitioner};
pub use range::{insert_unwrapping, TokenRange};
pub use token::Token;
pub use topology::{SimpleSnitch, Snitch, StaticSnitch, Topology};
