//! Endpoint identity for cluster nodes.
//!
//! Endpoints identify the physical nodes that own tokens and receive
//! replicas. Keep this cheap to copy, compare, and hash; heavy per-node
//! state (connections, liveness, metrics) lives elsewhere.

use std::fmt;
use std::net::{AddrParseError, IpAddr, Ipv4Addr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Network identity of a node in the cluster.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Endpoint(pub IpAddr);

impl Endpoint {
    pub fn new(addr: IpAddr) -> Self {
        Endpoint(addr)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<IpAddr> for Endpoint {
    fn from(addr: IpAddr) -> Self {
        Endpoint(addr)
    }
}

impl From<Ipv4Addr> for Endpoint {
    fn from(addr: Ipv4Addr) -> Self {
        Endpoint(IpAddr::V4(addr))
    }
}

impl From<[u8; 4]> for Endpoint {
    fn from(octets: [u8; 4]) -> Self {
        Endpoint(IpAddr::V4(Ipv4Addr::from(octets)))
    }
}

impl FromStr for Endpoint {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<IpAddr>().map(Endpoint)
    }
}
