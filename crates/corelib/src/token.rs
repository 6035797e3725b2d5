//! Token abstraction for the ring.
//!
//! Tokens are positions on the ring's totally ordered, circular key space.
//! They must be comparable, hashable, and cheap to copy; the range algebra
//! handles wraparound, so no token arithmetic is needed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in the ring's ordered key space.
///
/// Newtype over `i64` (the murmur3 token space) so comparisons and hashing
/// are very fast.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Token(pub i64);

impl Token {
    /// Minimum token value (start of the ring).
    pub const MIN: Token = Token(i64::MIN);

    /// Maximum token value (end of the ring).
    pub const MAX: Token = Token(i64::MAX);
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Token {
    fn from(value: i64) -> Self {
        Token(value)
    }
}
