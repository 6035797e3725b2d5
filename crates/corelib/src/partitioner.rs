//! Key-to-token partitioning.
//!
//! Partitioners convert keys into ring tokens. The placement core never
//! hashes keys itself; partitioners sit in front of it for callers that
//! start from keys rather than tokens.

use std::hash::Hasher;

use siphasher::sip::SipHasher13;

use crate::token::Token;

/// Converts keys into tokens for placement on the ring.
///
/// Partitioners are stateless and thread-safe, allowing concurrent token
/// generation without synchronization overhead.
pub trait Partitioner: Send + Sync + 'static {
    /// Token for `key`'s position on the ring.
    fn token_for(&self, key: &[u8]) -> Token;

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str;
}

/// SipHash-1-3 partitioner.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipHashPartitioner;

impl Partitioner for SipHashPartitioner {
    fn token_for(&self, key: &[u8]) -> Token {
        let mut hasher = SipHasher13::new();
        hasher.write(key);
        Token(hasher.finish() as i64)
    }

    fn name(&self) -> &'static str {
        "SipHashPartitioner"
    }
}
