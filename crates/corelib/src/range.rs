//! Token-range algebra.
//!
//! Ranges are half-open `(start, end]` intervals over the ring. A range that
//! crosses the ring boundary is never represented directly; it is split into
//! `(-inf, end]` and `(start, +inf)` so that range vectors stay sorted by
//! start bound with at most one unbounded range at each end.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::Token;

/// Half-open interval `(start, end]` over the token ring.
///
/// A `None` start means "from the ring minimum", a `None` end means "to the
/// ring maximum". Both bounds `None` never occurs in ranges produced by this
/// crate; a full ring is expressed as the pair `(-inf, t]`, `(t, +inf)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct TokenRange {
    start: Option<Token>,
    end: Option<Token>,
}

impl TokenRange {
    /// Build a range from its bounds. `start` is exclusive, `end` inclusive.
    pub fn new(start: Option<Token>, end: Option<Token>) -> Self {
        Self { start, end }
    }

    /// Exclusive start bound, or `None` for the ring minimum.
    pub fn start(&self) -> Option<Token> {
        self.start
    }

    /// Inclusive end bound, or `None` for the ring maximum.
    pub fn end(&self) -> Option<Token> {
        self.end
    }

    /// True if `token` falls inside this range.
    pub fn contains(&self, token: Token) -> bool {
        let after_start = match self.start {
            Some(start) => token > start,
            None => true,
        };
        let within_end = match self.end {
            Some(end) => token <= end,
            None => true,
        };
        after_start && within_end
    }
}

impl fmt::Display for TokenRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start {
            Some(start) => write!(f, "({}, ", start)?,
            None => write!(f, "(-inf, ")?,
        }
        match self.end {
            Some(end) => write!(f, "{}]", end),
            None => write!(f, "+inf)"),
        }
    }
}

/// Append the half-open range `(prev, token]` to a sorted range vector,
/// splitting it when the pair wraps around the ring minimum.
///
/// Callers walk the ring tokens in order with `prev` trailing one step
/// behind, so exactly one pair per walk wraps (the last-to-first pair). That
/// wrapped pair becomes `(-inf, token]` at the front and `(prev, +inf)` at
/// the back; later non-wrapping ranges are inserted just before the trailing
/// unbounded range to keep the vector sorted by start bound.
pub fn insert_unwrapping(prev: Token, token: Token, ranges: &mut Vec<TokenRange>) {
    if prev < token {
        let mut pos = ranges.len();
        if matches!(ranges.last(), Some(last) if last.end().is_none()) {
            // A wrapped range (a, b] was inserted earlier as (-inf, b],
            // (a, +inf). Keep the (a, +inf) piece last.
            pos -= 1;
        }
        ranges.insert(pos, TokenRange::new(Some(prev), Some(token)));
    } else {
        ranges.push(TokenRange::new(Some(prev), None));
        ranges.insert(0, TokenRange::new(None, Some(token)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: Option<i64>, end: Option<i64>) -> TokenRange {
        TokenRange::new(start.map(Token), end.map(Token))
    }

    #[test]
    fn contains_respects_half_open_bounds() {
        let r = range(Some(10), Some(40));
        assert!(!r.contains(Token(10)), "start is exclusive");
        assert!(r.contains(Token(11)));
        assert!(r.contains(Token(40)), "end is inclusive");
        assert!(!r.contains(Token(41)));
    }

    #[test]
    fn contains_with_unbounded_sentinels() {
        assert!(range(None, Some(10)).contains(Token(i64::MIN)));
        assert!(!range(None, Some(10)).contains(Token(11)));
        assert!(range(Some(90), None).contains(Token(i64::MAX)));
        assert!(!range(Some(90), None).contains(Token(90)));
    }

    #[test]
    fn insert_normal_pair_appends() {
        let mut ranges = Vec::new();
        insert_unwrapping(Token(10), Token(40), &mut ranges);
        insert_unwrapping(Token(40), Token(90), &mut ranges);
        assert_eq!(
            ranges,
            vec![range(Some(10), Some(40)), range(Some(40), Some(90))]
        );
    }

    #[test]
    fn insert_wrapping_pair_splits() {
        let mut ranges = Vec::new();
        insert_unwrapping(Token(90), Token(10), &mut ranges);
        assert_eq!(ranges, vec![range(None, Some(10)), range(Some(90), None)]);
    }

    #[test]
    fn insert_after_wrap_keeps_unbounded_range_last() {
        let mut ranges = Vec::new();
        insert_unwrapping(Token(90), Token(10), &mut ranges);
        insert_unwrapping(Token(40), Token(90), &mut ranges);
        assert_eq!(
            ranges,
            vec![
                range(None, Some(10)),
                range(Some(40), Some(90)),
                range(Some(90), None),
            ]
        );
    }

    #[test]
    fn single_token_pair_covers_whole_ring() {
        // With one token the walk sees prev == token, which counts as a wrap.
        let mut ranges = Vec::new();
        insert_unwrapping(Token(7), Token(7), &mut ranges);
        assert_eq!(ranges, vec![range(None, Some(7)), range(Some(7), None)]);
    }

    #[test]
    fn display_uses_infinity_sentinels() {
        assert_eq!(range(Some(10), Some(40)).to_string(), "(10, 40]");
        assert_eq!(range(None, Some(10)).to_string(), "(-inf, 10]");
        assert_eq!(range(Some(90), None).to_string(), "(90, +inf)");
    }
}
