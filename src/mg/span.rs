//! Token spans
//!
//! A span is the half-open interval `[start, end)` of token positions a
//! phrase covers. Silent (non-lexical) items sit on empty spans `(i, i)`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// The empty span at position `at`, home of silent items
    pub fn point(at: usize) -> Self {
        Span { start: at, end: at }
    }

    /// The span of the token at `position`
    pub fn token(position: usize) -> Self {
        Span {
            start: position,
            end: position + 1,
        }
    }

    /// Concatenate two spans as `(left.start, right.end)`.
    ///
    /// No adjacency check is made: `left.end` and `right.start` are simply
    /// dropped, so the result can even run backwards.
    pub fn concat(left: Span, right: Span) -> Span {
        Span {
            start: left.start,
            end: right.end,
        }
    }

    /// Both endpoints lie within `[0, len]`.
    pub fn within(&self, len: usize) -> bool {
        self.start <= len && self.end <= len
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.start, self.end)
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Span::new(start, end)
    }
}
