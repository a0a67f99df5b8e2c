//! Derivation tree model
//!
//! A phrase is a head node plus the dependents (complements and specifiers)
//! that still carry unchecked features and therefore could not be folded into
//! the head yet. Fully checked material is absorbed into the head's span and
//! disappears from the structure.
//!
//! Phrases compare structurally: same head, same dependents in the same order.

use crate::mg::features::{Feature, Features};
use crate::mg::span::Span;
use std::fmt;

/// A span plus the features still to be checked there
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node {
    pub span: Span,
    pub features: Features,
}

impl Node {
    pub fn new(span: Span, features: Features) -> Self {
        Node { span, features }
    }

    pub fn next_feature(&self) -> Option<&Feature> {
        self.features.next()
    }

    /// A copy with the next feature checked off, same span
    pub fn checked(&self) -> Node {
        Node {
            span: self.span,
            features: self.features.checked(),
        }
    }

    /// Every feature has been checked.
    pub fn is_checked(&self) -> bool {
        self.features.is_empty()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.span, self.features)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Phrase {
    pub head: Node,
    pub dependents: Vec<Node>,
}

impl Phrase {
    pub fn new(head: Node, dependents: Vec<Node>) -> Self {
        Phrase { head, dependents }
    }

    /// A phrase consisting of a head only
    pub fn lexical(head: Node) -> Self {
        Phrase {
            head,
            dependents: Vec::new(),
        }
    }

    /// No dependents yet. A lexical head takes complements, a complex one
    /// takes specifiers.
    pub fn is_lexical(&self) -> bool {
        self.dependents.is_empty()
    }

    pub fn next_feature(&self) -> Option<&Feature> {
        self.head.next_feature()
    }

    pub fn span(&self) -> Span {
        self.head.span
    }

    /// Unchecked features over head and dependents
    pub fn feature_count(&self) -> usize {
        self.head.features.len()
            + self
                .dependents
                .iter()
                .map(|node| node.features.len())
                .sum::<usize>()
    }

    /// Head span followed by every dependent span
    pub fn spans(&self) -> impl Iterator<Item = Span> + '_ {
        std::iter::once(self.head.span).chain(self.dependents.iter().map(|node| node.span))
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        if !self.dependents.is_empty() {
            let dependents: Vec<String> = self.dependents.iter().map(|n| n.to_string()).collect();
            write!(f, " {{{}}}", dependents.join("; "))?;
        }
        Ok(())
    }
}
