//! Feature algebra
//!
//! Every lexical item carries a sequence of features. The leading sigil of a
//! feature decides its polarity:
//!
//!     =x   selector   (selects a phrase of category x)
//!     +x   licensor   (attracts a mover carrying -x)
//!     -x   licensee   (the mover side of +x)
//!     %x   adjunct    (adjoins to a phrase of category x)
//!     x    category
//!
//! Feature strings are classified with a logos lexer: a well formed feature is
//! exactly one token covering the whole input. Anything else is malformed.
//!
//! Sequences are written outermost-to-innermost and consumed from the end, so
//! `c =i` first checks `=i` and is left with `c`.

use crate::mg::error::FeatureError;
use logos::Logos;
use std::fmt;
use std::str::FromStr;

/// Raw feature tokens
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum FeatureToken {
    #[regex(r"=[A-Za-z0-9_.']+", |lex| lex.slice()[1..].to_string())]
    Selector(String),

    #[regex(r"\+[A-Za-z0-9_.']+", |lex| lex.slice()[1..].to_string())]
    Licensor(String),

    #[regex(r"-[A-Za-z0-9_.']+", |lex| lex.slice()[1..].to_string())]
    Licensee(String),

    #[regex(r"%[A-Za-z0-9_.']+", |lex| lex.slice()[1..].to_string())]
    Adjunct(String),

    #[regex(r"[A-Za-z0-9_.']+", |lex| lex.slice().to_string())]
    Category(String),
}

/// Role of a feature, read off its sigil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Polarity {
    Category,
    Selector,
    Licensor,
    Licensee,
    Adjunct,
}

impl Polarity {
    pub fn sigil(&self) -> &'static str {
        match self {
            Polarity::Category => "",
            Polarity::Selector => "=",
            Polarity::Licensor => "+",
            Polarity::Licensee => "-",
            Polarity::Adjunct => "%",
        }
    }
}

/// Classify a feature string by polarity.
pub fn classify(feature: &str) -> Result<Polarity, FeatureError> {
    Feature::parse(feature).map(|f| f.polarity())
}

/// A single feature: a label plus its polarity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Feature {
    polarity: Polarity,
    label: String,
}

impl Feature {
    pub fn new(polarity: Polarity, label: impl Into<String>) -> Self {
        Feature {
            polarity,
            label: label.into(),
        }
    }

    pub fn category(label: impl Into<String>) -> Self {
        Self::new(Polarity::Category, label)
    }

    pub fn selector(label: impl Into<String>) -> Self {
        Self::new(Polarity::Selector, label)
    }

    pub fn licensor(label: impl Into<String>) -> Self {
        Self::new(Polarity::Licensor, label)
    }

    pub fn licensee(label: impl Into<String>) -> Self {
        Self::new(Polarity::Licensee, label)
    }

    /// Parse a single feature such as `=d`, `+k`, `-wh` or `c`.
    pub fn parse(source: &str) -> Result<Self, FeatureError> {
        if source.is_empty() {
            return Err(FeatureError::Empty);
        }
        let malformed = || FeatureError::Malformed(source.to_string());

        let mut lexer = FeatureToken::lexer(source);
        let token = match lexer.next() {
            Some(Ok(token)) if lexer.span() == (0..source.len()) => token,
            _ => return Err(malformed()),
        };
        if lexer.next().is_some() {
            return Err(malformed());
        }

        Ok(match token {
            FeatureToken::Selector(label) => Feature::new(Polarity::Selector, label),
            FeatureToken::Licensor(label) => Feature::new(Polarity::Licensor, label),
            FeatureToken::Licensee(label) => Feature::new(Polarity::Licensee, label),
            FeatureToken::Adjunct(label) => Feature::new(Polarity::Adjunct, label),
            FeatureToken::Category(label) => Feature::new(Polarity::Category, label),
        })
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// The label with the sigil stripped
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_category(&self) -> bool {
        self.polarity == Polarity::Category
    }

    pub fn is_selector(&self) -> bool {
        self.polarity == Polarity::Selector
    }

    pub fn is_licensor(&self) -> bool {
        self.polarity == Polarity::Licensor
    }

    pub fn is_licensee(&self) -> bool {
        self.polarity == Polarity::Licensee
    }

    pub fn is_adjunct(&self) -> bool {
        self.polarity == Polarity::Adjunct
    }

    /// Selectors and licensors project: the item carrying them is the head.
    pub fn is_head_feature(&self) -> bool {
        matches!(self.polarity, Polarity::Selector | Polarity::Licensor)
    }

    /// Does this selecting feature (`=x` or `%x`) accept `selectee`?
    ///
    /// Holds iff the stripped labels agree and the selectee is a bare
    /// category. A selector is never satisfied by another selector.
    pub fn matches(&self, selectee: &Feature) -> bool {
        matches!(self.polarity, Polarity::Selector | Polarity::Adjunct)
            && selectee.polarity == Polarity::Category
            && self.label == selectee.label
    }

    /// Does this licensor (`+x`) attract a mover whose next feature is `mover`?
    ///
    /// Only the stripped labels are compared, so both `-x` and a leftover
    /// category `x` qualify. Selectors, licensors and adjuncts never move.
    pub fn licenses(&self, mover: &Feature) -> bool {
        self.polarity == Polarity::Licensor
            && matches!(mover.polarity, Polarity::Licensee | Polarity::Category)
            && self.label == mover.label
    }

    /// The feature a sister must expose to check this one.
    pub fn complement(&self) -> Feature {
        let polarity = match self.polarity {
            Polarity::Selector | Polarity::Adjunct => Polarity::Category,
            Polarity::Category => Polarity::Selector,
            Polarity::Licensor => Polarity::Licensee,
            Polarity::Licensee => Polarity::Licensor,
        };
        Feature::new(polarity, self.label.clone())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.polarity.sigil(), self.label)
    }
}

impl FromStr for Feature {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::parse(s)
    }
}

/// A feature sequence, written outermost-to-innermost and consumed from the end
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Features(Vec<Feature>);

impl Features {
    pub fn new(features: Vec<Feature>) -> Self {
        Features(features)
    }

    /// Parse a whitespace separated sequence such as `pred =d +k =vt`.
    pub fn parse(source: &str) -> Result<Self, FeatureError> {
        source
            .split_whitespace()
            .map(Feature::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Features)
    }

    /// The next feature to check (the last one written)
    pub fn next(&self) -> Option<&Feature> {
        self.0.last()
    }

    /// A copy with the next feature checked off
    pub fn checked(&self) -> Features {
        let mut rest = self.0.clone();
        rest.pop();
        Features(rest)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Feature] {
        &self.0
    }
}

impl fmt::Display for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "ε");
        }
        let written: Vec<String> = self.0.iter().map(|feature| feature.to_string()).collect();
        write!(f, "{}", written.join(" "))
    }
}

impl FromStr for Features {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Features::parse(s)
    }
}

impl From<Vec<Feature>> for Features {
    fn from(features: Vec<Feature>) -> Self {
        Features(features)
    }
}
