//! Testing support
//!
//! Builders, grammar fixtures and fluent assertions shared by unit tests and
//! the integration suite. The builders panic on malformed features: they are
//! meant for literals written in tests.
//!
//! Fixtures:
//!     - `worked_example_axioms` / `worked_example_goals`: the hand-built agenda
//!       of the classic remnant-movement derivation over four tokens
//!     - `REMNANT_LEXICON`: the same grammar as a lexicon file
//!     - `TRANSITIVE_LEXICON` / `WH_LEXICON`: small clause grammars, without
//!       and with movement, that both recognizers handle

use crate::mg::config::Strategy;
use crate::mg::features::Features;
use crate::mg::lexicon::Grammar;
use crate::mg::recognizer::Recognition;
use crate::mg::span::Span;
use crate::mg::tree::{Node, Phrase};

/// A node from a `(start, end)` pair and a written feature sequence
pub fn node(span: (usize, usize), features: &str) -> Node {
    Node::new(Span::from(span), features_of(features))
}

/// A lexical phrase (no dependents)
pub fn phrase(span: (usize, usize), features: &str) -> Phrase {
    Phrase::lexical(node(span, features))
}

pub fn features_of(source: &str) -> Features {
    Features::parse(source)
        .unwrap_or_else(|e| panic!("bad feature literal {:?}: {}", source, e))
}

/// Parse a lexicon literal
pub fn grammar(source: &str) -> Grammar {
    Grammar::parse(source).unwrap_or_else(|e| panic!("bad lexicon literal: {}", e))
}

/// Remnant movement over four tokens: the subject and object both raise for
/// case and the verb phrase raises past tense.
pub const REMNANT_LEXICON: &str = "\
! NON-LEXICAL
c =i
pred =d +k =vt

! LEXICAL
mary -k d
eat  -v vt =d
will i +k +v =pred
meat -k d

! GOALS
c
";

pub const REMNANT_SENTENCE: &str = "mary eat will meat";

/// Transitive verbs under a silent declarative complementizer
pub const TRANSITIVE_LEXICON: &str = "\
! NON-LEXICAL
c =v        # declarative

! LEXICAL
mary  d
meat  d
eats  v =d =d

! GOALS
c
";

/// Wh-movement: the silent complementizer attracts the `-wh` object
pub const WH_LEXICON: &str = "\
! NON-LEXICAL
c +wh =v    # wh-question

! LEXICAL
mary  d
meat  d
what  -wh d
eats  v =d =d

! GOALS
c
";

/// The agenda of the worked derivation: every silent item at every position
/// plus the four lexical items.
pub fn worked_example_axioms() -> Vec<Phrase> {
    let mut axioms = Vec::new();
    for position in 0..=4 {
        axioms.push(phrase((position, position), "c =i"));
        axioms.push(phrase((position, position), "pred =d +k =vt"));
        match position {
            0 => axioms.push(phrase((0, 1), "-k d")),
            1 => axioms.push(phrase((1, 2), "-v vt =d")),
            2 => axioms.push(phrase((2, 3), "i +k +v =pred")),
            3 => axioms.push(phrase((3, 4), "-k d")),
            _ => {}
        }
    }
    axioms
}

pub fn worked_example_goals() -> Vec<Phrase> {
    vec![phrase((0, 4), "c")]
}

/// Start a fluent assertion on a recognition report
pub fn assert_recognition(recognition: &Recognition) -> RecognitionAssertion<'_> {
    RecognitionAssertion { recognition }
}

pub struct RecognitionAssertion<'a> {
    recognition: &'a Recognition,
}

impl<'a> RecognitionAssertion<'a> {
    pub fn accepted(self) -> Self {
        assert!(
            self.recognition.accepted,
            "Expected '{}' to be accepted by the {} recognizer",
            self.recognition.sentence(),
            self.recognition.strategy
        );
        self
    }

    pub fn rejected(self) -> Self {
        assert!(
            !self.recognition.accepted,
            "Expected '{}' to be rejected by the {} recognizer",
            self.recognition.sentence(),
            self.recognition.strategy
        );
        self
    }

    pub fn strategy(self, expected: Strategy) -> Self {
        assert_eq!(self.recognition.strategy, expected);
        self
    }

    pub fn token_count(self, expected: usize) -> Self {
        let actual = self.recognition.tokens.len();
        assert_eq!(actual, expected, "Expected {} tokens, found {}", expected, actual);
        self
    }

    /// Unresolved obligations (incremental runs only)
    pub fn outstanding(self, expected: usize) -> Self {
        assert_eq!(self.recognition.outstanding, Some(expected));
        self
    }
}
