//! Property-based tests for the structural operators and the chart search
//!
//! Phrases are generated over a small feature alphabet so that merge, move
//! and adjoin actually apply in a useful share of the cases.

use minimalist::mg::chart::ChartParse;
use minimalist::mg::config::RecognizerConfig;
use minimalist::mg::features::{Feature, Features, Polarity};
use minimalist::mg::operators::{adjoin, merge, move_phrase};
use minimalist::mg::span::Span;
use minimalist::mg::tree::{Node, Phrase};
use proptest::prelude::*;

/// Sentence length all generated spans live in
const LEN: usize = 4;

fn feature_strategy() -> impl Strategy<Value = Feature> {
    let polarity = prop_oneof![
        Just(Polarity::Category),
        Just(Polarity::Selector),
        Just(Polarity::Licensor),
        Just(Polarity::Licensee),
        Just(Polarity::Adjunct),
    ];
    let label = prop_oneof![Just("d"), Just("v"), Just("k")];
    (polarity, label).prop_map(|(polarity, label)| Feature::new(polarity, label))
}

fn features_strategy(min: usize) -> impl Strategy<Value = Features> {
    prop::collection::vec(feature_strategy(), min..4).prop_map(Features::new)
}

fn span_strategy() -> impl Strategy<Value = Span> {
    (0..=LEN, 0..=LEN).prop_map(|(start, end)| Span::new(start, end))
}

fn node_strategy(min: usize) -> impl Strategy<Value = Node> {
    (span_strategy(), features_strategy(min)).prop_map(|(span, features)| Node::new(span, features))
}

fn phrase_strategy() -> impl Strategy<Value = Phrase> {
    (node_strategy(1), prop::collection::vec(node_strategy(1), 0..3))
        .prop_map(|(head, dependents)| Phrase::new(head, dependents))
}

fn lexical_strategy() -> impl Strategy<Value = Phrase> {
    node_strategy(1).prop_map(Phrase::lexical)
}

fn within(phrase: &Phrase) -> bool {
    phrase.spans().all(|span| span.within(LEN))
}

proptest! {
    #[test]
    fn test_operators_do_not_mutate_inputs(a in phrase_strategy(), b in phrase_strategy()) {
        let (a_before, b_before) = (a.clone(), b.clone());
        let _ = merge(&a, &b);
        let _ = adjoin(&a, &b);
        let _ = move_phrase(&a);
        prop_assert_eq!(a, a_before);
        prop_assert_eq!(b, b_before);
    }

    #[test]
    fn test_merge_checks_two_features(a in phrase_strategy(), b in phrase_strategy()) {
        if let Some(merged) = merge(&a, &b) {
            prop_assert_eq!(merged.feature_count() + 2, a.feature_count() + b.feature_count());
        }
    }

    #[test]
    fn test_adjoin_checks_one_feature(a in phrase_strategy(), b in phrase_strategy()) {
        if let Some(adjoined) = adjoin(&a, &b) {
            prop_assert_eq!(adjoined.feature_count() + 1, a.feature_count() + b.feature_count());
        }
    }

    #[test]
    fn test_move_checks_two_features(a in phrase_strategy()) {
        if let Ok(moved) = move_phrase(&a) {
            prop_assert_eq!(moved.feature_count() + 2, a.feature_count());
        }
    }

    #[test]
    fn test_derived_spans_stay_in_bounds(a in phrase_strategy(), b in phrase_strategy()) {
        prop_assume!(within(&a) && within(&b));
        for derived in [merge(&a, &b), adjoin(&a, &b), move_phrase(&a).ok()].into_iter().flatten() {
            prop_assert!(within(&derived), "{} escapes [0, {}]", derived, LEN);
        }
    }

    #[test]
    fn test_merge_is_order_independent(a in lexical_strategy(), b in lexical_strategy()) {
        // A selector cannot also be a category, so at most one role
        // assignment applies and the argument order does not matter.
        prop_assert_eq!(merge(&a, &b), merge(&b, &a));
    }

    #[test]
    fn test_chart_never_shrinks(axioms in prop::collection::vec(lexical_strategy(), 1..8)) {
        let mut parse = ChartParse::new(axioms, vec![], &RecognizerConfig::chart());
        let mut previous = 0;
        for _ in 0..200 {
            match parse.step() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => return Err(TestCaseError::fail(e.to_string())),
            }
            let size = parse.chart().len();
            prop_assert!(size >= previous);
            previous = size;
        }

        let mut phrases = parse.chart().phrases().to_vec();
        let total = phrases.len();
        phrases.sort();
        phrases.dedup();
        prop_assert_eq!(phrases.len(), total);
    }
}
