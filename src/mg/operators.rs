//! Structural operators
//!
//! Merge, move and adjoin map one or two phrases to at most one new phrase.
//! They take their inputs by reference and build fresh values; nothing is
//! mutated, so a phrase can be offered to as many combinations as the search
//! likes.
//!
//! Merge distinguishes three cases once a selector/selectee pair is found:
//!
//!     selectee keeps features   -> it becomes a dependent of the head
//!     selectee done, head lexical -> complement, span head-then-selectee
//!     selectee done, head complex -> specifier, span selectee-then-head
//!
//! Move looks for exactly one dependent whose next feature carries the
//! head's licensor label, whether as a licensee or a leftover category. Adjoin is the experimental `%` operator and
//! only runs when enabled.

use crate::mg::features::{Feature, Polarity};
use crate::mg::span::Span;
use crate::mg::tree::{Node, Phrase};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why move did not apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveFailure {
    /// The head's next feature is not a licensor
    NoLicensor,
    /// Zero or several dependents carry the licensee
    NoUniqueMover { licensor: Feature, candidates: usize },
}

impl fmt::Display for MoveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveFailure::NoLicensor => write!(f, "head has no licensor feature"),
            MoveFailure::NoUniqueMover {
                licensor,
                candidates,
            } => write!(
                f,
                "{} needs exactly one mover, found {}",
                licensor, candidates
            ),
        }
    }
}

/// The structural operators, by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operator {
    Merge,
    Move,
    Adjoin,
}

impl Operator {
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Merge => "merge",
            Operator::Move => "move",
            Operator::Adjoin => "adjoin",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Operator::Move => 1,
            Operator::Merge | Operator::Adjoin => 2,
        }
    }

    /// Apply a binary operator. Move is unary and never combines.
    pub fn combine(&self, a: &Phrase, b: &Phrase) -> Option<Phrase> {
        match self {
            Operator::Merge => merge(a, b),
            Operator::Adjoin => adjoin(a, b),
            Operator::Move => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The binary operators a search tries on every pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSet {
    adjoin: bool,
}

impl OperatorSet {
    pub fn new(adjoin: bool) -> Self {
        OperatorSet { adjoin }
    }

    pub fn binary(&self) -> Vec<Operator> {
        let mut operators = vec![Operator::Merge];
        if self.adjoin {
            operators.push(Operator::Adjoin);
        }
        operators
    }

    /// Every phrase the enabled binary operators derive from the pair
    pub fn combine(&self, trigger: &Phrase, other: &Phrase) -> Vec<Phrase> {
        self.binary()
            .into_iter()
            .filter_map(|operator| operator.combine(trigger, other))
            .collect()
    }
}

impl Default for OperatorSet {
    fn default() -> Self {
        Self::new(false)
    }
}

fn selects(selector: &Phrase, selectee: &Phrase, mark: Polarity) -> bool {
    match (selector.next_feature(), selectee.next_feature()) {
        (Some(wanted), Some(offered)) => wanted.polarity() == mark && wanted.matches(offered),
        _ => false,
    }
}

/// Decide which of the two phrases selects the other, `b` first.
fn establish_roles<'a>(
    a: &'a Phrase,
    b: &'a Phrase,
    mark: Polarity,
) -> Option<(&'a Phrase, &'a Phrase)> {
    if selects(b, a, mark) {
        Some((b, a))
    } else if selects(a, b, mark) {
        Some((a, b))
    } else {
        None
    }
}

/// Merge two phrases, whichever of them is the selector.
pub fn merge(a: &Phrase, b: &Phrase) -> Option<Phrase> {
    let (selector, selectee) = establish_roles(a, b, Polarity::Selector)?;
    let head = selector.head.checked();
    let reduced = selectee.head.checked();

    if !reduced.is_checked() {
        let dependents = selector
            .dependents
            .iter()
            .cloned()
            .chain(std::iter::once(reduced))
            .chain(selectee.dependents.iter().cloned())
            .collect();
        return Some(Phrase::new(head, dependents));
    }

    if selector.is_lexical() {
        let span = Span::concat(selector.span(), selectee.span());
        Some(Phrase::new(
            Node::new(span, head.features),
            selectee.dependents.clone(),
        ))
    } else {
        let span = Span::concat(selectee.span(), selector.span());
        let dependents = selectee
            .dependents
            .iter()
            .chain(selector.dependents.iter())
            .cloned()
            .collect();
        Some(Phrase::new(Node::new(span, head.features), dependents))
    }
}

/// Index of the single candidate whose next feature `licensor` checks.
///
/// `candidates` yields the next feature of each candidate in order.
pub fn unique_mover<'a, I>(licensor: &Feature, candidates: I) -> Result<usize, MoveFailure>
where
    I: IntoIterator<Item = Option<&'a Feature>>,
{
    let matching: Vec<usize> = candidates
        .into_iter()
        .enumerate()
        .filter(|(_, next)| next.is_some_and(|feature| licensor.licenses(feature)))
        .map(|(index, _)| index)
        .collect();

    match matching.as_slice() {
        [index] => Ok(*index),
        _ => Err(MoveFailure::NoUniqueMover {
            licensor: licensor.clone(),
            candidates: matching.len(),
        }),
    }
}

/// Move the unique dependent carrying the head's licensor label.
pub fn move_phrase(phrase: &Phrase) -> Result<Phrase, MoveFailure> {
    let licensor = match phrase.next_feature() {
        Some(feature) if feature.is_licensor() => feature,
        _ => return Err(MoveFailure::NoLicensor),
    };
    let index = unique_mover(
        licensor,
        phrase.dependents.iter().map(|node| node.next_feature()),
    )?;

    let mover = &phrase.dependents[index];
    let mut dependents: Vec<Node> = phrase
        .dependents
        .iter()
        .enumerate()
        .filter(|(position, _)| *position != index)
        .map(|(_, node)| node.clone())
        .collect();
    let head = phrase.head.checked();
    let reduced = mover.checked();

    if !reduced.is_checked() {
        dependents.push(reduced);
        Ok(Phrase::new(head, dependents))
    } else {
        let span = Span::concat(mover.span, phrase.span());
        Ok(Phrase::new(Node::new(span, head.features), dependents))
    }
}

/// Adjoin a `%x` adjunct to a phrase of category `x`.
///
/// Experimental: only the adjunct's feature is checked, the host keeps its
/// own. A spent adjunct is folded in front of the host. The host still
/// exposes `x` afterwards, so adjoin refuses to add a node the host already
/// carries as a dependent; otherwise one adjunct would attach without end.
pub fn adjoin(a: &Phrase, b: &Phrase) -> Option<Phrase> {
    let (adjunct, host) = establish_roles(a, b, Polarity::Adjunct)?;
    let reduced = adjunct.head.checked();

    let already_hosted = |node: &Node| host.dependents.contains(node);
    if already_hosted(&reduced) || adjunct.dependents.iter().any(already_hosted) {
        return None;
    }

    if !reduced.is_checked() {
        let dependents = host
            .dependents
            .iter()
            .cloned()
            .chain(std::iter::once(reduced))
            .chain(adjunct.dependents.iter().cloned())
            .collect();
        Some(Phrase::new(host.head.clone(), dependents))
    } else {
        let span = Span::concat(adjunct.span(), host.span());
        let dependents = host
            .dependents
            .iter()
            .chain(adjunct.dependents.iter())
            .cloned()
            .collect();
        Some(Phrase::new(
            Node::new(span, host.head.features.clone()),
            dependents,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mg::testing::{node, phrase};

    #[test]
    fn test_merge_lexical_head_takes_complement() {
        let verb = phrase((0, 1), "v =d");
        let object = phrase((1, 2), "d");

        let merged = merge(&verb, &object).unwrap();
        assert_eq!(merged, Phrase::lexical(node((0, 2), "v")));
    }

    #[test]
    fn test_merge_tries_both_orders() {
        let verb = phrase((0, 1), "v =d");
        let object = phrase((1, 2), "d");
        assert_eq!(merge(&object, &verb), merge(&verb, &object));
    }

    #[test]
    fn test_merge_complex_head_takes_specifier() {
        let head = Phrase::new(node((1, 3), "v =d"), vec![node((3, 4), "-k")]);
        let subject = phrase((0, 1), "d");

        let merged = merge(&head, &subject).unwrap();
        assert_eq!(merged.head, node((0, 3), "v"));
        assert_eq!(merged.dependents, vec![node((3, 4), "-k")]);
    }

    #[test]
    fn test_merge_keeps_selectee_with_residual_features() {
        let verb = phrase((1, 2), "-v vt =d");
        let mover = phrase((0, 1), "-k d");

        let merged = merge(&verb, &mover).unwrap();
        assert_eq!(merged.head, node((1, 2), "-v vt"));
        assert_eq!(merged.dependents, vec![node((0, 1), "-k")]);
    }

    #[test]
    fn test_merge_residual_dependent_order() {
        let head = Phrase::new(node((4, 4), "pred =d +k =vt"), vec![node((9, 9), "-x")]);
        let selectee = Phrase::new(node((1, 2), "-v vt"), vec![node((0, 1), "-k")]);

        let merged = merge(&head, &selectee).unwrap();
        assert_eq!(
            merged.dependents,
            vec![node((9, 9), "-x"), node((1, 2), "-v"), node((0, 1), "-k")]
        );
    }

    #[test]
    fn test_merge_requires_a_match() {
        assert_eq!(merge(&phrase((0, 1), "v =d"), &phrase((1, 2), "n")), None);
        assert_eq!(merge(&phrase((0, 1), "v =d"), &phrase((1, 2), "x =d")), None);
        assert_eq!(merge(&phrase((0, 1), "d"), &phrase((1, 2), "d")), None);
        assert_eq!(merge(&phrase((0, 1), ""), &phrase((1, 2), "d")), None);
    }

    #[test]
    fn test_merge_leaves_inputs_alone() {
        let verb = phrase((0, 1), "v =d");
        let object = phrase((1, 2), "d");
        let before = (verb.clone(), object.clone());
        let _ = merge(&verb, &object);
        assert_eq!((verb, object), before);
    }

    #[test]
    fn test_move_absorbs_spent_mover_in_front() {
        let phrase = Phrase::new(
            node((4, 4), "pred =d +k"),
            vec![node((1, 2), "-v"), node((0, 1), "-k")],
        );

        let moved = move_phrase(&phrase).unwrap();
        assert_eq!(moved.head, node((0, 4), "pred =d"));
        assert_eq!(moved.dependents, vec![node((1, 2), "-v")]);
    }

    #[test]
    fn test_move_requeues_mover_with_features_left() {
        let phrase = Phrase::new(
            node((2, 3), "c +wh"),
            vec![node((0, 1), "-k -wh"), node((1, 2), "-q")],
        );

        let moved = move_phrase(&phrase).unwrap();
        assert_eq!(moved.head, node((2, 3), "c"));
        assert_eq!(moved.dependents, vec![node((1, 2), "-q"), node((0, 1), "-k")]);
    }

    #[test]
    fn test_move_without_candidates() {
        let phrase = Phrase::new(node((0, 0), "c +wh"), vec![node((0, 1), "-k")]);
        assert_eq!(
            move_phrase(&phrase),
            Err(MoveFailure::NoUniqueMover {
                licensor: Feature::licensor("wh"),
                candidates: 0,
            })
        );
    }

    #[test]
    fn test_move_with_competing_candidates() {
        let phrase = Phrase::new(
            node((2, 2), "i +k"),
            vec![node((0, 1), "-k"), node((3, 4), "-k")],
        );
        assert_eq!(
            move_phrase(&phrase),
            Err(MoveFailure::NoUniqueMover {
                licensor: Feature::licensor("k"),
                candidates: 2,
            })
        );
    }

    #[test]
    fn test_move_accepts_leftover_category() {
        let phrase = Phrase::new(node((1, 2), "c +k"), vec![node((0, 1), "k")]);
        let moved = move_phrase(&phrase).unwrap();
        assert_eq!(moved, Phrase::lexical(node((0, 2), "c")));
    }

    #[test]
    fn test_move_counts_categories_and_licensees_alike() {
        let phrase = Phrase::new(
            node((2, 3), "c +k"),
            vec![node((0, 1), "k"), node((1, 2), "-k")],
        );
        assert_eq!(
            move_phrase(&phrase),
            Err(MoveFailure::NoUniqueMover {
                licensor: Feature::licensor("k"),
                candidates: 2,
            })
        );
    }

    #[test]
    fn test_move_ignores_selectors() {
        let phrase = Phrase::new(node((0, 0), "c +k"), vec![node((0, 1), "=k")]);
        assert!(move_phrase(&phrase).is_err());
    }

    #[test]
    fn test_move_needs_licensor() {
        assert_eq!(
            move_phrase(&phrase((0, 1), "v =d")),
            Err(MoveFailure::NoLicensor)
        );
    }

    #[test]
    fn test_adjoin_spent_adjunct_goes_in_front() {
        let host = phrase((1, 2), "n");
        let adjective = phrase((0, 1), "%n");

        let adjoined = adjoin(&host, &adjective).unwrap();
        assert_eq!(adjoined, Phrase::lexical(node((0, 2), "n")));
        assert_eq!(adjoin(&adjective, &host), Some(adjoined));
    }

    #[test]
    fn test_adjoin_keeps_adjunct_with_features_left() {
        let host = Phrase::new(node((1, 2), "v"), vec![node((5, 6), "-k")]);
        let adverb = phrase((0, 1), "-f %v");

        let adjoined = adjoin(&host, &adverb).unwrap();
        assert_eq!(adjoined.head, node((1, 2), "v"));
        assert_eq!(adjoined.dependents, vec![node((5, 6), "-k"), node((0, 1), "-f")]);
    }

    #[test]
    fn test_adjoin_does_not_repeat_a_leftover_adjunct() {
        let host = phrase((1, 2), "v");
        let adverb = phrase((0, 1), "-f %v");

        let once = adjoin(&host, &adverb).unwrap();
        assert_eq!(once.dependents, vec![node((0, 1), "-f")]);
        assert_eq!(adjoin(&once, &adverb), None);
    }

    #[test]
    fn test_adjoin_does_not_repeat_adjunct_dependents() {
        let host = phrase((1, 2), "v");
        let adverb = Phrase::new(node((0, 1), "%v"), vec![node((3, 4), "-k")]);

        let once = adjoin(&host, &adverb).unwrap();
        assert_eq!(once.head, node((0, 2), "v"));
        assert_eq!(once.dependents, vec![node((3, 4), "-k")]);
        assert_eq!(adjoin(&once, &adverb), None);
    }

    #[test]
    fn test_adjoin_does_not_merge() {
        assert_eq!(adjoin(&phrase((0, 1), "v =d"), &phrase((1, 2), "d")), None);
        assert_eq!(merge(&phrase((0, 1), "%n"), &phrase((1, 2), "n")), None);
    }

    #[test]
    fn test_operator_set() {
        assert_eq!(OperatorSet::new(false).binary(), vec![Operator::Merge]);
        assert_eq!(
            OperatorSet::new(true).binary(),
            vec![Operator::Merge, Operator::Adjoin]
        );

        let host = phrase((1, 2), "n");
        let adjective = phrase((0, 1), "%n");
        assert!(OperatorSet::new(false).combine(&host, &adjective).is_empty());
        assert_eq!(OperatorSet::new(true).combine(&host, &adjective).len(), 1);
        assert_eq!(Operator::Move.combine(&host, &adjective), None);
        assert_eq!(Operator::Move.arity(), 1);
    }

    #[test]
    fn test_unique_mover() {
        let licensor = Feature::licensor("k");
        let k = Feature::licensee("k");
        let wh = Feature::licensee("wh");
        assert_eq!(unique_mover(&licensor, vec![Some(&wh), Some(&k), None]), Ok(1));
        assert!(unique_mover(&licensor, vec![Some(&k), Some(&k)]).is_err());
        assert!(unique_mover(&licensor, Vec::new()).is_err());
    }
}
