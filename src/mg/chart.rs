//! Chart/agenda recognizer
//!
//! Exhaustive bottom-up search. Every axiom starts on the agenda. A step pops
//! the most recently pushed phrase (the trigger), combines it with everything
//! already in the chart and pushes whatever that derives, then files the
//! trigger in the chart. A licensor-led trigger only moves. The input is
//! recognized when the exhausted chart holds a goal phrase.
//!
//! Every pair of chart members has met: whichever of the two was filed later
//! was the trigger when the other was already there. A trigger equal to a
//! chart member has therefore already been combined and is skipped.

use crate::mg::config::{MovePolicy, RecognizerConfig, Strategy};
use crate::mg::error::RecognizeError;
use crate::mg::lexicon::Grammar;
use crate::mg::operators::{move_phrase, OperatorSet};
use crate::mg::recognizer::{Recognition, Recognizer};
use crate::mg::span::Span;
use crate::mg::tree::{Node, Phrase};
use std::collections::HashSet;

/// Stabilized phrases, deduplicated, in insertion order
#[derive(Debug, Clone, Default)]
pub struct Chart {
    phrases: Vec<Phrase>,
    index: HashSet<Phrase>,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, phrase: &Phrase) -> bool {
        self.index.contains(phrase)
    }

    /// File a phrase. Returns false if an equal phrase is already there.
    pub fn insert(&mut self, phrase: Phrase) -> bool {
        if self.index.contains(&phrase) {
            return false;
        }
        self.index.insert(phrase.clone());
        self.phrases.push(phrase);
        true
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Phrase> {
        self.phrases.iter()
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }
}

/// Phrases waiting to be combined, last in first tried
#[derive(Debug, Clone, Default)]
pub struct Agenda {
    pending: Vec<Phrase>,
}

impl Agenda {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, phrase: Phrase) {
        self.pending.push(phrase);
    }

    pub fn pop(&mut self) -> Option<Phrase> {
        self.pending.pop()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Extend<Phrase> for Agenda {
    fn extend<I: IntoIterator<Item = Phrase>>(&mut self, iter: I) {
        self.pending.extend(iter);
    }
}

impl From<Vec<Phrase>> for Agenda {
    fn from(pending: Vec<Phrase>) -> Self {
        Agenda { pending }
    }
}

/// One chart search, advanced a step at a time
#[derive(Debug, Clone)]
pub struct ChartParse {
    agenda: Agenda,
    chart: Chart,
    goals: Vec<Phrase>,
    operators: OperatorSet,
    move_policy: MovePolicy,
    max_steps: Option<usize>,
    steps: usize,
}

impl ChartParse {
    pub fn new(axioms: Vec<Phrase>, goals: Vec<Phrase>, config: &RecognizerConfig) -> Self {
        ChartParse {
            agenda: Agenda::from(axioms),
            chart: Chart::new(),
            goals,
            operators: OperatorSet::new(config.adjoin),
            move_policy: config.move_policy,
            max_steps: config.max_steps,
            steps: 0,
        }
    }

    /// Process one trigger. Returns `Ok(false)` once the agenda is empty.
    pub fn step(&mut self) -> Result<bool, RecognizeError> {
        if self.agenda.is_empty() {
            return Ok(false);
        }
        if let Some(limit) = self.max_steps {
            if self.steps >= limit {
                return Err(RecognizeError::StepLimitExceeded { limit });
            }
        }
        let trigger = match self.agenda.pop() {
            Some(trigger) => trigger,
            None => return Ok(false),
        };
        self.steps += 1;

        if self.chart.contains(&trigger) {
            tracing::trace!("skipping {}: already in chart", trigger);
            return Ok(true);
        }

        if trigger.next_feature().is_some_and(|feature| feature.is_licensor()) {
            match move_phrase(&trigger) {
                Ok(moved) => {
                    tracing::debug!("move {} => {}", trigger, moved);
                    self.agenda.push(moved);
                }
                Err(failure) => match self.move_policy {
                    MovePolicy::Prune => tracing::trace!("move pruned on {}: {}", trigger, failure),
                    MovePolicy::Abort => return Err(failure.into()),
                },
            }
        } else {
            let derived: Vec<Phrase> = self
                .chart
                .iter()
                .flat_map(|other| self.operators.combine(&trigger, other))
                .collect();
            for phrase in &derived {
                tracing::debug!("{} derives {}", trigger, phrase);
            }
            self.agenda.extend(derived);
        }

        self.chart.insert(trigger);
        Ok(true)
    }

    /// Step until the agenda is exhausted, then report whether a goal was
    /// derived.
    pub fn run(&mut self) -> Result<bool, RecognizeError> {
        while self.step()? {}
        Ok(self.reached_goal())
    }

    pub fn reached_goal(&self) -> bool {
        self.goals.iter().any(|goal| self.chart.contains(goal))
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn agenda(&self) -> &Agenda {
        &self.agenda
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_exhausted(&self) -> bool {
        self.agenda.is_empty()
    }
}

pub struct ChartRecognizer {
    config: RecognizerConfig,
}

impl ChartRecognizer {
    pub fn new(config: RecognizerConfig) -> Self {
        ChartRecognizer { config }
    }

    /// Starting agenda for a sentence: each token at `(i,i+1)`, then every
    /// silent entry at every position `(i,i)`.
    pub fn axioms(grammar: &Grammar, tokens: &[&str]) -> Result<Vec<Phrase>, RecognizeError> {
        let mut axioms = Vec::new();
        for (position, word) in tokens.iter().enumerate() {
            let features = grammar
                .lookup(word)
                .ok_or_else(|| RecognizeError::UnknownWord {
                    word: word.to_string(),
                    position,
                })?;
            axioms.push(Phrase::lexical(Node::new(
                Span::token(position),
                features.clone(),
            )));
        }
        for position in 0..=tokens.len() {
            for features in grammar.silent() {
                axioms.push(Phrase::lexical(Node::new(
                    Span::point(position),
                    features.clone(),
                )));
            }
        }
        Ok(axioms)
    }

    /// Goal phrases over `len` tokens
    pub fn goals(grammar: &Grammar, len: usize) -> Vec<Phrase> {
        grammar
            .goals()
            .iter()
            .map(|features| Phrase::lexical(Node::new(Span::new(0, len), features.clone())))
            .collect()
    }

    /// Run the search over caller-supplied axioms and goals.
    pub fn recognize_axioms(
        &self,
        axioms: Vec<Phrase>,
        goals: Vec<Phrase>,
    ) -> Result<ChartParse, RecognizeError> {
        let mut parse = ChartParse::new(axioms, goals, &self.config);
        let accepted = parse.run()?;
        tracing::debug!(
            "chart search finished after {} steps with {} phrases, accepted: {}",
            parse.steps(),
            parse.chart().len(),
            accepted
        );
        Ok(parse)
    }
}

impl Recognizer for ChartRecognizer {
    fn strategy(&self) -> Strategy {
        Strategy::Chart
    }

    fn recognize(&self, grammar: &Grammar, tokens: &[&str]) -> Result<Recognition, RecognizeError> {
        let axioms = Self::axioms(grammar, tokens)?;
        let goals = Self::goals(grammar, tokens.len());
        let parse = self.recognize_axioms(axioms, goals)?;

        Ok(Recognition {
            strategy: Strategy::Chart,
            accepted: parse.reached_goal(),
            tokens: tokens.iter().map(|token| token.to_string()).collect(),
            steps: parse.steps(),
            chart_size: Some(parse.chart().len()),
            outstanding: None,
        })
    }
}
