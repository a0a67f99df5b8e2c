//! Incremental stack recognizer
//!
//! Reads the input left to right and commits to one analysis. Every settled
//! item leaves an obligation behind: the item minus its next feature (the
//! mother) and the feature a later sister must expose to check it. Each new
//! word is resolved against the newest obligations first; silent categories
//! are seeded at priority 0 and stay available for the whole run.
//!
//! Movement is not tracked with spans. An item carries a bag of raised movers
//! (residual sequences led by a licensee) and a licensor checks the one mover
//! in the bag that it licenses.
//!
//! The input is accepted when nothing but the seeds is left. The empty input
//! leaves nothing behind and is accepted vacuously.

use crate::mg::config::{MovePolicy, RecognizerConfig, Strategy};
use crate::mg::error::RecognizeError;
use crate::mg::features::{Feature, Features};
use crate::mg::lexicon::Grammar;
use crate::mg::operators::unique_mover;
use crate::mg::recognizer::{Recognition, Recognizer};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Whether an item is a bare lexical leaf, a projection, or a seed that
/// may serve as either
///
/// Descriptive only: it shows up in traces and in `Display`, but resolution
/// decides by the next feature alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Simple,
    Complex,
    Either,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Simple => "simple",
            Role::Complex => "complex",
            Role::Either => "either",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    pub features: Features,
    pub movers: Vec<Features>,
    pub role: Role,
}

impl Item {
    pub fn leaf(features: Features) -> Self {
        Item {
            features,
            movers: Vec::new(),
            role: Role::Simple,
        }
    }

    pub fn next_feature(&self) -> Option<&Feature> {
        self.features.next()
    }

    /// The next feature selects or licenses, so this item projects.
    pub fn is_head(&self) -> bool {
        self.next_feature()
            .is_some_and(|feature| feature.is_head_feature())
    }

    /// The obligation this item leaves once its next feature is predicted.
    pub fn obligation(&self) -> Option<Obligation> {
        let next = self.next_feature()?;
        Some(Obligation {
            sister: next.complement(),
            mother: Item {
                features: self.features.checked(),
                movers: self.movers.clone(),
                role: self.role,
            },
        })
    }

    /// Combine with the mother of a matched obligation.
    fn resolve(self, obligation: Obligation) -> Item {
        let Obligation { mother, .. } = obligation;
        if self.is_head() {
            let mut movers = self.movers;
            movers.extend(mother.movers);
            if !mother.features.is_empty() {
                movers.push(mother.features);
            }
            Item {
                features: self.features.checked(),
                movers,
                role: Role::Complex,
            }
        } else {
            let residual = self.features.checked();
            let mut movers = mother.movers;
            movers.extend(self.movers);
            if !residual.is_empty() {
                movers.push(residual);
            }
            Item {
                features: mother.features,
                movers,
                role: Role::Complex,
            }
        }
    }

    /// Check the licensor against the mover at `index`.
    fn moved(mut self, index: usize) -> Item {
        let mover = self.movers.remove(index).checked();
        if !mover.is_empty() {
            self.movers.insert(index, mover);
        }
        Item {
            features: self.features.checked(),
            movers: self.movers,
            role: Role::Complex,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.features, self.role.name())?;
        if !self.movers.is_empty() {
            let movers: Vec<String> = self.movers.iter().map(|m| m.to_string()).collect();
            write!(f, " movers {{{}}}", movers.join("; "))?;
        }
        Ok(())
    }
}

/// A confirmed mother waiting for a sister that exposes `sister`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Obligation {
    pub mother: Item,
    pub sister: Feature,
}

/// Where a matching obligation was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Seed(usize),
    Pending(u64),
}

/// Obligations ordered by priority
///
/// Priority 0 holds the seeds, which are matched last and never removed.
/// Every pushed obligation gets a fresh priority above all earlier ones.
#[derive(Debug, Clone, Default)]
pub struct PriorityStack {
    seeds: Vec<Obligation>,
    pending: BTreeMap<u64, Obligation>,
    last_priority: u64,
    stranded: usize,
}

impl PriorityStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&mut self, obligation: Obligation) {
        self.seeds.push(obligation);
    }

    /// Push above everything already pending. Returns the priority used.
    pub fn push(&mut self, obligation: Obligation) -> u64 {
        self.last_priority += 1;
        self.pending.insert(self.last_priority, obligation);
        self.last_priority
    }

    /// Highest priority obligation predicting `feature`, seeds last
    pub fn find(&self, feature: &Feature) -> Option<Slot> {
        self.pending
            .iter()
            .rev()
            .find(|(_, obligation)| &obligation.sister == feature)
            .map(|(priority, _)| Slot::Pending(*priority))
            .or_else(|| {
                self.seeds
                    .iter()
                    .position(|obligation| &obligation.sister == feature)
                    .map(Slot::Seed)
            })
    }

    /// Take the obligation in `slot`. Seeds are copied, pending ones removed.
    pub fn take(&mut self, slot: Slot) -> Option<Obligation> {
        match slot {
            Slot::Seed(index) => self.seeds.get(index).cloned(),
            Slot::Pending(priority) => self.pending.remove(&priority),
        }
    }

    /// Record an item that can never be resolved.
    pub fn strand(&mut self) {
        self.stranded += 1;
    }

    /// Unresolved obligations above priority 0, stranded items included
    pub fn outstanding(&self) -> usize {
        self.pending.len() + self.stranded
    }

    pub fn seeds(&self) -> &[Obligation] {
        &self.seeds
    }

    pub fn pending(&self) -> impl Iterator<Item = (u64, &Obligation)> {
        self.pending.iter().map(|(priority, obligation)| (*priority, obligation))
    }
}

/// One left-to-right run, fed a word at a time
pub struct IncrementalParse<'g> {
    grammar: &'g Grammar,
    stack: PriorityStack,
    move_policy: MovePolicy,
    max_steps: Option<usize>,
    position: usize,
    steps: usize,
    stalled: bool,
}

impl<'g> IncrementalParse<'g> {
    pub fn new(grammar: &'g Grammar, config: &RecognizerConfig) -> Self {
        let mut stack = PriorityStack::new();
        for features in grammar.silent() {
            let seed = Item {
                features: features.clone(),
                movers: Vec::new(),
                role: Role::Either,
            };
            if let Some(obligation) = seed.obligation() {
                stack.seed(obligation);
            }
        }
        IncrementalParse {
            grammar,
            stack,
            move_policy: config.move_policy,
            max_steps: config.max_steps,
            position: 0,
            steps: 0,
            stalled: false,
        }
    }

    /// Integrate the next word.
    ///
    /// After a pruned move the run is stalled: later words are still looked
    /// up but no longer resolved.
    pub fn feed(&mut self, word: &str) -> Result<(), RecognizeError> {
        let grammar = self.grammar;
        let position = self.position;
        let features = grammar
            .lookup(word)
            .ok_or_else(|| RecognizeError::UnknownWord {
                word: word.to_string(),
                position,
            })?;
        self.position += 1;
        if self.stalled {
            return Ok(());
        }

        let mut node = Item::leaf(features.clone());
        // Only seeds survive a match, and the mover bag may keep growing, so a
        // cycle is the same features meeting the same slot again.
        let mut seen: HashSet<(Features, Slot)> = HashSet::new();
        loop {
            let next = match node.next_feature() {
                Some(next) => next.clone(),
                None => break,
            };

            let matched = self.stack.find(&next);
            if let Some(slot) = matched {
                if !seen.insert((node.features.clone(), slot)) {
                    return Err(RecognizeError::ResolutionCycle { position });
                }
            }
            if let Some(obligation) = matched.and_then(|slot| self.stack.take(slot)) {
                self.tick()?;
                let resolved = node.resolve(obligation);
                tracing::debug!("token {}: resolved on {} => {}", position, next, resolved);
                node = resolved;
                continue;
            }

            if next.is_licensor() {
                self.tick()?;
                match unique_mover(&next, node.movers.iter().map(|mover| mover.next())) {
                    Ok(index) => {
                        node = node.moved(index);
                        tracing::debug!("token {}: moved on {} => {}", position, next, node);
                        continue;
                    }
                    Err(failure) => match self.move_policy {
                        MovePolicy::Abort => return Err(failure.into()),
                        MovePolicy::Prune => {
                            tracing::debug!("token {}: {}, run stalled", position, failure);
                            self.stack.strand();
                            self.stalled = true;
                            return Ok(());
                        }
                    },
                }
            }
            break;
        }

        self.settle(node, position)
    }

    fn settle(&mut self, node: Item, position: usize) -> Result<(), RecognizeError> {
        if node.movers.is_empty() && self.grammar.is_goal(&node.features) {
            tracing::debug!("token {}: {} is a goal", position, node);
            return Ok(());
        }
        match node.obligation() {
            Some(obligation) => {
                self.tick()?;
                tracing::debug!(
                    "token {}: {} awaits {}",
                    position,
                    obligation.mother,
                    obligation.sister
                );
                self.stack.push(obligation);
            }
            None => {
                tracing::trace!("token {}: {} stranded", position, node);
                self.stack.strand();
            }
        }
        Ok(())
    }

    fn tick(&mut self) -> Result<(), RecognizeError> {
        if let Some(limit) = self.max_steps {
            if self.steps >= limit {
                return Err(RecognizeError::StepLimitExceeded { limit });
            }
        }
        self.steps += 1;
        Ok(())
    }

    /// Nothing above priority 0 is left.
    pub fn finish(&self) -> bool {
        self.stack.outstanding() == 0
    }

    pub fn stack(&self) -> &PriorityStack {
        &self.stack
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_stalled(&self) -> bool {
        self.stalled
    }
}

pub struct IncrementalRecognizer {
    config: RecognizerConfig,
}

impl IncrementalRecognizer {
    pub fn new(config: RecognizerConfig) -> Self {
        IncrementalRecognizer { config }
    }
}

impl Recognizer for IncrementalRecognizer {
    fn strategy(&self) -> Strategy {
        Strategy::Incremental
    }

    fn recognize(&self, grammar: &Grammar, tokens: &[&str]) -> Result<Recognition, RecognizeError> {
        let mut parse = IncrementalParse::new(grammar, &self.config);
        for token in tokens {
            parse.feed(token)?;
        }

        Ok(Recognition {
            strategy: Strategy::Incremental,
            accepted: parse.finish(),
            tokens: tokens.iter().map(|token| token.to_string()).collect(),
            steps: parse.steps(),
            chart_size: None,
            outstanding: Some(parse.stack().outstanding()),
        })
    }
}
