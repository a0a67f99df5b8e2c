//! Lexicon files
//!
//! A lexicon is a line oriented text file split into three sections by `!`
//! flags:
//!
//!     ! NON-LEXICAL
//!     c =i                # silent categories, one feature sequence per line
//!
//!     ! LEXICAL
//!     mary -k d           # word, then its feature sequence
//!
//!     ! GOALS
//!     c                   # categories accepted over the whole input
//!
//! Lines before the first flag are NON-LEXICAL. Both `!LEXICAL` and
//! `! LEXICAL` are accepted. A word listed twice keeps its last entry.

pub mod tokens;

use crate::mg::error::LexiconError;
use crate::mg::features::Features;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tokens::{tokenize_lines, Line, LexiconToken};
use tracing::{debug, warn};

/// Which part of the grammar the following lines describe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Lexical,
    Goals,
    NonLexical,
}

impl Section {
    pub fn from_flag(name: &str) -> Option<Section> {
        match name {
            "LEXICAL" => Some(Section::Lexical),
            "GOALS" => Some(Section::Goals),
            "NON-LEXICAL" => Some(Section::NonLexical),
            _ => None,
        }
    }
}

/// A parsed lexicon: overt words, silent categories and goal categories
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grammar {
    lexical: HashMap<String, Features>,
    silent: Vec<Features>,
    goals: Vec<Features>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(source: &str) -> Result<Self, LexiconError> {
        let mut grammar = Grammar::new();
        let mut section = Section::NonLexical;

        for line in tokenize_lines(source) {
            let mut words = line_words(&line);
            if let Some(LexiconToken::Flag(name)) = line.tokens.first() {
                // `! LEXICAL`: the name is the next word on the line
                let name = if name.is_empty() && !words.is_empty() {
                    words.remove(0)
                } else {
                    name.clone()
                };
                section = Section::from_flag(&name).ok_or(LexiconError::UnknownSection {
                    line: line.number,
                    name,
                })?;
                if words.is_empty() {
                    continue;
                }
            }

            let features = |words: &[String]| {
                Features::parse(&words.join(" ")).map_err(|error| LexiconError::MalformedFeature {
                    line: line.number,
                    error,
                })
            };

            match section {
                Section::Lexical => {
                    let (word, rest) = match words.split_first() {
                        Some(split) => split,
                        None => continue,
                    };
                    grammar.add_word(word.clone(), features(rest)?);
                }
                Section::Goals => grammar.add_goal(features(words.as_slice())?),
                Section::NonLexical => grammar.add_silent(features(words.as_slice())?),
            }
        }

        debug!(
            words = grammar.lexical.len(),
            silent = grammar.silent.len(),
            goals = grammar.goals.len(),
            "lexicon parsed"
        );
        Ok(grammar)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let source = fs::read_to_string(path.as_ref())?;
        Self::parse(&source)
    }

    /// Add or replace a word. Returns the entry it replaced.
    pub fn add_word(&mut self, word: impl Into<String>, features: Features) -> Option<Features> {
        let word = word.into();
        let previous = self.lexical.insert(word.clone(), features);
        if let Some(previous) = &previous {
            warn!(word = %word, replaced = %previous, "lexicon entry replaced");
        }
        previous
    }

    pub fn add_goal(&mut self, features: Features) {
        self.goals.push(features);
    }

    pub fn add_silent(&mut self, features: Features) {
        self.silent.push(features);
    }

    pub fn lookup(&self, word: &str) -> Option<&Features> {
        self.lexical.get(word)
    }

    pub fn goals(&self) -> &[Features] {
        &self.goals
    }

    pub fn silent(&self) -> &[Features] {
        &self.silent
    }

    /// Words in sorted order
    pub fn words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.lexical.keys().map(|word| word.as_str()).collect();
        words.sort();
        words
    }

    pub fn is_goal(&self, features: &Features) -> bool {
        self.goals.iter().any(|goal| goal == features)
    }
}

/// The words of a line, a mid-line flag read back as a plain word
fn line_words(line: &Line) -> Vec<String> {
    line.tokens
        .iter()
        .enumerate()
        .filter_map(|(index, token)| match token {
            LexiconToken::Word(word) => Some(word.clone()),
            LexiconToken::Flag(name) if index > 0 => Some(format!("!{}", name)),
            _ => None,
        })
        .collect()
}
