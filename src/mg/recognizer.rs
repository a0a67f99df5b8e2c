//! The recognizer interface
//!
//! Both strategies answer the same question (does the grammar derive a goal
//! category over the whole input?) and report it as a [`Recognition`].
//! Which one runs is decided by the [`RecognizerConfig`] passed in.

use crate::mg::chart::ChartRecognizer;
use crate::mg::config::{RecognizerConfig, Strategy};
use crate::mg::error::RecognizeError;
use crate::mg::incremental::IncrementalRecognizer;
use crate::mg::lexicon::Grammar;
use serde::Serialize;
use std::fmt;

pub trait Recognizer {
    fn strategy(&self) -> Strategy;

    /// Decide whether `tokens` is in the language of `grammar`.
    ///
    /// Not reaching a goal is `Ok` with `accepted == false`. Errors are
    /// reserved for runs that cannot be completed at all.
    fn recognize(&self, grammar: &Grammar, tokens: &[&str]) -> Result<Recognition, RecognizeError>;
}

/// Outcome of one recognition run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recognition {
    pub strategy: Strategy,
    pub accepted: bool,
    pub tokens: Vec<String>,
    pub steps: usize,
    /// Phrases in the final chart (chart strategy)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_size: Option<usize>,
    /// Obligations left unresolved (incremental strategy)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outstanding: Option<usize>,
}

impl Recognition {
    pub fn sentence(&self) -> String {
        self.tokens.join(" ")
    }
}

impl fmt::Display for Recognition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.accepted { "accepted" } else { "rejected" };
        writeln!(f, "{}: {}", verdict, self.sentence())?;
        writeln!(f, "strategy: {}", self.strategy)?;
        write!(f, "steps: {}", self.steps)?;
        if let Some(size) = self.chart_size {
            write!(f, "\nchart: {}", size)?;
        }
        if let Some(outstanding) = self.outstanding {
            write!(f, "\noutstanding: {}", outstanding)?;
        }
        Ok(())
    }
}

/// Build the recognizer a configuration asks for.
pub fn recognizer_for(config: &RecognizerConfig) -> Box<dyn Recognizer> {
    match config.strategy {
        Strategy::Chart => Box::new(ChartRecognizer::new(config.clone())),
        Strategy::Incremental => Box::new(IncrementalRecognizer::new(config.clone())),
    }
}

/// Recognize a whitespace separated sentence.
pub fn recognize(
    grammar: &Grammar,
    sentence: &str,
    config: &RecognizerConfig,
) -> Result<Recognition, RecognizeError> {
    let tokens: Vec<&str> = sentence.split_whitespace().collect();
    recognizer_for(config).recognize(grammar, &tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mg::testing::{grammar, TRANSITIVE_LEXICON};

    #[test]
    fn test_recognizer_for_strategy() {
        assert_eq!(
            recognizer_for(&RecognizerConfig::chart()).strategy(),
            Strategy::Chart
        );
        assert_eq!(
            recognizer_for(&RecognizerConfig::incremental()).strategy(),
            Strategy::Incremental
        );
    }

    #[test]
    fn test_recognize_splits_sentence() {
        let grammar = grammar(TRANSITIVE_LEXICON);
        let result = recognize(&grammar, "  mary eats\tmeat ", &RecognizerConfig::chart()).unwrap();
        assert!(result.accepted);
        assert_eq!(result.tokens, vec!["mary", "eats", "meat"]);
        assert_eq!(result.sentence(), "mary eats meat");
    }

    #[test]
    fn test_display() {
        let result = Recognition {
            strategy: Strategy::Incremental,
            accepted: false,
            tokens: vec!["mary".into(), "meat".into()],
            steps: 2,
            chart_size: None,
            outstanding: Some(2),
        };
        assert_eq!(
            result.to_string(),
            "rejected: mary meat\nstrategy: incremental\nsteps: 2\noutstanding: 2"
        );
    }

    #[test]
    fn test_serialize_skips_missing_counts() {
        let result = Recognition {
            strategy: Strategy::Chart,
            accepted: true,
            tokens: vec!["mary".into()],
            steps: 5,
            chart_size: Some(4),
            outstanding: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["strategy"], "chart");
        assert_eq!(json["chart_size"], 4);
        assert!(json.get("outstanding").is_none());
    }
}
