//! Error types for lexicon loading and recognition

use crate::mg::operators::MoveFailure;
use std::fmt;

/// A feature string that does not classify
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    Empty,
    /// Unknown sigil or characters outside the label alphabet
    Malformed(String),
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureError::Empty => write!(f, "Malformed feature: empty feature"),
            FeatureError::Malformed(feature) => write!(f, "Malformed feature: '{}'", feature),
        }
    }
}

impl std::error::Error for FeatureError {}

/// Errors that can occur while reading a lexicon
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexiconError {
    /// IO error when reading the lexicon file
    Io(String),
    /// A `!` flag naming something other than LEXICAL, GOALS or NON-LEXICAL
    UnknownSection { line: usize, name: String },
    MalformedFeature { line: usize, error: FeatureError },
}

impl fmt::Display for LexiconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexiconError::Io(msg) => write!(f, "IO error: {}", msg),
            LexiconError::UnknownSection { line, name } => {
                write!(f, "Line {}: unknown section flag '!{}'", line, name)
            }
            LexiconError::MalformedFeature { line, error } => write!(f, "Line {}: {}", line, error),
        }
    }
}

impl std::error::Error for LexiconError {}

impl From<std::io::Error> for LexiconError {
    fn from(err: std::io::Error) -> Self {
        LexiconError::Io(err.to_string())
    }
}

/// Errors that end a recognition run
///
/// Not reaching a goal is not an error: it is a run whose report says
/// `accepted: false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizeError {
    UnknownWord { word: String, position: usize },
    /// Raised only under the `abort` move policy
    MoveInapplicable(MoveFailure),
    StepLimitExceeded { limit: usize },
    /// Chained resolution met the same obligation with the same features
    /// twice within one token
    ResolutionCycle { position: usize },
}

impl fmt::Display for RecognizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognizeError::UnknownWord { word, position } => write!(
                f,
                "The lexicon does not have the word \"{}\" (position {})",
                word, position
            ),
            RecognizeError::MoveInapplicable(failure) => write!(f, "Move failed: {}", failure),
            RecognizeError::StepLimitExceeded { limit } => {
                write!(f, "Gave up after {} steps", limit)
            }
            RecognizeError::ResolutionCycle { position } => write!(
                f,
                "Obligation resolution cycles at token {}",
                position
            ),
        }
    }
}

impl std::error::Error for RecognizeError {}

impl From<MoveFailure> for RecognizeError {
    fn from(failure: MoveFailure) -> Self {
        RecognizeError::MoveInapplicable(failure)
    }
}

/// Everything the front-end can fail with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MgError {
    Lexicon(LexiconError),
    Recognize(RecognizeError),
    Config(String),
    UnknownStrategy(String),
    /// A report could not be rendered in the requested format
    Output(String),
}

impl fmt::Display for MgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MgError::Lexicon(err) => write!(f, "Lexicon error: {}", err),
            MgError::Recognize(err) => write!(f, "Recognition error: {}", err),
            MgError::Config(msg) => write!(f, "Configuration error: {}", msg),
            MgError::UnknownStrategy(name) => write!(f, "Strategy '{}' not found", name),
            MgError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for MgError {}

impl From<LexiconError> for MgError {
    fn from(err: LexiconError) -> Self {
        MgError::Lexicon(err)
    }
}

impl From<RecognizeError> for MgError {
    fn from(err: RecognizeError) -> Self {
        MgError::Recognize(err)
    }
}

impl From<config::ConfigError> for MgError {
    fn from(err: config::ConfigError) -> Self {
        MgError::Config(err.to_string())
    }
}
