//! Main module for the minimalist library functionality

pub mod chart;
pub mod config;
pub mod error;
pub mod features;
pub mod incremental;
pub mod lexicon;
pub mod operators;
pub mod recognizer;
pub mod span;
pub mod testing;
pub mod tree;

pub use chart::{ChartParse, ChartRecognizer};
pub use config::{MovePolicy, RecognizerConfig, Strategy, DEFAULT_REGISTRY};
pub use error::{MgError, RecognizeError};
pub use features::{Feature, Features, Polarity};
pub use incremental::{IncrementalParse, IncrementalRecognizer};
pub use lexicon::Grammar;
pub use recognizer::{recognize, recognizer_for, Recognition, Recognizer};
pub use span::Span;
pub use tree::{Node, Phrase};
