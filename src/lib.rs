//! # minimalist
//!
//! Recognizers for Minimalist Grammars.
//!
//! A grammar is a lexicon of feature sequences (see [`mg::lexicon`]). Two
//! strategies decide whether a sentence is derivable from it:
//!
//!     chart         exhaustive agenda/chart search over merge, move and
//!                   (optionally) adjoin
//!     incremental   left-to-right recognition against a stack of
//!                   predicted obligations
//!
//! Both are reached through the [`mg::Recognizer`] trait and selected by a
//! [`mg::RecognizerConfig`], either built directly or taken from the presets
//! in [`mg::config::StrategyRegistry`].
//!
//! ## Testing
//!
//! Shared builders and grammar fixtures live in the [testing module](mg::testing).

pub mod mg;
