//! Behaviour both recognizers share
//!
//! Every test runs once per strategy with its default move policy.

use minimalist::mg::config::{MovePolicy, RecognizerConfig, Strategy, DEFAULT_REGISTRY};
use minimalist::mg::error::RecognizeError;
use minimalist::mg::lexicon::Grammar;
use minimalist::mg::recognizer::{recognize, recognizer_for};
use minimalist::mg::testing::{assert_recognition, grammar, TRANSITIVE_LEXICON, WH_LEXICON};
use rstest::rstest;

fn fixture(name: &str) -> Grammar {
    Grammar::from_path(format!("tests/fixtures/{}.lex", name)).expect("fixture to load")
}

#[rstest(strategy => [Strategy::Chart, Strategy::Incremental])]
fn test_declarative_sentences(strategy: Strategy) {
    let grammar = fixture("transitive");
    let config = RecognizerConfig::for_strategy(strategy);

    for sentence in ["mary eats meat", "john sees mary", "mary sees john"] {
        let recognition = recognize(&grammar, sentence, &config).unwrap();
        assert_recognition(&recognition)
            .strategy(strategy)
            .accepted()
            .token_count(3);
    }
}

#[rstest(strategy => [Strategy::Chart, Strategy::Incremental])]
fn test_incomplete_sentences_are_rejected(strategy: Strategy) {
    let grammar = grammar(TRANSITIVE_LEXICON);
    let config = RecognizerConfig::for_strategy(strategy);

    for sentence in ["meat", "mary meat", "mary eats"] {
        let recognition = recognize(&grammar, sentence, &config).unwrap();
        assert_recognition(&recognition).rejected();
    }
}

#[rstest(strategy => [Strategy::Chart, Strategy::Incremental])]
fn test_wh_questions(strategy: Strategy) {
    let grammar = fixture("wh");
    let config = RecognizerConfig::for_strategy(strategy);

    for sentence in ["what mary eats", "who john sees"] {
        let recognition = recognize(&grammar, sentence, &config).unwrap();
        assert_recognition(&recognition).accepted();
    }
}

#[rstest(strategy => [Strategy::Chart, Strategy::Incremental])]
fn test_runs_are_deterministic(strategy: Strategy) {
    let grammar = grammar(WH_LEXICON);
    let config = RecognizerConfig::for_strategy(strategy);

    let first = recognize(&grammar, "what mary eats", &config).unwrap();
    for _ in 0..5 {
        assert_eq!(recognize(&grammar, "what mary eats", &config).unwrap(), first);
    }
}

#[rstest(strategy => [Strategy::Chart, Strategy::Incremental])]
fn test_unknown_word(strategy: Strategy) {
    let grammar = grammar("c =v\n! LEXICAL\neats v =d =d\nmeat d\n! GOALS\nc");
    let err = recognize(&grammar, "mary eats meat", &RecognizerConfig::for_strategy(strategy))
        .unwrap_err();
    assert_eq!(
        err,
        RecognizeError::UnknownWord {
            word: "mary".into(),
            position: 0
        }
    );
}

#[rstest(strategy => [Strategy::Chart, Strategy::Incremental])]
fn test_step_limit(strategy: Strategy) {
    let grammar = grammar(TRANSITIVE_LEXICON);
    let config = RecognizerConfig::for_strategy(strategy).with_max_steps(1);
    assert_eq!(
        recognize(&grammar, "mary eats meat", &config),
        Err(RecognizeError::StepLimitExceeded { limit: 1 })
    );
}

#[rstest(strategy => [Strategy::Chart, Strategy::Incremental])]
fn test_recognizer_reports_its_strategy(strategy: Strategy) {
    let recognizer = recognizer_for(&RecognizerConfig::for_strategy(strategy));
    assert_eq!(recognizer.strategy(), strategy);
}

#[test]
fn test_wh_grammar_needs_a_mover() {
    // The only complementizer demands +wh: without a wh-word the chart
    // finds no analysis and the incremental recognizer fails the move.
    let grammar = grammar(WH_LEXICON);

    let chart = recognize(&grammar, "mary eats meat", &RecognizerConfig::chart()).unwrap();
    assert_recognition(&chart).rejected();

    assert!(matches!(
        recognize(&grammar, "mary eats meat", &RecognizerConfig::incremental()),
        Err(RecognizeError::MoveInapplicable(_))
    ));

    let lenient = DEFAULT_REGISTRY.get("incremental-lenient").unwrap().config.clone();
    assert_eq!(lenient.move_policy, MovePolicy::Prune);
    let recognition = recognize(&grammar, "mary eats meat", &lenient).unwrap();
    assert_recognition(&recognition).rejected().outstanding(1);
}

#[test]
fn test_incremental_reports_outstanding_obligations() {
    let grammar = grammar(TRANSITIVE_LEXICON);
    let recognition = recognize(&grammar, "mary meat", &RecognizerConfig::incremental()).unwrap();
    assert_recognition(&recognition)
        .strategy(Strategy::Incremental)
        .rejected()
        .outstanding(2);
    assert_eq!(recognition.chart_size, None);
}
