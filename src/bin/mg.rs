//! Command-line interface for the minimalist recognizers
//!
//! Usage:
//!   mg --lexicon `<path>` [--strategy `<preset>`] [--config `<toml>`] [--format `<format>`] `<words>`...
//!   mg --list-strategies
//!
//! The exit status is 0 whether or not the sentence is accepted and 1 when
//! the run could not be completed.

use clap::{Arg, ArgAction, ArgMatches, Command};
use minimalist::mg::config::{Loader, OutputFormat, RecognizerConfig, DEFAULT_REGISTRY};
use minimalist::mg::error::MgError;
use minimalist::mg::lexicon::Grammar;
use minimalist::mg::recognizer::{recognizer_for, Recognition};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let matches = Command::new("mg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Recognize sentences against a Minimalist Grammar lexicon")
        .arg_required_else_help(true)
        .arg(
            Arg::new("lexicon")
                .long("lexicon")
                .short('l')
                .help("Path to the lexicon file")
                .required_unless_present("list-strategies"),
        )
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .short('s')
                .help("Recognizer preset (see --list-strategies)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Report format")
                .value_parser(["text", "json", "yaml"]),
        )
        .arg(
            Arg::new("adjoin")
                .long("adjoin")
                .help("Enable the experimental %-adjoin operator")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-steps")
                .long("max-steps")
                .help("Give up after this many recognizer steps")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log recognizer steps to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-strategies")
                .long("list-strategies")
                .help("List available recognizer presets")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("words")
                .help("The sentence, one word per argument")
                .num_args(1..)
                .required_unless_present("list-strategies")
                .index(1),
        )
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    if matches.get_flag("list-strategies") {
        handle_list_strategies_command();
        return;
    }

    if let Err(e) = handle_recognize_command(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing on stderr so stdout carries only the report
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "minimalist=debug"
    } else {
        "minimalist=warn"
    };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Handle a recognition request
fn handle_recognize_command(matches: &ArgMatches) -> Result<(), MgError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    let settings = loader.build()?;

    let mut config = match matches.get_one::<String>("strategy") {
        Some(name) => DEFAULT_REGISTRY
            .get(name)
            .map(|preset| preset.config.clone().overlay(&settings.recognizer))
            .ok_or_else(|| MgError::UnknownStrategy(name.clone()))?,
        None => RecognizerConfig::from(&settings.recognizer),
    };
    if matches.get_flag("adjoin") {
        config = config.with_adjoin(true);
    }
    if let Some(max_steps) = matches.get_one::<usize>("max-steps") {
        config = config.with_max_steps(*max_steps);
    }

    let format = matches
        .get_one::<String>("format")
        .and_then(|name| OutputFormat::from_name(name))
        .unwrap_or(settings.output.format);

    let lexicon = matches
        .get_one::<String>("lexicon")
        .ok_or_else(|| MgError::Config("no lexicon given".into()))?;
    let grammar = Grammar::from_path(lexicon)?;

    let words: Vec<&str> = matches
        .get_many::<String>("words")
        .map(|words| words.map(|word| word.as_str()).collect())
        .unwrap_or_default();

    let recognition = recognizer_for(&config).recognize(&grammar, &words)?;
    println!("{}", render(&recognition, format)?);
    Ok(())
}

fn render(recognition: &Recognition, format: OutputFormat) -> Result<String, MgError> {
    match format {
        OutputFormat::Text => Ok(recognition.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(recognition)
            .map_err(|e| MgError::Output(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(recognition).map_err(|e| MgError::Output(e.to_string()))
        }
    }
}

/// Handle the --list-strategies flag
fn handle_list_strategies_command() {
    println!("Available recognizer presets:\n");
    for preset in DEFAULT_REGISTRY.list_all() {
        println!("  {}", preset.name);
        println!("    {}", preset.description);
    }
}
