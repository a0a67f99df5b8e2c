//! Recognizer configuration
//!
//! Two layers:
//!
//! 1. `MgConfig`, deserialized with the `config` crate from the embedded
//!    `defaults/mg.default.toml` plus any user files and key overrides
//!    layered through [`Loader`].
//! 2. `RecognizerConfig`, the plain value handed to a recognition run. It is
//!    derived from the loaded settings or taken from a named preset in the
//!    [`StrategyRegistry`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/mg.default.toml");

/// Which recognition algorithm runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Exhaustive agenda/chart search
    Chart,
    /// Left-to-right obligation stack
    Incremental,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Chart => "chart",
            Strategy::Incremental => "incremental",
        }
    }

    /// The chart search treats a failed move as a dead branch, the
    /// incremental recognizer has no other branch to fall back on.
    pub fn default_move_policy(&self) -> MovePolicy {
        match self {
            Strategy::Chart => MovePolicy::Prune,
            Strategy::Incremental => MovePolicy::Abort,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What happens when move finds zero or several movers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MovePolicy {
    /// Drop the branch and keep searching
    Prune,
    /// End the run with `MoveInapplicable`
    Abort,
}

/// Settings for one recognition run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizerConfig {
    pub strategy: Strategy,
    pub move_policy: MovePolicy,
    /// Enables the `%` adjoin operator. The incremental recognizer ignores it.
    pub adjoin: bool,
    pub max_steps: Option<usize>,
}

impl RecognizerConfig {
    pub fn chart() -> Self {
        Self::for_strategy(Strategy::Chart)
    }

    pub fn incremental() -> Self {
        Self::for_strategy(Strategy::Incremental)
    }

    pub fn for_strategy(strategy: Strategy) -> Self {
        RecognizerConfig {
            strategy,
            move_policy: strategy.default_move_policy(),
            adjoin: false,
            max_steps: None,
        }
    }

    pub fn with_move_policy(mut self, move_policy: MovePolicy) -> Self {
        self.move_policy = move_policy;
        self
    }

    pub fn with_adjoin(mut self, adjoin: bool) -> Self {
        self.adjoin = adjoin;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Lay the explicitly set values of `settings` over this config.
    ///
    /// The strategy stays. Unset `move_policy` and `max_steps` keep the
    /// current values and `adjoin` can only be switched on.
    pub fn overlay(mut self, settings: &RecognizerSettings) -> Self {
        if let Some(move_policy) = settings.move_policy {
            self.move_policy = move_policy;
        }
        if let Some(max_steps) = settings.max_steps {
            self.max_steps = Some(max_steps);
        }
        self.adjoin |= settings.adjoin;
        self
    }
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self::chart()
    }
}

impl From<&RecognizerSettings> for RecognizerConfig {
    fn from(settings: &RecognizerSettings) -> Self {
        RecognizerConfig {
            strategy: settings.strategy,
            move_policy: settings
                .move_policy
                .unwrap_or_else(|| settings.strategy.default_move_policy()),
            adjoin: settings.adjoin,
            max_steps: settings.max_steps,
        }
    }
}

/// Top-level configuration consumed by the `mg` binary.
#[derive(Debug, Clone, Deserialize)]
pub struct MgConfig {
    pub recognizer: RecognizerSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecognizerSettings {
    pub strategy: Strategy,
    pub adjoin: bool,
    #[serde(default)]
    pub move_policy: Option<MovePolicy>,
    #[serde(default)]
    pub max_steps: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

/// How the binary renders a recognition report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<OutputFormat> {
        match name {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "yaml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }
}

/// Builds an `MgConfig` from layers, later ones winning
///
/// The embedded `mg.default.toml` is always the bottom layer. `mg --config`
/// adds a user file on top, and tests pin single keys such as
/// `recognizer.max_steps` with `set_override`.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Add a TOML file of recognizer/output settings. `build` fails if it is
    /// missing.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Like `with_file`, for a file that may not exist.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Pin one dotted key, e.g. `recognizer.strategy`, above every file.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers and deserialize. Unknown strategies, policies or
    /// formats fail here.
    pub fn build(self) -> Result<MgConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<MgConfig, ConfigError> {
    Loader::new().build()
}

/// A named recognizer configuration
#[derive(Debug, Clone)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub config: RecognizerConfig,
}

/// Registry of named recognizer presets
pub struct StrategyRegistry {
    presets: HashMap<String, Preset>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        StrategyRegistry {
            presets: HashMap::new(),
        }
    }

    pub fn register(&mut self, preset: Preset) {
        self.presets.insert(preset.name.clone(), preset);
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// List all presets (sorted by name)
    pub fn list_all(&self) -> Vec<&Preset> {
        let mut presets: Vec<_> = self.presets.values().collect();
        presets.sort_by(|a, b| a.name.cmp(&b.name));
        presets
    }

    /// Create registry with the standard presets
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(Preset {
            name: "chart".into(),
            description: "Exhaustive chart search, merge and move, failed moves pruned".into(),
            config: RecognizerConfig::chart(),
        });

        registry.register(Preset {
            name: "chart-adjoin".into(),
            description: "Chart search with the experimental %-adjoin operator".into(),
            config: RecognizerConfig::chart().with_adjoin(true),
        });

        registry.register(Preset {
            name: "chart-strict".into(),
            description: "Chart search that stops at the first failed move".into(),
            config: RecognizerConfig::chart().with_move_policy(MovePolicy::Abort),
        });

        registry.register(Preset {
            name: "incremental".into(),
            description: "Left-to-right obligation stack, failed moves are errors".into(),
            config: RecognizerConfig::incremental(),
        });

        registry.register(Preset {
            name: "incremental-lenient".into(),
            description: "Left-to-right obligation stack, failed moves reject the input".into(),
            config: RecognizerConfig::incremental().with_move_policy(MovePolicy::Prune),
        });

        registry
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// The standard presets, built on first use
pub static DEFAULT_REGISTRY: Lazy<StrategyRegistry> = Lazy::new(StrategyRegistry::with_defaults);
