//! Configuration loading and typed config structures for idlework.
//!
//! The canonical configuration lives in `idlework-config.yaml` at the project
//! root. Every section and field is optional; anything missing falls back to
//! the defaults below, which match the shipped game balance.

use std::path::{Path, PathBuf};

use idlework_actors::{ActorError, RigConfig};
use idlework_types::ProgressionState;
use serde::Deserialize;

/// Environment variable that overrides `persistence.data_dir`.
pub const DATA_DIR_ENV: &str = "IDLEWORK_DATA_DIR";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is out of range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The actor section failed validation.
    #[error("invalid actor config: {0}")]
    Actors(#[from] ActorError),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameConfig {
    /// Frame timing.
    #[serde(default)]
    pub time: TimeConfig,

    /// Starting progression values.
    #[serde(default)]
    pub economy: EconomyConfig,

    /// Actor pool and animation shape.
    #[serde(default)]
    pub actors: RigConfig,

    /// Save location and cadence.
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Tap hint cadence.
    #[serde(default)]
    pub hints: HintConfig,

    /// Logging output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `IDLEWORK_DATA_DIR` overrides `persistence.data_dir` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or a
    /// validation error.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or use defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_file`] for a file that exists.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No env overrides, no
    /// validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            self.persistence.data_dir = PathBuf::from(dir);
        }
    }

    /// Check every range the game relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("time.max_delta_ms", self.time.max_delta_ms)?;
        if self.time.frame_interval_ms == 0 {
            return Err(invalid("time.frame_interval_ms", "must be at least 1"));
        }

        let economy = &self.economy;
        if economy.level == 0 {
            return Err(invalid("economy.level", "must be at least 1"));
        }
        if economy.next_experience_threshold == 0 {
            return Err(invalid(
                "economy.next_experience_threshold",
                "must be at least 1",
            ));
        }
        if !(economy.experience_level_multiplier.is_finite()
            && economy.experience_level_multiplier > 1.0)
        {
            return Err(invalid(
                "economy.experience_level_multiplier",
                "must be a number above 1",
            ));
        }
        positive("economy.auto_yield_interval_ms", economy.auto_yield_interval_ms)?;
        positive("economy.actor_speed", economy.actor_speed)?;
        if economy.active_actor_count > self.actors.pool_size {
            return Err(ConfigError::Invalid {
                field: "economy.active_actor_count",
                reason: format!(
                    "{} exceeds actors.pool_size {}",
                    economy.active_actor_count, self.actors.pool_size
                ),
            });
        }

        self.actors.validate()?;

        if self.persistence.save_key.trim().is_empty() {
            return Err(invalid("persistence.save_key", "must not be empty"));
        }
        if self.persistence.autosave_interval_secs == 0 {
            return Err(invalid(
                "persistence.autosave_interval_secs",
                "must be at least 1",
            ));
        }
        positive("hints.interval_ms", self.hints.interval_ms)?;

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_owned(),
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

/// Frame timing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeConfig {
    /// Largest frame delta handed to receivers, in milliseconds.
    #[serde(default = "default_max_delta_ms")]
    pub max_delta_ms: f64,

    /// Target interval between frames in the runner, in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            max_delta_ms: default_max_delta_ms(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

/// Starting progression values for a new game (or after a reset).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EconomyConfig {
    /// Starting funds.
    #[serde(default)]
    pub funds: u64,

    /// Starting level.
    #[serde(default = "default_level")]
    pub level: u32,

    /// Experience needed for the first level-up.
    #[serde(default = "default_next_experience_threshold")]
    pub next_experience_threshold: u64,

    /// Threshold growth per level. Above 1.
    #[serde(default = "default_experience_level_multiplier")]
    pub experience_level_multiplier: f64,

    /// Units yielded per action.
    #[serde(default = "default_per_action_yield")]
    pub per_action_yield: u64,

    /// Funds credited per unit yielded.
    #[serde(default = "default_funds_per_yield_unit")]
    pub funds_per_yield_unit: u64,

    /// Milliseconds between automatic actions.
    #[serde(default = "default_auto_yield_interval_ms")]
    pub auto_yield_interval_ms: f64,

    /// Actors visible at start.
    #[serde(default = "default_active_actor_count")]
    pub active_actor_count: u32,

    /// Actor speed multiplier at start.
    #[serde(default = "default_actor_speed")]
    pub actor_speed: f64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            funds: 0,
            level: default_level(),
            next_experience_threshold: default_next_experience_threshold(),
            experience_level_multiplier: default_experience_level_multiplier(),
            per_action_yield: default_per_action_yield(),
            funds_per_yield_unit: default_funds_per_yield_unit(),
            auto_yield_interval_ms: default_auto_yield_interval_ms(),
            active_actor_count: default_active_actor_count(),
            actor_speed: default_actor_speed(),
        }
    }
}

impl EconomyConfig {
    /// The progression state a fresh game starts from.
    pub fn starting_state(&self) -> ProgressionState {
        ProgressionState {
            funds: self.funds,
            score: 0,
            experience: 0,
            level: self.level,
            next_experience_threshold: self.next_experience_threshold,
            experience_level_multiplier: self.experience_level_multiplier,
            per_action_yield: self.per_action_yield,
            funds_per_yield_unit: self.funds_per_yield_unit,
            auto_yield_interval_ms: self.auto_yield_interval_ms,
            auto_yield_elapsed_ms: 0.0,
            active_actor_count: self.active_actor_count,
            actor_speed: self.actor_speed,
        }
    }
}

/// Save location and cadence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistenceConfig {
    /// Key the save record is stored under.
    #[serde(default = "default_save_key")]
    pub save_key: String,

    /// Directory for the file store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Seconds between autosaves in the runner.
    #[serde(default = "default_autosave_interval_secs")]
    pub autosave_interval_secs: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            save_key: default_save_key(),
            data_dir: default_data_dir(),
            autosave_interval_secs: default_autosave_interval_secs(),
        }
    }
}

/// Tap hint cadence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HintConfig {
    /// Milliseconds between hints.
    #[serde(default = "default_hint_interval_ms")]
    pub interval_ms: f64,

    /// Hints stop once the score reaches this value.
    #[serde(default = "default_hint_score_threshold")]
    pub score_threshold: u64,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_hint_interval_ms(),
            score_threshold: default_hint_score_threshold(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

const fn default_max_delta_ms() -> f64 {
    100.0
}

const fn default_frame_interval_ms() -> u64 {
    16
}

const fn default_level() -> u32 {
    1
}

const fn default_next_experience_threshold() -> u64 {
    5
}

const fn default_experience_level_multiplier() -> f64 {
    1.68
}

const fn default_per_action_yield() -> u64 {
    1
}

const fn default_funds_per_yield_unit() -> u64 {
    10
}

const fn default_auto_yield_interval_ms() -> f64 {
    1000.0
}

const fn default_active_actor_count() -> u32 {
    1
}

const fn default_actor_speed() -> f64 {
    1.0
}

fn default_save_key() -> String {
    "idlework.save".to_owned()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("saves")
}

const fn default_autosave_interval_secs() -> u64 {
    30
}

const fn default_hint_interval_ms() -> f64 {
    2000.0
}

const fn default_hint_score_threshold() -> u64 {
    3
}

fn default_log_level() -> String {
    "info".to_owned()
}
