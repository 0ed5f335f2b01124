//! TOML Configuration File Support
//!
//! Centralized configuration loading, with an optional TOML file at
//! `~/.config/aura/config.toml`.
//!
//! # Configuration Priority
//!
//! Values are loaded with the following priority (highest first):
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [classifier]
//! endpoint = "http://localhost:5000/analyze"
//! timeout_ms = 10000
//! result_delay_ms = 2000
//!
//! [ambient]
//! particle_count = 50
//! tick_ms = 50
//! seed = 42
//!
//! [surface]
//! frame_ms = 33
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Setting |
//! |---|---|
//! | `AURA_ENDPOINT` | classifier endpoint |
//! | `AURA_TIMEOUT_MS` | request timeout |
//! | `AURA_RESULT_DELAY_MS` | result delay |
//! | `AURA_PARTICLES` | particle count |
//! | `AURA_TICK_MS` | ambient tick period |
//! | `AURA_SEED` | particle seed |
//! | `AURA_FRAME_MS` | surface frame period |

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ambient::{AmbientConfig, DEFAULT_PARTICLE_COUNT, DEFAULT_TICK_INTERVAL};
use crate::analysis::{AnalysisConfig, DEFAULT_REQUEST_TIMEOUT, DEFAULT_RESULT_DELAY};
use crate::backend::DEFAULT_ENDPOINT;

/// Default surface frame period (~30 fps)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(33);

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where the configuration came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Environment variable
    Env,
    /// TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// `[classifier]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierToml {
    /// Analyze endpoint URL
    pub endpoint: Option<String>,
    /// Request timeout in milliseconds
    pub timeout_ms: Option<u64>,
    /// Delay before showing a successful result, in milliseconds
    pub result_delay_ms: Option<u64>,
}

/// `[ambient]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientToml {
    /// Number of particles
    pub particle_count: Option<usize>,
    /// Tick period in milliseconds
    pub tick_ms: Option<u64>,
    /// Seed for a reproducible field
    pub seed: Option<u64>,
}

/// `[surface]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceToml {
    /// Render frame period in milliseconds
    pub frame_ms: Option<u64>,
}

/// Whole TOML file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuraToml {
    /// Classifier settings
    pub classifier: ClassifierToml,
    /// Ambient animation settings
    pub ambient: AmbientToml,
    /// Surface settings
    pub surface: SurfaceToml,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Fully resolved configuration
#[derive(Clone, Debug, PartialEq)]
pub struct AuraConfig {
    /// Classifier endpoint
    pub endpoint: String,
    /// Bound on one request
    pub request_timeout: Duration,
    /// Delay before a successful result is shown
    pub result_delay: Duration,
    /// Number of particles
    pub particle_count: usize,
    /// Ambient tick period
    pub tick_interval: Duration,
    /// Particle seed
    pub seed: Option<u64>,
    /// Surface frame period
    pub frame_interval: Duration,
    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,
    /// Highest-priority source that contributed
    source: ConfigSource,
}

impl Default for AuraConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            result_delay: DEFAULT_RESULT_DELAY,
            particle_count: DEFAULT_PARTICLE_COUNT,
            tick_interval: DEFAULT_TICK_INTERVAL,
            seed: None,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl AuraConfig {
    /// Highest-priority source that contributed
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Timing for the request controller
    #[must_use]
    pub fn analysis(&self) -> AnalysisConfig {
        AnalysisConfig {
            request_timeout: self.request_timeout,
            result_delay: self.result_delay,
        }
    }

    /// Settings for the ambient engine
    #[must_use]
    pub fn ambient(&self) -> AmbientConfig {
        AmbientConfig {
            particle_count: self.particle_count,
            tick_interval: self.tick_interval,
            seed: self.seed,
        }
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        let has_scheme = endpoint
            .strip_prefix("http://")
            .or_else(|| endpoint.strip_prefix("https://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_scheme {
            return Err(ConfigError::ValidationError(format!(
                "endpoint must be an absolute http(s) URL, got {:?}",
                self.endpoint
            )));
        }
        for (name, value) in [
            ("timeout_ms", self.request_timeout),
            ("tick_ms", self.tick_interval),
            ("frame_ms", self.frame_interval),
        ] {
            if value.is_zero() {
                return Err(ConfigError::ValidationError(format!("{name} must be > 0")));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/aura/config.toml` or
/// `~/.config/aura/config.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("aura").join("config.toml"))
}

/// Load configuration from the default path and the process environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read or parsed,
/// or if the result fails validation. A missing file is not an error.
pub fn load_config() -> Result<AuraConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path and the process environment
///
/// # Errors
///
/// See [`load_config`].
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<AuraConfig, ConfigError> {
    load_config_with_env(path.as_deref(), |key| std::env::var(key).ok())
}

/// Load configuration with an explicit environment lookup
///
/// # Errors
///
/// See [`load_config`].
pub fn load_config_with_env<F>(path: Option<&Path>, env: F) -> Result<AuraConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = AuraConfig::default();

    if let Some(config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.to_path_buf(),
                    source: e,
                })?;

            let toml_config: AuraToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.to_path_buf());
            config.source = ConfigSource::File;

            tracing::info!(path = %config_path.display(), "Loaded configuration from file");
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env);
    config.validate()?;
    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut AuraConfig, toml: &AuraToml) {
    if let Some(endpoint) = &toml.classifier.endpoint {
        config.endpoint.clone_from(endpoint);
    }
    if let Some(ms) = toml.classifier.timeout_ms {
        config.request_timeout = Duration::from_millis(ms);
    }
    if let Some(ms) = toml.classifier.result_delay_ms {
        config.result_delay = Duration::from_millis(ms);
    }

    if let Some(count) = toml.ambient.particle_count {
        config.particle_count = count;
    }
    if let Some(ms) = toml.ambient.tick_ms {
        config.tick_interval = Duration::from_millis(ms);
    }
    if toml.ambient.seed.is_some() {
        config.seed = toml.ambient.seed;
    }

    if let Some(ms) = toml.surface.frame_ms {
        config.frame_interval = Duration::from_millis(ms);
    }
}

/// Parse a numeric variable, warning on garbage
fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = raw, "Ignoring unparsable environment variable");
            None
        }
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config<F>(config: &mut AuraConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let mut touched = false;

    if let Some(endpoint) = env("AURA_ENDPOINT") {
        config.endpoint = endpoint;
        touched = true;
    }

    let millis = |key: &str| env(key).and_then(|raw| parse_var::<u64>(key, &raw));

    if let Some(ms) = millis("AURA_TIMEOUT_MS") {
        config.request_timeout = Duration::from_millis(ms);
        touched = true;
    }
    if let Some(ms) = millis("AURA_RESULT_DELAY_MS") {
        config.result_delay = Duration::from_millis(ms);
        touched = true;
    }
    if let Some(ms) = millis("AURA_TICK_MS") {
        config.tick_interval = Duration::from_millis(ms);
        touched = true;
    }
    if let Some(ms) = millis("AURA_FRAME_MS") {
        config.frame_interval = Duration::from_millis(ms);
        touched = true;
    }
    if let Some(seed) = millis("AURA_SEED") {
        config.seed = Some(seed);
        touched = true;
    }
    if let Some(count) = env("AURA_PARTICLES").and_then(|raw| parse_var::<usize>("AURA_PARTICLES", &raw)) {
        config.particle_count = count;
        touched = true;
    }

    if touched {
        config.source = ConfigSource::Env;
    }
}
