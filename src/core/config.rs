//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.abacus/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::Backend;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AbacusConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_backend: Option<Backend>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RemoteConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REMOTE_BASE_URL: &str = "http://localhost:8080/api/calculator";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub backend: Backend,
    pub remote_base_url: String,
    /// Transport timeout; `None` leaves it to reqwest.
    pub remote_timeout: Option<Duration>,
}

/// Values from the command line. `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub backend: Option<Backend>,
    pub url: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.abacus/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".abacus").join("config.toml"))
}

/// Load config from `~/.abacus/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AbacusConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AbacusConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(AbacusConfig::default());
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<AbacusConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(AbacusConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AbacusConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Abacus Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_backend = "local"          # "local" or "remote"

# [remote]
# base_url = "http://localhost:8080/api/calculator"   # Or set ABACUS_REMOTE_URL
# timeout_secs = 10                                    # Or set ABACUS_TIMEOUT_SECS
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AbacusConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as `resolve`, with the environment lookup injected for tests.
pub fn resolve_with_env(
    config: &AbacusConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Backend: CLI → env → config → default
    let backend = cli
        .backend
        .or_else(|| env("ABACUS_BACKEND").and_then(|s| parse_backend(&s)))
        .or(config.general.default_backend)
        .unwrap_or_default();

    // Remote URL: CLI → env → config → default
    let remote_base_url = cli
        .url
        .clone()
        .or_else(|| env("ABACUS_REMOTE_URL"))
        .or_else(|| config.remote.base_url.clone())
        .unwrap_or_else(|| DEFAULT_REMOTE_BASE_URL.to_string());

    // Timeout: env → config → none
    let remote_timeout = env("ABACUS_TIMEOUT_SECS")
        .and_then(|s| match s.trim().parse::<u64>() {
            Ok(secs) => Some(secs),
            Err(e) => {
                warn!("Ignoring ABACUS_TIMEOUT_SECS={s:?}: {e}");
                None
            }
        })
        .or(config.remote.timeout_secs)
        .map(Duration::from_secs);

    ResolvedConfig {
        backend,
        remote_base_url,
        remote_timeout,
    }
}

fn parse_backend(value: &str) -> Option<Backend> {
    match value.trim().to_ascii_lowercase().as_str() {
        "local" => Some(Backend::Local),
        "remote" => Some(Backend::Remote),
        other => {
            warn!("Unknown backend {other:?}, ignoring");
            None
        }
    }
}
