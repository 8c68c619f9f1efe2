use serde::Deserialize;
use std::path::{Path, PathBuf};

use thiserror::Error;

// =============================================================================
// Resolution constants
// =============================================================================

/// Version handed to `go get` when precise resolution fails
pub const DEFAULT_VERSION: &str = "latest";

/// Number of leading commit id characters used as a version
pub const COMMIT_ID_LEN: usize = 8;

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for go-import metadata lookups in milliseconds
pub const METADATA_TIMEOUT_MS: u64 = 5_000;

/// Timeout for provider API calls in milliseconds
pub const PROVIDER_TIMEOUT_MS: u64 = 3_000;

/// Timeout for `git ls-remote` in milliseconds
pub const GIT_TIMEOUT_MS: u64 = 5_000;

/// Default base URL for GitHub API
pub const DEFAULT_GITHUB_BASE_URL: &str = "https://api.github.com";

/// Environment variable overriding the GitHub token
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path:?} failed: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config {path:?} failed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Tool configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub upgrade: UpgradeConfig,
    pub timeouts: TimeoutConfig,
    pub registries: RegistriesConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct UpgradeConfig {
    /// Also upgrade `// indirect` requirements
    pub include_indirect: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeoutConfig {
    pub metadata_ms: u64,
    pub provider_ms: u64,
    pub git_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            metadata_ms: METADATA_TIMEOUT_MS,
            provider_ms: PROVIDER_TIMEOUT_MS,
            git_ms: GIT_TIMEOUT_MS,
        }
    }
}

/// Provider-specific configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RegistriesConfig {
    pub github: GitHubConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GitHubConfig {
    pub enabled: bool,
    pub base_url: String,
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_GITHUB_BASE_URL.to_string(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Write logs to this file instead of stderr
    pub file: Option<PathBuf>,
}

impl Config {
    /// Config file to read: the explicit path, else the default location
    /// when a file exists there
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        locate_with(explicit, config_path())
    }

    /// Loads the configuration from `path`, or the defaults without one.
    ///
    /// `GITHUB_TOKEN` overrides the configured GitHub token.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(token) = std::env::var(GITHUB_TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
        {
            config.registries.github.token = Some(token);
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the path to the config directory for gomod.
/// Uses $XDG_CONFIG_HOME/gomod if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/gomod,
/// or ./gomod if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn locate_with(explicit: Option<&Path>, default_path: PathBuf) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_path.is_file().then_some(default_path),
    }
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("gomod")
}
