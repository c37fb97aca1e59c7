//! Configuration management for the MCP server.
//!
//! Settings start from defaults and are overridden by `MCP_*` environment
//! variables, optionally loaded from a `.env` file.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
#[cfg(any(feature = "tcp", feature = "http"))]
use std::str::FromStr;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Prompt library storage.
    pub library: LibraryConfig,

    /// Prompts domain configuration.
    pub prompts: PromptsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Where and how the prompt library is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// JSON snapshot file. `None` keeps the library in memory only.
    pub snapshot_path: Option<PathBuf>,

    /// Rewrite the snapshot after every successful mutation.
    pub autosave: bool,
}

/// Configuration for the prompts domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsConfig {
    /// Let `prompts/get` fall back to an exact, unique title when the name
    /// is not a prompt id.
    pub resolve_titles: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "prompt-library-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            autosave: true,
        }
    }
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            resolve_titles: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl LibraryConfig {
    /// A persistent library at `path` with autosave on.
    pub fn persistent(path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: Some(path.into()),
            autosave: true,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`,
    /// `MCP_LIBRARY_PATH`, `MCP_LIBRARY_AUTOSAVE`,
    /// `MCP_PROMPTS_RESOLVE_TITLES` and the transport variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(name) = env_value("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = env_value("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        match env_value("MCP_LIBRARY_PATH") {
            Some(path) => {
                config.library.snapshot_path = Some(PathBuf::from(path));
                info!(
                    "Prompt library snapshot: {:?}",
                    config.library.snapshot_path
                );
            }
            None => warn!("MCP_LIBRARY_PATH not set - the prompt library will not be persisted"),
        }

        config.library.autosave = env_flag("MCP_LIBRARY_AUTOSAVE", config.library.autosave);
        config.prompts.resolve_titles =
            env_flag("MCP_PROMPTS_RESOLVE_TITLES", config.prompts.resolve_titles);

        config.transport = TransportConfig::from_env();

        config
    }
}

/// A trimmed, non-blank environment variable.
pub(crate) fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// An on/off environment variable, or `default` when unset.
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    env_value(key).map_or(default, |v| parse_flag(&v, default))
}

/// A parsed environment variable. Values that do not parse are ignored
/// with a warning.
#[cfg(any(feature = "tcp", feature = "http"))]
pub(crate) fn env_parsed<T: FromStr>(key: &str) -> Option<T> {
    let raw = env_value(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}

/// Interpret an on/off environment value. Unrecognized text yields `default`.
pub(crate) fn parse_flag(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}
