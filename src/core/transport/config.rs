//! Which transport to serve on, and where.
//!
//! `MCP_TRANSPORT` picks the transport (`stdio`, `tcp` or `http`). An
//! unknown or disabled choice falls back to the first compiled-in transport
//! in that order.

use serde::{Deserialize, Serialize};
use tracing::warn;

#[cfg(any(feature = "tcp", feature = "http"))]
use crate::core::config::env_parsed;
#[cfg(feature = "http")]
use crate::core::config::env_flag;
use crate::core::config::env_value;

#[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
compile_error!("At least one transport feature must be enabled: stdio, tcp, or http");

#[cfg(any(feature = "tcp", feature = "http"))]
const LOCALHOST: &str = "127.0.0.1";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// One client over stdin/stdout.
    #[cfg(feature = "stdio")]
    Stdio,

    /// Line-delimited JSON-RPC, one MCP session per connection.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),

    /// Stateless JSON-RPC over HTTP POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

#[cfg(feature = "tcp")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TcpConfig {
    pub host: String,
    pub port: u16,
}

#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,

    /// Path the JSON-RPC endpoint is mounted on.
    pub rpc_path: String,

    /// Allow any origin, for browser clients.
    pub enable_cors: bool,
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            host: LOCALHOST.to_string(),
            port: 3000,
        }
    }
}

#[cfg(feature = "tcp")]
impl TcpConfig {
    /// Defaults overridden by `MCP_TCP_HOST` and `MCP_TCP_PORT`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_value("MCP_TCP_HOST").unwrap_or(defaults.host),
            port: env_parsed("MCP_TCP_PORT").unwrap_or(defaults.port),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: LOCALHOST.to_string(),
            port: 8080,
            rpc_path: "/mcp".to_string(),
            enable_cors: true,
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// Defaults overridden by `MCP_HTTP_HOST`, `MCP_HTTP_PORT`,
    /// `MCP_HTTP_PATH` and `MCP_HTTP_CORS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let mut rpc_path = env_value("MCP_HTTP_PATH").unwrap_or(defaults.rpc_path);
        if !rpc_path.starts_with('/') {
            rpc_path.insert(0, '/');
        }
        Self {
            host: env_value("MCP_HTTP_HOST").unwrap_or(defaults.host),
            port: env_parsed("MCP_HTTP_PORT").unwrap_or(defaults.port),
            rpc_path,
            enable_cors: env_flag("MCP_HTTP_CORS", defaults.enable_cors),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        return Self::Stdio;

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        return Self::Tcp(TcpConfig::default());

        #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
        return Self::Http(HttpConfig::default());
    }
}

impl TransportConfig {
    /// Load the transport selected by `MCP_TRANSPORT`.
    pub fn from_env() -> Self {
        let requested = env_value("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match requested.as_str() {
            #[cfg(feature = "tcp")]
            "tcp" => Self::Tcp(TcpConfig::from_env()),
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::from_env()),
            "" => Self::default(),
            other => {
                let fallback = Self::default();
                warn!(
                    "MCP_TRANSPORT={:?} is unknown or not compiled in, using {}",
                    other,
                    fallback.description()
                );
                fallback
            }
        }
    }

    /// Short human-readable form for logs.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}:{}", cfg.host, cfg.port),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }
}
