//! Chatgate configuration structures to map the chatgate.toml configuration.

#![deny(missing_docs)]

mod env_file;
mod health;
mod llm;
mod loader;

use std::{net::SocketAddr, path::Path};

pub use env_file::EnvFile;
pub use health::HealthConfig;
pub use llm::{DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, LlmConfig};
use serde::Deserialize;

/// Main configuration structure for the Chatgate application.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream LLM provider settings.
    #[serde(default)]
    pub llm: LlmConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        loader::load(path)
    }

    /// Override configured values from environment variables.
    ///
    /// The lookup is injected so callers can pass `std::env::var` or a fixed map.
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        loader::apply_env(self, lookup)
    }

    /// Validates the request defaults and model identifier.
    pub fn validate(&self) -> anyhow::Result<()> {
        loader::validate(self)
    }
}

/// HTTP server configuration settings.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// The socket address the server should listen on.
    pub listen_address: Option<SocketAddr>,
    /// Health endpoint configuration.
    #[serde(default)]
    pub health: HealthConfig,
}
