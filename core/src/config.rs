//! Run configuration: where the remote API lives and how to authenticate.
//!
//! Sources, lowest priority first: built-in defaults, an optional
//! `gorest.toml` in the working directory, then the process environment
//! (`BASE_URL`, `TOKEN`, `TIMEOUT_SECS`). A missing or blank base URL or
//! token is fatal before any scenario runs.

use std::fmt;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE: &str = "gorest.toml";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("configuration could not be read: {0}")]
    Extract(#[from] Box<figment::Error>),
}

/// Shape of the merged sources before validation.
#[derive(Debug, Serialize, Deserialize)]
struct RawConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    timeout_secs: u64,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Clone)]
pub struct ContractConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
}

impl fmt::Debug for ContractConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ContractConfig {
    /// Defaults, then `gorest.toml`, then the environment.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(RawConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::raw().only(&["BASE_URL", "TOKEN", "TIMEOUT_SECS"]))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let raw: RawConfig = figment.extract().map_err(Box::new)?;

        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        let mut missing = Vec::new();
        if !present(&raw.base_url) {
            missing.push("BASE_URL");
        }
        if !present(&raw.token) {
            missing.push("TOKEN");
        }
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        if raw.timeout_secs == 0 {
            return Err(ConfigError::Invalid("TIMEOUT_SECS must be greater than 0".to_string()));
        }

        Ok(Self {
            base_url: raw.base_url.unwrap_or_default(),
            token: raw.token.unwrap_or_default(),
            timeout: Duration::from_secs(raw.timeout_secs),
        })
    }
}
