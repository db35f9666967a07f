//! Configuration from the environment (after `.env` is loaded by `main`).

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_NANOGPT_BASE_URL: &str = "https://nano-gpt.com/api";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How the API key is attached to primary catalog requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthStyle {
    /// `x-api-key: <key>`
    #[default]
    ApiKeyHeader,
    /// `Authorization: Bearer <key>`
    Bearer,
}

impl FromStr for AuthStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "x-api-key" | "header" => Ok(AuthStyle::ApiKeyHeader),
            "bearer" => Ok(AuthStyle::Bearer),
            other => Err(ConfigError::InvalidAuthStyle(other.to_string())),
        }
    }
}

impl fmt::Display for AuthStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthStyle::ApiKeyHeader => f.write_str("x-api-key"),
            AuthStyle::Bearer => f.write_str("bearer"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Only the primary catalog needs it.
    pub api_key: Option<String>,
    pub nanogpt_base_url: String,
    pub openrouter_base_url: String,
    pub auth_style: AuthStyle,
    pub timeout: Duration,
    pub bind: SocketAddr,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("NANOGPT_API_KEY is not set")]
    MissingApiKey,
    #[error("NANOGPT_AUTH_STYLE must be 'x-api-key' or 'bearer', got '{0}'")]
    InvalidAuthStyle(String),
    #[error("MODEL_BROWSER_TIMEOUT_SECS must be a positive integer, got '{0}'")]
    InvalidTimeout(String),
    #[error("MODEL_BROWSER_BIND is not a socket address: '{0}'")]
    InvalidBind(String),
}

impl Config {
    /// Build configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let auth_style = match get("NANOGPT_AUTH_STYLE") {
            Some(raw) => raw.parse()?,
            None => AuthStyle::default(),
        };

        let timeout_secs = match get("MODEL_BROWSER_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout(raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let bind_raw = get("MODEL_BROWSER_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_raw.clone()))?;

        Ok(Config {
            api_key: get("NANOGPT_API_KEY"),
            nanogpt_base_url: base_url(get("NANOGPT_BASE_URL"), DEFAULT_NANOGPT_BASE_URL),
            openrouter_base_url: base_url(get("OPENROUTER_BASE_URL"), DEFAULT_OPENROUTER_BASE_URL),
            auth_style,
            timeout: Duration::from_secs(timeout_secs),
            bind,
        })
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}

fn base_url(value: Option<String>, default: &str) -> String {
    value
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Load configuration from the process environment.
pub fn load() -> Result<Config, ConfigError> {
    Config::from_lookup(|key| env::var(key).ok())
}

/// First 10 characters of a key, for logs and status output.
pub fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(10).collect();
    format!("{}...", prefix)
}
