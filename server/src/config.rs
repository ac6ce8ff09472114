//! Process-wide configuration, read once from the environment at start-up.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Value shipped in `.env` templates; treated the same as no key at all
pub const PLACEHOLDER_API_KEY: &str = "YOUR_GEMINI_API_KEY";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ROUTE_COUNT: usize = 3;

/// Whether the language service may be called
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Configured { api_key: String },
    Unconfigured,
}

impl Credential {
    /// Blank or placeholder keys count as unconfigured
    pub fn from_raw(raw: Option<String>) -> Self {
        match raw.map(|key| key.trim().to_string()) {
            Some(key) if !key.is_empty() && key != PLACEHOLDER_API_KEY => {
                Credential::Configured { api_key: key }
            }
            _ => Credential::Unconfigured,
        }
    }
}

/// Connection settings for the generative-language API
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_GEMINI_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub credential: Credential,
    pub gemini: GeminiSettings,
    pub route_count: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address like 0.0.0.0:8080")?;

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_static_dir);

        let timeout_secs = match lookup("GEMINI_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("GEMINI_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_GEMINI_TIMEOUT_SECS,
        };

        let route_count = match lookup("ROUTE_COUNT") {
            Some(raw) => raw.parse::<usize>().context("ROUTE_COUNT must be a number")?,
            None => DEFAULT_ROUTE_COUNT,
        };
        if route_count == 0 {
            anyhow::bail!("ROUTE_COUNT must be at least 1");
        }

        let gemini = GeminiSettings {
            api_base: lookup("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        };

        Ok(Self {
            bind_addr,
            static_dir,
            credential: Credential::from_raw(lookup("GEMINI_API_KEY")),
            gemini,
            route_count,
        })
    }
}

/// The `static/` directory that ships with this crate
pub fn default_static_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}
