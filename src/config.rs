// src/config.rs
//! Engine configuration: TOML file with serde defaults, then env overrides.
//!
//! Lookup order for the file:
//! 1) $ENGINE_CONFIG_PATH
//! 2) config/engine.toml
//! A missing file means defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config/engine.toml";
pub const ENV_CONFIG_PATH: &str = "ENGINE_CONFIG_PATH";
pub const ENV_DEVELOPMENT_MODE: &str = "DEVELOPMENT_MODE";
pub const ENV_PROVIDER_TIMEOUT_MS: &str = "PROVIDER_TIMEOUT_MS";
pub const ENV_REQUEST_DEADLINE_MS: &str = "REQUEST_DEADLINE_MS";
pub const ENV_TEI_URL: &str = "TEI_URL";
pub const ENV_SOURCE_RELIABILITY_PATH: &str = "SOURCE_RELIABILITY_PATH";

fn default_provider_timeout_ms() -> u64 {
    10_000
}
fn default_embed_timeout_ms() -> u64 {
    5_000
}
fn default_reliability_path() -> PathBuf {
    PathBuf::from("config/source_reliability.json")
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Bypass the fact-check cache.
    #[serde(default)]
    pub development_mode: bool,
    #[serde(default = "default_provider_timeout_ms")]
    pub provider_timeout_ms: u64,
    /// Optional overall deadline for one fact-check aggregation.
    #[serde(default)]
    pub request_deadline_ms: Option<u64>,
    /// text-embeddings-inference base url; local hashing embedder when unset.
    #[serde(default)]
    pub tei_url: Option<String>,
    #[serde(default = "default_embed_timeout_ms")]
    pub embed_timeout_ms: u64,
    #[serde(default = "default_true")]
    pub sentiment_enabled: bool,
    #[serde(default = "default_reliability_path")]
    pub source_reliability_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            development_mode: false,
            provider_timeout_ms: default_provider_timeout_ms(),
            request_deadline_ms: None,
            tei_url: None,
            embed_timeout_ms: default_embed_timeout_ms(),
            sentiment_enabled: true,
            source_reliability_path: default_reliability_path(),
        }
    }
}

impl EngineConfig {
    /// File (if present) + environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        let cfg = if path.exists() {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };
        Ok(cfg.with_env_overrides())
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var(ENV_DEVELOPMENT_MODE) {
            self.development_mode = parse_flag(&v);
        }
        if let Some(ms) = env_u64(ENV_PROVIDER_TIMEOUT_MS) {
            self.provider_timeout_ms = ms;
        }
        if let Some(ms) = env_u64(ENV_REQUEST_DEADLINE_MS) {
            self.request_deadline_ms = Some(ms);
        }
        if let Ok(url) = std::env::var(ENV_TEI_URL) {
            let url = url.trim();
            self.tei_url = (!url.is_empty()).then(|| url.to_string());
        }
        if let Ok(p) = std::env::var(ENV_SOURCE_RELIABILITY_PATH) {
            self.source_reliability_path = PathBuf::from(p);
        }
        self
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms.max(1))
    }

    pub fn request_deadline(&self) -> Option<Duration> {
        self.request_deadline_ms.map(Duration::from_millis)
    }

    pub fn embed_timeout(&self) -> Duration {
        Duration::from_millis(self.embed_timeout_ms.max(1))
    }
}

/// Any non-empty value other than `0`/`false`/`no`/`off` enables the flag.
pub fn parse_flag(raw: &str) -> bool {
    let v = raw.trim().to_ascii_lowercase();
    !(v.is_empty() || matches!(v.as_str(), "0" | "false" | "no" | "off"))
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|s| s.trim().parse::<u64>().ok())
}
