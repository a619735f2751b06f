// src/error.rs
//! Error taxonomy for the scoring engine.
//!
//! Only `ConfigError` and `PipelineError` ever reach a caller as `Err`.
//! Provider failures are recorded inside `FactCheckResult::errors`, and signal
//! failures are logged and swallowed by the scorer (component keeps its default).

use thiserror::Error;

/// A single fact-check provider failed. Recorded, never fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Request(String),

    #[error("provider timed out after {0} ms")]
    Timeout(u64),

    #[error("provider task aborted: {0}")]
    Aborted(String),
}

/// Every provider failed or came back empty.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("all fact-checking methods failed ({failures} provider errors)")]
pub struct AggregationError {
    pub failures: usize,
}

/// Embedding or sentiment computation failed. The affected component
/// reverts to its default value.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("embedding error: {0}")]
    Embedding(String),

    #[error("embedding HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sentiment error: {0}")]
    Sentiment(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Upstream conditions the verification pipeline reports to its caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("No claims could be extracted from the provided content")]
    NoClaims,
}
