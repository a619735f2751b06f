//! Embedding resources: a trait seam plus two backends.
//!
//! - [`TeiEmbedder`]: HTTP client for a text-embeddings-inference `/embed` endpoint.
//! - [`HashingEmbedder`]: local, deterministic bag-of-words feature hashing.
//!
//! Both are built once at startup and shared behind `Arc<dyn Embedder>`.

use async_trait::async_trait;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

use crate::error::SignalError;

/// Maximum number of texts per /embed call.
const BATCH_SIZE: usize = 64;

/// Dimension of the hashed embedding space.
pub const HASHING_DIM: usize = 512;

#[async_trait]
pub trait Embedder: Send + Sync {
    /// One vector per input, same order.
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, SignalError>;

    fn name(&self) -> &'static str;
}

/// Cosine similarity in [-1, 1]. Zero vectors or mismatched lengths give 0.0.
pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut na = 0.0f64;
    let mut nb = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    (dot / (na.sqrt() * nb.sqrt())).clamp(-1.0, 1.0)
}

// ------------------------------------------------------------
// Local hashing embedder
// ------------------------------------------------------------

/// Term-frequency vector over SHA-256-hashed lowercase alphanumeric tokens,
/// L2-normalized.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new() -> Self {
        Self { dim: HASHING_DIM }
    }

    pub fn with_dim(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    fn bucket(&self, token: &str) -> usize {
        let digest = Sha256::digest(token.as_bytes());
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&digest[..8]);
        (u64::from_le_bytes(raw) % self.dim as u64) as usize
    }

    pub fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dim];
        for tok in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            v[self.bucket(&tok.to_lowercase())] += 1.0;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, SignalError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn name(&self) -> &'static str {
        "hashing"
    }
}

// ------------------------------------------------------------
// TEI HTTP embedder
// ------------------------------------------------------------

pub struct TeiEmbedder {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [&'a str],
}

impl TeiEmbedder {
    /// `tei_url` is the service base url; `/embed` is appended.
    pub fn new(tei_url: &str, timeout: Duration) -> Result<Self, SignalError> {
        let client = reqwest::Client::builder()
            .user_agent("credibility-engine/0.1")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/embed", tei_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl Embedder for TeiEmbedder {
    /// Texts are batched into groups of [`BATCH_SIZE`] per request.
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, SignalError> {
        let mut all = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(BATCH_SIZE) {
            let response = self
                .client
                .post(&self.url)
                .json(&EmbedRequest { inputs: chunk })
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(SignalError::Embedding(format!(
                    "TEI returned status {}",
                    response.status()
                )));
            }

            let embeddings: Vec<Vec<f32>> = response.json().await?;
            if embeddings.len() != chunk.len() {
                return Err(SignalError::Embedding(format!(
                    "TEI returned {} embeddings for {} inputs",
                    embeddings.len(),
                    chunk.len()
                )));
            }
            all.extend(embeddings);
        }

        Ok(all)
    }

    fn name(&self) -> &'static str {
        "tei"
    }
}
