//! Semantic similarity between a claim and its evidence.

use std::sync::Arc;

use super::evidence_sample;
use crate::embeddings::{cosine, Embedder};
use crate::error::SignalError;
use crate::types::EvidenceItem;

/// Maps cosine similarity from [-1, 1] onto [0, 100].
pub fn rescale(sim: f64) -> f64 {
    ((sim + 1.0) * 50.0).clamp(0.0, 100.0)
}

#[derive(Clone)]
pub struct SemanticSimilarity {
    embedder: Arc<dyn Embedder>,
}

impl SemanticSimilarity {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    pub fn embedder_name(&self) -> &'static str {
        self.embedder.name()
    }

    /// Mean rescaled similarity over evidence with non-empty content.
    /// `Ok(None)` when no evidence has content.
    pub async fn score(
        &self,
        claim: &str,
        evidence: &[EvidenceItem],
    ) -> Result<Option<f64>, SignalError> {
        let samples: Vec<&str> = evidence
            .iter()
            .filter(|e| !e.content.is_empty())
            .map(|e| evidence_sample(&e.content))
            .collect();
        if samples.is_empty() {
            return Ok(None);
        }

        let mut texts = Vec::with_capacity(samples.len() + 1);
        texts.push(claim);
        texts.extend(samples.iter().copied());

        let vectors = self.embedder.embed(&texts).await?;
        if vectors.len() != texts.len() {
            return Err(SignalError::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                vectors.len()
            )));
        }

        let (claim_vec, rest) = vectors.split_first().ok_or_else(|| {
            SignalError::Embedding("embedder returned no vectors".to_string())
        })?;
        let total: f64 = rest.iter().map(|v| rescale(cosine(claim_vec, v))).sum();
        let mean = total / rest.len() as f64;
        tracing::debug!(items = rest.len(), score = mean, "semantic similarity");
        Ok(Some(mean))
    }
}
