// src/pipeline.rs
//! End-to-end verification of extracted claims: aggregate fact checks, score,
//! explain. Claim extraction and evidence retrieval happen upstream.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::analyze::{CredibilityScorer, NlpResources, ScoreResult};
use crate::config::EngineConfig;
use crate::embeddings::{Embedder, HashingEmbedder, TeiEmbedder};
use crate::error::PipelineError;
use crate::explain::{explain, Explanation};
use crate::factcheck::{
    default_providers, AggregatorConfig, FactCheckAggregator, FactCheckCache, InMemoryCache,
};
use crate::sentiment::{LexiconPolarity, PolarityModel};
use crate::source_weights::SourceReliability;
use crate::types::{new_request_id, EvidenceItem, FactCheckResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimReport {
    pub claim: String,
    pub fact_checks: FactCheckResult,
    pub evidence: Vec<EvidenceItem>,
    pub score: ScoreResult,
    pub explanation: Explanation,
}

/// Everything needed to serve requests, built once at startup.
pub struct Engine {
    pub aggregator: FactCheckAggregator,
    pub scorer: CredibilityScorer,
    deadline: Option<Duration>,
}

impl Engine {
    pub fn new(
        aggregator: FactCheckAggregator,
        scorer: CredibilityScorer,
        deadline: Option<Duration>,
    ) -> Self {
        Self {
            aggregator,
            scorer,
            deadline,
        }
    }

    /// Build resources from config. A TEI embedder that cannot be constructed
    /// falls back to the local hashing embedder.
    pub fn from_config(cfg: &EngineConfig) -> Self {
        let registry = Arc::new(SourceReliability::load_from_file(&cfg.source_reliability_path));
        tracing::info!(domains = registry.len(), "source reliability table loaded");

        let embedder: Arc<dyn Embedder> = match cfg.tei_url.as_deref() {
            Some(url) => match TeiEmbedder::new(url, cfg.embed_timeout()) {
                Ok(tei) => Arc::new(tei),
                Err(e) => {
                    tracing::warn!(error = %e, "TEI embedder unavailable, using hashing embedder");
                    Arc::new(HashingEmbedder::new())
                }
            },
            None => Arc::new(HashingEmbedder::new()),
        };
        tracing::info!(embedder = embedder.name(), "embedding resource ready");

        let polarity: Option<Arc<dyn PolarityModel>> = if cfg.sentiment_enabled {
            match LexiconPolarity::bundled() {
                Ok(m) => Some(Arc::new(m)),
                Err(e) => {
                    tracing::warn!(error = %e, "sentiment model unavailable");
                    None
                }
            }
        } else {
            None
        };

        let cache: Arc<dyn FactCheckCache> = Arc::new(InMemoryCache::new());
        let aggregator = FactCheckAggregator::new(
            default_providers(Some(Arc::clone(&embedder))),
            cache,
            AggregatorConfig {
                provider_timeout: cfg.provider_timeout(),
                development_mode: cfg.development_mode,
            },
        );
        let scorer = CredibilityScorer::new(
            registry,
            NlpResources {
                embedder: Some(embedder),
                polarity,
            },
        );
        Self::new(aggregator, scorer, cfg.request_deadline())
    }

    pub async fn fact_check(&self, claim: &str, request_id: Option<&str>) -> FactCheckResult {
        self.aggregator
            .check_with_deadline(claim, request_id, self.deadline)
            .await
    }

    /// Verify every non-blank claim against the shared evidence. Each claim
    /// gets a fresh request id, even when its fact checks come from cache.
    pub async fn verify(
        &self,
        claims: &[String],
        evidence: &[EvidenceItem],
    ) -> Result<Vec<ClaimReport>, PipelineError> {
        let claims: Vec<&str> = claims
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();
        if claims.is_empty() {
            return Err(PipelineError::NoClaims);
        }

        let mut reports = Vec::with_capacity(claims.len());
        for claim in claims {
            let request_id = new_request_id(claim);
            let fact_checks = self.fact_check(claim, Some(&request_id)).await;
            let score = self
                .scorer
                .score(
                    claim,
                    &fact_checks.google_fact_check,
                    evidence,
                    Some(&request_id),
                )
                .await;
            let explanation = explain(&fact_checks.google_fact_check, evidence, &score);
            reports.push(ClaimReport {
                claim: claim.to_string(),
                fact_checks,
                evidence: evidence.to_vec(),
                score,
                explanation,
            });
        }
        Ok(reports)
    }
}
