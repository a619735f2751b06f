//! Credibility scoring: computes every component signal for one claim and
//! reduces them to a final score and label.
//!
//! Each signal reads the same immutable inputs and writes its own field, so
//! they are evaluated concurrently. A failing signal is logged and leaves its
//! component at the default; scoring itself never fails.

use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::consistency::SentimentConsistency;
use super::cross_source::cross_source_score;
use super::label::ConfidenceLabel;
use super::similarity::SemanticSimilarity;
use super::weights::Weights;
use crate::embeddings::Embedder;
use crate::rating::rating_score;
use crate::sentiment::PolarityModel;
use crate::source_weights::{LookupContext, SourceReliability};
use crate::types::{claim_log_id, new_request_id, EvidenceItem, FactCheckEntry};

/// Value of any component that was not computed.
pub const DEFAULT_COMPONENT: f64 = 50.0;
/// Placeholder until publication dates are wired in.
pub const TEMPORAL_RELEVANCE: f64 = 70.0;

/// Per-signal scores, each in [0, 100].
///
/// `claim_match` is never computed and always stays at the default; it is kept
/// for API compatibility. `temporal_relevance` is always the fixed placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub claim_match: f64,
    pub source_reliability: f64,
    pub semantic_similarity: f64,
    pub sentiment_consistency: f64,
    pub cross_source_consistency: f64,
    pub temporal_relevance: f64,
    pub fact_check: f64,
}

impl Default for ScoreComponents {
    fn default() -> Self {
        Self {
            claim_match: DEFAULT_COMPONENT,
            source_reliability: DEFAULT_COMPONENT,
            semantic_similarity: DEFAULT_COMPONENT,
            sentiment_consistency: DEFAULT_COMPONENT,
            cross_source_consistency: DEFAULT_COMPONENT,
            temporal_relevance: DEFAULT_COMPONENT,
            fact_check: DEFAULT_COMPONENT,
        }
    }
}

impl ScoreComponents {
    fn clamped(mut self) -> Self {
        for v in [
            &mut self.claim_match,
            &mut self.source_reliability,
            &mut self.semantic_similarity,
            &mut self.sentiment_consistency,
            &mut self.cross_source_consistency,
            &mut self.temporal_relevance,
            &mut self.fact_check,
        ] {
            *v = if v.is_finite() {
                (*v).clamp(0.0, 100.0)
            } else {
                DEFAULT_COMPONENT
            };
        }
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub confidence_label: ConfidenceLabel,
    pub components: ScoreComponents,
    pub request_id: String,
}

/// Mean of `rating_score × publisher reliability` over all entries.
/// Raw-string entries have no rating or url: 50 × 0.7.
pub fn fact_check_component(
    entries: &[FactCheckEntry],
    registry: &SourceReliability,
) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total: f64 = entries
        .iter()
        .map(|e| {
            let reliability = registry.weight_for_url(e.url(), LookupContext::FactCheckPublisher);
            let weighted = f64::from(rating_score(e.rating())) * reliability;
            tracing::debug!(
                publisher = e.publisher_name(),
                rating = e.rating(),
                weighted,
                "fact check"
            );
            weighted
        })
        .sum();
    Some(total / entries.len() as f64)
}

/// Mean of `reliability × 100` over every evidence item.
pub fn source_reliability_component(
    evidence: &[EvidenceItem],
    registry: &SourceReliability,
) -> Option<f64> {
    if evidence.is_empty() {
        return None;
    }
    let total: f64 = evidence
        .iter()
        .map(|e| registry.weight_for_url(&e.url, LookupContext::Evidence) * 100.0)
        .sum();
    Some(total / evidence.len() as f64)
}

/// NLP resources, built once at startup. A `None` resource disables the
/// matching signal for the process lifetime.
#[derive(Clone, Default)]
pub struct NlpResources {
    pub embedder: Option<Arc<dyn Embedder>>,
    pub polarity: Option<Arc<dyn PolarityModel>>,
}

#[derive(Clone)]
pub struct CredibilityScorer {
    registry: Arc<SourceReliability>,
    similarity: Option<SemanticSimilarity>,
    consistency: Option<SentimentConsistency>,
    weights: Weights,
}

impl CredibilityScorer {
    pub fn new(registry: Arc<SourceReliability>, resources: NlpResources) -> Self {
        Self {
            registry,
            similarity: resources.embedder.map(SemanticSimilarity::new),
            consistency: resources.polarity.map(SentimentConsistency::new),
            weights: Weights::default(),
        }
    }

    pub fn registry(&self) -> &SourceReliability {
        &self.registry
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Score one claim against a fixed snapshot of fact checks and evidence.
    pub async fn score(
        &self,
        claim: &str,
        fact_checks: &[FactCheckEntry],
        evidence: &[EvidenceItem],
        request_id: Option<&str>,
    ) -> ScoreResult {
        crate::metrics::ensure_metrics_described();
        counter!("scoring_requests_total").increment(1);

        let request_id = request_id
            .map(str::to_string)
            .unwrap_or_else(|| new_request_id(claim));
        let claim_id = claim_log_id(claim);
        tracing::info!(
            %request_id,
            %claim_id,
            evidence = evidence.len(),
            fact_checks = fact_checks.len(),
            "scoring claim"
        );

        let registry = self.registry.as_ref();
        let semantic = async {
            match &self.similarity {
                Some(s) => signal_or_default("semantic_similarity", s.score(claim, evidence).await),
                None => None,
            }
        };
        let rest = async {
            let sentiment = match &self.consistency {
                Some(c) => signal_or_default("sentiment_consistency", c.score(claim, evidence)),
                None => None,
            };
            (
                fact_check_component(fact_checks, registry),
                source_reliability_component(evidence, registry),
                cross_source_score(evidence, registry),
                sentiment,
            )
        };
        let (semantic, (fact_check, reliability, cross_source, sentiment)) =
            tokio::join!(semantic, rest);

        let mut components = ScoreComponents::default();
        if let Some(v) = fact_check {
            components.fact_check = v;
        }
        if let Some(v) = reliability {
            components.source_reliability = v;
        }
        if let Some(v) = semantic {
            components.semantic_similarity = v;
        }
        if let Some(v) = sentiment {
            components.sentiment_consistency = v;
        }
        if let Some(v) = cross_source {
            components.cross_source_consistency = v;
        }
        components.temporal_relevance = TEMPORAL_RELEVANCE;
        let components = components.clamped();

        let score = self.weights.combine(&components);
        let confidence_label = ConfidenceLabel::from_score(score);
        histogram!("scoring_final_score").record(f64::from(score));
        tracing::info!(
            %request_id,
            %claim_id,
            score,
            label = %confidence_label,
            ?components,
            "final score"
        );

        ScoreResult {
            score,
            confidence_label,
            components,
            request_id,
        }
    }
}

fn signal_or_default<E: std::fmt::Display>(
    signal: &'static str,
    r: Result<Option<f64>, E>,
) -> Option<f64> {
    match r {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(signal, error = %e, "signal computation failed, keeping default");
            counter!("signal_failures_total", "signal" => signal).increment(1);
            None
        }
    }
}
