// src/factcheck/providers.rs
//! Provider abstraction plus the built-in providers.
//!
//! Live network clients are external collaborators; what ships here are the
//! placeholder providers, the known-facts verifier, and a static provider for
//! wiring externally produced records (and for tests).

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::embeddings::{cosine, Embedder};
use crate::error::ProviderError;
use crate::types::{
    ClaimBusterScore, CustomVerification, FactCheckEntry, FactCheckRecord, Publisher,
    RecordStatus, VerificationConfidence,
};

/// What a single provider hands back. Each variant lands in its own slot of
/// `FactCheckResult`.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderPayload {
    Records(Vec<FactCheckEntry>),
    ClaimBuster(ClaimBusterScore),
    Custom(CustomVerification),
}

impl ProviderPayload {
    pub fn is_empty(&self) -> bool {
        matches!(self, ProviderPayload::Records(r) if r.is_empty())
    }
}

#[async_trait]
pub trait FactCheckProvider: Send + Sync {
    async fn check(&self, claim: &str) -> Result<ProviderPayload, ProviderError>;

    /// Key used in `errors[].service`.
    fn service(&self) -> &str;
}

/// Stand-in for the Google Fact Check Tools search until the client is wired.
#[derive(Debug, Default, Clone)]
pub struct GoogleFactCheckPlaceholder;

#[async_trait]
impl FactCheckProvider for GoogleFactCheckPlaceholder {
    async fn check(&self, _claim: &str) -> Result<ProviderPayload, ProviderError> {
        tracing::info!("using placeholder google fact check data");
        Ok(ProviderPayload::Records(vec![FactCheckEntry::Record(
            FactCheckRecord {
                publisher: Publisher {
                    name: "Example Fact Checker".to_string(),
                    site: Some("https://example.com".to_string()),
                },
                url: "https://example.com/fact-check/123".to_string(),
                rating: "Mostly True".to_string(),
                date: Some("2023-01-15".to_string()),
                status: RecordStatus::Placeholder,
            },
        )]))
    }

    fn service(&self) -> &str {
        "google_fact_check"
    }
}

/// Stand-in for a check-worthiness scorer.
#[derive(Debug, Default, Clone)]
pub struct ClaimBusterPlaceholder;

#[async_trait]
impl FactCheckProvider for ClaimBusterPlaceholder {
    async fn check(&self, _claim: &str) -> Result<ProviderPayload, ProviderError> {
        tracing::info!("using placeholder claim buster data");
        Ok(ProviderPayload::ClaimBuster(ClaimBusterScore {
            score: 0.75,
            explanation: "This claim contains factual assertions that could be verified"
                .to_string(),
            status: RecordStatus::Placeholder,
        }))
    }

    fn service(&self) -> &str {
        "claim_buster"
    }
}

pub const KNOWN_FACTS: [&str; 5] = [
    "The Earth orbits around the Sun",
    "Water boils at 100 degrees Celsius at sea level",
    "The human body has 206 bones",
    "Mount Everest is the tallest mountain on Earth",
    "The Great Wall of China is visible from space",
];

/// Compares the claim against a list of known facts in embedding space.
pub struct KnownFactsVerifier {
    embedder: Option<Arc<dyn Embedder>>,
    facts: Vec<String>,
}

impl KnownFactsVerifier {
    pub fn new(embedder: Option<Arc<dyn Embedder>>) -> Self {
        Self::with_facts(embedder, KNOWN_FACTS.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_facts(embedder: Option<Arc<dyn Embedder>>, facts: Vec<String>) -> Self {
        Self { embedder, facts }
    }

    pub fn band(similarity: f64) -> VerificationConfidence {
        if similarity > 0.8 {
            VerificationConfidence::High
        } else if similarity > 0.5 {
            VerificationConfidence::Medium
        } else {
            VerificationConfidence::Low
        }
    }

    async fn nearest(
        &self,
        embedder: &dyn Embedder,
        claim: &str,
    ) -> Result<Option<(usize, f64)>, crate::error::SignalError> {
        let mut texts: Vec<&str> = Vec::with_capacity(self.facts.len() + 1);
        texts.push(claim);
        texts.extend(self.facts.iter().map(String::as_str));
        let vectors = embedder.embed(&texts).await?;
        let Some((claim_vec, facts)) = vectors.split_first() else {
            return Ok(None);
        };
        Ok(facts
            .iter()
            .map(|v| cosine(claim_vec, v))
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1)))
    }
}

#[async_trait]
impl FactCheckProvider for KnownFactsVerifier {
    async fn check(&self, claim: &str) -> Result<ProviderPayload, ProviderError> {
        let Some(embedder) = self.embedder.as_deref() else {
            return Ok(ProviderPayload::Custom(CustomVerification {
                most_similar_fact: None,
                similarity_score: None,
                confidence: VerificationConfidence::Low,
                method: "rule_based".to_string(),
                explanation: Some(
                    "NLP model not available, using basic rule-based verification".to_string(),
                ),
                error: None,
            }));
        };

        let verification = match self.nearest(embedder, claim).await {
            Ok(Some((idx, sim))) => CustomVerification {
                most_similar_fact: self.facts.get(idx).cloned(),
                similarity_score: Some(sim),
                confidence: Self::band(sim),
                method: "semantic_similarity".to_string(),
                explanation: None,
                error: None,
            },
            Ok(None) => CustomVerification {
                most_similar_fact: None,
                similarity_score: None,
                confidence: VerificationConfidence::Low,
                method: "semantic_similarity".to_string(),
                explanation: Some("no known facts configured".to_string()),
                error: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "known-facts verification failed");
                CustomVerification {
                    most_similar_fact: None,
                    similarity_score: None,
                    confidence: VerificationConfidence::Low,
                    method: "semantic_similarity_failed".to_string(),
                    explanation: None,
                    error: Some(e.to_string()),
                }
            }
        };
        Ok(ProviderPayload::Custom(verification))
    }

    fn service(&self) -> &str {
        "custom_verification"
    }
}

/// Returns a fixed outcome, optionally after a delay.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    service: String,
    outcome: Result<ProviderPayload, ProviderError>,
    delay: Option<Duration>,
}

impl StaticProvider {
    pub fn ok(service: impl Into<String>, payload: ProviderPayload) -> Self {
        Self {
            service: service.into(),
            outcome: Ok(payload),
            delay: None,
        }
    }

    pub fn failing(service: impl Into<String>, error: ProviderError) -> Self {
        Self {
            service: service.into(),
            outcome: Err(error),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl FactCheckProvider for StaticProvider {
    async fn check(&self, _claim: &str) -> Result<ProviderPayload, ProviderError> {
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        self.outcome.clone()
    }

    fn service(&self) -> &str {
        &self.service
    }
}

/// The provider set the service runs with: placeholders plus the known-facts verifier.
pub fn default_providers(embedder: Option<Arc<dyn Embedder>>) -> Vec<Arc<dyn FactCheckProvider>> {
    vec![
        Arc::new(GoogleFactCheckPlaceholder),
        Arc::new(ClaimBusterPlaceholder),
        Arc::new(KnownFactsVerifier::new(embedder)),
    ]
}
