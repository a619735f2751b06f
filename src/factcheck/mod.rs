// src/factcheck/mod.rs
//! Fact-check aggregation: fan out to every provider, merge what comes back,
//! record what failed, cache by claim.

pub mod cache;
pub mod providers;

use metrics::counter;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ProviderError;
use crate::types::{
    claim_key, claim_log_id, new_request_id, FactCheckResult, FactCheckStatus,
    ProviderErrorRecord,
};

pub use cache::{FactCheckCache, InMemoryCache};
pub use providers::{default_providers, FactCheckProvider, ProviderPayload, StaticProvider};

pub const ALL_FAILED_MESSAGE: &str = "All fact-checking methods failed";

#[derive(Debug, Clone, Copy)]
pub struct AggregatorConfig {
    /// Upper bound for a single provider call.
    pub provider_timeout: Duration,
    /// Bypass the cache entirely (no reads, no writes).
    pub development_mode: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(10),
            development_mode: false,
        }
    }
}

pub struct FactCheckAggregator {
    providers: Vec<Arc<dyn FactCheckProvider>>,
    cache: Arc<dyn FactCheckCache>,
    config: AggregatorConfig,
}

impl FactCheckAggregator {
    pub fn new(
        providers: Vec<Arc<dyn FactCheckProvider>>,
        cache: Arc<dyn FactCheckCache>,
        config: AggregatorConfig,
    ) -> Self {
        Self {
            providers,
            cache,
            config,
        }
    }

    pub fn config(&self) -> AggregatorConfig {
        self.config
    }

    pub async fn check(&self, claim: &str, request_id: Option<&str>) -> FactCheckResult {
        self.check_with_deadline(claim, request_id, None).await
    }

    /// Like [`check`](Self::check), with an overall deadline that caps every
    /// provider's timeout. Slow providers land in `errors`.
    pub async fn check_with_deadline(
        &self,
        claim: &str,
        request_id: Option<&str>,
        deadline: Option<Duration>,
    ) -> FactCheckResult {
        crate::metrics::ensure_metrics_described();
        let key = claim_key(claim);
        let claim_id = claim_log_id(claim);

        if !self.config.development_mode {
            if let Some(mut hit) = self.cache.get(&key) {
                tracing::info!(%claim_id, "using cached fact check");
                counter!("factcheck_cache_hits_total").increment(1);
                hit.cached = true;
                return hit;
            }
            counter!("factcheck_cache_misses_total").increment(1);
        }

        let request_id = request_id
            .map(str::to_string)
            .unwrap_or_else(|| new_request_id(claim));
        tracing::info!(%request_id, %claim_id, providers = self.providers.len(), "checking facts");

        let timeout = match deadline {
            Some(d) => d.min(self.config.provider_timeout),
            None => self.config.provider_timeout,
        };
        let outcomes = self.run_providers(claim, timeout).await;
        let result = merge(outcomes, request_id);

        if result.status == FactCheckStatus::Error || self.config.development_mode {
            return result;
        }
        let stored = self.cache.put(&key, result.clone());
        if stored == result {
            result
        } else {
            // A concurrent request stored first; hand back its value.
            FactCheckResult {
                cached: true,
                ..stored
            }
        }
    }

    /// Every provider runs as its own task; outcomes come back in provider order.
    async fn run_providers(
        &self,
        claim: &str,
        timeout: Duration,
    ) -> Vec<(String, Result<ProviderPayload, ProviderError>)> {
        let handles: Vec<_> = self
            .providers
            .iter()
            .map(|p| {
                let provider = Arc::clone(p);
                let claim = claim.to_string();
                let service = p.service().to_string();
                let handle = tokio::spawn(async move {
                    match tokio::time::timeout(timeout, provider.check(&claim)).await {
                        Ok(outcome) => outcome,
                        Err(_) => Err(ProviderError::Timeout(timeout.as_millis() as u64)),
                    }
                });
                (service, handle)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (service, handle) in handles {
            let outcome = match handle.await {
                Ok(o) => o,
                Err(e) => Err(ProviderError::Aborted(e.to_string())),
            };
            outcomes.push((service, outcome));
        }
        outcomes
    }
}

/// Merge provider outcomes into one result and derive its status.
pub fn merge(
    outcomes: Vec<(String, Result<ProviderPayload, ProviderError>)>,
    request_id: String,
) -> FactCheckResult {
    let mut result = FactCheckResult::empty(request_id);

    for (service, outcome) in outcomes {
        match outcome {
            Ok(payload) if payload.is_empty() => {
                tracing::debug!(%service, "provider returned no data");
            }
            Ok(ProviderPayload::Records(records)) => {
                tracing::info!(%service, count = records.len(), "fact check records");
                result.google_fact_check.extend(records);
            }
            Ok(ProviderPayload::ClaimBuster(score)) => {
                tracing::info!(%service, score = score.score, "check-worthiness score");
                result.claim_buster.get_or_insert(score);
            }
            Ok(ProviderPayload::Custom(custom)) => {
                tracing::info!(%service, confidence = ?custom.confidence, "custom verification");
                result.custom_verification.get_or_insert(custom);
            }
            Err(e) => {
                tracing::warn!(%service, error = %e, "fact-check provider failed");
                counter!("factcheck_provider_errors_total", "service" => service.clone())
                    .increment(1);
                result.errors.push(ProviderErrorRecord {
                    service,
                    error: e.to_string(),
                });
            }
        }
    }

    result.status = match (result.has_data(), result.errors.is_empty()) {
        (true, true) => FactCheckStatus::Success,
        (true, false) => FactCheckStatus::Partial,
        (false, _) => {
            result.message = Some(ALL_FAILED_MESSAGE.to_string());
            FactCheckStatus::Error
        }
    };
    result
}
