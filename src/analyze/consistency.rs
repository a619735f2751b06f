//! Sentiment consistency: evidence whose tone diverges sharply from the claim
//! is weaker corroboration.

use std::sync::Arc;

use super::evidence_sample;
use crate::error::SignalError;
use crate::sentiment::PolarityModel;
use crate::types::EvidenceItem;

/// `100 - |Δpolarity| * 50`, clamped into [0, 100].
pub fn item_consistency(claim_polarity: f64, evidence_polarity: f64) -> f64 {
    (100.0 - (claim_polarity - evidence_polarity).abs() * 50.0).clamp(0.0, 100.0)
}

#[derive(Clone)]
pub struct SentimentConsistency {
    model: Arc<dyn PolarityModel>,
}

impl SentimentConsistency {
    pub fn new(model: Arc<dyn PolarityModel>) -> Self {
        Self { model }
    }

    /// Mean consistency over evidence with non-empty content; `Ok(None)` when
    /// there is none.
    pub fn score(
        &self,
        claim: &str,
        evidence: &[EvidenceItem],
    ) -> Result<Option<f64>, SignalError> {
        let with_content: Vec<&EvidenceItem> =
            evidence.iter().filter(|e| !e.content.is_empty()).collect();
        if with_content.is_empty() {
            return Ok(None);
        }

        let claim_polarity = self.model.polarity(claim)?;
        let mut total = 0.0;
        for item in &with_content {
            let p = self.model.polarity(evidence_sample(&item.content))?;
            total += item_consistency(claim_polarity, p);
        }
        let mean = total / with_content.len() as f64;
        tracing::debug!(
            items = with_content.len(),
            claim_polarity,
            score = mean,
            "sentiment consistency"
        );
        Ok(Some(mean))
    }
}
