//! Corroboration breadth: how many evidence items come from highly reliable
//! outlets.

use crate::domain::canonical_domain;
use crate::source_weights::SourceReliability;
use crate::types::EvidenceItem;

/// A source counts as highly reliable strictly above this weight.
pub const HIGH_RELIABILITY: f64 = 0.8;

/// Items whose domain is in the registry with weight > 0.8. Unknown domains
/// never count.
pub fn high_reliability_count(evidence: &[EvidenceItem], registry: &SourceReliability) -> usize {
    evidence
        .iter()
        .filter(|e| {
            registry
                .get(&canonical_domain(&e.url))
                .is_some_and(|w| w > HIGH_RELIABILITY)
        })
        .count()
}

pub fn bucket_score(count: usize) -> f64 {
    match count {
        0 => 40.0,
        1 => 60.0,
        2 => 75.0,
        _ => 90.0,
    }
}

/// `None` when there is no evidence at all (component keeps its default).
pub fn cross_source_score(evidence: &[EvidenceItem], registry: &SourceReliability) -> Option<f64> {
    if evidence.is_empty() {
        return None;
    }
    Some(bucket_score(high_reliability_count(evidence, registry)))
}
