// src/explain.rs
//! Human-readable explanation of how a score came about. Deterministic:
//! assembled from the score, the fact checks and the evidence sources.

use serde::{Deserialize, Serialize};

use crate::analyze::ScoreResult;
use crate::domain::canonical_domain;
use crate::types::{EvidenceItem, FactCheckEntry};

/// Steps anyone can follow to re-check a claim.
pub const GENERIC_STEPS: [&str; 4] = [
    "Check official fact-checking websites for this claim",
    "Look for reporting from multiple reliable news sources",
    "Verify the original context and source of the claim",
    "Consider the evidence quality and consistency across sources",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub summary: String,
    pub steps: Vec<String>,
}

pub fn explain(
    fact_checks: &[FactCheckEntry],
    evidence: &[EvidenceItem],
    score: &ScoreResult,
) -> Explanation {
    let mut summary = format!(
        "We analyzed this claim and found it to be {} ({}/100) based on available evidence.",
        score.confidence_label, score.score
    );

    let verdicts: Vec<String> = fact_checks
        .iter()
        .filter_map(|fc| match fc {
            FactCheckEntry::Record(r) if !r.rating.is_empty() => {
                let who = if r.publisher.name.is_empty() {
                    "Fact Checker"
                } else {
                    r.publisher.name.as_str()
                };
                Some(format!("{who}: {}", r.rating))
            }
            FactCheckEntry::Record(_) => None,
            FactCheckEntry::Raw(s) => Some(s.clone()),
        })
        .collect();
    if verdicts.is_empty() {
        summary.push_str(" No direct fact checks were found for this claim.");
    } else {
        summary.push_str(&format!(" Fact checks: {}.", verdicts.join("; ")));
    }

    let mut sources: Vec<String> = evidence
        .iter()
        .map(|e| match &e.title {
            Some(t) if !t.is_empty() => t.clone(),
            _ => canonical_domain(&e.url),
        })
        .filter(|s| !s.is_empty())
        .collect();
    sources.dedup();
    if sources.is_empty() {
        summary.push_str(" No supporting evidence was found for this claim.");
    } else {
        summary.push_str(&format!(" Evidence sources: {}.", sources.join(", ")));
    }

    Explanation {
        summary,
        steps: GENERIC_STEPS.iter().map(|s| s.to_string()).collect(),
    }
}
