// src/analyze/mod.rs
//! Scoring pipeline: per-signal engines, the weighted combiner and the label ladder.

pub mod consistency;
pub mod cross_source;
pub mod label;
pub mod scoring;
pub mod similarity;
pub mod weights;

// Re-export convenient types.
pub use crate::analyze::label::ConfidenceLabel;
pub use crate::analyze::scoring::{CredibilityScorer, NlpResources, ScoreComponents, ScoreResult};
pub use crate::analyze::weights::Weights;

/// Evidence content is sampled to this many characters before NLP signals.
pub const EVIDENCE_SAMPLE_CHARS: usize = 1000;

/// First `EVIDENCE_SAMPLE_CHARS` characters of `content`, on a char boundary.
pub fn evidence_sample(content: &str) -> &str {
    match content.char_indices().nth(EVIDENCE_SAMPLE_CHARS) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}
