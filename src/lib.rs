// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod config;
pub mod domain;
pub mod embeddings;
pub mod error;
pub mod explain;
pub mod factcheck;
pub mod metrics;
pub mod pipeline;
pub mod rating;
pub mod sentiment;
pub mod source_weights;
pub mod types;

// Scoring engines, combiner and labeler
pub mod analyze;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{
    ConfidenceLabel, CredibilityScorer, NlpResources, ScoreComponents, ScoreResult,
};
pub use crate::api::router;
pub use crate::factcheck::FactCheckAggregator;
pub use crate::pipeline::Engine;
pub use crate::types::{EvidenceItem, FactCheckEntry, FactCheckRecord, FactCheckResult};
