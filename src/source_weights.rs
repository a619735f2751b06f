//! # Source Reliability
//!
//! Read-only mapping from a canonical domain (see [`crate::domain`]) to a
//! reliability weight in `[0.0, 1.0]`.
//!
//! - Built-in `default_seed()` with a curated allow-list of outlets and fact-checkers.
//! - Optional JSON override loaded once at startup; falls back to the seed on error.
//! - Misses use a context-dependent default: evidence sources get 0.6,
//!   fact-check publishers get 0.7.

use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

use crate::domain::canonical_domain;

/// Default for evidence sources whose domain is not in the table.
pub const EVIDENCE_DEFAULT: f64 = 0.6;
/// Default for fact-check publishers whose domain is not in the table.
pub const PUBLISHER_DEFAULT: f64 = 0.7;

/// Which caller is asking; decides the fallback on a lookup miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupContext {
    Evidence,
    FactCheckPublisher,
}

impl LookupContext {
    pub fn default_weight(self) -> f64 {
        match self {
            LookupContext::Evidence => EVIDENCE_DEFAULT,
            LookupContext::FactCheckPublisher => PUBLISHER_DEFAULT,
        }
    }
}

/// Reliability table, loaded from JSON or defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceReliability {
    /// Canonical domain → weight.
    #[serde(default)]
    weights: HashMap<String, f64>,
}

impl SourceReliability {
    /// Load the table from a JSON file (`{"weights": {"bbc.com": 0.9}}`).
    /// Falls back to `default_seed()` on error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(s) => match serde_json::from_str::<Self>(&s) {
                Ok(parsed) => parsed.normalized(),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        path = %path.display(),
                        "invalid reliability table, using seed"
                    );
                    Self::default_seed()
                }
            },
            Err(_) => Self::default_seed(),
        }
    }

    /// Build from explicit pairs. Keys are canonicalized the same way lookups are.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        Self {
            weights: pairs
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_string(), v))
                .collect(),
        }
        .normalized()
    }

    fn normalized(self) -> Self {
        let weights = self
            .weights
            .into_iter()
            .filter_map(|(k, v)| {
                let key = canonical_domain(&k);
                (!key.is_empty()).then(|| (key, v.clamp(0.0, 1.0)))
            })
            .collect();
        Self { weights }
    }

    /// Weight for a canonical domain, or `None` on a miss. Empty input always misses.
    pub fn get(&self, domain: &str) -> Option<f64> {
        if domain.is_empty() {
            return None;
        }
        self.weights.get(domain).copied()
    }

    /// Weight for a canonical domain with the context-dependent fallback.
    pub fn weight_for(&self, domain: &str, ctx: LookupContext) -> f64 {
        self.get(domain).unwrap_or_else(|| ctx.default_weight())
    }

    /// Convenience: canonicalize `url`, then look it up.
    pub fn weight_for_url(&self, url: &str, ctx: LookupContext) -> f64 {
        self.weight_for(&canonical_domain(url), ctx)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Built-in curated table. Used when no config is found.
    pub fn default_seed() -> Self {
        let mut weights = HashMap::new();
        for (k, v) in [
            ("bbc.com", 0.90),
            ("nytimes.com", 0.85),
            ("reuters.com", 0.90),
            ("apnews.com", 0.90),
            ("theguardian.com", 0.85),
            ("npr.org", 0.85),
            ("washingtonpost.com", 0.85),
            ("economist.com", 0.85),
            ("nature.com", 0.95),
            ("science.org", 0.95),
            ("who.int", 0.95),
            ("cdc.gov", 0.95),
            ("nih.gov", 0.95),
            ("wikipedia.org", 0.75),
            ("factcheck.org", 0.85),
            ("politifact.com", 0.80),
            ("snopes.com", 0.80),
        ] {
            weights.insert(k.to_string(), v);
        }
        Self { weights }
    }
}

impl Default for SourceReliability {
    fn default() -> Self {
        Self::default_seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> SourceReliability {
        SourceReliability::default_seed()
    }

    #[test]
    fn exact_match() {
        let c = cfg();
        assert!((c.weight_for("nature.com", LookupContext::Evidence) - 0.95).abs() < 1e-9);
        let publisher = c.weight_for("reuters.com", LookupContext::FactCheckPublisher);
        assert!((publisher - 0.90).abs() < 1e-9);
    }

    #[test]
    fn unknown_domain_defaults_differ_by_context() {
        let c = cfg();
        assert!((c.weight_for("example.com", LookupContext::Evidence) - 0.6).abs() < 1e-9);
        assert!(
            (c.weight_for("example.com", LookupContext::FactCheckPublisher) - 0.7).abs() < 1e-9
        );
    }

    #[test]
    fn empty_domain_always_misses() {
        let c = cfg();
        assert_eq!(c.get(""), None);
        assert!((c.weight_for_url("", LookupContext::Evidence) - 0.6).abs() < 1e-9);
        assert!((c.weight_for_url("", LookupContext::FactCheckPublisher) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn url_lookup_canonicalizes() {
        let c = cfg();
        assert!(
            (c.weight_for_url("https://www.bbc.com/news/x", LookupContext::Evidence) - 0.90).abs()
                < 1e-9
        );
    }

    #[test]
    fn from_pairs_clamps_and_canonicalizes_keys() {
        let c =
            SourceReliability::from_pairs([("https://www.Example.org/x", 1.7), ("bad.net", -0.2)]);
        assert_eq!(c.get("example.org"), Some(1.0));
        assert_eq!(c.get("bad.net"), Some(0.0));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn missing_file_falls_back_to_seed() {
        let c = SourceReliability::load_from_file("definitely/not/here.json");
        assert_eq!(c.len(), cfg().len());
    }
}
