//! Fixed combiner weights and the weighted reduction to a final score.
//!
//! `claim_match` has no weight; `temporal_relevance` is weighted but always
//! carries its fixed placeholder value.

use serde::Serialize;

use super::scoring::ScoreComponents;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Weights {
    pub fact_check: f64,
    pub source_reliability: f64,
    pub semantic_similarity: f64,
    pub sentiment_consistency: f64,
    pub cross_source_consistency: f64,
    pub temporal_relevance: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            fact_check: 0.25,
            source_reliability: 0.20,
            semantic_similarity: 0.20,
            sentiment_consistency: 0.10,
            cross_source_consistency: 0.15,
            temporal_relevance: 0.10,
        }
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.fact_check
            + self.source_reliability
            + self.semantic_similarity
            + self.sentiment_consistency
            + self.cross_source_consistency
            + self.temporal_relevance
    }

    /// Unrounded weighted sum.
    pub fn weighted_sum(&self, c: &ScoreComponents) -> f64 {
        c.fact_check * self.fact_check
            + c.source_reliability * self.source_reliability
            + c.semantic_similarity * self.semantic_similarity
            + c.sentiment_consistency * self.sentiment_consistency
            + c.cross_source_consistency * self.cross_source_consistency
            + c.temporal_relevance * self.temporal_relevance
    }

    /// Round to nearest (halves away from zero), clamp into 0..=100.
    pub fn combine(&self, c: &ScoreComponents) -> u8 {
        let raw = self.weighted_sum(c);
        if !raw.is_finite() {
            return 50;
        }
        raw.round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(v: f64) -> ScoreComponents {
        ScoreComponents {
            claim_match: v,
            source_reliability: v,
            semantic_similarity: v,
            sentiment_consistency: v,
            cross_source_consistency: v,
            temporal_relevance: v,
            fact_check: v,
        }
    }

    #[test]
    fn weights_sum_to_one() {
        assert_eq!(Weights::default().sum(), 1.0);
    }

    #[test]
    fn uniform_input_is_fixed_point() {
        let w = Weights::default();
        assert_eq!(w.combine(&uniform(50.0)), 50);
        assert_eq!(w.combine(&uniform(0.0)), 0);
        assert_eq!(w.combine(&uniform(100.0)), 100);
    }

    #[test]
    fn claim_match_has_no_effect() {
        let w = Weights::default();
        let mut c = uniform(50.0);
        c.claim_match = 100.0;
        assert_eq!(w.combine(&c), 50);
    }

    #[test]
    fn weighted_example() {
        let w = Weights::default();
        let c = ScoreComponents {
            claim_match: 50.0,
            fact_check: 81.0,
            source_reliability: 95.0,
            semantic_similarity: 80.0,
            sentiment_consistency: 100.0,
            cross_source_consistency: 60.0,
            temporal_relevance: 70.0,
        };
        // 20.25 + 19 + 16 + 10 + 9 + 7 = 81.25
        assert!((w.weighted_sum(&c) - 81.25).abs() < 1e-9);
        assert_eq!(w.combine(&c), 81);
    }

    #[test]
    fn out_of_range_is_clamped() {
        let w = Weights::default();
        assert_eq!(w.combine(&uniform(250.0)), 100);
        assert_eq!(w.combine(&uniform(-10.0)), 0);
        assert_eq!(w.combine(&uniform(f64::NAN)), 50);
    }
}
