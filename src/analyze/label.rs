//! Final score → human-facing confidence bucket.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLabel {
    #[serde(rename = "Likely True")]
    LikelyTrue,
    #[serde(rename = "Somewhat True")]
    SomewhatTrue,
    #[serde(rename = "Mixed / Needs Verification")]
    Mixed,
    #[serde(rename = "Somewhat False")]
    SomewhatFalse,
    #[serde(rename = "Likely False")]
    LikelyFalse,
}

impl ConfidenceLabel {
    /// Threshold ladder, evaluated top to bottom:
    /// `>=75`, `>=60`, `<=30`, `<=45`, otherwise mixed (46..=59).
    pub fn from_score(score: u8) -> Self {
        if score >= 75 {
            ConfidenceLabel::LikelyTrue
        } else if score >= 60 {
            ConfidenceLabel::SomewhatTrue
        } else if score <= 30 {
            ConfidenceLabel::LikelyFalse
        } else if score <= 45 {
            ConfidenceLabel::SomewhatFalse
        } else {
            ConfidenceLabel::Mixed
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLabel::LikelyTrue => "Likely True",
            ConfidenceLabel::SomewhatTrue => "Somewhat True",
            ConfidenceLabel::Mixed => "Mixed / Needs Verification",
            ConfidenceLabel::SomewhatFalse => "Somewhat False",
            ConfidenceLabel::LikelyFalse => "Likely False",
        }
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
