// src/rating.rs
//! Free-text fact-check verdict → numeric score.
//!
//! Rules are evaluated top to bottom and the first rule with any matching
//! needle wins. Order matters: "mostly false" also contains "false", so the
//! first rule claims it.

use serde::Serialize;

/// Verdict class, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingClass {
    False,
    MostlyFalse,
    Mixed,
    MostlyTrue,
    True,
    Unknown,
}

impl RatingClass {
    pub fn score(self) -> u8 {
        match self {
            RatingClass::False => 20,
            RatingClass::MostlyFalse => 30,
            RatingClass::Mixed | RatingClass::Unknown => 50,
            RatingClass::MostlyTrue => 70,
            RatingClass::True => 90,
        }
    }
}

/// Ordered rule table: (class, substrings). Needles are lower-case.
pub const RATING_RULES: [(RatingClass, &[&str]); 5] = [
    (RatingClass::False, &["false", "pants on fire"]),
    (RatingClass::MostlyFalse, &["mostly false", "misleading"]),
    (RatingClass::Mixed, &["half true", "mixture", "mixed"]),
    (RatingClass::MostlyTrue, &["mostly true"]),
    (RatingClass::True, &["true"]),
];

pub fn classify(rating: &str) -> RatingClass {
    let lowered = rating.to_lowercase();
    RATING_RULES
        .iter()
        .find(|(_, needles)| needles.iter().any(|n| lowered.contains(n)))
        .map(|(class, _)| *class)
        .unwrap_or(RatingClass::Unknown)
}

/// Score in {20, 30, 50, 70, 90}.
pub fn rating_score(rating: &str) -> u8 {
    classify(rating).score()
}
