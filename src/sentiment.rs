//! Lexicon-based polarity, used by the sentiment consistency signal.
//!
//! Word scores live in `sentiment_lexicon.json` (integers in -5..=5). A negator
//! within the previous three tokens flips the sign of a word's score.

use std::collections::HashMap;

use crate::error::SignalError;

const BUNDLED_LEXICON: &str = include_str!("../sentiment_lexicon.json");

/// Largest absolute word score; used to scale polarity into [-1, 1].
const MAX_WORD_SCORE: f64 = 5.0;

/// Polarity source shared across requests. Implementations must be reentrant.
pub trait PolarityModel: Send + Sync {
    /// Polarity in [-1, 1]; 0.0 for neutral or unknown text.
    fn polarity(&self, text: &str) -> Result<f64, SignalError>;
}

#[derive(Debug, Clone)]
pub struct LexiconPolarity {
    lexicon: HashMap<String, i32>,
}

impl LexiconPolarity {
    /// Parse the lexicon compiled into the binary.
    pub fn bundled() -> Result<Self, SignalError> {
        let lexicon = serde_json::from_str::<HashMap<String, i32>>(BUNDLED_LEXICON)
            .map_err(|e| SignalError::Sentiment(format!("invalid bundled lexicon: {e}")))?;
        Ok(Self::from_map(lexicon))
    }

    pub fn from_map(lexicon: HashMap<String, i32>) -> Self {
        let lexicon = lexicon
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v.clamp(-5, 5)))
            .collect();
        Self { lexicon }
    }

    #[inline]
    fn word_score(&self, w: &str) -> i32 {
        *self.lexicon.get(w).unwrap_or(&0)
    }

    /// Returns (raw score, matched word count, token count).
    pub fn score_text(&self, text: &str) -> (i32, usize, usize) {
        // Collected because negation looks backwards.
        let tokens: Vec<String> = tokenize(text).collect();
        let mut score: i32 = 0;
        let mut matched = 0usize;

        for i in 0..tokens.len() {
            let base = self.word_score(tokens[i].as_str());
            if base == 0 {
                continue;
            }
            let negated = (1..=3).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            score += if negated { -base } else { base };
            matched += 1;
        }

        (score, matched, tokens.len())
    }
}

impl PolarityModel for LexiconPolarity {
    fn polarity(&self, text: &str) -> Result<f64, SignalError> {
        let (score, matched, _) = self.score_text(text);
        if matched == 0 {
            return Ok(0.0);
        }
        Ok((f64::from(score) / (MAX_WORD_SCORE * matched as f64)).clamp(-1.0, 1.0))
    }
}

/// Alphanumeric tokens (apostrophes kept so "isn't" stays whole), lower-case.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "no"
            | "never"
            | "isn't"
            | "wasn't"
            | "aren't"
            | "won't"
            | "can't"
            | "cannot"
            | "without"
            | "neither"
            | "nor"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LexiconPolarity {
        LexiconPolarity::bundled().expect("bundled lexicon parses")
    }

    #[test]
    fn neutral_text_has_zero_polarity() {
        let m = model();
        assert_eq!(m.polarity("Water boils at 100 degrees").unwrap(), 0.0);
        assert_eq!(m.polarity("").unwrap(), 0.0);
    }

    #[test]
    fn positive_and_negative_words() {
        let m = model();
        assert!(m.polarity("This is a great and wonderful result").unwrap() > 0.5);
        assert!(m.polarity("A terrible, horrible disaster").unwrap() < -0.5);
    }

    #[test]
    fn negation_flips_sign() {
        let m = model();
        let plain = m.polarity("the plan is good").unwrap();
        let negated = m.polarity("the plan is not good").unwrap();
        assert!(plain > 0.0);
        assert!(negated < 0.0);
        assert!((plain + negated).abs() < 1e-9);
    }

    #[test]
    fn polarity_is_bounded() {
        let m = LexiconPolarity::from_map(HashMap::from([("best".to_string(), 99)]));
        assert_eq!(m.polarity("best best best").unwrap(), 1.0);
    }

    #[test]
    fn score_text_counts() {
        let m = model();
        let (_, matched, tokens) = m.score_text("good news, bad timing");
        assert_eq!(tokens, 4);
        assert_eq!(matched, 2);
    }
}
