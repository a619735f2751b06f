// src/types.rs
//! Inputs the engine consumes from external collaborators and the
//! fact-check result it produces.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;

use crate::error::AggregationError;

/// Retrieved evidence snippet. A bare JSON string is accepted as content with
/// no url. Search-result shaped items (`link`, `snippet`) are accepted too, and
/// a null `url` or `content` reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EvidenceRepr")]
pub struct EvidenceItem {
    pub url: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl EvidenceItem {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
            title: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EvidenceRepr {
    Raw(String),
    Item {
        #[serde(default, alias = "link")]
        url: Option<String>,
        #[serde(default, alias = "snippet")]
        content: Option<String>,
        #[serde(default)]
        title: Option<String>,
    },
}

impl From<EvidenceRepr> for EvidenceItem {
    fn from(r: EvidenceRepr) -> Self {
        match r {
            EvidenceRepr::Raw(content) => EvidenceItem {
                content,
                ..Default::default()
            },
            EvidenceRepr::Item {
                url,
                content,
                title,
            } => EvidenceItem {
                url: url.unwrap_or_default(),
                content: content.unwrap_or_default(),
                title,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

/// Whether a record came from a live provider or a stand-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Final,
    Placeholder,
}

/// A third-party verdict on a claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckRecord {
    #[serde(default)]
    pub publisher: Publisher,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
}

impl FactCheckRecord {
    pub fn publisher_name(&self) -> &str {
        &self.publisher.name
    }
}

/// Providers may hand back either a structured record or an already formatted
/// string. Both survive the merge untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactCheckEntry {
    Record(FactCheckRecord),
    Raw(String),
}

impl FactCheckEntry {
    /// Rating text; raw strings carry none.
    pub fn rating(&self) -> &str {
        match self {
            FactCheckEntry::Record(r) => &r.rating,
            FactCheckEntry::Raw(_) => "",
        }
    }

    /// Publisher url; raw strings carry none.
    pub fn url(&self) -> &str {
        match self {
            FactCheckEntry::Record(r) => &r.url,
            FactCheckEntry::Raw(_) => "",
        }
    }

    pub fn publisher_name(&self) -> &str {
        match self {
            FactCheckEntry::Record(r) => r.publisher_name(),
            FactCheckEntry::Raw(_) => "",
        }
    }
}

impl From<FactCheckRecord> for FactCheckEntry {
    fn from(r: FactCheckRecord) -> Self {
        FactCheckEntry::Record(r)
    }
}

/// Check-worthiness estimate (ClaimBuster-style).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimBusterScore {
    pub score: f64,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationConfidence {
    High,
    Medium,
    Low,
}

/// Outcome of comparing a claim against a set of known facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomVerification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_similar_fact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
    pub confidence: VerificationConfidence,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactCheckStatus {
    Success,
    Partial,
    Error,
}

/// One failed provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderErrorRecord {
    pub service: String,
    pub error: String,
}

/// Merged output of every fact-check provider for one claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheckResult {
    pub google_fact_check: Vec<FactCheckEntry>,
    pub claim_buster: Option<ClaimBusterScore>,
    pub custom_verification: Option<CustomVerification>,
    pub status: FactCheckStatus,
    #[serde(default)]
    pub errors: Vec<ProviderErrorRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub request_id: String,
    #[serde(default)]
    pub cached: bool,
}

impl FactCheckResult {
    pub fn empty(request_id: impl Into<String>) -> Self {
        Self {
            google_fact_check: Vec::new(),
            claim_buster: None,
            custom_verification: None,
            status: FactCheckStatus::Success,
            errors: Vec::new(),
            message: None,
            request_id: request_id.into(),
            cached: false,
        }
    }

    /// True if at least one provider contributed something.
    pub fn has_data(&self) -> bool {
        !self.google_fact_check.is_empty()
            || self.claim_buster.is_some()
            || self.custom_verification.is_some()
    }

    /// Typed view of the `error` status for callers that want to bail.
    pub fn ensure_usable(&self) -> Result<&Self, AggregationError> {
        match self.status {
            FactCheckStatus::Error => Err(AggregationError {
                failures: self.errors.len(),
            }),
            _ => Ok(self),
        }
    }
}

/// Lower-case hex SHA-256.
pub fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut out = String::with_capacity(64);
    for b in digest.iter() {
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Cache identity of a claim: depends on the text only.
pub fn claim_key(claim: &str) -> String {
    sha256_hex(claim)
}

/// Short anonymized id for log lines; never log raw claim text.
pub fn claim_log_id(claim: &str) -> String {
    sha256_hex(claim)[..12].to_string()
}

/// Request id from claim + current time.
pub fn new_request_id(claim: &str) -> String {
    let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Nanos, true);
    sha256_hex(&format!("{claim}_{now}"))[..32].to_string()
}
