// src/domain.rs
//! URL → registrable domain, used as the reliability lookup key.
//!
//! The heuristic is deliberately small: strip scheme and `www.`, keep the host,
//! then keep the last two labels, or the last three when the URL looks like a
//! country-code second-level domain (`bbc.co.uk`, `abc.net.au`).

use once_cell::sync::Lazy;
use regex::Regex;

static RE_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://(www\.)?").expect("static scheme regex"));

/// Second-level labels that, followed by a 2-letter TLD, form a public suffix.
const SECOND_LEVEL: [&str; 7] = ["co", "com", "org", "net", "edu", "gov", "mil"];

/// Canonicalize `url` to its registrable domain. Malformed or empty input
/// yields `""`, which misses every registry lookup.
pub fn canonical_domain(url: &str) -> String {
    let lowered = url.trim().to_ascii_lowercase();
    if lowered.is_empty() {
        return String::new();
    }

    let stripped = RE_SCHEME.replace(&lowered, "");
    let host = stripped
        .split('/')
        .next()
        .unwrap_or_default()
        .split(['?', '#', ':'])
        .next()
        .unwrap_or_default();

    let labels: Vec<&str> = host.split('.').collect();
    if labels.iter().any(|l| l.is_empty()) {
        return String::new();
    }

    if labels.len() > 2 {
        let n = labels.len();
        let keep = if SECOND_LEVEL.contains(&labels[n - 2]) && labels[n - 1].len() == 2 {
            3
        } else {
            2
        };
        return labels[n - keep..].join(".");
    }

    host.to_string()
}
