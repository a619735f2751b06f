// tests/scoring_e2e.rs
//
// End-to-end scoring through the public API with the production resources
// (hashing embedder + bundled lexicon + seed reliability table).

use std::sync::Arc;

use credibility_engine::embeddings::HashingEmbedder;
use credibility_engine::sentiment::LexiconPolarity;
use credibility_engine::source_weights::SourceReliability;
use credibility_engine::{
    ConfidenceLabel, CredibilityScorer, EvidenceItem, FactCheckEntry, NlpResources,
};
use serde_json::json;

fn scorer() -> CredibilityScorer {
    CredibilityScorer::new(
        Arc::new(SourceReliability::default_seed()),
        NlpResources {
            embedder: Some(Arc::new(HashingEmbedder::new())),
            polarity: Some(Arc::new(LexiconPolarity::bundled().expect("lexicon"))),
        },
    )
}

#[tokio::test]
async fn water_boils_claim_is_likely_true() {
    let evidence: Vec<EvidenceItem> = serde_json::from_value(json!([
        {
            "url": "https://nature.com/x",
            "content": "Water boils at 100 degrees Celsius at standard pressure."
        }
    ]))
    .unwrap();
    let fact_checks: Vec<FactCheckEntry> = serde_json::from_value(json!([
        {"rating": "True", "publisher": {"name": "X"}, "url": "https://reuters.com/y"}
    ]))
    .unwrap();

    let r = scorer()
        .score("Water boils at 100°C at sea level", &fact_checks, &evidence, Some("e2e"))
        .await;

    let c = r.components;
    assert!((c.fact_check - 81.0).abs() < 1e-6, "fact_check={}", c.fact_check);
    assert!((c.source_reliability - 95.0).abs() < 1e-6);
    assert!(c.semantic_similarity > 80.0, "semantic={}", c.semantic_similarity);
    assert_eq!(c.cross_source_consistency, 60.0);
    assert_eq!(c.temporal_relevance, 70.0);
    assert_eq!(c.claim_match, 50.0);
    assert!(r.score >= 75, "score={}", r.score);
    assert_eq!(r.confidence_label, ConfidenceLabel::LikelyTrue);
    assert_eq!(r.request_id, "e2e");
}

#[tokio::test]
async fn false_verdicts_from_trusted_checkers_pull_score_down() {
    let fact_checks: Vec<FactCheckEntry> = serde_json::from_value(json!([
        {
            "rating": "Pants on Fire",
            "publisher": {"name": "PolitiFact"},
            "url": "https://www.politifact.com/a"
        },
        {"rating": "False", "publisher": {"name": "Snopes"}, "url": "https://snopes.com/b"}
    ]))
    .unwrap();
    let evidence = vec![EvidenceItem::new(
        "https://randomblog.example/post",
        "A shocking scandal and total fraud, experts say.",
    )];

    let r = scorer()
        .score("The moon landing was staged", &fact_checks, &evidence, None)
        .await;

    assert!((r.components.fact_check - 16.0).abs() < 1e-6);
    assert_eq!(r.components.cross_source_consistency, 40.0);
    assert!((r.components.source_reliability - 60.0).abs() < 1e-6);
    assert!(r.score < 60, "score={}", r.score);
    assert_ne!(r.confidence_label, ConfidenceLabel::LikelyTrue);
}

#[tokio::test]
async fn raw_string_inputs_do_not_break_scoring() {
    let fact_checks: Vec<FactCheckEntry> =
        serde_json::from_value(json!(["Reuters says: true", {"rating": "Mostly True"}])).unwrap();
    let evidence: Vec<EvidenceItem> = serde_json::from_value(json!([
        "plain evidence text",
        {"url": "https://bbc.com/x"}
    ]))
    .unwrap();

    let r = scorer().score("Some claim", &fact_checks, &evidence, None).await;

    // (50*0.7 + 70*0.7) / 2
    assert!((r.components.fact_check - 42.0).abs() < 1e-6);
    // (60 + 90) / 2
    assert!((r.components.source_reliability - 75.0).abs() < 1e-6);
    assert!(r.score <= 100);
}

#[tokio::test]
async fn uniform_defaults_serialize_with_fixed_keys() {
    let r = scorer().score("claim", &[], &[], Some("k")).await;
    let v = serde_json::to_value(&r).unwrap();
    let comps = v["components"].as_object().unwrap();
    for key in [
        "claim_match",
        "source_reliability",
        "semantic_similarity",
        "sentiment_consistency",
        "cross_source_consistency",
        "temporal_relevance",
        "fact_check",
    ] {
        assert!(comps.contains_key(key), "missing {key}");
    }
    assert_eq!(comps.len(), 7);
    assert_eq!(v["confidence_label"], "Mixed / Needs Verification");
    assert_eq!(v["request_id"], "k");
}

#[tokio::test]
async fn search_result_evidence_keeps_source_reliability() {
    let evidence: Vec<EvidenceItem> = serde_json::from_value(json!([
        {
            "title": "Boiling point",
            "snippet": "Water boils at 100 degrees.",
            "link": "https://www.nature.com/x"
        },
        {"title": "Physics", "snippet": "Boiling point of water.", "link": "https://bbc.co.uk/y"}
    ]))
    .unwrap();

    let r = scorer().score("Water boils at 100 degrees", &[], &evidence, None).await;

    // (95 + 60) / 2; bbc.co.uk is not in the seed table
    assert!((r.components.source_reliability - 77.5).abs() < 1e-6);
    assert_eq!(r.components.cross_source_consistency, 60.0);
}
