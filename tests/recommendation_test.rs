//! Recommendation engine integration tests
//!
//! The ranked top-5 contract, confidence bounds, and each generator's
//! qualifying conditions exercised through the public `recommend` entry
//! point.

use campaign_insights::recommend::{recommend, RecommendationKind, MAX_RECOMMENDATIONS};
use campaign_insights::record::{BlueprintRecord, ExperimentRecord, MetricsSnapshot};
use chrono::{DateTime, TimeZone, Utc};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap()
}

fn experiment(
    id: &str,
    score: f64,
    audience: &str,
    channel: &str,
    strategy: &str,
) -> ExperimentRecord {
    ExperimentRecord::builder(id)
        .success_score(score)
        .target_audience(audience)
        .distribution_channel(channel)
        .outreach_strategy(strategy)
        .messaging("value-first")
        .metrics(MetricsSnapshot {
            meetings_booked: 2,
            cost: 200.0,
            roi: 50.0,
            ..MetricsSnapshot::default()
        })
        .build()
}

fn blueprint(id: &str, role: &str, size: &str, industry: &str) -> BlueprintRecord {
    BlueprintRecord::builder(id, format!("{role} playbook"))
        .target_role(role)
        .company_size(size)
        .industry(industry)
        .build()
}

// =============================================================================
// Ranked Top-5 Contract
// =============================================================================

#[test]
fn test_never_more_than_five_sorted_by_confidence() {
    let experiments: Vec<ExperimentRecord> = (0..10)
        .map(|i| {
            experiment(
                &format!("exp-{i}"),
                f64::from(i * 10),
                "CTO at enterprise companies in fintech",
                "email",
                "cold-email",
            )
        })
        .collect();
    let blueprints = vec![
        blueprint("bp-1", "Founder", "startup", "SaaS"),
        blueprint("bp-2", "CFO", "enterprise", "insurance"),
    ];

    let recommendations = recommend(&experiments, &blueprints, fixed_now());

    assert!(recommendations.len() <= MAX_RECOMMENDATIONS);
    for pair in recommendations.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
}

#[test]
fn test_confidence_always_within_bounds() {
    let experiments: Vec<ExperimentRecord> = (0..6)
        .map(|i| {
            experiment(
                &format!("exp-{i}"),
                95.0,
                "CTO at enterprise companies in fintech",
                "email",
                "cold-email",
            )
        })
        .collect();
    let recommendations = recommend(&experiments, &[], fixed_now());

    assert!(!recommendations.is_empty());
    for recommendation in &recommendations {
        assert!(recommendation.confidence >= 0.0);
        assert!(recommendation.confidence <= 95.0);
    }
}

#[test]
fn test_empty_inputs_contribute_zero_items() {
    assert!(recommend(&[], &[], fixed_now()).is_empty());
}

// =============================================================================
// Segment-Match Generator
// =============================================================================

#[test]
fn test_segment_match_cites_experiment_and_blueprint() {
    let experiments = vec![experiment(
        "winner",
        85.0,
        "CTO at enterprise companies in fintech",
        "email",
        "cold-email",
    )];
    let blueprints = vec![blueprint("bp-gap", "Founder", "startup", "SaaS")];

    let recommendations = recommend(&experiments, &blueprints, fixed_now());
    let segment_match = recommendations
        .iter()
        .find(|r| r.kind == RecommendationKind::SegmentMatch)
        .expect("segment-match emitted");

    assert_eq!(segment_match.source_experiments, vec!["winner"]);
    assert_eq!(segment_match.source_blueprints, vec!["bp-gap"]);
    assert!(segment_match.reasoning.contains("85"));
    assert!(segment_match
        .suggested_variables
        .iter()
        .any(|v| v.name == "targetAudience"
            && v.value == "Founder at startup companies in SaaS"));
}

#[test]
fn test_no_gaps_turns_top_performers_into_scale_suggestions() {
    let experiments = vec![experiment(
        "winner",
        90.0,
        "CTO at enterprise companies in fintech",
        "email",
        "cold-email",
    )];
    let recommendations = recommend(&experiments, &[], fixed_now());

    assert!(recommendations
        .iter()
        .any(|r| r.kind == RecommendationKind::Replication
            && r.source_experiments == vec!["winner"]));
    assert!(!recommendations
        .iter()
        .any(|r| r.kind == RecommendationKind::SegmentMatch));
}

// =============================================================================
// Replication Generator
// =============================================================================

#[test]
fn test_replication_emits_for_winning_channel_and_strategy() {
    let experiments = vec![
        experiment("a", 90.0, "CTO at big companies in fintech", "email", "cold-email"),
        experiment("b", 80.0, "CTO at big companies in fintech", "email", "cold-email"),
    ];
    // Untapped gap present so segment-match does not consume the scale slot.
    let blueprints = vec![blueprint("bp-1", "Founder", "startup", "SaaS")];
    let recommendations = recommend(&experiments, &blueprints, fixed_now());

    let replications: Vec<_> = recommendations
        .iter()
        .filter(|r| r.kind == RecommendationKind::Replication)
        .collect();
    assert!(replications.len() >= 2);
    assert!(replications.iter().any(|r| r.title.contains("email")));
    assert!(replications.iter().any(|r| r.title.contains("cold-email")));
    for replication in replications {
        assert!(!replication.source_experiments.is_empty());
        assert!(replication.reasoning.contains("100"));
    }
}

#[test]
fn test_replication_silent_below_cutoff() {
    let experiments = vec![
        experiment("a", 90.0, "CTO at big companies in fintech", "email", "cold-email"),
        experiment("b", 10.0, "CTO at big companies in fintech", "email", "cold-email"),
        experiment("c", 10.0, "CTO at big companies in fintech", "email", "cold-email"),
    ];
    let blueprints = vec![blueprint("bp-1", "Founder", "startup", "SaaS")];
    let recommendations = recommend(&experiments, &blueprints, fixed_now());

    // 33% success rate: no channel/strategy replication. The only
    // replication-kind items allowed are per-experiment scale suggestions,
    // which need an empty gap list, so none here.
    assert!(!recommendations
        .iter()
        .any(|r| r.kind == RecommendationKind::Replication));
}

// =============================================================================
// Optimization Generator
// =============================================================================

#[test]
fn test_optimization_suggests_only_differing_fields() {
    let experiments = vec![
        experiment("winner", 88.0, "CTO at enterprise companies in fintech", "email", "video-outreach"),
        experiment("laggard", 12.0, "VP Sales at startup companies in fintech", "email", "cold-email"),
    ];
    let recommendations = recommend(&experiments, &[], fixed_now());

    let optimization = recommendations
        .iter()
        .find(|r| r.kind == RecommendationKind::Optimization)
        .expect("optimization emitted");

    assert_eq!(optimization.source_experiments, vec!["laggard", "winner"]);
    let names: Vec<&str> = optimization
        .suggested_variables
        .iter()
        .map(|v| v.name.as_str())
        .collect();
    // Strategy differs; channel and messaging are identical.
    assert_eq!(names, vec!["outreachStrategy"]);
    // Related segment (shared industry), not identical: 60 + 20 = 80.
    assert!((optimization.confidence - 80.0).abs() < 1e-9);
}

#[test]
fn test_optimization_needs_a_related_winner() {
    let experiments = vec![
        experiment("winner", 88.0, "CTO at enterprise companies in fintech", "email", "video-outreach"),
        experiment("laggard", 12.0, "CMO at startup companies in retail", "email", "cold-email"),
    ];
    let recommendations = recommend(&experiments, &[], fixed_now());
    assert!(!recommendations
        .iter()
        .any(|r| r.kind == RecommendationKind::Optimization));
}

// =============================================================================
// New-Segment Generator
// =============================================================================

#[test]
fn test_new_segment_combines_best_channel_and_strategy() {
    let experiments = vec![
        experiment("a", 90.0, "CTO at big companies in fintech", "email", "cold-email"),
        experiment("b", 85.0, "CTO at big companies in fintech", "linkedin", "video-outreach"),
    ];
    let blueprints = vec![
        blueprint("bp-1", "Founder", "startup", "SaaS"),
        blueprint("bp-2", "CFO", "enterprise", "insurance"),
        blueprint("bp-3", "CMO", "mid-market", "retail"),
    ];
    let recommendations = recommend(&experiments, &blueprints, fixed_now());

    let new_segments: Vec<_> = recommendations
        .iter()
        .filter(|r| r.kind == RecommendationKind::NewBlueprint)
        .collect();
    // Only the first two untapped segments are opened, confidence capped
    // at 85.
    assert!(new_segments.len() <= 2);
    for suggestion in &new_segments {
        assert!(suggestion.confidence <= 85.0);
        assert_eq!(suggestion.source_blueprints.len(), 1);
        assert!(suggestion
            .suggested_variables
            .iter()
            .any(|v| v.name == "distributionChannel"));
    }
}
