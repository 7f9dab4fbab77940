//! Recommendation synthesis - ranked, explainable suggestions for what to
//! try next
//!
//! Four independent generators run over the same aggregated view of the
//! dataset and their outputs are concatenated, sorted by confidence, and
//! truncated to the top five:
//!
//! - **segment-match**: point a proven approach at an untapped segment
//! - **replication**: scale the best-performing channel or strategy
//! - **optimization**: fix an underperformer using a comparable winner
//! - **new-segment**: open an untapped segment with the best known combo
//!
//! A generator that finds no qualifying candidate contributes zero items;
//! nothing here throws. Confidence never reaches certainty: every emitted
//! value is clamped to [0, 95].

mod generators;

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{group_by_dimension, Dimension, DimensionBucket};
use crate::gap::{untapped_candidates, UntappedCandidate};
use crate::record::{BlueprintRecord, ExperimentRecord, Variable};
use crate::score::effective_score;
use crate::topk::{top_k_indices_by, SortOrder};

/// Hard cap on emitted recommendations.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// The engine never asserts full certainty.
pub const MAX_CONFIDENCE: f64 = 95.0;

/// How many top performers the generators consider.
const TOP_PERFORMER_POOL: usize = 3;

/// What kind of action a recommendation proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationKind {
    /// Apply a proven approach to an untapped audience segment.
    SegmentMatch,
    /// Scale a winning experiment, channel, or strategy.
    Replication,
    /// Rework an underperforming experiment using a comparable winner.
    Optimization,
    /// Create a new experiment (and blueprint) for an untapped segment.
    NewBlueprint,
}

/// One ranked, explainable suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// What kind of action is proposed.
    pub kind: RecommendationKind,
    /// Short human-readable headline.
    pub title: String,
    /// What to do, in a sentence or two.
    pub description: String,
    /// Self-reported certainty, always in [0, 95].
    pub confidence: f64,
    /// The concrete statistics that justify the suggestion.
    pub reasoning: String,
    /// Typed name/value pairs a form can prefill from.
    pub suggested_variables: Vec<Variable>,
    /// Anticipated outcome range, human-readable.
    pub expected_outcome: String,
    /// Experiments the suggestion is derived from.
    pub source_experiments: Vec<String>,
    /// Blueprints the suggestion is derived from.
    pub source_blueprints: Vec<String>,
}

/// Shared view the generators work from: one scoring pass, one grouping
/// pass, one gap-analysis pass over the full dataset.
struct Context<'a> {
    experiments: &'a [ExperimentRecord],
    scores: Vec<f64>,
    channels: Vec<DimensionBucket>,
    strategies: Vec<DimensionBucket>,
    segments: Vec<DimensionBucket>,
    untapped: Vec<UntappedCandidate>,
    /// Indices of the best-scoring experiments, best first.
    top_performers: Vec<usize>,
}

impl<'a> Context<'a> {
    fn build(
        experiments: &'a [ExperimentRecord],
        blueprints: &[BlueprintRecord],
        now: DateTime<Utc>,
    ) -> Self {
        let scores: Vec<f64> = experiments
            .iter()
            .map(|e| effective_score(e, now))
            .collect();
        let top_performers =
            top_k_indices_by(&scores, TOP_PERFORMER_POOL, SortOrder::Descending, |s| *s)
                .unwrap_or_default();

        Self {
            experiments,
            scores,
            channels: group_by_dimension(experiments, Dimension::Channel, now),
            strategies: group_by_dimension(experiments, Dimension::Strategy, now),
            segments: group_by_dimension(experiments, Dimension::Segment, now),
            untapped: untapped_candidates(experiments, blueprints),
            top_performers,
        }
    }
}

/// Synthesize the top recommendations for a dataset.
///
/// Pure function of the experiment/blueprint dataset and `now`; returns at
/// most [`MAX_RECOMMENDATIONS`] items sorted by confidence descending,
/// ties kept in generation order.
#[must_use]
pub fn recommend(
    experiments: &[ExperimentRecord],
    blueprints: &[BlueprintRecord],
    now: DateTime<Utc>,
) -> Vec<Recommendation> {
    let context = Context::build(experiments, blueprints, now);

    let mut recommendations = Vec::new();
    recommendations.extend(generators::segment_match(&context));
    recommendations.extend(generators::replication(&context));
    recommendations.extend(generators::optimization(&context));
    recommendations.extend(generators::new_segment(&context));
    debug!(
        generated = recommendations.len(),
        untapped = context.untapped.len(),
        "recommendation generators ran"
    );

    for recommendation in &mut recommendations {
        recommendation.confidence = recommendation.confidence.clamp(0.0, MAX_CONFIDENCE);
    }

    // Stable sort keeps generation order for equal confidence.
    recommendations.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

/// Format the +/-20% outcome range around a central rate.
fn outcome_range(rate: f64) -> String {
    format!(
        "Success rate between {:.0}% and {:.0}%",
        rate * 0.8,
        rate * 1.2
    )
}
