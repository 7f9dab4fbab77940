//! The four recommendation generators
//!
//! Each generator is independent: it inspects the shared [`Context`] and
//! contributes zero or more candidate recommendations. Ranking and
//! truncation happen in the parent module.

use crate::aggregate::DimensionBucket;
use crate::record::{AudienceSegment, ExperimentRecord, Variable};
use crate::topk::{top_k_indices_by, SortOrder};
use crate::SUCCESS_SCORE_CUTOFF;

use super::{outcome_range, Context, Recommendation, RecommendationKind, MAX_CONFIDENCE};

/// Base confidence for pointing a proven approach at an untapped segment.
const SEGMENT_MATCH_BASE: f64 = 70.0;
/// Minimum confidence a segment-match suggestion must exceed to be emitted.
const SEGMENT_MATCH_FLOOR: f64 = 60.0;
/// Source score above which the segment-match bonus applies.
const STRONG_SOURCE_SCORE: f64 = 80.0;

/// Base confidence for reworking an underperformer.
const OPTIMIZATION_BASE: f64 = 60.0;
/// Minimum confidence an optimization suggestion must exceed to be emitted.
const OPTIMIZATION_FLOOR: f64 = 50.0;
/// Experiments below this score are optimization candidates.
const UNDERPERFORMER_CUTOFF: f64 = 50.0;
/// Score gap that marks a pairing as decisive.
const DECISIVE_SCORE_GAP: f64 = 30.0;
/// How many underperformers to consider.
const UNDERPERFORMER_POOL: usize = 3;

/// How many untapped segments the new-segment generator opens.
const NEW_SEGMENT_POOL: usize = 2;
/// Confidence cap for suggestions about segments nobody has tried.
const NEW_SEGMENT_CONFIDENCE_CAP: f64 = 85.0;

/// Point the top performers at the first untapped segment; with no gaps
/// left, suggest scaling them instead.
pub(super) fn segment_match(context: &Context<'_>) -> Vec<Recommendation> {
    let mut out = Vec::new();

    for &index in &context.top_performers {
        let experiment = &context.experiments[index];
        let score = context.scores[index];

        if context.untapped.is_empty() {
            out.push(scale_suggestion(experiment, score));
            continue;
        }

        let candidate = &context.untapped[0];
        let mut confidence = SEGMENT_MATCH_BASE;
        if score > STRONG_SOURCE_SCORE {
            confidence += 10.0;
        }
        let related_winner = related_winning_segment(&context.segments, &candidate.segment);
        if related_winner.is_some() {
            confidence += 15.0;
        }
        if confidence <= SEGMENT_MATCH_FLOOR {
            continue;
        }

        let descriptor = candidate.segment.descriptor();
        let mut reasoning = format!(
            "Experiment {} scored {score:.0}, and no experiment targets \"{descriptor}\" yet",
            experiment.id()
        );
        if let Some(bucket) = related_winner {
            reasoning.push_str(&format!(
                "; the related \"{}\" segment already succeeds {:.0}% of the time",
                bucket.key, bucket.success_rate
            ));
        }

        out.push(Recommendation {
            kind: RecommendationKind::SegmentMatch,
            title: format!("Take a winning approach to {}", candidate.segment.role),
            description: format!(
                "Re-run the approach behind experiment {} against \"{descriptor}\"",
                experiment.id()
            ),
            confidence,
            reasoning,
            suggested_variables: approach_variables(experiment, Some(&descriptor)),
            expected_outcome: outcome_range(score),
            source_experiments: vec![experiment.id().to_string()],
            source_blueprints: vec![candidate.blueprint_id.clone()],
        });
    }

    out
}

/// Scale the best channel and the best strategy when they clear the
/// success cutoff.
pub(super) fn replication(context: &Context<'_>) -> Vec<Recommendation> {
    let best_of = [
        ("channel", "distributionChannel", context.channels.first()),
        ("strategy", "outreachStrategy", context.strategies.first()),
    ];

    let mut out = Vec::new();
    for (label, field, bucket) in best_of {
        let Some(bucket) = bucket else {
            continue;
        };
        if bucket.success_rate <= SUCCESS_SCORE_CUTOFF {
            continue;
        }

        out.push(Recommendation {
            kind: RecommendationKind::Replication,
            title: format!("Replicate your strongest {label}: {}", bucket.key),
            description: format!(
                "Launch further experiments using the \"{}\" {label}; it is your most reliable performer",
                bucket.key
            ),
            confidence: (bucket.success_rate + 10.0).min(MAX_CONFIDENCE),
            reasoning: format!(
                "The \"{}\" {label} succeeds {:.0}% of the time across {} experiments",
                bucket.key,
                bucket.success_rate,
                bucket.len()
            ),
            suggested_variables: vec![Variable::new(field, &bucket.key, label)],
            expected_outcome: outcome_range(bucket.success_rate),
            source_experiments: bucket
                .experiments
                .iter()
                .map(|e| e.id().to_string())
                .collect(),
            source_blueprints: Vec::new(),
        });
    }
    out
}

/// Pair each underperformer with a top performer that reaches the same
/// audience through a different strategy, and suggest adopting whatever
/// differs.
pub(super) fn optimization(context: &Context<'_>) -> Vec<Recommendation> {
    let underperformers = underperformer_indices(context);

    let mut out = Vec::new();
    for index in underperformers {
        let laggard = &context.experiments[index];
        let laggard_score = context.scores[index];
        let laggard_segment = laggard.audience();

        let Some(&winner_index) = context.top_performers.iter().find(|&&candidate| {
            let winner = &context.experiments[candidate];
            winner.audience().matches_role_or_industry(&laggard_segment)
                && winner.primary_strategy() != laggard.primary_strategy()
        }) else {
            continue;
        };

        let winner = &context.experiments[winner_index];
        let winner_score = context.scores[winner_index];

        let mut confidence = OPTIMIZATION_BASE;
        if winner_score - laggard_score > DECISIVE_SCORE_GAP {
            confidence += 20.0;
        }
        let exact_segment = winner.audience() == laggard_segment;
        if exact_segment {
            confidence += 15.0;
        }
        if confidence <= OPTIMIZATION_FLOOR {
            continue;
        }

        let suggested_variables = differing_variables(winner, laggard);
        out.push(Recommendation {
            kind: RecommendationKind::Optimization,
            title: format!("Rework experiment {}", laggard.id()),
            description: format!(
                "Experiment {} reaches a comparable audience and scores {winner_score:.0}; adopt what it does differently",
                winner.id()
            ),
            confidence,
            reasoning: format!(
                "Experiment {} scored {laggard_score:.0} while {} scored {winner_score:.0} on {} audience with a different strategy",
                laggard.id(),
                winner.id(),
                if exact_segment { "the same" } else { "a related" },
            ),
            suggested_variables,
            expected_outcome: outcome_range(winner_score),
            source_experiments: vec![laggard.id().to_string(), winner.id().to_string()],
            source_blueprints: Vec::new(),
        });
    }
    out
}

/// Open untapped segments with the best channel/strategy combination.
pub(super) fn new_segment(context: &Context<'_>) -> Vec<Recommendation> {
    let (Some(channel), Some(strategy)) = (context.channels.first(), context.strategies.first())
    else {
        return Vec::new();
    };

    context
        .untapped
        .iter()
        .take(NEW_SEGMENT_POOL)
        .map(|candidate| {
            let descriptor = candidate.segment.descriptor();
            let average_rate = (channel.success_rate + strategy.success_rate) / 2.0;
            Recommendation {
                kind: RecommendationKind::NewBlueprint,
                title: format!("Open the {} segment", candidate.segment.role),
                description: format!(
                    "Create an experiment for \"{descriptor}\" pairing the \"{}\" channel with the \"{}\" strategy",
                    channel.key, strategy.key
                ),
                confidence: average_rate.min(NEW_SEGMENT_CONFIDENCE_CAP),
                reasoning: format!(
                    "\"{}\" ({:.0}% success) and \"{}\" ({:.0}% success) are your strongest channel and strategy; \"{descriptor}\" is named by a blueprint but untried",
                    channel.key, channel.success_rate, strategy.key, strategy.success_rate
                ),
                suggested_variables: vec![
                    Variable::new("targetAudience", &descriptor, "audience"),
                    Variable::new("distributionChannel", &channel.key, "channel"),
                    Variable::new("outreachStrategy", &strategy.key, "strategy"),
                ],
                expected_outcome: outcome_range(average_rate),
                source_experiments: Vec::new(),
                source_blueprints: vec![candidate.blueprint_id.clone()],
            }
        })
        .collect()
}

/// "Scale this" suggestion for a top performer when every blueprint
/// segment is already covered.
fn scale_suggestion(experiment: &ExperimentRecord, score: f64) -> Recommendation {
    Recommendation {
        kind: RecommendationKind::Replication,
        title: format!("Scale experiment {}", experiment.id()),
        description: format!(
            "Every blueprint segment is already covered; increase investment in experiment {} instead",
            experiment.id()
        ),
        confidence: (score + 10.0).min(MAX_CONFIDENCE),
        reasoning: format!(
            "Experiment {} scored {score:.0} and no untapped segment remains",
            experiment.id()
        ),
        suggested_variables: approach_variables(experiment, None),
        expected_outcome: outcome_range(score),
        source_experiments: vec![experiment.id().to_string()],
        source_blueprints: Vec::new(),
    }
}

/// Up to [`UNDERPERFORMER_POOL`] indices scoring below the cutoff, lowest
/// first.
fn underperformer_indices(context: &Context<'_>) -> Vec<usize> {
    let candidates: Vec<usize> = (0..context.scores.len())
        .filter(|&index| context.scores[index] < UNDERPERFORMER_CUTOFF)
        .collect();

    top_k_indices_by(&candidates, UNDERPERFORMER_POOL, SortOrder::Ascending, |&i| {
        context.scores[i]
    })
    .unwrap_or_default()
    .into_iter()
    .map(|position| candidates[position])
    .collect()
}

/// The best-performing segment bucket sharing the candidate's role or
/// industry, if one clears the success cutoff.
fn related_winning_segment<'a>(
    segments: &'a [DimensionBucket],
    candidate: &AudienceSegment,
) -> Option<&'a DimensionBucket> {
    segments.iter().find(|bucket| {
        bucket.success_rate > SUCCESS_SCORE_CUTOFF
            && (bucket.key == candidate.role
                || (!candidate.industry.is_empty()
                    && bucket
                        .experiments
                        .iter()
                        .any(|member| member.audience().industry == candidate.industry)))
    })
}

/// The form variables that describe an experiment's approach, optionally
/// retargeted at a new audience.
fn approach_variables(experiment: &ExperimentRecord, audience: Option<&str>) -> Vec<Variable> {
    let mut variables = Vec::new();
    if let Some(audience) = audience {
        variables.push(Variable::new("targetAudience", audience, "audience"));
    }
    if let Some(strategy) = experiment.primary_strategy() {
        variables.push(Variable::new("outreachStrategy", strategy, "strategy"));
    }
    if let Some(channel) = experiment.primary_channel() {
        variables.push(Variable::new("distributionChannel", channel, "channel"));
    }
    variables
}

/// The winner's strategy, channel, and messaging, contributed only where
/// they actually differ from the laggard's.
fn differing_variables(winner: &ExperimentRecord, laggard: &ExperimentRecord) -> Vec<Variable> {
    let mut variables = Vec::new();
    if winner.primary_strategy() != laggard.primary_strategy() {
        if let Some(strategy) = winner.primary_strategy() {
            variables.push(Variable::new("outreachStrategy", strategy, "strategy"));
        }
    }
    if winner.primary_channel() != laggard.primary_channel() {
        if let Some(channel) = winner.primary_channel() {
            variables.push(Variable::new("distributionChannel", channel, "channel"));
        }
    }
    if winner.messaging().first() != laggard.messaging().first() {
        if let Some(messaging) = winner.messaging().first() {
            variables.push(Variable::new("messaging", messaging, "messaging"));
        }
    }
    variables
}
