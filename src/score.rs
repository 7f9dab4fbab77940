//! Success scoring - one experiment's metrics reduced to a 0-100 score
//!
//! `score` is a pure, total function: malformed or missing inputs degrade
//! to zero sub-scores (or documented neutral defaults), never to an error,
//! because the dashboard consuming these figures must not block on bad
//! historical data.
//!
//! ## Weighting
//!
//! ```text
//! final = round(0.6 * primary + 0.3 * secondary + 0.1 * efficiency)
//! ```
//!
//! Primary measures achievement of the declared goal against its
//! threshold-adjusted target; secondary averages the declared secondary
//! goals; efficiency averages time, cost, and quality sub-scores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{
    ExperimentRecord, MetricsSnapshot, PrimaryGoal, SecondaryGoal, SuccessCriteria, TargetMetrics,
};

/// Modeled pipeline value of one booked meeting, used by [`roi`].
pub const VALUE_PER_MEETING: f64 = 7_200.0;

const PRIMARY_WEIGHT: f64 = 0.6;
const SECONDARY_WEIGHT: f64 = 0.3;
const EFFICIENCY_WEIGHT: f64 = 0.1;

/// Neutral score for secondary goals the classifier could not recognize.
const NEUTRAL_SECONDARY_SCORE: f64 = 50.0;
/// Neutral time-efficiency when neither the early-win nor the overrun
/// branch applies.
const NEUTRAL_TIME_EFFICIENCY: f64 = 70.0;
/// Cost-per-lead target assumed when the criteria declare none.
const DEFAULT_COST_PER_LEAD: f64 = 100.0;
/// ROI target assumed when the criteria declare none.
const DEFAULT_ROI_TARGET: f64 = 1.0;

/// Weighted sub-scores, each in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Primary-goal achievement, capped at 100 (weight 0.6).
    pub primary_goal: f64,
    /// Average over declared secondary goals; 0 when none are declared
    /// (weight 0.3).
    pub secondary_goals: f64,
    /// Average of time, cost, and quality efficiency (weight 0.1).
    pub efficiency: f64,
}

/// Supporting figures behind the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    /// Uncapped actual/target percentage for the primary goal; 0 when the
    /// target is absent or zero. Distinct from the capped primary
    /// sub-score.
    pub target_achievement: f64,
    /// Time-efficiency sub-score.
    pub time_efficiency: f64,
    /// Cost-efficiency sub-score.
    pub cost_efficiency: f64,
    /// Quality sub-score.
    pub quality_score: f64,
}

/// The scored outcome of one experiment. Computed on demand, never
/// persisted by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Composite success score in [0, 100].
    pub score: f64,
    /// Weighted sub-scores.
    pub breakdown: ScoreBreakdown,
    /// Supporting figures.
    pub details: ScoreDetails,
}

/// Score one experiment against its declared success criteria.
///
/// `now` anchors the time-efficiency computation; pass `Utc::now()` for
/// wall-clock scoring. The function never fails: missing targets zero the
/// affected sub-score instead.
#[must_use]
pub fn score(experiment: &ExperimentRecord, now: DateTime<Utc>) -> ScoreResult {
    let metrics = experiment.metrics();
    let criteria = experiment.success_criteria();

    let target_achievement = target_achievement(metrics, criteria);
    let primary_goal = primary_goal_score(target_achievement, criteria.success_threshold);
    let secondary_goals = secondary_goals_score(metrics, criteria);

    let time_efficiency = time_efficiency(experiment, target_achievement, now);
    let cost_efficiency = cost_efficiency(metrics, &criteria.target_metrics);
    let quality_score = quality_score(metrics);
    let efficiency = (time_efficiency + cost_efficiency + quality_score) / 3.0;

    let composite = primary_goal * PRIMARY_WEIGHT
        + secondary_goals * SECONDARY_WEIGHT
        + efficiency * EFFICIENCY_WEIGHT;

    ScoreResult {
        score: composite.round().clamp(0.0, 100.0),
        breakdown: ScoreBreakdown {
            primary_goal,
            secondary_goals,
            efficiency,
        },
        details: ScoreDetails {
            target_achievement,
            time_efficiency,
            cost_efficiency,
            quality_score,
        },
    }
}

/// The score the rest of the pipeline works with: the record's cached
/// success score when the store supplied one, else a fresh computation.
#[must_use]
pub fn effective_score(experiment: &ExperimentRecord, now: DateTime<Utc>) -> f64 {
    experiment
        .success_score()
        .unwrap_or_else(|| score(experiment, now).score)
}

/// Meeting-value ROI as a percentage.
///
/// Values each booked meeting at [`VALUE_PER_MEETING`] and compares the
/// total against spend. Zero cost yields zero, never a division fault;
/// losses floor at zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn roi(meetings_booked: u64, cost: f64) -> f64 {
    if cost <= 0.0 {
        return 0.0;
    }
    let total_value = meetings_booked as f64 * VALUE_PER_MEETING;
    (((total_value - cost) / cost) * 100.0).max(0.0)
}

/// Uncapped actual/target percentage for the primary goal. Zero when the
/// target is absent or zero.
fn target_achievement(metrics: &MetricsSnapshot, criteria: &SuccessCriteria) -> f64 {
    let target = criteria
        .target_metrics
        .target_for(criteria.primary_goal)
        .unwrap_or(0.0);
    if target <= 0.0 {
        return 0.0;
    }
    actual_metric(criteria.primary_goal, metrics) / target * 100.0
}

/// The observed metric a primary goal is judged by.
#[allow(clippy::cast_precision_loss)]
fn actual_metric(goal: PrimaryGoal, metrics: &MetricsSnapshot) -> f64 {
    match goal {
        PrimaryGoal::Meetings => metrics.meetings_booked as f64,
        PrimaryGoal::Leads => metrics.conversions as f64,
        PrimaryGoal::Revenue => metrics.roi * metrics.cost,
        PrimaryGoal::Engagement => metrics.conversion_rate,
        PrimaryGoal::Awareness => metrics.impressions as f64,
    }
}

/// Threshold-adjusted primary sub-score: hitting the threshold-adjusted
/// target scores 100, partial achievement scales linearly, overachievement
/// saturates.
fn primary_goal_score(target_achievement: f64, success_threshold: f64) -> f64 {
    if success_threshold <= 0.0 {
        return 0.0;
    }
    (target_achievement / success_threshold * 100.0).min(100.0)
}

/// Average over declared secondary goals; zero when none are declared
/// (undeclared goals earn no credit, they are not skipped as neutral).
#[allow(clippy::cast_precision_loss)]
fn secondary_goals_score(metrics: &MetricsSnapshot, criteria: &SuccessCriteria) -> f64 {
    let goals = &criteria.secondary_goals;
    if goals.is_empty() {
        return 0.0;
    }
    let total: f64 = goals
        .iter()
        .map(|goal| secondary_goal_score(*goal, metrics, &criteria.target_metrics))
        .sum();
    total / goals.len() as f64
}

#[allow(clippy::cast_precision_loss)]
fn secondary_goal_score(goal: SecondaryGoal, metrics: &MetricsSnapshot, targets: &TargetMetrics) -> f64 {
    match goal {
        SecondaryGoal::Response => {
            let target = targets.response_rate.unwrap_or(0.0);
            if target <= 0.0 {
                0.0
            } else {
                (metrics.conversion_rate / target * 100.0).min(100.0)
            }
        }
        SecondaryGoal::Cost => {
            let target = positive_or(targets.cost_per_lead, DEFAULT_COST_PER_LEAD);
            let cost_per_lead = metrics.cost / metrics.conversions.max(1) as f64;
            if cost_per_lead <= 0.0 {
                // Free leads beat any target.
                100.0
            } else {
                (target / cost_per_lead * 100.0).min(100.0)
            }
        }
        SecondaryGoal::Roi => {
            let target = positive_or(targets.roi, DEFAULT_ROI_TARGET);
            (metrics.roi / target * 100.0).min(100.0)
        }
        SecondaryGoal::Reach => (metrics.impressions as f64 / 1000.0 * 10.0).min(100.0),
        SecondaryGoal::Other => NEUTRAL_SECONDARY_SCORE,
    }
}

/// Rewards finishing ahead of the declared time frame, penalizes running
/// past it without hitting the target, and stays neutral otherwise.
#[allow(clippy::cast_precision_loss)]
fn time_efficiency(experiment: &ExperimentRecord, target_achievement: f64, now: DateTime<Utc>) -> f64 {
    let started = experiment
        .started_at()
        .unwrap_or_else(|| experiment.created_at());
    let days_running = (now - started).num_days().max(1);
    let time_frame = experiment.success_criteria().time_frame_days;
    if time_frame <= 0 {
        return NEUTRAL_TIME_EFFICIENCY;
    }

    if target_achievement >= 100.0 && days_running < time_frame {
        return 100.0;
    }
    if days_running > time_frame && target_achievement < 100.0 {
        let overrun = (days_running - time_frame) as f64 / time_frame as f64;
        return (100.0 - overrun * 50.0).max(0.0);
    }
    NEUTRAL_TIME_EFFICIENCY
}

/// Observed ROI against the declared (or assumed) ROI target, capped.
fn cost_efficiency(metrics: &MetricsSnapshot, targets: &TargetMetrics) -> f64 {
    let target = positive_or(targets.roi, DEFAULT_ROI_TARGET);
    (metrics.roi / target * 100.0).min(100.0)
}

/// Conversion rate, click-through rate, and a meetings-booked signal,
/// averaged.
fn quality_score(metrics: &MetricsSnapshot) -> f64 {
    let conversion = (metrics.conversion_rate * 10.0).min(100.0);
    let click_through = (metrics.ctr * 5.0).min(100.0);
    let meetings = if metrics.meetings_booked > 0 { 80.0 } else { 40.0 };
    (conversion + click_through + meetings) / 3.0
}

/// A declared target when positive, else the fallback. Zero declared
/// targets count as undeclared.
fn positive_or(declared: Option<f64>, fallback: f64) -> f64 {
    declared.filter(|value| *value > 0.0).unwrap_or(fallback)
}
