//! Whole-set pattern analysis and calendar/status breakdowns

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{ExperimentRecord, ExperimentStatus};
use crate::score::effective_score;
use crate::SUCCESS_SCORE_CUTOFF;

/// Score band boundaries for the success distribution.
const HIGH_SCORE_BAND: f64 = 80.0;
const LOW_SCORE_BAND: f64 = 50.0;

const SECONDS_PER_DAY: i64 = 86_400;

/// Counts of experiments per score band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessDistribution {
    /// Score >= 80.
    pub high: usize,
    /// 50 <= score < 80.
    pub medium: usize,
    /// Score < 50.
    pub low: usize,
}

/// Aggregate statistics over the whole filtered experiment set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    /// Number of experiments analyzed.
    pub total_experiments: usize,
    /// Mean success score.
    pub avg_success_score: f64,
    /// Mean ROI.
    pub avg_roi: f64,
    /// Mean duration in whole days (created to scheduled end, rounded up).
    pub avg_duration_days: f64,
    /// Mean meetings booked.
    pub avg_meetings_booked: f64,
    /// Total meetings booked.
    pub total_meetings_booked: u64,
    /// Total spend.
    pub total_cost: f64,
    /// Experiments per score band.
    pub success_distribution: SuccessDistribution,
}

/// One calendar month of experiments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Month key, `YYYY-MM` of `created_at`.
    pub month: String,
    /// Experiments created that month.
    pub count: usize,
    /// Percentage scoring at or above the success cutoff.
    pub success_rate: f64,
    /// Mean ROI that month.
    pub avg_roi: f64,
}

/// One lifecycle status's worth of experiments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBucket {
    /// Lifecycle status.
    pub status: ExperimentStatus,
    /// Experiments currently in this status.
    pub count: usize,
    /// Percentage scoring at or above the success cutoff.
    pub success_rate: f64,
}

/// Experiments bucketed by calendar month and by lifecycle status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateAnalysis {
    /// Months in chronological order; only months with experiments appear.
    pub months: Vec<MonthBucket>,
    /// Statuses in declaration order; only statuses with experiments
    /// appear.
    pub statuses: Vec<StatusBucket>,
}

/// Compute whole-set statistics for a filtered experiment set.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pattern_analysis(experiments: &[ExperimentRecord], now: DateTime<Utc>) -> PatternAnalysis {
    let total_experiments = experiments.len();
    let total_meetings_booked: u64 = experiments
        .iter()
        .map(|e| e.metrics().meetings_booked)
        .sum();
    let total_cost: f64 = experiments.iter().map(|e| e.metrics().cost).sum();

    if total_experiments == 0 {
        return PatternAnalysis {
            total_experiments,
            avg_success_score: 0.0,
            avg_roi: 0.0,
            avg_duration_days: 0.0,
            avg_meetings_booked: 0.0,
            total_meetings_booked,
            total_cost,
            success_distribution: SuccessDistribution::default(),
        };
    }

    let count = total_experiments as f64;
    let mut distribution = SuccessDistribution::default();
    let mut score_sum = 0.0;
    for experiment in experiments {
        let score = effective_score(experiment, now);
        score_sum += score;
        if score >= HIGH_SCORE_BAND {
            distribution.high += 1;
        } else if score >= LOW_SCORE_BAND {
            distribution.medium += 1;
        } else {
            distribution.low += 1;
        }
    }

    let roi_sum: f64 = experiments.iter().map(|e| e.metrics().roi).sum();
    let duration_sum: i64 = experiments.iter().map(duration_days).sum();

    PatternAnalysis {
        total_experiments,
        avg_success_score: score_sum / count,
        avg_roi: roi_sum / count,
        avg_duration_days: duration_sum as f64 / count,
        avg_meetings_booked: total_meetings_booked as f64 / count,
        total_meetings_booked,
        total_cost,
        success_distribution: distribution,
    }
}

/// Bucket experiments by calendar month of creation and by status.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn date_analysis(experiments: &[ExperimentRecord], now: DateTime<Utc>) -> DateAnalysis {
    // BTreeMap keeps YYYY-MM keys chronological for free.
    let mut by_month: BTreeMap<String, Vec<&ExperimentRecord>> = BTreeMap::new();
    for experiment in experiments {
        let month = experiment.created_at().format("%Y-%m").to_string();
        by_month.entry(month).or_default().push(experiment);
    }

    let months = by_month
        .into_iter()
        .map(|(month, members)| {
            let count = members.len();
            let roi_sum: f64 = members.iter().map(|e| e.metrics().roi).sum();
            MonthBucket {
                month,
                count,
                success_rate: success_rate(&members, now),
                avg_roi: roi_sum / count as f64,
            }
        })
        .collect();

    let statuses = [
        ExperimentStatus::Active,
        ExperimentStatus::Completed,
        ExperimentStatus::Paused,
        ExperimentStatus::Failed,
    ]
    .into_iter()
    .filter_map(|status| {
        let members: Vec<&ExperimentRecord> = experiments
            .iter()
            .filter(|e| e.status() == status)
            .collect();
        if members.is_empty() {
            return None;
        }
        Some(StatusBucket {
            status,
            count: members.len(),
            success_rate: success_rate(&members, now),
        })
    })
    .collect();

    DateAnalysis { months, statuses }
}

/// Whole days from creation to scheduled end, rounded up; never negative.
fn duration_days(experiment: &ExperimentRecord) -> i64 {
    let seconds = (experiment.end_date() - experiment.created_at()).num_seconds();
    if seconds <= 0 {
        return 0;
    }
    (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
}

#[allow(clippy::cast_precision_loss)]
fn success_rate(members: &[&ExperimentRecord], now: DateTime<Utc>) -> f64 {
    if members.is_empty() {
        return 0.0;
    }
    let successes = members
        .iter()
        .filter(|e| effective_score(e, now) >= SUCCESS_SCORE_CUTOFF)
        .count();
    successes as f64 / members.len() as f64 * 100.0
}
