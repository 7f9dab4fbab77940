//! Dimension buckets - experiments grouped by a single key

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::ExperimentRecord;
use crate::score::effective_score;
use crate::SUCCESS_SCORE_CUTOFF;

/// The single-key grouping dimensions the aggregator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    /// Primary distribution channel.
    Channel,
    /// Audience-segment role (structured parse of the descriptor).
    Segment,
    /// Primary outreach strategy.
    Strategy,
    /// Source blueprint ID, verbatim.
    Blueprint,
}

impl Dimension {
    /// The grouping key this dimension extracts from an experiment, or
    /// None when the experiment carries nothing to group by.
    #[must_use]
    pub fn key_for(self, experiment: &ExperimentRecord) -> Option<String> {
        match self {
            Self::Channel => experiment.primary_channel().map(ToString::to_string),
            Self::Segment => Some(experiment.audience().role),
            Self::Strategy => experiment.primary_strategy().map(ToString::to_string),
            Self::Blueprint => experiment.blueprint_id().map(ToString::to_string),
        }
    }
}

/// One grouping-key's worth of experiments plus aggregate statistics.
///
/// Buckets are transient: recomputed per query, never cached or stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionBucket {
    /// Grouping key (channel name, audience role, strategy, or blueprint
    /// ID).
    pub key: String,
    /// Member experiments, in input order.
    pub experiments: Vec<ExperimentRecord>,
    /// Percentage of members scoring at or above the success cutoff.
    pub success_rate: f64,
    /// Mean of member ROI values.
    pub avg_roi: f64,
    /// Sum of member meetings booked.
    pub total_meetings: u64,
    /// Mean of member meetings booked.
    pub avg_meetings: f64,
    /// Sum of member spend.
    pub total_cost: f64,
}

impl DimensionBucket {
    /// Compute a bucket's statistics from its members.
    ///
    /// An empty member list yields all-zero rates rather than a division
    /// fault; such buckets only arise when a caller constructs one
    /// directly, since grouping always starts from an existing member.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_members(
        key: impl Into<String>,
        experiments: Vec<ExperimentRecord>,
        now: DateTime<Utc>,
    ) -> Self {
        let key = key.into();
        let total_meetings: u64 = experiments
            .iter()
            .map(|e| e.metrics().meetings_booked)
            .sum();
        let total_cost: f64 = experiments.iter().map(|e| e.metrics().cost).sum();

        if experiments.is_empty() {
            return Self {
                key,
                experiments,
                success_rate: 0.0,
                avg_roi: 0.0,
                total_meetings,
                avg_meetings: 0.0,
                total_cost,
            };
        }

        let count = experiments.len() as f64;
        let successes = experiments
            .iter()
            .filter(|e| effective_score(e, now) >= SUCCESS_SCORE_CUTOFF)
            .count() as f64;
        let total_roi: f64 = experiments.iter().map(|e| e.metrics().roi).sum();

        Self {
            success_rate: successes / count * 100.0,
            avg_roi: total_roi / count,
            avg_meetings: total_meetings as f64 / count,
            key,
            experiments,
            total_meetings,
            total_cost,
        }
    }

    /// Number of member experiments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    /// True when the bucket has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }
}

/// Partition experiments into buckets along one dimension.
///
/// Experiments missing the dimension's key contribute no membership.
/// Buckets come back sorted descending by success rate; ties keep
/// first-seen key order, so the "top" bucket is always index 0 when any
/// bucket exists.
#[must_use]
pub fn group_by_dimension(
    experiments: &[ExperimentRecord],
    dimension: Dimension,
    now: DateTime<Utc>,
) -> Vec<DimensionBucket> {
    let mut key_order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<ExperimentRecord>> = HashMap::new();

    for experiment in experiments {
        let Some(key) = dimension.key_for(experiment) else {
            continue;
        };
        if !groups.contains_key(&key) {
            key_order.push(key.clone());
        }
        groups.entry(key).or_default().push(experiment.clone());
    }

    let mut buckets: Vec<DimensionBucket> = key_order
        .into_iter()
        .map(|key| {
            let members = groups.remove(&key).unwrap_or_default();
            DimensionBucket::from_members(key, members, now)
        })
        .collect();

    buckets.sort_by(|a, b| {
        b.success_rate
            .partial_cmp(&a.success_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MetricsSnapshot;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap()
    }

    fn scored_experiment(id: &str, channel: &str, score: f64) -> ExperimentRecord {
        ExperimentRecord::builder(id)
            .distribution_channel(channel)
            .success_score(score)
            .metrics(MetricsSnapshot {
                meetings_booked: 2,
                cost: 100.0,
                roi: 50.0,
                ..MetricsSnapshot::default()
            })
            .build()
    }

    #[test]
    fn test_success_rate_three_of_four() {
        let members = vec![
            scored_experiment("a", "email", 90.0),
            scored_experiment("b", "email", 75.0),
            scored_experiment("c", "email", 70.0),
            scored_experiment("d", "email", 30.0),
        ];
        let bucket = DimensionBucket::from_members("email", members, fixed_now());
        assert!((bucket.success_rate - 75.0).abs() < 1e-9);
        assert_eq!(bucket.total_meetings, 8);
        assert!((bucket.avg_meetings - 2.0).abs() < 1e-9);
        assert!((bucket.total_cost - 400.0).abs() < 1e-9);
        assert!((bucket.avg_roi - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_bucket_has_zero_rates() {
        let bucket = DimensionBucket::from_members("email", Vec::new(), fixed_now());
        assert_eq!(bucket.success_rate, 0.0);
        assert_eq!(bucket.avg_roi, 0.0);
        assert_eq!(bucket.avg_meetings, 0.0);
        assert!(bucket.is_empty());
    }

    #[test]
    fn test_grouping_partitions_exactly() {
        let experiments = vec![
            scored_experiment("a", "email", 90.0),
            scored_experiment("b", "linkedin", 40.0),
            scored_experiment("c", "email", 60.0),
        ];
        let buckets = group_by_dimension(&experiments, Dimension::Channel, fixed_now());

        let total: usize = buckets.iter().map(DimensionBucket::len).sum();
        assert_eq!(total, experiments.len());

        let mut ids: Vec<&str> = buckets
            .iter()
            .flat_map(|b| b.experiments.iter().map(ExperimentRecord::id))
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_buckets_sorted_by_success_rate() {
        let experiments = vec![
            scored_experiment("a", "email", 30.0),
            scored_experiment("b", "linkedin", 90.0),
        ];
        let buckets = group_by_dimension(&experiments, Dimension::Channel, fixed_now());
        assert_eq!(buckets[0].key, "linkedin");
        assert_eq!(buckets[1].key, "email");
    }

    #[test]
    fn test_experiments_without_key_are_skipped() {
        let no_channel = ExperimentRecord::builder("x").success_score(90.0).build();
        let experiments = vec![no_channel, scored_experiment("a", "email", 90.0)];
        let buckets = group_by_dimension(&experiments, Dimension::Channel, fixed_now());
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].len(), 1);
    }

    #[test]
    fn test_segment_dimension_groups_by_role() {
        let ex = |id: &str, audience: &str| {
            ExperimentRecord::builder(id)
                .target_audience(audience)
                .success_score(80.0)
                .build()
        };
        let experiments = vec![
            ex("a", "CTO at enterprise companies in fintech"),
            ex("b", "CTO at startup companies in retail"),
            ex("c", "VP Sales at mid-market companies in SaaS"),
        ];
        let buckets = group_by_dimension(&experiments, Dimension::Segment, fixed_now());
        assert_eq!(buckets.len(), 2);
        let cto = buckets.iter().find(|b| b.key == "CTO").expect("CTO bucket");
        assert_eq!(cto.len(), 2);
    }

    #[test]
    fn test_tie_keeps_first_seen_order() {
        let experiments = vec![
            scored_experiment("a", "email", 90.0),
            scored_experiment("b", "linkedin", 90.0),
        ];
        let buckets = group_by_dimension(&experiments, Dimension::Channel, fixed_now());
        assert_eq!(buckets[0].key, "email");
        assert_eq!(buckets[1].key, "linkedin");
    }
}
