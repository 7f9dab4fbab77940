//! Aggregation - filtered experiment sets reduced to per-dimension stats
//!
//! `analyze` is the one entry point: apply the caller's filter, partition
//! the survivors along every grouping dimension, and compute whole-set
//! pattern and calendar statistics. Everything is recomputed per call;
//! when the underlying dataset changes the caller re-invokes, there is no
//! incremental path.
//!
//! ## Example
//!
//! ```rust
//! use campaign_insights::aggregate::{analyze, ExperimentFilter};
//! use campaign_insights::record::ExperimentRecord;
//! use chrono::Utc;
//!
//! let experiments = vec![
//!     ExperimentRecord::builder("exp-1")
//!         .distribution_channel("email")
//!         .success_score(88.0)
//!         .build(),
//! ];
//!
//! let report = analyze(&experiments, &ExperimentFilter::default(), Utc::now());
//! assert_eq!(report.patterns.total_experiments, 1);
//! assert_eq!(report.channels[0].key, "email");
//! ```

mod bucket;
mod filter;
mod patterns;

pub use bucket::{group_by_dimension, Dimension, DimensionBucket};
pub use filter::ExperimentFilter;
pub use patterns::{
    date_analysis, pattern_analysis, DateAnalysis, MonthBucket, PatternAnalysis, StatusBucket,
    SuccessDistribution,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::ExperimentRecord;

/// Everything `analyze` derives from one filtered experiment set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The experiments that survived the filter, in input order.
    pub filtered: Vec<ExperimentRecord>,
    /// Whole-set statistics.
    pub patterns: PatternAnalysis,
    /// Buckets by primary distribution channel, best first.
    pub channels: Vec<DimensionBucket>,
    /// Buckets by audience-segment role, best first.
    pub segments: Vec<DimensionBucket>,
    /// Buckets by primary outreach strategy, best first.
    pub strategies: Vec<DimensionBucket>,
    /// Buckets by source blueprint, best first.
    pub blueprints: Vec<DimensionBucket>,
    /// Calendar-month and status breakdowns.
    pub dates: DateAnalysis,
}

impl AnalysisReport {
    /// Serialize the report for the presentation collaborator.
    ///
    /// # Errors
    /// Returns [`crate::Error::Serialization`] when JSON encoding fails.
    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string(self).map_err(crate::Error::from)
    }
}

/// Filter an experiment set and aggregate it along every dimension.
///
/// Pure: reads its arguments, returns a fresh report, mutates nothing.
/// `now` anchors score computations for records without a cached score.
#[must_use]
pub fn analyze(
    experiments: &[ExperimentRecord],
    filter: &ExperimentFilter,
    now: DateTime<Utc>,
) -> AnalysisReport {
    let filtered: Vec<ExperimentRecord> = experiments
        .iter()
        .filter(|e| filter.matches(e))
        .cloned()
        .collect();
    debug!(
        total = experiments.len(),
        filtered = filtered.len(),
        "analyze: applied experiment filter"
    );

    let channels = group_by_dimension(&filtered, Dimension::Channel, now);
    let segments = group_by_dimension(&filtered, Dimension::Segment, now);
    let strategies = group_by_dimension(&filtered, Dimension::Strategy, now);
    let blueprints = group_by_dimension(&filtered, Dimension::Blueprint, now);
    debug!(
        channels = channels.len(),
        segments = segments.len(),
        strategies = strategies.len(),
        blueprints = blueprints.len(),
        "analyze: grouped dimensions"
    );

    let patterns = pattern_analysis(&filtered, now);
    let dates = date_analysis(&filtered, now);

    AnalysisReport {
        filtered,
        patterns,
        channels,
        segments,
        strategies,
        blueprints,
        dates,
    }
}
