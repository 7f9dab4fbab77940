//! Experiment filter - the caller-supplied selection contract

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{ExperimentRecord, ExperimentStatus};

/// Caller-supplied experiment filter.
///
/// Clauses combine with boolean AND; an absent or empty clause means "no
/// restriction", never "match nothing". An experiment with several
/// distribution channels passes the channel clause when any of them is
/// allowed; the tag clause likewise requires a non-empty intersection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentFilter {
    /// Allowed lifecycle statuses.
    pub statuses: Vec<ExperimentStatus>,
    /// Inclusive lower bound on `created_at`.
    pub created_after: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`.
    pub created_before: Option<DateTime<Utc>>,
    /// Allowed source blueprints.
    pub blueprint_ids: Vec<String>,
    /// Allowed distribution channels.
    pub channels: Vec<String>,
    /// Required tags (any match suffices).
    pub tags: Vec<String>,
}

impl ExperimentFilter {
    /// True when the experiment satisfies every declared clause.
    #[must_use]
    pub fn matches(&self, experiment: &ExperimentRecord) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&experiment.status()) {
            return false;
        }

        if let Some(start) = self.created_after {
            if experiment.created_at() < start {
                return false;
            }
        }
        if let Some(end) = self.created_before {
            if experiment.created_at() > end {
                return false;
            }
        }

        if !self.blueprint_ids.is_empty() {
            let allowed = experiment
                .blueprint_id()
                .is_some_and(|id| self.blueprint_ids.iter().any(|b| b == id));
            if !allowed {
                return false;
            }
        }

        if !self.channels.is_empty()
            && !experiment
                .distribution_channels()
                .iter()
                .any(|channel| self.channels.contains(channel))
        {
            return false;
        }

        if !self.tags.is_empty() && !self.tags.iter().any(|tag| experiment.tags().contains(tag)) {
            return false;
        }

        true
    }
}
