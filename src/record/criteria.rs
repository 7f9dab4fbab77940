//! Success criteria - what an experiment is trying to achieve

use serde::{Deserialize, Serialize};

/// The primary goal an experiment is measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimaryGoal {
    /// Book meetings with prospects.
    #[default]
    Meetings,
    /// Generate qualified leads.
    Leads,
    /// Drive attributable revenue.
    Revenue,
    /// Maximize engagement with the outreach.
    Engagement,
    /// Maximize reach/awareness.
    Awareness,
}

/// A declared secondary goal, classified at experiment-authoring time.
///
/// Historically these were free-text descriptors sniffed for keywords at
/// scoring time; the classification is now fixed when the record is
/// authored, and scoring only sees the closed set of variants. Labels
/// that match none of the known keywords land in [`SecondaryGoal::Other`]
/// and earn a neutral score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecondaryGoal {
    /// Response/engagement rate against the declared response-rate target.
    Response,
    /// Cost efficiency, judged by cost per lead.
    Cost,
    /// Return on investment against the declared ROI target.
    Roi,
    /// Raw reach, judged by impressions.
    Reach,
    /// Unrecognized goal; scores a neutral 50.
    Other,
}

impl SecondaryGoal {
    /// Classify a free-text goal descriptor by keyword.
    ///
    /// Matching is case-insensitive substring search, in the order
    /// response/engagement, cost/efficiency, roi, reach/impressions.
    #[must_use]
    pub fn classify(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("response") || lower.contains("engagement") {
            Self::Response
        } else if lower.contains("cost") || lower.contains("efficiency") {
            Self::Cost
        } else if lower.contains("roi") {
            Self::Roi
        } else if lower.contains("reach") || lower.contains("impressions") {
            Self::Reach
        } else {
            Self::Other
        }
    }
}

/// Sparse numeric targets, keyed by what they measure.
///
/// Every field is optional; an absent target makes the corresponding
/// sub-score evaluate to zero (or a documented default), never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetMetrics {
    /// Target meetings booked (primary goal: meetings).
    pub meetings_booked: Option<f64>,
    /// Target lead count (primary goal: leads).
    pub leads: Option<f64>,
    /// Target revenue (primary goal: revenue).
    pub revenue: Option<f64>,
    /// Target conversion rate (primary goal: engagement).
    pub engagement: Option<f64>,
    /// Target impressions (primary goal: awareness).
    pub awareness: Option<f64>,
    /// Target response rate (secondary: response).
    pub response_rate: Option<f64>,
    /// Target cost per lead (secondary: cost).
    pub cost_per_lead: Option<f64>,
    /// Target ROI percentage (secondary: roi, efficiency).
    pub roi: Option<f64>,
}

impl TargetMetrics {
    /// The target paired with a primary goal, absent meaning none.
    #[must_use]
    pub const fn target_for(&self, goal: PrimaryGoal) -> Option<f64> {
        match goal {
            PrimaryGoal::Meetings => self.meetings_booked,
            PrimaryGoal::Leads => self.leads,
            PrimaryGoal::Revenue => self.revenue,
            PrimaryGoal::Engagement => self.engagement,
            PrimaryGoal::Awareness => self.awareness,
        }
    }
}

/// The declared success criteria of one experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessCriteria {
    /// Primary goal the experiment is measured against.
    pub primary_goal: PrimaryGoal,
    /// Sparse numeric targets.
    pub target_metrics: TargetMetrics,
    /// Evaluation window, in days.
    pub time_frame_days: i64,
    /// Percentage of the target that counts as success (e.g. 80 means
    /// hitting 80% of the target scores full marks).
    pub success_threshold: f64,
    /// Secondary goals, already classified.
    pub secondary_goals: Vec<SecondaryGoal>,
}

impl Default for SuccessCriteria {
    fn default() -> Self {
        Self {
            primary_goal: PrimaryGoal::default(),
            target_metrics: TargetMetrics::default(),
            time_frame_days: 30,
            success_threshold: 80.0,
            secondary_goals: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_response_keywords() {
        assert_eq!(
            SecondaryGoal::classify("improve response rate"),
            SecondaryGoal::Response
        );
        assert_eq!(
            SecondaryGoal::classify("Engagement uplift"),
            SecondaryGoal::Response
        );
    }

    #[test]
    fn test_classify_cost_keywords() {
        assert_eq!(SecondaryGoal::classify("lower cost"), SecondaryGoal::Cost);
        assert_eq!(
            SecondaryGoal::classify("spend efficiency"),
            SecondaryGoal::Cost
        );
    }

    #[test]
    fn test_classify_roi_and_reach() {
        assert_eq!(SecondaryGoal::classify("better ROI"), SecondaryGoal::Roi);
        assert_eq!(SecondaryGoal::classify("more reach"), SecondaryGoal::Reach);
        assert_eq!(
            SecondaryGoal::classify("impressions volume"),
            SecondaryGoal::Reach
        );
    }

    #[test]
    fn test_classify_unrecognized_is_other() {
        assert_eq!(
            SecondaryGoal::classify("brand sentiment"),
            SecondaryGoal::Other
        );
    }

    #[test]
    fn test_target_for_goal() {
        let targets = TargetMetrics {
            meetings_booked: Some(10.0),
            leads: Some(50.0),
            ..TargetMetrics::default()
        };
        assert_eq!(targets.target_for(PrimaryGoal::Meetings), Some(10.0));
        assert_eq!(targets.target_for(PrimaryGoal::Leads), Some(50.0));
        assert_eq!(targets.target_for(PrimaryGoal::Revenue), None);
    }
}
