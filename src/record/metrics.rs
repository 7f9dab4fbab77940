//! Metrics snapshot - raw outreach counters and rates

use serde::{Deserialize, Serialize};

/// Raw metrics of one experiment at observation time.
///
/// Counters and rates arrive from the record store as-is. No invariant
/// ties them together (callers may supply inconsistent raw counts); the
/// pipeline consumes them without validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Impressions served.
    pub impressions: u64,
    /// Clicks recorded.
    pub clicks: u64,
    /// Conversions (leads) recorded.
    pub conversions: u64,
    /// Meetings booked.
    pub meetings_booked: u64,
    /// Total spend, in the caller's currency unit.
    pub cost: f64,
    /// Return on investment, as a percentage.
    pub roi: f64,
    /// Conversion rate, as a percentage.
    pub conversion_rate: f64,
    /// Click-through rate, as a percentage.
    pub ctr: f64,
    /// Cost per click.
    pub cpc: f64,
    /// Cost per thousand impressions.
    pub cpm: f64,
}
