//! Experiment and reference record types
//!
//! These are the immutable inputs of the pipeline: the record store hands
//! over already-deserialized arrays of them, and nothing downstream ever
//! mutates one.
//!
//! ## Schema Overview
//!
//! ```text
//! ExperimentRecord ──weak──> BlueprintRecord ──weak──> AudienceProfile
//!        │
//!        ├── MetricsSnapshot   (raw counters/rates, unvalidated)
//!        └── SuccessCriteria   (goal, targets, threshold, secondary goals)
//! ```
//!
//! `AudienceSegment` is the structured form of the free-text
//! `target_audience` descriptor, carried alongside the display string so
//! gap analysis and segment matching compare fields instead of raw text.

mod audience;
mod blueprint;
mod criteria;
mod experiment;
mod metrics;

pub use audience::{AudienceSegment, UNKNOWN_ICP};
pub use blueprint::{AudienceProfile, AudienceProfileBuilder, BlueprintRecord, BlueprintRecordBuilder};
pub use criteria::{PrimaryGoal, SecondaryGoal, SuccessCriteria, TargetMetrics};
pub use experiment::{ExperimentRecord, ExperimentRecordBuilder, ExperimentStatus, Variable};
pub use metrics::MetricsSnapshot;
