//! # Campaign-Insights: Outreach Experiment Analytics Engine
//!
//! Campaign-insights reduces the raw metrics of outreach experiments to
//! comparable 0-100 success scores, aggregates experiments along the
//! dimensions that matter (channel, audience segment, strategy, blueprint,
//! calendar month, status), finds audience segments blueprints name but no
//! experiment has touched, and synthesizes a ranked, explainable list of
//! suggestions for what to try next.
//!
//! The whole pipeline is synchronous and side-effect-free: every entry
//! point is a pure function of its arguments. Record CRUD, persistence,
//! and presentation are external collaborators; this crate only consumes
//! already-deserialized records and returns fresh derived values.
//!
//! ## Example Usage
//!
//! ```rust
//! use campaign_insights::record::ExperimentRecord;
//! use campaign_insights::score;
//! use chrono::Utc;
//!
//! let experiment = ExperimentRecord::builder("exp-001")
//!     .target_audience("CTO at enterprise companies in fintech")
//!     .build();
//!
//! let result = score::score(&experiment, Utc::now());
//! assert!(result.score >= 0.0 && result.score <= 100.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod aggregate;
pub mod error;
pub mod gap;
pub mod record;
pub mod recommend;
pub mod score;
pub mod topk;

pub use error::{Error, Result};

/// Success cutoff shared by every component that asks "did this experiment
/// work": bucket success rates, replication eligibility, and the
/// segment-match bonus all compare against this score.
pub const SUCCESS_SCORE_CUTOFF: f64 = 70.0;
