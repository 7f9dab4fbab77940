//! Experiment Record - root entity of the pipeline

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AudienceSegment, MetricsSnapshot, SuccessCriteria};

/// Lifecycle status of an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperimentStatus {
    /// Experiment is currently running.
    Active,
    /// Experiment ran to completion.
    Completed,
    /// Experiment is temporarily paused.
    Paused,
    /// Experiment was aborted or failed to run.
    Failed,
}

impl ExperimentStatus {
    /// Lowercase label used for grouping keys and display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ExperimentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed name/value pair, the shape the experiment form edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Form field name, e.g. "targetAudience".
    pub name: String,
    /// Field value.
    pub value: String,
    /// Field type hint for the form, e.g. "audience", "channel".
    pub kind: String,
}

impl Variable {
    /// Build a variable from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: kind.into(),
        }
    }
}

/// Experiment Record represents one tracked outreach campaign.
///
/// This is the root input entity. Records are immutable once built: the
/// pipeline reads them and returns fresh derived values, never writes.
/// Strategy, messaging, content, and channel are ordered lists because
/// callers supply either single values or small lists; the first element
/// is the primary one wherever a single grouping key is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    id: String,
    status: ExperimentStatus,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    end_date: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    blueprint_id: Option<String>,
    outreach_strategies: Vec<String>,
    messaging: Vec<String>,
    content: Vec<String>,
    distribution_channels: Vec<String>,
    target_audience: String,
    variables: Vec<Variable>,
    metrics: MetricsSnapshot,
    success_score: Option<f64>,
    tags: BTreeSet<String>,
    success_criteria: SuccessCriteria,
}

impl ExperimentRecord {
    /// Create a builder for an experiment record.
    ///
    /// Timestamps default to now, status to Active, everything else to
    /// empty; use the builder setters for the rest.
    #[must_use]
    pub fn builder(id: impl Into<String>) -> ExperimentRecordBuilder {
        ExperimentRecordBuilder::new(id)
    }

    /// Get the experiment ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ExperimentStatus {
        self.status
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get the start timestamp, if the experiment has started.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Get the scheduled end date.
    #[must_use]
    pub const fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    /// Get the completion timestamp, if completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Get the blueprint this experiment was created from, if any.
    ///
    /// A weak reference: the blueprint is looked up by the caller, never
    /// owned by the experiment.
    #[must_use]
    pub fn blueprint_id(&self) -> Option<&str> {
        self.blueprint_id.as_deref()
    }

    /// Get the outreach strategies, primary first.
    #[must_use]
    pub fn outreach_strategies(&self) -> &[String] {
        &self.outreach_strategies
    }

    /// Get the primary outreach strategy.
    #[must_use]
    pub fn primary_strategy(&self) -> Option<&str> {
        self.outreach_strategies.first().map(String::as_str)
    }

    /// Get the messaging angles, primary first.
    #[must_use]
    pub fn messaging(&self) -> &[String] {
        &self.messaging
    }

    /// Get the content assets, primary first.
    #[must_use]
    pub fn content(&self) -> &[String] {
        &self.content
    }

    /// Get the distribution channels, primary first.
    #[must_use]
    pub fn distribution_channels(&self) -> &[String] {
        &self.distribution_channels
    }

    /// Get the primary distribution channel.
    #[must_use]
    pub fn primary_channel(&self) -> Option<&str> {
        self.distribution_channels.first().map(String::as_str)
    }

    /// Get the raw target-audience descriptor.
    #[must_use]
    pub fn target_audience(&self) -> &str {
        &self.target_audience
    }

    /// Get the structured audience segment parsed from the descriptor.
    #[must_use]
    pub fn audience(&self) -> AudienceSegment {
        AudienceSegment::parse(&self.target_audience)
    }

    /// Get the experiment variables.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Get the metrics snapshot.
    #[must_use]
    pub const fn metrics(&self) -> &MetricsSnapshot {
        &self.metrics
    }

    /// Get the cached success score, if the record store computed one.
    #[must_use]
    pub const fn success_score(&self) -> Option<f64> {
        self.success_score
    }

    /// Get the tag set.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Get the declared success criteria.
    #[must_use]
    pub const fn success_criteria(&self) -> &SuccessCriteria {
        &self.success_criteria
    }
}

/// Builder for `ExperimentRecord`.
#[derive(Debug)]
pub struct ExperimentRecordBuilder {
    record: ExperimentRecord,
}

impl ExperimentRecordBuilder {
    /// Create a new builder with the required ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            record: ExperimentRecord {
                id: id.into(),
                status: ExperimentStatus::Active,
                created_at: now,
                started_at: None,
                end_date: now,
                completed_at: None,
                blueprint_id: None,
                outreach_strategies: Vec::new(),
                messaging: Vec::new(),
                content: Vec::new(),
                distribution_channels: Vec::new(),
                target_audience: String::new(),
                variables: Vec::new(),
                metrics: MetricsSnapshot::default(),
                success_score: None,
                tags: BTreeSet::new(),
                success_criteria: SuccessCriteria::default(),
            },
        }
    }

    /// Set the lifecycle status.
    #[must_use]
    pub const fn status(mut self, status: ExperimentStatus) -> Self {
        self.record.status = status;
        self
    }

    /// Set a custom creation timestamp (useful for deserialization/testing).
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.record.created_at = created_at;
        self
    }

    /// Set the start timestamp.
    #[must_use]
    pub const fn started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.record.started_at = Some(started_at);
        self
    }

    /// Set the scheduled end date.
    #[must_use]
    pub const fn end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.record.end_date = end_date;
        self
    }

    /// Set the completion timestamp.
    #[must_use]
    pub const fn completed_at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.record.completed_at = Some(completed_at);
        self
    }

    /// Set the source blueprint reference.
    #[must_use]
    pub fn blueprint_id(mut self, blueprint_id: impl Into<String>) -> Self {
        self.record.blueprint_id = Some(blueprint_id.into());
        self
    }

    /// Append an outreach strategy.
    #[must_use]
    pub fn outreach_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.record.outreach_strategies.push(strategy.into());
        self
    }

    /// Append a messaging angle.
    #[must_use]
    pub fn messaging(mut self, messaging: impl Into<String>) -> Self {
        self.record.messaging.push(messaging.into());
        self
    }

    /// Append a content asset.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.record.content.push(content.into());
        self
    }

    /// Append a distribution channel.
    #[must_use]
    pub fn distribution_channel(mut self, channel: impl Into<String>) -> Self {
        self.record.distribution_channels.push(channel.into());
        self
    }

    /// Set the target-audience descriptor.
    #[must_use]
    pub fn target_audience(mut self, target_audience: impl Into<String>) -> Self {
        self.record.target_audience = target_audience.into();
        self
    }

    /// Append an experiment variable.
    #[must_use]
    pub fn variable(mut self, variable: Variable) -> Self {
        self.record.variables.push(variable);
        self
    }

    /// Set the metrics snapshot.
    #[must_use]
    pub fn metrics(mut self, metrics: MetricsSnapshot) -> Self {
        self.record.metrics = metrics;
        self
    }

    /// Set a cached success score.
    #[must_use]
    pub const fn success_score(mut self, score: f64) -> Self {
        self.record.success_score = Some(score);
        self
    }

    /// Add a tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.record.tags.insert(tag.into());
        self
    }

    /// Set the success criteria.
    #[must_use]
    pub fn success_criteria(mut self, criteria: SuccessCriteria) -> Self {
        self.record.success_criteria = criteria;
        self
    }

    /// Build the `ExperimentRecord`.
    #[must_use]
    pub fn build(self) -> ExperimentRecord {
        self.record
    }
}
