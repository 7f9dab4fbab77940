//! Blueprint and audience-profile reference records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AudienceSegment;

/// A reusable outreach template describing a target audience and value
/// proposition.
///
/// Blueprints are read-only reference data: the pipeline consults their
/// audience lists when looking for untapped segments and otherwise treats
/// them as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintRecord {
    id: String,
    name: String,
    target_roles: Vec<String>,
    company_sizes: Vec<String>,
    industries: Vec<String>,
    audience_profile_id: Option<String>,
    value_proposition: Option<String>,
    created_at: DateTime<Utc>,
}

impl BlueprintRecord {
    /// Create a builder for a blueprint record.
    #[must_use]
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> BlueprintRecordBuilder {
        BlueprintRecordBuilder::new(id, name)
    }

    /// Get the blueprint ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the blueprint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the target roles, primary first.
    #[must_use]
    pub fn target_roles(&self) -> &[String] {
        &self.target_roles
    }

    /// Get the company-size bands, primary first.
    #[must_use]
    pub fn company_sizes(&self) -> &[String] {
        &self.company_sizes
    }

    /// Get the industries, primary first.
    #[must_use]
    pub fn industries(&self) -> &[String] {
        &self.industries
    }

    /// Get the referenced audience profile, if any.
    #[must_use]
    pub fn audience_profile_id(&self) -> Option<&str> {
        self.audience_profile_id.as_deref()
    }

    /// Get the value proposition, if declared.
    #[must_use]
    pub fn value_proposition(&self) -> Option<&str> {
        self.value_proposition.as_deref()
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The candidate audience segment this blueprint describes: first
    /// target role, company size, and industry in canonical form.
    ///
    /// None when the blueprint names no target role at all.
    #[must_use]
    pub fn candidate_segment(&self) -> Option<AudienceSegment> {
        let role = self.target_roles.first()?;
        Some(AudienceSegment::new(
            role.clone(),
            self.company_sizes.first().cloned().unwrap_or_default(),
            self.industries.first().cloned().unwrap_or_default(),
        ))
    }

    /// Like [`Self::candidate_segment`], but a blueprint with empty
    /// audience lists borrows the referenced profile's first role, size,
    /// and industry.
    #[must_use]
    pub fn candidate_segment_from(&self, profile: Option<&AudienceProfile>) -> Option<AudienceSegment> {
        if let Some(segment) = self.candidate_segment() {
            return Some(segment);
        }
        let profile = profile?;
        let role = profile.roles().first()?;
        Some(AudienceSegment::new(
            role.clone(),
            profile.company_sizes().first().cloned().unwrap_or_default(),
            profile.industries().first().cloned().unwrap_or_default(),
        ))
    }
}

/// Builder for `BlueprintRecord`.
#[derive(Debug)]
pub struct BlueprintRecordBuilder {
    record: BlueprintRecord,
}

impl BlueprintRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            record: BlueprintRecord {
                id: id.into(),
                name: name.into(),
                target_roles: Vec::new(),
                company_sizes: Vec::new(),
                industries: Vec::new(),
                audience_profile_id: None,
                value_proposition: None,
                created_at: Utc::now(),
            },
        }
    }

    /// Append a target role.
    #[must_use]
    pub fn target_role(mut self, role: impl Into<String>) -> Self {
        self.record.target_roles.push(role.into());
        self
    }

    /// Append a company-size band.
    #[must_use]
    pub fn company_size(mut self, size: impl Into<String>) -> Self {
        self.record.company_sizes.push(size.into());
        self
    }

    /// Append an industry.
    #[must_use]
    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.record.industries.push(industry.into());
        self
    }

    /// Set the referenced audience profile.
    #[must_use]
    pub fn audience_profile_id(mut self, profile_id: impl Into<String>) -> Self {
        self.record.audience_profile_id = Some(profile_id.into());
        self
    }

    /// Set the value proposition.
    #[must_use]
    pub fn value_proposition(mut self, value_proposition: impl Into<String>) -> Self {
        self.record.value_proposition = Some(value_proposition.into());
        self
    }

    /// Set a custom creation timestamp (useful for deserialization/testing).
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.record.created_at = created_at;
        self
    }

    /// Build the `BlueprintRecord`.
    #[must_use]
    pub fn build(self) -> BlueprintRecord {
        self.record
    }
}

/// An ideal-customer-profile description: the candidate roles, industries,
/// company sizes, and revenue bands a team sells into.
///
/// Consulted only when a blueprint delegates its audience to a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceProfile {
    id: String,
    name: String,
    roles: Vec<String>,
    industries: Vec<String>,
    company_sizes: Vec<String>,
    revenue_bands: Vec<String>,
}

impl AudienceProfile {
    /// Create a builder for an audience profile.
    #[must_use]
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> AudienceProfileBuilder {
        AudienceProfileBuilder::new(id, name)
    }

    /// Get the profile ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the profile name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the candidate roles.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Get the candidate industries.
    #[must_use]
    pub fn industries(&self) -> &[String] {
        &self.industries
    }

    /// Get the candidate company-size bands.
    #[must_use]
    pub fn company_sizes(&self) -> &[String] {
        &self.company_sizes
    }

    /// Get the candidate revenue bands.
    #[must_use]
    pub fn revenue_bands(&self) -> &[String] {
        &self.revenue_bands
    }
}

/// Builder for `AudienceProfile`.
#[derive(Debug)]
pub struct AudienceProfileBuilder {
    profile: AudienceProfile,
}

impl AudienceProfileBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            profile: AudienceProfile {
                id: id.into(),
                name: name.into(),
                roles: Vec::new(),
                industries: Vec::new(),
                company_sizes: Vec::new(),
                revenue_bands: Vec::new(),
            },
        }
    }

    /// Append a candidate role.
    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.profile.roles.push(role.into());
        self
    }

    /// Append a candidate industry.
    #[must_use]
    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.profile.industries.push(industry.into());
        self
    }

    /// Append a candidate company-size band.
    #[must_use]
    pub fn company_size(mut self, size: impl Into<String>) -> Self {
        self.profile.company_sizes.push(size.into());
        self
    }

    /// Append a candidate revenue band.
    #[must_use]
    pub fn revenue_band(mut self, band: impl Into<String>) -> Self {
        self.profile.revenue_bands.push(band.into());
        self
    }

    /// Build the `AudienceProfile`.
    #[must_use]
    pub fn build(self) -> AudienceProfile {
        self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_segment_canonical_form() {
        let blueprint = BlueprintRecord::builder("bp-1", "Fintech CTOs")
            .target_role("CTO")
            .company_size("enterprise")
            .industry("fintech")
            .build();

        let segment = blueprint.candidate_segment().expect("segment");
        assert_eq!(
            segment.to_string(),
            "CTO at enterprise companies in fintech"
        );
    }

    #[test]
    fn test_candidate_segment_requires_a_role() {
        let blueprint = BlueprintRecord::builder("bp-2", "No audience")
            .industry("fintech")
            .build();
        assert!(blueprint.candidate_segment().is_none());
    }

    #[test]
    fn test_candidate_segment_uses_first_of_each_list() {
        let blueprint = BlueprintRecord::builder("bp-3", "Multi")
            .target_role("CTO")
            .target_role("VP Eng")
            .company_size("startup")
            .company_size("enterprise")
            .industry("SaaS")
            .build();

        let segment = blueprint.candidate_segment().expect("segment");
        assert_eq!(segment.role, "CTO");
        assert_eq!(segment.company_size, "startup");
        assert_eq!(segment.industry, "SaaS");
    }

    #[test]
    fn test_candidate_segment_falls_back_to_profile() {
        let profile = AudienceProfile::builder("icp-1", "Mid-market SaaS")
            .role("Head of RevOps")
            .company_size("mid-market")
            .industry("SaaS")
            .revenue_band("$10M-$50M")
            .build();

        let blueprint = BlueprintRecord::builder("bp-4", "Delegated audience")
            .audience_profile_id("icp-1")
            .build();

        let segment = blueprint
            .candidate_segment_from(Some(&profile))
            .expect("segment");
        assert_eq!(
            segment.to_string(),
            "Head of RevOps at mid-market companies in SaaS"
        );
    }

    #[test]
    fn test_own_audience_wins_over_profile() {
        let profile = AudienceProfile::builder("icp-1", "Profile")
            .role("CFO")
            .build();
        let blueprint = BlueprintRecord::builder("bp-5", "Own audience")
            .target_role("CTO")
            .audience_profile_id("icp-1")
            .build();

        let segment = blueprint
            .candidate_segment_from(Some(&profile))
            .expect("segment");
        assert_eq!(segment.role, "CTO");
    }
}
