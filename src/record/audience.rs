//! Audience segment - structured form of the target-audience descriptor

use std::fmt;

use serde::{Deserialize, Serialize};

/// Descriptor used for experiments that declare no target audience at all.
pub const UNKNOWN_ICP: &str = "Unknown ICP";

/// A described buyer profile: role, company size, and industry.
///
/// Experiments and blueprints describe their audience with a free-text
/// descriptor, canonically
/// `"<role> at <company-size> companies in <industry>"`. This type is the
/// structured value carried alongside that display string; equality and
/// gap analysis operate on the parsed fields, never on raw text.
///
/// ## Parse fallback
///
/// A descriptor without the `" at "` separator is treated as a bare role
/// with empty size and industry. Callers are known to rely on this, so a
/// one-character difference in an otherwise-canonical descriptor yields a
/// structurally different segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudienceSegment {
    /// Buyer role, e.g. "VP of Sales". The whole descriptor when no
    /// `" at "` separator is present.
    pub role: String,
    /// Company-size band, e.g. "mid-market". Empty when not parseable.
    pub company_size: String,
    /// Industry, e.g. "fintech". Empty when not parseable.
    pub industry: String,
}

impl AudienceSegment {
    /// Build a segment directly from its parts.
    #[must_use]
    pub fn new(
        role: impl Into<String>,
        company_size: impl Into<String>,
        industry: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            company_size: company_size.into(),
            industry: industry.into(),
        }
    }

    /// Parse a free-text audience descriptor.
    ///
    /// Splits on `" at "` and `" companies in "`. A blank descriptor maps
    /// to the [`UNKNOWN_ICP`] role; a descriptor without `" at "` maps
    /// whole to the role (exact legacy fallback).
    #[must_use]
    pub fn parse(descriptor: &str) -> Self {
        let trimmed = descriptor.trim();
        if trimmed.is_empty() {
            return Self::new(UNKNOWN_ICP, "", "");
        }

        let Some((role, rest)) = trimmed.split_once(" at ") else {
            return Self::new(trimmed, "", "");
        };

        match rest.split_once(" companies in ") {
            Some((size, industry)) => Self::new(role, size, industry),
            // " at " present but no industry clause: everything after the
            // separator is the size band.
            None => Self::new(role, rest.strip_suffix(" companies").unwrap_or(rest), ""),
        }
    }

    /// True when the other segment shares this segment's role or (non-empty)
    /// industry. This is the looser relatedness check used when pairing
    /// experiments across segments.
    #[must_use]
    pub fn matches_role_or_industry(&self, other: &Self) -> bool {
        self.role == other.role
            || (!self.industry.is_empty() && self.industry == other.industry)
    }

    /// Canonical display descriptor for this segment.
    #[must_use]
    pub fn descriptor(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AudienceSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.company_size.is_empty() && self.industry.is_empty() {
            write!(f, "{}", self.role)
        } else {
            write!(
                f,
                "{} at {} companies in {}",
                self.role, self.company_size, self.industry
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_descriptor() {
        let segment = AudienceSegment::parse("CTO at enterprise companies in fintech");
        assert_eq!(segment.role, "CTO");
        assert_eq!(segment.company_size, "enterprise");
        assert_eq!(segment.industry, "fintech");
    }

    #[test]
    fn test_parse_round_trips_canonical_form() {
        let descriptor = "Head of Growth at mid-market companies in SaaS";
        let segment = AudienceSegment::parse(descriptor);
        assert_eq!(segment.to_string(), descriptor);
    }

    #[test]
    fn test_parse_bare_role_fallback() {
        let segment = AudienceSegment::parse("Founders");
        assert_eq!(segment.role, "Founders");
        assert!(segment.company_size.is_empty());
        assert!(segment.industry.is_empty());
        assert_eq!(segment.to_string(), "Founders");
    }

    #[test]
    fn test_parse_blank_is_unknown_icp() {
        let segment = AudienceSegment::parse("   ");
        assert_eq!(segment.role, UNKNOWN_ICP);
    }

    #[test]
    fn test_parse_size_without_industry() {
        let segment = AudienceSegment::parse("CTO at enterprise companies");
        assert_eq!(segment.role, "CTO");
        assert_eq!(segment.company_size, "enterprise");
        assert!(segment.industry.is_empty());
    }

    #[test]
    fn test_one_character_difference_is_a_different_segment() {
        let a = AudienceSegment::parse("CTO at enterprise companies in fintech");
        let b = AudienceSegment::parse("CTO at enterprise companies in fintec");
        assert_ne!(a, b);
    }

    #[test]
    fn test_matches_role_or_industry() {
        let a = AudienceSegment::new("CTO", "enterprise", "fintech");
        let same_role = AudienceSegment::new("CTO", "startup", "healthcare");
        let same_industry = AudienceSegment::new("VP Eng", "startup", "fintech");
        let unrelated = AudienceSegment::new("VP Eng", "startup", "retail");

        assert!(a.matches_role_or_industry(&same_role));
        assert!(a.matches_role_or_industry(&same_industry));
        assert!(!a.matches_role_or_industry(&unrelated));
    }

    #[test]
    fn test_empty_industries_do_not_match_each_other() {
        let a = AudienceSegment::new("CTO", "", "");
        let b = AudienceSegment::new("VP Eng", "", "");
        assert!(!a.matches_role_or_industry(&b));
    }
}
