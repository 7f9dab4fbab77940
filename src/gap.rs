//! Gap analysis - audience segments blueprints name but no experiment has
//! touched
//!
//! The comparison is exact segment equality on the structured
//! `{role, company_size, industry}` value, not fuzzy matching: a candidate
//! differing from every targeted audience by a single character is
//! untapped. Output preserves blueprint iteration order and keeps
//! duplicates, exactly as blueprints declare them.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::{AudienceProfile, AudienceSegment, BlueprintRecord, ExperimentRecord};

/// An untapped segment together with the blueprint that proposed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UntappedCandidate {
    /// The audience segment no experiment targets yet.
    pub segment: AudienceSegment,
    /// The blueprint whose audience produced the candidate.
    pub blueprint_id: String,
}

/// Audience segments named by blueprints but targeted by no experiment.
///
/// Returns canonical descriptors, in blueprint order, duplicates kept.
#[must_use]
pub fn untapped_segments(
    experiments: &[ExperimentRecord],
    blueprints: &[BlueprintRecord],
) -> Vec<String> {
    untapped_candidates(experiments, blueprints)
        .into_iter()
        .map(|candidate| candidate.segment.descriptor())
        .collect()
}

/// Like [`untapped_segments`], but keeps the blueprint back-reference for
/// each candidate.
#[must_use]
pub fn untapped_candidates(
    experiments: &[ExperimentRecord],
    blueprints: &[BlueprintRecord],
) -> Vec<UntappedCandidate> {
    collect_untapped(experiments, blueprints, |blueprint| {
        blueprint.candidate_segment()
    })
}

/// Audience segments untapped once profile-delegating blueprints are
/// resolved: a blueprint with empty audience lists borrows its referenced
/// profile's first role, size, and industry.
#[must_use]
pub fn untapped_segments_with_profiles(
    experiments: &[ExperimentRecord],
    blueprints: &[BlueprintRecord],
    profiles: &[AudienceProfile],
) -> Vec<String> {
    untapped_candidates_with_profiles(experiments, blueprints, profiles)
        .into_iter()
        .map(|candidate| candidate.segment.descriptor())
        .collect()
}

/// Like [`untapped_segments_with_profiles`], with blueprint back-references.
#[must_use]
pub fn untapped_candidates_with_profiles(
    experiments: &[ExperimentRecord],
    blueprints: &[BlueprintRecord],
    profiles: &[AudienceProfile],
) -> Vec<UntappedCandidate> {
    let by_id: HashMap<&str, &AudienceProfile> =
        profiles.iter().map(|p| (p.id(), p)).collect();
    collect_untapped(experiments, blueprints, |blueprint| {
        let profile = blueprint
            .audience_profile_id()
            .and_then(|id| by_id.get(id).copied());
        blueprint.candidate_segment_from(profile)
    })
}

fn collect_untapped<F>(
    experiments: &[ExperimentRecord],
    blueprints: &[BlueprintRecord],
    candidate_of: F,
) -> Vec<UntappedCandidate>
where
    F: Fn(&BlueprintRecord) -> Option<AudienceSegment>,
{
    let targeted: HashSet<AudienceSegment> =
        experiments.iter().map(ExperimentRecord::audience).collect();

    let untapped: Vec<UntappedCandidate> = blueprints
        .iter()
        .filter_map(|blueprint| {
            let segment = candidate_of(blueprint)?;
            if targeted.contains(&segment) {
                return None;
            }
            Some(UntappedCandidate {
                segment,
                blueprint_id: blueprint.id().to_string(),
            })
        })
        .collect();

    debug!(
        targeted = targeted.len(),
        candidates = blueprints.len(),
        untapped = untapped.len(),
        "gap analysis"
    );
    untapped
}
