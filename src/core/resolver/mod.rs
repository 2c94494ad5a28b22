// ─── Resolver ───
// Picks the best release of a project for a (Minecraft version, loader)
// request. Pure: no IO, no logging.
//
// Priority, best first:
//   1. target version, exact loader        (ends the scan)
//   2. target version, degraded loader     (newest wins)
//   3. older version,  exact loader        (highest version wins)
//   4. older version,  degraded loader     (highest version wins)

mod decision;

pub use decision::{MatchTier, Resolution, ResolutionDecision, UnresolvedReason};

use crate::core::loaders::{evaluate, LoaderRequirement};
use crate::core::registry::{ReleaseCatalog, ReleaseFile, ReleaseRecord};
use crate::core::version::{TargetVersion, VersionKey};

/// What to resolve a catalog against.
#[derive(Debug, Clone, Copy)]
pub struct ResolveRequest<'a> {
    pub required_extension: &'a str,
    pub target: &'a TargetVersion,
    pub loader: &'a str,
}

impl<'a> ResolveRequest<'a> {
    pub fn new(requirement: &'a LoaderRequirement, target: &'a TargetVersion) -> Self {
        Self {
            required_extension: requirement.required_extension(),
            target,
            loader: requirement.loader_id(),
        }
    }
}

struct Candidate<'c> {
    release: &'c ReleaseRecord,
    file: &'c ReleaseFile,
    matched_version: String,
    actual_loader: String,
}

impl<'c> Candidate<'c> {
    fn into_decision(self, tier: MatchTier) -> ResolutionDecision<'c> {
        ResolutionDecision {
            release: self.release,
            file: self.file,
            tier,
            matched_version: self.matched_version,
            actual_loader: self.actual_loader,
        }
    }
}

struct Fallback<'c> {
    key: VersionKey,
    candidate: Candidate<'c>,
}

/// Resolve `catalog` against `request`.
///
/// `catalog` must be ordered newest first: the scan stops at the first
/// exact match, and ties within the degraded-loader tier go to the earliest
/// release seen.
pub fn resolve<'c>(catalog: &'c ReleaseCatalog, request: &ResolveRequest<'_>) -> Resolution<'c> {
    let target = request.target;

    let mut exact_degraded: Option<Candidate<'c>> = None;
    let mut fallback: Option<Fallback<'c>> = None;
    let mut fallback_degraded: Option<Fallback<'c>> = None;

    let mut saw_eligible_file = false;
    let mut saw_compatible_loader = false;

    for release in catalog.releases() {
        let Some(file) = release.first_file_with_extension(request.required_extension) else {
            continue;
        };
        saw_eligible_file = true;

        let verdict = evaluate(request.loader, release.loaders.as_slice());
        let Some(actual_loader) = verdict.actual_loader().map(str::to_string) else {
            continue;
        };
        let degraded = verdict.is_degraded();
        saw_compatible_loader = true;

        if release.supports_version(target.as_str()) {
            let candidate = Candidate {
                release,
                file,
                matched_version: target.as_str().to_string(),
                actual_loader,
            };
            if !degraded {
                return Resolution::Resolved(candidate.into_decision(MatchTier::Exact));
            }
            if exact_degraded.is_none() {
                exact_degraded = Some(candidate);
            }
            continue;
        }

        let slot = if degraded {
            &mut fallback_degraded
        } else {
            &mut fallback
        };
        for game_version in &release.game_versions {
            let key = VersionKey::parse(game_version);
            if key >= target.key() {
                continue;
            }
            if slot.as_ref().is_some_and(|best| key <= best.key) {
                continue;
            }
            *slot = Some(Fallback {
                key,
                candidate: Candidate {
                    release,
                    file,
                    matched_version: game_version.clone(),
                    actual_loader: actual_loader.clone(),
                },
            });
        }
    }

    if let Some(candidate) = exact_degraded {
        return Resolution::Resolved(candidate.into_decision(MatchTier::DegradedLoader));
    }
    if let Some(best) = fallback {
        return Resolution::Resolved(best.candidate.into_decision(MatchTier::FallbackVersion));
    }
    if let Some(best) = fallback_degraded {
        return Resolution::Resolved(
            best.candidate
                .into_decision(MatchTier::FallbackVersionDegradedLoader),
        );
    }

    let reason = if catalog.is_empty() {
        UnresolvedReason::EmptyCatalog
    } else if !saw_eligible_file {
        UnresolvedReason::NoEligibleFiles
    } else if !saw_compatible_loader {
        UnresolvedReason::NoCompatibleLoader
    } else {
        UnresolvedReason::NoCompatibleVersion
    };
    Resolution::Unresolved(reason)
}
