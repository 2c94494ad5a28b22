use std::fmt;

use crate::core::registry::{ReleaseFile, ReleaseRecord};

/// Filename tag for a release built for an older Minecraft version.
const VERSION_TAG: &str = "OD";
/// Filename tag for a release built for a different, unconfirmed loader.
const LOADER_TAG: &str = "OL";

/// How well a chosen release fits the request, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// Target version and requested loader (or a lossless substitute).
    Exact,
    /// Target version, degraded loader.
    DegradedLoader,
    /// Older version, requested loader.
    FallbackVersion,
    /// Older version and degraded loader.
    FallbackVersionDegradedLoader,
}

impl MatchTier {
    pub fn is_version_degraded(self) -> bool {
        matches!(
            self,
            Self::FallbackVersion | Self::FallbackVersionDegradedLoader
        )
    }

    pub fn is_loader_degraded(self) -> bool {
        matches!(
            self,
            Self::DegradedLoader | Self::FallbackVersionDegradedLoader
        )
    }
}

/// The release and file picked for one pack list entry.
#[derive(Debug, Clone)]
pub struct ResolutionDecision<'c> {
    pub release: &'c ReleaseRecord,
    pub file: &'c ReleaseFile,
    pub tier: MatchTier,
    /// The `game_versions` entry that qualified the release.
    pub matched_version: String,
    /// Loader the release was built for.
    pub actual_loader: String,
}

impl ResolutionDecision<'_> {
    /// `[OD_<version>]_` and/or `[OL_<loader>]_`, in that order. Empty for
    /// an exact match.
    pub fn prefix(&self) -> String {
        let mut prefix = String::new();
        if self.tier.is_version_degraded() {
            prefix.push_str(&tag(VERSION_TAG, &self.matched_version));
        }
        if self.tier.is_loader_degraded() {
            prefix.push_str(&tag(LOADER_TAG, &self.actual_loader));
        }
        prefix
    }

    /// Name the file is saved under.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.prefix(), self.file.filename)
    }
}

fn tag(kind: &str, value: &str) -> String {
    format!("[{kind}_{value}]_")
}

/// Why no release could be chosen, most specific cause available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnresolvedReason {
    /// The project has no releases at all.
    EmptyCatalog,
    /// No release ships a file with the required extension.
    NoEligibleFiles,
    /// Files exist, but none of those releases targets a usable loader.
    NoCompatibleLoader,
    /// Loader-compatible releases exist, but only for newer versions.
    NoCompatibleVersion,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::EmptyCatalog => "empty catalog",
            Self::NoEligibleFiles => "no eligible files",
            Self::NoCompatibleLoader => "no compatible loader",
            Self::NoCompatibleVersion => "no compatible version",
        };
        f.write_str(text)
    }
}

/// Result of a resolution: a decision or the reason there is none.
#[derive(Debug, Clone)]
pub enum Resolution<'c> {
    Resolved(ResolutionDecision<'c>),
    Unresolved(UnresolvedReason),
}

impl<'c> Resolution<'c> {
    pub fn decision(&self) -> Option<&ResolutionDecision<'c>> {
        match self {
            Self::Resolved(decision) => Some(decision),
            Self::Unresolved(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::FileHashes;

    fn release() -> ReleaseRecord {
        ReleaseRecord {
            id: "v1".into(),
            name: "Example".into(),
            version_number: "1.0.0".into(),
            game_versions: vec!["1.20.1".into()],
            loaders: vec!["spigot".into()],
            files: vec![ReleaseFile {
                url: "https://cdn.example/example.jar".into(),
                filename: "example.jar".into(),
                hashes: FileHashes::default(),
                size: None,
            }],
            date_published: None,
        }
    }

    fn decision(release: &ReleaseRecord, tier: MatchTier) -> ResolutionDecision<'_> {
        ResolutionDecision {
            release,
            file: &release.files[0],
            tier,
            matched_version: "1.20.1".into(),
            actual_loader: "spigot".into(),
        }
    }

    #[test]
    fn exact_match_has_no_prefix() {
        let release = release();
        assert_eq!(decision(&release, MatchTier::Exact).file_name(), "example.jar");
    }

    #[test]
    fn prefixes_follow_tier() {
        let release = release();
        assert_eq!(
            decision(&release, MatchTier::DegradedLoader).prefix(),
            "[OL_spigot]_"
        );
        assert_eq!(
            decision(&release, MatchTier::FallbackVersion).prefix(),
            "[OD_1.20.1]_"
        );
        assert_eq!(
            decision(&release, MatchTier::FallbackVersionDegradedLoader).file_name(),
            "[OD_1.20.1]_[OL_spigot]_example.jar"
        );
    }

    #[test]
    fn tiers_are_ordered_best_first() {
        assert!(MatchTier::Exact < MatchTier::DegradedLoader);
        assert!(MatchTier::DegradedLoader < MatchTier::FallbackVersion);
        assert!(MatchTier::FallbackVersion < MatchTier::FallbackVersionDegradedLoader);
        assert!(MatchTier::FallbackVersionDegradedLoader.is_version_degraded());
        assert!(MatchTier::FallbackVersionDegradedLoader.is_loader_degraded());
        assert!(!MatchTier::Exact.is_loader_degraded());
    }
}
