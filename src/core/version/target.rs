use std::fmt;

use super::key::VersionKey;

/// The Minecraft version a pack is being assembled for.
///
/// Keeps the text as typed by the user, since exact matches against a
/// release's `game_versions` are textual, next to its parsed key used for
/// fallback ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetVersion {
    raw: String,
    key: VersionKey,
    comparable: bool,
}

impl TargetVersion {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = VersionKey::try_parse(&raw);
        Self {
            key: parsed.unwrap_or(VersionKey::ZERO),
            comparable: parsed.is_some(),
            raw,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn key(&self) -> VersionKey {
        self.key
    }

    /// `false` when the text didn't parse, in which case no release can
    /// qualify as an older fallback.
    pub fn is_comparable(&self) -> bool {
        self.comparable
    }
}

impl fmt::Display for TargetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_raw_text_and_key() {
        let target = TargetVersion::new("1.20");
        assert_eq!(target.as_str(), "1.20");
        assert_eq!(target.key(), VersionKey::new(1, 20, 0));
        assert!(target.is_comparable());
    }

    #[test]
    fn snapshot_names_are_not_comparable() {
        assert!(!TargetVersion::new("24w14a").is_comparable());
    }

    #[test]
    fn zero_version_is_still_comparable() {
        for raw in ["0.0", "0.0.0"] {
            let target = TargetVersion::new(raw);
            assert_eq!(target.key(), VersionKey::ZERO);
            assert!(target.is_comparable(), "input {raw:?}");
        }
    }
}
