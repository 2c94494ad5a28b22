use std::fmt;

/// Comparable form of a Minecraft version string.
///
/// Only the leading `major.minor[.patch]` is considered, so `"1.20"`,
/// `"1.20.0"` and `"1.20-pre1"` all compare equal. Anything that does not
/// start with two dotted numbers collapses to `0.0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionKey {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl VersionKey {
    pub const ZERO: VersionKey = VersionKey {
        major: 0,
        minor: 0,
        patch: 0,
    };

    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse the leading dotted numbers of `version`.
    ///
    /// Never fails: unrecognised input yields [`VersionKey::ZERO`].
    pub fn parse(version: &str) -> Self {
        Self::try_parse(version).unwrap_or(Self::ZERO)
    }

    /// Like [`VersionKey::parse`], but `None` when the leading
    /// `major.minor` is missing or overflows.
    pub fn try_parse(version: &str) -> Option<Self> {
        let (major, rest) = leading_number(version)?;
        let rest = rest.strip_prefix('.')?;
        let (minor, rest) = leading_number(rest)?;

        let patch = match rest.strip_prefix('.').and_then(leading_number) {
            Some((patch, _)) => patch,
            // `1.20.` or `1.20-pre1`: the optional group simply didn't match,
            // unless the digits were there and overflowed.
            None if rest.strip_prefix('.').is_some_and(starts_with_digit) => return None,
            None => 0,
        };

        Some(Self::new(major, minor, patch))
    }
}

fn starts_with_digit(s: &str) -> bool {
    s.bytes().next().is_some_and(|b| b.is_ascii_digit())
}

/// Split off a run of ASCII digits. `None` if there are none or they overflow.
fn leading_number(s: &str) -> Option<(u64, &str)> {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_triple() {
        assert_eq!(VersionKey::parse("1.20.4"), VersionKey::new(1, 20, 4));
    }

    #[test]
    fn missing_patch_defaults_to_zero() {
        assert_eq!(VersionKey::parse("1.20"), VersionKey::new(1, 20, 0));
        assert_eq!(VersionKey::parse("1.20"), VersionKey::parse("1.20.0"));
    }

    #[test]
    fn trailing_text_is_ignored() {
        assert_eq!(VersionKey::parse("1.20.1-pre2"), VersionKey::new(1, 20, 1));
        assert_eq!(VersionKey::parse("1.19-rc1"), VersionKey::new(1, 19, 0));
        assert_eq!(VersionKey::parse("1.21."), VersionKey::new(1, 21, 0));
        assert_eq!(VersionKey::parse("1.2.3.4"), VersionKey::new(1, 2, 3));
    }

    #[test]
    fn unparseable_input_is_zero() {
        for raw in ["", "23w13a", "b1.7.3", "1", "1.", ".1.2", "latest"] {
            assert_eq!(VersionKey::parse(raw), VersionKey::ZERO, "input {raw:?}");
        }
    }

    #[test]
    fn try_parse_tells_zero_from_garbage() {
        assert_eq!(VersionKey::try_parse("0.0"), Some(VersionKey::ZERO));
        assert_eq!(VersionKey::try_parse("snapshot"), None);
    }

    #[test]
    fn overflowing_component_is_zero() {
        assert_eq!(
            VersionKey::parse("1.99999999999999999999999"),
            VersionKey::ZERO
        );
        assert_eq!(
            VersionKey::parse("1.2.99999999999999999999999"),
            VersionKey::ZERO
        );
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(VersionKey::parse("1.19.4") < VersionKey::parse("1.20"));
        assert!(VersionKey::parse("1.20.1") < VersionKey::parse("1.20.2"));
        assert!(VersionKey::parse("1.9") < VersionKey::parse("1.10"));
        assert!(VersionKey::parse("2.0") > VersionKey::parse("1.99.99"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for raw in ["1.20.1", "1.20", "1.8.9-OptiFine", "nonsense", "0.0"] {
            let key = VersionKey::parse(raw);
            assert_eq!(VersionKey::parse(&key.to_string()), key, "input {raw:?}");
        }
    }
}
