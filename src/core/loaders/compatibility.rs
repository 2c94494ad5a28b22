// ─── Loader compatibility ───
// Decides whether a release built for one set of server loaders can run on
// the loader the pack list asks for.
//
// The substitutions below are the known API supersets among Bukkit-family
// servers. The table is closed: a new relationship is a new explicit rule,
// nothing is inferred transitively.

const PAPER: &str = "paper";
const PURPUR: &str = "purpur";
const SPIGOT: &str = "spigot";

/// Outcome of matching a requested loader against a release's loaders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompatibilityVerdict {
    Incompatible,
    /// Runs as-is. `actual` may differ from the request for lossless
    /// substitutions (a Paper plugin on Purpur).
    Exact { actual: String },
    /// Probably runs, but the release was not built for the requested
    /// loader and may miss APIs it relies on.
    Degraded { actual: String },
}

impl CompatibilityVerdict {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Loader the release was actually built for.
    pub fn actual_loader(&self) -> Option<&str> {
        match self {
            Self::Incompatible => None,
            Self::Exact { actual } | Self::Degraded { actual } => Some(actual),
        }
    }
}

/// Evaluate `requested` against `declared`. First matching rule wins.
pub fn evaluate<S: AsRef<str>>(requested: &str, declared: &[S]) -> CompatibilityVerdict {
    let requested = requested.to_lowercase();
    let declares = |loader: &str| {
        declared
            .iter()
            .any(|d| d.as_ref().eq_ignore_ascii_case(loader))
    };

    if declares(requested.as_str()) {
        return CompatibilityVerdict::Exact { actual: requested };
    }

    if requested == PURPUR && declares(PAPER) {
        return CompatibilityVerdict::Exact {
            actual: PAPER.to_string(),
        };
    }

    if (requested == PAPER || requested == PURPUR) && declares(SPIGOT) {
        return CompatibilityVerdict::Degraded {
            actual: SPIGOT.to_string(),
        };
    }

    CompatibilityVerdict::Incompatible
}
