// ─── Registry model ───
// Modrinth v2 response shapes, trimmed to what resolution and download use.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `GET /project/{id|slug}`
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
}

/// `GET /search`
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub project_id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
}

/// One published version of a project.
///
/// `files`, `game_versions` and `loaders` are mandatory: a response missing
/// any of them fails to decode instead of producing a half-empty record.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version_number: String,
    pub game_versions: Vec<String>,
    pub loaders: Vec<String>,
    pub files: Vec<ReleaseFile>,
    #[serde(default)]
    pub date_published: Option<DateTime<Utc>>,
}

impl ReleaseRecord {
    /// First file ending in `extension`. First match, not best match.
    pub fn first_file_with_extension(&self, extension: &str) -> Option<&ReleaseFile> {
        self.files.iter().find(|f| f.filename.ends_with(extension))
    }

    pub fn supports_version(&self, version: &str) -> bool {
        self.game_versions.iter().any(|v| v == version)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseFile {
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub hashes: FileHashes,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileHashes {
    pub sha1: Option<String>,
}

/// Every release of one project, newest first.
///
/// Resolution stops at the first release that matches on both axes, so the
/// order is load-bearing. [`ReleaseCatalog::newest_first`] establishes it
/// from publication dates; [`ReleaseCatalog::new`] trusts the caller.
#[derive(Debug, Clone, Default)]
pub struct ReleaseCatalog {
    releases: Vec<ReleaseRecord>,
}

impl ReleaseCatalog {
    /// Wrap releases that are already ordered newest first.
    pub fn new(releases: Vec<ReleaseRecord>) -> Self {
        Self { releases }
    }

    /// Stable sort by `date_published`, descending. Undated releases keep
    /// their relative position after all dated ones.
    pub fn newest_first(mut releases: Vec<ReleaseRecord>) -> Self {
        releases.sort_by(|a, b| b.date_published.cmp(&a.date_published));
        Self { releases }
    }

    pub fn releases(&self) -> &[ReleaseRecord] {
        &self.releases
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }
}
