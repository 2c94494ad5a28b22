use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::parser::{PackEntry, PackList};
use crate::core::downloader::{DownloadEntry, Downloader};
use crate::core::registry::Registry;
use crate::core::report::Reporter;
use crate::core::resolver::{
    resolve, MatchTier, Resolution, ResolutionDecision, ResolveRequest, UnresolvedReason,
};
use crate::core::version::TargetVersion;

/// How a pack list entry was identified on the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// Found by direct id/slug lookup rather than fuzzy search.
    pub exact: bool,
}

/// What happened to one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    Downloaded(PathBuf),
    /// The destination already existed.
    Skipped(PathBuf),
    /// Dry run: would have downloaded to this path.
    Planned(PathBuf),
    NotFound,
    VersionsUnavailable,
    Unresolved(UnresolvedReason),
    /// The file name or directory would land outside the output root.
    UnsafeDestination(String),
    DownloadFailed(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOutcome {
    /// Set whenever the project was identified, even if nothing was
    /// downloaded; this is what goes into the cache.
    pub project: Option<ProjectRef>,
    pub status: EntryStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub planned: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, status: &EntryStatus) {
        match status {
            EntryStatus::Downloaded(_) => self.downloaded += 1,
            EntryStatus::Skipped(_) => self.skipped += 1,
            EntryStatus::Planned(_) => self.planned += 1,
            EntryStatus::NotFound
            | EntryStatus::VersionsUnavailable
            | EntryStatus::Unresolved(_)
            | EntryStatus::UnsafeDestination(_)
            | EntryStatus::DownloadFailed(_) => self.failed += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub summary: RunSummary,
    /// New cache file contents, in pack list line order.
    pub cache: String,
}

/// Walks a pack list entry by entry: identify, resolve, download.
///
/// Entries are processed strictly one after another. A failing entry is
/// reported and counted; it never stops the run.
pub struct ManifestDriver<'a> {
    pub registry: &'a dyn Registry,
    pub downloader: &'a Downloader,
    pub reporter: &'a dyn Reporter,
    pub target: &'a TargetVersion,
    pub output_root: &'a Path,
    pub dry_run: bool,
}

impl ManifestDriver<'_> {
    pub async fn run(&self, pack: &PackList) -> RunReport {
        for orphan in pack.orphans() {
            self.reporter.warning(&format!(
                "  [!] '{}' appears before any [section] header and is ignored.",
                orphan
            ));
        }

        let entries: Vec<&PackEntry> = pack.entries().collect();
        let total = entries.len();
        let mut summary = RunSummary::default();
        let mut project_ids: Vec<Option<String>> = vec![None; pack.lines().len()];

        for (position, entry) in entries.into_iter().enumerate() {
            let outcome = self.process_entry(position + 1, total, entry).await;
            summary.record(&outcome.status);
            project_ids[entry.line] = outcome.project.map(|p| p.id);
        }

        let cache = pack.render_with(|line| project_ids[line].take());
        RunReport { summary, cache }
    }

    pub async fn process_entry(
        &self,
        position: usize,
        total: usize,
        entry: &PackEntry,
    ) -> EntryOutcome {
        self.reporter.heading(&format!(
            "\n[{}/{}] > Retrieving: {} ({})",
            position, total, entry.query, entry.requirement
        ));

        let Some(project) = self.lookup_project(&entry.query).await else {
            return EntryOutcome {
                project: None,
                status: EntryStatus::NotFound,
            };
        };

        debug!(
            "'{}' identified as {} ({}) by {}",
            entry.query,
            project.slug,
            project.id,
            if project.exact { "direct lookup" } else { "search" }
        );
        let status = self.fetch_project(&project, entry).await;
        EntryOutcome {
            project: Some(project),
            status,
        }
    }

    /// Direct id/slug lookup first, silently; fuzzy search second.
    async fn lookup_project(&self, query: &str) -> Option<ProjectRef> {
        match self.registry.project(query).await {
            Ok(project) => {
                self.reporter.info(&format!(
                    "  [*] Exact identifier hit: {} ({})",
                    project.title, project.id
                ));
                return Some(ProjectRef {
                    id: project.id,
                    title: project.title,
                    slug: project.slug,
                    exact: true,
                });
            }
            Err(e) => debug!("Direct lookup of '{}' failed: {}", query, e),
        }

        match self.registry.search(query).await {
            Ok(Some(hit)) => {
                self.reporter.info(&format!(
                    "  [*] Fuzzy search matched: {} ({})",
                    hit.title, hit.slug
                ));
                Some(ProjectRef {
                    id: hit.project_id,
                    title: hit.title,
                    slug: hit.slug,
                    exact: false,
                })
            }
            Ok(None) => {
                self.reporter
                    .error("  [-] No matching project found on Modrinth.");
                None
            }
            Err(e) => {
                self.reporter
                    .error(&format!("  [!] Search request failed: {}", e));
                None
            }
        }
    }

    async fn fetch_project(&self, project: &ProjectRef, entry: &PackEntry) -> EntryStatus {
        let catalog = match self.registry.versions(&project.id).await {
            Ok(catalog) => catalog,
            Err(e) => {
                self.reporter.error(&format!(
                    "  [-] Could not fetch the version list of {}: {}",
                    project.id, e
                ));
                return EntryStatus::VersionsUnavailable;
            }
        };

        let request = ResolveRequest::new(&entry.requirement, self.target);
        let decision = match resolve(&catalog, &request) {
            Resolution::Resolved(decision) => decision,
            Resolution::Unresolved(reason) => {
                debug!("'{}' ({}) unresolved: {}", entry.query, project.id, reason);
                self.reporter.error(&self.unresolved_message(reason, &request));
                return EntryStatus::Unresolved(reason);
            }
        };
        self.report_decision(&decision, &request);

        let Some(dest) = self.destination(entry, &decision) else {
            self.reporter.error(&format!(
                "  [x] Refusing to write '{}' outside {}.",
                decision.file_name(),
                self.output_root.display()
            ));
            return EntryStatus::UnsafeDestination(decision.file_name());
        };

        if dest.exists() {
            self.reporter
                .info(&format!("  [=] Already present: {}", dest.display()));
            return EntryStatus::Skipped(dest);
        }

        if self.dry_run {
            self.reporter
                .info(&format!("  [~] Would download to {}", dest.display()));
            return EntryStatus::Planned(dest);
        }

        let size = match decision.file.size {
            Some(bytes) => format!(" ({} KiB)", bytes.div_ceil(1024)),
            None => String::new(),
        };
        self.reporter.info(&format!(
            "  [↓] Downloading: {}{} ...",
            decision.file_name(),
            size
        ));
        let download = DownloadEntry {
            url: &decision.file.url,
            dest: &dest,
            sha1: decision.file.hashes.sha1.as_deref(),
        };
        match self.downloader.download_file(download).await {
            Ok(_) => {
                self.reporter
                    .success(&format!("  [√] Saved to {}", dest.display()));
                EntryStatus::Downloaded(dest)
            }
            Err(e) => {
                self.reporter
                    .error(&format!("  [x] Download failed: {}", e));
                EntryStatus::DownloadFailed(dest)
            }
        }
    }

    /// `<output root>/<category>/[subdir/]<prefix><filename>`, or `None` if
    /// any part would climb out of the output root.
    fn destination(&self, entry: &PackEntry, decision: &ResolutionDecision<'_>) -> Option<PathBuf> {
        let mut dest = self.output_root.to_path_buf();
        let dirs = [Some(entry.requirement.dir_name()), entry.subdir.as_deref()];
        for dir in dirs.into_iter().flatten() {
            if !is_nested_dir(Path::new(dir)) {
                return None;
            }
            dest.push(dir);
        }

        let file_name = decision.file_name();
        if !is_plain_file_name(&file_name) {
            return None;
        }
        dest.push(file_name);
        Some(dest)
    }

    fn report_decision(&self, decision: &ResolutionDecision<'_>, request: &ResolveRequest<'_>) {
        let target = request.target;
        let release = &decision.release.version_number;
        match decision.tier {
            MatchTier::Exact if decision.actual_loader != request.loader => {
                self.reporter.success(&format!(
                    "  [+] Found {} compatible with {} via its {} build.",
                    release, target, decision.actual_loader
                ));
            }
            MatchTier::Exact => {
                self.reporter.success(&format!(
                    "  [+] Found {} compatible with {}.",
                    release, target
                ));
            }
            MatchTier::DegradedLoader => {
                self.reporter.warning(&format!(
                    "  [!] No {} build for {}; using the {} build of {} (unconfirmed).",
                    request.loader, target, decision.actual_loader, release
                ));
            }
            MatchTier::FallbackVersion => {
                self.reporter.warning(&format!(
                    "  [!] No release supports {}; falling back to {} for {}.",
                    target, release, decision.matched_version
                ));
            }
            MatchTier::FallbackVersionDegradedLoader => {
                self.reporter.warning(&format!(
                    "  [!] No release supports {} on {}; falling back to the {} build of {} for {} (unconfirmed).",
                    target, request.loader, decision.actual_loader, release, decision.matched_version
                ));
            }
        }
    }

    fn unresolved_message(&self, reason: UnresolvedReason, request: &ResolveRequest<'_>) -> String {
        match reason {
            UnresolvedReason::EmptyCatalog => "  [-] The project has no published versions.".into(),
            UnresolvedReason::NoEligibleFiles => format!(
                "  [-] No release of this project ships a {} file.",
                request.required_extension
            ),
            UnresolvedReason::NoCompatibleLoader => format!(
                "  [-] No {} release is compatible with {}.",
                request.required_extension, request.loader
            ),
            UnresolvedReason::NoCompatibleVersion => format!(
                "  [-] No {} release supports {} or an older version.",
                request.loader, request.target
            ),
        }
    }
}

/// Relative path made only of normal segments (and `.`).
fn is_nested_dir(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Exactly one normal path segment.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
