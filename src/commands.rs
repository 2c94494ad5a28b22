use tracing::info;

use crate::core::error::FetchResult;
use crate::core::manifest::{ManifestDriver, PackList, PackSource, RunSummary};
use crate::core::report::Reporter;
use crate::core::state::AppState;

/// The whole run: read the pack list (or its cache), process every entry,
/// rewrite the cache, report totals.
///
/// Only a missing pack list or an unwritable cache fail the run; entry
/// failures are counted in the summary.
pub async fn fetch_pack(state: &AppState) -> FetchResult<RunSummary> {
    let config = &state.config;
    let reporter = &state.reporter;

    let source = PackSource::locate(&config.manifest)?;
    if source.from_cache {
        reporter.heading(&format!(
            "[*] Found cache file '{}', reading it instead of the pack list...",
            source.path.display()
        ));
    }
    let pack = PackList::parse(&source.read().await?);

    if !config.target.is_comparable() {
        reporter.warning(&format!(
            "[!] '{}' is not a dotted release version; only exact matches can be used.",
            config.target
        ));
    }

    reporter.heading(&format!(
        "Target Minecraft version: {}\n{}",
        config.target,
        "-".repeat(40)
    ));
    info!(
        "{} entries from {:?}, output root {:?}",
        pack.entries().count(),
        source.path,
        config.output_root
    );

    let driver = ManifestDriver {
        registry: &state.registry,
        downloader: &state.downloader,
        reporter,
        target: &config.target,
        output_root: &config.output_root,
        dry_run: config.dry_run,
    };
    let report = driver.run(&pack).await;

    source.write_cache(&report.cache).await?;
    reporter.heading(&format!(
        "\n[*] Cache file updated: {}",
        source.cache_path.display()
    ));

    report_summary(reporter, &report.summary);
    Ok(report.summary)
}

fn report_summary(reporter: &dyn Reporter, summary: &RunSummary) {
    let mut line = format!(
        "--- Done: {} downloaded, {} skipped, {} failed",
        summary.downloaded, summary.skipped, summary.failed
    );
    if summary.planned > 0 {
        line.push_str(&format!(", {} planned (dry run)", summary.planned));
    }
    if summary.failed > 0 {
        reporter.warning(&line);
    } else {
        reporter.success(&line);
    }
}
