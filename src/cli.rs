use std::path::PathBuf;

use clap::Parser;

use crate::core::error::FetchResult;
use crate::core::registry::MODRINTH_API;
use crate::core::state::{ColorChoice, FetchConfig};

/// Resolve a pack list against Modrinth and download the best build of
/// every entry for one Minecraft version.
#[derive(Debug, Parser)]
#[command(name = "packfetch")]
#[command(version)]
#[command(
    long_about = "Resolve a pack list against Modrinth and download the best build of every entry for one Minecraft version.\n\nThe pack list groups queries under [loader] headers ([paper], [fabric], [datapack], ...) with optional ---dir:<path> subdirectory markers. After each run a <pack list>.cache file is written with resolved project ids; it is read instead of the pack list on later runs."
)]
pub struct Cli {
    /// Pack list file
    pub manifest: PathBuf,

    /// Target Minecraft version, e.g. 1.20.1
    pub mc_version: String,

    /// Directory the loader/datapack folders are created in
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Registry API base URL
    #[arg(long, env = "PACKFETCH_API_BASE", default_value = MODRINTH_API)]
    pub api_base: String,

    /// Attempts per request before giving up
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// Per-attempt timeout in seconds
    #[arg(long, default_value_t = FetchConfig::DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Colour output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Resolve and rewrite the cache without downloading
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose diagnostic logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self, stdout_is_terminal: bool) -> FetchResult<FetchConfig> {
        let mut config = FetchConfig::new(self.manifest, &self.mc_version)?
            .with_attempts(self.retries)?
            .with_timeout_secs(self.timeout)?;
        config.output_root = self.output_dir;
        config.api_base = self.api_base;
        config.color = self.color.enabled(stdout_is_terminal);
        config.dry_run = self.dry_run;
        Ok(config)
    }
}
