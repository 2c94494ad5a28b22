use super::config::FetchConfig;
use crate::core::downloader::Downloader;
use crate::core::error::FetchResult;
use crate::core::http::build_http_client;
use crate::core::registry::ModrinthClient;
use crate::core::report::ConsoleReporter;

/// Everything a run needs, built once at startup.
pub struct AppState {
    pub config: FetchConfig,
    pub registry: ModrinthClient,
    pub downloader: Downloader,
    pub reporter: ConsoleReporter,
}

impl AppState {
    pub fn new(config: FetchConfig) -> FetchResult<Self> {
        let http_client = build_http_client(config.timeout)?;
        let registry = ModrinthClient::new(http_client.clone(), &config.api_base, config.retry)?;
        let downloader = Downloader::new(http_client, config.retry);
        let reporter = ConsoleReporter::new(config.color);

        Ok(Self {
            config,
            registry,
            downloader,
            reporter,
        })
    }
}
