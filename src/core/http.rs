use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING};
use reqwest::Client;

/// Modrinth asks API clients to identify themselves.
pub const APP_USER_AGENT: &str = concat!("packfetch/", env!("CARGO_PKG_VERSION"));

/// Shared client for registry calls and downloads. `timeout` bounds each
/// attempt, not the whole retry sequence.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    Client::builder()
        .user_agent(APP_USER_AGENT)
        .default_headers(default_headers)
        .timeout(timeout)
        .build()
}
