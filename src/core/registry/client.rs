use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::model::{Project, ReleaseCatalog, ReleaseRecord, SearchHit, SearchResponse};
use super::Registry;
use crate::core::error::{FetchError, FetchResult};
use crate::core::retry::{Attempt, RetryPolicy};

pub const MODRINTH_API: &str = "https://api.modrinth.com/v2";

/// Modrinth v2 API client.
pub struct ModrinthClient {
    client: Client,
    base: Url,
    retry: RetryPolicy,
}

impl ModrinthClient {
    pub fn new(client: Client, base_url: &str, retry: RetryPolicy) -> FetchResult<Self> {
        let base = Url::parse(base_url).map_err(|e| FetchError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl {
                url: base_url.to_string(),
                reason: "not a base URL".into(),
            });
        }

        Ok(Self {
            client,
            base,
            retry,
        })
    }

    /// `<base>/<segments...>`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> FetchResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidUrl {
                url: self.base.to_string(),
                reason: "not a base URL".into(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> FetchResult<T> {
        debug!("GET {}", url);
        self.retry
            .run(url.as_str(), |_| {
                let request = self.client.get(url.clone());
                async move { Attempt::from(fetch_json(request).await) }
            })
            .await
    }
}

async fn fetch_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> FetchResult<T> {
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: response.url().to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl Registry for ModrinthClient {
    async fn project(&self, id_or_slug: &str) -> FetchResult<Project> {
        let url = self.endpoint(&["project", id_or_slug])?;
        self.get_json(url).await
    }

    async fn search(&self, query: &str) -> FetchResult<Option<SearchHit>> {
        let mut url = self.endpoint(&["search"])?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("limit", "1");

        let response: SearchResponse = self.get_json(url).await?;
        Ok(response.hits.into_iter().next())
    }

    async fn versions(&self, project_id: &str) -> FetchResult<ReleaseCatalog> {
        let url = self.endpoint(&["project", project_id, "version"])?;
        let releases: Vec<ReleaseRecord> = self.get_json(url).await?;
        let catalog = ReleaseCatalog::newest_first(releases);
        debug!("{} releases for {}", catalog.len(), project_id);
        Ok(catalog)
    }
}
