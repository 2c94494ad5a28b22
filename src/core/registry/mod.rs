mod client;
mod model;

pub use client::{ModrinthClient, MODRINTH_API};
pub use model::{
    FileHashes, Project, ReleaseCatalog, ReleaseFile, ReleaseRecord, SearchHit, SearchResponse,
};

use async_trait::async_trait;

use crate::core::error::FetchResult;

/// The three registry lookups the fetcher needs.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Direct lookup by project id or slug.
    async fn project(&self, id_or_slug: &str) -> FetchResult<Project>;

    /// Fuzzy search; the best hit, if any.
    async fn search(&self, query: &str) -> FetchResult<Option<SearchHit>>;

    /// All releases of a project, newest first.
    async fn versions(&self, project_id: &str) -> FetchResult<ReleaseCatalog>;
}
