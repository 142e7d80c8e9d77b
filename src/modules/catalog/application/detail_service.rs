use async_trait::async_trait;
use std::sync::Arc;

use super::endpoints::Endpoint;
use crate::modules::catalog::{
    domain::MovieDetail, infrastructure::dto::DetailTree, infrastructure::CatalogMapper,
    traits::MovieDetailApi,
};
use crate::modules::remote::{RemoteService, RequestDescriptor};
use crate::shared::config::ClientConfig;
use crate::shared::errors::{RemoteError, RemoteResult};

const WATCH_SEGMENT: &str = "/watch";

pub struct MovieDetailService {
    remote: Arc<RemoteService>,
    endpoint: Endpoint,
    mapper: CatalogMapper,
}

impl MovieDetailService {
    pub fn new(remote: Arc<RemoteService>, config: &ClientConfig) -> Self {
        Self {
            remote,
            endpoint: Endpoint::movie_details(config),
            mapper: CatalogMapper::from_config(config),
        }
    }

    /// Detail URL for a slug, with a leading `/watch` segment removed.
    pub fn detail_url(&self, slug: &str) -> String {
        let slug = match slug.strip_prefix(WATCH_SEGMENT) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => slug,
        };
        format!("{}{}", self.endpoint.path, slug)
    }
}

#[async_trait]
impl MovieDetailApi for MovieDetailService {
    async fn fetch_movie_detail(&self, slug: &str) -> RemoteResult<MovieDetail> {
        let descriptor =
            RequestDescriptor::new(self.detail_url(slug), self.endpoint.method.clone());
        let tree: DetailTree = self.remote.execute(descriptor).await?;

        self.mapper.map_detail(&tree).ok_or_else(|| {
            log::info!("No content info found for '{}'", slug);
            RemoteError::InvalidResponse
        })
    }
}
