use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::endpoints::Endpoint;
use crate::modules::catalog::{
    domain::Movie, infrastructure::dto::SearchTree, infrastructure::CatalogMapper,
    traits::MovieSearchApi,
};
use crate::modules::remote::{RemoteService, RequestDescriptor};
use crate::shared::config::ClientConfig;
use crate::shared::errors::{RemoteError, RemoteResult};
use crate::shared::utils::LogContext;

/// Referrer context the upstream expects on every search. Both ids are
/// generated locally per request.
#[derive(Debug, Serialize)]
struct ReferrerProps {
    search_session_id: String,
    search_id: String,
}

impl ReferrerProps {
    fn generate() -> Self {
        let search_session_id = Uuid::new_v4().to_string();
        let search_id = format!(
            "{}-{}",
            search_session_id,
            rand::thread_rng().gen_range(1..=10)
        );
        Self {
            search_session_id,
            search_id,
        }
    }
}

pub struct MovieSearchService {
    remote: Arc<RemoteService>,
    endpoint: Endpoint,
    explore_slug: String,
    mapper: CatalogMapper,
}

impl MovieSearchService {
    pub fn new(remote: Arc<RemoteService>, config: &ClientConfig) -> Self {
        Self {
            remote,
            endpoint: Endpoint::search_movies(config),
            explore_slug: config.explore_slug.clone(),
            mapper: CatalogMapper::from_config(config),
        }
    }

    /// Descriptor for one search. The query and referrer are percent-encoded
    /// here since the pipeline appends parameters verbatim.
    pub fn search_descriptor(&self, query: &str) -> RemoteResult<RequestDescriptor> {
        let referrer = serde_json::to_string(&ReferrerProps::generate()).map_err(|e| {
            log::warn!("Failed to encode referrer props: {}", e);
            RemoteError::InvalidUrl
        })?;

        Ok(
            RequestDescriptor::new(self.endpoint.path.clone(), self.endpoint.method.clone())
                .with_parameter("slug", self.explore_slug.clone())
                .with_parameter("search_query", urlencoding::encode(query).into_owned())
                .with_parameter("referrer_props", urlencoding::encode(&referrer).into_owned()),
        )
    }
}

#[async_trait]
impl MovieSearchApi for MovieSearchService {
    async fn search_movies(&self, query: &str) -> RemoteResult<Vec<Movie>> {
        LogContext::search_operation(query, None);

        let descriptor = self.search_descriptor(query)?;
        let tree: SearchTree = self.remote.execute(descriptor).await?;
        let movies = self.mapper.map_search(&tree);

        LogContext::search_operation(query, Some(movies.len()));
        Ok(movies)
    }
}
