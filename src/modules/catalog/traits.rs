use async_trait::async_trait;

use super::domain::{Movie, MovieDetail};
use crate::shared::errors::RemoteResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieSearchApi: Send + Sync {
    /// Search the catalog. An empty list is a valid answer, not an error.
    async fn search_movies(&self, query: &str) -> RemoteResult<Vec<Movie>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieDetailApi: Send + Sync {
    /// Fetch detail for a navigation slug. Reports `InvalidResponse` when the
    /// page carries no content-info block.
    async fn fetch_movie_detail(&self, slug: &str) -> RemoteResult<MovieDetail>;
}
