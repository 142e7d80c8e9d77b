use reqwest::Method;

use crate::shared::config::ClientConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub path: String,
    pub method: Method,
}

impl Endpoint {
    pub fn search_movies(config: &ClientConfig) -> Self {
        Self {
            path: config.search_url.clone(),
            method: Method::GET,
        }
    }

    pub fn movie_details(config: &ClientConfig) -> Self {
        Self {
            path: config.detail_base_url.clone(),
            method: Method::GET,
        }
    }
}
