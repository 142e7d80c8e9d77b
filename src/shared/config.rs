use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::modules::remote::StatusPolicy;

/// Client configuration shared by the API services and the query controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Search page endpoint
    pub search_url: String,
    /// Detail endpoint; the content slug is appended verbatim
    pub detail_base_url: String,
    /// Image delivery prefix for search posters
    pub search_image_base: String,
    /// Image delivery prefix for detail hero images
    pub detail_image_base: String,
    /// Only slugs under this path survive the search filter
    pub category_prefix: String,
    /// Raw value of the `slug` query parameter on search requests
    pub explore_slug: String,
    pub debounce_ms: u64,
    pub timeout_seconds: u32,
    pub user_agent: String,
    pub status_policy: StatusPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            search_url: "https://www.hotstar.com/api/internal/bff/v2/pages/search".to_string(),
            detail_base_url: "https://www.hotstar.com/api/internal/bff/v2/slugs".to_string(),
            search_image_base: "https://img1.hotstarext.com/image/upload/f_auto,t_web_m_1x/"
                .to_string(),
            detail_image_base: "https://img1.hotstarext.com/image/upload/f_auto/".to_string(),
            category_prefix: "/in/movies".to_string(),
            explore_slug: "in&slug=explore".to_string(),
            debounce_ms: 500,
            timeout_seconds: 15,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string(),
            status_policy: StatusPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Build a config from defaults plus `MARQUEE_*` environment overrides.
    ///
    /// Loads a `.env` file if one exists. Unparsable numeric overrides are
    /// ignored with a warning.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(url) = std::env::var("MARQUEE_SEARCH_URL") {
            config.search_url = url;
        }
        if let Ok(url) = std::env::var("MARQUEE_DETAIL_URL") {
            config.detail_base_url = url;
        }
        if let Ok(prefix) = std::env::var("MARQUEE_CATEGORY_PREFIX") {
            config.category_prefix = prefix;
        }
        if let Ok(agent) = std::env::var("MARQUEE_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Ok(raw) = std::env::var("MARQUEE_DEBOUNCE_MS") {
            match raw.parse() {
                Ok(ms) => config.debounce_ms = ms,
                Err(_) => log::warn!("Ignoring invalid MARQUEE_DEBOUNCE_MS value '{}'", raw),
            }
        }
        if let Ok(raw) = std::env::var("MARQUEE_TIMEOUT_SECONDS") {
            match raw.parse() {
                Ok(secs) => config.timeout_seconds = secs,
                Err(_) => log::warn!("Ignoring invalid MARQUEE_TIMEOUT_SECONDS value '{}'", raw),
            }
        }

        config
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds as u64)
    }
}
