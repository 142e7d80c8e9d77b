use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use crate::shared::utils::LogContext;

pub const USER_TOKEN_KEY: &str = "x-hs-usertoken";
pub const PLATFORM_KEY: &str = "x-hs-platform";
pub const COOKIE_KEY: &str = "cookie";

const DEFAULT_PLATFORM: &str = "web";

/// Source of the headers that authenticate a request.
///
/// A missing credential only means the matching header is omitted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn auth_headers(&self) -> BTreeMap<String, String>;
}

/// In-memory credential store filled by the login collaborator.
pub struct CredentialStore {
    values: RwLock<HashMap<&'static str, String>>,
    user_agent: String,
}

impl CredentialStore {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            user_agent: user_agent.into(),
        }
    }

    pub fn save_credentials(
        &self,
        user_token: Option<String>,
        platform: Option<String>,
        cookie: Option<String>,
    ) {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());

        if let Some(token) = user_token {
            log::info!("Saved user token: {}", LogContext::redact(&token, 20));
            values.insert(USER_TOKEN_KEY, token);
        }

        let platform = platform.unwrap_or_else(|| DEFAULT_PLATFORM.to_string());
        log::info!("Saved platform: {}", platform);
        values.insert(PLATFORM_KEY, platform);

        if let Some(cookie) = cookie {
            log::info!("Saved cookie: {}", LogContext::redact(&cookie, 50));
            values.insert(COOKIE_KEY, cookie);
        }
    }

    pub fn clear(&self) {
        self.values
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        crate::log_info!("Credentials cleared");
    }

    pub fn user_token(&self) -> Option<String> {
        self.get(USER_TOKEN_KEY)
    }

    pub fn platform(&self) -> String {
        self.get(PLATFORM_KEY)
            .unwrap_or_else(|| DEFAULT_PLATFORM.to_string())
    }

    pub fn cookie(&self) -> Option<String> {
        self.get(COOKIE_KEY)
    }

    /// Both a user token and a cookie are required.
    pub fn is_authenticated(&self) -> bool {
        let authenticated = self.user_token().is_some() && self.cookie().is_some();
        log::debug!("Credential store authenticated = {}", authenticated);
        authenticated
    }

    /// Header map injected into every upstream request.
    pub fn headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers.insert("User-Agent".to_string(), self.user_agent.clone());
        headers.insert(PLATFORM_KEY.to_string(), self.platform());

        if let Some(token) = self.user_token() {
            headers.insert(USER_TOKEN_KEY.to_string(), token);
        }
        if let Some(cookie) = self.cookie() {
            headers.insert("Cookie".to_string(), cookie);
        }

        headers
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }
}

#[async_trait]
impl CredentialProvider for CredentialStore {
    async fn auth_headers(&self) -> BTreeMap<String, String> {
        self.headers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_omits_secret_headers() {
        let store = CredentialStore::new("agent/1.0");
        let headers = store.headers();

        assert_eq!(headers.get("Accept").map(String::as_str), Some("application/json"));
        assert_eq!(headers.get("User-Agent").map(String::as_str), Some("agent/1.0"));
        assert_eq!(headers.get(PLATFORM_KEY).map(String::as_str), Some("web"));
        assert!(!headers.contains_key(USER_TOKEN_KEY));
        assert!(!headers.contains_key("Cookie"));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_saved_credentials_are_injected() {
        let store = CredentialStore::new("agent/1.0");
        store.save_credentials(
            Some("token-123".to_string()),
            Some("android".to_string()),
            Some("session=abc".to_string()),
        );

        let headers = store.headers();
        assert_eq!(headers.get(USER_TOKEN_KEY).map(String::as_str), Some("token-123"));
        assert_eq!(headers.get(PLATFORM_KEY).map(String::as_str), Some("android"));
        assert_eq!(headers.get("Cookie").map(String::as_str), Some("session=abc"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_clear_logs_out() {
        let store = CredentialStore::new("agent/1.0");
        store.save_credentials(Some("t".to_string()), None, Some("c".to_string()));
        store.clear();

        assert!(!store.is_authenticated());
        assert_eq!(store.platform(), "web");
    }

    #[tokio::test]
    async fn test_provider_trait_returns_headers() {
        let store = CredentialStore::new("agent/1.0");
        store.save_credentials(None, None, Some("c=1".to_string()));

        let headers = store.auth_headers().await;
        assert_eq!(headers.get("Cookie").map(String::as_str), Some("c=1"));
    }
}
