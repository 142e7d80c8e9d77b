pub mod modules;
pub mod shared;

use std::sync::Arc;

use modules::{
    auth::CredentialStore,
    browse::{DetailLoader, QueryController},
    catalog::{MovieDetailApi, MovieDetailService, MovieSearchApi, MovieSearchService},
    remote::{AuthenticationInterceptor, RemoteService, ReqwestTransport, Transport},
};
use shared::{ClientConfig, RemoteResult};

/// Wired client: one pipeline shared by the search and detail services.
pub struct Marquee {
    config: ClientConfig,
    credentials: Arc<CredentialStore>,
    search: Arc<MovieSearchService>,
    detail: Arc<MovieDetailService>,
}

impl Marquee {
    /// Build against the live service with a reqwest transport.
    pub fn new(config: ClientConfig) -> RemoteResult<Self> {
        let transport = ReqwestTransport::with_timeout(config.timeout())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let credentials = Arc::new(CredentialStore::new(config.user_agent.clone()));

        let remote = Arc::new(
            RemoteService::builder(transport)
                .request_interceptor(Arc::new(AuthenticationInterceptor::new(
                    credentials.clone(),
                )))
                .status_policy(config.status_policy)
                .build(),
        );

        let search = Arc::new(MovieSearchService::new(remote.clone(), &config));
        let detail = Arc::new(MovieDetailService::new(remote, &config));

        crate::log_info!(
            "Client initialized (status policy: {:?}, debounce: {}ms)",
            config.status_policy,
            config.debounce_ms
        );

        Self {
            config,
            credentials,
            search,
            detail,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    pub fn search_api(&self) -> Arc<dyn MovieSearchApi> {
        self.search.clone()
    }

    pub fn detail_api(&self) -> Arc<dyn MovieDetailApi> {
        self.detail.clone()
    }

    /// A fresh search session on tokio's clock.
    pub fn query_controller(&self) -> QueryController {
        QueryController::from_config(self.search_api(), &self.config)
    }

    pub fn detail_loader(&self) -> DetailLoader {
        DetailLoader::new(self.detail_api())
    }
}
