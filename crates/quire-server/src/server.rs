use std::net::SocketAddr;
use std::sync::Arc;

use quire_gateway::{AuthProvider, Gateway, NoAuth, StaticTokenAuth};
use quire_store::{FsStore, VersionedStore};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// quire document server.
pub struct QuireServer {
    config: ServerConfig,
}

impl QuireServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Authentication provider selected by the configured token table.
    pub fn auth(&self) -> Arc<dyn AuthProvider> {
        if self.config.tokens.is_empty() {
            Arc::new(NoAuth)
        } else {
            Arc::new(StaticTokenAuth::new(self.config.tokens.clone()))
        }
    }

    /// Open the file store under the configured root and wire up the gateway.
    pub fn state(&self) -> ServerResult<AppState> {
        let store = FsStore::open(&self.config.gateway.storage_root)?;
        Ok(self.state_with_store(Arc::new(store)))
    }

    /// Wire up the gateway over an already opened store.
    pub fn state_with_store(&self, store: Arc<dyn VersionedStore>) -> AppState {
        let gateway = Gateway::new(self.config.gateway.clone(), store, self.auth());
        AppState::new(gateway).trust_forwarded_for(self.config.trust_forwarded_for)
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        Ok(build_router(self.state()?, self.config.max_body_size))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router()?;
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            root = %self.config.gateway.storage_root.display(),
            "quire server listening"
        );
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
