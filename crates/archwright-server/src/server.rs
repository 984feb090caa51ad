//! Server implementation.

use std::sync::Arc;

use archwright_core::ServerConfig;
use archwright_pipeline::RecommendationPipeline;
use tokio::net::TcpListener;

use crate::error::ApiError;
use crate::routes;
use crate::state::AppState;

/// The HTTP API server.
pub struct ArchwrightServer {
    config: ServerConfig,
    state: AppState,
}

impl ArchwrightServer {
    pub fn new(config: ServerConfig, pipeline: Arc<RecommendationPipeline>) -> Self {
        Self {
            config,
            state: AppState::new(pipeline),
        }
    }

    /// Serve until Ctrl-C.
    pub async fn run(&self) -> Result<(), ApiError> {
        let addr = self.config.bind_addr();
        let app = routes::create_router(self.state.clone(), self.config.static_dir.as_deref());

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ApiError::StartupFailed(format!("failed to bind to {addr}: {e}")))?;

        tracing::info!(
            address = %addr,
            static_dir = ?self.config.static_dir,
            "Archwright API listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ApiError::StartupFailed(e.to_string()))?;

        tracing::info!("Archwright API stopped");
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        self.config.bind_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archwright_pipeline::testing::{FakeCatalog, ScriptedGenerator};

    #[test]
    fn server_uses_configured_address() {
        let pipeline = RecommendationPipeline::new(
            Arc::new(ScriptedGenerator::replying("")),
            Arc::new(FakeCatalog::new()),
        );
        let config = ServerConfig {
            port: 8088,
            ..ServerConfig::default()
        };
        let server = ArchwrightServer::new(config, Arc::new(pipeline));
        assert_eq!(server.bind_addr(), "127.0.0.1:8088");
    }
}
