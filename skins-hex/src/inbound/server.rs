//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::auth::auth_middleware;
use super::handlers::{self, AppState};
use crate::openapi::ApiDoc;
use crate::{PurchaseService, SkinService, StoreRepository};

/// HTTP Server for the skin store API.
pub struct HttpServer<R: StoreRepository> {
    state: Arc<AppState<R>>,
}

impl<R: StoreRepository> HttpServer<R> {
    /// Creates a new HTTP server over the given services.
    pub fn new(purchases: PurchaseService<R>, skins: SkinService<R>) -> Self {
        Self {
            state: Arc::new(AppState { purchases, skins }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        let authenticated = Router::new()
            .route("/api/purchases", post(handlers::buy_skin::<R>))
            .route("/api/purchases/history", get(handlers::purchase_history::<R>))
            .route("/api/purchases/{id}", get(handlers::get_purchase::<R>))
            .route_layer(middleware::from_fn(auth_middleware));

        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/skins", get(handlers::list_skins::<R>))
            .route("/api/skins/{id}", get(handlers::get_skin::<R>))
            .merge(authenticated)
            .with_state(self.state.clone())
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
