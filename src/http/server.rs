//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Put the bearer gate in front of protected routes
//! - Wire up middleware (tracing, limits, request ID, error responder)
//! - Serve on a listener until shutdown

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::error::{error_responder, ErrorResponder};
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestSpan};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::security::{self, require_bearer, AuthGate};
use crate::store::AddressStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AddressStore>,
    pub config: Arc<ServiceConfig>,
}

/// HTTP server for the address API.
pub struct HttpServer {
    router: Router,
    config: Arc<ServiceConfig>,
    store: Arc<AddressStore>,
}

impl HttpServer {
    /// Create a server backed by the seeded store.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_store(config, Arc::new(AddressStore::seeded()))
    }

    /// Create a server backed by the given store.
    pub fn with_store(config: ServiceConfig, store: Arc<AddressStore>) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            store: store.clone(),
            config: config.clone(),
        };
        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            store,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let gate = middleware::from_fn_with_state(
            AuthGate::new(config.auth.api_token.clone()),
            require_bearer,
        );
        let responder = ErrorResponder::new(config.environment);

        // A method router's `route_layer` only wraps the methods registered
        // before it, so gated methods come first.
        let router = Router::new()
            .route(
                "/",
                get(handlers::root_status)
                    .route_layer(gate.clone())
                    .post(handlers::root_post),
            )
            .route(
                "/address",
                post(handlers::create_address)
                    .route_layer(gate.clone())
                    .get(handlers::list_addresses),
            )
            .route(
                "/address/{id}",
                delete(handlers::delete_address).route_layer(gate),
            )
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(CatchPanicLayer::custom(
                move |panic: Box<dyn Any + Send + 'static>| responder.panic_response(panic),
            ))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::from_fn_with_state(responder, error_responder))
            .layer(middleware::from_fn(metrics::track_metrics))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(RequestSpan))
            .layer(set_request_id_layer());

        security::headers::apply(router, &config.security)
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            environment = %self.config.environment,
            records = self.store.len().unwrap_or_default(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Router with all layers applied (useful for testing).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn store(&self) -> Arc<AddressStore> {
        self.store.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
