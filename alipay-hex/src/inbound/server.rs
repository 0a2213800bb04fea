//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use alipay_types::{BillingHooks, ProviderClient, SettingsStore};

use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::AlipayGateway;

/// HTTP Server for the gateway's provider-facing routes.
pub struct HttpServer<P, S, B>
where
    P: ProviderClient,
    S: SettingsStore,
    B: BillingHooks,
{
    state: Arc<AppState<P, S, B>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<P, S, B> HttpServer<P, S, B>
where
    P: ProviderClient,
    S: SettingsStore,
    B: BillingHooks,
{
    /// Creates a new HTTP server with the given gateway service.
    pub fn new(gateway: AlipayGateway<P, S, B>) -> Self {
        Self {
            state: Arc::new(AppState { gateway }),
            rate_limiter: Arc::new(RateLimiterState::default()), // 100 req/min default
        }
    }

    /// Creates a new HTTP server with custom rate limiting.
    pub fn with_rate_limit(gateway: AlipayGateway<P, S, B>, requests_per_minute: u32) -> Self {
        use std::time::Duration;
        Self {
            state: Arc::new(AppState { gateway }),
            rate_limiter: Arc::new(RateLimiterState::new(
                requests_per_minute,
                Duration::from_secs(60),
            )),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health))
            .route("/alipay/checkout", post(handlers::checkout::<P, S, B>))
            .route("/alipay/webhook", post(handlers::webhook::<P, S, B>))
            .route("/alipay/redirect", get(handlers::redirect::<P, S, B>))
            .route("/alipay/config", get(handlers::config))
            .layer(metrics)
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
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
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
