use std::future::Future;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::config::settings::SettingsConfig;
use crate::gate::middleware::protect;
use crate::introspection::client::IntrospectionClient;
use crate::observability::metrics::{get_metrics, Metrics};
use crate::observability::routes::MetricsState;

#[derive(Clone)]
pub struct AppState {
    pub metrics_state: MetricsState,
}

impl AppState {
    pub fn new(metrics: &Metrics) -> Self {
        Self {
            metrics_state: MetricsState::new(metrics.registry.clone()),
        }
    }
}

/// Gated `/` plus the public metrics route.
pub fn router(settings_config: &SettingsConfig, metrics: &Metrics, introspection: IntrospectionClient) -> Router {
    let state = AppState::new(metrics);
    let protected = protect(Router::new().route("/", get(index)), introspection);

    Router::new()
        .merge(protected)
        .merge(state.metrics_state.router(&settings_config.metrics))
        .with_state(state)
}

async fn index() -> Json<&'static str> {
    Json("ok")
}

/// Serve until `shutdown` resolves.
pub async fn start<F>(
    settings_config: &SettingsConfig,
    introspection: IntrospectionClient,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics = get_metrics().await;
    let app = router(settings_config, metrics, introspection);

    let bind_addr = format!("{}:{}", settings_config.server.host, settings_config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("listening on {}", bind_addr);

    metrics.up.set(1);
    let served = axum::serve(listener, app).with_graceful_shutdown(shutdown).await;
    metrics.up.set(0);
    served.context("http server failed")
}
