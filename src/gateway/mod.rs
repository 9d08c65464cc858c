//! HTTP gateway: router assembly and the serve loop.

pub mod handlers;
pub mod state;
pub mod types;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use state::AppState;

/// Cross-origin access is restricted to the configured allow-list; origins
/// that fail to parse as header values are skipped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn build_router(state: Arc<AppState>, config: &AppConfig) -> Router {
    Router::new()
        .route("/", get(handlers::welcome))
        // Orders
        .route("/orders", get(handlers::list_orders))
        .route("/order_by_id/{id}", get(handlers::get_order))
        .route("/create_order", post(handlers::create_order))
        .route("/update_order/{id}", put(handlers::update_order))
        .route("/delete_order", delete(handlers::delete_order))
        .route("/search_orders", get(handlers::search_orders))
        // Services
        .route("/get_services", get(handlers::list_services))
        .route("/service_by_id/{id}", get(handlers::get_service))
        .route("/create_service", post(handlers::create_service))
        .with_state(state)
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped.
pub async fn run_server(config: &AppConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state, config);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("gateway listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
