//! Nivara Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::NivaraConfig;
use crate::state::AppState;

/// Assemble the application router with sessions, CORS, and tracing.
///
/// Sentry layers are added in `main` so tests can build the router without
/// a Sentry hub.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.pool(), state.config());
    let cors = cors_layer(state.config());

    Router::new()
        .merge(routes::health_routes())
        .nest("/api", routes::api_routes())
        .layer(session_layer)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the browser client: the configured origin only, with cookies.
fn cors_layer(config: &NivaraConfig) -> CorsLayer {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    if let Ok(origin) = config.base_url.parse::<HeaderValue>() {
        cors = cors.allow_origin(origin);
    } else {
        tracing::warn!(base_url = %config.base_url, "Base URL is not a valid CORS origin");
    }

    cors
}
