//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /{alias}`      - Alias redirect (public)
//! - `GET    /health`       - Health check (public)
//! - `POST   /url`          - Save an alias (basic auth)
//! - `DELETE /url/{alias}`  - Delete an alias (basic auth)
//!
//! # Middleware
//!
//! - **Request id** - `x-request-id` assigned and echoed back
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Requests exceeding the configured budget get 408
//! - **Authentication** - Basic auth on `/url`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Router, middleware};
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::timeout::TimeoutLayer;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - upper bound on the time spent handling one request
pub fn app_router(state: AppState, request_timeout: Duration) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, request_timeout))
}

/// Routes and middleware without path normalization.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    let url_router = api::routes::protected_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), auth::layer),
    );

    Router::new()
        .route("/health", get(health_handler))
        .route("/{alias}", get(redirect_handler))
        .nest("/url", url_router)
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(tracing::propagate_request_id_layer())
        .layer(tracing::layer())
        .layer(tracing::set_request_id_layer())
}
