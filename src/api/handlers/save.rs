//! Handler for alias creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;
use tracing::{debug, info};
use validator::Validate;

use crate::api::dto::alias::{SaveRequest, SaveResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Binds a URL to an alias, generating the alias when none is given.
///
/// # Endpoint
///
/// `POST /url` (basic auth)
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "alias": "ex1" }
/// ```
///
/// # Response
///
/// ```json
/// { "status": "OK", "alias": "ex1" }
/// ```
///
/// # Errors
///
/// - 400 if the body cannot be decoded or a field is invalid
/// - 409 `URL already exists` if the alias is taken
/// - 500 on store failures
#[tracing::instrument(name = "handlers.url.save", skip_all)]
pub async fn save_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        info!(reason = %rejection.body_text(), "Failed to decode request body");
        AppError::bad_request(
            "Failed to decode request",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    debug!(?payload, "Request body decoded");

    payload.validate().inspect_err(|errors| {
        info!(%errors, "Invalid request");
    })?;

    let SaveRequest { url, alias } = payload;
    // `required` validation guarantees presence.
    let url = url.unwrap_or_default();

    let record = state
        .alias_service
        .save(url, alias)
        .await
        .inspect_err(|e| info!(error = %e, "URL not added"))?;

    info!(id = record.id, alias = %record.alias, "URL added");

    Ok(Json(SaveResponse::ok(record.alias)))
}
