//! Handler for alias removal.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::info;

use crate::api::dto::alias::DeleteResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes an alias and returns the URL it pointed to.
///
/// # Endpoint
///
/// `DELETE /url/{alias}` (basic auth)
///
/// # Response
///
/// ```json
/// { "status": "OK", "alias": "ex1", "url": "https://example.com" }
/// ```
///
/// # Errors
///
/// Returns 404 `Not found` if the alias is unknown, 500 on store failures.
#[tracing::instrument(name = "handlers.url.delete", skip(state))]
pub async fn delete_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    let url = state
        .alias_service
        .delete(&alias)
        .await
        .inspect_err(|e| info!(error = %e, "Delete failed"))?;

    info!(url = %url, "URL deleted");

    Ok(Json(DeleteResponse::ok(alias, url)))
}
