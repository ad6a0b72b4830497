//! Handler for alias redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its target URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// Returns 307 Temporary Redirect with the target in `Location`.
///
/// # Errors
///
/// Returns 404 Not Found if the alias is unknown, 500 on store failures.
#[tracing::instrument(name = "handlers.redirect", skip(state))]
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let url = state
        .alias_service
        .resolve(&alias)
        .await
        .inspect_err(|e| info!(error = %e, "Redirect failed"))?;

    info!(url = %url, "Got URL");

    Ok(Redirect::temporary(&url))
}
