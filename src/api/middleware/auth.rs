//! Basic authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBasic;
use subtle::ConstantTimeEq;

use crate::state::Credentials;
use crate::{error::AppError, state::AppState};

/// Authenticates requests using HTTP basic auth.
///
/// # Header Format
///
/// ```text
/// Authorization: Basic base64(user:password)
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` with a `WWW-Authenticate: Basic` challenge if:
/// - Authorization header is missing or malformed
/// - Credentials do not match the configured user and password
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::post, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/url", post(save_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBasic((user, password)) = AuthBasic::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    if !credentials_match(&st.credentials, &user, password.as_deref().unwrap_or_default()) {
        tracing::info!(user = %user, "Rejected credentials");
        return Err(AppError::unauthorized(
            "Unauthorized",
            serde_json::json!({"reason": "Invalid credentials"}),
        ));
    }

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}

/// Compares both fields in constant time.
fn credentials_match(expected: &Credentials, user: &str, password: &str) -> bool {
    let user_ok = expected.user.as_bytes().ct_eq(user.as_bytes());
    let password_ok = expected.password.as_bytes().ct_eq(password.as_bytes());

    bool::from(user_ok & password_ok)
}
