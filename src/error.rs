//! HTTP-facing error type.
//!
//! Every failure that reaches a handler is one of the [`AppError`] variants,
//! rendered as
//!
//! ```json
//! { "status": "Error", "error": "URL already exists", "code": "conflict", "details": {} }
//! ```

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::api::dto::response::ResponseStatus;

/// Realm announced in `WWW-Authenticate` challenges.
pub const AUTH_REALM: &str = "url-shortener";

#[derive(Serialize)]
struct ErrorBody {
    status: ResponseStatus,
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Value::is_null")]
    details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error is rendered with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Unauthorized { message, details } => ("unauthorized", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        let body = ErrorBody {
            status: ResponseStatus::Error,
            error: message,
            code,
            details,
        };

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED
            && let Ok(challenge) = HeaderValue::from_str(&format!("Basic realm=\"{AUTH_REALM}\""))
        {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, challenge);
        }

        response
    }
}

/// Renders field-level validation failures.
///
/// The message lists every failing field (`field url is not a valid URL, ...`)
/// and `details` maps each field to its individual messages.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<(String, Vec<String>)> = errors
            .errors()
            .iter()
            .filter_map(|(field, kind)| match kind {
                ValidationErrorsKind::Field(errs) => Some((
                    field.to_string(),
                    errs.iter().map(|e| describe(field, e)).collect(),
                )),
                _ => None,
            })
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .iter()
            .flat_map(|(_, messages)| messages.iter().cloned())
            .collect::<Vec<_>>()
            .join(", ");

        let details: Map<String, Value> = fields
            .into_iter()
            .map(|(field, messages)| (field, json!(messages)))
            .collect();

        AppError::bad_request(message, Value::Object(details))
    }
}

fn describe(field: &str, error: &validator::ValidationError) -> String {
    if let Some(message) = &error.message {
        return format!("field {field} {message}");
    }

    match error.code.as_ref() {
        "required" => format!("field {field} is a required field"),
        "url" => format!("field {field} is not a valid URL"),
        _ => format!("field {field} is not valid"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(required, url)]
        url: Option<String>,
    }

    #[test]
    fn test_missing_field_message() {
        let errors = Probe { url: None }.validate().unwrap_err();
        let err = AppError::from(errors);

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "field url is a required field");
    }

    #[test]
    fn test_invalid_url_message() {
        let errors = Probe {
            url: Some("not-a-url".to_string()),
        }
        .validate()
        .unwrap_err();

        let err = AppError::from(errors);
        assert_eq!(err.to_string(), "field url is not a valid URL");

        let AppError::Validation { details, .. } = err else {
            panic!("expected validation error");
        };
        assert_eq!(details["url"][0], "field url is not a valid URL");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::conflict("x", Value::Null).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::not_found("x", Value::Null).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::internal("x", Value::Null).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthorized_sets_challenge() {
        let response = AppError::unauthorized("Unauthorized", Value::Null).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::WWW_AUTHENTICATE],
            "Basic realm=\"url-shortener\""
        );
    }
}
