//! DTOs for alias endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::response::ResponseStatus;

/// Request to bind a URL to an alias.
///
/// `alias` may be omitted or left blank, in which case one is generated.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveRequest {
    /// The URL to redirect to (must be a valid absolute URL).
    #[validate(required, url)]
    pub url: Option<String>,

    /// Optional alias chosen by the caller.
    #[serde(default)]
    pub alias: Option<String>,
}

/// Successful save.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub status: ResponseStatus,
    pub alias: String,
}

impl SaveResponse {
    pub fn ok(alias: String) -> Self {
        Self {
            status: ResponseStatus::Ok,
            alias,
        }
    }
}

/// Successful delete, echoing the URL the alias pointed to.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub status: ResponseStatus,
    pub alias: String,
    pub url: String,
}

impl DeleteResponse {
    pub fn ok(alias: String, url: String) -> Self {
        Self {
            status: ResponseStatus::Ok,
            alias,
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_request_alias_optional() {
        let req: SaveRequest = serde_json::from_str(r#"{"url":"https://example.com"}"#).unwrap();

        assert_eq!(req.url.as_deref(), Some("https://example.com"));
        assert!(req.alias.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_save_request_missing_url_fails_validation() {
        let req: SaveRequest = serde_json::from_str(r#"{"alias":"ex1"}"#).unwrap();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("url"));
    }

    #[test]
    fn test_save_response_shape() {
        let body = serde_json::to_value(SaveResponse::ok("ex1".to_string())).unwrap();

        assert_eq!(body, serde_json::json!({ "status": "OK", "alias": "ex1" }));
    }
}
