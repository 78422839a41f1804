//! HTTP-specific error types for the Shopgoodwill client.
//!
//! - [`HttpResponseError`]: A non-2xx response a caller chose to reject
//! - [`InvalidHttpRequestError`]: A request that failed validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! The transport itself never rejects a response by status. Status codes are
//! interpreted by the layer that issued the request, which converts them with
//! [`HttpResponseError::from_response`] when they are not acceptable.

use thiserror::Error;

use crate::clients::http_response::HttpResponse;

/// Error returned when a request receives a non-successful response.
///
/// The message field contains a compact JSON object with whatever the site
/// reported: the envelope `message`, the raw body of a non-JSON server error,
/// and whether the site flagged the request as unauthorized.
///
/// # Example
///
/// ```rust
/// use shopgoodwill_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 500,
///     message: r#"{"message":"Server error"}"#.to_string(),
/// };
///
/// assert_eq!(error.to_string(), r#"HTTP 500: {"message":"Server error"}"#);
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message in JSON format.
    pub message: String,
}

impl HttpResponseError {
    /// Builds an error from a rejected response.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let mut error_body = serde_json::Map::new();

        for key in ["message", "isUnauthorized", "raw_body"] {
            if let Some(value) = response.body.get(key) {
                if !value.is_null() {
                    error_body.insert(key.to_string(), value.clone());
                }
            }
        }

        Self {
            code: response.code,
            message: serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string()),
        }
    }
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A body was attached to a method that does not carry one.
    #[error("Cannot send a body with {method}.")]
    BodyNotAllowed {
        /// The HTTP method that was used.
        method: String,
    },

    /// The request path was empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,
}

/// Unified error type for all HTTP-related errors.
///
/// # Example
///
/// ```rust,ignore
/// use shopgoodwill_api::HttpError;
///
/// match client.get("/Favorite/AddToFavorite", &headers).await {
///     Ok(response) => { /* inspect response.code */ }
///     Err(HttpError::Response(e)) => { /* rejected by status */ }
///     Err(HttpError::InvalidRequest(e)) => { /* handle validation error */ }
///     Err(HttpError::Network(e)) => { /* handle network error */ }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// A response with an unacceptable status code.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_from_response_keeps_envelope_message() {
        let response = HttpResponse::new(
            400,
            HashMap::new(),
            json!({"message": "Item not available", "status": false, "data": null}),
        );

        let error = HttpResponseError::from_response(&response);

        assert_eq!(error.code, 400);
        assert_eq!(error.message, r#"{"message":"Item not available"}"#);
    }

    #[test]
    fn test_from_response_keeps_raw_body_of_server_errors() {
        let response = HttpResponse::new(
            502,
            HashMap::new(),
            json!({"raw_body": "<html>Bad Gateway</html>"}),
        );

        let error = HttpResponseError::from_response(&response);
        assert!(error.to_string().starts_with("HTTP 502: "));
        assert!(error.message.contains("Bad Gateway"));
    }

    #[test]
    fn test_from_response_with_empty_body() {
        let response = HttpResponse::new(403, HashMap::new(), json!({}));
        let error = HttpResponseError::from_response(&response);
        assert_eq!(error.message, "{}");
    }

    #[test]
    fn test_invalid_request_error_messages() {
        let error = InvalidHttpRequestError::BodyNotAllowed {
            method: "get".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot send a body with get.");
        assert_eq!(
            InvalidHttpRequestError::EmptyPath.to_string(),
            "Request path cannot be empty."
        );
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let response_error: &dyn std::error::Error = &HttpResponseError {
            code: 400,
            message: "test".to_string(),
        };
        let _ = response_error;

        let invalid_error: &dyn std::error::Error = &InvalidHttpRequestError::EmptyPath;
        let _ = invalid_error;
    }
}
