//! HTTP response types for the Shopgoodwill client.
//!
//! The buyer API wraps almost every payload in the same envelope:
//!
//! ```json
//! {"message": "", "status": true, "isUnauthorized": false, "data": [...]}
//! ```
//!
//! [`HttpResponse`] keeps the parsed body as raw JSON and offers accessors
//! for the envelope fields; typed decoding happens in the layer that knows
//! what `data` holds.

use std::collections::HashMap;

/// An HTTP response from the buyer API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lower-cased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body. Empty bodies parse as `{}`.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` for a 401 response.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.code == 401
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the envelope's `data` field, if present and not null.
    #[must_use]
    pub fn data(&self) -> Option<&serde_json::Value> {
        self.body.get("data").filter(|value| !value.is_null())
    }

    /// Returns the envelope's `message` field, if it is a non-empty string.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .filter(|message| !message.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_for_2xx_status_codes() {
        for code in [200, 201, 204, 299] {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(response.is_ok(), "Expected {code} to be ok");
        }
        for code in [199, 301, 401, 500] {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(!response.is_ok(), "Expected {code} not to be ok");
        }
    }

    #[test]
    fn test_is_unauthorized_only_for_401() {
        assert!(HttpResponse::new(401, HashMap::new(), json!({})).is_unauthorized());
        assert!(!HttpResponse::new(403, HashMap::new(), json!({})).is_unauthorized());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            vec!["application/json; charset=utf-8".to_string()],
        );
        let response = HttpResponse::new(200, headers, json!({}));

        assert_eq!(
            response.header("Content-Type"),
            Some("application/json; charset=utf-8")
        );
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_data_ignores_null() {
        let response = HttpResponse::new(200, HashMap::new(), json!({"data": null}));
        assert!(response.data().is_none());

        let response = HttpResponse::new(200, HashMap::new(), json!({"data": [1, 2]}));
        assert_eq!(response.data(), Some(&json!([1, 2])));
    }

    #[test]
    fn test_message_ignores_empty_string() {
        let response = HttpResponse::new(200, HashMap::new(), json!({"message": ""}));
        assert!(response.message().is_none());

        let response = HttpResponse::new(400, HashMap::new(), json!({"message": "Bad item"}));
        assert_eq!(response.message(), Some("Bad item"));
    }
}
