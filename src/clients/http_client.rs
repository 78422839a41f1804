//! HTTP transport for the buyer API.
//!
//! This module provides the [`HttpClient`] type. It resolves request paths
//! against the configured API root and attaches the caller's session headers
//! to every request. It does not interpret status codes, retry, or time out.

use std::collections::HashMap;

use crate::auth::SessionHeaders;
use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiRoot, ShopgoodwillConfig};

/// HTTP client for making requests to the buyer API.
///
/// The client owns no session state. Headers are borrowed from the caller's
/// [`SessionHeaders`] on each call, so a header change made between two
/// calls is visible to the second one.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`.
///
/// # Example
///
/// ```rust,ignore
/// use shopgoodwill_api::clients::HttpClient;
/// use shopgoodwill_api::auth::SessionHeaders;
/// use shopgoodwill_api::ShopgoodwillConfig;
///
/// let config = ShopgoodwillConfig::default();
/// let client = HttpClient::new(&config)?;
/// let headers = SessionHeaders::new(&config);
///
/// let response = client.post("/SaveSearches/GetSaveSearches", None, &headers).await?;
/// println!("{}", response.code);
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Root every relative path is resolved against.
    api_root: ApiRoot,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the configured API root.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &ShopgoodwillConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            api_root: config.api_root().clone(),
        })
    }

    /// Returns the API root for this client.
    #[must_use]
    pub const fn api_root(&self) -> &ApiRoot {
        &self.api_root
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn get(
        &self,
        path: &str,
        headers: &SessionHeaders,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, path).build()?;
        self.request(&request, headers).await
    }

    /// Sends a POST request, with no body unless one is given.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn post(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
        headers: &SessionHeaders,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, path)
            .maybe_body(body)
            .build()?;
        self.request(&request, headers).await
    }

    /// Sends a request with the given session headers.
    ///
    /// Responses are returned for every status code.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error occurs (`Network`)
    pub async fn request(
        &self,
        request: &HttpRequest,
        headers: &SessionHeaders,
    ) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.api_root.join(&request.path);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };

        for (key, value) in headers.iter() {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(
            method = %request.http_method,
            url = %url,
            authorized = headers.is_authorized(),
            "Sending request to Shopgoodwill"
        );

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await.unwrap_or_default();

        let body = if body_text.trim().is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&body_text).unwrap_or_else(|_| {
                // Keep the raw body of server errors for diagnostics
                if code >= 500 {
                    serde_json::json!({ "raw_body": body_text })
                } else {
                    serde_json::json!({})
                }
            })
        };

        tracing::debug!(status = code, url = %url, "Received response from Shopgoodwill");

        Ok(HttpResponse::new(code, res_headers, body))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
