//! HTTP transport for the Shopgoodwill buyer API.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async transport; resolves paths against the API root
//!   and attaches the caller's session headers
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response, returned for every status code
//! - [`HttpMethod`]: GET or POST
//! - [`HttpError`]: Transport, validation and rejected-status errors
//!
//! The transport has no retry, timeout or redirect policy of its own beyond
//! reqwest's defaults.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::HttpClient;
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
