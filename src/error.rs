//! Error types for client configuration.
//!
//! Configuration constructors return `Result<T, ConfigError>` so that a bad
//! URL or an empty header value is rejected before any request is built.
//!
//! # Example
//!
//! ```rust
//! use shopgoodwill_api::{ApiRoot, ConfigError};
//!
//! let result = ApiRoot::new("buyerapi.shopgoodwill.com");
//! assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`ShopgoodwillConfig`](crate::ShopgoodwillConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A URL setting is malformed.
    #[error("Invalid URL '{url}' for {field}. Expected an absolute http(s) URL (e.g., 'https://buyerapi.shopgoodwill.com/api').")]
    InvalidUrl {
        /// The setting that was being configured.
        field: &'static str,
        /// The invalid URL that was provided.
        url: String,
    },

    /// A setting that is sent verbatim to the site was empty.
    #[error("'{field}' cannot be empty.")]
    EmptyValue {
        /// The name of the empty setting.
        field: &'static str,
    },
}
