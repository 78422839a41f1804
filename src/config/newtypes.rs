//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around URL strings that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// Splits an absolute URL into its scheme and host, rejecting anything else.
///
/// Returns the byte offsets `(scheme_end, host_start, host_end)`.
fn parse_absolute_url(url: &str) -> Option<(usize, usize, usize)> {
    let scheme_end = url.find("://")?;

    let scheme = &url[..scheme_end];
    if !matches!(scheme, "http" | "https") {
        return None;
    }

    let host_start = scheme_end + 3;
    if host_start >= url.len() {
        return None;
    }

    // Host ends at port, path, query, or end of string
    let remainder = &url[host_start..];
    let host_end = remainder
        .find([':', '/', '?', '#'])
        .map_or(url.len(), |i| host_start + i);

    let host = &url[host_start..host_end];
    if host.is_empty() || host.contains(char::is_whitespace) {
        return None;
    }

    Some((scheme_end, host_start, host_end))
}

/// The root URL every API path is resolved against.
///
/// Trailing slashes are stripped so that paths such as `/SignIn/Login` can be
/// appended directly.
///
/// # Example
///
/// ```rust
/// use shopgoodwill_api::ApiRoot;
///
/// let root = ApiRoot::new("https://buyerapi.shopgoodwill.com/api/").unwrap();
/// assert_eq!(root.as_ref(), "https://buyerapi.shopgoodwill.com/api");
/// assert_eq!(root.host_name(), "buyerapi.shopgoodwill.com");
/// assert_eq!(root.join("/SignIn/Login"), "https://buyerapi.shopgoodwill.com/api/SignIn/Login");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRoot {
    url: String,
}

impl ApiRoot {
    /// Creates a new validated API root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the value is not an absolute
    /// `http` or `https` URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        if parse_absolute_url(&url).is_none() {
            return Err(ConfigError::InvalidUrl {
                field: "api_root",
                url,
            });
        }

        Ok(Self { url })
    }

    /// Wraps one of the built-in default URLs.
    pub(super) fn from_static(url: &'static str) -> Self {
        Self {
            url: url.to_string(),
        }
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        parse_absolute_url(&self.url).map_or("", |(_, start, end)| &self.url[start..end])
    }

    /// Resolves an API path against this root.
    ///
    /// Absolute `http(s)://` paths are returned unchanged; relative paths get
    /// a leading `/` if they lack one.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.url)
        } else {
            format!("{}/{path}", self.url)
        }
    }
}

impl AsRef<str> for ApiRoot {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ApiRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// An absolute URL on the public site, such as the `Origin` header value or
/// the sign-in page.
///
/// # Example
///
/// ```rust
/// use shopgoodwill_api::SiteUrl;
///
/// let origin = SiteUrl::new("https://shopgoodwill.com").unwrap();
/// assert_eq!(origin.scheme(), "https");
/// assert!(SiteUrl::new("shopgoodwill.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteUrl {
    url: String,
}

impl SiteUrl {
    /// Creates a new validated site URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the value is not an absolute
    /// `http` or `https` URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().to_string();

        if parse_absolute_url(&url).is_none() {
            return Err(ConfigError::InvalidUrl {
                field: "site_url",
                url,
            });
        }

        Ok(Self { url })
    }

    /// Wraps one of the built-in default URLs.
    pub(super) fn from_static(url: &'static str) -> Self {
        Self {
            url: url.to_string(),
        }
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        parse_absolute_url(&self.url).map_or("", |(end, _, _)| &self.url[..end])
    }
}

impl AsRef<str> for SiteUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
