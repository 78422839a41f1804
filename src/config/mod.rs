//! Configuration types for the Shopgoodwill client.
//!
//! # Overview
//!
//! - [`ShopgoodwillConfig`]: Every site-specific value the client sends
//! - [`ShopgoodwillConfigBuilder`]: A builder for constructing [`ShopgoodwillConfig`] instances
//! - [`ApiRoot`]: The validated root URL API paths are resolved against
//! - [`SiteUrl`]: A validated absolute URL on the public site
//!
//! The defaults reproduce what the shopgoodwill.com web front end sends, so
//! most callers never touch the builder. Tests point `api_root` and
//! `login_page_url` at a local mock server.
//!
//! # Example
//!
//! ```rust
//! use shopgoodwill_api::{ApiRoot, ShopgoodwillConfig};
//!
//! let config = ShopgoodwillConfig::builder()
//!     .api_root(ApiRoot::new("http://127.0.0.1:9000/api").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_root().as_ref(), "http://127.0.0.1:9000/api");
//! assert_eq!(config.browser(), "firefox");
//! ```

mod newtypes;

pub use newtypes::{ApiRoot, SiteUrl};

use crate::error::ConfigError;

/// Root of the buyer API.
pub const DEFAULT_API_ROOT: &str = "https://buyerapi.shopgoodwill.com/api";

/// Sign-in page requested before each login as an availability check.
pub const DEFAULT_LOGIN_PAGE_URL: &str = "https://shopgoodwill.com/signin";

/// Value of the `Origin` header on every request.
pub const DEFAULT_ORIGIN: &str = "https://shopgoodwill.com";

/// Value of the `User-Agent` header on every request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:12.0) Gecko/20100101 Firefox/12.0";

/// Browser identity sent in the login envelope.
pub const DEFAULT_BROWSER: &str = "firefox";

/// Client IP address sent in the login envelope. The site does not check it.
pub const DEFAULT_CLIENT_IP_ADDRESS: &str = "0.0.0.4";

/// Front-end build token sent in the login envelope.
pub const DEFAULT_APP_VERSION: &str = "00099a1be3bb023ff17d";

/// Configuration for the Shopgoodwill client.
///
/// # Thread Safety
///
/// `ShopgoodwillConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ShopgoodwillConfig {
    api_root: ApiRoot,
    login_page_url: SiteUrl,
    origin: SiteUrl,
    user_agent: String,
    browser: String,
    client_ip_address: String,
    app_version: String,
}

impl ShopgoodwillConfig {
    /// Creates a new builder for constructing a `ShopgoodwillConfig`.
    #[must_use]
    pub fn builder() -> ShopgoodwillConfigBuilder {
        ShopgoodwillConfigBuilder::new()
    }

    /// Returns the API root.
    #[must_use]
    pub const fn api_root(&self) -> &ApiRoot {
        &self.api_root
    }

    /// Returns the sign-in page URL.
    #[must_use]
    pub const fn login_page_url(&self) -> &SiteUrl {
        &self.login_page_url
    }

    /// Returns the `Origin` header value.
    #[must_use]
    pub const fn origin(&self) -> &SiteUrl {
        &self.origin
    }

    /// Returns the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the browser identity sent at login.
    #[must_use]
    pub fn browser(&self) -> &str {
        &self.browser
    }

    /// Returns the client IP address sent at login.
    #[must_use]
    pub fn client_ip_address(&self) -> &str {
        &self.client_ip_address
    }

    /// Returns the app-version token sent at login.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for ShopgoodwillConfig {
    fn default() -> Self {
        Self {
            api_root: ApiRoot::from_static(DEFAULT_API_ROOT),
            login_page_url: SiteUrl::from_static(DEFAULT_LOGIN_PAGE_URL),
            origin: SiteUrl::from_static(DEFAULT_ORIGIN),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            browser: DEFAULT_BROWSER.to_string(),
            client_ip_address: DEFAULT_CLIENT_IP_ADDRESS.to_string(),
            app_version: DEFAULT_APP_VERSION.to_string(),
        }
    }
}

// Verify ShopgoodwillConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ShopgoodwillConfig>();
};

/// Builder for constructing [`ShopgoodwillConfig`] instances.
///
/// Every field is optional; unset fields take the `DEFAULT_*` values of
/// this module.
///
/// # Example
///
/// ```rust
/// use shopgoodwill_api::{ShopgoodwillConfig, SiteUrl};
///
/// let config = ShopgoodwillConfig::builder()
///     .login_page_url(SiteUrl::new("http://127.0.0.1:9000/signin").unwrap())
///     .user_agent("MyTool/1.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.user_agent(), "MyTool/1.0");
/// ```
#[derive(Debug, Default)]
pub struct ShopgoodwillConfigBuilder {
    api_root: Option<ApiRoot>,
    login_page_url: Option<SiteUrl>,
    origin: Option<SiteUrl>,
    user_agent: Option<String>,
    browser: Option<String>,
    client_ip_address: Option<String>,
    app_version: Option<String>,
}

impl ShopgoodwillConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API root.
    #[must_use]
    pub fn api_root(mut self, root: ApiRoot) -> Self {
        self.api_root = Some(root);
        self
    }

    /// Sets the sign-in page URL.
    #[must_use]
    pub fn login_page_url(mut self, url: SiteUrl) -> Self {
        self.login_page_url = Some(url);
        self
    }

    /// Sets the `Origin` header value.
    #[must_use]
    pub fn origin(mut self, origin: SiteUrl) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Sets the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the browser identity sent at login.
    #[must_use]
    pub fn browser(mut self, browser: impl Into<String>) -> Self {
        self.browser = Some(browser.into());
        self
    }

    /// Sets the client IP address sent at login.
    #[must_use]
    pub fn client_ip_address(mut self, address: impl Into<String>) -> Self {
        self.client_ip_address = Some(address.into());
        self
    }

    /// Sets the app-version token sent at login.
    #[must_use]
    pub fn app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = Some(version.into());
        self
    }

    /// Builds the [`ShopgoodwillConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyValue`] if a string setting was set to an
    /// empty or whitespace-only value.
    pub fn build(self) -> Result<ShopgoodwillConfig, ConfigError> {
        let defaults = ShopgoodwillConfig::default();

        Ok(ShopgoodwillConfig {
            api_root: self.api_root.unwrap_or(defaults.api_root),
            login_page_url: self.login_page_url.unwrap_or(defaults.login_page_url),
            origin: self.origin.unwrap_or(defaults.origin),
            user_agent: non_empty("user_agent", self.user_agent, defaults.user_agent)?,
            browser: non_empty("browser", self.browser, defaults.browser)?,
            client_ip_address: non_empty(
                "client_ip_address",
                self.client_ip_address,
                defaults.client_ip_address,
            )?,
            app_version: non_empty("app_version", self.app_version, defaults.app_version)?,
        })
    }
}

fn non_empty(
    field: &'static str,
    value: Option<String>,
    default: String,
) -> Result<String, ConfigError> {
    match value {
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyValue { field }),
        Some(value) => Ok(value),
        None => Ok(default),
    }
}
