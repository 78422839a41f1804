//! Per-client session state.
//!
//! [`SessionHeaders`] is the single header mapping every request carries.
//! [`SessionState`] pairs it with the credential record and the current
//! [`AuthState`]. Only the authenticator mutates either; everything else
//! reads them through shared references.

use std::collections::HashMap;
use std::fmt;

use crate::auth::{AuthInfo, AuthState};
use crate::config::ShopgoodwillConfig;

/// Name of the bearer authorization header.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

const BEARER_PREFIX: &str = "Bearer ";

/// The headers sent with every request.
///
/// Always contains `Content-Type`, `Origin` and `User-Agent`; contains
/// `Authorization: Bearer <token>` only while a session is authenticated.
///
/// # Security
///
/// The `Debug` implementation masks the authorization value.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionHeaders {
    headers: HashMap<String, String>,
}

impl SessionHeaders {
    /// Creates the unauthenticated header set for a configuration.
    #[must_use]
    pub fn new(config: &ShopgoodwillConfig) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Origin".to_string(), config.origin().to_string());
        headers.insert("User-Agent".to_string(), config.user_agent().to_string());
        Self { headers }
    }

    /// Returns a header value by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Iterates over all header names and values.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.headers.iter()
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns `true` if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns the `Authorization` header value, if present.
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.get(AUTHORIZATION_HEADER)
    }

    /// Returns `true` if a non-empty `Authorization` header is present.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.authorization().is_some_and(|value| !value.is_empty())
    }

    /// Returns the token carried by the `Authorization` header.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.authorization()
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
    }

    pub(crate) fn set_bearer(&mut self, token: &str) {
        self.headers.insert(
            AUTHORIZATION_HEADER.to_string(),
            format!("{BEARER_PREFIX}{token}"),
        );
    }

    pub(crate) fn clear_authorization(&mut self) {
        self.headers.remove(AUTHORIZATION_HEADER);
    }
}

impl fmt::Debug for SessionHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.headers {
            if key == AUTHORIZATION_HEADER {
                map.entry(key, &"Bearer *****");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

/// Mutable authentication state owned by one client.
///
/// # Example
///
/// ```rust
/// use shopgoodwill_api::{AuthInfo, AuthState, SessionState, ShopgoodwillConfig};
///
/// let session = SessionState::new(AuthInfo::from_token("T1"), &ShopgoodwillConfig::default());
///
/// assert_eq!(session.state(), AuthState::Unauthenticated);
/// assert!(!session.is_authenticated());
/// assert_eq!(session.headers().get("Content-Type"), Some("application/json"));
/// ```
#[derive(Clone, Debug)]
pub struct SessionState {
    headers: SessionHeaders,
    auth_info: AuthInfo,
    state: AuthState,
}

// Verify SessionState is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionState>();
};

impl SessionState {
    /// Creates an unauthenticated session for the given credentials.
    #[must_use]
    pub fn new(auth_info: AuthInfo, config: &ShopgoodwillConfig) -> Self {
        Self {
            headers: SessionHeaders::new(config),
            auth_info,
            state: AuthState::Unauthenticated,
        }
    }

    /// Returns the headers every request carries.
    #[must_use]
    pub const fn headers(&self) -> &SessionHeaders {
        &self.headers
    }

    /// Returns the credential record.
    #[must_use]
    pub const fn auth_info(&self) -> &AuthInfo {
        &self.auth_info
    }

    /// Returns where the authentication state machine last stopped.
    #[must_use]
    pub const fn state(&self) -> AuthState {
        self.state
    }

    /// Returns `true` if requests currently carry an authorization header.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.headers.is_authorized()
    }

    /// Returns the access token requests are currently sent with.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.headers.bearer_token()
    }

    pub(crate) fn set_bearer(&mut self, token: &str) {
        self.headers.set_bearer(token);
    }

    /// Adopts a token obtained by login, for requests and for later re-runs.
    pub(crate) fn adopt_login_token(&mut self, token: &str) {
        self.auth_info.replace_access_token(token);
        self.headers.set_bearer(token);
    }

    pub(crate) fn clear_authorization(&mut self) {
        self.headers.clear_authorization();
    }

    pub(crate) fn set_state(&mut self, state: AuthState) {
        tracing::debug!(from = %self.state, to = %state, "Authentication state change");
        self.state = state;
    }
}
