//! The session authentication state machine.
//!
//! ```text
//! Unauthenticated -> TokenCheck -> Authenticated
//!                        |
//!                        v (401, or no token)
//!                  CredentialLogin -> Authenticated | Failed
//! ```
//!
//! A supplied access token is tried first by probing the saved-searches
//! endpoint with it. A 200 adopts the token; a 401 drops it and falls
//! through to a credential login; any other status is fatal. Login prefers
//! pre-encrypted credentials. Plaintext credentials fail with
//! [`AuthError::UnimplementedEncryption`] because the site's credential
//! obfuscation is not reproduced here.
//!
//! Whatever the outcome, a failed run leaves no `Authorization` header.

use serde::Deserialize;
use serde_json::json;
use std::fmt;

use crate::auth::{AuthError, LoginCredentials, SessionState};
use crate::clients::{HttpClient, HttpResponseError};
use crate::config::ShopgoodwillConfig;
use crate::endpoints;

/// States of the authentication state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthState {
    /// Nothing has been attempted yet.
    Unauthenticated,
    /// A supplied access token is being probed.
    TokenCheck,
    /// Logging in with credentials.
    CredentialLogin,
    /// Requests carry a valid bearer token.
    Authenticated,
    /// Authentication failed; requests carry no bearer token.
    Failed,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "unauthenticated"),
            Self::TokenCheck => write!(f, "token_check"),
            Self::CredentialLogin => write!(f, "credential_login"),
            Self::Authenticated => write!(f, "authenticated"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// The part of the login response this crate reads.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Drives the state machine for one [`SessionState`].
///
/// Borrowing the transport and configuration keeps every session mutation
/// inside this type.
#[derive(Debug, Clone, Copy)]
pub struct Authenticator<'a> {
    http: &'a HttpClient,
    config: &'a ShopgoodwillConfig,
}

impl<'a> Authenticator<'a> {
    /// Creates an authenticator over a transport and configuration.
    #[must_use]
    pub const fn new(http: &'a HttpClient, config: &'a ShopgoodwillConfig) -> Self {
        Self { http, config }
    }

    /// Runs the state machine from the session's credential record.
    ///
    /// Re-running is safe: the run starts by dropping any current
    /// authorization. A token obtained by an earlier login is tried first.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidAuthInfo`] if there is nothing to authenticate with
    /// - [`AuthError::UnexpectedProbeStatus`] if the token probe returns neither 200 nor 401
    /// - [`AuthError::UnimplementedEncryption`] if only plaintext credentials remain
    /// - [`AuthError::LoginFailed`] if the login response holds no token
    /// - [`AuthError::Http`] on transport failure
    pub async fn authenticate(&self, session: &mut SessionState) -> Result<(), AuthError> {
        session.clear_authorization();
        session.set_state(AuthState::Unauthenticated);

        match self.run(session).await {
            Ok(()) => {
                session.set_state(AuthState::Authenticated);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "Shopgoodwill authentication failed");
                session.clear_authorization();
                session.set_state(AuthState::Failed);
                Err(error)
            }
        }
    }

    async fn run(&self, session: &mut SessionState) -> Result<(), AuthError> {
        let auth_info = session.auth_info().clone();
        if auth_info.is_empty() {
            return Err(AuthError::InvalidAuthInfo);
        }

        if let Some(token) = auth_info.access_token() {
            session.set_state(AuthState::TokenCheck);
            if self.access_token_is_valid(session, token).await? {
                return Ok(());
            }
            tracing::debug!("Access token rejected, falling back to credential login");
        }

        session.set_state(AuthState::CredentialLogin);
        match auth_info.login_credentials() {
            Some(LoginCredentials::Encrypted { username, password }) => {
                self.login(session, username, password).await
            }
            Some(LoginCredentials::Plaintext {
                user_name,
                password,
            }) => {
                let username = encrypt_login_value(user_name)?;
                let password = encrypt_login_value(password)?;
                self.login(session, &username, &password).await
            }
            None => Err(AuthError::InvalidAuthInfo),
        }
    }

    /// Probes the API with `token`.
    ///
    /// On `Ok(true)` the session carries the token. On `Ok(false)` (the
    /// probe returned 401) and on every error the session carries no
    /// authorization.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnexpectedProbeStatus`] for any status other than
    /// 200 or 401, and [`AuthError::Http`] on transport failure.
    pub async fn access_token_is_valid(
        &self,
        session: &mut SessionState,
        token: &str,
    ) -> Result<bool, AuthError> {
        session.set_bearer(token);

        let response = match self
            .http
            .post(endpoints::SAVED_SEARCHES, None, session.headers())
            .await
        {
            Ok(response) => response,
            Err(error) => {
                session.clear_authorization();
                return Err(error.into());
            }
        };

        if response.code == 200 {
            return Ok(true);
        }

        session.clear_authorization();
        if response.is_unauthorized() {
            return Ok(false);
        }

        Err(AuthError::UnexpectedProbeStatus {
            status: response.code,
            body: HttpResponseError::from_response(&response).message,
        })
    }

    /// Logs in with already-encrypted credentials.
    ///
    /// The sign-in page is fetched first as an availability check; its status
    /// is only logged. On success the new token is set on the session and
    /// stored in its credential record.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::LoginFailed`] if the response holds no access
    /// token (the session then carries no authorization), and
    /// [`AuthError::Http`] on transport failure.
    pub async fn login(
        &self,
        session: &mut SessionState,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let page = self
            .http
            .get(self.config.login_page_url().as_ref(), session.headers())
            .await?;
        if !page.is_ok() {
            tracing::warn!(status = page.code, "Sign-in page check did not succeed");
        }

        let body = login_body(self.config, username, password);

        let response = self
            .http
            .post(endpoints::SIGN_IN, Some(body), session.headers())
            .await?;

        let token = serde_json::from_value::<LoginResponse>(response.body.clone())
            .unwrap_or_default()
            .access_token
            .filter(|token| !token.is_empty());

        if let Some(token) = token {
            session.adopt_login_token(&token);
            tracing::debug!("Logged in to Shopgoodwill");
            Ok(())
        } else {
            session.clear_authorization();
            Err(AuthError::LoginFailed {
                status: response.code,
            })
        }
    }
}

/// Builds the login request envelope.
fn login_body(config: &ShopgoodwillConfig, username: &str, password: &str) -> serde_json::Value {
    json!({
        "browser": config.browser(),
        "remember": false,
        "clientIpAddress": config.client_ip_address(),
        "appVersion": config.app_version(),
        "username": username,
        "password": password,
    })
}

/// Obfuscates a login value the way the site's sign-in page does.
///
/// The site encrypts credentials with a proprietary scheme that has not been
/// verified for passwords, so this always fails rather than sending
/// plaintext or a wrong cipher.
fn encrypt_login_value(_value: &str) -> Result<String, AuthError> {
    Err(AuthError::UnimplementedEncryption)
}
