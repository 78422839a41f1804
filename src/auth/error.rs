//! Authentication error types.
//!
//! Every variant is terminal: the authenticator never retries and never
//! downgrades one failure into another.

use crate::clients::HttpError;
use thiserror::Error;

/// Errors that can occur while establishing a session.
///
/// # Example
///
/// ```rust
/// use shopgoodwill_api::AuthError;
///
/// let error = AuthError::UnexpectedProbeStatus {
///     status: 503,
///     body: "{}".to_string(),
/// };
/// assert!(error.to_string().contains("503"));
/// ```
#[derive(Debug, Error)]
pub enum AuthError {
    /// Neither a token nor usable login credentials were supplied.
    #[error("Invalid auth info: supply an access token, pre-encrypted credentials, or a user name and password")]
    InvalidAuthInfo,

    /// Plaintext credentials were supplied without pre-encrypted equivalents.
    ///
    /// The site obfuscates credentials with a proprietary scheme before
    /// sign-in; this crate does not reproduce it.
    #[error("Credential encryption is not implemented. Please provide your pre-encrypted username and password")]
    UnimplementedEncryption,

    /// The login response carried no access token.
    #[error("Login failed: no access token in response (status {status})")]
    LoginFailed {
        /// The HTTP status code of the login response.
        status: u16,
    },

    /// The token probe answered with neither 200 nor 401.
    #[error("Unexpected status {status} while validating access token: {body}")]
    UnexpectedProbeStatus {
        /// The HTTP status code of the probe response.
        status: u16,
        /// The response body, serialized.
        body: String,
    },

    /// Wrapped HTTP transport error.
    #[error(transparent)]
    Http(#[from] HttpError),
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};
