//! Authentication types for the Shopgoodwill client.
//!
//! This module holds the credential record, the per-client session state
//! and the state machine that turns one into the other.
//!
//! # Overview
//!
//! - [`AuthInfo`]: the credentials a client is constructed with
//! - [`LoginCredentials`]: pre-encrypted or plaintext login pair
//! - [`SessionState`]: headers, credential record and [`AuthState`]
//! - [`Authenticator`]: token probe, credential login and fallback
//!
//! # Example
//!
//! ```rust
//! use shopgoodwill_api::{AuthInfo, LoginCredentials};
//!
//! // Try a stored token first, log in with encrypted credentials if it expired
//! let info = AuthInfo::from_token("stored-token")
//!     .with_login(LoginCredentials::encrypted("ENC_USER", "ENC_PASS"));
//!
//! assert!(!info.is_empty());
//! ```

mod authenticator;
mod credentials;
mod error;
pub mod session;

pub use authenticator::{AuthState, Authenticator};
pub use credentials::{AuthInfo, LoginCredentials};
pub use error::AuthError;
pub use session::{SessionHeaders, SessionState, AUTHORIZATION_HEADER};
