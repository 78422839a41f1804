//! The credential record a client is constructed with.
//!
//! An [`AuthInfo`] carries an optional access token and optional login
//! credentials. The login credentials are a tagged variant so the
//! pre-encrypted pair and the plaintext pair can never be half-mixed:
//!
//! - [`LoginCredentials::Encrypted`]: values already obfuscated the way the
//!   site's sign-in page does it; sent as-is
//! - [`LoginCredentials::Plaintext`]: a username and password that would
//!   need the site's proprietary obfuscation first, which this crate does not
//!   implement
//!
//! Precedence during authentication is token, then encrypted, then plaintext.

use serde::Deserialize;
use std::fmt;

/// Login credentials, in exactly one of the two accepted forms.
///
/// # Security
///
/// The `Debug` implementation masks passwords.
///
/// # Example
///
/// ```rust
/// use shopgoodwill_api::LoginCredentials;
///
/// let creds = LoginCredentials::encrypted("dXNlcg%3D%3D", "cGFzcw%3D%3D");
/// assert!(!format!("{creds:?}").contains("cGFzcw"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum LoginCredentials {
    /// Username and password already encrypted for the sign-in endpoint.
    Encrypted {
        /// Encrypted, URL-encoded username.
        username: String,
        /// Encrypted, URL-encoded password.
        password: String,
    },
    /// Plain username and password.
    Plaintext {
        /// Account user name.
        user_name: String,
        /// Account password.
        password: String,
    },
}

impl LoginCredentials {
    /// Creates pre-encrypted credentials.
    #[must_use]
    pub fn encrypted(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Encrypted {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates plaintext credentials.
    #[must_use]
    pub fn plaintext(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Plaintext {
            user_name: user_name.into(),
            password: password.into(),
        }
    }

    /// Returns `true` for the pre-encrypted form.
    #[must_use]
    pub const fn is_encrypted(&self) -> bool {
        matches!(self, Self::Encrypted { .. })
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encrypted { username, .. } => f
                .debug_struct("Encrypted")
                .field("username", username)
                .field("password", &"*****")
                .finish(),
            Self::Plaintext { user_name, .. } => f
                .debug_struct("Plaintext")
                .field("user_name", user_name)
                .field("password", &"*****")
                .finish(),
        }
    }
}

/// The credential record supplied when constructing a client.
///
/// Empty strings count as absent. A record with neither a token nor login
/// credentials is accepted here but fails authentication with
/// [`AuthError::InvalidAuthInfo`](crate::AuthError::InvalidAuthInfo).
///
/// # Deserialization
///
/// `AuthInfo` deserializes from the flat camelCase record used by the web
/// front end. A complete encrypted pair wins over a complete plaintext pair;
/// a pair with a missing half is ignored.
///
/// ```rust
/// use shopgoodwill_api::{AuthInfo, LoginCredentials};
///
/// let info: AuthInfo = serde_json::from_str(r#"{
///     "accessToken": "T1",
///     "userName": "bidder",
///     "password": "hunter2",
///     "encryptedUsername": "ENC_U",
///     "encryptedPassword": "ENC_P"
/// }"#).unwrap();
///
/// assert_eq!(info.access_token(), Some("T1"));
/// assert_eq!(
///     info.login_credentials(),
///     Some(&LoginCredentials::encrypted("ENC_U", "ENC_P"))
/// );
/// ```
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawAuthInfo")]
pub struct AuthInfo {
    access_token: Option<String>,
    login: Option<LoginCredentials>,
}

impl AuthInfo {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record holding only an access token.
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        Self::new().with_access_token(token)
    }

    /// Creates a record holding only pre-encrypted credentials.
    #[must_use]
    pub fn from_encrypted(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new().with_login(LoginCredentials::encrypted(username, password))
    }

    /// Creates a record holding only plaintext credentials.
    #[must_use]
    pub fn from_plaintext(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new().with_login(LoginCredentials::plaintext(user_name, password))
    }

    /// Sets the access token to try before logging in.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = non_empty(token.into());
        self
    }

    /// Sets the credentials used when no valid token is available.
    ///
    /// Credentials with an empty half are dropped.
    #[must_use]
    pub fn with_login(mut self, login: LoginCredentials) -> Self {
        let complete = match &login {
            LoginCredentials::Encrypted { username, password } => {
                !username.is_empty() && !password.is_empty()
            }
            LoginCredentials::Plaintext {
                user_name,
                password,
            } => !user_name.is_empty() && !password.is_empty(),
        };
        self.login = complete.then_some(login);
        self
    }

    /// Returns the access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Returns the login credentials, if any.
    #[must_use]
    pub const fn login_credentials(&self) -> Option<&LoginCredentials> {
        self.login.as_ref()
    }

    /// Returns `true` if the record holds nothing usable.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.login.is_none()
    }

    /// Replaces the token after a successful login so a later
    /// re-authentication tries it first.
    pub(crate) fn replace_access_token(&mut self, token: &str) {
        self.access_token = non_empty(token.to_string());
    }
}

impl fmt::Debug for AuthInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthInfo")
            .field("access_token", &self.access_token.as_ref().map(|_| "*****"))
            .field("login", &self.login)
            .finish()
    }
}

/// Flat wire form of [`AuthInfo`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawAuthInfo {
    access_token: Option<String>,
    encrypted_username: Option<String>,
    encrypted_password: Option<String>,
    user_name: Option<String>,
    password: Option<String>,
}

impl From<RawAuthInfo> for AuthInfo {
    fn from(raw: RawAuthInfo) -> Self {
        let pair = |a: Option<String>, b: Option<String>| {
            a.and_then(non_empty).zip(b.and_then(non_empty))
        };

        let login = pair(raw.encrypted_username, raw.encrypted_password)
            .map(|(username, password)| LoginCredentials::Encrypted { username, password })
            .or_else(|| {
                pair(raw.user_name, raw.password).map(|(user_name, password)| {
                    LoginCredentials::Plaintext {
                        user_name,
                        password,
                    }
                })
            });

        Self {
            access_token: raw.access_token.and_then(non_empty),
            login,
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
