//! # Shopgoodwill buyer API client
//!
//! An async client for the private buyer API behind shopgoodwill.com. It
//! establishes a session from a stored token or from pre-encrypted login
//! credentials, then lists, adds and annotates the user's favorites.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ShopgoodwillConfig`] and [`ShopgoodwillConfigBuilder`]
//! - A credential record, [`AuthInfo`], with token and login fallbacks
//! - An authentication state machine run when a [`Shopgoodwill`] client is built
//! - Favorites and saved-search operations that refuse to run unauthenticated
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shopgoodwill_api::{AuthInfo, FavoriteType, LoginCredentials, Shopgoodwill};
//!
//! let auth_info = AuthInfo::from_token("stored-token")
//!     .with_login(LoginCredentials::encrypted("ENC_USER", "ENC_PASS"));
//!
//! let client = Shopgoodwill::new(auth_info).await?;
//!
//! for favorite in client.favorites(FavoriteType::Open).await? {
//!     println!("{} ({})", favorite.title, favorite.current_price);
//! }
//!
//! client.annotate_favorite(12345, "max $40").await?;
//! ```
//!
//! ## Authentication
//!
//! A supplied access token is validated against the API first. If the API
//! rejects it, the client logs in with the pre-encrypted username and
//! password. Plaintext credentials are accepted in [`AuthInfo`] but fail with
//! [`AuthError::UnimplementedEncryption`]: the site obfuscates credentials
//! with a proprietary scheme this crate does not reproduce. Copy the
//! encrypted values from the browser's sign-in request instead.
//!
//! Credentials can also be read from the camelCase record the web front end
//! uses:
//!
//! ```rust
//! use shopgoodwill_api::AuthInfo;
//!
//! let info: AuthInfo = serde_json::from_str(
//!     r#"{"encryptedUsername": "ENC_USER", "encryptedPassword": "ENC_PASS"}"#,
//! ).unwrap();
//!
//! assert!(info.login_credentials().unwrap().is_encrypted());
//! ```
//!
//! ## Logging
//!
//! The crate logs through [`tracing`] and installs no subscriber. State
//! transitions and requests are logged at `debug`, failures at `warn`.
//! Tokens and passwords are never logged.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Single owner**: Only `&mut` access can change a session
//! - **No retries**: Every failure is reported to the caller as-is

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod favorites;

mod client;
mod endpoints;

// Re-export public types at crate root for convenience
pub use auth::{AuthError, AuthInfo, AuthState, LoginCredentials, SessionHeaders, SessionState};
pub use client::Shopgoodwill;
pub use config::{ApiRoot, ShopgoodwillConfig, ShopgoodwillConfigBuilder, SiteUrl};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{HttpClient, HttpError, HttpResponse};

// Re-export favorites types
pub use favorites::{
    Favorite, FavoriteStatus, FavoriteType, FavoritesError, FavoritesGateway, SavedSearch,
    FAVORITES_MAX_NOTE_LENGTH,
};
