//! Error types for favorites and saved-search operations.
//!
//! Non-2xx responses are not interpreted here beyond wrapping them as
//! [`HttpError::Response`]; a 401 does not trigger a re-login.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopgoodwill_api::FavoritesError;
//!
//! match client.annotate_favorite(42, "bid on Friday").await {
//!     Ok(()) => {}
//!     Err(FavoritesError::FavoriteNotFound { item_id }) => {
//!         println!("{item_id} is not in your favorites");
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Errors returned by the favorites gateway.
///
/// # Example
///
/// ```rust
/// use shopgoodwill_api::FavoritesError;
///
/// let error = FavoritesError::FavoriteNotFound { item_id: 42 };
/// assert_eq!(error.to_string(), "Item 42 was not found in favorites");
/// ```
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// The session carries no authorization header.
    #[error("Not authenticated: call authenticate() before using favorites")]
    NotAuthenticated,

    /// The item is not among the user's favorites, so it has no watchlist id.
    #[error("Item {item_id} was not found in favorites")]
    FavoriteNotFound {
        /// The item id that was looked up.
        item_id: i64,
    },

    /// The response `data` could not be decoded.
    #[error("Invalid response: {reason}")]
    InvalidResponse {
        /// What failed to decode.
        reason: String,
    },

    /// Wrapped HTTP error.
    #[error(transparent)]
    Http(#[from] HttpError),
}

// Verify FavoritesError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FavoritesError>();
};
