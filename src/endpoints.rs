//! Buyer API paths, relative to the API root.

/// Saved searches of the signed-in user. Also the token-validation probe.
pub const SAVED_SEARCHES: &str = "/SaveSearches/GetSaveSearches";

/// Credential login.
pub const SIGN_IN: &str = "/SignIn/Login";

/// Favorites filtered by the `Type` query parameter.
pub const FAVORITES_BY_TYPE: &str = "/Favorite/GetAllFavoriteItemsByType";

/// Adds an item to favorites; takes the `itemId` query parameter.
pub const ADD_TO_FAVORITES: &str = "/Favorite/AddToFavorite";

/// Saves the note of a favorite, keyed by watchlist id.
pub const SAVE_FAVORITE: &str = "/Favorite/Save";
