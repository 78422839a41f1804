//! Authenticated favorites and saved-search operations.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::auth::SessionState;
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, HttpResponseError};
use crate::endpoints;
use crate::favorites::{truncate_note, Favorite, FavoriteType, FavoritesError, SavedSearch};

/// Favorites operations over a borrowed transport and session.
///
/// Every operation checks for an authorization header at call time and
/// fails with [`FavoritesError::NotAuthenticated`] before touching the
/// network if there is none.
///
/// # Example
///
/// ```rust,ignore
/// use shopgoodwill_api::{FavoriteType, Shopgoodwill, AuthInfo};
///
/// let client = Shopgoodwill::new(AuthInfo::from_token("T1")).await?;
/// let gateway = client.favorites_gateway();
///
/// for favorite in gateway.favorites(FavoriteType::Open).await? {
///     println!("{} ends {}", favorite.title, favorite.end_time);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FavoritesGateway<'a> {
    http: &'a HttpClient,
    session: &'a SessionState,
}

impl<'a> FavoritesGateway<'a> {
    /// Creates a gateway over a transport and session.
    #[must_use]
    pub const fn new(http: &'a HttpClient, session: &'a SessionState) -> Self {
        Self { http, session }
    }

    /// Lists the user's saved searches.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::NotAuthenticated`] without a request if the
    /// session is unauthenticated, [`FavoritesError::Http`] on transport
    /// failure or a non-2xx status, and [`FavoritesError::InvalidResponse`]
    /// if `data` is not a list.
    pub async fn saved_searches(&self) -> Result<Vec<SavedSearch>, FavoritesError> {
        self.check_auth()?;

        let response = self
            .http
            .post(endpoints::SAVED_SEARCHES, None, self.session.headers())
            .await?;

        decode_data(&ensure_ok(response)?, "saved searches")
    }

    /// Lists favorites of the given type. The full set is returned in one
    /// response.
    ///
    /// # Errors
    ///
    /// Same as [`saved_searches`](Self::saved_searches).
    pub async fn favorites(
        &self,
        favorite_type: FavoriteType,
    ) -> Result<Vec<Favorite>, FavoritesError> {
        self.check_auth()?;

        let response = self.fetch_favorites(favorite_type).await?;
        decode_data(&response, "favorites")
    }

    /// Adds an item to favorites, then annotates it if a note is given.
    ///
    /// The add is not rolled back if annotating fails.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::NotAuthenticated`] without a request if the
    /// session is unauthenticated, [`FavoritesError::Http`] if the add fails,
    /// and any error of [`annotate_favorite`](Self::annotate_favorite).
    pub async fn add_favorite(&self, item_id: i64, note: Option<&str>) -> Result<(), FavoritesError> {
        self.check_auth()?;

        let request = HttpRequest::builder(HttpMethod::Get, endpoints::ADD_TO_FAVORITES)
            .query_param("itemId", item_id.to_string())
            .build()
            .map_err(HttpError::from)?;

        let response = self.http.request(&request, self.session.headers()).await?;
        ensure_ok(response)?;
        tracing::debug!(item_id, "Added item to favorites");

        match note {
            Some(note) => self.annotate_favorite(item_id, note).await,
            None => Ok(()),
        }
    }

    /// Saves a note on a favorite, truncated to
    /// [`FAVORITES_MAX_NOTE_LENGTH`](crate::favorites::FAVORITES_MAX_NOTE_LENGTH)
    /// characters.
    ///
    /// The watchlist id is looked up by listing all favorites. Only the item
    /// and watchlist ids of each entry need to decode.
    ///
    /// # Errors
    ///
    /// Returns [`FavoritesError::FavoriteNotFound`] without writing if the
    /// item is not a favorite, plus any error of
    /// [`favorites`](Self::favorites) or of the save request.
    pub async fn annotate_favorite(&self, item_id: i64, note: &str) -> Result<(), FavoritesError> {
        self.check_auth()?;

        let notes = truncate_note(note);
        if notes.len() < note.len() {
            tracing::debug!(item_id, "Truncated favorite note");
        }

        let response = self.fetch_favorites(FavoriteType::All).await?;
        let watchlist_id = decode_data::<WatchlistEntry>(&response, "favorites")?
            .into_iter()
            .find(|entry| entry.item_id == item_id)
            .map(|entry| entry.watchlist_id)
            .ok_or(FavoritesError::FavoriteNotFound { item_id })?;

        let body = json!({
            "notes": notes,
            "watchlistId": watchlist_id,
        });

        let response = self
            .http
            .post(endpoints::SAVE_FAVORITE, Some(body), self.session.headers())
            .await?;
        ensure_ok(response)?;

        Ok(())
    }

    async fn fetch_favorites(
        &self,
        favorite_type: FavoriteType,
    ) -> Result<HttpResponse, FavoritesError> {
        let request = HttpRequest::builder(HttpMethod::Post, endpoints::FAVORITES_BY_TYPE)
            .query_param("Type", favorite_type.as_str())
            .body(json!({}))
            .build()
            .map_err(HttpError::from)?;

        let response = self.http.request(&request, self.session.headers()).await?;
        ensure_ok(response)
    }

    fn check_auth(&self) -> Result<(), FavoritesError> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            tracing::warn!("Favorites operation attempted without authentication");
            Err(FavoritesError::NotAuthenticated)
        }
    }
}

/// The two ids of a favorite needed to save its note.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WatchlistEntry {
    item_id: i64,
    watchlist_id: i64,
}

fn ensure_ok(response: HttpResponse) -> Result<HttpResponse, FavoritesError> {
    if response.is_ok() {
        Ok(response)
    } else {
        Err(HttpError::Response(HttpResponseError::from_response(&response)).into())
    }
}

/// Decodes the envelope's `data` list. A missing or null `data` is empty.
fn decode_data<T: DeserializeOwned>(
    response: &HttpResponse,
    what: &str,
) -> Result<Vec<T>, FavoritesError> {
    let Some(data) = response.data() else {
        return Ok(Vec::new());
    };

    serde_json::from_value(data.clone()).map_err(|e| FavoritesError::InvalidResponse {
        reason: format!("could not decode {what}: {e}"),
    })
}
