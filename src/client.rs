//! The Shopgoodwill client facade.
//!
//! [`Shopgoodwill`] owns the configuration, the session state and the
//! transport. Constructing it authenticates; the returned value is ready for
//! favorites calls.

use crate::auth::{AuthError, AuthInfo, AuthState, Authenticator, SessionState};
use crate::clients::{HttpClient, HttpError, HttpResponse};
use crate::config::ShopgoodwillConfig;
use crate::favorites::{Favorite, FavoriteType, FavoritesError, FavoritesGateway, SavedSearch};

/// An authenticated Shopgoodwill buyer API client.
///
/// Re-authentication needs `&mut self`; every data operation takes `&self`
/// and re-checks the session at call time.
///
/// # Thread Safety
///
/// `Shopgoodwill` is `Send + Sync`.
///
/// # Example
///
/// ```rust,ignore
/// use shopgoodwill_api::{AuthInfo, FavoriteType, LoginCredentials, Shopgoodwill};
///
/// let auth_info = AuthInfo::from_token(stored_token)
///     .with_login(LoginCredentials::encrypted(enc_user, enc_pass));
///
/// let client = Shopgoodwill::new(auth_info).await?;
/// println!("token: {:?}", client.access_token());
///
/// let open = client.favorites(FavoriteType::Open).await?;
/// client.add_favorite(12345, Some("max $40")).await?;
/// ```
#[derive(Debug)]
pub struct Shopgoodwill {
    config: ShopgoodwillConfig,
    http: HttpClient,
    session: SessionState,
}

// Verify Shopgoodwill is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Shopgoodwill>();
};

impl Shopgoodwill {
    /// Creates a client against the live site and authenticates it.
    ///
    /// # Errors
    ///
    /// Returns any [`AuthError`] from [`authenticate`](Self::authenticate).
    pub async fn new(auth_info: AuthInfo) -> Result<Self, AuthError> {
        Self::with_config(auth_info, ShopgoodwillConfig::default()).await
    }

    /// Creates a client with a custom configuration and authenticates it.
    ///
    /// # Errors
    ///
    /// Returns any [`AuthError`] from [`authenticate`](Self::authenticate).
    pub async fn with_config(
        auth_info: AuthInfo,
        config: ShopgoodwillConfig,
    ) -> Result<Self, AuthError> {
        let mut client = Self::unauthenticated(auth_info, config)?;
        client.authenticate().await?;
        Ok(client)
    }

    /// Creates a client without authenticating it.
    ///
    /// Favorites calls fail with [`FavoritesError::NotAuthenticated`] until
    /// [`authenticate`](Self::authenticate) succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn unauthenticated(
        auth_info: AuthInfo,
        config: ShopgoodwillConfig,
    ) -> Result<Self, HttpError> {
        let http = HttpClient::new(&config)?;
        let session = SessionState::new(auth_info, &config);

        Ok(Self {
            config,
            http,
            session,
        })
    }

    /// Runs the authentication state machine.
    ///
    /// Safe to call again, e.g. after a token expired. A token obtained by an
    /// earlier login is tried before logging in again.
    ///
    /// # Errors
    ///
    /// See [`Authenticator::authenticate`].
    pub async fn authenticate(&mut self) -> Result<(), AuthError> {
        Authenticator::new(&self.http, &self.config)
            .authenticate(&mut self.session)
            .await
    }

    /// Probes the API with `token`, leaving it set on success.
    ///
    /// The session state becomes [`AuthState::Authenticated`] if the token is
    /// accepted and [`AuthState::Failed`] otherwise.
    ///
    /// # Errors
    ///
    /// See [`Authenticator::access_token_is_valid`].
    pub async fn access_token_is_valid(&mut self, token: &str) -> Result<bool, AuthError> {
        let result = Authenticator::new(&self.http, &self.config)
            .access_token_is_valid(&mut self.session, token)
            .await;
        self.settle(matches!(result, Ok(true)));
        result
    }

    /// Logs in with pre-encrypted credentials.
    ///
    /// The session state becomes [`AuthState::Authenticated`] on success and
    /// [`AuthState::Failed`] otherwise.
    ///
    /// # Errors
    ///
    /// See [`Authenticator::login`].
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        let result = Authenticator::new(&self.http, &self.config)
            .login(&mut self.session, username, password)
            .await;
        self.settle(result.is_ok());
        result
    }

    /// Records the outcome of a standalone probe or login.
    fn settle(&mut self, authenticated: bool) {
        if authenticated {
            self.session.set_state(AuthState::Authenticated);
        } else {
            self.session.clear_authorization();
            self.session.set_state(AuthState::Failed);
        }
    }

    /// Sends a GET with the session headers. Returns the response for any
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on an invalid path or transport failure.
    pub async fn get(&self, path: &str) -> Result<HttpResponse, HttpError> {
        self.http.get(path, self.session.headers()).await
    }

    /// Sends a POST with the session headers. Returns the response for any
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on an invalid path or transport failure.
    pub async fn post(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, HttpError> {
        self.http.post(path, body, self.session.headers()).await
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ShopgoodwillConfig {
        &self.config
    }

    /// Returns the session state.
    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    /// Returns `true` if requests carry an authorization header.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Returns the access token requests are sent with.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.session.access_token()
    }

    /// Returns a favorites gateway borrowing this client's session.
    #[must_use]
    pub const fn favorites_gateway(&self) -> FavoritesGateway<'_> {
        FavoritesGateway::new(&self.http, &self.session)
    }

    /// Lists saved searches. See [`FavoritesGateway::saved_searches`].
    ///
    /// # Errors
    ///
    /// See [`FavoritesGateway::saved_searches`].
    pub async fn saved_searches(&self) -> Result<Vec<SavedSearch>, FavoritesError> {
        self.favorites_gateway().saved_searches().await
    }

    /// Lists favorites. See [`FavoritesGateway::favorites`].
    ///
    /// # Errors
    ///
    /// See [`FavoritesGateway::favorites`].
    pub async fn favorites(
        &self,
        favorite_type: FavoriteType,
    ) -> Result<Vec<Favorite>, FavoritesError> {
        self.favorites_gateway().favorites(favorite_type).await
    }

    /// Adds a favorite. See [`FavoritesGateway::add_favorite`].
    ///
    /// # Errors
    ///
    /// See [`FavoritesGateway::add_favorite`].
    pub async fn add_favorite(&self, item_id: i64, note: Option<&str>) -> Result<(), FavoritesError> {
        self.favorites_gateway().add_favorite(item_id, note).await
    }

    /// Saves a favorite's note. See [`FavoritesGateway::annotate_favorite`].
    ///
    /// # Errors
    ///
    /// See [`FavoritesGateway::annotate_favorite`].
    pub async fn annotate_favorite(&self, item_id: i64, note: &str) -> Result<(), FavoritesError> {
        self.favorites_gateway().annotate_favorite(item_id, note).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_client_has_no_token() {
        let client =
            Shopgoodwill::unauthenticated(AuthInfo::from_token("T1"), ShopgoodwillConfig::default())
                .unwrap();

        assert!(!client.is_authenticated());
        assert!(client.access_token().is_none());
        assert_eq!(client.session().state(), AuthState::Unauthenticated);
        assert_eq!(client.session().auth_info().access_token(), Some("T1"));
    }

    #[tokio::test]
    async fn test_favorites_require_authentication() {
        let client =
            Shopgoodwill::unauthenticated(AuthInfo::from_token("T1"), ShopgoodwillConfig::default())
                .unwrap();

        let result = client.favorites(FavoriteType::Open).await;
        assert!(matches!(result, Err(FavoritesError::NotAuthenticated)));
    }
}
