//! Session lifecycle: login, logout and startup restoration
//!
//! The [`Auth`] client is the single source of truth for who is logged in.
//! A stored token is necessary but not sufficient: the identity round-trip
//! against `/users/me` is the actual validation step, which covers tokens
//! that are stale or were revoked server-side.

mod session;
mod types;

use log::warn;
use reqwest::Client;
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;

use crate::credentials::{CredentialStore, TOKEN_KEY};
use crate::error::Error;
use crate::fetch::Fetch;

pub use session::Session;
pub use types::{ApiUser, Credentials, LoginResponse, User, UserRole};

/// Client for authentication and session management
pub struct Auth {
    /// The base URL of the resort API
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// Persistent storage for the bearer token
    store: Arc<dyn CredentialStore>,

    /// The current session
    session: Arc<RwLock<Option<Session>>>,

    /// Serializes login and restoration so they cannot interleave
    lifecycle: Mutex<()>,
}

impl Auth {
    /// Create a new Auth client
    pub(crate) fn new(url: &str, client: Client, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            url: url.to_string(),
            client,
            store,
            session: Arc::new(RwLock::new(None)),
            lifecycle: Mutex::new(()),
        }
    }

    /// Restore a previous session from the credential store
    ///
    /// Intended to run once at startup, before any routing decision that
    /// depends on auth state. Never fails to its caller: any problem (no
    /// stored token, network error, rejected or malformed identity) resolves
    /// to the unauthenticated state, and a failed validation also deletes
    /// the stored token so it cannot be retried forever.
    pub async fn restore_session(&self) -> Option<User> {
        let _guard = self.lifecycle.lock().await;

        let token = match self.store.get(TOKEN_KEY).await {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(err) => {
                warn!("could not read the stored token: {}", err);
                return None;
            }
        };

        match self.fetch_identity(&token).await {
            Ok(user) => {
                self.install(Session {
                    access_token: token,
                    user: user.clone(),
                });
                Some(user)
            }
            Err(err) => {
                warn!("failed to restore session: {}", err);
                self.discard().await;
                None
            }
        }
    }

    /// Log in with email and password
    ///
    /// On success the issued token is persisted and the resolved identity is
    /// returned. On any failure the stored token is deleted and the session
    /// cleared before the error is returned, so the store never ends up with
    /// a token that did not validate.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, Error> {
        let _guard = self.lifecycle.lock().await;

        match self.try_login(email, password).await {
            Ok(user) => Ok(user),
            Err(err) => {
                self.discard().await;
                Err(err)
            }
        }
    }

    async fn try_login(&self, email: &str, password: &str) -> Result<User, Error> {
        let url = format!("{}/auth/login", self.url);
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = Fetch::post(&self.client, &url)
            .json(&credentials)?
            .execute()
            .await?;

        let token = response
            .access_token
            .ok_or_else(|| Error::auth("login response carried no access token"))?;

        self.store.set(TOKEN_KEY, &token).await?;

        let user = self.fetch_identity(&token).await?;
        self.install(Session {
            access_token: token,
            user: user.clone(),
        });

        Ok(user)
    }

    /// Log out the current user
    ///
    /// Clears the in-memory session and deletes the stored token. Idempotent:
    /// calling while already logged out succeeds.
    pub async fn logout(&self) -> Result<(), Error> {
        *self.session.write().unwrap() = None;
        self.store.delete(TOKEN_KEY).await
    }

    /// Resolve the identity behind a token via `GET /users/me`
    ///
    /// This is also where the raw `_id` shape becomes the canonical [`User`].
    async fn fetch_identity(&self, token: &str) -> Result<User, Error> {
        let url = format!("{}/users/me", self.url);

        let api_user: ApiUser = Fetch::get(&self.client, &url)
            .bearer_auth(token)
            .execute()
            .await?;

        Ok(api_user.into())
    }

    fn install(&self, session: Session) {
        *self.session.write().unwrap() = Some(session);
    }

    async fn discard(&self) {
        if let Err(err) = self.store.delete(TOKEN_KEY).await {
            warn!("could not delete the stored token: {}", err);
        }
        *self.session.write().unwrap() = None;
    }

    /// Get the current session
    pub fn current_session(&self) -> Option<Session> {
        self.session.read().unwrap().clone()
    }

    /// Set the session directly, bypassing the identity round-trip
    ///
    /// For callers that obtained a validated session elsewhere.
    pub fn set_session(&self, session: Session) {
        self.install(session);
    }

    /// Get the currently logged-in user
    pub fn current_user(&self) -> Option<User> {
        self.session.read().unwrap().as_ref().map(|s| s.user.clone())
    }

    /// The bearer token for the current session, read at call time
    pub fn access_token(&self) -> Option<String> {
        self.session
            .read()
            .unwrap()
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// Whether a user is logged in
    pub fn is_authenticated(&self) -> bool {
        self.session.read().unwrap().is_some()
    }

    /// Whether the logged-in user has the admin role
    pub fn is_admin(&self) -> bool {
        self.current_user()
            .map(|user| user.role == UserRole::Admin)
            .unwrap_or(false)
    }
}
