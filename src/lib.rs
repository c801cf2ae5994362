//! Rust client for a resort booking and guest services API
//!
//! Provides session management against the resort backend, reservation and
//! notification fetching, the optimistic support-chat pipeline,
//! server-driven feature flags, and the API-key-authenticated admin surface.
//!
//! # Example
//!
//! ```no_run
//! use resort_rust::Resort;
//!
//! # async fn run() -> Result<(), resort_rust::error::Error> {
//! let resort = Resort::new("https://api.example-resort.com")?;
//!
//! // Restore a previous session, or fall back to a fresh login
//! let user = match resort.auth().restore_session().await {
//!     Some(user) => user,
//!     None => resort.auth().login("guest@example.com", "secret").await?,
//! };
//! println!("logged in as {}", user.username);
//!
//! let reservations = resort.reservations().list_mine().await?;
//! println!("{} reservations", reservations.len());
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod auth;
pub mod chat;
pub mod config;
pub mod credentials;
pub mod error;
pub mod fetch;
pub mod features;
pub mod notifications;
pub mod reservations;

use reqwest::Client;
use std::sync::Arc;
use url::Url;

use crate::admin::AdminClient;
use crate::auth::Auth;
use crate::chat::ChatClient;
use crate::config::ClientOptions;
use crate::credentials::{CredentialStore, MemoryCredentialStore};
use crate::error::Error;
use crate::features::FeatureFlagCache;
use crate::notifications::NotificationsClient;
use crate::reservations::ReservationsClient;

/// The main entry point for the resort client
pub struct Resort {
    /// The base URL of the resort API, without a trailing slash
    url: String,

    /// HTTP client shared by every service client
    http_client: Client,

    /// Client options
    options: ClientOptions,

    /// Auth client owning the session
    auth: Arc<Auth>,

    /// One-shot feature flag cache
    features: FeatureFlagCache,

    /// Admin client, constructed eagerly so a missing key is reported at startup
    admin: AdminClient,
}

impl Resort {
    /// Create a new resort client with default options
    ///
    /// Credentials live in an in-memory store; use
    /// [`Resort::new_with_store`] to persist them across processes.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::new_with_options(base_url, ClientOptions::default())
    }

    /// Create a new resort client with custom options
    pub fn new_with_options(base_url: &str, options: ClientOptions) -> Result<Self, Error> {
        Self::new_with_store(base_url, options, Arc::new(MemoryCredentialStore::new()))
    }

    /// Create a new resort client with custom options and credential storage
    pub fn new_with_store(
        base_url: &str,
        options: ClientOptions,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, Error> {
        // Validate early so a bad address fails at construction, not first use
        Url::parse(base_url)?;
        let url = base_url.trim_end_matches('/').to_string();

        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let auth = Arc::new(Auth::new(&url, http_client.clone(), store.clone()));
        let features = FeatureFlagCache::new(&url, http_client.clone());
        let admin = AdminClient::new(
            &url,
            http_client.clone(),
            options.admin_api_key.clone(),
            store,
        );

        Ok(Self {
            url,
            http_client,
            options,
            auth,
            features,
            admin,
        })
    }

    /// Create a resort client from environment variables
    ///
    /// Reads the base address from `RESORT_API_URL` (required) and the admin
    /// API key from `RESORT_ADMIN_API_KEY` (optional).
    pub fn from_env() -> Result<Self, Error> {
        let url = std::env::var("RESORT_API_URL").map_err(|_| {
            Error::config("RESORT_API_URL environment variable not found")
        })?;
        let admin_api_key = std::env::var("RESORT_ADMIN_API_KEY").ok();

        Self::new_with_options(
            &url,
            ClientOptions::default().with_admin_api_key(admin_api_key),
        )
    }

    /// The auth client for login, logout and session restoration
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// A client for the guest reservations endpoint
    pub fn reservations(&self) -> ReservationsClient {
        ReservationsClient::new(&self.url, self.http_client.clone(), self.auth.clone())
    }

    /// A client for paginated notification fetching
    pub fn notifications(&self) -> NotificationsClient {
        NotificationsClient::new(
            &self.url,
            self.http_client.clone(),
            self.auth.clone(),
            self.options.exhaustion_policy,
        )
    }

    /// A client for the support chat
    pub fn chat(&self) -> ChatClient {
        ChatClient::new(&self.url, self.http_client.clone(), self.auth.clone())
    }

    /// The one-shot feature flag cache
    pub fn features(&self) -> &FeatureFlagCache {
        &self.features
    }

    /// The admin client
    pub fn admin(&self) -> &AdminClient {
        &self.admin
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{Session, User, UserRole};
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::Resort;
}
