//! Server-supplied feature flags

use log::warn;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::error::Error;
use crate::fetch::Fetch;

/// Boolean capability flags controlling client-side feature availability
///
/// The default has everything disabled; it doubles as the fallback when the
/// flags cannot be fetched.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Whether the food ordering surface is available
    #[serde(default)]
    pub food_ordering_enabled: bool,
}

/// One-shot cache of the public feature flags
///
/// The flags are fetched at most once and then treated as immutable for the
/// lifetime of the client; there is no refresh path. The endpoint is public,
/// so no auth is attached.
pub struct FeatureFlagCache {
    url: String,
    client: Client,
    flags: OnceCell<FeatureFlags>,
}

impl FeatureFlagCache {
    /// Create a new feature flag cache
    pub(crate) fn new(url: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            client,
            flags: OnceCell::new(),
        }
    }

    /// The flags, fetching them on first use
    ///
    /// A failed fetch is logged and resolves to the disabled defaults, which
    /// are then cached like any other result.
    pub async fn get(&self) -> FeatureFlags {
        *self
            .flags
            .get_or_init(|| async {
                match self.fetch().await {
                    Ok(flags) => flags,
                    Err(err) => {
                        warn!("could not load feature flags: {}", err);
                        FeatureFlags::default()
                    }
                }
            })
            .await
    }

    async fn fetch(&self) -> Result<FeatureFlags, Error> {
        let url = format!("{}/reservations/options/features", self.url);
        Fetch::get(&self.client, &url).execute().await
    }
}
