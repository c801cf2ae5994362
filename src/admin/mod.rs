//! Admin surface: QR verification and reservation management
//!
//! The admin client is a parallel variant of the guest client: it
//! authenticates every request with a static `X-API-Key` header instead of a
//! per-user bearer token, and is otherwise identical in contract.

mod history;
mod types;

use log::error;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;

use crate::credentials::CredentialStore;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::reservations::{Reservation, ReservationStatus};

pub use history::ScanHistory;
pub use types::{AdminUser, QrVerification, ScanRecord};

/// Client for the admin endpoints
pub struct AdminClient {
    url: String,
    client: Client,
    api_key: Option<String>,
    history: ScanHistory,
}

impl AdminClient {
    /// Create a new admin client
    ///
    /// A missing API key is a logged error rather than a hard failure; admin
    /// requests made without one fail with a configuration error.
    pub(crate) fn new(
        url: &str,
        client: Client,
        api_key: Option<String>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        if api_key.is_none() {
            error!("admin API key is not configured; admin requests will fail");
        }

        Self {
            url: url.to_string(),
            client,
            api_key,
            history: ScanHistory::new(store),
        }
    }

    fn key(&self) -> Result<&str, Error> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Error::config("admin API key is not configured"))
    }

    /// Verify a scanned reservation QR payload with the backend
    ///
    /// An unrecognized payload surfaces as [`Error::NotFound`].
    pub async fn verify_qr(&self, qr_code_data: &str) -> Result<QrVerification, Error> {
        let key = self.key()?;
        let url = format!("{}/admin/reservations/verify-qr", self.url);
        let body = serde_json::json!({ "qr_code_data": qr_code_data });

        Fetch::post(&self.client, &url)
            .api_key(key)
            .json(&body)?
            .execute()
            .await
    }

    /// Verify a scanned QR payload and append the outcome to the scan history
    ///
    /// Both successful and failed verifications are recorded.
    pub async fn verify_scan(&self, qr_code_data: &str) -> Result<QrVerification, Error> {
        match self.verify_qr(qr_code_data).await {
            Ok(verification) => {
                self.history
                    .record(ScanRecord::success(verification.clone()))
                    .await;
                Ok(verification)
            }
            Err(err) => {
                self.history
                    .record(ScanRecord::failure(&err.to_string(), qr_code_data))
                    .await;
                Err(err)
            }
        }
    }

    /// Fetch all reservations, optionally filtered by status
    ///
    /// `None` lists every reservation regardless of status.
    pub async fn list_reservations(
        &self,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, Error> {
        let key = self.key()?;
        let url = format!("{}/admin/reservations", self.url);

        let mut builder = Fetch::get(&self.client, &url).api_key(key);
        if let Some(status) = status {
            let mut params = HashMap::new();
            params.insert("status".to_string(), status.as_str().to_string());
            builder = builder.query(params);
        }

        builder.execute().await
    }

    /// The persisted scan history
    pub fn scan_history(&self) -> &ScanHistory {
        &self.history
    }
}
