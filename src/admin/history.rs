//! Persisted history of admin QR scans

use log::{error, warn};
use std::sync::Arc;

use super::types::ScanRecord;
use crate::credentials::{CredentialStore, SCAN_HISTORY_KEY};
use crate::error::Error;

/// Most recent scans kept; older entries are evicted
const HISTORY_LIMIT: usize = 50;

/// Newest-first scan history, persisted as a JSON blob
pub struct ScanHistory {
    store: Arc<dyn CredentialStore>,
}

impl ScanHistory {
    pub(crate) fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Load the persisted history, newest first
    ///
    /// An unreadable or corrupt blob is logged and treated as empty.
    pub async fn load(&self) -> Vec<ScanRecord> {
        let raw = match self.store.get(SCAN_HISTORY_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("could not read the scan history: {}", err);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!("scan history blob is corrupt, discarding it: {}", err);
            Vec::new()
        })
    }

    /// Prepend a record and persist the capped history
    ///
    /// A failed persist is logged; the updated in-memory list is still
    /// returned so the caller's view moves forward.
    pub async fn record(&self, record: ScanRecord) -> Vec<ScanRecord> {
        let mut history = self.load().await;
        history.insert(0, record);
        history.truncate(HISTORY_LIMIT);

        match serde_json::to_string(&history) {
            Ok(raw) => {
                if let Err(err) = self.store.set(SCAN_HISTORY_KEY, &raw).await {
                    error!("could not persist the scan history: {}", err);
                }
            }
            Err(err) => error!("could not serialize the scan history: {}", err),
        }

        history
    }

    /// Remove all persisted scan records
    pub async fn clear(&self) -> Result<(), Error> {
        self.store.delete(SCAN_HISTORY_KEY).await
    }
}
