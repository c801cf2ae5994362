//! Admin wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Simplified user information nested in admin responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Detailed reservation response for admin QR code verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrVerification {
    pub id: String,

    pub status: String,

    pub reservation_date: DateTime<Utc>,

    pub shift_type: String,

    pub number_of_guests: u32,

    pub total_price: f64,

    pub payment_status: String,

    /// The guest the reservation belongs to, when the backend resolves one
    #[serde(default)]
    pub user: Option<AdminUser>,
}

/// One entry of the persisted scan history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    pub success: bool,

    /// The verification result, for successful scans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification: Option<QrVerification>,

    /// What went wrong, for failed scans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// The raw QR payload of a failed scan, kept for manual follow-up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_data: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl ScanRecord {
    /// Record a successful verification
    pub fn success(verification: QrVerification) -> Self {
        Self {
            success: true,
            verification: Some(verification),
            error: None,
            qr_data: None,
            timestamp: Utc::now(),
        }
    }

    /// Record a failed verification
    pub fn failure(error: &str, qr_data: &str) -> Self {
        Self {
            success: false,
            verification: None,
            error: Some(error.to_string()),
            qr_data: Some(qr_data.to_string()),
            timestamp: Utc::now(),
        }
    }
}
