//! Notification wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    General,
    ReservationUpdate,
    PaymentSuccess,
    Cancellation,
    Chat,
    /// Catch-all for kinds this client does not know about
    #[serde(other)]
    Unknown,
}

/// A notification as returned by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(alias = "_id")]
    pub id: String,

    /// Absent for broadcast notifications
    pub user_id: Option<String>,

    pub title: String,

    pub message: String,

    #[serde(rename = "type")]
    pub kind: NotificationKind,

    pub is_read: bool,

    pub created_at: DateTime<Utc>,

    /// Optional in-app destination
    pub link: Option<String>,
}
