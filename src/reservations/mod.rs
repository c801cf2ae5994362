//! Guest reservations

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::Auth;
use crate::error::Error;
use crate::fetch::Fetch;

/// Lifecycle state of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Expired,
}

impl ReservationStatus {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Expired => "expired",
        }
    }
}

/// Payment state of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    DownpaymentPending,
    DownpaymentPaid,
    Paid,
    Refunded,
    Cancelled,
    Expired,
    /// Catch-all for states this client does not know about
    #[serde(other)]
    Other,
}

/// A reservation as returned by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// The reservation ID; the backend serves this as either `id` or `_id`
    #[serde(alias = "_id")]
    pub id: String,

    pub status: ReservationStatus,

    pub payment_status: PaymentStatus,

    pub downpayment_required: f64,

    pub reservation_date: DateTime<Utc>,

    /// Which part of the day the reservation covers, e.g. day or night shift
    pub shift_type: String,

    pub number_of_guests: u32,

    pub total_price: f64,
}

/// Client for the guest reservations endpoint
#[derive(Clone)]
pub struct ReservationsClient {
    url: String,
    client: Client,
    auth: Arc<Auth>,
}

impl ReservationsClient {
    /// Create a new reservations client
    pub(crate) fn new(url: &str, client: Client, auth: Arc<Auth>) -> Self {
        Self {
            url: url.to_string(),
            client,
            auth,
        }
    }

    /// Fetch all reservations of the currently authenticated user
    pub async fn list_mine(&self) -> Result<Vec<Reservation>, Error> {
        let token = self
            .auth
            .access_token()
            .ok_or_else(|| Error::auth("not logged in"))?;

        let url = format!("{}/reservations/", self.url);

        Fetch::get(&self.client, &url)
            .bearer_auth(&token)
            .execute()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_payment_status_falls_back_to_other() {
        let raw = serde_json::json!({
            "_id": "r-1",
            "status": "confirmed",
            "payment_status": "partially_refunded",
            "downpayment_required": 500.0,
            "reservation_date": "2025-07-30T00:00:00Z",
            "shift_type": "day",
            "number_of_guests": 4,
            "total_price": 2500.0
        });

        let reservation: Reservation = serde_json::from_value(raw).unwrap();
        assert_eq!(reservation.id, "r-1");
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.payment_status, PaymentStatus::Other);
    }
}
