use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use resort_rust::auth::{Session, User, UserRole};
use resort_rust::error::Error;
use resort_rust::reservations::{PaymentStatus, ReservationStatus};
use resort_rust::Resort;

fn logged_in_client(uri: &str) -> Resort {
    let resort = Resort::new(uri).unwrap();
    resort.auth().set_session(Session {
        access_token: "issued_token".to_string(),
        user: User {
            id: "663a1b2c".to_string(),
            username: "veronica".to_string(),
            email: "veronica@example.com".to_string(),
            role: UserRole::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        },
    });
    resort
}

#[tokio::test]
async fn list_mine_returns_the_callers_reservations() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reservations/"))
        .and(header("Authorization", "Bearer issued_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "_id": "r-1",
                "status": "confirmed",
                "payment_status": "downpayment_paid",
                "downpayment_required": 500.0,
                "reservation_date": "2025-07-30T00:00:00Z",
                "shift_type": "day",
                "number_of_guests": 4,
                "total_price": 2500.0
            },
            {
                "id": "r-2",
                "status": "pending",
                "payment_status": "store_credit",
                "downpayment_required": 300.0,
                "reservation_date": "2025-08-02T00:00:00Z",
                "shift_type": "night",
                "number_of_guests": 2,
                "total_price": 1200.0
            }
        ])))
        .mount(&mock_server)
        .await;

    let resort = logged_in_client(&mock_server.uri());

    let reservations = resort.reservations().list_mine().await.unwrap();

    assert_eq!(reservations.len(), 2);
    assert_eq!(reservations[0].id, "r-1");
    assert_eq!(reservations[0].status, ReservationStatus::Confirmed);
    // Unknown payment states degrade to the catch-all instead of failing
    assert_eq!(reservations[1].payment_status, PaymentStatus::Other);
}

#[tokio::test]
async fn list_mine_requires_a_session() {
    let mock_server = MockServer::start().await;

    let resort = Resort::new(&mock_server.uri()).unwrap();

    let result = resort.reservations().list_mine().await;
    assert!(matches!(result, Err(Error::Auth(_))));
}

#[tokio::test]
async fn feature_flags_are_fetched_once_and_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reservations/options/features"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "food_ordering_enabled": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resort = Resort::new(&mock_server.uri()).unwrap();

    let flags = resort.features().get().await;
    assert!(flags.food_ordering_enabled);

    // The second read is served from the cache
    let again = resort.features().get().await;
    assert!(again.food_ordering_enabled);
}

#[tokio::test]
async fn feature_flags_fall_back_to_disabled_on_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reservations/options/features"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resort = Resort::new(&mock_server.uri()).unwrap();

    let flags = resort.features().get().await;
    assert!(!flags.food_ordering_enabled);

    // The failure is cached like any other result; no second fetch
    let again = resort.features().get().await;
    assert!(!again.food_ordering_enabled);
}

#[test]
fn from_env_requires_the_base_address() {
    std::env::remove_var("RESORT_API_URL");
    std::env::remove_var("RESORT_ADMIN_API_KEY");

    let result = Resort::from_env();
    assert!(matches!(result, Err(Error::Config(_))));

    std::env::set_var("RESORT_API_URL", "http://localhost:8000");
    std::env::set_var("RESORT_ADMIN_API_KEY", "env_admin_key");

    let resort = Resort::from_env();
    assert!(resort.is_ok());

    std::env::remove_var("RESORT_API_URL");
    std::env::remove_var("RESORT_ADMIN_API_KEY");
}
