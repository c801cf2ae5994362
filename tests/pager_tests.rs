use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use resort_rust::auth::{Session, User, UserRole};
use resort_rust::config::ClientOptions;
use resort_rust::error::Error;
use resort_rust::notifications::{ExhaustionPolicy, PageOutcome, PAGE_SIZE};
use resort_rust::Resort;

fn veronica() -> User {
    User {
        id: "663a1b2c".to_string(),
        username: "veronica".to_string(),
        email: "veronica@example.com".to_string(),
        role: UserRole::User,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn log_in(resort: &Resort) {
    resort.auth().set_session(Session {
        access_token: "issued_token".to_string(),
        user: veronica(),
    });
}

/// A full page of notifications with ids unique per page
fn page_of(page: u32, count: usize) -> serde_json::Value {
    let items: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            json!({
                "id": format!("n-{}-{}", page, i),
                "user_id": "663a1b2c",
                "title": "Booking Confirmed!",
                "message": "Your booking has been confirmed.",
                "type": "reservation_update",
                "is_read": false,
                "created_at": "2025-07-28T08:00:00Z",
                "link": null
            })
        })
        .collect();
    json!(items)
}

async fn mount_page(server: &MockServer, page: u32, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/notifications/"))
        .and(query_param("page", page.to_string()))
        .and(query_param("limit", PAGE_SIZE.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn pages_accumulate_until_an_empty_page_exhausts_the_list() {
    let mock_server = MockServer::start().await;
    for page in 1..=3 {
        mount_page(&mock_server, page, page_of(page, 15)).await;
    }
    mount_page(&mock_server, 4, json!([])).await;

    let resort = Resort::new(&mock_server.uri()).unwrap();
    log_in(&resort);
    let pager = resort.notifications().pager();

    pager.load_initial().await.unwrap();
    assert_eq!(pager.len(), 15);
    assert!(!pager.is_exhausted());

    assert_eq!(pager.load_more().await.unwrap(), PageOutcome::Loaded(15));
    assert_eq!(pager.load_more().await.unwrap(), PageOutcome::Loaded(15));
    assert_eq!(pager.load_more().await.unwrap(), PageOutcome::Empty);

    assert_eq!(pager.len(), 45);
    assert!(pager.is_exhausted());

    // Exhausted: a further call is a no-op and the list is unchanged
    assert_eq!(pager.load_more().await.unwrap(), PageOutcome::Skipped);
    assert_eq!(pager.len(), 45);

    // Prior order is preserved, new items land after old ones
    let items = pager.items();
    assert_eq!(items[0].id, "n-1-0");
    assert_eq!(items[44].id, "n-3-14");
}

#[tokio::test]
async fn overlapping_load_more_calls_issue_one_request() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, page_of(1, 15)).await;

    Mock::given(method("GET"))
        .and(path("/notifications/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_of(2, 15)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resort = Resort::new(&mock_server.uri()).unwrap();
    log_in(&resort);
    let pager = resort.notifications().pager();
    pager.load_initial().await.unwrap();

    // The in-flight check runs before the first await, so the second call
    // sees the first one and skips
    let (first, second) = tokio::join!(pager.load_more(), pager.load_more());
    assert_eq!(first.unwrap(), PageOutcome::Loaded(15));
    assert_eq!(second.unwrap(), PageOutcome::Skipped);
    assert_eq!(pager.len(), 30);
}

#[tokio::test]
async fn an_empty_first_page_exhausts_immediately() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, json!([])).await;

    Mock::given(method("GET"))
        .and(path("/notifications/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let resort = Resort::new(&mock_server.uri()).unwrap();
    log_in(&resort);
    let pager = resort.notifications().pager();

    pager.load_initial().await.unwrap();
    assert!(pager.is_empty());
    assert!(pager.is_exhausted());

    assert_eq!(pager.load_more().await.unwrap(), PageOutcome::Skipped);
}

#[tokio::test]
async fn load_initial_resets_an_exhausted_pager() {
    let mock_server = MockServer::start().await;

    // First pass: page 1 is empty; second pass: page 1 has items
    Mock::given(method("GET"))
        .and(path("/notifications/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, 1, page_of(1, 15)).await;

    let resort = Resort::new(&mock_server.uri()).unwrap();
    log_in(&resort);
    let pager = resort.notifications().pager();

    pager.load_initial().await.unwrap();
    assert!(pager.is_exhausted());

    pager.load_initial().await.unwrap();
    assert_eq!(pager.len(), 15);
    assert!(!pager.is_exhausted());
}

#[tokio::test]
async fn always_retry_policy_refetches_the_same_page_after_an_empty_result() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, page_of(1, 15)).await;

    // Page 2 is transiently empty, then carries items
    Mock::given(method("GET"))
        .and(path("/notifications/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, 2, page_of(2, 15)).await;

    let resort = Resort::new_with_options(
        &mock_server.uri(),
        ClientOptions::default().with_exhaustion_policy(ExhaustionPolicy::AlwaysRetry),
    )
    .unwrap();
    log_in(&resort);
    let pager = resort.notifications().pager();

    pager.load_initial().await.unwrap();

    assert_eq!(pager.load_more().await.unwrap(), PageOutcome::Empty);
    assert!(!pager.is_exhausted());

    assert_eq!(pager.load_more().await.unwrap(), PageOutcome::Loaded(15));
    assert_eq!(pager.len(), 30);
}

#[tokio::test]
async fn a_failed_fetch_leaves_the_pager_usable() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, 1, page_of(1, 15)).await;

    Mock::given(method("GET"))
        .and(path("/notifications/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, 2, page_of(2, 15)).await;

    let resort = Resort::new(&mock_server.uri()).unwrap();
    log_in(&resort);
    let pager = resort.notifications().pager();
    pager.load_initial().await.unwrap();

    let result = pager.load_more().await;
    assert!(matches!(result, Err(Error::Api { .. })));
    assert_eq!(pager.len(), 15);
    assert!(!pager.is_exhausted());

    // A manual retry succeeds
    assert_eq!(pager.load_more().await.unwrap(), PageOutcome::Loaded(15));
    assert_eq!(pager.len(), 30);
}

#[tokio::test]
async fn fetching_notifications_requires_a_session() {
    let mock_server = MockServer::start().await;

    let resort = Resort::new(&mock_server.uri()).unwrap();
    let pager = resort.notifications().pager();

    let result = pager.load_initial().await;
    assert!(matches!(result, Err(Error::Auth(_))));
}
