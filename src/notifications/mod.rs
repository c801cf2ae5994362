//! Paginated notification fetching
//!
//! The server is the sole authority on ordering and on what constitutes a
//! page; the pager only grows a local list as the user scrolls.

mod types;

use reqwest::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::auth::Auth;
use crate::error::Error;
use crate::fetch::Fetch;

pub use types::{Notification, NotificationKind};

/// Items requested per page
pub const PAGE_SIZE: u32 = 15;

/// What an empty page means for subsequent fetches
///
/// The backend gives no way to distinguish "past the last page" from a
/// transiently empty result, so the policy is a client-side choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExhaustionPolicy {
    /// An empty page marks the list exhausted until the next
    /// [`NotificationPager::load_initial`]
    #[default]
    StopAtFirstEmpty,
    /// An empty page is treated as transient and the same page number is
    /// retried on the next [`NotificationPager::load_more`]
    AlwaysRetry,
}

/// Outcome of a pager call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// A non-empty page was appended
    Loaded(usize),
    /// The requested page came back empty
    Empty,
    /// Nothing was done: a fetch was in flight or the list is exhausted
    Skipped,
}

/// Client for the notifications endpoint
#[derive(Clone)]
pub struct NotificationsClient {
    url: String,
    client: Client,
    auth: Arc<Auth>,
    policy: ExhaustionPolicy,
}

impl NotificationsClient {
    /// Create a new notifications client
    pub(crate) fn new(
        url: &str,
        client: Client,
        auth: Arc<Auth>,
        policy: ExhaustionPolicy,
    ) -> Self {
        Self {
            url: url.to_string(),
            client,
            auth,
            policy,
        }
    }

    /// Fetch one page of notifications for the current user
    pub async fn page(&self, page: u32, limit: u32) -> Result<Vec<Notification>, Error> {
        let token = self
            .auth
            .access_token()
            .ok_or_else(|| Error::auth("not logged in"))?;

        let url = format!("{}/notifications/", self.url);
        let mut params = HashMap::new();
        params.insert("page".to_string(), page.to_string());
        params.insert("limit".to_string(), limit.to_string());

        Fetch::get(&self.client, &url)
            .bearer_auth(&token)
            .query(params)
            .execute()
            .await
    }

    /// Create a pager over this client
    pub fn pager(&self) -> NotificationPager {
        NotificationPager::new(self.clone())
    }
}

struct PagerState {
    items: Vec<Notification>,
    next_page: u32,
    exhausted: bool,
    in_flight: bool,
}

/// Incrementally grows a notification list with page-numbered fetches
pub struct NotificationPager {
    client: NotificationsClient,
    state: Mutex<PagerState>,
}

impl NotificationPager {
    fn new(client: NotificationsClient) -> Self {
        Self {
            client,
            state: Mutex::new(PagerState {
                items: Vec::new(),
                next_page: 1,
                exhausted: false,
                in_flight: false,
            }),
        }
    }

    /// Fetch page 1 and replace the entire list, resetting the pager
    ///
    /// Runs regardless of the current pager state. An empty first page marks
    /// the list exhausted immediately. On error the list is left unchanged.
    pub async fn load_initial(&self) -> Result<(), Error> {
        self.state.lock().unwrap().in_flight = true;

        let outcome = self.client.page(1, PAGE_SIZE).await;

        let mut state = self.state.lock().unwrap();
        state.in_flight = false;

        let items = outcome?;
        state.exhausted = items.is_empty();
        state.items = items;
        state.next_page = 2;
        Ok(())
    }

    /// Fetch the next page and append it
    ///
    /// A no-op while a fetch is in flight or after exhaustion; the in-flight
    /// check happens before the first await, so two back-to-back calls issue
    /// exactly one request. The page number only advances on a non-empty
    /// response; what an empty response means is decided by the
    /// [`ExhaustionPolicy`].
    pub async fn load_more(&self) -> Result<PageOutcome, Error> {
        let page = {
            let mut state = self.state.lock().unwrap();
            if state.in_flight || state.exhausted {
                return Ok(PageOutcome::Skipped);
            }
            state.in_flight = true;
            state.next_page
        };

        let outcome = self.client.page(page, PAGE_SIZE).await;

        let mut state = self.state.lock().unwrap();
        state.in_flight = false;

        match outcome {
            Ok(items) if items.is_empty() => {
                if self.client.policy == ExhaustionPolicy::StopAtFirstEmpty {
                    state.exhausted = true;
                }
                Ok(PageOutcome::Empty)
            }
            Ok(items) => {
                let count = items.len();
                state.items.extend(items);
                state.next_page += 1;
                Ok(PageOutcome::Loaded(count))
            }
            Err(err) => Err(err),
        }
    }

    /// Snapshot of the accumulated notifications, in server order
    pub fn items(&self) -> Vec<Notification> {
        self.state.lock().unwrap().items.clone()
    }

    /// Number of accumulated notifications
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().items.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.state.lock().unwrap().items.is_empty()
    }

    /// Whether the pager has reached the end of the list
    pub fn is_exhausted(&self) -> bool {
        self.state.lock().unwrap().exhausted
    }
}
