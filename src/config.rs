//! Configuration options for the resort client

use std::time::Duration;

use crate::notifications::ExhaustionPolicy;

/// Configuration options for the resort client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Timeout applied to every outbound request
    pub request_timeout: Option<Duration>,

    /// Static API key for the admin surface
    pub admin_api_key: Option<String>,

    /// What an empty notification page means for subsequent fetches
    pub exhaustion_policy: ExhaustionPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            admin_api_key: None,
            exhaustion_policy: ExhaustionPolicy::default(),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the admin API key
    pub fn with_admin_api_key(mut self, value: Option<String>) -> Self {
        self.admin_api_key = value;
        self
    }

    /// Set the notification pager exhaustion policy
    pub fn with_exhaustion_policy(mut self, value: ExhaustionPolicy) -> Self {
        self.exhaustion_policy = value;
        self
    }
}
