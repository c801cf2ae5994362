//! In-memory session state

use serde::{Deserialize, Serialize};

use super::types::User;

/// An authenticated session: a validated bearer token plus the identity it
/// resolves to.
///
/// A `Session` is only constructed after the token has been accepted by the
/// identity endpoint, so holding one implies both parts are present and
/// consistent. A stored token alone is not enough to be authenticated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The bearer token attached to authenticated requests
    pub access_token: String,

    /// The identity the token resolved to
    pub user: User,
}
