//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context for the current authenticated request.
///
/// Built by the HTTP layer from a verified bearer token and passed into
/// service methods so every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Subject of the identity token.
    pub user_id: String,
    /// Email claim, when the identity provider sent one.
    pub email: Option<String>,
    /// Whether the caller is the configured demo account.
    pub is_demo: bool,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: impl Into<String>, email: Option<String>, is_demo: bool) -> Self {
        Self {
            user_id: user_id.into(),
            email,
            is_demo,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the caller owns a resource.
    pub fn owns(&self, owner_id: &str) -> bool {
        self.user_id == owner_id
    }
}
