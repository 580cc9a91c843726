//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};

use depot_core::types::UserId;
use depot_entity::user::User;

/// Context for the current authenticated request.
///
/// Built once the access controller has resolved the session token and
/// passed into service methods so that every operation knows who is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The authenticated user's email.
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for an authenticated user.
    pub fn new(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            request_time: Utc::now(),
        }
    }
}
