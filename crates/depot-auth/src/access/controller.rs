//! Resolves request tokens to users.

use tracing::debug;

use depot_core::error::AppError;
use depot_core::result::AppResult;
use depot_core::types::UserId;
use depot_database::UserRepository;
use depot_entity::user::User;

use crate::session::SessionStore;

/// Gatekeeper in front of every authenticated operation.
#[derive(Debug, Clone)]
pub struct AccessController {
    sessions: SessionStore,
    users: UserRepository,
}

impl AccessController {
    /// Creates a new access controller.
    pub fn new(sessions: SessionStore, users: UserRepository) -> Self {
        Self { sessions, users }
    }

    /// Resolve a token to an existing user.
    ///
    /// A missing token, an unknown or expired token, and a token whose user
    /// no longer exists all fail with `Unauthorized`. An unreachable session
    /// store fails with `StoreUnavailable`, never `Unauthorized`.
    pub async fn authenticate(&self, token: Option<&str>) -> AppResult<User> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized("Missing session token"))?;
        let user_id = self
            .sessions
            .resolve_session(token)
            .await?
            .ok_or_else(|| AppError::unauthorized("Unknown or expired session token"))?;
        match self.users.find_by_id(user_id).await? {
            Some(user) => Ok(user),
            None => {
                debug!(user_id = %user_id, "Session refers to a missing user");
                Err(AppError::unauthorized("Session user no longer exists"))
            }
        }
    }

    /// Resolve a token for operations that also serve anonymous callers.
    ///
    /// Anything that does not authenticate is treated as anonymous.
    /// Store failures still propagate.
    pub async fn optional_user(&self, token: Option<&str>) -> AppResult<Option<UserId>> {
        match token.filter(|t| !t.is_empty()) {
            None => Ok(None),
            Some(_) => match self.authenticate(token).await {
                Ok(user) => Ok(Some(user.id)),
                Err(e) if e.kind == depot_core::ErrorKind::Unauthorized => Ok(None),
                Err(e) => Err(e),
            },
        }
    }

    /// The session store behind this controller.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
