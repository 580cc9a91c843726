//! Credential login and logout.

use tracing::info;

use depot_auth::AccessController;
use depot_core::result::AppResult;

use crate::user::UserService;

/// Exchanges credentials for session tokens and revokes them.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: UserService,
    access: AccessController,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(users: UserService, access: AccessController) -> Self {
        Self { users, access }
    }

    /// Verify credentials and open a new session. Returns the token.
    pub async fn connect(&self, email: &str, password: &str) -> AppResult<String> {
        let user = self.users.verify_credentials(email, password).await?;
        let token = self.access.sessions().create_session(user.id).await?;
        info!(user_id = %user.id, "User connected");
        Ok(token)
    }

    /// Close the session behind `token`. The token must currently
    /// authenticate; otherwise this is `Unauthorized`.
    pub async fn disconnect(&self, token: Option<&str>) -> AppResult<()> {
        let user = self.access.authenticate(token).await?;
        self.access
            .sessions()
            .destroy_session(token.unwrap_or_default())
            .await?;
        info!(user_id = %user.id, "User disconnected");
        Ok(())
    }
}
