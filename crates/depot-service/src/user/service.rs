//! User registration and credential checks.

use tracing::info;

use depot_auth::PasswordHasher;
use depot_core::error::{AppError, ErrorKind, ValidationReason};
use depot_core::result::AppResult;
use depot_core::types::UserId;
use depot_database::UserRepository;
use depot_entity::user::{CreateUser, User, UserProfile};

/// Manages user accounts.
#[derive(Debug, Clone)]
pub struct UserService {
    users: UserRepository,
    hasher: PasswordHasher,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: UserRepository) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
        }
    }

    /// Register a new account.
    ///
    /// Checks run in order: email present, password present, email not
    /// already taken.
    pub async fn register(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> AppResult<UserProfile> {
        let email = email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::validation(ValidationReason::MissingEmail))?;
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::validation(ValidationReason::MissingPassword))?;

        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::validation(ValidationReason::AlreadyExists));
        }

        let hasher = self.hasher.clone();
        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Hashing task panicked", e))??;

        let user = self
            .users
            .create(&CreateUser {
                email: email.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user.profile())
    }

    /// Check an email/password pair. Any mismatch is `Unauthorized`.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Unknown email"))?;

        let hasher = self.hasher.clone();
        let password = password.to_string();
        let stored = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || hasher.verify_password(&password, &stored))
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Internal, "Verification task panicked", e)
                })??;

        if matches {
            Ok(user)
        } else {
            Err(AppError::unauthorized("Wrong password"))
        }
    }

    /// Public profile of a user.
    pub async fn profile(&self, user_id: UserId) -> AppResult<UserProfile> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(|u| u.profile())
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Number of registered users.
    pub async fn count(&self) -> AppResult<u64> {
        self.users.count().await
    }
}
