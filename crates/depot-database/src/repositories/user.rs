//! User repository implementation.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use depot_core::error::{AppError, ErrorKind, ValidationReason};
use depot_core::result::AppResult;
use depot_core::types::UserId;
use depot_entity::user::{CreateUser, User};

use crate::connection::{DatabasePool, db_error, is_unique_violation};

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = row
            .id
            .parse()
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Corrupt user id", e))?;
        Ok(Self {
            id,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabasePool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let row = self
            .db
            .run(async {
                sqlx::query_as::<_, UserRow>(
                    "SELECT id, email, password_hash, created_at FROM users WHERE id = ?",
                )
                .bind(id.to_string())
                .fetch_optional(self.db.pool())
                .await
                .map_err(db_error("Failed to find user"))
            })
            .await?;
        row.map(User::try_from).transpose()
    }

    /// Find a user by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = self
            .db
            .run(async {
                sqlx::query_as::<_, UserRow>(
                    "SELECT id, email, password_hash, created_at FROM users WHERE email = ?",
                )
                .bind(email)
                .fetch_optional(self.db.pool())
                .await
                .map_err(db_error("Failed to find user by email"))
            })
            .await?;
        row.map(User::try_from).transpose()
    }

    /// Insert a new user. A taken email is reported as `AlreadyExists`.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let row = self
            .db
            .run(async {
                sqlx::query_as::<_, UserRow>(
                    "INSERT INTO users (id, email, password_hash, created_at) VALUES (?, ?, ?, ?) \
                     RETURNING id, email, password_hash, created_at",
                )
                .bind(UserId::new().to_string())
                .bind(&data.email)
                .bind(&data.password_hash)
                .bind(Utc::now())
                .fetch_one(self.db.pool())
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        AppError::validation(ValidationReason::AlreadyExists)
                    } else {
                        db_error("Failed to create user")(e)
                    }
                })
            })
            .await?;
        User::try_from(row)
    }

    /// Count all users.
    pub async fn count(&self) -> AppResult<u64> {
        let total: i64 = self
            .db
            .run(async {
                sqlx::query_scalar("SELECT COUNT(*) FROM users")
                    .fetch_one(self.db.pool())
                    .await
                    .map_err(db_error("Failed to count users"))
            })
            .await?;
        Ok(total as u64)
    }
}
