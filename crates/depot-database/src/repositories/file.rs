//! File node repository implementation.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use depot_core::error::{AppError, ErrorKind};
use depot_core::result::AppResult;
use depot_core::types::{FileId, PageRequest, ParentRef, UserId};
use depot_entity::file::{CreateFileNode, FileNode, FileType};

use crate::connection::{DatabasePool, db_error};

const COLUMNS: &str =
    "id, user_id, name, type AS file_type, is_public, parent_id, local_path, created_at";

#[derive(Debug, FromRow)]
struct FileRow {
    id: String,
    user_id: String,
    name: String,
    file_type: String,
    is_public: bool,
    parent_id: String,
    local_path: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<FileRow> for FileNode {
    type Error = AppError;

    fn try_from(row: FileRow) -> Result<Self, Self::Error> {
        let id = row
            .id
            .parse()
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Corrupt file id", e))?;
        let user_id = row
            .user_id
            .parse()
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Corrupt owner id", e))?;
        let file_type: FileType = row
            .file_type
            .parse()
            .map_err(|e: String| AppError::database(e))?;
        let parent_id = ParentRef::from_storage(&row.parent_id)
            .ok_or_else(|| AppError::database(format!("Corrupt parent id: {}", row.parent_id)))?;
        Ok(Self {
            id,
            user_id,
            name: row.name,
            file_type,
            is_public: row.is_public,
            parent_id,
            local_path: row.local_path,
            created_at: row.created_at,
        })
    }
}

/// Repository for file node metadata.
///
/// Ownership filters live in the SQL so that a node owned by someone else
/// is indistinguishable from an absent one.
#[derive(Debug, Clone)]
pub struct FileRepository {
    db: DatabasePool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }

    /// Find a node by ID regardless of owner.
    pub async fn find_by_id(&self, id: FileId) -> AppResult<Option<FileNode>> {
        let sql = format!("SELECT {COLUMNS} FROM files WHERE id = ?");
        let row = self
            .db
            .run(async {
                sqlx::query_as::<_, FileRow>(&sql)
                    .bind(id.to_string())
                    .fetch_optional(self.db.pool())
                    .await
                    .map_err(db_error("Failed to find file"))
            })
            .await?;
        row.map(FileNode::try_from).transpose()
    }

    /// Find a node by ID only if `owner` owns it.
    pub async fn find_owned(&self, id: FileId, owner: UserId) -> AppResult<Option<FileNode>> {
        let sql = format!("SELECT {COLUMNS} FROM files WHERE id = ? AND user_id = ?");
        let row = self
            .db
            .run(async {
                sqlx::query_as::<_, FileRow>(&sql)
                    .bind(id.to_string())
                    .bind(owner.to_string())
                    .fetch_optional(self.db.pool())
                    .await
                    .map_err(db_error("Failed to find owned file"))
            })
            .await?;
        row.map(FileNode::try_from).transpose()
    }

    /// List one page of `owner`'s nodes under `parent`, newest first.
    pub async fn list_children(
        &self,
        owner: UserId,
        parent: ParentRef,
        page: PageRequest,
    ) -> AppResult<Vec<FileNode>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM files WHERE user_id = ? AND parent_id = ? \
             ORDER BY seq DESC LIMIT ? OFFSET ?"
        );
        let rows = self
            .db
            .run(async {
                sqlx::query_as::<_, FileRow>(&sql)
                    .bind(owner.to_string())
                    .bind(parent.to_storage())
                    .bind(page.limit() as i64)
                    .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
                    .fetch_all(self.db.pool())
                    .await
                    .map_err(db_error("Failed to list files"))
            })
            .await?;
        rows.into_iter().map(FileNode::try_from).collect()
    }

    /// Insert a new node.
    pub async fn create(&self, data: &CreateFileNode) -> AppResult<FileNode> {
        let sql = format!(
            "INSERT INTO files (id, user_id, name, type, is_public, parent_id, local_path, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        );
        let row = self
            .db
            .run(async {
                sqlx::query_as::<_, FileRow>(&sql)
                    .bind(data.id.to_string())
                    .bind(data.user_id.to_string())
                    .bind(&data.name)
                    .bind(data.file_type.as_str())
                    .bind(data.is_public)
                    .bind(data.parent_id.to_storage())
                    .bind(&data.local_path)
                    .bind(Utc::now())
                    .fetch_one(self.db.pool())
                    .await
                    .map_err(db_error("Failed to create file"))
            })
            .await?;
        FileNode::try_from(row)
    }

    /// Set the visibility flag of a node owned by `owner`. Returns the
    /// updated node, or `None` if `owner` has no such node.
    pub async fn set_public(
        &self,
        id: FileId,
        owner: UserId,
        is_public: bool,
    ) -> AppResult<Option<FileNode>> {
        let sql =
            format!("UPDATE files SET is_public = ? WHERE id = ? AND user_id = ? RETURNING {COLUMNS}");
        let row = self
            .db
            .run(async {
                sqlx::query_as::<_, FileRow>(&sql)
                    .bind(is_public)
                    .bind(id.to_string())
                    .bind(owner.to_string())
                    .fetch_optional(self.db.pool())
                    .await
                    .map_err(db_error("Failed to update file visibility"))
            })
            .await?;
        row.map(FileNode::try_from).transpose()
    }

    /// Count all nodes.
    pub async fn count(&self) -> AppResult<u64> {
        let total: i64 = self
            .db
            .run(async {
                sqlx::query_scalar("SELECT COUNT(*) FROM files")
                    .fetch_one(self.db.pool())
                    .await
                    .map_err(db_error("Failed to count files"))
            })
            .await?;
        Ok(total as u64)
    }
}
