//! File node operations: create, lookup, listing, visibility, and content.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, info, warn};
use uuid::Uuid;

use depot_auth::can_read;
use depot_core::error::{AppError, ValidationReason};
use depot_core::result::AppResult;
use depot_core::traits::scheduler::DerivativeScheduler;
use depot_core::traits::storage::StorageProvider;
use depot_core::types::{FileId, PageRequest, ParentRef, RawParent, UserId};
use depot_database::FileRepository;
use depot_entity::file::{CreateFileNode, FileNode, FileType};
use depot_storage::derivative_path;

use crate::context::RequestContext;

/// A node creation request as received from a caller, before validation.
#[derive(Debug, Clone, Default)]
pub struct CreateFileRequest {
    /// Display name.
    pub name: Option<String>,
    /// One of `folder`, `file`, `image`.
    pub file_type: Option<String>,
    /// Target folder; root when absent.
    pub parent_id: RawParent,
    /// Initial visibility.
    pub is_public: bool,
    /// Content for non-folders.
    pub data: Option<Bytes>,
}

/// Bytes of a node (or one of its derivatives) and the node they belong to.
#[derive(Debug, Clone)]
pub struct FileContent {
    /// The node whose content was read.
    pub node: FileNode,
    /// Raw content.
    pub data: Bytes,
}

/// Owns file node metadata and the bytes behind it.
#[derive(Debug, Clone)]
pub struct FileService {
    files: FileRepository,
    storage: Arc<dyn StorageProvider>,
    scheduler: Arc<dyn DerivativeScheduler>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        files: FileRepository,
        storage: Arc<dyn StorageProvider>,
        scheduler: Arc<dyn DerivativeScheduler>,
    ) -> Self {
        Self {
            files,
            storage,
            scheduler,
        }
    }

    /// Create a folder, file, or image owned by the caller.
    ///
    /// Validation runs in a fixed order and stops at the first failure:
    /// name, type, data (non-folders), then parent. Bytes are written before
    /// the metadata so a visible node always has complete content. Images
    /// are handed to the derivative scheduler without waiting for it.
    pub async fn create(&self, ctx: &RequestContext, req: CreateFileRequest) -> AppResult<FileNode> {
        let name = req
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::validation(ValidationReason::MissingName))?;
        let file_type: FileType = req
            .file_type
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::validation(ValidationReason::MissingType))?
            .parse()
            .map_err(|_| AppError::validation(ValidationReason::UnrecognizedType))?;
        let data = if file_type.has_content() {
            Some(
                req.data
                    .filter(|d| !d.is_empty())
                    .ok_or_else(|| AppError::validation(ValidationReason::MissingData))?,
            )
        } else {
            None
        };
        let parent_id = self.validate_parent(&req.parent_id).await?;

        let id = FileId::new();
        let local_path = match data {
            Some(bytes) => {
                let key = Uuid::new_v4().to_string();
                self.storage.write(&key, bytes).await?;
                Some(key)
            }
            None => None,
        };

        let node = match self
            .files
            .create(&CreateFileNode {
                id,
                user_id: ctx.user_id,
                name,
                file_type,
                is_public: req.is_public,
                parent_id,
                local_path: local_path.clone(),
            })
            .await
        {
            Ok(node) => node,
            Err(e) => {
                if let Some(key) = &local_path {
                    if let Err(cleanup) = self.storage.delete(key).await {
                        warn!(error = %cleanup, key = %key, "Failed to remove orphaned upload");
                    }
                }
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            file_id = %node.id,
            file_type = %node.file_type,
            "File node created"
        );

        if node.file_type == FileType::Image {
            if let Err(e) = self.scheduler.schedule(node.id, node.user_id).await {
                error!(file_id = %node.id, error = %e, "Failed to enqueue derivative generation");
            }
        }

        Ok(node)
    }

    /// Resolve a non-root parent to an existing folder.
    async fn validate_parent(&self, raw: &RawParent) -> AppResult<ParentRef> {
        let id = match raw {
            RawParent::Root => return Ok(ParentRef::Root),
            RawParent::Malformed(value) => {
                return Err(AppError::parent_not_found(format!(
                    "Malformed parent id: {value}"
                )));
            }
            RawParent::Id(id) => *id,
        };
        match self.files.find_by_id(id).await? {
            None => Err(AppError::parent_not_found(format!("Parent {id} not found"))),
            Some(parent) if !parent.is_folder() => Err(AppError::parent_not_folder(format!(
                "Parent {id} is a {}",
                parent.file_type
            ))),
            Some(_) => Ok(ParentRef::Folder(id)),
        }
    }

    /// Look up a node by raw id regardless of owner. Malformed ids miss.
    pub async fn get(&self, raw_id: &str) -> AppResult<Option<FileNode>> {
        match FileId::parse_lenient(raw_id) {
            Some(id) => self.files.find_by_id(id).await,
            None => Ok(None),
        }
    }

    /// Look up a node the caller owns. Anything else is `NotFound`.
    pub async fn get_owned(&self, ctx: &RequestContext, raw_id: &str) -> AppResult<FileNode> {
        let id = FileId::parse_lenient(raw_id).ok_or_else(|| AppError::not_found("Malformed id"))?;
        self.files
            .find_owned(id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// One page of the caller's nodes under `parent`, newest first.
    ///
    /// Unknown, malformed, and non-folder parents yield an empty page.
    pub async fn list_children(
        &self,
        ctx: &RequestContext,
        parent: &RawParent,
        page: PageRequest,
    ) -> AppResult<Vec<FileNode>> {
        let parent = match parent {
            RawParent::Root => ParentRef::Root,
            RawParent::Malformed(_) => return Ok(Vec::new()),
            RawParent::Id(id) => ParentRef::Folder(*id),
        };
        self.files.list_children(ctx.user_id, parent, page).await
    }

    /// Set the visibility of a node the caller owns. Idempotent.
    pub async fn set_visibility(
        &self,
        ctx: &RequestContext,
        raw_id: &str,
        is_public: bool,
    ) -> AppResult<FileNode> {
        let id = FileId::parse_lenient(raw_id).ok_or_else(|| AppError::not_found("Malformed id"))?;
        let node = self
            .files
            .set_public(id, ctx.user_id, is_public)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;
        info!(user_id = %ctx.user_id, file_id = %id, is_public, "File visibility changed");
        Ok(node)
    }

    /// Resolve the storage key to read for a node.
    ///
    /// Invisible nodes are `NotFound`; folders are `NotAFile`. A requested
    /// size must be a decimal integer and selects `<path>_<size>`; whether
    /// that derivative exists is only known once it is read.
    pub async fn resolve_content(
        &self,
        raw_id: &str,
        requester: Option<UserId>,
        size: Option<&str>,
    ) -> AppResult<(FileNode, String)> {
        let node = self
            .get(raw_id)
            .await?
            .filter(|node| can_read(node, requester))
            .ok_or_else(|| AppError::not_found(format!("File {raw_id} not visible")))?;

        if node.is_folder() {
            return Err(AppError::not_a_file(format!("{} is a folder", node.id)));
        }
        let base = node
            .local_path
            .clone()
            .ok_or_else(|| AppError::not_found(format!("{} has no stored content", node.id)))?;

        let path = match size.filter(|s| !s.is_empty()) {
            None => base,
            Some(raw) => {
                let width: u32 = raw
                    .parse()
                    .map_err(|_| AppError::not_found(format!("Unknown size: {raw}")))?;
                derivative_path(&base, width)
            }
        };
        Ok((node, path))
    }

    /// Read a node's content (or one of its derivatives).
    pub async fn read_content(
        &self,
        raw_id: &str,
        requester: Option<UserId>,
        size: Option<&str>,
    ) -> AppResult<FileContent> {
        let (node, path) = self.resolve_content(raw_id, requester, size).await?;
        let data = self.storage.read_bytes(&path).await?;
        Ok(FileContent { node, data })
    }

    /// Number of stored nodes.
    pub async fn count(&self) -> AppResult<u64> {
        self.files.count().await
    }
}
