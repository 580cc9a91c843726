//! File node entity model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use depot_core::types::{FileId, ParentRef, UserId};

/// The three kinds of node in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// A container; has children, never content.
    Folder,
    /// Opaque bytes.
    File,
    /// Bytes that also get resized derivatives.
    Image,
}

impl FileType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
            Self::Image => "image",
        }
    }

    /// Whether nodes of this type carry stored bytes.
    pub fn has_content(&self) -> bool {
        !matches!(self, Self::Folder)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "folder" => Ok(Self::Folder),
            "file" => Ok(Self::File),
            "image" => Ok(Self::Image),
            other => Err(format!("unrecognized file type: {other}")),
        }
    }
}

/// A folder, file, or image in a user's hierarchy.
///
/// Serializes to the external shape
/// `{id, userId, name, type, isPublic, parentId}`; the storage path stays
/// internal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    /// Unique node identifier.
    pub id: FileId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Node kind.
    #[serde(rename = "type")]
    pub file_type: FileType,
    /// Whether anyone may read the content.
    pub is_public: bool,
    /// Containing folder, or the root sentinel.
    pub parent_id: ParentRef,
    /// Storage key of the original bytes. `None` for folders.
    #[serde(skip)]
    pub local_path: Option<String>,
    /// When the node was created.
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

impl FileNode {
    /// Whether this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.file_type == FileType::Folder
    }

    /// Whether `user_id` owns this node.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Data required to insert a new node.
#[derive(Debug, Clone)]
pub struct CreateFileNode {
    /// Identifier, chosen before the bytes are written.
    pub id: FileId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Node kind.
    pub file_type: FileType,
    /// Initial visibility.
    pub is_public: bool,
    /// Validated parent.
    pub parent_id: ParentRef,
    /// Storage key for non-folders.
    pub local_path: Option<String>,
}
