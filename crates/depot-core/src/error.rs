//! Unified application error types for Depot.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The [`ErrorKind`] carries the
//! distinguishable failure categories callers are allowed to branch on.

use std::fmt;

use thiserror::Error;

/// Why a create or registration request was rejected before touching storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationReason {
    /// The node name was absent or empty.
    MissingName,
    /// The node type was absent.
    MissingType,
    /// The node type was present but not one of `folder`, `file`, `image`.
    UnrecognizedType,
    /// A non-folder node was created without content.
    MissingData,
    /// Registration without an email.
    MissingEmail,
    /// Registration without a password.
    MissingPassword,
    /// Registration with an email that is already taken.
    AlreadyExists,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "Missing name"),
            // Reported identically to a missing type on the wire.
            Self::MissingType | Self::UnrecognizedType => write!(f, "Missing type"),
            Self::MissingData => write!(f, "Missing data"),
            Self::MissingEmail => write!(f, "Missing email"),
            Self::MissingPassword => write!(f, "Missing password"),
            Self::AlreadyExists => write!(f, "Already exist"),
        }
    }
}

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing, unknown, or dangling session token.
    Unauthorized,
    /// Input validation failed before anything was written.
    Validation(ValidationReason),
    /// A non-root parent id did not resolve to a node.
    ParentNotFound,
    /// A non-root parent id resolved to a node that is not a folder.
    ParentNotFolder,
    /// The node is absent or not visible to the caller.
    NotFound,
    /// Content was requested for a folder.
    NotAFile,
    /// A backing store is unreachable or did not answer in time.
    StoreUnavailable,
    /// A storage I/O error occurred.
    Storage,
    /// A database error occurred.
    Database,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Validation(_) => write!(f, "VALIDATION"),
            Self::ParentNotFound => write!(f, "PARENT_NOT_FOUND"),
            Self::ParentNotFolder => write!(f, "PARENT_NOT_FOLDER"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::NotAFile => write!(f, "NOT_A_FILE"),
            Self::StoreUnavailable => write!(f, "STORE_UNAVAILABLE"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Database => write!(f, "DATABASE"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Depot.
///
/// `message` is meant for logs; the HTTP layer derives what clients see
/// from `kind` alone.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a validation error for the given reason.
    pub fn validation(reason: ValidationReason) -> Self {
        Self::new(ErrorKind::Validation(reason), reason.to_string())
    }

    /// Create a parent-not-found error.
    pub fn parent_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParentNotFound, message)
    }

    /// Create a parent-not-folder error.
    pub fn parent_not_folder(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParentNotFolder, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a not-a-file error.
    pub fn not_a_file(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotAFile, message)
    }

    /// Create a store-unavailable error.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StoreUnavailable, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Return the validation reason if this is a validation error.
    pub fn validation_reason(&self) -> Option<ValidationReason> {
        match self.kind {
            ErrorKind::Validation(reason) => Some(reason),
            _ => None,
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
