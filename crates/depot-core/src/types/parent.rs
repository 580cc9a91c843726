//! The parent reference of a file node: the virtual root or a folder id.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use super::id::FileId;

/// Stored and compared form of the root sentinel.
pub const ROOT_SENTINEL: &str = "0";

/// Where a node lives in the hierarchy.
///
/// Serializes as the number `0` for the root and as the id string otherwise.
/// Deserializes from `0`, `"0"`, or an id string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ParentRef {
    /// The virtual top-level folder. Never a stored node.
    #[default]
    Root,
    /// A stored node of type folder.
    Folder(FileId),
}

/// A parent reference as supplied by a caller, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RawParent {
    /// The sentinel, in either numeric or string form.
    #[default]
    Root,
    /// A well-formed id; it may still not resolve.
    Id(FileId),
    /// Anything else; never resolves.
    Malformed(String),
}

impl RawParent {
    /// Classify a JSON value: absent, `null`, `0`, and `"0"` mean root.
    pub fn from_json(raw: Option<&serde_json::Value>) -> Self {
        match raw {
            None | Some(serde_json::Value::Null) => Self::Root,
            Some(serde_json::Value::String(s)) => Self::parse(Some(s)),
            Some(serde_json::Value::Number(n)) if n.as_f64() == Some(0.0) => Self::Root,
            Some(other) => Self::Malformed(other.to_string()),
        }
    }

    /// Classify caller input. `None` and blank strings mean root.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some(ROOT_SENTINEL) => Self::Root,
            Some(s) => match FileId::parse_lenient(s) {
                Some(id) => Self::Id(id),
                None => Self::Malformed(s.to_string()),
            },
        }
    }
}

impl ParentRef {
    /// Whether this is the root sentinel.
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// The value persisted in the metadata store.
    pub fn to_storage(&self) -> String {
        match self {
            Self::Root => ROOT_SENTINEL.to_string(),
            Self::Folder(id) => id.to_string(),
        }
    }

    /// Decode a persisted value. Returns `None` for corrupt values.
    pub fn from_storage(raw: &str) -> Option<Self> {
        if raw == ROOT_SENTINEL {
            return Some(Self::Root);
        }
        FileId::parse_lenient(raw).map(Self::Folder)
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_storage())
    }
}

impl Serialize for ParentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Root => serializer.serialize_u8(0),
            Self::Folder(id) => serializer.collect_str(id),
        }
    }
}

impl<'de> Deserialize<'de> for ParentRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ParentVisitor;

        impl Visitor<'_> for ParentVisitor {
            type Value = ParentRef;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0 or a file id")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ParentRef, E> {
                if v == 0 {
                    Ok(ParentRef::Root)
                } else {
                    Err(E::invalid_value(de::Unexpected::Unsigned(v), &self))
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ParentRef, E> {
                if v == 0 {
                    Ok(ParentRef::Root)
                } else {
                    Err(E::invalid_value(de::Unexpected::Signed(v), &self))
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ParentRef, E> {
                ParentRef::from_storage(v.trim())
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(ParentVisitor)
    }
}
