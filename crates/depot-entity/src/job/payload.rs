//! Derivative job payload.

use serde::{Deserialize, Serialize};

use depot_core::types::{FileId, UserId};

use super::status::JobFailure;

/// Payload of a derivative generation job: `{"fileId": .., "userId": ..}`.
///
/// Both fields are optional on the wire so that malformed jobs can be
/// recorded and failed with a precise reason instead of being dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailPayload {
    /// Image to derive from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<FileId>,
    /// Owner of the image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl ThumbnailPayload {
    /// Build a complete payload.
    pub fn new(file_id: FileId, user_id: UserId) -> Self {
        Self {
            file_id: Some(file_id),
            user_id: Some(user_id),
        }
    }

    /// Decode a stored payload, classifying missing or unusable fields.
    pub fn from_json(value: &serde_json::Value) -> Result<(FileId, UserId), JobFailure> {
        let file_id = field(value, "fileId").ok_or(JobFailure::MissingField("fileId"))?;
        let user_id = field(value, "userId").ok_or(JobFailure::MissingField("userId"))?;
        Ok((FileId::from_uuid(file_id), UserId::from_uuid(user_id)))
    }
}

fn field(value: &serde_json::Value, name: &str) -> Option<uuid::Uuid> {
    value
        .get(name)
        .and_then(|v| v.as_str())
        .and_then(|s| uuid::Uuid::parse_str(s).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_complete_payload() {
        let payload = ThumbnailPayload::new(FileId::new(), UserId::new());
        let value = serde_json::to_value(&payload).expect("serialize");
        let (file_id, user_id) = ThumbnailPayload::from_json(&value).expect("decode");
        assert_eq!(Some(file_id), payload.file_id);
        assert_eq!(Some(user_id), payload.user_id);
    }

    #[test]
    fn test_missing_file_id_reported_first() {
        let err = ThumbnailPayload::from_json(&json!({})).expect_err("missing");
        assert_eq!(err, JobFailure::MissingField("fileId"));
    }

    #[test]
    fn test_missing_user_id() {
        let value = json!({ "fileId": FileId::new().to_string() });
        let err = ThumbnailPayload::from_json(&value).expect_err("missing");
        assert_eq!(err, JobFailure::MissingField("userId"));
    }
}
