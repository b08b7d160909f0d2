//! Attachments (doclinks)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::entity::require;
use crate::core::error::ClientError;

/// Attachment metadata taken from a doclink's `describedBy`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(
        default,
        deserialize_with = "super::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub docinfoid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Attachment {
    /// Doclink identifier used for deletion, taken from the `href` tail
    pub fn doclink_id(&self) -> Option<String> {
        self.extra
            .get("href")
            .and_then(Value::as_str)
            .and_then(|href| href.trim_end_matches('/').rsplit('/').next())
            .filter(|tail| !tail.is_empty())
            .map(str::to_string)
            .or_else(|| self.docinfoid.clone())
    }
}

/// A local file to upload as an attachment
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    pub path: PathBuf,
    /// Name shown in the backend (`slug` header)
    pub name: String,
    pub description: String,
}

impl AttachmentUpload {
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.path.as_os_str().is_empty() {
            return Err(ClientError::InvalidInput("file is required".to_string()));
        }
        require("name", &self.name)?;
        require("description", &self.description)
    }
}
