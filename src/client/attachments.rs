//! Attachment listing, upload and removal

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use tracing::{debug, info};

use super::{members, MaximoClient};
use crate::core::entity::require;
use crate::core::error::ClientError;
use crate::core::resource::ResourceKind;
use crate::entities::attachment::{Attachment, AttachmentUpload};

/// Folder attachments are filed under
pub const ATTACHMENT_FOLDER: &str = "FILE/Attachments";

/// Attachment metadata carried in each collection member's `describedBy`
///
/// Members without it are dropped.
pub fn described_by(collection: &Value) -> Result<Vec<Attachment>, ClientError> {
    members(collection)?
        .iter()
        .filter_map(|member| {
            let mut described = member.get("describedBy")?.clone();
            // keep the member link so the doclink id can be recovered
            if let (Some(obj), Some(href)) = (described.as_object_mut(), member.get("href")) {
                obj.entry("href").or_insert_with(|| href.clone());
            }
            Some(described)
        })
        .map(|v| serde_json::from_value(v).map_err(|e| ClientError::InvalidResponse(e.to_string())))
        .collect()
}

impl MaximoClient {
    pub async fn list_attachments(
        &self,
        token: &str,
        workorderid: &str,
    ) -> Result<Vec<Attachment>, ClientError> {
        require("workorderid", workorderid)?;
        let url = self.endpoints.collection(workorderid, ResourceKind::Attachment);
        let collection = self.get_json(&url, token).await?;
        described_by(&collection)
    }

    /// Upload a local file as a base64 text body
    pub async fn upload_attachment(
        &self,
        token: &str,
        workorderid: &str,
        upload: &AttachmentUpload,
    ) -> Result<Option<Value>, ClientError> {
        require("workorderid", workorderid)?;
        upload.validate()?;

        let bytes = tokio::fs::read(&upload.path)
            .await
            .map_err(|source| ClientError::Io {
                path: upload.path.display().to_string(),
                source,
            })?;
        debug!(path = %upload.path.display(), size = bytes.len(), "encoding attachment");
        let encoded = STANDARD.encode(&bytes);

        let url = self.endpoints.collection(workorderid, ResourceKind::Attachment);
        let headers = [
            ("x-document-meta", ATTACHMENT_FOLDER.to_string()),
            ("x-document-description", upload.description.clone()),
            ("slug", upload.name.clone()),
        ];
        let result = self.post_text(&url, token, encoded, &headers).await?;
        info!(workorderid, name = %upload.name, "uploaded attachment");
        Ok(result)
    }

    pub async fn delete_attachment(
        &self,
        token: &str,
        workorderid: &str,
        doclink_id: &str,
    ) -> Result<Option<Value>, ClientError> {
        require("workorderid", workorderid)?;
        require("doclink id", doclink_id)?;
        let url = format!(
            "{}/{}",
            self.endpoints.child(workorderid, ResourceKind::Attachment),
            doclink_id
        );
        let result = self.delete(&url, token).await?;
        info!(workorderid, doclink_id, "deleted attachment");
        Ok(result)
    }
}
