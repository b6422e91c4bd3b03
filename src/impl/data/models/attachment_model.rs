use base64::{engine::general_purpose::STANDARD, Engine as _};
use fractic_server_error::ServerError;

use crate::{entities::Attachment, errors::CorruptStoreRecord};

/// Attachment as persisted in a record, with the file content base64-encoded.
#[derive(Debug, Clone, PartialEq, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct AttachmentModel {
    pub file_name: String,
    pub mime_type: String,
    pub data: String,
}

impl From<Attachment> for AttachmentModel {
    fn from(attachment: Attachment) -> Self {
        AttachmentModel {
            file_name: attachment.file_name,
            mime_type: attachment.mime_type,
            data: STANDARD.encode(attachment.data),
        }
    }
}

impl AttachmentModel {
    pub(crate) fn into_attachment(self, record_id: &str) -> Result<Attachment, ServerError> {
        let data = STANDARD.decode(&self.data).map_err(|e| {
            CorruptStoreRecord::with_debug(record_id, "attachment data is not valid base64", &e)
        })?;
        Ok(Attachment {
            file_name: self.file_name,
            mime_type: self.mime_type,
            data,
        })
    }
}
