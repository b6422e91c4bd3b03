pub const ACCEPTED_ATTACHMENT_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/svg+xml",
    "image/gif",
    "image/webp",
];

/// An image attached to an entry (meter reading photo or bank statement).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// How an update treats an existing attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AttachmentChange {
    #[default]
    Keep,
    Remove,
    Replace(Attachment),
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn has_accepted_mime_type(&self) -> bool {
        ACCEPTED_ATTACHMENT_MIME_TYPES.contains(&self.mime_type.as_str())
    }
}

impl AttachmentChange {
    pub(crate) fn apply(self, current: Option<Attachment>) -> Option<Attachment> {
        match self {
            AttachmentChange::Keep => current,
            AttachmentChange::Remove => None,
            AttachmentChange::Replace(a) => Some(a),
        }
    }
}
