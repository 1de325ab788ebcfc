//! Local file prepared for upload

use md5::{Digest, Md5};
use url::form_urlencoded;
use zotero_domain::constants::{CONTENT_TYPE_OCTET_STREAM, LINK_MODE_IMPORTED_FILE};
use zotero_domain::item_types::ATTACHMENT;
use zotero_domain::{Item, ItemData};

/// File contents plus the metadata the upload protocol needs
#[derive(Clone, PartialEq, Eq)]
pub struct AttachmentFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Lowercase hex MD5 of `bytes`.
    pub md5: String,
    /// Modification time in milliseconds since the epoch.
    pub mtime_ms: i64,
}

impl AttachmentFile {
    /// Hash `bytes` and wrap them with their metadata.
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
        mtime_ms: i64,
    ) -> Self {
        let content_type = content_type.into();
        let md5 = hex::encode(Md5::digest(&bytes));
        Self {
            filename: filename.into(),
            content_type: if content_type.is_empty() {
                CONTENT_TYPE_OCTET_STREAM.to_string()
            } else {
                content_type
            },
            bytes,
            md5,
            mtime_ms,
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Attachment item announcing this file, optionally under `parent_key`.
    pub fn stub(&self, parent_key: Option<&str>) -> Item {
        let data = ItemData {
            link_mode: Some(LINK_MODE_IMPORTED_FILE.to_string()),
            content_type: Some(self.content_type.clone()),
            filename: Some(self.filename.clone()),
            md5: Some(self.md5.clone()),
            mtime: Some(self.mtime_ms),
            parent_item: parent_key.filter(|key| !key.is_empty()).map(str::to_string),
            ..ItemData::new(ATTACHMENT).with_title(self.filename.clone())
        };
        Item::new(data)
    }

    /// Form body of the upload authorization request.
    pub fn authorization_form(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("md5", &self.md5)
            .append_pair("filename", &self.filename)
            .append_pair("filesize", &self.size().to_string())
            .append_pair("mtime", &self.mtime_ms.to_string())
            .finish()
    }
}

impl std::fmt::Debug for AttachmentFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachmentFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .field("md5", &self.md5)
            .field("mtime_ms", &self.mtime_ms)
            .finish()
    }
}
