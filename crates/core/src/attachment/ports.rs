//! Port interface for the attachment upload sequence
//!
//! Implementations perform the HTTP exchanges; the uploader decides which
//! exchange comes next.

use async_trait::async_trait;
use zotero_domain::{Item, Result, WriteResponse};

use super::file::AttachmentFile;
use super::protocol::{AuthorizationReply, Precondition, UploadGrant};

/// Remote operations the uploader composes
#[async_trait]
pub trait AttachmentPort: Send + Sync {
    /// Create items in one batch (the attachment stub).
    async fn create_items(&self, items: &[Item]) -> Result<WriteResponse>;

    /// Request upload authorization for `item_key` with the given condition.
    ///
    /// A 412 reply must surface as an API error carrying that status.
    async fn authorize_upload(
        &self,
        item_key: &str,
        form: &str,
        precondition: &Precondition,
    ) -> Result<AuthorizationReply>;

    /// Send the file bytes to the storage host named by `grant`.
    async fn upload_file(&self, grant: &UploadGrant, file: &AttachmentFile) -> Result<()>;

    /// Register a finished upload at library `version`.
    async fn register_upload(&self, item_key: &str, upload_key: &str, version: u64) -> Result<()>;

    /// Fetch the current state of an item.
    async fn item(&self, item_key: &str) -> Result<Item>;
}
