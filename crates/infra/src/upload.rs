//! HTTP side of the attachment upload sequence

use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tracing::{info, instrument};
use zotero_core::attachment::{
    registration_body, AttachmentFile, AttachmentPort, AttachmentUploader, AuthorizationReply,
    Precondition, UploadGrant,
};
use zotero_domain::constants::{
    CONTENT_TYPE_OCTET_STREAM, HEADER_LAST_MODIFIED_VERSION, UPLOAD_FILE_FIELD,
};
use zotero_domain::{Item, Result, WriteResponse, ZoteroError};

use crate::client::ZoteroClient;
use crate::errors::io_error;

const STORAGE_OK: &[u16] = &[200, 201, 204];
const REGISTER_OK: &[u16] = &[204];

fn file_path(item_key: &str) -> String {
    format!("/items/{item_key}/file")
}

/// Modification time in epoch milliseconds, or now if the platform has none.
fn mtime_millis(metadata: &std::fs::Metadata) -> i64 {
    let modified = metadata.modified().unwrap_or_else(|_| SystemTime::now());
    modified.duration_since(UNIX_EPOCH).map(|d| d.as_millis() as i64).unwrap_or_default()
}

#[async_trait]
impl AttachmentPort for ZoteroClient {
    async fn create_items(&self, items: &[Item]) -> Result<WriteResponse> {
        ZoteroClient::create_items(self, items).await
    }

    async fn authorize_upload(
        &self,
        item_key: &str,
        form: &str,
        precondition: &Precondition,
    ) -> Result<AuthorizationReply> {
        let url = self.library_url(&file_path(item_key), None);
        let exchange = self.transport().authorize(&url, form, precondition).await?;
        Ok(AuthorizationReply {
            last_modified_version: exchange
                .header(HEADER_LAST_MODIFIED_VERSION)
                .map(str::to_string),
            body: exchange.body,
        })
    }

    async fn upload_file(&self, grant: &UploadGrant, file: &AttachmentFile) -> Result<()> {
        let mut form = Form::new();
        for (name, value) in &grant.params {
            form = form.text(name.clone(), value.clone());
        }
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)
            .map_err(|err| {
                ZoteroError::Config(format!("invalid content type {:?}: {err}", file.content_type))
            })?;
        form = form.part(UPLOAD_FILE_FIELD, part);

        self.transport().upload(&grant.url, form).await?.expect_status(STORAGE_OK)?;
        Ok(())
    }

    async fn register_upload(&self, item_key: &str, upload_key: &str, version: u64) -> Result<()> {
        let url = self.library_url(&file_path(item_key), None);
        self.transport()
            .write(Method::POST, &url, Some(registration_body(upload_key)), version)
            .await?
            .expect_status(REGISTER_OK)?;
        Ok(())
    }

    async fn item(&self, item_key: &str) -> Result<Item> {
        ZoteroClient::item(self, item_key, None).await
    }
}

impl ZoteroClient {
    /// Upload the file at `path` as an attachment, optionally under `parent_key`.
    ///
    /// Returns the attachment item as stored on the server afterwards.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn upload_attachment(
        &self,
        path: &Path,
        parent_key: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<Item> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ZoteroError::Config(format!("{} has no file name", path.display())))?
            .to_string();
        let metadata = tokio::fs::metadata(path).await.map_err(|err| io_error(err, path))?;
        let bytes = tokio::fs::read(path).await.map_err(|err| io_error(err, path))?;

        let file = AttachmentFile::new(
            filename,
            content_type.unwrap_or(CONTENT_TYPE_OCTET_STREAM),
            bytes,
            mtime_millis(&metadata),
        );
        self.upload_file_attachment(&file, parent_key).await
    }

    /// Upload an in-memory file as an attachment.
    pub async fn upload_file_attachment(
        &self,
        file: &AttachmentFile,
        parent_key: Option<&str>,
    ) -> Result<Item> {
        let uploader = AttachmentUploader::new(Arc::new(self.clone()));
        let item = uploader.upload(file, parent_key).await?;
        info!(item_key = %item.key, filename = %file.filename, "attachment uploaded");
        Ok(item)
    }
}
