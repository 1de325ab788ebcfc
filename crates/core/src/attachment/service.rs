//! Attachment upload service - sequencing of the four upload steps

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use zotero_domain::{Item, Result, UploadStep};

use super::file::AttachmentFile;
use super::ports::AttachmentPort;
use super::protocol::{extract_created_key, Precondition, UploadAuthorization};

/// Uploads a local file as an attachment item
///
/// Steps: create the stub, authorize, upload to storage, register. The only
/// automatic retry is the single `If-Match` authorization after a 412. The
/// final item is always re-fetched from the server.
pub struct AttachmentUploader {
    port: Arc<dyn AttachmentPort>,
}

impl AttachmentUploader {
    /// Create a new uploader over `port`
    pub fn new(port: Arc<dyn AttachmentPort>) -> Self {
        Self { port }
    }

    /// Run the upload sequence for `file`, optionally below `parent_key`
    #[instrument(skip(self, file), fields(filename = %file.filename, size = file.size()))]
    pub async fn upload(&self, file: &AttachmentFile, parent_key: Option<&str>) -> Result<Item> {
        let stub = file.stub(parent_key);
        let created = self
            .port
            .create_items(std::slice::from_ref(&stub))
            .await
            .map_err(|err| err.during(UploadStep::CreateAttachment))?;
        let key =
            extract_created_key(&created).map_err(|err| err.during(UploadStep::CreateAttachment))?;
        debug!(item_key = %key, "attachment stub created");

        let form = file.authorization_form();
        let reply = match self.port.authorize_upload(&key, &form, &Precondition::NoneMatch).await {
            Err(err) if err.is_version_conflict() => {
                info!(item_key = %key, "file already stored, retrying authorization with If-Match");
                let precondition = Precondition::Match(file.md5.clone());
                self.port.authorize_upload(&key, &form, &precondition).await
            }
            other => other,
        }
        .map_err(|err| err.during(UploadStep::Authorize))?;

        let grant = match UploadAuthorization::parse(&reply.body)
            .map_err(|err| err.during(UploadStep::Authorize))?
        {
            UploadAuthorization::Exists => {
                info!(item_key = %key, "identical file already on server, skipping upload");
                return self.fetch(&key).await;
            }
            UploadAuthorization::Upload(grant) => grant,
        };

        self.port
            .upload_file(&grant, file)
            .await
            .map_err(|err| err.during(UploadStep::Upload))?;
        debug!(item_key = %key, "file bytes stored");

        match reply.registration_version() {
            Some(version) => {
                self.port
                    .register_upload(&key, &grant.upload_key, version)
                    .await
                    .map_err(|err| err.during(UploadStep::Register))?;
                debug!(item_key = %key, version, "upload registered");
            }
            None => {
                warn!(
                    item_key = %key,
                    "authorization reply had no usable version, upload not registered"
                );
            }
        }

        self.fetch(&key).await
    }

    async fn fetch(&self, key: &str) -> Result<Item> {
        self.port.item(key).await.map_err(|err| err.during(UploadStep::Fetch))
    }
}
