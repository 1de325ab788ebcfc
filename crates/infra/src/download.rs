//! Attachment download

use std::path::{Path, PathBuf};

use reqwest::Method;
use tracing::{info, instrument};
use zotero_domain::{Item, Result};

use crate::client::ZoteroClient;
use crate::errors::io_error;
use crate::read::require_key;

/// File name for a downloaded attachment: stored filename, then title, then key.
///
/// Path separators are replaced so the name always stays in the target directory.
pub fn derive_filename(item: &Item) -> String {
    let data = &item.data;
    data.filename
        .as_deref()
        .and_then(usable_name)
        .or_else(|| usable_name(&data.title))
        .unwrap_or_else(|| item.key.replace(['/', '\\'], "_"))
}

/// `name` with separators replaced, or `None` when blank or made only of dots.
fn usable_name(name: &str) -> Option<String> {
    let clean = name.trim().replace(['/', '\\'], "_");
    if clean.chars().all(|c| c == '.') {
        return None;
    }
    Some(clean)
}

/// Where the body ends up for a given `target`.
fn resolve_target(target: Option<&Path>, filename: &str) -> PathBuf {
    match target {
        Some(path) if path.is_dir() => path.join(filename),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(filename),
    }
}

impl ZoteroClient {
    /// Download the stored file of attachment `item_key`.
    ///
    /// `target` may be a file path, an existing directory, or `None` for the
    /// current directory. Returns the written path.
    #[instrument(skip(self, target))]
    pub async fn download_attachment(
        &self,
        item_key: &str,
        target: Option<&Path>,
    ) -> Result<PathBuf> {
        require_key("item", item_key)?;
        let item = self.item(item_key, None).await?;
        let destination = resolve_target(target, &derive_filename(&item));

        let url = self.library_url(&format!("/items/{item_key}/file"), None);
        let exchange = self.transport().read(Method::GET, &url).await?;

        tokio::fs::write(&destination, &exchange.body)
            .await
            .map_err(|err| io_error(err, &destination))?;
        info!(
            item_key,
            path = %destination.display(),
            bytes = exchange.body.len(),
            "attachment downloaded"
        );
        Ok(destination)
    }
}
