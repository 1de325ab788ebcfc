//! `upload` and `download`

use std::path::Path;

use anyhow::Context;
use tracing::info;
use zotero_infra::ZoteroClient;

use crate::args::UploadArgs;
use crate::render;

pub async fn upload(
    client: &ZoteroClient,
    args: &UploadArgs,
    json: bool,
) -> anyhow::Result<String> {
    let parent = args.parent.as_deref().filter(|key| !key.is_empty());
    match parent {
        Some(parent) => info!(parent, file = %args.file.display(), "uploading attachment"),
        None => info!(file = %args.file.display(), "uploading standalone attachment"),
    }

    let item = client
        .upload_attachment(&args.file, parent, args.content_type.as_deref())
        .await
        .with_context(|| format!("failed to upload {}", args.file.display()))?;
    if json {
        return render::json(&item);
    }
    Ok(format!("Uploaded {}\n{}", args.file.display(), render::attachment_summary(&item)))
}

pub async fn download(
    client: &ZoteroClient,
    key: &str,
    output: Option<&Path>,
) -> anyhow::Result<String> {
    let path = client.download_attachment(key, output).await?;
    Ok(format!("Saved {}", path.display()))
}
