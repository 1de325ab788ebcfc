//! `items`, `item` and `create`

use anyhow::Context;
use tracing::info;
use zotero_domain::{Creator, Item, ItemData, QueryParams, Tag};
use zotero_infra::ZoteroClient;

use crate::args::{CreateArgs, ItemsArgs};
use crate::render;

fn list_params(args: &ItemsArgs) -> QueryParams {
    let mut params = QueryParams::new().limit(args.limit).start(args.start);
    for item_type in args.item_type.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        params = params.item_type(item_type);
    }
    for tag in &args.tag {
        params = params.tag(tag.as_str());
    }
    params
}

pub async fn list(client: &ZoteroClient, args: &ItemsArgs, json: bool) -> anyhow::Result<String> {
    let params = list_params(args);
    let items = if args.top {
        client.top_items(Some(&params)).await?
    } else {
        client.items(Some(&params)).await?
    };
    if json {
        return render::json(&items);
    }
    Ok(render::items_table(&items))
}

pub async fn show(client: &ZoteroClient, key: &str, json: bool) -> anyhow::Result<String> {
    let item = client.item(key, None).await?;
    if json {
        return render::json(&item);
    }
    Ok(render::item_details(&item))
}

/// Creators parsed from `"First Last, Organisation"`.
fn parse_authors(raw: &str, creator_type: &str) -> Vec<Creator> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| Creator::from_display_name(creator_type, name))
        .collect()
}

fn new_item(args: &CreateArgs) -> Item {
    let mut data = ItemData::new(args.item_type.clone()).with_title(args.title.clone());
    if let Some(authors) = args.authors.as_deref() {
        data.creators = parse_authors(authors, &args.creator_type);
    }
    data.tags =
        args.tag.iter().filter(|t| !t.trim().is_empty()).map(|t| Tag::new(t.trim())).collect();
    Item::new(data)
}

pub async fn create(
    client: &ZoteroClient,
    args: &CreateArgs,
    json: bool,
) -> anyhow::Result<String> {
    let response = client.create_items(&[new_item(args)]).await?;
    if !response.is_complete() {
        anyhow::bail!("{}", render::write_outcome(&response));
    }

    let Some(file) = args.file.as_deref() else {
        return if json { render::json(&response) } else { Ok(render::write_outcome(&response)) };
    };

    let parent =
        response.success_key(0).context("server reported no key for the created item")?;
    info!(parent, file = %file.display(), "attaching file");
    let attachment = client
        .upload_attachment(file, Some(parent), args.content_type.as_deref())
        .await
        .with_context(|| {
            format!("item {parent} was created, but attaching {} failed", file.display())
        })?;

    if json {
        return render::json(&serde_json::json!({ "item": response, "attachment": attachment }));
    }
    Ok(format!(
        "{}\nAttached {}\n{}",
        render::write_outcome(&response),
        file.display(),
        render::attachment_summary(&attachment)
    ))
}
