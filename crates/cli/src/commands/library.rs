//! Library-wide listings

use zotero_infra::ZoteroClient;

use crate::render;

pub async fn collections(client: &ZoteroClient, json: bool) -> anyhow::Result<String> {
    let collections = client.collections(None).await?;
    if json {
        return render::json(&collections);
    }
    Ok(render::collections_table(&collections))
}

pub async fn groups(client: &ZoteroClient, json: bool) -> anyhow::Result<String> {
    let groups = client.groups(None).await?;
    if json {
        return render::json(&groups);
    }
    Ok(render::groups_table(&groups))
}

pub async fn tags(client: &ZoteroClient, json: bool) -> anyhow::Result<String> {
    let tags = client.tags(None).await?;
    if json {
        return render::json(&tags);
    }
    Ok(render::tags_table(&tags))
}

pub async fn deleted(client: &ZoteroClient, since: u64, json: bool) -> anyhow::Result<String> {
    let deleted = client.deleted(since).await?;
    if json {
        return render::json(&deleted);
    }
    Ok(render::deleted_summary(&deleted, since))
}

pub async fn item_types(client: &ZoteroClient, json: bool) -> anyhow::Result<String> {
    let types = client.item_types(None).await?;
    if json {
        return render::json(&types);
    }
    Ok(render::item_types_table(&types))
}
