//! Table and detail rendering
//!
//! Every renderer returns a `String`; printing happens in `main`.

use std::fmt::Write as _;

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use zotero_domain::{
    Collection, Creator, DeletedContent, Group, Item, LibraryTag, SchemaItemType, WriteResponse,
};

const TITLE_WIDTH: usize = 40;
const CREATORS_WIDTH: usize = 30;
const ABSTRACT_WIDTH: usize = 200;

/// Pretty JSON for `--json`.
pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Cut `text` to `max` characters, ending in `...` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut cut: String = text.chars().take(max - 3).collect();
    cut.push_str("...");
    cut
}

/// First two creators by family name, then a `(+N more)` marker.
pub fn creators_summary(creators: &[Creator]) -> String {
    if creators.is_empty() {
        return "-".to_string();
    }

    let mut names: Vec<String> = creators
        .iter()
        .take(2)
        .map(|creator| {
            if !creator.name.is_empty() {
                creator.name.clone()
            } else if !creator.last_name.is_empty() {
                creator.last_name.clone()
            } else {
                creator.first_name.clone()
            }
        })
        .collect();
    if creators.len() > 2 {
        names.push(format!("(+{} more)", creators.len() - 2));
    }
    truncate(&names.join(", "), CREATORS_WIDTH)
}

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

pub fn items_table(items: &[Item]) -> String {
    let mut table = table(&["KEY", "TYPE", "TITLE", "CREATORS", "DATE"]);
    for item in items {
        let date: String = item.data.date_added.chars().take(10).collect();
        table.add_row(vec![
            item.key.clone(),
            item.data.item_type.clone(),
            truncate(&item.data.title, TITLE_WIDTH),
            creators_summary(&item.data.creators),
            date,
        ]);
    }
    table.to_string()
}

/// Multi-line description of one item.
pub fn item_details(item: &Item) -> String {
    let data = &item.data;
    let mut out = String::new();
    let _ = writeln!(out, "Item: {}", item.key);
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "Type:     {}", data.item_type);
    if !data.title.is_empty() {
        let _ = writeln!(out, "Title:    {}", data.title);
    }
    if !data.creators.is_empty() {
        let _ = writeln!(out, "Creators:");
        for creator in &data.creators {
            let _ = writeln!(out, "  - {} ({})", creator.display_name(), creator.creator_type);
        }
    }
    if !data.abstract_note.is_empty() {
        let _ = writeln!(out, "Abstract: {}", truncate(&data.abstract_note, ABSTRACT_WIDTH));
    }
    if let Some(filename) = data.filename.as_deref() {
        let _ = writeln!(out, "File:     {filename}");
    }
    if !data.date_added.is_empty() {
        let _ = writeln!(out, "Added:    {}", data.date_added);
    }
    if !data.date_modified.is_empty() {
        let _ = writeln!(out, "Modified: {}", data.date_modified);
    }
    if !data.tags.is_empty() {
        let names: Vec<&str> = data.tags.iter().map(|tag| tag.tag.as_str()).collect();
        let _ = writeln!(out, "Tags:     {}", names.join(", "));
    }
    if !data.collections.is_empty() {
        let _ = writeln!(out, "Collections: {}", data.collections.len());
    }
    if let Some(children) = item.meta.as_ref().map(|meta| meta.num_children).filter(|n| *n > 0) {
        let _ = writeln!(out, "Children: {children}");
    }
    let _ = write!(out, "Version:  {}", item.version);
    out
}

pub fn collections_table(collections: &[Collection]) -> String {
    let mut table = table(&["KEY", "NAME", "PARENT", "ITEMS"]);
    for collection in collections {
        let parent = collection.data.parent_collection.as_key().unwrap_or("-");
        let items = collection.meta.as_ref().map_or(0, |meta| meta.num_items);
        table.add_row(vec![
            collection.key.clone(),
            truncate(&collection.data.name, TITLE_WIDTH),
            parent.to_string(),
            items.to_string(),
        ]);
    }
    table.to_string()
}

pub fn groups_table(groups: &[Group]) -> String {
    let mut table = table(&["ID", "NAME", "TYPE", "ITEMS", "MEMBERS"]);
    for group in groups {
        table.add_row(vec![
            group.id.to_string(),
            truncate(&group.name, CREATORS_WIDTH),
            group.group_type.clone(),
            group.meta.num_items.to_string(),
            group.members.len().to_string(),
        ]);
    }
    table.to_string()
}

pub fn tags_table(tags: &[LibraryTag]) -> String {
    let mut table = table(&["TAG", "TYPE", "ITEMS"]);
    for tag in tags {
        let kind = if tag.meta.kind.is_manual() { "manual" } else { "automatic" };
        table.add_row(vec![tag.tag.clone(), kind.to_string(), tag.meta.num_items.to_string()]);
    }
    table.to_string()
}

pub fn item_types_table(types: &[SchemaItemType]) -> String {
    let mut table = table(&["ITEM TYPE", "NAME"]);
    for item_type in types {
        table.add_row(vec![item_type.item_type.clone(), item_type.localized.clone()]);
    }
    table.to_string()
}

pub fn deleted_summary(deleted: &DeletedContent, since: u64) -> String {
    if deleted.is_empty() {
        return format!("Nothing deleted since version {since}");
    }
    let mut out = format!("Deleted since version {since}:");
    for (label, keys) in [
        ("Items", &deleted.items),
        ("Collections", &deleted.collections),
        ("Searches", &deleted.searches),
        ("Tags", &deleted.tags),
    ] {
        if !keys.is_empty() {
            let _ = write!(out, "\n  {label:<12} {}", keys.join(", "));
        }
    }
    out
}

/// Created keys and per-index failures of a batch create.
pub fn write_outcome(response: &WriteResponse) -> String {
    let mut out = String::new();
    for key in response.created_keys() {
        let _ = writeln!(out, "Created item {key}");
    }
    if !response.failed.is_empty() {
        let _ = writeln!(out, "Failed entries:");
        for (index, failure) in &response.failed {
            let _ = writeln!(out, "  #{index}: {} {}", failure.code, failure.message);
        }
    }
    out.trim_end().to_string()
}

/// Short report of an uploaded attachment.
pub fn attachment_summary(item: &Item) -> String {
    let data = &item.data;
    format!(
        "Key:          {}\nTitle:        {}\nContent type: {}\nFilename:     {}",
        item.key,
        data.title,
        data.content_type.as_deref().unwrap_or("-"),
        data.filename.as_deref().unwrap_or("-"),
    )
}

#[cfg(test)]
mod tests {
    use zotero_domain::{ItemData, Meta};

    use super::*;

    #[test]
    fn truncate_adds_ellipsis_only_when_needed() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a rather long title", 10), "a rathe...");
        assert_eq!(truncate("abcdef", 2), "ab");
        assert_eq!(truncate("ééééé", 4), "é...");
    }

    #[test]
    fn creators_summary_names_two_then_counts() {
        let creators = vec![
            Creator::person("author", "Ada", "Lovelace"),
            Creator::single("author", "ACM"),
            Creator::person("editor", "Alan", "Turing"),
        ];

        assert_eq!(creators_summary(&creators), "Lovelace, ACM, (+1 more)");
        assert_eq!(creators_summary(&[]), "-");
    }

    #[test]
    fn item_details_skip_empty_fields() {
        let mut item = Item::new(ItemData::new("book").with_title("Dune"));
        item.key = "ABCD1234".into();
        item.version = 4;
        item.meta = Some(Meta { num_children: 2, ..Meta::default() });

        let details = item_details(&item);

        assert!(details.starts_with("Item: ABCD1234\n"));
        assert!(details.contains("Title:    Dune"));
        assert!(details.contains("Children: 2"));
        assert!(!details.contains("Abstract"));
        assert!(details.ends_with("Version:  4"));
    }

    #[test]
    fn items_table_lists_keys_and_short_dates() {
        let mut data = ItemData::new("journalArticle").with_title("On Things");
        data.date_added = "2024-03-16T10:00:00Z".into();
        let mut item = Item::new(data);
        item.key = "ABCD1234".into();

        let rendered = items_table(&[item]);

        assert!(rendered.contains("ABCD1234"));
        assert!(rendered.contains("2024-03-16"));
        assert!(!rendered.contains("T10:00"));
    }

    #[test]
    fn empty_deleted_snapshot_says_so() {
        assert_eq!(
            deleted_summary(&DeletedContent::default(), 7),
            "Nothing deleted since version 7"
        );
    }
}
