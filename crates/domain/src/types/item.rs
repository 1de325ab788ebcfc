//! Items, creators and tags
//!
//! `ItemData` models the fields every item type shares. Everything else the
//! server sends lands in `extra` and is written back unchanged. On encode the
//! modelled fields win when `extra` holds the same key.

use std::collections::BTreeMap;

use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::envelope::{is_zero, LibraryInfo, Links, Meta};

/// Item envelope as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub version: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<LibraryInfo>,
    #[serde(skip_serializing_if = "Links::is_empty")]
    pub links: Links,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    pub data: ItemData,
}

impl Item {
    /// Wrap caller-built data in an unsaved envelope.
    pub fn new(data: ItemData) -> Self {
        Self { data, ..Self::default() }
    }
}

/// Item content
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemData {
    pub key: String,
    pub version: u64,
    pub item_type: String,
    pub title: String,
    pub creators: Vec<Creator>,
    pub abstract_note: String,
    pub tags: Vec<Tag>,
    pub collections: Vec<String>,
    pub relations: BTreeMap<String, Value>,
    pub date_added: String,
    pub date_modified: String,
    pub parent_item: Option<String>,
    pub link_mode: Option<String>,
    pub content_type: Option<String>,
    pub filename: Option<String>,
    pub md5: Option<String>,
    pub mtime: Option<i64>,
    /// Item-type specific fields not modelled above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ItemData {
    /// Empty data of the given item type.
    pub fn new(item_type: impl Into<String>) -> Self {
        Self { item_type: item_type.into(), ..Self::default() }
    }

    /// Builder-style title setter.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder-style creator append.
    pub fn with_creator(mut self, creator: Creator) -> Self {
        self.creators.push(creator);
        self
    }

    /// Builder-style tag append.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Set an item-type specific field.
    pub fn set_extra(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.extra.insert(field.into(), value.into());
    }

    /// True when a tag with `name` is present.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.tag == name)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelledFields<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    key: &'a str,
    #[serde(skip_serializing_if = "is_zero")]
    version: &'a u64,
    item_type: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    title: &'a str,
    #[serde(skip_serializing_if = "<[Creator]>::is_empty")]
    creators: &'a [Creator],
    #[serde(skip_serializing_if = "str::is_empty")]
    abstract_note: &'a str,
    #[serde(skip_serializing_if = "<[Tag]>::is_empty")]
    tags: &'a [Tag],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    collections: &'a [String],
    #[serde(skip_serializing_if = "no_relations")]
    relations: &'a BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "str::is_empty")]
    date_added: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    date_modified: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_item: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link_mode: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filename: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    md5: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mtime: Option<i64>,
}

fn no_relations(relations: &&BTreeMap<String, Value>) -> bool {
    relations.is_empty()
}

impl Serialize for ItemData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let modelled = ModelledFields {
            key: &self.key,
            version: &self.version,
            item_type: &self.item_type,
            title: &self.title,
            creators: &self.creators,
            abstract_note: &self.abstract_note,
            tags: &self.tags,
            collections: &self.collections,
            relations: &self.relations,
            date_added: &self.date_added,
            date_modified: &self.date_modified,
            parent_item: self.parent_item.as_deref(),
            link_mode: self.link_mode.as_deref(),
            content_type: self.content_type.as_deref(),
            filename: self.filename.as_deref(),
            md5: self.md5.as_deref(),
            mtime: self.mtime,
        };

        let mut merged: Map<String, Value> =
            self.extra.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        match serde_json::to_value(modelled).map_err(S::Error::custom)? {
            Value::Object(fields) => merged.extend(fields),
            _ => return Err(S::Error::custom("item data did not encode as an object")),
        }
        merged.serialize(serializer)
    }
}

/// Person or organisation credited on an item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Creator {
    pub creator_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    /// Single-field name, used instead of first/last.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl Creator {
    /// Two-field creator.
    pub fn person(
        creator_type: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            creator_type: creator_type.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            name: String::new(),
        }
    }

    /// Single-field creator such as an organisation.
    pub fn single(creator_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self { creator_type: creator_type.into(), name: name.into(), ..Self::default() }
    }

    /// Split a display name on its last space into first and last name.
    /// A name without spaces becomes a single-field creator.
    pub fn from_display_name(creator_type: impl Into<String>, display: &str) -> Self {
        let display = display.trim();
        match display.rsplit_once(char::is_whitespace) {
            Some((first, last)) => Self::person(creator_type, first.trim(), last.trim()),
            None => Self::single(creator_type, display),
        }
    }

    /// Name suitable for display.
    pub fn display_name(&self) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (true, _) => self.last_name.clone(),
            (false, true) => self.first_name.clone(),
            (false, false) => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// Origin of a tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum TagType {
    /// Added by a person (`0` on the wire, or absent).
    #[default]
    Manual,
    /// Added by an importer or translator (`1`).
    Automatic,
}

impl TagType {
    /// True for manual tags.
    pub fn is_manual(&self) -> bool {
        *self == Self::Manual
    }
}

impl From<u8> for TagType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Automatic,
            _ => Self::Manual,
        }
    }
}

impl From<TagType> for u8 {
    fn from(value: TagType) -> Self {
        match value {
            TagType::Manual => 0,
            TagType::Automatic => 1,
        }
    }
}

/// Tag attached to an item
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub tag: String,
    #[serde(rename = "type", skip_serializing_if = "TagType::is_manual")]
    pub kind: TagType,
}

impl Tag {
    /// Manual tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self { tag: name.into(), kind: TagType::Manual }
    }

    /// Automatic tag.
    pub fn automatic(name: impl Into<String>) -> Self {
        Self { tag: name.into(), kind: TagType::Automatic }
    }
}
