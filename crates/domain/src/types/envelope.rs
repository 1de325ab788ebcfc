//! Metadata shared by item, collection and search envelopes

use serde::{Deserialize, Serialize};

/// Library block embedded in every envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryInfo {
    #[serde(rename = "type")]
    pub library_type: String,
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

/// Hypermedia links of an envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enclosure: Option<Link>,
}

impl Links {
    /// True when no link is set.
    pub fn is_empty(&self) -> bool {
        self.self_link.is_none()
            && self.alternate.is_none()
            && self.up.is_none()
            && self.enclosure.is_none()
    }
}

/// One hypermedia link
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub href: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub media_type: String,
}

/// Server-computed summary fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Meta {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub creator_summary: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parsed_date: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub num_children: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub num_collections: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub num_items: u64,
}

pub(crate) fn is_zero(value: &u64) -> bool {
    *value == 0
}
