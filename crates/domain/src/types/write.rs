//! Outcomes of write calls and library-level snapshots

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::envelope::Links;
use super::item::TagType;

/// Per-entry outcome of a batch write
///
/// Keys are the batch index as a string (`"0"`, `"1"`, ...). A partially
/// failed batch is still a successful call; inspect `failed`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteResponse {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub success: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub unchanged: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub failed: BTreeMap<String, FailedWrite>,
}

impl WriteResponse {
    /// Key assigned to the entry at `index`, when it succeeded.
    pub fn success_key(&self, index: usize) -> Option<&str> {
        self.success.get(&index.to_string()).and_then(Value::as_str)
    }

    /// Failure reported for the entry at `index`.
    pub fn failure(&self, index: usize) -> Option<&FailedWrite> {
        self.failed.get(&index.to_string())
    }

    /// All keys assigned by the server, in batch order.
    pub fn created_keys(&self) -> Vec<&str> {
        let mut entries: Vec<(usize, &str)> = self
            .success
            .iter()
            .filter_map(|(index, key)| Some((index.parse().ok()?, key.as_str()?)))
            .collect();
        entries.sort_by_key(|(index, _)| *index);
        entries.into_iter().map(|(_, key)| key).collect()
    }

    /// True when no entry failed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Reason one batch entry was rejected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FailedWrite {
    pub code: u16,
    pub message: String,
}

/// Identifiers removed from a library since some version
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeletedContent {
    pub items: Vec<String>,
    pub collections: Vec<String>,
    pub searches: Vec<String>,
    pub tags: Vec<String>,
}

impl DeletedContent {
    /// True when nothing was deleted.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
            && self.collections.is_empty()
            && self.searches.is_empty()
            && self.tags.is_empty()
    }
}

/// Tag as listed by the library tag endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryTag {
    pub tag: String,
    #[serde(skip_serializing_if = "Links::is_empty")]
    pub links: Links,
    pub meta: LibraryTagMeta,
}

/// Usage summary of a library tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LibraryTagMeta {
    #[serde(rename = "type")]
    pub kind: TagType,
    pub num_items: u64,
}
