//! Group libraries a user belongs to

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Group a user is a member of
///
/// The API nests most fields under `data`; flat payloads are accepted too,
/// with nested values taking precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "GroupWire", rename_all = "camelCase")]
pub struct Group {
    pub id: u64,
    pub version: u64,
    pub name: String,
    /// `Private`, `PublicClosed` or `PublicOpen`.
    #[serde(rename = "type")]
    pub group_type: String,
    pub description: String,
    pub url: String,
    pub owner: u64,
    pub members: Vec<u64>,
    pub admins: Vec<u64>,
    pub library_editing: String,
    pub library_reading: String,
    pub file_editing: String,
    pub meta: GroupMeta,
}

/// Group metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupMeta {
    pub created: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub num_items: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GroupFields {
    id: u64,
    version: u64,
    name: String,
    #[serde(rename = "type")]
    group_type: String,
    description: String,
    url: String,
    owner: u64,
    members: Vec<u64>,
    admins: Vec<u64>,
    library_editing: String,
    library_reading: String,
    file_editing: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GroupWire {
    #[serde(flatten)]
    top: GroupFields,
    data: Option<GroupFields>,
    meta: GroupMeta,
}

fn pick_str(nested: String, top: String) -> String {
    if nested.is_empty() {
        top
    } else {
        nested
    }
}

fn pick_num(nested: u64, top: u64) -> u64 {
    if nested == 0 {
        top
    } else {
        nested
    }
}

fn pick_ids(nested: Vec<u64>, top: Vec<u64>) -> Vec<u64> {
    if nested.is_empty() {
        top
    } else {
        nested
    }
}

impl From<GroupWire> for Group {
    fn from(wire: GroupWire) -> Self {
        let top = wire.top;
        let nested = wire.data.unwrap_or_default();
        Self {
            id: pick_num(nested.id, top.id),
            version: pick_num(nested.version, top.version),
            name: pick_str(nested.name, top.name),
            group_type: pick_str(nested.group_type, top.group_type),
            description: pick_str(nested.description, top.description),
            url: pick_str(nested.url, top.url),
            owner: pick_num(nested.owner, top.owner),
            members: pick_ids(nested.members, top.members),
            admins: pick_ids(nested.admins, top.admins),
            library_editing: pick_str(nested.library_editing, top.library_editing),
            library_reading: pick_str(nested.library_reading, top.library_reading),
            file_editing: pick_str(nested.file_editing, top.file_editing),
            meta: wire.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_nested_api_shape() {
        let group: Group = serde_json::from_value(json!({
            "id": 169947,
            "version": 1,
            "links": { "self": { "href": "https://api.zotero.org/groups/169947" } },
            "meta": {
                "created": "2013-05-22T11:22:46Z",
                "lastModified": "2013-05-22T11:26:50Z",
                "numItems": 817
            },
            "data": {
                "id": 169947,
                "version": 1,
                "name": "smart_cities",
                "owner": 10,
                "type": "Private",
                "members": [11, 12],
                "admins": [10]
            }
        }))
        .unwrap();

        assert_eq!(group.id, 169947);
        assert_eq!(group.name, "smart_cities");
        assert_eq!(group.group_type, "Private");
        assert_eq!(group.members, vec![11, 12]);
        assert_eq!(group.meta.num_items, 817);
        assert!(group.meta.created.is_some());
    }

    #[test]
    fn decodes_flat_shape() {
        let group: Group = serde_json::from_value(json!({
            "id": 5,
            "name": "flat",
            "type": "PublicOpen",
            "owner": 1
        }))
        .unwrap();

        assert_eq!(group.name, "flat");
        assert_eq!(group.owner, 1);
        assert!(group.meta.created.is_none());
    }
}
