//! Schema catalog entries

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Item type with its localized label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaItemType {
    pub item_type: String,
    pub localized: String,
}

/// Field with its localized label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaField {
    pub field: String,
    pub localized: String,
}

/// Creator type with its localized label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaCreatorType {
    pub creator_type: String,
    pub localized: String,
}

/// Empty item of one type with every valid field present
pub type NewItemTemplate = Map<String, Value>;
