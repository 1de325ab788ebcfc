//! Collections and saved searches

use std::collections::BTreeMap;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::envelope::{is_zero, LibraryInfo, Links, Meta};

/// Parent reference of a collection
///
/// Encodes as boolean `false` when there is no parent and as the parent key
/// otherwise. Decoding accepts `false`, `null`, or a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParentCollection(Option<String>);

impl ParentCollection {
    /// Top-level collection.
    pub fn none() -> Self {
        Self(None)
    }

    /// Child of the collection with `key`. An empty key means top-level.
    pub fn key(key: impl Into<String>) -> Self {
        let key = key.into();
        if key.is_empty() {
            Self(None)
        } else {
            Self(Some(key))
        }
    }

    /// Parent key, if any.
    pub fn as_key(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// True for top-level collections.
    pub fn is_top_level(&self) -> bool {
        self.0.is_none()
    }
}

impl From<Option<String>> for ParentCollection {
    fn from(value: Option<String>) -> Self {
        value.map_or_else(Self::none, Self::key)
    }
}

impl Serialize for ParentCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(key) => serializer.serialize_str(key),
            None => serializer.serialize_bool(false),
        }
    }
}

struct ParentCollectionVisitor;

impl<'de> Visitor<'de> for ParentCollectionVisitor {
    type Value = ParentCollection;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("false, null, or a collection key")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        if value {
            Err(E::invalid_value(de::Unexpected::Bool(true), &self))
        } else {
            Ok(ParentCollection::none())
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(ParentCollection::key(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(ParentCollection::key(value))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ParentCollection::none())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ParentCollection::none())
    }
}

impl<'de> Deserialize<'de> for ParentCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ParentCollectionVisitor)
    }
}

/// Collection envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collection {
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
    pub data: CollectionData,
}

impl Collection {
    /// Wrap caller-built data in an unsaved envelope.
    pub fn new(data: CollectionData) -> Self {
        Self { data, ..Self::default() }
    }
}

/// Collection content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectionData {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub version: u64,
    pub name: String,
    pub parent_collection: ParentCollection,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub relations: BTreeMap<String, Value>,
}

impl CollectionData {
    /// Top-level collection named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Builder-style parent setter.
    pub fn with_parent(mut self, parent_key: impl Into<String>) -> Self {
        self.parent_collection = ParentCollection::key(parent_key);
        self
    }
}

/// Saved search envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Search {
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
    pub data: SearchData,
}

impl Search {
    /// Wrap caller-built data in an unsaved envelope.
    pub fn new(data: SearchData) -> Self {
        Self { data, ..Self::default() }
    }
}

/// Saved search content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchData {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub version: u64,
    pub name: String,
    pub conditions: Vec<SearchCondition>,
}

impl SearchData {
    /// Search named `name` with no conditions yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Builder-style condition append.
    pub fn with_condition(
        mut self,
        condition: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.conditions.push(SearchCondition {
            condition: condition.into(),
            operator: operator.into(),
            value: value.into(),
        });
        self
    }
}

/// One condition of a saved search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCondition {
    pub condition: String,
    pub operator: String,
    pub value: String,
}
