//! Writable resource kinds
//!
//! Items, collections and searches share one envelope shape and one write
//! protocol; this trait carries what differs between them.

use serde::Serialize;
use zotero_domain::{Collection, CollectionData, Item, ItemData, Search, SearchData};

/// Envelope that can be created, updated and deleted
pub trait Resource: Send + Sync {
    /// Payload sent to the server.
    type Data: Serialize;

    /// Human readable kind used in error messages.
    const KIND: &'static str;
    /// Collection endpoint below the library path.
    const COLLECTION_PATH: &'static str;
    /// Query parameter naming the keys of a batch delete.
    const BATCH_KEY_PARAM: &'static str;

    fn envelope_key(&self) -> &str;
    fn envelope_version(&self) -> u64;
    fn data(&self) -> &Self::Data;
    fn data_key(&self) -> &str;
    fn data_version(&self) -> u64;

    /// Path of one resource, e.g. `/items/ABCD1234`.
    fn resource_path(key: &str) -> String {
        format!("{}/{key}", Self::COLLECTION_PATH)
    }
}

impl Resource for Item {
    type Data = ItemData;

    const KIND: &'static str = "item";
    const COLLECTION_PATH: &'static str = "/items";
    const BATCH_KEY_PARAM: &'static str = "itemKey";

    fn envelope_key(&self) -> &str {
        &self.key
    }

    fn envelope_version(&self) -> u64 {
        self.version
    }

    fn data(&self) -> &ItemData {
        &self.data
    }

    fn data_key(&self) -> &str {
        &self.data.key
    }

    fn data_version(&self) -> u64 {
        self.data.version
    }
}

impl Resource for Collection {
    type Data = CollectionData;

    const KIND: &'static str = "collection";
    const COLLECTION_PATH: &'static str = "/collections";
    const BATCH_KEY_PARAM: &'static str = "collectionKey";

    fn envelope_key(&self) -> &str {
        &self.key
    }

    fn envelope_version(&self) -> u64 {
        self.version
    }

    fn data(&self) -> &CollectionData {
        &self.data
    }

    fn data_key(&self) -> &str {
        &self.data.key
    }

    fn data_version(&self) -> u64 {
        self.data.version
    }
}

impl Resource for Search {
    type Data = SearchData;

    const KIND: &'static str = "search";
    const COLLECTION_PATH: &'static str = "/searches";
    const BATCH_KEY_PARAM: &'static str = "searchKey";

    fn envelope_key(&self) -> &str {
        &self.key
    }

    fn envelope_version(&self) -> u64 {
        self.version
    }

    fn data(&self) -> &SearchData {
        &self.data
    }

    fn data_key(&self) -> &str {
        &self.data.key
    }

    fn data_version(&self) -> u64 {
        self.data.version
    }
}
