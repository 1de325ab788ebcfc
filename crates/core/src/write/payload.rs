//! Preconditions and request bodies of versioned writes
//!
//! Every check here runs before any request is sent.

use serde_json::{Map, Value};
use zotero_domain::constants::MAX_BATCH_SIZE;
use zotero_domain::{Result, ZoteroError};

use super::resource::Resource;

/// Key and version a mutation must carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedKey {
    pub key: String,
    pub version: u64,
}

/// Reject batches that are empty or larger than the protocol allows.
pub fn validate_batch_size(len: usize) -> Result<()> {
    if len == 0 {
        return Err(ZoteroError::Config("batch must contain at least one entry".into()));
    }
    if len > MAX_BATCH_SIZE {
        return Err(ZoteroError::Config(format!(
            "maximum {MAX_BATCH_SIZE} entries per request, got {len}"
        )));
    }
    Ok(())
}

fn pick_key<'a>(envelope: &'a str, data: &'a str) -> &'a str {
    if envelope.is_empty() {
        data
    } else {
        envelope
    }
}

fn pick_version(envelope: u64, data: u64) -> u64 {
    if envelope == 0 {
        data
    } else {
        envelope
    }
}

/// Key and version of `resource`, preferring envelope fields over data ones.
pub fn resolve_versioned_key<R: Resource>(resource: &R) -> Result<VersionedKey> {
    let key = pick_key(resource.envelope_key(), resource.data_key());
    if key.is_empty() {
        return Err(ZoteroError::Config(format!("{} key is required", R::KIND)));
    }

    let version = pick_version(resource.envelope_version(), resource.data_version());
    if version == 0 {
        return Err(ZoteroError::Config(format!("{} {key} has no version", R::KIND)));
    }

    Ok(VersionedKey { key: key.to_string(), version })
}

/// Check the caller-supplied key and version of a delete.
pub fn validate_delete(kind: &str, keys: &[String], version: u64) -> Result<()> {
    if keys.iter().any(|key| key.trim().is_empty()) {
        return Err(ZoteroError::Config(format!("{kind} key must not be empty")));
    }
    if version == 0 {
        return Err(ZoteroError::Config(format!("deleting a {kind} requires a library version")));
    }
    Ok(())
}

fn data_object<R: Resource>(resource: &R) -> Result<Map<String, Value>> {
    match serde_json::to_value(resource.data())? {
        Value::Object(map) => Ok(map),
        other => Err(ZoteroError::Decode(format!(
            "{} data encoded as {other} instead of an object",
            R::KIND
        ))),
    }
}

/// Body of a batch create: the data objects with `key`/`version` removed.
pub fn create_body<R: Resource>(resources: &[R]) -> Result<Vec<u8>> {
    validate_batch_size(resources.len())?;

    let entries = resources
        .iter()
        .map(|resource| {
            let mut data = data_object(resource)?;
            data.remove("key");
            data.remove("version");
            Ok(Value::Object(data))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(serde_json::to_vec(&entries)?)
}

fn versioned_object<R: Resource>(resource: &R, target: &VersionedKey) -> Result<Value> {
    let mut data = data_object(resource)?;
    data.insert("key".into(), Value::String(target.key.clone()));
    data.insert("version".into(), Value::from(target.version));
    Ok(Value::Object(data))
}

/// Target and body of a single update.
pub fn update_body<R: Resource>(resource: &R) -> Result<(VersionedKey, Vec<u8>)> {
    let target = resolve_versioned_key(resource)?;
    let body = serde_json::to_vec(&versioned_object(resource, &target)?)?;
    Ok((target, body))
}

/// Body of a batch update; every entry must already carry key and version.
pub fn batch_update_body<R: Resource>(resources: &[R]) -> Result<Vec<u8>> {
    validate_batch_size(resources.len())?;

    let entries = resources
        .iter()
        .map(|resource| {
            let target = resolve_versioned_key(resource)?;
            versioned_object(resource, &target)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(serde_json::to_vec(&entries)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use zotero_domain::{Collection, CollectionData, Item, ItemData};

    use super::*;

    fn item(key: &str, version: u64) -> Item {
        Item { key: key.into(), version, ..Item::new(ItemData::new("book").with_title("T")) }
    }

    #[test]
    fn batch_bounds_are_enforced() {
        assert!(validate_batch_size(0).is_err());
        assert!(validate_batch_size(1).is_ok());
        assert!(validate_batch_size(50).is_ok());
        assert!(matches!(validate_batch_size(51), Err(ZoteroError::Config(_))));
    }

    #[test]
    fn envelope_wins_over_data() {
        let mut entry = item("ENVKEY01", 7);
        entry.data.key = "DATAKEY1".into();
        entry.data.version = 3;

        let target = resolve_versioned_key(&entry).unwrap();
        assert_eq!(target, VersionedKey { key: "ENVKEY01".into(), version: 7 });
    }

    #[test]
    fn data_fields_fill_missing_envelope() {
        let mut entry = item("", 0);
        entry.data.key = "DATAKEY1".into();
        entry.data.version = 3;

        let target = resolve_versioned_key(&entry).unwrap();
        assert_eq!(target, VersionedKey { key: "DATAKEY1".into(), version: 3 });
    }

    #[test]
    fn missing_version_is_rejected() {
        let err = resolve_versioned_key(&item("ABCD1234", 0)).unwrap_err();
        assert!(matches!(err, ZoteroError::Config(message) if message.contains("version")));
        assert!(resolve_versioned_key(&item("", 5)).is_err());
    }

    #[test]
    fn create_body_strips_identity() {
        let mut entry = item("ABCD1234", 4);
        entry.data.key = "ABCD1234".into();
        entry.data.version = 4;

        let body: Value = serde_json::from_slice(&create_body(&[entry]).unwrap()).unwrap();
        assert_eq!(body, json!([{ "itemType": "book", "title": "T" }]));
    }

    #[test]
    fn update_bodies_inject_identity() {
        let (target, body) = update_body(&item("ABCD1234", 5)).unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(target.version, 5);
        assert_eq!(body["key"], "ABCD1234");
        assert_eq!(body["version"], 5);

        let body = batch_update_body(&[item("K1", 1), item("K2", 2)]).unwrap();
        let batch: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(batch[1]["key"], "K2");
        assert_eq!(batch[1]["version"], 2);
    }

    #[test]
    fn batch_update_fails_whole_batch_on_one_unversioned_entry() {
        let err = batch_update_body(&[item("K1", 1), item("K2", 0)]).unwrap_err();
        assert!(matches!(err, ZoteroError::Config(_)));
    }

    #[test]
    fn collection_create_body_keeps_false_parent() {
        let body: Value = serde_json::from_slice(
            &create_body(&[Collection::new(CollectionData::new("Reading"))]).unwrap(),
        )
        .unwrap();
        assert_eq!(body, json!([{ "name": "Reading", "parentCollection": false }]));
    }

    #[test]
    fn deletes_need_keys_and_version() {
        assert!(validate_delete("item", &["ABCD1234".into()], 10).is_ok());
        assert!(validate_delete("item", &["".into()], 10).is_err());
        assert!(validate_delete("item", &["ABCD1234".into()], 0).is_err());
    }
}
