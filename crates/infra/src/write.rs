//! Write operations
//!
//! Create, update and delete for items, collections and searches share one
//! generic implementation over [`Resource`]. All preconditions (batch size,
//! keys, versions) are checked before the request is sent.

use reqwest::Method;
use tracing::{debug, info, instrument};
use zotero_core::request::join_with_or;
use zotero_core::write::{
    batch_update_body, create_body, merge_tags, update_body, validate_batch_size, validate_delete,
    Resource,
};
use zotero_domain::{Collection, Item, QueryParams, Result, Search, WriteResponse, ZoteroError};

use crate::client::ZoteroClient;
use crate::read::require_key;

const BATCH_OK: &[u16] = &[200];
const UPDATE_OK: &[u16] = &[204, 200];
const DELETE_OK: &[u16] = &[204];

impl ZoteroClient {
    async fn create<R: Resource>(&self, resources: &[R]) -> Result<WriteResponse> {
        let body = create_body(resources)?;
        let url = self.library_url(R::COLLECTION_PATH, None);
        let response: WriteResponse = self
            .transport()
            .write(Method::POST, &url, Some(body), 0)
            .await?
            .expect_status(BATCH_OK)?
            .json()?;
        debug!(
            kind = R::KIND,
            success = response.success.len(),
            unchanged = response.unchanged.len(),
            failed = response.failed.len(),
            "batch create finished"
        );
        Ok(response)
    }

    async fn update_one<R: Resource>(&self, resource: &R) -> Result<()> {
        let (target, body) = update_body(resource)?;
        let url = self.library_url(&R::resource_path(&target.key), None);
        self.transport()
            .write(Method::PATCH, &url, Some(body), target.version)
            .await?
            .expect_status(UPDATE_OK)?;
        debug!(kind = R::KIND, key = %target.key, version = target.version, "updated");
        Ok(())
    }

    async fn update_many<R: Resource>(&self, resources: &[R]) -> Result<WriteResponse> {
        let body = batch_update_body(resources)?;
        let url = self.library_url(R::COLLECTION_PATH, None);
        self.transport()
            .write(Method::POST, &url, Some(body), 0)
            .await?
            .expect_status(BATCH_OK)?
            .json()
    }

    async fn delete_one<R: Resource>(&self, key: &str, version: u64) -> Result<()> {
        validate_delete(R::KIND, &[key.to_string()], version)?;
        let url = self.library_url(&R::resource_path(key), None);
        self.transport()
            .write(Method::DELETE, &url, None, version)
            .await?
            .expect_status(DELETE_OK)?;
        debug!(kind = R::KIND, key, "deleted");
        Ok(())
    }

    async fn delete_many<R: Resource>(&self, keys: &[String], version: u64) -> Result<()> {
        validate_batch_size(keys.len())?;
        validate_delete(R::KIND, keys, version)?;
        let params = QueryParams::new().extra(R::BATCH_KEY_PARAM, keys.join(","));
        let url = self.library_url(R::COLLECTION_PATH, Some(&params));
        self.transport()
            .write(Method::DELETE, &url, None, version)
            .await?
            .expect_status(DELETE_OK)?;
        debug!(kind = R::KIND, count = keys.len(), "batch deleted");
        Ok(())
    }

    /* ---------------------------------------------------------------------- */
    /* Items */
    /* ---------------------------------------------------------------------- */

    /// Create up to 50 items. Per-entry outcomes are in the response.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn create_items(&self, items: &[Item]) -> Result<WriteResponse> {
        self.create(items).await
    }

    /// Update one item at its current version.
    ///
    /// The version comes from the envelope, or from `data.version` when the
    /// envelope carries none. A stale version fails with a 412 API error.
    #[instrument(skip(self, item), fields(key = %item.key))]
    pub async fn update_item(&self, item: &Item) -> Result<()> {
        self.update_one(item).await
    }

    /// Update up to 50 items; each must carry its own key and version.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn update_items(&self, items: &[Item]) -> Result<WriteResponse> {
        self.update_many(items).await
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, item_key: &str, version: u64) -> Result<()> {
        self.delete_one::<Item>(item_key, version).await
    }

    /// Delete up to 50 items at library `version`.
    #[instrument(skip(self, item_keys), fields(count = item_keys.len()))]
    pub async fn delete_items(&self, item_keys: &[String], version: u64) -> Result<()> {
        self.delete_many::<Item>(item_keys, version).await
    }

    /* ---------------------------------------------------------------------- */
    /* Collections */
    /* ---------------------------------------------------------------------- */

    #[instrument(skip(self, collections), fields(count = collections.len()))]
    pub async fn create_collections(&self, collections: &[Collection]) -> Result<WriteResponse> {
        self.create(collections).await
    }

    #[instrument(skip(self, collection), fields(key = %collection.key))]
    pub async fn update_collection(&self, collection: &Collection) -> Result<()> {
        self.update_one(collection).await
    }

    pub async fn update_collections(&self, collections: &[Collection]) -> Result<WriteResponse> {
        self.update_many(collections).await
    }

    pub async fn delete_collection(&self, collection_key: &str, version: u64) -> Result<()> {
        self.delete_one::<Collection>(collection_key, version).await
    }

    pub async fn delete_collections(&self, collection_keys: &[String], version: u64) -> Result<()> {
        self.delete_many::<Collection>(collection_keys, version).await
    }

    /* ---------------------------------------------------------------------- */
    /* Searches */
    /* ---------------------------------------------------------------------- */

    pub async fn create_searches(&self, searches: &[Search]) -> Result<WriteResponse> {
        self.create(searches).await
    }

    pub async fn update_search(&self, search: &Search) -> Result<()> {
        self.update_one(search).await
    }

    pub async fn update_searches(&self, searches: &[Search]) -> Result<WriteResponse> {
        self.update_many(searches).await
    }

    pub async fn delete_search(&self, search_key: &str, version: u64) -> Result<()> {
        self.delete_one::<Search>(search_key, version).await
    }

    pub async fn delete_searches(&self, search_keys: &[String], version: u64) -> Result<()> {
        self.delete_many::<Search>(search_keys, version).await
    }

    /* ---------------------------------------------------------------------- */
    /* Tags */
    /* ---------------------------------------------------------------------- */

    /// Add manual tags to an item.
    ///
    /// Fetches the item, appends names it does not have yet and updates it.
    /// Not atomic: a change made in between surfaces as a 412 on the update.
    #[instrument(skip(self, tags), fields(count = tags.len()))]
    pub async fn add_tags<S: AsRef<str> + Sync>(&self, item_key: &str, tags: &[S]) -> Result<()> {
        require_key("item", item_key)?;
        let mut item = self.item(item_key, None).await?;
        let added = merge_tags(&mut item.data, tags);
        if added == 0 {
            debug!(item_key, "all tags already present");
        }
        self.update_item(&item).await?;
        info!(item_key, added, "tags added");
        Ok(())
    }

    /// Remove tags by name from every item in the library.
    #[instrument(skip(self, tags), fields(count = tags.len()))]
    pub async fn delete_tags<S: AsRef<str> + Sync>(&self, version: u64, tags: &[S]) -> Result<()> {
        validate_batch_size(tags.len())?;
        if tags.iter().any(|tag| tag.as_ref().trim().is_empty()) {
            return Err(ZoteroError::Config("tag names must not be empty".into()));
        }
        if version == 0 {
            return Err(ZoteroError::Config("deleting tags requires a library version".into()));
        }

        let params = QueryParams::new().extra("tag", join_with_or(tags));
        let url = self.library_url("/tags", Some(&params));
        self.transport()
            .write(Method::DELETE, &url, None, version)
            .await?
            .expect_status(DELETE_OK)?;
        Ok(())
    }
}
