//! Read operations
//!
//! Each call builds a library URL, runs one read exchange and decodes the
//! JSON body. `num_items` and `last_modified_version` read headers instead.

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use zotero_domain::constants::{HEADER_LAST_MODIFIED_VERSION, HEADER_TOTAL_RESULTS};
use zotero_domain::{
    Collection, DeletedContent, Group, Item, LibraryTag, QueryParams, Result, Search, ZoteroError,
};

use crate::client::ZoteroClient;
use crate::http::Exchange;

pub(crate) fn require_key(kind: &str, key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(ZoteroError::Config(format!("{kind} key must not be empty")));
    }
    Ok(())
}

impl ZoteroClient {
    async fn get(&self, url: &str) -> Result<Exchange> {
        self.transport().read(Method::GET, url).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&QueryParams>,
    ) -> Result<T> {
        let url = self.library_url(path, params);
        self.get(&url).await?.json()
    }

    /// All items in the library.
    #[instrument(skip(self, params), fields(library = %self.library().path()))]
    pub async fn items(&self, params: Option<&QueryParams>) -> Result<Vec<Item>> {
        self.get_json("/items", params).await
    }

    /// Top-level items only.
    pub async fn top_items(&self, params: Option<&QueryParams>) -> Result<Vec<Item>> {
        self.get_json("/items/top", params).await
    }

    /// One item by key.
    #[instrument(skip(self, params))]
    pub async fn item(&self, item_key: &str, params: Option<&QueryParams>) -> Result<Item> {
        require_key("item", item_key)?;
        self.get_json(&format!("/items/{item_key}"), params).await
    }

    /// Child items (attachments, notes) of `item_key`.
    pub async fn children(
        &self,
        item_key: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Item>> {
        require_key("item", item_key)?;
        self.get_json(&format!("/items/{item_key}/children"), params).await
    }

    /// Items in the trash.
    pub async fn trash(&self, params: Option<&QueryParams>) -> Result<Vec<Item>> {
        self.get_json("/items/trash", params).await
    }

    pub async fn collections(&self, params: Option<&QueryParams>) -> Result<Vec<Collection>> {
        self.get_json("/collections", params).await
    }

    /// Collections without a parent.
    pub async fn top_collections(&self, params: Option<&QueryParams>) -> Result<Vec<Collection>> {
        self.get_json("/collections/top", params).await
    }

    pub async fn collection(
        &self,
        collection_key: &str,
        params: Option<&QueryParams>,
    ) -> Result<Collection> {
        require_key("collection", collection_key)?;
        self.get_json(&format!("/collections/{collection_key}"), params).await
    }

    /// Direct subcollections of `collection_key`.
    pub async fn subcollections(
        &self,
        collection_key: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Collection>> {
        require_key("collection", collection_key)?;
        self.get_json(&format!("/collections/{collection_key}/collections"), params).await
    }

    pub async fn collection_items(
        &self,
        collection_key: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Item>> {
        require_key("collection", collection_key)?;
        self.get_json(&format!("/collections/{collection_key}/items"), params).await
    }

    pub async fn collection_top_items(
        &self,
        collection_key: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<Item>> {
        require_key("collection", collection_key)?;
        self.get_json(&format!("/collections/{collection_key}/items/top"), params).await
    }

    /// Saved searches.
    pub async fn searches(&self, params: Option<&QueryParams>) -> Result<Vec<Search>> {
        self.get_json("/searches", params).await
    }

    pub async fn search(&self, search_key: &str, params: Option<&QueryParams>) -> Result<Search> {
        require_key("search", search_key)?;
        self.get_json(&format!("/searches/{search_key}"), params).await
    }

    /// Every tag used in the library.
    pub async fn tags(&self, params: Option<&QueryParams>) -> Result<Vec<LibraryTag>> {
        self.get_json("/tags", params).await
    }

    pub async fn item_tags(
        &self,
        item_key: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<LibraryTag>> {
        require_key("item", item_key)?;
        self.get_json(&format!("/items/{item_key}/tags"), params).await
    }

    pub async fn collection_tags(
        &self,
        collection_key: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<LibraryTag>> {
        require_key("collection", collection_key)?;
        self.get_json(&format!("/collections/{collection_key}/tags"), params).await
    }

    /// Groups the configured user belongs to.
    ///
    /// Only valid on a user library; a group library fails before any request.
    #[instrument(skip(self, params))]
    pub async fn groups(&self, params: Option<&QueryParams>) -> Result<Vec<Group>> {
        if !self.library().is_user() {
            return Err(ZoteroError::Config(format!(
                "groups can only be listed for a user library, not {}",
                self.library().path()
            )));
        }
        let url = self.user_url("/groups", params);
        self.get(&url).await?.json()
    }

    /// Total number of items, from the `Total-Results` header.
    #[instrument(skip(self))]
    pub async fn num_items(&self) -> Result<u64> {
        let params = QueryParams::new().format("json").limit(1);
        let url = self.library_url("/items", Some(&params));
        let count = self.get(&url).await?.numeric_header(HEADER_TOTAL_RESULTS)?;
        debug!(count, "item count");
        Ok(count)
    }

    /// Current library version, from the `Last-Modified-Version` header.
    #[instrument(skip(self))]
    pub async fn last_modified_version(&self) -> Result<u64> {
        let params = QueryParams::new().limit(1);
        let url = self.library_url("/items", Some(&params));
        self.get(&url).await?.numeric_header(HEADER_LAST_MODIFIED_VERSION)
    }

    /// Everything deleted since library version `since`.
    ///
    /// `since == 0` sends no `since` parameter at all.
    #[instrument(skip(self))]
    pub async fn deleted(&self, since: u64) -> Result<DeletedContent> {
        let params = QueryParams::new().since(since);
        self.get_json("/deleted", Some(&params)).await
    }
}
