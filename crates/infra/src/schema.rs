//! Schema lookups at the API root
//!
//! `locale` falls back to the configured locale when `None`.

use reqwest::Method;
use serde::de::DeserializeOwned;
use zotero_domain::{
    NewItemTemplate, QueryParams, Result, SchemaCreatorType, SchemaField, SchemaItemType,
};

use crate::client::ZoteroClient;
use crate::read::require_key;

impl ZoteroClient {
    fn schema_params(&self, locale: Option<&str>) -> QueryParams {
        let locale = locale.filter(|l| !l.is_empty()).unwrap_or(&self.config().locale);
        QueryParams::new().extra("locale", locale)
    }

    async fn get_schema<T: DeserializeOwned>(&self, path: &str, params: &QueryParams) -> Result<T> {
        let url = self.root_url(path, Some(params));
        self.transport().read(Method::GET, &url).await?.json()
    }

    pub async fn item_types(&self, locale: Option<&str>) -> Result<Vec<SchemaItemType>> {
        self.get_schema("/itemTypes", &self.schema_params(locale)).await
    }

    pub async fn item_fields(&self, locale: Option<&str>) -> Result<Vec<SchemaField>> {
        self.get_schema("/itemFields", &self.schema_params(locale)).await
    }

    /// Fields valid for `item_type`.
    pub async fn item_type_fields(
        &self,
        item_type: &str,
        locale: Option<&str>,
    ) -> Result<Vec<SchemaField>> {
        require_key("item type", item_type)?;
        let params = self.schema_params(locale).extra("itemType", item_type);
        self.get_schema("/itemTypeFields", &params).await
    }

    /// Creator roles valid for `item_type`.
    pub async fn item_type_creator_types(
        &self,
        item_type: &str,
        locale: Option<&str>,
    ) -> Result<Vec<SchemaCreatorType>> {
        require_key("item type", item_type)?;
        let params = self.schema_params(locale).extra("itemType", item_type);
        self.get_schema("/itemTypeCreatorTypes", &params).await
    }

    pub async fn creator_fields(&self, locale: Option<&str>) -> Result<Vec<SchemaField>> {
        self.get_schema("/creatorFields", &self.schema_params(locale)).await
    }

    /// Empty JSON template for a new item of `item_type`.
    pub async fn new_item_template(&self, item_type: &str) -> Result<NewItemTemplate> {
        require_key("item type", item_type)?;
        let params = QueryParams::new().extra("itemType", item_type);
        self.get_schema("/items/new", &params).await
    }
}
