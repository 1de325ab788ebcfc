//! Query parameters accepted by read calls

use std::collections::BTreeMap;

/// Filters, paging and formatting options for a read call
///
/// Zero numbers and empty strings mean "not set". Encoding lives in
/// `zotero_core::request`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub limit: u32,
    pub start: u32,
    pub sort: String,
    pub direction: String,
    pub format: String,
    pub include: String,
    pub style: String,
    pub q: String,
    pub qmode: String,
    /// OR-joined tag filter.
    pub tags: Vec<String>,
    /// OR-joined item type filter; `-` prefixed entries exclude.
    pub item_types: Vec<String>,
    /// Comma-joined key filter.
    pub item_keys: Vec<String>,
    pub since: u64,
    /// Arbitrary extra parameters. These override same-named builtins.
    pub extra: BTreeMap<String, String>,
}

impl QueryParams {
    /// Empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }

    pub fn direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = direction.into();
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn include(mut self, include: impl Into<String>) -> Self {
        self.include = include.into();
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Quick search text.
    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = q.into();
        self
    }

    pub fn qmode(mut self, qmode: impl Into<String>) -> Self {
        self.qmode = qmode.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_types.push(item_type.into());
        self
    }

    pub fn item_key(mut self, key: impl Into<String>) -> Self {
        self.item_keys.push(key.into());
        self
    }

    pub fn since(mut self, version: u64) -> Self {
        self.since = version;
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
