//! Request targets and query strings
//!
//! Query keys are emitted in alphabetical order with form-urlencoded escaping,
//! so identical parameter sets always produce identical URLs.

use std::collections::BTreeMap;

use url::form_urlencoded;
use zotero_domain::constants::OR_SEPARATOR;
use zotero_domain::{LibraryRef, QueryParams};

/// Join multi-valued filters with the OR separator, preserving order.
pub fn join_with_or<S: AsRef<str>>(values: &[S]) -> String {
    values.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(OR_SEPARATOR)
}

/// Encode `params` as a query string without the leading `?`.
///
/// Zero numbers and empty strings are omitted. `extra` entries are applied
/// last and replace builtins of the same name.
pub fn encode_query(params: &QueryParams) -> String {
    let mut pairs: BTreeMap<&str, String> = BTreeMap::new();

    if params.limit > 0 {
        pairs.insert("limit", params.limit.to_string());
    }
    if params.start > 0 {
        pairs.insert("start", params.start.to_string());
    }
    for (key, value) in [
        ("sort", &params.sort),
        ("direction", &params.direction),
        ("format", &params.format),
        ("include", &params.include),
        ("style", &params.style),
        ("q", &params.q),
        ("qmode", &params.qmode),
    ] {
        if !value.is_empty() {
            pairs.insert(key, value.clone());
        }
    }
    if params.since > 0 {
        pairs.insert("since", params.since.to_string());
    }
    if !params.tags.is_empty() {
        pairs.insert("tag", join_with_or(&params.tags));
    }
    if !params.item_keys.is_empty() {
        pairs.insert("itemKey", params.item_keys.join(","));
    }
    if !params.item_types.is_empty() {
        pairs.insert("itemType", join_with_or(&params.item_types));
    }
    for (key, value) in &params.extra {
        pairs.insert(key.as_str(), value.clone());
    }

    form_urlencoded::Serializer::new(String::new()).extend_pairs(pairs).finish()
}

/// Append the encoded `params` to `url`, if any.
pub fn with_query(mut url: String, params: Option<&QueryParams>) -> String {
    let query = params.map(encode_query).unwrap_or_default();
    if !query.is_empty() {
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&query);
    }
    url
}

/// `{base}/{users|groups}/{id}{path}`
pub fn library_url(base_url: &str, library: &LibraryRef, path: &str) -> String {
    format!("{base_url}/{}{path}", library.path())
}

/// `{base}{path}` for calls outside any library, such as schema lookups.
pub fn root_url(base_url: &str, path: &str) -> String {
    format!("{base_url}{path}")
}

/// `{base}/users/{id}{path}` for user-scoped calls such as group membership.
pub fn user_url(base_url: &str, user_id: &str, path: &str) -> String {
    format!("{base_url}/users/{user_id}{path}")
}
