//! Shared helpers for `zotero-infra` integration tests.

#![allow(dead_code)]

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::MockServer;
use zotero_domain::{ClientConfig, LibraryRef};
use zotero_infra::ZoteroClient;

pub const API_KEY: &str = "test-api-key-0123";

/// Client for `library` pointed at `server`, with rate limiting off.
pub fn client_for(server: &MockServer, library: LibraryRef) -> ZoteroClient {
    let config = ClientConfig::builder(library)
        .base_url(server.uri())
        .api_key(API_KEY)
        .rate_limit(Duration::ZERO)
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client config");
    ZoteroClient::new(config).expect("client")
}

/// Client for user library `1`.
pub fn user_client(server: &MockServer) -> ZoteroClient {
    client_for(server, LibraryRef::user("1"))
}

/// Item envelope as the API returns it.
pub fn item_json(key: &str, version: u64, title: &str) -> Value {
    json!({
        "key": key,
        "version": version,
        "library": { "type": "user", "id": 1, "name": "tester" },
        "meta": { "numChildren": 0 },
        "data": {
            "key": key,
            "version": version,
            "itemType": "book",
            "title": title,
            "creators": [],
            "tags": [],
            "collections": [],
            "relations": {},
            "publisher": "Example Press"
        }
    })
}

/// Parsed JSON body of a recorded request.
pub fn body_of(request: &wiremock::Request) -> Value {
    serde_json::from_slice(&request.body).expect("json request body")
}
