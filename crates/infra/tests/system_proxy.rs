//! Proxy settings from the environment
//!
//! Kept in its own test binary because it sets process-wide variables.

mod support;

use std::time::Duration;

use support::{item_json, API_KEY};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zotero_domain::{ClientConfig, LibraryRef};
use zotero_infra::ZoteroClient;

/// Validates that requests honour `HTTP_PROXY`.
///
/// # Test Steps
/// 1. Start a mock server and export it as the HTTP proxy
/// 2. Point the client at a host that does not resolve
/// 3. Fetch an item and verify the proxy answered it
#[tokio::test]
async fn requests_go_through_the_environment_proxy() {
    let proxy = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1/items/ABCD1234"))
        .and(header("Zotero-API-Key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_json(
            "ABCD1234",
            4,
            "Proxied",
        )))
        .expect(1)
        .mount(&proxy)
        .await;

    for name in ["NO_PROXY", "no_proxy", "ALL_PROXY", "all_proxy"] {
        std::env::remove_var(name);
    }
    std::env::set_var("HTTP_PROXY", proxy.uri());
    std::env::set_var("http_proxy", proxy.uri());

    let config = ClientConfig::builder(LibraryRef::user("1"))
        .base_url("http://zotero.invalid")
        .api_key(API_KEY)
        .rate_limit(Duration::ZERO)
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client config");
    let client = ZoteroClient::new(config).expect("client");

    let item = client.item("ABCD1234", None).await.expect("item through proxy");

    assert_eq!(item.data.title, "Proxied");
}
