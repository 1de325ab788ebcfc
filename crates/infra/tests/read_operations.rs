//! Read operations against a mock API server

mod support;

use serde_json::json;
use support::{client_for, item_json, user_client, API_KEY};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zotero_domain::{LibraryRef, QueryParams, ZoteroError};

/// Validates query encoding and item decoding for a filtered listing.
///
/// # Test Steps
/// 1. Mount `/users/1/items` answering one item
/// 2. List items with limit, start, sort and an item-type filter
/// 3. Verify the exact query string and the decoded fields
#[tokio::test]
async fn items_send_sorted_query_and_decode_envelopes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1/items"))
        .and(header("Zotero-API-Key", API_KEY))
        .and(header("Zotero-API-Version", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([item_json("ABCD1234", 5, "Dune")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let params = QueryParams::new()
        .limit(10)
        .start(20)
        .sort("title")
        .item_type("book")
        .item_type("-attachment");
    let items = user_client(&server).items(Some(&params)).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].key, "ABCD1234");
    assert_eq!(items[0].version, 5);
    assert_eq!(items[0].data.title, "Dune");
    assert_eq!(items[0].data.extra.get("publisher"), Some(&json!("Example Press")));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("itemType=book+%7C%7C+-attachment&limit=10&sort=title&start=20")
    );
}

#[tokio::test]
async fn item_paths_follow_the_library_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/groups/99/items/ABCD1234/children"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/groups/99/collections/COLL0001/items/top"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, LibraryRef::group("99"));
    assert!(client.children("ABCD1234", None).await.unwrap().is_empty());
    assert!(client.collection_top_items("COLL0001", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_item_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1/items/NOPE0000"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Item not found"))
        .mount(&server)
        .await;

    let err = user_client(&server).item("NOPE0000", None).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(err, ZoteroError::Api { body, .. } if body == "Item not found"));
}

#[tokio::test]
async fn empty_key_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = user_client(&server).item("", None).await.unwrap_err();
    assert!(matches!(err, ZoteroError::Config(_)));
}

#[tokio::test]
async fn collections_decode_false_and_string_parents() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "key": "TOP00001",
                "version": 3,
                "data": { "key": "TOP00001", "name": "Top", "parentCollection": false }
            },
            {
                "key": "SUB00001",
                "version": 4,
                "data": { "key": "SUB00001", "name": "Sub", "parentCollection": "TOP00001" }
            }
        ])))
        .mount(&server)
        .await;

    let collections = user_client(&server).collections(None).await.unwrap();

    assert!(collections[0].data.parent_collection.is_top_level());
    assert_eq!(collections[1].data.parent_collection.as_key(), Some("TOP00001"));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1/searches"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = user_client(&server).searches(None).await.unwrap_err();
    assert!(matches!(err, ZoteroError::Decode(_)));
}

/// Validates that the groups call is refused for group libraries.
///
/// # Test Steps
/// 1. Mount a catch-all mock that expects zero requests
/// 2. Ask a group-library client for groups
/// 3. Verify a configuration error and no traffic
#[tokio::test]
async fn groups_on_group_library_fail_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server, LibraryRef::group("99")).groups(None).await.unwrap_err();

    assert!(matches!(err, ZoteroError::Config(msg) if msg.contains("user library")));
}

#[tokio::test]
async fn groups_use_the_user_root() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 42,
                "version": 7,
                "meta": { "numItems": 12 },
                "data": {
                    "id": 42,
                    "name": "Lab",
                    "type": "Private",
                    "owner": 1,
                    "members": [2, 3]
                }
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let groups = user_client(&server).groups(None).await.unwrap();

    assert_eq!(groups[0].id, 42);
    assert_eq!(groups[0].name, "Lab");
    assert_eq!(groups[0].members, vec![2, 3]);
    assert_eq!(groups[0].meta.num_items, 12);
}

#[tokio::test]
async fn counts_and_versions_come_from_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1/items"))
        .and(query_param("format", "json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Total-Results", "321")
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/1/items"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Last-Modified-Version", "1234")
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let client = user_client(&server);
    assert_eq!(client.num_items().await.unwrap(), 321);
    assert_eq!(client.last_modified_version().await.unwrap(), 1234);
}

#[tokio::test]
async fn absent_count_header_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = user_client(&server).num_items().await.unwrap_err();
    assert!(matches!(err, ZoteroError::MissingHeader("Total-Results")));
}

#[tokio::test]
async fn deleted_since_zero_omits_the_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1/deleted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": ["A1"], "collections": [], "searches": [], "tags": ["old"]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = user_client(&server);
    let all = client.deleted(0).await.unwrap();
    client.deleted(15).await.unwrap();

    assert_eq!(all.items, vec!["A1"]);
    assert_eq!(all.tags, vec!["old"]);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
    assert_eq!(requests[1].url.query(), Some("since=15"));
}

#[tokio::test]
async fn tags_decode_usage_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1/items/ABCD1234/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "tag": "physics", "meta": { "type": 0, "numItems": 4 } },
            { "tag": "auto", "meta": { "type": 1, "numItems": 1 } }
        ])))
        .mount(&server)
        .await;

    let tags = user_client(&server).item_tags("ABCD1234", None).await.unwrap();

    assert_eq!(tags[0].tag, "physics");
    assert_eq!(tags[0].meta.num_items, 4);
    assert!(!tags[1].meta.kind.is_manual());
}

#[tokio::test]
async fn schema_calls_use_the_api_root_and_locale() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/itemTypes"))
        .and(query_param("locale", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "itemType": "book", "localized": "Book" }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/itemTypeCreatorTypes"))
        .and(query_param("itemType", "book"))
        .and(query_param("locale", "fr-FR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "creatorType": "author", "localized": "Auteur" }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items/new"))
        .and(query_param("itemType", "book"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "itemType": "book", "title": "" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = user_client(&server);
    let types = client.item_types(None).await.unwrap();
    let creators = client.item_type_creator_types("book", Some("fr-FR")).await.unwrap();
    let template = client.new_item_template("book").await.unwrap();

    assert_eq!(types[0].localized, "Book");
    assert_eq!(creators[0].creator_type, "author");
    assert_eq!(template.get("itemType"), Some(&json!("book")));
}
