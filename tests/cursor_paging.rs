//! Integration tests for cursor-based deep paging: result shape, the item
//! ceiling, cursor exhaustion, and validation before any network call.

use crossref_client::{ApiResult, CrossrefClient, CrossrefError, SearchQuery};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A work-list page with `count` items and the given next cursor
/// (`None` renders as JSON null, meaning the sequence is exhausted).
fn page(count: usize, total: u64, next: Option<&str>) -> serde_json::Value {
    let items: Vec<_> = (0..count)
        .map(|i| json!({"DOI": format!("10.5555/{}", i)}))
        .collect();
    json!({
        "status": "ok",
        "message-type": "work-list",
        "message-version": "1.0.0",
        "message": {
            "total-results": total,
            "items-per-page": count,
            "items": items,
            "next-cursor": next
        }
    })
}

async fn mount_page(server: &MockServer, cursor: &str, body: serde_json::Value, expect: u64) {
    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("cursor", cursor))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expect)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_first_page_without_cursor_returns_bare_document() {
    let server = MockServer::start().await;
    mount_page(&server, "*", page(10, 10, None), 1).await;

    let client = CrossrefClient::new().with_base_url(server.uri());
    let res = client
        .works(SearchQuery::new().query("widget").cursor("*"))
        .await
        .unwrap();

    let doc = res.as_document().expect("bare document, not a page list");
    assert_eq!(doc.item_count(), 10);
}

#[tokio::test]
async fn test_total_reached_on_first_page_returns_one_element_page_list() {
    let server = MockServer::start().await;
    // The server hands out a cursor even when the first page already
    // covers everything; no follow-up request may be made.
    mount_page(&server, "*", page(10, 10, Some("AAA")), 1).await;
    mount_page(&server, "AAA", page(0, 10, None), 0).await;

    let client = CrossrefClient::new().with_base_url(server.uri());
    let res = client
        .works(SearchQuery::new().query("widget").cursor("*"))
        .await
        .unwrap();

    let pages = res.as_pages().expect("page list");
    assert_eq!(pages.len(), 1);
}

#[tokio::test]
async fn test_ceiling_stops_the_sequence_at_a_page_boundary() {
    let server = MockServer::start().await;
    mount_page(&server, "*", page(10, 100, Some("AAA")), 1).await;
    mount_page(&server, "AAA", page(10, 100, Some("BBB")), 1).await;
    mount_page(&server, "BBB", page(10, 100, Some("CCC")), 1).await;
    mount_page(&server, "CCC", page(10, 100, Some("DDD")), 0).await;

    let client = CrossrefClient::new().with_base_url(server.uri());
    let res = client
        .works(
            SearchQuery::new()
                .query("widget")
                .cursor("*")
                .cursor_max(25)
                .limit(10),
        )
        .await
        .unwrap();

    // min(ceiling, total) rounded up to the page boundary: 25 -> 30 items.
    let pages = res.as_pages().expect("page list");
    assert_eq!(pages.len(), 3);
    assert_eq!(res.item_count(), 30);
}

#[tokio::test]
async fn test_cursor_exhaustion_stops_the_sequence() {
    let server = MockServer::start().await;
    mount_page(&server, "*", page(10, 100, Some("AAA")), 1).await;
    mount_page(&server, "AAA", page(5, 100, None), 1).await;

    let client = CrossrefClient::new().with_base_url(server.uri());
    let res = client
        .works(SearchQuery::new().query("widget").cursor("*").limit(10))
        .await
        .unwrap();

    let pages = res.as_pages().expect("page list");
    assert_eq!(pages.len(), 2);
    assert_eq!(res.item_count(), 15);
}

#[tokio::test]
async fn test_server_total_bounds_the_sequence() {
    let server = MockServer::start().await;
    mount_page(&server, "*", page(10, 15, Some("AAA")), 1).await;
    mount_page(&server, "AAA", page(5, 15, Some("BBB")), 1).await;
    mount_page(&server, "BBB", page(0, 15, Some("CCC")), 0).await;

    let client = CrossrefClient::new().with_base_url(server.uri());
    let res = client
        .works(
            SearchQuery::new()
                .query("widget")
                .cursor("*")
                .cursor_max(5000)
                .limit(10),
        )
        .await
        .unwrap();

    assert_eq!(res.item_count(), 15);
}

#[tokio::test]
async fn test_progress_reporting_does_not_change_the_result() {
    let server = MockServer::start().await;
    mount_page(&server, "*", page(10, 20, Some("AAA")), 1).await;
    mount_page(&server, "AAA", page(10, 20, None), 1).await;

    let client = CrossrefClient::new().with_base_url(server.uri());
    let res = client
        .works(
            SearchQuery::new()
                .query("widget")
                .cursor("*")
                .limit(10)
                .progress_bar(true),
        )
        .await
        .unwrap();

    assert_eq!(res.as_pages().map(|p| p.len()), Some(2));
    assert_eq!(res.item_count(), 20);
}

#[tokio::test]
async fn test_cursor_with_offset_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = CrossrefClient::new().with_base_url(server.uri());
    let err = client
        .works(SearchQuery::new().query("widget").cursor("*").offset(10))
        .await
        .unwrap_err();

    assert!(matches!(err, CrossrefError::Validation(_)));
}

#[tokio::test]
async fn test_non_cursor_query_returns_bare_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(20, 100, None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = CrossrefClient::new().with_base_url(server.uri());
    let res = client
        .works(SearchQuery::new().query("widget").limit(20))
        .await
        .unwrap();

    assert!(matches!(res, ApiResult::Document(_)));
}
