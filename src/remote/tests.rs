//! Tests for remote listing operations

use super::*;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::{FetchOptions, ListRequest, ListResponse, PaginatedFetcher};
use crate::types::{ContinuationToken, JsonObject, Method};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_client() -> Arc<HttpClient> {
    let config = HttpClientConfig::builder()
        .max_retries(0)
        .no_rate_limit()
        .build();
    Arc::new(HttpClient::with_config(config).unwrap())
}

fn object(value: serde_json::Value) -> JsonObject {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

// ============================================================================
// lookup_path
// ============================================================================

#[test]
fn test_lookup_path() {
    let doc = json!({"data": {"items": [1, 2]}, "NextToken": "abc"});

    assert_eq!(lookup_path(&doc, "$.data.items"), Some(&json!([1, 2])));
    assert_eq!(lookup_path(&doc, "data.items"), Some(&json!([1, 2])));
    assert_eq!(lookup_path(&doc, "NextToken"), Some(&json!("abc")));
    assert_eq!(lookup_path(&doc, "$"), Some(&doc));
    assert_eq!(lookup_path(&doc, "data.missing"), None);
    assert_eq!(lookup_path(&doc, "NextToken.deeper"), None);
}

// ============================================================================
// JsonListRequest / JsonListResponse
// ============================================================================

#[test]
fn test_json_request_token_and_page_size() {
    let mut request = JsonListRequest::new(object(json!({"Status": "COMPLETED"})), "NextToken")
        .with_page_size_key("MaxResults");

    request.set_continuation_token(ContinuationToken::new("t-1"));
    request.set_page_size(25);
    assert_eq!(
        serde_json::Value::Object(request.body.clone()),
        json!({"Status": "COMPLETED", "NextToken": "t-1", "MaxResults": 25})
    );

    request.set_continuation_token(None);
    assert!(!request.body.contains_key("NextToken"));
}

#[test]
fn test_json_request_without_page_size_key_ignores_size() {
    let mut request = JsonListRequest::new(JsonObject::new(), "nextToken");
    request.set_page_size(10);
    assert!(request.body.is_empty());
}

#[test]
fn test_json_response_from_body() {
    let body = json!({"result": {"jobs": [{"id": 1}, {"id": 2}]}, "meta": {"next": "p2"}});
    let response = JsonListResponse::from_body(body, "$.result.jobs", "$.meta.next").unwrap();

    assert_eq!(response.item_count(), 2);
    assert_eq!(
        response.next_token().map(ContinuationToken::into_inner),
        Some("p2".to_string())
    );
    assert_eq!(response.into_items(), vec![json!({"id": 1}), json!({"id": 2})]);
}

#[test]
fn test_json_response_numeric_and_empty_tokens() {
    let numeric = JsonListResponse::from_body(json!({"items": [], "next": 40}), "items", "next").unwrap();
    assert_eq!(
        numeric.next_token().map(ContinuationToken::into_inner),
        Some("40".to_string())
    );

    let empty = JsonListResponse::from_body(json!({"items": [], "next": ""}), "items", "next").unwrap();
    assert!(empty.next_token().is_none());

    let null = JsonListResponse::from_body(json!({"items": [], "next": null}), "items", "next").unwrap();
    assert!(null.next_token().is_none());
}

#[test]
fn test_json_response_requires_item_array() {
    let err = JsonListResponse::from_body(json!({"next": "x"}), "items", "next").unwrap_err();
    assert!(err.contains("missing item array at 'items'"));

    let err = JsonListResponse::from_body(json!({"items": {"a": 1}}), "items", "next").unwrap_err();
    assert!(err.contains("found an object"));
}

#[test]
fn test_json_response_serializes_as_body() {
    let body = json!({"Items": [1], "NextToken": "n"});
    let response = JsonListResponse::from_body(body.clone(), "Items", "NextToken").unwrap();
    assert_eq!(serde_json::to_value(&response).unwrap(), body);
}

// ============================================================================
// JsonListOperation
// ============================================================================

#[tokio::test]
async fn test_json_operation_posts_and_pages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/list"))
        .and(header("x-api-key", "secret"))
        .and(body_json(json!({"Filter": "a", "MaxResults": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Items": ["a1", "a2"],
            "NextToken": "n2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/list"))
        .and(body_json(json!({"Filter": "a", "MaxResults": 2, "NextToken": "n2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Items": ["a3"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let operation = JsonListOperation::new(
        http_client(),
        format!("{}/list", server.uri()),
        "Items",
        "NextToken",
    )
    .with_name("ListThings")
    .with_header("x-api-key", "secret");
    assert_eq!(operation.name(), "ListThings");

    let request =
        JsonListRequest::new(object(json!({"Filter": "a"})), "NextToken").with_page_size_key("MaxResults");
    let items = PaginatedFetcher::new(operation, request, FetchOptions::new().page_size(2))
        .collect_items()
        .await
        .unwrap();

    assert_eq!(items, vec![json!("a1"), json!("a2"), json!("a3")]);
}

#[tokio::test]
async fn test_json_operation_get_uses_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/policies"))
        .and(query_param("state", "ENABLED"))
        .and(query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [1, 2],
            "cursor": "c2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/policies"))
        .and(query_param("state", "ENABLED"))
        .and(query_param("cursor", "c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [3],
            "cursor": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let operation = Arc::new(
        JsonListOperation::new(
            http_client(),
            format!("{}/policies", server.uri()),
            "data",
            "cursor",
        )
        .with_method(Method::GET),
    );

    let request = JsonListRequest::new(object(json!({"state": "ENABLED"})), "cursor");
    let items = PaginatedFetcher::new(Arc::clone(&operation), request, FetchOptions::new())
        .collect_items()
        .await
        .unwrap();

    assert_eq!(items, vec![json!(1), json!(2), json!(3)]);
}

#[tokio::test]
async fn test_json_operation_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let operation = JsonListOperation::new(http_client(), server.uri(), "Items", "NextToken");
    let request = JsonListRequest::new(JsonObject::new(), "NextToken");
    let err = operation.list(&request).await.unwrap_err();

    assert!(matches!(err, Error::MalformedResponse { .. }));
    assert!(err.to_string().contains("missing item array"));
}

#[tokio::test]
async fn test_json_operation_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let operation = JsonListOperation::new(http_client(), server.uri(), "Items", "NextToken");
    let request = JsonListRequest::new(JsonObject::new(), "NextToken");
    let err = operation.list(&request).await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 403, ref body } if body == "forbidden"));
}

// ============================================================================
// Closure operations
// ============================================================================

#[tokio::test]
async fn test_closure_error_is_returned_once() {
    let operation = from_fn("Broken", |_request: JsonListRequest| async move {
        let result: crate::error::Result<JsonListResponse> =
            Err(anyhow::anyhow!("connection reset by peer").into());
        result
    });

    let request = JsonListRequest::new(JsonObject::new(), "NextToken");
    let err = PaginatedFetcher::new(&operation, request, FetchOptions::new())
        .collect_items()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Anyhow(_)));
    assert_eq!(err.to_string(), "connection reset by peer");
}
