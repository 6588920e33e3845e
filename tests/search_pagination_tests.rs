//! Integration tests for paginated search against a mock Brightpearl backend.
//!
//! These tests verify page walking, termination, record normalization and
//! error propagation through the lazy cursors.

use brightpearl_api::resources::{ORDER_SEARCH, PRODUCT_SEARCH};
use brightpearl_api::search::SearchParams;
use brightpearl_api::{
    AccountId, AccountToken, AppRef, BrightpearlClient, BrightpearlConfig, Domain, SearchError,
};
use futures::TryStreamExt;
use serde_json::{json, Value};
use std::collections::HashSet;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const PRODUCT_SEARCH_PATH: &str = "/public-api/acme/product-service/product-search";
const ORDER_SEARCH_PATH: &str = "/public-api/acme/order-service/order-search";

/// Serves `total` products in pages, honouring `firstResult` and `pageSize`.
struct ProductBackend {
    total: u64,
}

impl Respond for ProductBackend {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut first_result = 1;
        let mut page_size = 100;
        for (key, value) in request.url.query_pairs() {
            match key.as_ref() {
                "firstResult" => first_result = value.parse().unwrap(),
                "pageSize" => page_size = value.parse().unwrap(),
                _ => {}
            }
        }

        let last_result = (first_result + page_size - 1).min(self.total);
        let rows: Vec<Value> = (first_result..=last_result)
            .map(|id| json!([id, format!("SKU-{id}")]))
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "metaData": {
                    "columns": [{"name": "productId"}, {"name": "SKU"}]
                },
                "results": rows,
                "resultCount": rows.len(),
                "firstResult": first_result,
                "lastResult": if rows.is_empty() { 0 } else { last_result },
                "totalResults": self.total
            }
        }))
    }
}

fn create_config(mock_server: &MockServer, max_retries: u32) -> BrightpearlConfig {
    BrightpearlConfig::builder()
        .domain(Domain::new(mock_server.uri()).unwrap())
        .account_id(AccountId::new("acme").unwrap())
        .account_token(AccountToken::new("test-token").unwrap())
        .app_ref(AppRef::new("test-app").unwrap())
        .max_retries(max_retries)
        .backoff_factor(0.0)
        .build()
        .unwrap()
}

fn create_client(mock_server: &MockServer) -> BrightpearlClient {
    BrightpearlClient::new(&create_config(mock_server, 0)).unwrap()
}

fn product_ids(records: &[serde_json::Map<String, Value>]) -> Vec<u64> {
    records
        .iter()
        .map(|record| record["productId"].as_u64().unwrap())
        .collect()
}

// ============================================================================
// Page walking
// ============================================================================

#[tokio::test]
async fn test_iter_pages_walks_every_page() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .respond_with(ProductBackend { total: 5 })
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let params = SearchParams::builder().page_size(2).build();
    let pages = client.iter_pages(&PRODUCT_SEARCH, params).collect_all().await.unwrap();

    assert_eq!(pages.len(), 3);
    let first_results: Vec<u64> = pages.iter().map(|p| p.pagination.first_result).collect();
    assert_eq!(first_results, vec![1, 3, 5]);
    assert_eq!(pages[2].results.len(), 1);
}

#[tokio::test]
async fn test_iter_records_yields_every_record_in_order() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .respond_with(ProductBackend { total: 5 })
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let params = SearchParams::builder().page_size(2).build();
    let records = client
        .iter_records(&PRODUCT_SEARCH, params)
        .collect_all()
        .await
        .unwrap();

    assert_eq!(product_ids(&records), vec![1, 2, 3, 4, 5]);
    assert_eq!(records[0]["SKU"], json!("SKU-1"));
    let keys: HashSet<&str> = records[0].keys().map(String::as_str).collect();
    assert_eq!(keys, HashSet::from(["productId", "SKU"]));
}

#[tokio::test]
async fn test_single_page_search_makes_one_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .respond_with(ProductBackend { total: 3 })
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let records = client
        .iter_products_records(SearchParams::default())
        .collect_all()
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn test_empty_search_yields_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .respond_with(ProductBackend { total: 0 })
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let mut pages = client.iter_products(SearchParams::default());

    assert!(pages.next_page().await.unwrap().is_none());
    assert!(pages.is_finished());
    assert_eq!(pages.pages_fetched(), 1);
    assert!(pages.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn test_cursor_is_lazy() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .respond_with(ProductBackend { total: 10 })
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let params = SearchParams::builder().page_size(2).build();
    let mut records = client.iter_records(&PRODUCT_SEARCH, params);

    // Two records fit on the first page, so only one request is made
    assert!(records.next_record().await.unwrap().is_some());
    assert!(records.next_record().await.unwrap().is_some());
    assert!(!records.is_finished());
}

#[tokio::test]
async fn test_iteration_is_repeatable() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .respond_with(ProductBackend { total: 7 })
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let params = SearchParams::builder().page_size(3).build();

    let first = client
        .iter_records(&PRODUCT_SEARCH, params.clone())
        .collect_all()
        .await
        .unwrap();
    let second = client
        .iter_records(&PRODUCT_SEARCH, params)
        .collect_all()
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 7);
}

#[tokio::test]
async fn test_records_into_stream() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .respond_with(ProductBackend { total: 4 })
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let params = SearchParams::builder().page_size(3).build();
    let records: Vec<_> = client
        .iter_records(&PRODUCT_SEARCH, params)
        .into_stream()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(product_ids(&records), vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_stops_when_first_result_does_not_advance() {
    let mock_server = MockServer::start().await;
    // A backend that ignores firstResult and claims more results remain
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "metaData": {"columns": [{"name": "productId"}]},
                "results": [[1], [2]],
                "resultCount": 2,
                "firstResult": 1,
                "lastResult": 2,
                "totalResults": 10
            }
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let params = SearchParams::builder().page_size(2).build();
    let pages = client.iter_pages(&PRODUCT_SEARCH, params).collect_all().await.unwrap();

    assert_eq!(pages.len(), 1);
}

#[tokio::test]
async fn test_repeated_page_does_not_duplicate_records() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "metaData": {"columns": [{"name": "productId"}]},
                "results": [[1], [2]],
                "resultCount": 2,
                "firstResult": 1,
                "lastResult": 2,
                "totalResults": 10
            }
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let params = SearchParams::builder().page_size(2).build();
    let mut records = client.iter_records(&PRODUCT_SEARCH, params);
    let mut collected = Vec::new();
    while let Some(record) = records.next_record().await.unwrap() {
        collected.push(record);
    }

    assert_eq!(product_ids(&collected), vec![1, 2]);
    assert!(records.is_finished());
}

// ============================================================================
// Query construction on the wire
// ============================================================================

#[tokio::test]
async fn test_friendly_sort_is_sent_under_order_by() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ORDER_SEARCH_PATH))
        .and(query_param("orderBy", "updatedOn:DESC"))
        .and(query_param("pageSize", "50"))
        .and(query_param("orderStatusId", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {
                "metaData": {"columns": [{"name": "orderId"}]},
                "results": [[1001]],
                "resultCount": 1,
                "firstResult": 1,
                "lastResult": 1,
                "totalResults": 1
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let params = SearchParams::builder()
        .order_by("-updatedOn")
        .page_size(50)
        .filter("orderStatusId", 4)
        .build();
    let records = client.list_orders_records(params).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["orderId"], json!(1001));
    assert_eq!(ORDER_SEARCH.sort_param(), "orderBy");
}

#[tokio::test]
async fn test_product_listing_requests_default_columns() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .and(query_param(
            "columns",
            "productId,SKU,productName,brandId,productTypeId,updatedOn",
        ))
        .and(query_param("sort", "SKU:ASC"))
        .respond_with(ProductBackend { total: 1 })
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let params = SearchParams::builder().order_by("SKU").build();
    let page = client.list_products(params).await.unwrap();

    assert_eq!(page.pagination.total_results, 1);
}

#[tokio::test]
async fn test_raw_search_sends_no_default_columns() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .respond_with(ProductBackend { total: 1 })
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    client.search_products(&SearchParams::default()).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0]
        .url
        .query_pairs()
        .all(|(key, _)| key != "columns"));
}

#[tokio::test]
async fn test_invalid_params_send_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ProductBackend { total: 1 })
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let params = SearchParams::builder().page_size(0).build();
    let result = client.search_products(&params).await;

    assert!(matches!(result, Err(SearchError::Validation(_))));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_error_mid_iteration_keeps_earlier_records() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .and(query_param("firstResult", "3"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"errors": [{"code": "INT-001"}]})),
        )
        .with_priority(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .respond_with(ProductBackend { total: 5 })
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let params = SearchParams::builder().page_size(2).build();
    let mut records = client.iter_records(&PRODUCT_SEARCH, params);

    assert!(records.next_record().await.unwrap().is_some());
    assert!(records.next_record().await.unwrap().is_some());

    let error = records.next_record().await.unwrap_err();
    assert_eq!(error.status(), Some(500));
    assert_eq!(
        error.api_error().unwrap().payload,
        json!({"errors": [{"code": "INT-001"}]})
    );

    assert!(records.next_record().await.unwrap().is_none());
    assert!(records.is_finished());
}

#[tokio::test]
async fn test_malformed_body_is_protocol_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let error = client
        .search_products(&SearchParams::default())
        .await
        .unwrap_err();

    assert!(error.is_protocol());
    assert_eq!(error.status(), None);
}

#[tokio::test]
async fn test_missing_envelope_is_api_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"errors": ["no such account"]})),
        )
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server);
    let error = client
        .search_products(&SearchParams::default())
        .await
        .unwrap_err();

    let api_error = error.api_error().unwrap();
    assert_eq!(api_error.status, 200);
    assert_eq!(api_error.payload, json!({"errors": ["no such account"]}));
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .respond_with(ProductBackend { total: 2 })
        .mount(&mock_server)
        .await;

    let client = BrightpearlClient::new(&create_config(&mock_server, 2)).unwrap();
    let records = client
        .iter_products_records(SearchParams::default())
        .collect_all()
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_exhausted_retries_report_last_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PRODUCT_SEARCH_PATH))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = BrightpearlClient::new(&create_config(&mock_server, 2)).unwrap();
    let error = client
        .search_products(&SearchParams::default())
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(502));
}
