//! Mock-based fetch-loop tests using wiremock.
//!
//! These tests verify the pagination walk and the persisted CSV by mocking
//! the hub's listing endpoint.

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hub_snapshot::client::HubClient;
use hub_snapshot::config::Config;
use hub_snapshot::error::ClientError;
use hub_snapshot::snapshot::{self, StopReason};

/// Create a client pointed at a mock server.
fn setup_client(mock_server: &MockServer) -> HubClient {
    let config = Config::for_testing(&mock_server.uri());
    HubClient::new(config).unwrap()
}

// =============================================================================
// Pagination Walk Tests
// =============================================================================

#[tokio::test]
async fn test_cursor_from_header_is_sent_on_next_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .and(query_param_is_missing("cursor"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Next-Cursor", "abc")
                .set_body_json(json!([{"modelId": "page1-model"}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .and(query_param("cursor", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"modelId": "page2-model"}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let result = snapshot::fetch_all(&client).await;

    assert!(result.stop.is_exhausted());
    let ids: Vec<&str> = result.records.iter().map(|r| r.model_id.as_str()).collect();
    assert_eq!(ids, vec!["page1-model", "page2-model"]);
}

#[tokio::test]
async fn test_terminates_when_cursor_header_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"modelId": "a"}, {"modelId": "b"}, {"modelId": "c"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let result = snapshot::fetch_all(&client).await;

    assert!(result.stop.is_exhausted());
    assert_eq!(result.records.len(), 3);
}

#[tokio::test]
async fn test_terminates_on_empty_page() {
    let mock_server = MockServer::start().await;

    // An empty page ends the walk even when a cursor header is present.
    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Next-Cursor", "more")
                .set_body_json(json!([])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let result = snapshot::fetch_all(&client).await;

    assert!(result.stop.is_exhausted());
    assert!(result.records.is_empty());
}

#[tokio::test]
async fn test_empty_cursor_header_means_last_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Next-Cursor", "")
                .set_body_json(json!([{"modelId": "only"}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let result = snapshot::fetch_all(&client).await;

    assert!(result.stop.is_exhausted());
    assert_eq!(result.records.len(), 1);
}

// =============================================================================
// Retry Behavior Tests
// =============================================================================

#[tokio::test]
async fn test_transient_503_is_retried_without_duplication() {
    let mock_server = MockServer::start().await;

    // First attempt fails, the retry succeeds; mount order decides which
    // mock answers while the first is still armed.
    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"modelId": "m1", "downloads": 5}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let result = snapshot::fetch_all(&client).await;

    assert!(result.stop.is_exhausted());
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].model_id, "m1");
    assert_eq!(result.records[0].downloads, 5);
}

#[tokio::test]
async fn test_non_retryable_400_requested_once_and_stops_walk() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .and(query_param_is_missing("cursor"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Next-Cursor", "next")
                .set_body_json(json!([{"modelId": "kept"}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .and(query_param("cursor", "next"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad cursor"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_client(&mock_server);
    let result = snapshot::fetch_all(&client).await;

    assert!(matches!(result.stop, StopReason::Failed(ClientError::BadRequest { .. })));
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].model_id, "kept");
}

// =============================================================================
// End-to-End Persistence Tests
// =============================================================================

#[tokio::test]
async fn test_two_pages_produce_exact_csv() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .and(query_param_is_missing("cursor"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Next-Cursor", "abc")
                .set_body_json(json!([{"modelId": "m1", "downloads": 5}])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .and(query_param("cursor", "abc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"modelId": "m2", "likes": 3}])),
        )
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("models_data.csv");

    let client = setup_client(&mock_server);
    let result = snapshot::run(&client, &output).await.unwrap();

    assert!(result.stop.is_exhausted());
    assert_eq!(result.records.len(), 2);

    let contents = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        contents,
        "model_id,description,tags,downloads,likes,language\n\
         m1,,,5,0,unknown\n\
         m2,,,0,3,unknown\n"
    );
}

#[tokio::test]
async fn test_empty_listing_writes_no_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("models_data.csv");

    let client = setup_client(&mock_server);
    let result = snapshot::run(&client, &output).await.unwrap();

    assert!(result.records.is_empty());
    assert!(result.stop.is_exhausted());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_failed_walk_still_persists_prior_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .and(query_param_is_missing("cursor"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Next-Cursor", "next")
                .set_body_json(json!([{"modelId": "survivor", "downloads": 1}])),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .and(query_param("cursor", "next"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("models_data.csv");

    let client = setup_client(&mock_server);
    let result = snapshot::run(&client, &output).await.unwrap();

    assert!(!result.stop.is_exhausted());

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(contents.contains("survivor"));
}
