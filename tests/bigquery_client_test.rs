//! BigQueryClient integration tests against a mock HTTP server

use medex::adapters::warehouse::{BigQueryClient, WarehouseClient};
use medex::config::{secret_string, WarehouseConfig};
use medex::domain::errors::LoadError;
use mockito::Matcher;
use serde_json::json;

fn warehouse_config(base_url: &str) -> WarehouseConfig {
    WarehouseConfig {
        project: "analytics-project".to_string(),
        dataset: "doctors_and_clinicians".to_string(),
        doctors_table: "doctors".to_string(),
        specialty_locations_table: "specialty_and_locations".to_string(),
        api_base_url: base_url.to_string(),
        access_token: secret_string("test-token"),
        timeout_seconds: 5,
    }
}

const INSERT_ALL_PATH: &str =
    "/projects/analytics-project/datasets/doctors_and_clinicians/tables/doctors/insertAll";

#[tokio::test]
async fn test_load_posts_rows_with_bearer_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", INSERT_ALL_PATH)
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::PartialJson(json!({
            "kind": "bigquery#tableDataInsertAllRequest",
            "rows": [
                {"json": {"npi": "111"}},
                {"json": {"npi": "222"}}
            ]
        })))
        .with_status(200)
        .with_body(r#"{"kind": "bigquery#tableDataInsertAllResponse"}"#)
        .create_async()
        .await;

    let client = BigQueryClient::new(&warehouse_config(&server.url())).unwrap();
    let rows = vec![json!({"npi": "111"}), json!({"npi": "222"})];
    let loaded = client.load(&rows, "doctors").await.unwrap();

    mock.assert_async().await;
    assert_eq!(loaded, 2);
}

#[tokio::test]
async fn test_load_empty_rows_skips_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", INSERT_ALL_PATH)
        .expect(0)
        .create_async()
        .await;

    let client = BigQueryClient::new(&warehouse_config(&server.url())).unwrap();
    let loaded = client.load(&[], "doctors").await.unwrap();

    mock.assert_async().await;
    assert_eq!(loaded, 0);
}

#[tokio::test]
async fn test_load_surfaces_insert_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", INSERT_ALL_PATH)
        .with_status(200)
        .with_body(
            r#"{"insertErrors": [{"index": 0, "errors": [{"reason": "invalid", "message": "no such field: foo"}]}]}"#,
        )
        .create_async()
        .await;

    let client = BigQueryClient::new(&warehouse_config(&server.url())).unwrap();
    let err = client
        .load(&[json!({"foo": "bar"})], "doctors")
        .await
        .unwrap_err();

    match err {
        LoadError::InsertFailed {
            table,
            failed,
            total,
            detail,
        } => {
            assert_eq!(table, "doctors");
            assert_eq!(failed, 1);
            assert_eq!(total, 1);
            assert_eq!(detail, "no such field: foo");
        }
        other => panic!("Expected InsertFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_load_http_error_maps_to_load_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", INSERT_ALL_PATH)
        .with_status(403)
        .with_body("permission denied")
        .create_async()
        .await;

    let client = BigQueryClient::new(&warehouse_config(&server.url())).unwrap();
    let err = client.load(&[json!({"npi": "1"})], "doctors").await.unwrap_err();

    match err {
        LoadError::HttpStatus { status, table, .. } => {
            assert_eq!(status, 403);
            assert_eq!(table, "doctors");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_test_connection_checks_dataset() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/projects/analytics-project/datasets/doctors_and_clinicians")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body(r#"{"kind": "bigquery#dataset"}"#)
        .create_async()
        .await;

    let client = BigQueryClient::new(&warehouse_config(&server.url())).unwrap();
    client.test_connection().await.unwrap();

    mock.assert_async().await;
}
