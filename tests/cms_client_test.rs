//! CmsClient integration tests against a mock HTTP server

use medex::adapters::cms::{CmsClient, PageFetcher};
use medex::config::SourceConfig;
use medex::domain::errors::FetchError;
use mockito::Matcher;

fn source_config(base_url: &str) -> SourceConfig {
    SourceConfig {
        base_url: base_url.to_string(),
        dataset_id: "d86e116d-ef83-54c5-a14f-9a7bf5a76eba".to_string(),
        states: vec!["AL".to_string()],
        specialty_filter: vec!["ORTHOPEDIC SURGERY".to_string()],
        page_size: 1000,
        timeout_seconds: 5,
    }
}

#[tokio::test]
async fn test_fetch_page_sends_datastore_sql_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded(
                "query".into(),
                "[SELECT * FROM d86e116d-ef83-54c5-a14f-9a7bf5a76eba]\
                 [WHERE state = \"AL\"][LIMIT 1000 OFFSET 2000]"
                    .into(),
            ),
            Matcher::UrlEncoded("show_db_columns".into(), "false".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"npi": "111", "pri_spec": "ORTHOPEDIC SURGERY"}]"#)
        .create_async()
        .await;

    let client = CmsClient::new(&source_config(&server.url())).unwrap();
    let page = client.fetch_page("AL", 2000, 1000).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].get("npi").map(String::as_str), Some("111"));
}

#[tokio::test]
async fn test_fetch_page_empty_array_is_empty_page() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = CmsClient::new(&source_config(&server.url())).unwrap();
    let page = client.fetch_page("AL", 0, 1000).await.unwrap();

    assert!(page.is_empty());
}

#[tokio::test]
async fn test_fetch_page_http_error_maps_to_fetch_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let client = CmsClient::new(&source_config(&server.url())).unwrap();
    let err = client.fetch_page("AL", 0, 1000).await.unwrap_err();

    match err {
        FetchError::HttpStatus { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "internal error");
        }
        other => panic!("Expected HttpStatus error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_page_malformed_body_is_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let client = CmsClient::new(&source_config(&server.url())).unwrap();
    let err = client.fetch_page("AL", 0, 1000).await.unwrap_err();

    assert!(matches!(err, FetchError::InvalidResponse(_)));
}
