//! Integration tests for `DandelionClient` using wiremock HTTP mocks.

use globenews_dandelion::{DandelionClient, DandelionError, PLACE_TYPE};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> DandelionClient {
    DandelionClient::with_base_url("test-token", 30, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn extract_places_filters_and_sorts() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "time": 12,
        "lang": "en",
        "annotations": [
            {
                "id": 1, "spot": "France", "start": 0, "end": 6,
                "confidence": 0.7, "label": "France",
                "uri": "http://en.wikipedia.org/wiki/France",
                "types": [PLACE_TYPE, "http://dbpedia.org/ontology/Country"]
            },
            {
                "id": 2, "spot": "Macron", "start": 10, "end": 16,
                "confidence": 0.95, "label": "Emmanuel Macron",
                "types": ["http://dbpedia.org/ontology/Person"]
            },
            {
                "id": 3, "spot": "Paris", "start": 20, "end": 25,
                "confidence": 0.9, "label": "Paris",
                "types": [PLACE_TYPE]
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/datatxt/nex/v1/"))
        .and(query_param("url", "https://example.com/story"))
        .and(query_param("include", "types"))
        .and(query_param("lang", "en"))
        .and(query_param("token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .extract_places("https://example.com/story")
        .await
        .expect("should parse annotations");

    let labels: Vec<&str> = places.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Paris", "France"]);
}

#[tokio::test]
async fn extract_places_without_places_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/datatxt/nex/v1/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "annotations": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .extract_places("https://example.com/story")
        .await
        .expect("empty annotations are fine");

    assert!(places.is_empty());
}

#[tokio::test]
async fn non_200_is_a_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": true,
            "code": "error.authenticationError",
            "message": "Invalid token"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .extract_places("https://example.com/story")
        .await
        .unwrap_err();

    assert!(
        matches!(err, DandelionError::Status { status: 401, ref message } if message == "Invalid token"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn transport_error_does_not_leak_token() {
    // Port 9 (discard) is closed on test hosts, so the connect fails.
    let client = DandelionClient::with_base_url("SECRET-TOKEN", 2, "http://127.0.0.1:9")
        .expect("client construction should not fail");

    let err = client
        .extract_places("https://example.com/story")
        .await
        .unwrap_err();

    assert!(matches!(err, DandelionError::Http(_)), "got: {err:?}");
    assert!(!err.to_string().contains("SECRET-TOKEN"), "{err}");
    assert!(!format!("{err:?}").contains("SECRET-TOKEN"), "{err:?}");
}
