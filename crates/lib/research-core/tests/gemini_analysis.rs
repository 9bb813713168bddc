//! Integration tests for the Gemini analysis gateway against a mocked provider.

use research_core::analysis::{AnalysisClient, AnalysisError};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AnalysisClient {
    AnalysisClient::new("test-key").with_base_url(server.uri())
}

#[tokio::test]
async fn analyze_paper_returns_model_text_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_string_contains("detailed summary analysis"))
        .and(body_string_contains("Additional context: focus on methods"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "A thorough summary." }] } }
            ]
        })))
        .mount(&server)
        .await;

    let text = client_for(&server)
        .analyze_paper("long enough paper content", "summary", Some("focus on methods"))
        .await
        .expect("analysis should succeed");

    assert_eq!(text, "A thorough summary.");
}

#[tokio::test]
async fn multi_part_candidates_concatenate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "First half. " }, { "text": "Second half." }] } }
            ]
        })))
        .mount(&server)
        .await;

    let text = client_for(&server)
        .analyze_paper("paper", "comprehensive", None)
        .await
        .expect("analysis should succeed");

    assert_eq!(text, "First half. Second half.");
}

#[tokio::test]
async fn model_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid request"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .analyze_paper("paper", "critique", None)
        .await
        .expect_err("non-2xx should fail");

    assert!(err.to_string().starts_with("Failed to analyze paper"));
    match err {
        AnalysisError::Api { status, body } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(body, "invalid request");
        }
        other => panic!("expected api error, got {other}"),
    }
}

#[tokio::test]
async fn empty_candidate_list_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .analyze_paper("paper", "key findings", None)
        .await
        .expect_err("no candidates should fail");

    assert!(matches!(err, AnalysisError::EmptyResponse));
}
