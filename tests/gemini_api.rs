//! TextClient tests against a mock Gemini server.

use reqwest::Client;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tubegen::error::GeminiError;
use tubegen::gemini::TextClient;
use tubegen::models::TextGenerationRequest;

fn request(prompt: &str) -> TextGenerationRequest {
    TextGenerationRequest {
        prompt: prompt.to_string(),
        max_tokens: Some(500),
        temperature: Some(0.7),
        stop_sequences: Some(vec!["---".to_string()]),
        model_id: None,
    }
}

fn client_for(server: &MockServer) -> TextClient {
    TextClient::new(Client::new(), "test_key").with_base_url(server.uri())
}

#[tokio::test]
async fn generate_posts_config_and_concatenates_parts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash-latest:generateContent"))
        .and(query_param("key", "test_key"))
        .and(body_partial_json(serde_json::json!({
            "generationConfig": {
                "temperature": 0.7,
                "maxOutputTokens": 500,
                "stopSequences": ["---"]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "TITLES:\n1. A\n2. B\n3. C\n" },
                        { "text": "DESCRIPTION:\nHello" }
                    ]
                },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.generate(request("prompt text")).await.unwrap();

    assert_eq!(
        response.text,
        "TITLES:\n1. A\n2. B\n3. C\nDESCRIPTION:\nHello"
    );
    assert_eq!(response.model, "gemini-1.5-flash-latest");
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
}

#[tokio::test]
async fn generate_honors_model_override() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-pro-latest:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "ok" }] }
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut req = request("prompt text");
    req.model_id = Some("gemini-1.5-pro-latest".to_string());

    let response = client.generate(req).await.unwrap();
    assert_eq!(response.model, "gemini-1.5-pro-latest");
}

#[tokio::test]
async fn generate_surfaces_api_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(503).set_body_string(r#"{"error": "Service Unavailable"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.generate(request("prompt text")).await.unwrap_err();

    match err {
        GeminiError::ApiError(msg) => {
            assert!(msg.contains("503"), "got: {msg}");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_reports_safety_blocks() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [],
            "promptFeedback": {
                "blockReason": "SAFETY",
                "safetyRatings": [{
                    "category": "HARM_CATEGORY_DANGEROUS_CONTENT",
                    "probability": "HIGH",
                    "blocked": true
                }]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.generate(request("prompt text")).await.unwrap_err();

    match err {
        GeminiError::ContentBlocked(msg) => {
            assert!(
                msg.contains("HARM_CATEGORY_DANGEROUS_CONTENT"),
                "got: {msg}"
            );
            assert!(msg.contains("HIGH"), "got: {msg}");
        }
        other => panic!("expected ContentBlocked, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_reports_empty_responses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": []
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.generate(request("prompt text")).await.unwrap_err();

    match err {
        GeminiError::ResponseError(msg) => {
            assert!(msg.contains("No content generated"), "got: {msg}");
        }
        other => panic!("expected ResponseError, got {other:?}"),
    }
}

#[tokio::test]
async fn list_generation_models_filters_catalog() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .and(query_param("key", "test_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [
                {
                    "name": "models/gemini-1.5-flash-latest",
                    "displayName": "Gemini 1.5 Flash",
                    "supportedGenerationMethods": ["generateContent", "countTokens"]
                },
                {
                    "name": "models/embedding-001",
                    "displayName": "Embedding 001",
                    "supportedGenerationMethods": ["embedContent"]
                }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let models = client.list_generation_models().await.unwrap();

    assert_eq!(models.len(), 1);
    assert_eq!(models[0].name, "models/gemini-1.5-flash-latest");
}
