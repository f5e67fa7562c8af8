//! HTTP-level tests for the OpenAI provider against a local mock server.
//!
//! Run with: cargo test -p doctor-llms --test openai_provider

use doctor_llms::{
    Error, GenerateRequest, Message, OpenAIConfig, OpenAIProvider, Provider, ResponseFormat,
};
use mockito::Matcher;
use serde_json::json;

fn provider_for(server: &mockito::Server) -> OpenAIProvider {
    OpenAIProvider::new(OpenAIConfig::new("sk-test").with_base_url(server.url())).unwrap()
}

fn json_request() -> GenerateRequest {
    GenerateRequest::new(
        "gpt-4o-mini",
        vec![
            Message::system("You are a diagnostics assistant."),
            Message::user("{\"error_message\": \"CORS\"}"),
        ],
    )
    .with_temperature(0.2)
    .with_response_format(ResponseFormat::JsonObject)
}

#[tokio::test]
async fn test_generate_sends_json_mode_and_returns_content() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": "You are a diagnostics assistant." },
                { "role": "user", "content": "{\"error_message\": \"CORS\"}" }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "created": 1,
                "model": "gpt-4o-mini-2024-07-18",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": "{\"side\":\"backend\"}" },
                    "finish_reason": "stop"
                }],
                "usage": { "prompt_tokens": 20, "completion_tokens": 5, "total_tokens": 25 }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let provider = provider_for(&server);
    let response = provider.generate(json_request()).await?;

    mock.assert_async().await;
    assert_eq!(response.text(), "{\"side\":\"backend\"}");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.model.as_deref(), Some("gpt-4o-mini-2024-07-18"));
    assert_eq!(response.usage.map(|u| u.total_tokens), Some(25));
    assert!(!response.is_truncated());
    Ok(())
}

#[tokio::test]
async fn test_key_with_trailing_newline_is_sent_trimmed() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .with_status(200)
        .with_body(
            json!({
                "choices": [{
                    "message": { "role": "assistant", "content": "{}" },
                    "finish_reason": "stop"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let provider =
        OpenAIProvider::new(OpenAIConfig::new("sk-test\n").with_base_url(server.url()))?;
    provider.generate(json_request()).await?;

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_unsendable_key_fails_before_the_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let provider =
        OpenAIProvider::new(OpenAIConfig::new("sk-te\nst").with_base_url(server.url())).unwrap();
    let err = provider.generate(json_request()).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, Error::InvalidHeader(ref name) if name == "Authorization"));
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"message":"Incorrect API key provided","code":"invalid_api_key"}}"#)
        .create_async()
        .await;

    let err = provider_for(&server)
        .generate(json_request())
        .await
        .unwrap_err();

    assert!(err.is_auth());
    assert!(err.to_string().contains("Incorrect API key provided"));
}

#[tokio::test]
async fn test_quota_exhausted_maps_to_rate_limit() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body(r#"{"error":{"message":"You exceeded your current quota","code":"insufficient_quota"}}"#)
        .create_async()
        .await;

    let err = provider_for(&server)
        .generate(json_request())
        .await
        .unwrap_err();

    assert!(err.is_rate_limited());
    assert!(matches!(err, Error::Api { status: 429, .. }));
}

#[tokio::test]
async fn test_non_json_body_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let result = provider_for(&server).generate(json_request()).await;
    assert!(matches!(result, Err(Error::Http(_))));
}

#[tokio::test]
async fn test_empty_content_is_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(
            json!({
                "choices": [{
                    "message": { "role": "assistant", "content": "   " },
                    "finish_reason": "stop"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let result = provider_for(&server).generate(json_request()).await;
    assert!(matches!(result, Err(Error::InvalidResponse(_))));
}
