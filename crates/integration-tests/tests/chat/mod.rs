use std::time::{Duration, Instant};

use indoc::formatdoc;
use integration_tests::{
    TestServer, closed_address,
    upstream::{GroqMock, TestUpstream},
};
use serde_json::{Value, json};

async fn server_for(upstream: &TestUpstream) -> TestServer {
    TestServer::start(&upstream.config("llama-3.1-8b-instant")).await
}

#[tokio::test]
async fn chat_returns_upstream_completion() {
    let upstream = GroqMock::new().with_reply("Four.", 15).spawn().await;
    let server = server_for(&upstream).await;

    let response = server.client.post("/chat", &json!({ "message": "What is 2+2?" })).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();

    insta::assert_json_snapshot!(body, {
        ".response_time" => "[response_time]",
        ".timestamp" => "[timestamp]"
    }, @r#"
    {
      "model": "llama-3.1-8b-instant",
      "response": "Four.",
      "response_time": "[response_time]",
      "timestamp": "[timestamp]",
      "tokens_used": 15
    }
    "#);

    assert!(body["response_time"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn defaults_are_forwarded_upstream() {
    let upstream = GroqMock::new().spawn().await;
    let server = server_for(&upstream).await;

    let response = server.client.post("/chat", &json!({ "message": "Hello" })).await;
    assert_eq!(response.status(), 200);

    insta::assert_json_snapshot!(upstream.last_chat().unwrap(), @r#"
    {
      "max_tokens": 1024,
      "messages": [
        {
          "content": "Hello",
          "role": "user"
        }
      ],
      "model": "llama-3.1-8b-instant",
      "stream": false,
      "temperature": 0.7
    }
    "#);

    assert_eq!(upstream.last_authorization().as_deref(), Some("Bearer test-key"));
}

#[tokio::test]
async fn explicit_values_override_defaults() {
    let upstream = GroqMock::new().spawn().await;
    let server = server_for(&upstream).await;

    let request = json!({ "message": "Hello", "max_tokens": 100, "temperature": 0.0 });
    let response = server.client.post("/chat", &request).await;
    assert_eq!(response.status(), 200);

    let forwarded = upstream.last_chat().unwrap();
    assert_eq!(forwarded["max_tokens"], 100);
    assert_eq!(forwarded["temperature"], 0.0);
}

#[tokio::test]
async fn configured_defaults_come_from_the_config() {
    let upstream = GroqMock::new().spawn().await;

    let config = formatdoc! {r#"
        {}
        max_tokens = 256
        temperature = 0.25
    "#, upstream.config("m1")};

    let server = TestServer::start(&config).await;

    let response = server.client.post("/chat", &json!({ "message": "Hello" })).await;
    assert_eq!(response.status(), 200);

    let forwarded = upstream.last_chat().unwrap();
    assert_eq!(forwarded["max_tokens"], 256);
    assert_eq!(forwarded["temperature"], 0.25);
}

#[tokio::test]
async fn response_echoes_the_configured_model() {
    let upstream = GroqMock::new().spawn().await;
    let server = TestServer::start(&upstream.config("openai/gpt-oss-120b")).await;

    let response = server.client.post("/chat", &json!({ "message": "Hi" })).await;
    let body: Value = response.json().await.unwrap();

    assert_eq!(body["model"], "openai/gpt-oss-120b");
    assert_eq!(upstream.last_chat().unwrap()["model"], "openai/gpt-oss-120b");
}

#[tokio::test]
async fn missing_message_is_rejected_without_upstream_call() {
    let upstream = GroqMock::new().spawn().await;
    let server = server_for(&upstream).await;

    let response = server.client.post("/chat", &json!({ "max_tokens": 10 })).await;
    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();

    assert!(detail.contains("missing field `message`"), "{detail}");
    assert_eq!(upstream.requests(), 0);
}

#[tokio::test]
async fn blank_message_is_rejected() {
    let upstream = GroqMock::new().spawn().await;
    let server = server_for(&upstream).await;

    let response = server.client.post("/chat", &json!({ "message": "   " })).await;
    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.unwrap();

    insta::assert_json_snapshot!(body, @r#"
    {
      "detail": "Invalid request: message must not be empty"
    }
    "#);

    assert_eq!(upstream.requests(), 0);
}

#[tokio::test]
async fn out_of_range_temperature_is_rejected() {
    let upstream = GroqMock::new().spawn().await;
    let server = server_for(&upstream).await;

    let response = server
        .client
        .post("/chat", &json!({ "message": "Hi", "temperature": 3.5 }))
        .await;

    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.unwrap();

    insta::assert_json_snapshot!(body, @r#"
    {
      "detail": "Invalid request: temperature must be between 0.0 and 2.0, got 3.5"
    }
    "#);
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let upstream = GroqMock::new().spawn().await;
    let server = server_for(&upstream).await;

    let response = server.client.post_raw("/chat", "application/json", "{not json").await;
    assert_eq!(response.status(), 400);

    let response = server.client.post_raw("/chat", "text/plain", "hello").await;
    assert_eq!(response.status(), 415);

    assert_eq!(upstream.requests(), 0);
}

#[tokio::test]
async fn missing_api_key_fails_without_upstream_call() {
    let upstream = GroqMock::new().spawn().await;

    let config = formatdoc! {r#"
        [llm]
        base_url = "{}"
    "#, upstream.base_url()};

    let server = TestServer::start(&config).await;

    let response = server.client.post("/chat", &json!({ "message": "Hi" })).await;
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();

    insta::assert_json_snapshot!(body, @r#"
    {
      "detail": "AI response failed: GROQ_API_KEY not configured"
    }
    "#);

    assert_eq!(upstream.requests(), 0);
}

#[tokio::test]
async fn upstream_error_status_is_500() {
    let upstream = GroqMock::new().with_status_error(401, "Invalid API Key").spawn().await;
    let server = server_for(&upstream).await;

    let response = server.client.post("/chat", &json!({ "message": "Hi" })).await;
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();

    insta::assert_json_snapshot!(body, @r#"
    {
      "detail": "AI response failed: Provider API error (401): Invalid API Key"
    }
    "#);
}

#[tokio::test]
async fn unreachable_upstream_is_500() {
    let address = closed_address().await;

    let config = formatdoc! {r#"
        [llm]
        api_key = "test-key"
        base_url = "http://{address}/openai/v1"
    "#};

    let server = TestServer::start(&config).await;

    let response = server.client.post("/chat", &json!({ "message": "Hi" })).await;
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();

    assert!(detail.starts_with("AI response failed: Connection error:"), "{detail}");
}

#[tokio::test]
async fn non_json_upstream_body_is_500() {
    let upstream = GroqMock::new().with_malformed_body().spawn().await;
    let server = server_for(&upstream).await;

    let response = server.client.post("/chat", &json!({ "message": "Hi" })).await;
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();

    assert!(detail.starts_with("AI response failed: Malformed provider response:"), "{detail}");
}

#[tokio::test]
async fn slow_upstream_times_out_as_500() {
    let upstream = GroqMock::new().with_delay(Duration::from_secs(5)).spawn().await;

    let config = formatdoc! {r#"
        {}
        chat_timeout = "300ms"
    "#, upstream.config("m1")};

    let server = TestServer::start(&config).await;

    let started = Instant::now();
    let response = server.client.post("/chat", &json!({ "message": "Hi" })).await;
    let elapsed = started.elapsed();

    assert_eq!(response.status(), 500);
    assert!(elapsed < Duration::from_secs(3), "took {elapsed:?}");

    let body: Value = response.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();

    assert!(detail.starts_with("AI response failed: Connection error:"), "{detail}");
}
