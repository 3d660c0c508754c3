use std::time::{Duration, Instant};

use indoc::formatdoc;
use integration_tests::{
    TestServer, closed_address,
    upstream::{GroqMock, model},
};
use serde_json::{Value, json};

#[tokio::test]
async fn lists_upstream_models() {
    let upstream = GroqMock::new()
        .with_models(vec![json!({
            "id": "m1",
            "object": "model",
            "created": 1,
            "owned_by": "org",
            "active": true,
            "context_window": 8192,
            "max_completion_tokens": 1024,
            "public_apps": null
        })])
        .spawn()
        .await;

    let server = TestServer::start(&upstream.config("m1")).await;

    let response = server.client.get("/models").await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();

    insta::assert_json_snapshot!(body, @r#"
    {
      "current_model": "m1",
      "data": [
        {
          "active": true,
          "context_window": 8192,
          "id": "m1",
          "max_completion_tokens": 1024,
          "owned_by": "org"
        }
      ],
      "object": "list",
      "total_models": 1
    }
    "#);

    assert_eq!(upstream.last_authorization().as_deref(), Some("Bearer test-key"));
}

#[tokio::test]
async fn total_models_matches_data() {
    for count in [0, 1, 5] {
        let models = (0..count).map(|i| model(&format!("model-{i}"), "org")).collect();
        let upstream = GroqMock::new().with_models(models).spawn().await;
        let server = TestServer::start(&upstream.config("model-0")).await;

        let body: Value = server.client.get("/models").await.json().await.unwrap();

        assert_eq!(body["total_models"], count);
        assert_eq!(body["data"].as_array().unwrap().len(), count);
        assert_eq!(body["current_model"], "model-0");
    }
}

#[tokio::test]
async fn sparse_descriptors_are_passed_through() {
    let upstream = GroqMock::new().with_models(vec![json!({ "id": "bare" })]).spawn().await;
    let server = TestServer::start(&upstream.config("bare")).await;

    let body: Value = server.client.get("/models").await.json().await.unwrap();

    insta::assert_json_snapshot!(body["data"], @r#"
    [
      {
        "active": null,
        "context_window": null,
        "id": "bare",
        "max_completion_tokens": null,
        "owned_by": null
      }
    ]
    "#);
}

#[tokio::test]
async fn missing_api_key_fails_without_upstream_call() {
    let upstream = GroqMock::new().spawn().await;

    let config = formatdoc! {r#"
        [llm]
        base_url = "{}"
    "#, upstream.base_url()};

    let server = TestServer::start(&config).await;

    let response = server.client.get("/models").await;
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();

    insta::assert_json_snapshot!(body, @r#"
    {
      "detail": "Failed to retrieve models: GROQ_API_KEY not configured"
    }
    "#);

    assert_eq!(upstream.requests(), 0);
}

#[tokio::test]
async fn upstream_error_status_is_503() {
    let upstream = GroqMock::new().with_status_error(401, "Invalid API Key").spawn().await;
    let server = TestServer::start(&upstream.config("m1")).await;

    let response = server.client.get("/models").await;
    assert_eq!(response.status(), 503);

    let body: Value = response.json().await.unwrap();

    insta::assert_json_snapshot!(body, @r#"
    {
      "detail": "Unable to fetch models from upstream: Provider API error (401): Invalid API Key"
    }
    "#);
}

#[tokio::test]
async fn unreachable_upstream_is_503() {
    let address = closed_address().await;

    let config = formatdoc! {r#"
        [llm]
        api_key = "test-key"
        base_url = "http://{address}/openai/v1"
    "#};

    let server = TestServer::start(&config).await;

    let response = server.client.get("/models").await;
    assert_eq!(response.status(), 503);

    let body: Value = response.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();

    assert!(
        detail.starts_with("Unable to fetch models from upstream: Connection error: Failed to send request:"),
        "{detail}"
    );
    assert_eq!(detail.matches("upstream").count(), 1, "{detail}");
}

#[tokio::test]
async fn non_json_upstream_body_is_500() {
    let upstream = GroqMock::new().with_malformed_body().spawn().await;
    let server = TestServer::start(&upstream.config("m1")).await;

    let response = server.client.get("/models").await;
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();

    assert!(
        detail.starts_with("Failed to retrieve models: Malformed provider response:"),
        "{detail}"
    );
}

#[tokio::test]
async fn slow_upstream_times_out_as_503() {
    let upstream = GroqMock::new().with_delay(Duration::from_secs(5)).spawn().await;

    let config = formatdoc! {r#"
        {}
        models_timeout = "300ms"
    "#, upstream.config("m1")};

    let server = TestServer::start(&config).await;

    let started = Instant::now();
    let response = server.client.get("/models").await;
    let elapsed = started.elapsed();

    assert_eq!(response.status(), 503);
    assert!(elapsed < Duration::from_secs(3), "took {elapsed:?}");

    let body: Value = response.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();

    assert!(
        detail.starts_with("Unable to fetch models from upstream: Connection error:"),
        "{detail}"
    );
}

#[tokio::test]
async fn malformed_base_url_is_500() {
    let config = indoc::indoc! {r#"
        [llm]
        api_key = "test-key"
        base_url = "not-a-url"
    "#};

    let server = TestServer::start(config).await;

    let response = server.client.get("/models").await;
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();

    assert!(
        detail.starts_with("Failed to retrieve models: Invalid upstream request:"),
        "{detail}"
    );
}
