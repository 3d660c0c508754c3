use std::net::SocketAddr;

use indoc::indoc;
use integration_tests::TestServer;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn health_endpoint_enabled_by_default() {
    let server = TestServer::start("").await;

    let response = server.client.get("/health").await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();

    insta::assert_json_snapshot!(body, { ".timestamp" => "[timestamp]" }, @r#"
    {
      "status": "healthy",
      "timestamp": "[timestamp]"
    }
    "#);
}

#[tokio::test]
async fn health_needs_no_credential_or_upstream() {
    let config = indoc! {r#"
        [llm]
        base_url = "http://127.0.0.1:9/openai/v1"
    "#};

    let server = TestServer::start(config).await;

    let response = server.client.get("/health").await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn health_endpoint_disabled() {
    let config = indoc! {r#"
        [server.health]
        enabled = false
    "#};

    let server = TestServer::start(config).await;

    let response = server.client.get("/health").await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn health_endpoint_custom_path() {
    let config = indoc! {r#"
        [server.health]
        path = "/status"
    "#};

    let server = TestServer::start(config).await;

    let response = server.client.get("/status").await;
    assert_eq!(response.status(), 200);

    let response = server.client.get("/health").await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn health_path_cannot_shadow_api_routes() {
    let config: config::Config = toml::from_str(indoc! {r#"
        [server.health]
        path = "/chat"
    "#})
    .unwrap();

    let serve_config = server::ServeConfig {
        listen_address: SocketAddr::from(([127, 0, 0, 1], 0)),
        config,
        shutdown_signal: CancellationToken::new(),
    };

    let error = server::serve(serve_config).await.unwrap_err();

    insta::assert_snapshot!(error.to_string(), @"Health endpoint path '/chat' collides with an API route");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let server = TestServer::start("").await;

    let response = server.client.get("/nope").await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn graceful_shutdown_stops_listening() {
    let server = TestServer::start("").await;
    let address = server.address;

    server.shutdown().await;

    let result = reqwest::get(format!("http://{address}/health")).await;
    assert!(result.is_err());
}
