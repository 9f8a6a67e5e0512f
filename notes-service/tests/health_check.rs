//! End-to-end tests against a listening server.

mod common;

use common::test_config;
use notes_service::services::providers::mock::MockTextProvider;
use notes_service::services::providers::TextProvider;
use notes_service::startup::Application;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Spawn the application on a random port and return its base URL.
async fn spawn_app(provider: MockTextProvider, dirs: &tempfile::TempDir) -> String {
    let config = test_config(dirs.path().join("failed_prompts"), dirs.path().join("build"));
    let provider: Arc<dyn TextProvider> = Arc::new(provider);

    let app = Application::build_with_provider(config, provider)
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn health_check_returns_ok() {
    let dirs = tempfile::tempdir().unwrap();
    let address = spawn_app(MockTextProvider::with_text("{}"), &dirs).await;

    let response = Client::new()
        .get(format!("{}/health", address))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "notes-service");
}

#[tokio::test]
async fn startup_creates_failed_prompts_directory() {
    let dirs = tempfile::tempdir().unwrap();
    spawn_app(MockTextProvider::with_text("{}"), &dirs).await;

    assert!(dirs.path().join("failed_prompts").is_dir());
}

#[tokio::test]
async fn readiness_follows_provider_health() {
    let dirs = tempfile::tempdir().unwrap();
    let healthy = spawn_app(MockTextProvider::with_text("{}"), &dirs).await;
    let unhealthy = spawn_app(MockTextProvider::unavailable("down"), &dirs).await;
    let client = Client::new();

    let ok = client.get(format!("{}/ready", healthy)).send().await.unwrap();
    let down = client.get(format!("{}/ready", unhealthy)).send().await.unwrap();

    assert_eq!(ok.status(), reqwest::StatusCode::OK);
    assert_eq!(down.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn cors_allows_only_the_frontend_origin() {
    let dirs = tempfile::tempdir().unwrap();
    let address = spawn_app(MockTextProvider::with_text("{}"), &dirs).await;
    let client = Client::new();

    let allowed = client
        .post(format!("{}/api/process_notes", address))
        .header("origin", "http://localhost:3000")
        .json(&serde_json::json!({ "notes": "n" }))
        .send()
        .await
        .unwrap();
    assert_eq!(
        allowed.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );

    let other = client
        .post(format!("{}/api/process_notes", address))
        .header("origin", "http://evil.example.com")
        .json(&serde_json::json!({ "notes": "n" }))
        .send()
        .await
        .unwrap();
    assert!(!other.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn metrics_endpoint_returns_prometheus_format() {
    notes_service::services::init_metrics();
    let dirs = tempfile::tempdir().unwrap();
    let address = spawn_app(MockTextProvider::with_text("not json"), &dirs).await;
    let client = Client::new();

    client
        .post(format!("{}/api/process_notes", address))
        .body("{}")
        .send()
        .await
        .unwrap();

    let response = client
        .get(format!("{}/metrics", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
    let body = response.text().await.unwrap();
    assert!(body.contains("notes_requests_total"));
}
