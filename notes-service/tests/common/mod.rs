#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use notes_service::config::{CorsSettings, GeminiSettings, NotesConfig, StorageSettings};
use notes_service::services::providers::mock::MockTextProvider;
use notes_service::services::providers::TextProvider;
use notes_service::services::FailedPromptStore;
use notes_service::startup::{build_router, AppState};
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub fn test_config(failed_prompts_dir: PathBuf, static_dir: PathBuf) -> NotesConfig {
    NotesConfig {
        common: CoreConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        gemini: GeminiSettings {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            api_base: "http://127.0.0.1:9".to_string(),
            timeout_secs: Some(5),
        },
        storage: StorageSettings {
            failed_prompts_dir,
            static_dir,
        },
        cors: CorsSettings {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    }
}

/// In-process app wired to a mock provider and throwaway directories.
pub struct TestApp {
    pub router: Router,
    pub provider: Arc<MockTextProvider>,
    pub failed_prompts_dir: TempDir,
    pub static_dir: TempDir,
}

impl TestApp {
    pub async fn spawn(provider: MockTextProvider) -> Self {
        let failed_prompts_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let static_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = test_config(
            failed_prompts_dir.path().to_path_buf(),
            static_dir.path().to_path_buf(),
        );

        let provider = Arc::new(provider);
        let text_provider: Arc<dyn TextProvider> = provider.clone();
        let failed_prompts = FailedPromptStore::new(failed_prompts_dir.path())
            .await
            .expect("Failed to create failed prompt store");

        let router = build_router(AppState {
            config,
            text_provider,
            failed_prompts,
        })
        .expect("Failed to build router");

        Self {
            router,
            provider,
            failed_prompts_dir,
            static_dir,
        }
    }

    pub async fn request(&self, request: Request<Body>) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_notes(&self, body: &str) -> (StatusCode, Value) {
        let response = self
            .request(
                Request::builder()
                    .method("POST")
                    .uri("/api/process_notes")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await;
        let status = response.status();
        (status, body_json(response).await)
    }

    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.request(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub fn write_static(&self, relative: &str, contents: &str) {
        let path = self.static_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    pub fn failed_prompt_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(self.failed_prompts_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        files.sort();
        files
    }
}

pub async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}
