//! Static frontend fallback for GET requests outside the API.

use crate::startup::AppState;
use axum::{
    body::Body,
    extract::{Path as UrlPath, Request, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::{Component, Path, PathBuf};
use tower::ServiceExt;
use tower_http::services::ServeFile;

pub const FRONTEND_MISSING_STATUS: &str = "Backend running. Frontend build not found.";

const INDEX_FILE: &str = "index.html";

/// `GET /`
pub async fn serve_index(State(state): State<AppState>, req: Request) -> Response {
    serve_from(&state.config.storage.static_dir, "", req).await
}

/// `GET /*path`
pub async fn serve_asset(
    State(state): State<AppState>,
    UrlPath(path): UrlPath<String>,
    req: Request,
) -> Response {
    serve_from(&state.config.storage.static_dir, &path, req).await
}

/// Serve `requested` from `static_dir` if it names a file there, else
/// `index.html`, else a JSON status payload.
async fn serve_from(static_dir: &Path, requested: &str, req: Request) -> Response {
    if let Some(asset) = resolve_asset(static_dir, requested) {
        if is_file(&asset).await {
            return serve_file(asset, req).await;
        }
    }

    let index = static_dir.join(INDEX_FILE);
    if is_file(&index).await {
        return serve_file(index, req).await;
    }

    tracing::debug!(path = requested, "No frontend build to serve");
    Json(json!({ "status": FRONTEND_MISSING_STATUS })).into_response()
}

/// Join `requested` onto `static_dir`. Empty paths and paths with `..`,
/// root or prefix components resolve to nothing.
fn resolve_asset(static_dir: &Path, requested: &str) -> Option<PathBuf> {
    let relative = Path::new(requested.trim_start_matches('/'));
    if relative.as_os_str().is_empty() {
        return None;
    }
    if !relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return None;
    }
    Some(static_dir.join(relative))
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

async fn serve_file(path: PathBuf, req: Request) -> Response {
    match ServeFile::new(path).oneshot(req).await {
        Ok(res) => res.map(Body::new).into_response(),
        Err(never) => match never {},
    }
}
