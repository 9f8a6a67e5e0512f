use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Message returned to clients when the AI provider is overloaded or down.
pub const PROVIDER_UNAVAILABLE_MESSAGE: &str =
    "The AI model is not available. Please try again later.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    /// Transient provider unavailability. The inner text is the provider's
    /// own message and is only logged, never returned.
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Any other provider failure. The message is returned verbatim.
    #[error("{0}")]
    ProviderError(String),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<String>,
        }

        let (status, error_message, details) = match self {
            AppError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string(), None),
            AppError::ProviderUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                PROVIDER_UNAVAILABLE_MESSAGE.to_string(),
                None,
            ),
            AppError::ProviderError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            AppError::InternalError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                Some(format!("{:#}", err)),
            ),
            AppError::ConfigError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error".to_string(),
                Some(err.to_string()),
            ),
        };

        (
            status,
            Json(ErrorResponse {
                error: error_message,
                details,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn provider_unavailable_hides_provider_message() {
        let response =
            AppError::ProviderUnavailable("503 UNAVAILABLE. overloaded".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(
            body,
            serde_json::json!({ "error": PROVIDER_UNAVAILABLE_MESSAGE })
        );
    }

    #[tokio::test]
    async fn provider_error_returns_raw_message() {
        let response = AppError::ProviderError("invalid api key".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "error": "invalid api key" }));
    }

    #[tokio::test]
    async fn bad_request_maps_to_400() {
        let response = AppError::BadRequest(anyhow::anyhow!("body is not JSON")).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "body is not JSON");
    }
}
