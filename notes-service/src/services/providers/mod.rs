//! AI provider abstractions and implementations.
//!
//! The notes handler talks to a [`TextProvider`] trait object so the Gemini
//! backend can be swapped for [`mock::MockTextProvider`] in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
///
/// `Display` yields the provider's own message without decoration so it can
/// be surfaced to clients verbatim.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Provider reported overload or unavailability (HTTP 503 / `UNAVAILABLE`).
    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("{0}")]
    Api(String),

    #[error("{0}")]
    Network(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Content filtered: {0}")]
    ContentFiltered(String),

    #[error("Provider returned no text")]
    EmptyResponse,
}

/// How the request handler should react to a provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Overloaded or down; persist the prompt and answer 503.
    TransientUnavailable,
    /// Everything else; answer 500 with the raw message.
    Generic,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::TransientUnavailable => "unavailable",
            FailureKind::Generic => "generic",
        }
    }
}

impl ProviderError {
    /// Classify this error.
    ///
    /// The structured [`ProviderError::Unavailable`] variant wins. For every
    /// other variant the message is scanned for `"503"`, `"unavailable"` or
    /// `"model is overloaded"` (the last two case-insensitive). The scan is
    /// best-effort: it catches transport and SDK errors that only carry the
    /// condition in their text.
    pub fn failure_kind(&self) -> FailureKind {
        if matches!(self, ProviderError::Unavailable(_)) {
            return FailureKind::TransientUnavailable;
        }
        if looks_unavailable(&self.to_string()) {
            FailureKind::TransientUnavailable
        } else {
            FailureKind::Generic
        }
    }

    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderError::Unavailable(_) => "unavailable",
            ProviderError::RateLimited(_) => "rate_limited",
            ProviderError::Api(_) => "api",
            ProviderError::Network(_) => "network",
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ContentFiltered(_) => "content_filtered",
            ProviderError::EmptyResponse => "empty_response",
        }
    }
}

fn looks_unavailable(message: &str) -> bool {
    let lowered = message.to_lowercase();
    message.contains("503")
        || lowered.contains("unavailable")
        || lowered.contains("model is overloaded")
}

/// Result of a provider response.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Generated text, possibly JSON.
    pub text: String,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,
}

/// Generation parameters for AI requests.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    /// Requested MIME type of the output, e.g. `application/json`.
    pub response_mime_type: Option<String>,

    /// Token budget for internal reasoning. `Some(0)` disables thinking.
    pub thinking_budget: Option<i32>,

    /// Temperature (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Maximum output tokens.
    pub max_output_tokens: Option<i32>,
}

impl GenerationParams {
    /// JSON-only output with thinking disabled.
    pub fn json_without_thinking() -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            thinking_budget: Some(0),
            ..Default::default()
        }
    }
}

/// Trait for text/JSON generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Generate a single, non-streamed response.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
