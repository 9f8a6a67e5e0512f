//! `POST /api/process_notes`: expand shorthand notes through the AI provider.

use crate::models::{NoteRequest, NoteResponse};
use crate::services::metrics;
use crate::services::prompt::build_prompt;
use crate::services::providers::{FailureKind, GenerationParams, ProviderError};
use crate::services::FailedPromptStore;
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, Json};
use service_core::error::AppError;
use std::time::Instant;

/// Expand the submitted notes.
///
/// Makes exactly one provider call. Output that is not a JSON object is
/// returned as raw text in `expandedNotes`. Provider outages persist the
/// prompt and answer 503; any other provider failure answers 500 with the
/// provider's message.
pub async fn process_notes(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<NoteResponse>, AppError> {
    let request = NoteRequest::from_body(&body)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid JSON body: {}", e)))?;

    let prompt = build_prompt(&request);
    let provider = state.text_provider.name();

    tracing::info!(
        provider,
        tone = %request.tone,
        topic_len = request.topic.len(),
        notes_len = request.notes.len(),
        "Processing notes"
    );

    let started = Instant::now();
    let result = state
        .text_provider
        .generate(&prompt, &GenerationParams::json_without_thinking())
        .await;
    metrics::record_provider_latency(provider, started.elapsed().as_secs_f64());

    let response = match result {
        Ok(response) => response,
        Err(err) => return Err(provider_failure(&state, &prompt, err).await),
    };

    let notes = match NoteResponse::try_from_json(&response.text) {
        Some(notes) => {
            metrics::record_notes_request("structured");
            notes
        }
        None => {
            tracing::warn!(
                text_len = response.text.len(),
                "Provider output is not a JSON object; returning raw text"
            );
            metrics::record_notes_request("raw_text");
            NoteResponse::from_raw_text(&response.text)
        }
    };

    tracing::info!(
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        important = notes.important.len(),
        tasks = notes.tasks.len(),
        "Notes expanded"
    );

    Ok(Json(notes))
}

async fn provider_failure(state: &AppState, prompt: &str, err: ProviderError) -> AppError {
    let kind = err.failure_kind();
    let provider = state.text_provider.name();

    tracing::error!(
        provider,
        error = %err,
        error_type = err.label(),
        kind = kind.as_str(),
        "Error generating content"
    );
    metrics::record_provider_error(provider, err.label(), kind.as_str());

    match kind {
        FailureKind::TransientUnavailable => {
            persist_failed_prompt(&state.failed_prompts, prompt).await;
            metrics::record_notes_request("unavailable");
            AppError::ProviderUnavailable(err.to_string())
        }
        FailureKind::Generic => {
            metrics::record_notes_request("error");
            AppError::ProviderError(err.to_string())
        }
    }
}

/// Best-effort: a write failure is logged and otherwise ignored.
async fn persist_failed_prompt(store: &FailedPromptStore, prompt: &str) {
    match store.save(prompt).await {
        Ok(path) => {
            metrics::record_failed_prompt_saved();
            tracing::info!(path = %path.display(), "Saved failed prompt");
        }
        Err(e) => {
            tracing::error!(
                dir = %store.dir().display(),
                error = %e,
                "Failed to save prompt"
            );
        }
    }
}
