//! Prometheus metrics for notes-service.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::{Once, OnceLock};

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static NOTES_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static PROVIDER_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static FAILED_PROMPTS_SAVED_TOTAL: OnceLock<IntCounter> = OnceLock::new();

static INIT: Once = Once::new();

/// Initialize all metrics. Later calls are no-ops.
pub fn init_metrics() {
    INIT.call_once(register_metrics);
}

fn register_metrics() {
    let registry = Registry::new();

    // outcome: structured, raw_text, unavailable, error
    let notes_requests = IntCounterVec::new(
        Opts::new("notes_requests_total", "Total note expansion requests"),
        &["outcome"],
    )
    .expect("Failed to create notes_requests_total metric");

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "notes_provider_latency_seconds",
            "AI provider API latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["provider"],
    )
    .expect("Failed to create notes_provider_latency_seconds metric");

    let provider_errors = IntCounterVec::new(
        Opts::new("notes_provider_errors_total", "Total AI provider errors"),
        &["provider", "error_type", "kind"],
    )
    .expect("Failed to create notes_provider_errors_total metric");

    let failed_prompts_saved = IntCounter::new(
        "notes_failed_prompts_saved_total",
        "Prompts persisted after a provider outage",
    )
    .expect("Failed to create notes_failed_prompts_saved_total metric");

    registry
        .register(Box::new(notes_requests.clone()))
        .expect("Failed to register notes_requests_total");
    registry
        .register(Box::new(provider_latency.clone()))
        .expect("Failed to register notes_provider_latency_seconds");
    registry
        .register(Box::new(provider_errors.clone()))
        .expect("Failed to register notes_provider_errors_total");
    registry
        .register(Box::new(failed_prompts_saved.clone()))
        .expect("Failed to register notes_failed_prompts_saved_total");

    let _ = REGISTRY.set(registry);
    let _ = NOTES_REQUESTS_TOTAL.set(notes_requests);
    let _ = PROVIDER_LATENCY_SECONDS.set(provider_latency);
    let _ = PROVIDER_ERRORS_TOTAL.set(provider_errors);
    let _ = FAILED_PROMPTS_SAVED_TOTAL.set(failed_prompts_saved);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

/// Record the outcome of a note expansion request.
pub fn record_notes_request(outcome: &str) {
    if let Some(counter) = NOTES_REQUESTS_TOTAL.get() {
        counter.with_label_values(&[outcome]).inc();
    }
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, duration_secs: f64) {
    if let Some(histogram) = PROVIDER_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider])
            .observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(provider: &str, error_type: &str, kind: &str) {
    if let Some(counter) = PROVIDER_ERRORS_TOTAL.get() {
        counter.with_label_values(&[provider, error_type, kind]).inc();
    }
}

/// Record a prompt written to the failed-prompts directory.
pub fn record_failed_prompt_saved() {
    if let Some(counter) = FAILED_PROMPTS_SAVED_TOTAL.get() {
        counter.inc();
    }
}
