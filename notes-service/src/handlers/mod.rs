//! HTTP handlers for the notes service.

pub mod frontend;
pub mod health;
pub mod notes;

pub use frontend::{serve_asset, serve_index};
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use notes::process_notes;
