pub mod failed_prompts;
pub mod metrics;
pub mod prompt;
pub mod providers;

pub use failed_prompts::FailedPromptStore;
pub use metrics::{get_metrics, init_metrics};
