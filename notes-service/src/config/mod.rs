use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, Deserialize)]
pub struct NotesConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub storage: StorageSettings,
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    /// Missing key is tolerated at startup; provider calls will fail instead.
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    /// Unset leaves the HTTP client without a request timeout.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Directory receiving `failed_prompt_*.txt` files.
    pub failed_prompts_dir: PathBuf,
    /// Frontend build served for non-API GET requests.
    pub static_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

impl NotesConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let timeout_secs = match env::var("GEMINI_TIMEOUT_SECS") {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "GEMINI_TIMEOUT_SECS must be a whole number of seconds: {}",
                    e
                ))
            })?),
            Err(_) => None,
        };

        Ok(NotesConfig {
            common: common_config,
            gemini: GeminiSettings {
                api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
                model: get_env("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                api_base: get_env("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
                timeout_secs,
            },
            storage: StorageSettings {
                failed_prompts_dir: get_env("FAILED_PROMPTS_DIR", "failed_prompts")
                    .into(),
                static_dir: get_env("STATIC_DIR", "static").into(),
            },
            cors: CorsSettings {
                allowed_origins: parse_origins(&get_env(
                    "CORS_ALLOWED_ORIGINS",
                    DEFAULT_ALLOWED_ORIGIN,
                )),
            },
        })
    }
}

impl GeminiSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_split_and_trimmed() {
        assert_eq!(
            parse_origins("http://localhost:3000, https://notes.example.com ,"),
            vec![
                "http://localhost:3000".to_string(),
                "https://notes.example.com".to_string()
            ]
        );
    }

    #[test]
    fn default_is_used_when_unset() {
        assert_eq!(get_env("NOTES_SERVICE_TEST_UNSET_KEY", "fallback"), "fallback");
    }
}
