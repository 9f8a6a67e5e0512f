//! Flat-file record of prompts that hit a provider outage.

use chrono::{DateTime, Utc};
use service_core::error::AppError;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Directory of `failed_prompt_<YYYYMMDDTHHMMSSZ>.txt` files.
///
/// Names have second granularity and no suffix, so two failures in the same
/// second share a file and the later write wins. Nothing reads or deletes
/// these files.
#[derive(Debug, Clone)]
pub struct FailedPromptStore {
    dir: PathBuf,
}

impl FailedPromptStore {
    /// Create the store, making the directory if it does not exist.
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `prompt` to a file named after the current UTC second.
    pub async fn save(&self, prompt: &str) -> std::io::Result<PathBuf> {
        self.save_at(prompt, Utc::now()).await
    }

    /// Write `prompt` to the file for `timestamp`, replacing any existing one.
    pub async fn save_at(&self, prompt: &str, timestamp: DateTime<Utc>) -> std::io::Result<PathBuf> {
        let path = self.dir.join(file_name(timestamp));
        fs::write(&path, prompt).await?;
        Ok(path)
    }
}

fn file_name(timestamp: DateTime<Utc>) -> String {
    format!("failed_prompt_{}.txt", timestamp.format("%Y%m%dT%H%M%SZ"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_name_uses_utc_second_timestamp() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).unwrap();
        assert_eq!(file_name(ts), "failed_prompt_20250307T140509Z.txt");
    }

    #[tokio::test]
    async fn new_creates_missing_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("failed_prompts");

        let store = FailedPromptStore::new(&dir).await.unwrap();

        assert!(dir.is_dir());
        assert_eq!(store.dir(), dir.as_path());
    }

    #[tokio::test]
    async fn save_writes_exact_prompt() {
        let root = tempfile::tempdir().unwrap();
        let store = FailedPromptStore::new(root.path()).await.unwrap();

        let path = store.save("Topic: x\nnotes ??\n").await.unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("failed_prompt_") && name.ends_with("Z.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Topic: x\nnotes ??\n");
    }

    #[tokio::test]
    async fn same_second_overwrites() {
        let root = tempfile::tempdir().unwrap();
        let store = FailedPromptStore::new(root.path()).await.unwrap();
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        let first = store.save_at("first", ts).await.unwrap();
        let second = store.save_at("second", ts).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "second");
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn save_reports_missing_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("gone");
        let store = FailedPromptStore::new(&dir).await.unwrap();
        std::fs::remove_dir(&dir).unwrap();

        assert!(store.save("prompt").await.is_err());
    }
}
