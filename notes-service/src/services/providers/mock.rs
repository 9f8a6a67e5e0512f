//! Mock provider implementation for testing.

use super::{GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// Scripted outcome of every `generate` call.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Succeed with this text.
    Text(String),
    /// Fail with [`ProviderError::Unavailable`] carrying this message.
    Unavailable(String),
    /// Fail with [`ProviderError::Api`] carrying this message.
    Error(String),
}

/// Mock text provider that records the prompts it receives.
pub struct MockTextProvider {
    reply: MockReply,
    prompts: Mutex<Vec<String>>,
    params: Mutex<Vec<GenerationParams>>,
}

impl MockTextProvider {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
            params: Mutex::new(Vec::new()),
        }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(MockReply::Text(text.into()))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockReply::Error(message.into()))
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(MockReply::Unavailable(message.into()))
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    /// Generation parameters received so far, oldest first.
    pub fn params(&self) -> Vec<GenerationParams> {
        self.params
            .lock()
            .map(|params| params.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        if let Ok(mut recorded) = self.params.lock() {
            recorded.push(params.clone());
        }

        match &self.reply {
            MockReply::Text(text) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: prompt.len() as i32 / 4,
                output_tokens: text.len() as i32 / 4,
            }),
            MockReply::Unavailable(message) => Err(ProviderError::Unavailable(message.clone())),
            MockReply::Error(message) => Err(ProviderError::Api(message.clone())),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.reply {
            MockReply::Unavailable(message) => Err(ProviderError::Unavailable(message.clone())),
            _ => Ok(()),
        }
    }
}
