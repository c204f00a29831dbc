//! Role profile generation
//!
//! `ReportGenerator` is the collaborator the tracker calls once an interview
//! is complete. The production implementation forwards the two prompts to an
//! [`LLMProvider`] and returns the reply, trimmed but otherwise unmodified.

use crate::llm::{LLMProvider, Message};
use async_trait::async_trait;
use sdk::errors::EngineError;
use std::sync::Arc;

/// Turns the interview prompts into a role profile
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    async fn generate_report(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, EngineError>;
}

/// Report generator backed by a chat-completion provider
pub struct LLMReportGenerator {
    provider: Arc<dyn LLMProvider>,
}

impl LLMReportGenerator {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ReportGenerator for LLMReportGenerator {
    async fn generate_report(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, EngineError> {
        let messages = [Message::system(system_prompt), Message::user(user_prompt)];

        let started = std::time::Instant::now();
        let content = self.provider.generate(&messages).await?;

        tracing::info!(
            provider = self.provider.name(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = content.len(),
            "Generated role profile"
        );

        Ok(content.trim().to_string())
    }
}
