//! RAG pattern: retrieval-augmented generation.
//!
//! # Flow
//!
//! 1. Receive user question
//! 2. Ask the retriever for the most relevant context
//! 3. Send one grounded prompt (context + question) to the model
//! 4. Return the reply as the answer
//!
//! There is no tool use and no loop: a RAG run always takes one turn.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use switchyard_config::AppConfig;
use switchyard_core::error::ProviderError;
use switchyard_core::message::Message;
use switchyard_core::provider::{Provider, ProviderRequest};
use switchyard_core::retrieval::Retriever;
use tracing::{debug, info};

use crate::outcome::LoopOutcome;
use crate::prompt;
use crate::specialist::Agent;

/// Answers questions strictly from retrieved context.
pub struct RagAgent {
    /// LLM provider.
    provider: Arc<dyn Provider>,
    /// Model name.
    model: String,
    /// Temperature.
    temperature: f32,
    max_tokens: Option<u32>,
    /// Where context comes from.
    retriever: Arc<dyn Retriever>,
    model_timeout: Duration,
}

impl RagAgent {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        retriever: Arc<dyn Retriever>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            retriever,
            model_timeout: Duration::from_secs(60),
        }
    }

    pub fn from_config(
        provider: Arc<dyn Provider>,
        retriever: Arc<dyn Retriever>,
        config: &AppConfig,
    ) -> Self {
        Self::new(
            provider,
            config.model.clone(),
            config.knowledge.temperature,
            retriever,
        )
        .with_model_timeout(Duration::from_secs(config.agent.model_timeout_secs))
        .with_max_tokens(config.agent.max_tokens)
    }

    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }

    pub fn with_max_tokens(mut self, max: Option<u32>) -> Self {
        self.max_tokens = max;
        self
    }

    /// Retrieve context for `query` and generate a grounded answer.
    pub async fn run(&self, query: &str) -> switchyard_core::Result<LoopOutcome> {
        let context = self.retriever.retrieve(query).await?;
        info!(
            retriever = self.retriever.name(),
            context_chars = context.len(),
            "RAG context retrieved"
        );

        let messages = vec![
            Message::system(prompt::RESEARCH_SYSTEM_PROMPT),
            Message::user(prompt::research_user_message(&context, query)),
        ];
        let request = ProviderRequest::new(&self.model, messages, self.temperature)
            .with_max_tokens(self.max_tokens);

        let response = tokio::time::timeout(self.model_timeout, self.provider.complete(request))
            .await
            .map_err(|_| ProviderError::Timeout(self.model_timeout.as_secs()))??;

        debug!(model = %response.model, "RAG answer generated");
        Ok(LoopOutcome::answered(response.content.trim(), 1))
    }
}

#[async_trait]
impl Agent for RagAgent {
    async fn run(&self, query: &str) -> switchyard_core::Result<LoopOutcome> {
        RagAgent::run(self, query).await
    }
}

// ── Tests ──
