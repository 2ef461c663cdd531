//! ReAct pattern: Thought, Action, Observation, repeated until an answer.
//!
//! Each query gets a fresh [`ConversationState`] seeded with the system
//! prompt and the user query. The controller then cycles through an
//! explicit state machine:
//!
//! ```text
//!            ┌──────────── observation ─────────────┐
//!            ▼                                       │
//! start → THINKING ──action──► TOOL_EXEC ────────────┘
//!            │   │                 │
//!            │   └─ turn bound ─► EXHAUSTED      (registry error / timeout)
//!            │                                        │
//!            └─ final answer ─► ANSWERED     ToolExecutionFailed
//! ```
//!
//! Every entry into THINKING is one model call and counts against
//! `max_turns`. Provider failures are never retried here; they surface as
//! `Err` to the caller. Tool business errors come back as observation
//! text and the loop keeps going.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use switchyard_config::AppConfig;
use switchyard_core::error::{ProviderError, ToolError};
use switchyard_core::message::{ConversationState, Message};
use switchyard_core::provider::{Provider, ProviderRequest};
use switchyard_core::tool::ToolRegistry;
use tracing::{debug, info, warn};

use crate::outcome::LoopOutcome;
use crate::parser::{ParsedReply, ResponseParser};
use crate::prompt;
use crate::specialist::Agent;

/// Controller states. Transitions happen only inside [`ReactAgent::run`].
#[derive(Debug)]
enum LoopState {
    Thinking,
    ToolExec {
        tool_name: String,
        arguments: Map<String, Value>,
    },
    Answered(String),
    Exhausted,
}

/// A tool-using agent driven by the ReAct protocol.
pub struct ReactAgent {
    /// LLM provider.
    provider: Arc<dyn Provider>,
    /// Model name.
    model: String,
    /// Temperature.
    temperature: f32,
    /// Default max tokens per response.
    max_tokens: Option<u32>,
    /// Tool registry, shared read-only.
    tools: Arc<ToolRegistry>,
    /// Opening line of the system prompt.
    persona: Option<String>,
    /// Maximum THINKING turns per query.
    max_turns: u32,
    model_timeout: Duration,
    tool_timeout: Duration,
}

impl ReactAgent {
    /// Create a new ReAct agent.
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            tools,
            persona: None,
            max_turns: 5,
            model_timeout: Duration::from_secs(60),
            tool_timeout: Duration::from_secs(30),
        }
    }

    /// Build an agent from the `[agent]` section of the config.
    pub fn from_config(
        provider: Arc<dyn Provider>,
        tools: Arc<ToolRegistry>,
        config: &AppConfig,
    ) -> Self {
        let agent = &config.agent;
        Self::new(provider, config.model.clone(), agent.temperature, tools)
            .with_max_turns(agent.max_turns)
            .with_timeouts(
                Duration::from_secs(agent.model_timeout_secs),
                Duration::from_secs(agent.tool_timeout_secs),
            )
            .with_max_tokens(agent.max_tokens)
    }

    /// Set max turns.
    pub fn with_max_turns(mut self, max: u32) -> Self {
        self.max_turns = max;
        self
    }

    /// Set the per-call model and tool timeouts.
    pub fn with_timeouts(mut self, model: Duration, tool: Duration) -> Self {
        self.model_timeout = model;
        self.tool_timeout = tool;
        self
    }

    /// Set the max tokens per LLM response.
    pub fn with_max_tokens(mut self, max: Option<u32>) -> Self {
        self.max_tokens = max;
        self
    }

    /// Replace the default opening line of the system prompt.
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    pub fn max_turns(&self) -> u32 {
        self.max_turns
    }

    /// Execute the ReAct loop for one query.
    pub async fn run(&self, query: &str) -> switchyard_core::Result<LoopOutcome> {
        let mut conversation = ConversationState::new();
        conversation.append(Message::system(prompt::react_system_prompt(
            self.persona.as_deref(),
            &self.tools.definitions(),
        )));
        conversation.append(Message::user(query));

        let parser = ResponseParser::new(&self.tools);
        let mut state = LoopState::Thinking;
        let mut turns = 0u32;

        info!(model = %self.model, max_turns = self.max_turns, "ReAct loop starting");

        loop {
            state = match state {
                LoopState::Thinking if turns >= self.max_turns => LoopState::Exhausted,
                LoopState::Thinking => {
                    turns += 1;
                    info!(turn = turns, "Thinking");

                    let reply = self.think(&conversation).await?;
                    let inspection = parser.inspect(&reply);
                    if let Some(ambiguity) = &inspection.ambiguity {
                        warn!(%ambiguity, "Reply treated as final answer");
                    }

                    match inspection.reply {
                        ParsedReply::Action {
                            tool_name,
                            arguments,
                        } => {
                            info!(tool = %tool_name, "Decided to take action");
                            conversation.append(Message::assistant(reply));
                            LoopState::ToolExec {
                                tool_name,
                                arguments,
                            }
                        }
                        ParsedReply::FinalAnswer { text } => LoopState::Answered(text),
                    }
                }
                LoopState::ToolExec {
                    tool_name,
                    arguments,
                } => match self.act(&tool_name, &arguments).await {
                    Ok(observation) => {
                        info!(tool = %tool_name, %observation, "Observation");
                        conversation.append(Message::tool_result(observation));
                        LoopState::Thinking
                    }
                    Err(e) => {
                        warn!(tool = %tool_name, "Tool execution failed: {e}");
                        return Ok(LoopOutcome::tool_failed(e.to_string(), turns));
                    }
                },
                LoopState::Answered(text) => {
                    info!(turns, "ReAct loop answered");
                    return Ok(LoopOutcome::answered(text, turns));
                }
                LoopState::Exhausted => {
                    warn!("ReAct: max turns reached ({})", self.max_turns);
                    return Ok(LoopOutcome::turn_limit_exceeded(turns));
                }
            };
        }
    }

    /// One model call over the current history; returns the trimmed reply.
    async fn think(&self, conversation: &ConversationState) -> Result<String, ProviderError> {
        debug!(
            messages = conversation.len(),
            est_tokens = conversation.estimated_tokens(),
            "Sending history"
        );
        let request = ProviderRequest::new(&self.model, conversation.snapshot(), self.temperature)
            .with_max_tokens(self.max_tokens);

        let response = tokio::time::timeout(self.model_timeout, self.provider.complete(request))
            .await
            .map_err(|_| ProviderError::Timeout(self.model_timeout.as_secs()))??;

        debug!(model = %response.model, "Model replied");
        Ok(response.content.trim().to_string())
    }

    async fn act(&self, tool_name: &str, arguments: &Map<String, Value>) -> Result<String, ToolError> {
        tokio::time::timeout(self.tool_timeout, self.tools.invoke(tool_name, arguments))
            .await
            .map_err(|_| ToolError::Timeout {
                tool_name: tool_name.to_string(),
                timeout_secs: self.tool_timeout.as_secs(),
            })?
    }
}

#[async_trait]
impl Agent for ReactAgent {
    async fn run(&self, query: &str) -> switchyard_core::Result<LoopOutcome> {
        ReactAgent::run(self, query).await
    }
}

// ── Tests ──
