//! Shared test helpers for pattern tests.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use switchyard_core::error::ProviderError;
use switchyard_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};
use switchyard_core::tool::{ArgType, ArgumentSchema, Tool, ToolArgs};

/// A mock provider that returns a sequence of scripted responses.
///
/// Each call to `complete` returns the next response in the queue and
/// records the request it was given. Panics if more calls are made than
/// responses provided.
pub struct SequentialMockProvider {
    responses: Mutex<Vec<Result<ProviderResponse, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl SequentialMockProvider {
    pub fn new(responses: Vec<Result<ProviderResponse, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Replies with each text in order.
    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(make_text_response(t))).collect())
    }

    /// Fails the first call with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every request seen so far, in call order.
    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let responses = self.responses.lock().unwrap();
        let call = requests.len();

        if call >= responses.len() {
            panic!(
                "SequentialMockProvider: no more responses (call #{}, have {})",
                call,
                responses.len()
            );
        }

        requests.push(request);
        responses[call].clone()
    }
}

/// A provider that never answers within any reasonable timeout.
pub struct StalledProvider;

#[async_trait]
impl Provider for StalledProvider {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(make_text_response("too late"))
    }
}

/// A tool that sleeps far longer than any tool timeout.
pub struct StalledTool;

#[async_trait]
impl Tool for StalledTool {
    fn name(&self) -> &str {
        "stall"
    }

    fn description(&self) -> &str {
        "Never finishes"
    }

    fn argument_schema(&self) -> ArgumentSchema {
        ArgumentSchema::new().arg("seconds", ArgType::Number, "How long to wait")
    }

    async fn execute(&self, _args: ToolArgs) -> String {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        "done".into()
    }
}

/// Create a simple text response.
pub fn make_text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        content: text.to_string(),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

/// JSON action text for `calculator`.
pub fn calculator_action(a: f64, b: f64, operation: &str) -> String {
    serde_json::json!({
        "tool": "calculator",
        "args": { "a": a, "b": b, "operation": operation }
    })
    .to_string()
}
