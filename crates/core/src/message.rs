//! Message and conversation-state domain types.
//!
//! A [`ConversationState`] is the literal prompt history the agent loop
//! sends to the model on every turn. It only grows; nothing is ever
//! removed or edited once appended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// System instructions (behavior contract, output rules)
    System,
    /// The end user
    User,
    /// The model
    Assistant,
    /// Text returned by a tool invocation
    ToolResult,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::ToolResult => "tool_result",
        };
        f.write_str(s)
    }
}

/// A single message in a conversation.
///
/// Fields are private so a message cannot change after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: String,
    role: Role,
    content: String,
    timestamp: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a tool result (observation) message.
    pub fn tool_result(content: impl Into<String>) -> Self {
        Self::new(Role::ToolResult, content)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Append-only, ordered message log owned by one agent loop run.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message at the end of the history.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The full ordered history, ready to be sent as the next prompt.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Rough token estimate (4 chars ≈ 1 token).
    pub fn estimated_tokens(&self) -> usize {
        self.messages.iter().map(|m| m.content.len() / 4).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("Hello, agent!");
        assert_eq!(msg.role(), Role::User);
        assert_eq!(msg.content(), "Hello, agent!");
        assert!(!msg.id().is_empty());
    }

    #[test]
    fn snapshot_preserves_order() {
        let mut state = ConversationState::new();
        let sent = vec![
            Message::system("rules"),
            Message::user("What is 2 + 3?"),
            Message::assistant(r#"{"tool": "calculator", "args": {"a": 2, "b": 3, "operation": "add"}}"#),
            Message::tool_result("5"),
            Message::assistant("The answer is 5."),
        ];
        for m in &sent {
            state.append(m.clone());
        }

        let snapshot = state.snapshot();
        assert_eq!(snapshot.len(), sent.len());
        assert_eq!(snapshot, sent);
    }

    #[test]
    fn snapshot_is_detached_from_later_appends() {
        let mut state = ConversationState::new();
        state.append(Message::user("first"));
        let before = state.snapshot();
        state.append(Message::user("second"));
        assert_eq!(before.len(), 1);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn role_serializes_snake_case() {
        let json = serde_json::to_string(&Role::ToolResult).unwrap();
        assert_eq!(json, "\"tool_result\"");
        assert_eq!(Role::ToolResult.to_string(), "tool_result");
    }

    #[test]
    fn token_estimate() {
        let mut state = ConversationState::new();
        // 20 chars ≈ 5 tokens
        state.append(Message::user("12345678901234567890"));
        assert_eq!(state.estimated_tokens(), 5);
    }
}
