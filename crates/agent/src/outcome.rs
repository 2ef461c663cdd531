//! Terminal result of one agent loop or route attempt.

use serde::{Deserialize, Serialize};

/// Text reported when the router cannot pick a specialist.
pub const UNRESOLVED_TEXT: &str = "no specialist could be determined";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopStatus {
    /// The model produced a final answer.
    Answered,
    /// The turn bound was reached without a final answer.
    TurnLimitExceeded,
    /// A tool call violated the registry contract or timed out.
    ToolExecutionFailed,
    /// The router could not map the query to a specialist.
    Unresolved,
}

impl std::fmt::Display for LoopStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LoopStatus::Answered => "answered",
            LoopStatus::TurnLimitExceeded => "turn limit exceeded",
            LoopStatus::ToolExecutionFailed => "tool execution failed",
            LoopStatus::Unresolved => "unresolved",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopOutcome {
    pub status: LoopStatus,
    pub text: Option<String>,
    /// THINKING transitions taken (model calls made by the loop).
    pub turns: u32,
}

impl LoopOutcome {
    pub fn answered(text: impl Into<String>, turns: u32) -> Self {
        Self {
            status: LoopStatus::Answered,
            text: Some(text.into()),
            turns,
        }
    }

    pub fn turn_limit_exceeded(turns: u32) -> Self {
        Self {
            status: LoopStatus::TurnLimitExceeded,
            text: None,
            turns,
        }
    }

    pub fn tool_failed(reason: impl Into<String>, turns: u32) -> Self {
        Self {
            status: LoopStatus::ToolExecutionFailed,
            text: Some(reason.into()),
            turns,
        }
    }

    pub fn unresolved() -> Self {
        Self {
            status: LoopStatus::Unresolved,
            text: Some(UNRESOLVED_TEXT.to_string()),
            turns: 0,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.status == LoopStatus::Answered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_limit_has_no_text() {
        let outcome = LoopOutcome::turn_limit_exceeded(5);
        assert_eq!(outcome.status, LoopStatus::TurnLimitExceeded);
        assert!(outcome.text.is_none());
        assert!(!outcome.is_answered());
    }

    #[test]
    fn unresolved_carries_explanation() {
        let outcome = LoopOutcome::unresolved();
        assert_eq!(outcome.text.as_deref(), Some(UNRESOLVED_TEXT));
        assert_eq!(outcome.turns, 0);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&LoopStatus::ToolExecutionFailed).unwrap();
        assert_eq!(json, "\"tool_execution_failed\"");
    }
}
