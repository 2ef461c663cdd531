//! Classifies a raw model reply as an action or a final answer.
//!
//! A reply is an action only when it is a single JSON object whose `tool`
//! field names a registered tool and whose `args` field is a non-empty
//! object. Anything else is surfaced verbatim as the final answer.
//!
//! That fallback means a malformed or hallucinated tool call looks, to
//! the caller, exactly like a genuine answer. [`ResponseParser::inspect`]
//! reports a [`ParseAmbiguity`] whenever a reply was JSON-shaped but did
//! not qualify, so the agent loop can log it without changing behavior.

use serde_json::{Map, Value};
use switchyard_core::tool::ToolRegistry;
use thiserror::Error;

/// The classification of one model reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedReply {
    /// Invoke `tool_name` with `arguments`, then keep reasoning.
    Action {
        tool_name: String,
        arguments: Map<String, Value>,
    },
    /// Stop and return `text` to the caller.
    FinalAnswer { text: String },
}

impl ParsedReply {
    pub fn is_action(&self) -> bool {
        matches!(self, ParsedReply::Action { .. })
    }
}

/// Why a JSON-shaped reply was not accepted as an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAmbiguity {
    #[error("reply is JSON but not an object")]
    NotAnObject,

    #[error("reply object has no string 'tool' field")]
    MissingTool,

    #[error("reply object has no object 'args' field")]
    MissingArgs,

    #[error("action for '{0}' has empty 'args'")]
    EmptyArgs(String),

    #[error("reply names unregistered tool '{0}'")]
    UnknownTool(String),
}

/// A reply together with the diagnostic explaining a fallback, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub reply: ParsedReply,
    pub ambiguity: Option<ParseAmbiguity>,
}

/// Classifies replies against a tool registry.
pub struct ResponseParser<'a> {
    tools: &'a ToolRegistry,
}

impl<'a> ResponseParser<'a> {
    pub fn new(tools: &'a ToolRegistry) -> Self {
        Self { tools }
    }

    /// Classify `raw_text`.
    pub fn parse(&self, raw_text: &str) -> ParsedReply {
        self.inspect(raw_text).reply
    }

    /// Classify `raw_text` and explain any fallback to a final answer.
    pub fn inspect(&self, raw_text: &str) -> Inspection {
        match self.try_action(raw_text) {
            Ok(reply) => Inspection {
                reply,
                ambiguity: None,
            },
            Err(ambiguity) => Inspection {
                reply: ParsedReply::FinalAnswer {
                    text: raw_text.to_string(),
                },
                ambiguity,
            },
        }
    }

    /// `Err(None)` means plain text: not an action, and not ambiguous.
    fn try_action(&self, raw_text: &str) -> Result<ParsedReply, Option<ParseAmbiguity>> {
        let value: Value = serde_json::from_str(raw_text.trim()).map_err(|_| None)?;

        let Value::Object(mut object) = value else {
            return Err(Some(ParseAmbiguity::NotAnObject));
        };

        let tool_name = match object.get("tool") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => return Err(Some(ParseAmbiguity::MissingTool)),
        };

        let arguments = match object.remove("args") {
            Some(Value::Object(args)) => args,
            _ => return Err(Some(ParseAmbiguity::MissingArgs)),
        };

        if arguments.is_empty() {
            return Err(Some(ParseAmbiguity::EmptyArgs(tool_name)));
        }

        if !self.tools.contains(&tool_name) {
            return Err(Some(ParseAmbiguity::UnknownTool(tool_name)));
        }

        Ok(ParsedReply::Action {
            tool_name,
            arguments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        switchyard_tools::default_registry().unwrap()
    }

    fn final_text(reply: ParsedReply) -> String {
        match reply {
            ParsedReply::FinalAnswer { text } => text,
            other => panic!("expected final answer, got {other:?}"),
        }
    }

    #[test]
    fn well_formed_action() {
        let tools = registry();
        let parser = ResponseParser::new(&tools);
        let reply = parser.parse(r#"{"tool": "calculator", "args": {"a": 2, "b": 3, "operation": "add"}}"#);
        match reply {
            ParsedReply::Action {
                tool_name,
                arguments,
            } => {
                assert_eq!(tool_name, "calculator");
                assert_eq!(arguments.get("a"), Some(&json!(2)));
                assert_eq!(arguments.get("operation"), Some(&json!("add")));
            }
            other => panic!("expected action, got {other:?}"),
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let tools = registry();
        let parser = ResponseParser::new(&tools);
        let reply = parser.parse("\n  {\"tool\": \"calculator\", \"args\": {\"a\": 1}}  \n");
        assert!(reply.is_action());
    }

    #[test]
    fn plain_sentence_is_final_answer_verbatim() {
        let tools = registry();
        let parser = ResponseParser::new(&tools);
        let raw = "  The result of 250 multiplied by 12.5 is 3125.  ";
        let inspection = parser.inspect(raw);
        assert_eq!(inspection.ambiguity, None);
        assert_eq!(final_text(inspection.reply), raw);
    }

    #[test]
    fn fallback_text_is_exactly_the_raw_reply() {
        let tools = registry();
        let parser = ResponseParser::new(&tools);
        for raw in [
            "",
            "42",
            "[1, 2, 3]",
            "{\"tool\": \"calculator\"",
            "```json\n{\"tool\": \"calculator\", \"args\": {\"a\": 1}}\n```",
            "{\"answer\": \"yes\"}",
        ] {
            assert_eq!(final_text(parser.parse(raw)), raw);
        }
    }

    #[test]
    fn unknown_tool_falls_back_with_diagnostic() {
        let tools = registry();
        let parser = ResponseParser::new(&tools);
        let raw = r#"{"tool": "weather", "args": {"city": "Paris"}}"#;
        let inspection = parser.inspect(raw);
        assert_eq!(
            inspection.ambiguity,
            Some(ParseAmbiguity::UnknownTool("weather".into()))
        );
        assert_eq!(final_text(inspection.reply), raw);
    }

    #[test]
    fn empty_args_falls_back() {
        let tools = registry();
        let parser = ResponseParser::new(&tools);
        let inspection = parser.inspect(r#"{"tool": "calculator", "args": {}}"#);
        assert_eq!(
            inspection.ambiguity,
            Some(ParseAmbiguity::EmptyArgs("calculator".into()))
        );
        assert!(!inspection.reply.is_action());
    }

    #[test]
    fn missing_fields_fall_back() {
        let tools = registry();
        let parser = ResponseParser::new(&tools);
        assert_eq!(
            parser.inspect(r#"{"args": {"a": 1}}"#).ambiguity,
            Some(ParseAmbiguity::MissingTool)
        );
        assert_eq!(
            parser.inspect(r#"{"tool": "calculator", "args": [1, 2]}"#).ambiguity,
            Some(ParseAmbiguity::MissingArgs)
        );
        assert_eq!(parser.inspect("7").ambiguity, Some(ParseAmbiguity::NotAnObject));
    }

    #[test]
    fn argument_values_are_not_checked_here() {
        // Schema validation belongs to the registry; a registered tool with
        // any non-empty args is an action.
        let tools = registry();
        let parser = ResponseParser::new(&tools);
        assert!(parser.parse(r#"{"tool": "calculator", "args": {"x": true}}"#).is_action());
    }
}
