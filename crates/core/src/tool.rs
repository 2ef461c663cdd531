//! Tool trait and registry: the closed set of capabilities an agent may invoke.
//!
//! Tools are registered explicitly, looked up by name, and invoked with an
//! argument map that is validated against the tool's declared schema
//! before `execute` ever runs. A tool's own business failures (bad
//! operation, division by zero) come back as plain observation text so
//! the model can react to them on the next turn.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::error::ToolError;

/// Primitive type an argument must be coercible to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    Number,
    Integer,
    String,
    Boolean,
}

impl std::fmt::Display for ArgType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ArgType::Number => "number",
            ArgType::Integer => "integer",
            ArgType::String => "string",
            ArgType::Boolean => "boolean",
        };
        f.write_str(s)
    }
}

impl ArgType {
    /// Coerce a raw JSON value to this type.
    fn coerce(self, value: &Value) -> Result<ArgValue, String> {
        match (self, value) {
            (ArgType::Number, Value::Number(n)) => n
                .as_f64()
                .filter(|f| f.is_finite())
                .map(ArgValue::Number)
                .ok_or_else(|| format!("{n} is not a finite number")),
            (ArgType::Number, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(ArgValue::Number)
                .ok_or_else(|| format!("expected number, got \"{s}\"")),
            (ArgType::Integer, Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    Ok(ArgValue::Integer(i))
                } else if let Some(f) = n.as_f64()
                    && f.fract() == 0.0
                    && f.abs() < 9.0e15
                {
                    Ok(ArgValue::Integer(f as i64))
                } else {
                    Err(format!("expected integer, got {n}"))
                }
            }
            (ArgType::Integer, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(ArgValue::Integer)
                .map_err(|_| format!("expected integer, got \"{s}\"")),
            (ArgType::String, Value::String(s)) => Ok(ArgValue::String(s.clone())),
            (ArgType::String, Value::Number(n)) => Ok(ArgValue::String(n.to_string())),
            (ArgType::String, Value::Bool(b)) => Ok(ArgValue::String(b.to_string())),
            (ArgType::Boolean, Value::Bool(b)) => Ok(ArgValue::Boolean(*b)),
            (ArgType::Boolean, Value::String(s)) => match s.as_str() {
                "true" => Ok(ArgValue::Boolean(true)),
                "false" => Ok(ArgValue::Boolean(false)),
                _ => Err(format!("expected boolean, got \"{s}\"")),
            },
            (ty, other) => Err(format!("expected {ty}, got {}", json_kind(other))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A validated, typed argument value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Number(f64),
    Integer(i64),
    String(String),
    Boolean(bool),
}

/// One declared argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ArgType,
    pub description: String,
}

/// Argument contract of a tool: every listed argument is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArgumentSchema {
    args: Vec<ArgSpec>,
}

impl ArgumentSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required argument.
    pub fn arg(mut self, name: impl Into<String>, ty: ArgType, description: impl Into<String>) -> Self {
        self.args.push(ArgSpec {
            name: name.into(),
            ty,
            description: description.into(),
        });
        self
    }

    pub fn args(&self) -> &[ArgSpec] {
        &self.args
    }

    pub fn get(&self, name: &str) -> Option<&ArgSpec> {
        self.args.iter().find(|a| a.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Validate a raw argument map against this schema.
    ///
    /// Fails on the first missing or mistyped field. Keys the schema does
    /// not declare are dropped.
    pub fn validate(&self, tool_name: &str, arguments: &Map<String, Value>) -> Result<ToolArgs, ToolError> {
        let invalid = |field: &str, reason: String| ToolError::ArgumentValidation {
            tool_name: tool_name.to_string(),
            field: field.to_string(),
            reason,
        };

        let mut values = BTreeMap::new();
        for spec in &self.args {
            let raw = arguments
                .get(&spec.name)
                .ok_or_else(|| invalid(&spec.name, "missing required argument".into()))?;
            let value = spec.ty.coerce(raw).map_err(|reason| invalid(&spec.name, reason))?;
            values.insert(spec.name.clone(), value);
        }

        for extra in arguments.keys().filter(|k| self.get(k).is_none()) {
            debug!(tool = tool_name, argument = %extra, "Ignoring undeclared argument");
        }

        Ok(ToolArgs(values))
    }
}

/// Arguments that passed schema validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArgs(BTreeMap<String, ArgValue>);

impl ToolArgs {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.0.get(name)
    }

    /// A numeric argument; integers widen to `f64`.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.0.get(name)? {
            ArgValue::Number(n) => Some(*n),
            ArgValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.0.get(name)? {
            ArgValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.0.get(name)? {
            ArgValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.0.get(name)? {
            ArgValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Description of a tool as shown to the model in the system prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub arguments: Vec<ArgSpec>,
}

impl ToolDefinition {
    /// One-line signature, e.g. `calculator(a: number, b: number): Adds things.`
    pub fn signature(&self) -> String {
        let args = self
            .arguments
            .iter()
            .map(|a| format!("{}: {}", a.name, a.ty))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({}): {}", self.name, args, self.description)
    }
}

/// The core Tool trait.
///
/// `execute` receives arguments that already satisfy `argument_schema`
/// and must not fail: business errors are returned as descriptive text.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "calculator").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the model).
    fn description(&self) -> &str;

    /// The tool's argument contract.
    fn argument_schema(&self) -> ArgumentSchema;

    /// Execute the tool with validated arguments.
    async fn execute(&self, args: ToolArgs) -> String;

    /// Convert this tool into a ToolDefinition for the prompt.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            arguments: self.argument_schema().args().to_vec(),
        }
    }
}

/// A registry of available tools.
///
/// Populated once at startup, then shared read-only (`Arc<ToolRegistry>`)
/// by every agent loop in the process.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Fails if a tool with the same name exists.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::Duplicate(name));
        }
        self.order.push(name.clone());
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name.
    pub fn lookup(&self, name: &str) -> Result<&dyn Tool, ToolError> {
        self.tools
            .get(name)
            .map(|t| t.as_ref())
            .ok_or_else(|| ToolError::Unknown(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Validate arguments and execute the named tool.
    pub async fn invoke(&self, name: &str, arguments: &Map<String, Value>) -> Result<String, ToolError> {
        let tool = self.lookup(name)?;
        let args = tool.argument_schema().validate(name, arguments)?;
        Ok(tool.execute(args).await)
    }

    /// Tool definitions in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.order
            .iter()
            .filter_map(|n| self.tools.get(n))
            .map(|t| t.to_definition())
            .collect()
    }

    /// Registered tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Repeats `text` `times` times.
    struct RepeatTool;

    #[async_trait]
    impl Tool for RepeatTool {
        fn name(&self) -> &str {
            "repeat"
        }
        fn description(&self) -> &str {
            "Repeats a string"
        }
        fn argument_schema(&self) -> ArgumentSchema {
            ArgumentSchema::new()
                .arg("text", ArgType::String, "text to repeat")
                .arg("times", ArgType::Integer, "repeat count")
        }
        async fn execute(&self, args: ToolArgs) -> String {
            let text = args.string("text").unwrap_or_default();
            let times = args.integer("times").unwrap_or(1).max(0) as usize;
            text.repeat(times)
        }
    }

    fn as_map(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(RepeatTool)).unwrap();
        assert!(registry.lookup("repeat").is_ok());
        assert!(matches!(registry.lookup("nope"), Err(ToolError::Unknown(n)) if n == "nope"));
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(RepeatTool)).unwrap();
        let err = registry.register(Box::new(RepeatTool)).unwrap_err();
        assert_eq!(err, ToolError::Duplicate("repeat".into()));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn invoke_runs_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(RepeatTool)).unwrap();
        let out = registry
            .invoke("repeat", &as_map(json!({"text": "ab", "times": 3})))
            .await
            .unwrap();
        assert_eq!(out, "ababab");
    }

    #[tokio::test]
    async fn invoke_coerces_numeric_strings() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(RepeatTool)).unwrap();
        let out = registry
            .invoke("repeat", &as_map(json!({"text": "x", "times": "2"})))
            .await
            .unwrap();
        assert_eq!(out, "xx");
    }

    #[tokio::test]
    async fn missing_argument_names_field() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(RepeatTool)).unwrap();
        let err = registry
            .invoke("repeat", &as_map(json!({"text": "x"})))
            .await
            .unwrap_err();
        match err {
            ToolError::ArgumentValidation { field, .. } => assert_eq!(field, "times"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn mistyped_argument_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(RepeatTool)).unwrap();
        let err = registry
            .invoke("repeat", &as_map(json!({"text": "x", "times": 1.5})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ArgumentValidation { ref field, .. } if field == "times"));
    }

    #[tokio::test]
    async fn undeclared_argument_ignored() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(RepeatTool)).unwrap();
        let out = registry
            .invoke("repeat", &as_map(json!({"text": "x", "times": 2, "loud": true})))
            .await
            .unwrap();
        assert_eq!(out, "xx");

        let args = RepeatTool
            .argument_schema()
            .validate("repeat", &as_map(json!({"text": "x", "times": 2, "loud": true})))
            .unwrap();
        assert_eq!(args.len(), 2);
        assert!(args.get("loud").is_none());
    }

    #[tokio::test]
    async fn invoke_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.invoke("missing", &Map::new()).await.unwrap_err();
        assert_eq!(err, ToolError::Unknown("missing".into()));
    }

    #[test]
    fn coercion_rules() {
        assert_eq!(ArgType::Number.coerce(&json!(2)), Ok(ArgValue::Number(2.0)));
        assert_eq!(ArgType::Number.coerce(&json!("12.5")), Ok(ArgValue::Number(12.5)));
        assert!(ArgType::Number.coerce(&json!("twelve")).is_err());
        assert_eq!(ArgType::Integer.coerce(&json!(4.0)), Ok(ArgValue::Integer(4)));
        assert_eq!(ArgType::String.coerce(&json!(7)), Ok(ArgValue::String("7".into())));
        assert_eq!(ArgType::Boolean.coerce(&json!("true")), Ok(ArgValue::Boolean(true)));
        assert!(ArgType::Boolean.coerce(&json!(1)).is_err());
        assert!(ArgType::String.coerce(&json!(null)).is_err());
    }

    #[test]
    fn definitions_keep_registration_order() {
        struct Named(&'static str);

        #[async_trait]
        impl Tool for Named {
            fn name(&self) -> &str {
                self.0
            }
            fn description(&self) -> &str {
                "test"
            }
            fn argument_schema(&self) -> ArgumentSchema {
                ArgumentSchema::new()
            }
            async fn execute(&self, _args: ToolArgs) -> String {
                String::new()
            }
        }

        let mut registry = ToolRegistry::new();
        for n in ["zeta", "alpha", "mid"] {
            registry.register(Box::new(Named(n))).unwrap();
        }
        let names: Vec<_> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn signature_lists_arguments() {
        let def = RepeatTool.to_definition();
        assert_eq!(def.signature(), "repeat(text: string, times: integer): Repeats a string");
    }
}
