//! Calculator tool: one arithmetic operation on two numbers.
//!
//! Business failures (division by zero, unknown operation) are returned
//! as observation text, never as errors, so the model can read them and
//! recover on its next turn.

use async_trait::async_trait;
use switchyard_core::tool::{ArgType, ArgumentSchema, Tool, ToolArgs};
use tracing::info;

pub const DIVIDE_BY_ZERO: &str = "Error: Cannot divide by zero.";
pub const INVALID_OPERATION: &str = "Error: Invalid operation.";

pub struct CalculatorTool;

/// The four supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl std::str::FromStr for Operation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "divide" => Ok(Operation::Divide),
            _ => Err(()),
        }
    }
}

/// Apply `op` to `a` and `b`, producing the observation text.
pub fn calculate(a: f64, b: f64, op: Operation) -> String {
    let value = match op {
        Operation::Add => a + b,
        Operation::Subtract => a - b,
        Operation::Multiply => a * b,
        Operation::Divide => {
            if b == 0.0 {
                return DIVIDE_BY_ZERO.to_string();
            }
            a / b
        }
    };
    format_number(value)
}

/// Format nicely: remove trailing .0 for integers.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Performs a calculation on two numbers. Available operations are: 'add', 'subtract', 'multiply', 'divide'."
    }

    fn argument_schema(&self) -> ArgumentSchema {
        ArgumentSchema::new()
            .arg("a", ArgType::Number, "first operand")
            .arg("b", ArgType::Number, "second operand")
            .arg("operation", ArgType::String, "one of add, subtract, multiply, divide")
    }

    async fn execute(&self, args: ToolArgs) -> String {
        // Schema validation guarantees presence and type.
        let a = args.number("a").unwrap_or_default();
        let b = args.number("b").unwrap_or_default();
        let operation = args.string("operation").unwrap_or_default();

        info!(a, b, operation, "Calculator invoked");

        match operation.parse::<Operation>() {
            Ok(op) => calculate(a, b, op),
            Err(()) => INVALID_OPERATION.to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use switchyard_core::tool::ToolRegistry;

    fn args(v: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        v.as_object().cloned().unwrap()
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(CalculatorTool)).unwrap();
        registry
    }

    #[test]
    fn simple_addition() {
        assert_eq!(calculate(2.0, 3.0, Operation::Add), "5");
    }

    #[test]
    fn multiplication_with_decimals() {
        assert_eq!(calculate(250.0, 12.5, Operation::Multiply), "3125");
        assert_eq!(calculate(1.5, 3.0, Operation::Multiply), "4.5");
    }

    #[test]
    fn subtraction_goes_negative() {
        assert_eq!(calculate(3.0, 5.0, Operation::Subtract), "-2");
    }

    #[test]
    fn division() {
        assert_eq!(calculate(10.0, 4.0, Operation::Divide), "2.5");
    }

    #[test]
    fn division_by_zero_is_text() {
        assert_eq!(calculate(1.0, 0.0, Operation::Divide), DIVIDE_BY_ZERO);
    }

    #[test]
    fn operation_parsing_is_case_insensitive() {
        assert_eq!("Multiply".parse::<Operation>(), Ok(Operation::Multiply));
        assert!("modulo".parse::<Operation>().is_err());
    }

    #[tokio::test]
    async fn tool_execute_through_registry() {
        let out = registry()
            .invoke("calculator", &args(json!({"a": 2, "b": 3, "operation": "add"})))
            .await
            .unwrap();
        assert_eq!(out, "5");
    }

    #[tokio::test]
    async fn invalid_operation_is_text() {
        let out = registry()
            .invoke("calculator", &args(json!({"a": 2, "b": 3, "operation": "power"})))
            .await
            .unwrap();
        assert_eq!(out, INVALID_OPERATION);
    }

    #[tokio::test]
    async fn divide_by_zero_through_registry() {
        let out = registry()
            .invoke("calculator", &args(json!({"a": 7, "b": 0, "operation": "divide"})))
            .await
            .unwrap();
        assert_eq!(out, "Error: Cannot divide by zero.");
    }

    #[tokio::test]
    async fn missing_operand_fails_validation() {
        let err = registry()
            .invoke("calculator", &args(json!({"a": 7, "operation": "divide"})))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("'b'"));
    }
}
