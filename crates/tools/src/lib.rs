//! Built-in tool implementations for Switchyard.
//!
//! The registry is built once at process start and shared read-only by
//! every agent loop.

pub mod calculator;

use switchyard_core::error::ToolError;
use switchyard_core::tool::ToolRegistry;

pub use calculator::CalculatorTool;

/// Create the default tool registry with all built-in tools.
pub fn default_registry() -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(calculator::CalculatorTool))?;
    Ok(registry)
}
