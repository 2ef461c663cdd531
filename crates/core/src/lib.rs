//! # Switchyard Core
//!
//! Domain types, traits, and error definitions for the Switchyard agent
//! runtime. This crate has **zero framework dependencies**: it defines
//! the domain model that all other crates implement against.
//!
//! - [`provider::Provider`]: the model-inference boundary
//! - [`tool::ToolRegistry`]: the closed, validated set of agent tools
//! - [`message::ConversationState`]: the append-only prompt history
//! - [`retrieval::Retriever`]: the knowledge-retrieval boundary

pub mod error;
pub mod message;
pub mod provider;
pub mod retrieval;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result, RetrievalError, ToolError};
pub use message::{ConversationState, Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use retrieval::Retriever;
pub use tool::{ArgSpec, ArgType, ArgValue, ArgumentSchema, Tool, ToolArgs, ToolDefinition, ToolRegistry};
