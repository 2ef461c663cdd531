//! Error types for the Switchyard domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Switchyard operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Inference errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool registry errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Retrieval errors ---
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    // --- Routing errors ---
    #[error("Specialist already registered: {0}")]
    DuplicateSpecialist(String),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of the model-inference boundary.
///
/// These are never retried inside the agent loop; they propagate to the
/// caller as-is.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(String),
}

/// Tool registry contract violations.
///
/// Business failures inside a tool (division by zero, unknown operation)
/// are NOT represented here; tools return those as observation text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    #[error("Tool already registered: {0}")]
    Duplicate(String),

    #[error("Tool not found: {0}")]
    Unknown(String),

    #[error("Invalid argument '{field}' for tool '{tool_name}': {reason}")]
    ArgumentValidation {
        tool_name: String,
        field: String,
        reason: String,
    },

    #[error("Tool timed out: {tool_name} after {timeout_secs}s")]
    Timeout { tool_name: String, timeout_secs: u64 },
}

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Knowledge base unavailable at {path}: {reason}")]
    Unavailable { path: String, reason: String },

    #[error("Retrieval query failed: {0}")]
    QueryFailed(String),
}
