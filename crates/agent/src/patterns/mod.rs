//! Agent patterns: structured reasoning strategies.
//!
//! 1. **ReAct**: Thought, Action, Observation loop over a tool registry
//! 2. **RAG**: one answer grounded in retrieved context
//! 3. **Router**: classify a query, then delegate it to a specialist

pub mod rag;
pub mod react;
pub mod router;

pub use rag::RagAgent;
pub use react::ReactAgent;
pub use router::{Router, RoutingDecision};

#[cfg(test)]
pub(crate) mod test_helpers;
