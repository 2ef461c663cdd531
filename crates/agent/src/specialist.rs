//! The invocation contract the router dispatches through.

use async_trait::async_trait;
use std::sync::Arc;
use switchyard_core::Result;

use crate::outcome::LoopOutcome;

/// Anything that can answer a query end to end.
///
/// Implementations own no per-query state: every `run` starts fresh, so a
/// single agent can serve concurrent queries.
#[async_trait]
pub trait Agent: Send + Sync {
    async fn run(&self, query: &str) -> Result<LoopOutcome>;
}

/// A named agent registered with the router.
#[derive(Clone)]
pub struct Specialist {
    /// Unique name the classifier reply is matched against.
    pub name: String,
    /// One-line capability summary shown in the routing prompt.
    pub description: String,
    pub agent: Arc<dyn Agent>,
}

impl Specialist {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        agent: Arc<dyn Agent>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            agent,
        }
    }
}

impl std::fmt::Debug for Specialist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Specialist")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
