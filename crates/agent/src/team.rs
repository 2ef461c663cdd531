//! The standard specialist line-up: MathAgent and ResearchAgent.

use std::sync::Arc;
use switchyard_config::AppConfig;
use switchyard_core::Result;
use switchyard_core::provider::Provider;
use switchyard_core::retrieval::Retriever;
use switchyard_core::tool::ToolRegistry;

use crate::patterns::{RagAgent, ReactAgent, Router};

pub const MATH_AGENT: &str = "MathAgent";
pub const RESEARCH_AGENT: &str = "ResearchAgent";

pub const MATH_DESCRIPTION: &str =
    "Best for any questions involving numbers, calculations, or mathematical reasoning.";
pub const RESEARCH_DESCRIPTION: &str =
    "Best for questions about AI concepts, definitions, and history from a knowledge base.";

const MATH_PERSONA: &str =
    "You are MathAgent, an assistant that solves arithmetic problems using tools.";

/// The ReAct specialist, configured from `[agent]`.
pub fn math_agent(provider: Arc<dyn Provider>, tools: Arc<ToolRegistry>, config: &AppConfig) -> ReactAgent {
    ReactAgent::from_config(provider, tools, config).with_persona(MATH_PERSONA)
}

/// The retrieval specialist, configured from `[knowledge]`.
pub fn research_agent(
    provider: Arc<dyn Provider>,
    retriever: Arc<dyn Retriever>,
    config: &AppConfig,
) -> RagAgent {
    RagAgent::from_config(provider, retriever, config)
}

/// A router with MathAgent and ResearchAgent registered, in that order.
pub fn build_router(
    provider: Arc<dyn Provider>,
    tools: Arc<ToolRegistry>,
    retriever: Arc<dyn Retriever>,
    config: &AppConfig,
) -> Result<Router> {
    let math = math_agent(provider.clone(), tools, config);
    let research = research_agent(provider.clone(), retriever, config);

    Router::from_config(provider, config)
        .add_specialist(MATH_AGENT, MATH_DESCRIPTION, Arc::new(math))?
        .add_specialist(RESEARCH_AGENT, RESEARCH_DESCRIPTION, Arc::new(research))
}
