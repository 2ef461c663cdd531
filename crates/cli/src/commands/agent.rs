//! `switchyard agent`: run one specialist directly, bypassing the router.

use std::path::Path;
use std::process::ExitCode;

use clap::ValueEnum;
use switchyard_agent::team;

use super::{CliResult, Runtime, report};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SpecialistKind {
    /// The ReAct calculator agent
    Math,
    /// The knowledge-base research agent
    Research,
}

pub async fn run(config: Option<&Path>, kind: SpecialistKind, query: &str) -> CliResult<ExitCode> {
    let runtime = Runtime::build(config)?;

    let outcome = match kind {
        SpecialistKind::Math => {
            println!("  🧮 {}", team::MATH_AGENT);
            team::math_agent(runtime.provider.clone(), runtime.tools.clone(), &runtime.config)
                .run(query)
                .await?
        }
        SpecialistKind::Research => {
            println!("  📚 {}", team::RESEARCH_AGENT);
            team::research_agent(runtime.provider.clone(), runtime.knowledge.clone(), &runtime.config)
                .run(query)
                .await?
        }
    };

    Ok(report(&outcome))
}
