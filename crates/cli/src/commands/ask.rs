//! `switchyard ask`: route one query to the best specialist.

use std::path::Path;
use std::process::ExitCode;

use switchyard_agent::{LoopOutcome, Router, RoutingDecision, team};

use super::{CliResult, Runtime, report};

pub async fn run(config: Option<&Path>, query: &str) -> CliResult<ExitCode> {
    let runtime = Runtime::build(config)?;
    let router = team::build_router(
        runtime.provider.clone(),
        runtime.tools.clone(),
        runtime.knowledge.clone(),
        &runtime.config,
    )?;

    let outcome = route_verbose(&router, query).await?;
    Ok(report(&outcome))
}

/// Classify and dispatch, printing the routing decision in between.
pub async fn route_verbose(router: &Router, query: &str) -> CliResult<LoopOutcome> {
    let decision = router.classify(query).await?;
    match &decision {
        RoutingDecision::Chosen(name) => println!("  🔀 Delegating to {name}"),
        RoutingDecision::Unresolved => println!("  🔀 No specialist matched"),
    }
    Ok(router.dispatch(&decision, query).await?)
}
