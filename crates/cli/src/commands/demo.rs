//! `switchyard demo`: push the canned queries through the router.

use std::path::Path;
use std::process::ExitCode;

use switchyard_agent::team;

use super::ask::route_verbose;
use super::{CliResult, Runtime, report};

pub const DEMO_QUERIES: &[&str] = &[
    "What is a multi-agent system?",
    "What is 50 plus 50?",
    "Explain the ReAct framework.",
    "What is 250 multiplied by 12.5?",
    "If I have 5000 dollars and I spend 13.5% of it, how much is left?",
];

pub async fn run(config: Option<&Path>) -> CliResult<ExitCode> {
    let runtime = Runtime::build(config)?;
    let router = team::build_router(
        runtime.provider.clone(),
        runtime.tools.clone(),
        runtime.knowledge.clone(),
        &runtime.config,
    )?;

    let mut failures = 0usize;
    for (i, query) in DEMO_QUERIES.iter().enumerate() {
        println!();
        println!("  ── Query {} of {} ──", i + 1, DEMO_QUERIES.len());
        println!("  ❓ {query}");

        // A failed query does not abort the demo.
        match route_verbose(&router, query).await {
            Ok(outcome) => {
                report(&outcome);
                if !outcome.is_answered() {
                    failures += 1;
                }
            }
            Err(e) => {
                eprintln!("  [Error] {e}");
                failures += 1;
            }
        }
    }

    println!();
    if failures == 0 {
        println!("  🎉 All demo queries answered.");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("  ⚠️  {failures} of {} queries failed.", DEMO_QUERIES.len());
        Ok(ExitCode::FAILURE)
    }
}
