//! `switchyard doctor`: diagnose configuration health.

use std::path::Path;
use std::process::ExitCode;

use switchyard_core::provider::Provider;
use switchyard_knowledge::{KnowledgeBase, TextSplitter};

use super::{CliResult, config_path, knowledge_path, load_config};

pub async fn run(explicit_config: Option<&Path>) -> CliResult<ExitCode> {
    println!("🩺 Switchyard Doctor — System Diagnostics");
    println!("========================================\n");

    let mut issues = 0;

    let config_path = config_path(explicit_config);
    if config_path.exists() {
        println!("  ✅ Config file found: {}", config_path.display());
    } else {
        println!("  ⚠️  No config file — using defaults (run `switchyard onboard`)");
    }

    match load_config(explicit_config) {
        Ok(config) => {
            println!("  ✅ Config valid");
            println!("     Model:    {}", config.model);
            println!("     Endpoint: {}", config.base_url);
            println!("     Routing:  {:?} match", config.router.match_policy);

            // Check API key
            if config.has_api_key() {
                println!("  ✅ API key configured");

                // Check endpoint
                match switchyard_providers::build_from_config(&config) {
                    Ok(provider) => match provider.health_check().await {
                        Ok(true) => println!("  ✅ Endpoint reachable ({})", provider.name()),
                        Ok(false) => {
                            println!("  ⚠️  Endpoint rejected the health check ({})", provider.name());
                            issues += 1;
                        }
                        Err(e) => {
                            println!("  ❌ Endpoint unreachable: {e}");
                            issues += 1;
                        }
                    },
                    Err(e) => {
                        println!("  ❌ {e}");
                        issues += 1;
                    }
                }
            } else {
                println!("  ❌ No API key — set GEMINI_API_KEY or add api_key to config.toml");
                issues += 1;
            }

            // Check knowledge base
            let path = knowledge_path(&config, explicit_config);
            let splitter = TextSplitter::new(config.knowledge.chunk_size, config.knowledge.chunk_overlap);
            match KnowledgeBase::load(&path, &splitter, config.knowledge.top_k) {
                Ok(kb) if kb.chunk_count() > 0 => {
                    println!("  ✅ Knowledge base: {} ({} chunks)", path.display(), kb.chunk_count());
                }
                Ok(_) => {
                    println!("  ⚠️  Knowledge base is empty: {}", path.display());
                    issues += 1;
                }
                Err(e) => {
                    println!("  ❌ {e}");
                    issues += 1;
                }
            }
        }
        Err(e) => {
            println!("  ❌ {e}");
            issues += 1;
        }
    }

    match switchyard_tools::default_registry() {
        Ok(tools) => println!("  ✅ Tools: {}", tools.names().join(", ")),
        Err(e) => {
            println!("  ❌ Tool registry: {e}");
            issues += 1;
        }
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
        Ok(ExitCode::FAILURE)
    }
}
