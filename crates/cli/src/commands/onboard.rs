//! `switchyard onboard`: first-time setup.

use std::path::Path;
use std::process::ExitCode;

use switchyard_config::AppConfig;

use super::{CliResult, config_home, config_path};

pub const STARTER_KNOWLEDGE: &str = "\
The ReAct framework combines reasoning and acting in language models. Instead of answering in \
one step, the model alternates between a thought about what to do next, an action such as \
calling a tool, and an observation of the tool's result. The loop repeats until the model has \
enough information to give a final answer.

A multi-agent system is a group of specialized agents that cooperate on a task. A common design \
puts a router, sometimes called a dispatcher, in front of the specialists. The router reads each \
query, decides which specialist is best suited, and hands the query over. Each specialist stays \
small and focused on one kind of problem.

Retrieval-augmented generation, or RAG, grounds a model's answers in documents. A knowledge base \
is split into chunks, the chunks most relevant to a question are retrieved, and the model is asked \
to answer using only that retrieved context.

Large language models are neural networks trained on large amounts of text to predict the next \
token. The transformer architecture, introduced in 2017, made it practical to train such models \
at scale, and instruction-tuned chat models followed in the early 2020s.
";

pub async fn run(explicit_config: Option<&Path>) -> CliResult<ExitCode> {
    let config_path = config_path(explicit_config);
    let config_dir = config_home(explicit_config);

    println!("🚉 Switchyard — First-Time Setup");
    println!("================================\n");

    // Create directories
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    // Starter knowledge base for the research agent
    let knowledge_path = config_dir.join(&AppConfig::default().knowledge.path);
    if knowledge_path.exists() {
        println!("  Knowledge base exists: {}", knowledge_path.display());
    } else {
        std::fs::write(&knowledge_path, STARTER_KNOWLEDGE)?;
        println!("✅ Created knowledge base: {}", knowledge_path.display());
    }

    // Create config file
    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Add your API key to {} or set GEMINI_API_KEY", config_path.display());
        println!("   2. Run: switchyard doctor");
        println!("   3. Run: switchyard ask \"What is 50 plus 50?\"\n");
    }

    println!("🎉 Setup complete!\n");

    Ok(ExitCode::SUCCESS)
}
