//! Subcommand handlers and the runtime they share.

pub mod agent;
pub mod ask;
pub mod demo;
pub mod doctor;
pub mod onboard;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use switchyard_agent::{LoopOutcome, LoopStatus};
use switchyard_config::AppConfig;
use switchyard_core::provider::Provider;
use switchyard_core::tool::ToolRegistry;
use switchyard_knowledge::{KnowledgeFile, TextSplitter};

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Where the config lives: `--config`, or `~/.switchyard/config.toml`.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"))
}

/// Directory holding the config file; relative knowledge paths resolve here.
pub fn config_home(explicit: Option<&Path>) -> PathBuf {
    config_path(explicit)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::config_dir)
}

pub fn load_config(explicit: Option<&Path>) -> CliResult<AppConfig> {
    let path = config_path(explicit);
    AppConfig::load_with_env(&path).map_err(|e| format!("Failed to load config: {e}").into())
}

/// Resolve the knowledge base path: absolute, else relative to the
/// working directory, else relative to the config directory.
pub fn knowledge_path(config: &AppConfig, explicit_config: Option<&Path>) -> PathBuf {
    let path = &config.knowledge.path;
    if path.is_absolute() || path.exists() {
        return path.clone();
    }
    config_home(explicit_config).join(path)
}

/// Fail early, with setup instructions, when no API key is configured.
pub fn require_api_key(config: &AppConfig, config_file: &Path) -> CliResult<()> {
    if config.has_api_key() {
        return Ok(());
    }

    eprintln!();
    eprintln!("  ERROR: No API key configured!");
    eprintln!();
    eprintln!("  Set one of these environment variables:");
    eprintln!("    SWITCHYARD_API_KEY = '...'   (generic)");
    eprintln!("    GEMINI_API_KEY     = '...'   (Google AI Studio)");
    eprintln!("    OPENAI_API_KEY     = 'sk-...' (OpenAI)");
    eprintln!();
    eprintln!("  Or add it to your config file:");
    eprintln!("    {}", config_file.display());
    eprintln!();
    Err("No API key found. See above for setup instructions.".into())
}

/// Everything a query needs, built once per process.
///
/// The knowledge base is read on the first research query, not here.
pub struct Runtime {
    pub config: AppConfig,
    pub provider: Arc<dyn Provider>,
    pub tools: Arc<ToolRegistry>,
    pub knowledge: Arc<KnowledgeFile>,
}

impl Runtime {
    pub fn build(explicit_config: Option<&Path>) -> CliResult<Self> {
        let config = load_config(explicit_config)?;
        Self::from_config(config, explicit_config)
    }

    pub fn from_config(config: AppConfig, explicit_config: Option<&Path>) -> CliResult<Self> {
        require_api_key(&config, &config_path(explicit_config))?;

        let provider = switchyard_providers::build_from_config(&config)?;
        let tools = Arc::new(switchyard_tools::default_registry()?);

        let splitter = TextSplitter::new(config.knowledge.chunk_size, config.knowledge.chunk_overlap);
        let knowledge = Arc::new(KnowledgeFile::new(
            knowledge_path(&config, explicit_config),
            splitter,
            config.knowledge.top_k,
        ));

        tracing::debug!(
            model = %config.model,
            knowledge = %knowledge.path().display(),
            "Runtime ready"
        );

        Ok(Self {
            config,
            provider,
            tools,
            knowledge,
        })
    }
}

/// Print an outcome and map its status to the process exit code.
pub fn report(outcome: &LoopOutcome) -> ExitCode {
    match outcome.status {
        LoopStatus::Answered => {
            println!("{}", outcome.text.as_deref().unwrap_or_default());
            ExitCode::SUCCESS
        }
        LoopStatus::TurnLimitExceeded => {
            eprintln!("  ⚠️  No answer after {} turns.", outcome.turns);
            ExitCode::FAILURE
        }
        LoopStatus::ToolExecutionFailed | LoopStatus::Unresolved => {
            eprintln!(
                "  ❌ {}: {}",
                outcome.status,
                outcome.text.as_deref().unwrap_or_default()
            );
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_core::error::RetrievalError;
    use switchyard_core::retrieval::Retriever;

    #[test]
    fn explicit_config_sets_home() {
        let home = config_home(Some(Path::new("/etc/switchyard/config.toml")));
        assert_eq!(home, PathBuf::from("/etc/switchyard"));
    }

    #[test]
    fn absolute_knowledge_path_is_kept() {
        let mut config = AppConfig::default();
        config.knowledge.path = PathBuf::from("/data/kb.txt");
        assert_eq!(knowledge_path(&config, None), PathBuf::from("/data/kb.txt"));
    }

    #[test]
    fn relative_knowledge_path_resolves_under_config_home() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.knowledge.path = PathBuf::from("does-not-exist-here.txt");
        let explicit = dir.path().join("config.toml");
        assert_eq!(
            knowledge_path(&config, Some(&explicit)),
            dir.path().join("does-not-exist-here.txt")
        );
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let config = AppConfig {
            api_key: None,
            ..AppConfig::default()
        };
        assert!(require_api_key(&config, Path::new("config.toml")).is_err());
        assert!(Runtime::from_config(config, None).is_err());
    }

    #[tokio::test]
    async fn missing_knowledge_base_leaves_math_path_usable() {
        let mut config = AppConfig {
            api_key: Some("k".into()),
            ..AppConfig::default()
        };
        config.knowledge.path = PathBuf::from("/nonexistent/kb.txt");

        let runtime = Runtime::from_config(config, None).unwrap();
        assert!(runtime.tools.lookup("calculator").is_ok());

        let err = runtime.knowledge.retrieve("anything").await.unwrap_err();
        assert!(matches!(err, RetrievalError::Unavailable { .. }));
    }
}
