//! LLM provider implementations for Switchyard.
//!
//! All providers implement the `switchyard_core::Provider` trait.
//! [`build_from_config`] constructs the process-wide inference client.

pub mod openai_compat;

use std::sync::Arc;
use std::time::Duration;

use switchyard_config::AppConfig;
use switchyard_core::error::ProviderError;
use switchyard_core::provider::Provider;

pub use openai_compat::OpenAiCompatProvider;

/// Build the inference client described by the configuration.
///
/// Called once at startup; the returned handle is shared by the router
/// and every specialist for the lifetime of the process.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let api_key = config
        .api_key
        .clone()
        .ok_or_else(|| ProviderError::NotConfigured("no API key configured".into()))?;

    let provider = OpenAiCompatProvider::new(
        provider_name(&config.base_url),
        &config.base_url,
        api_key,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    tracing::debug!(provider = provider.name(), base_url = %config.base_url, "Inference client ready");
    let provider: Arc<dyn Provider> = Arc::new(provider);
    Ok(provider)
}

/// Derive a short provider name from an endpoint URL.
fn provider_name(base_url: &str) -> &'static str {
    if base_url.contains("generativelanguage.googleapis.com") {
        "gemini"
    } else if base_url.contains("api.openai.com") {
        "openai"
    } else if base_url.contains("openrouter.ai") {
        "openrouter"
    } else if base_url.contains("localhost:11434") {
        "ollama"
    } else {
        "custom"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_api_key() {
        let config = AppConfig::default();
        assert!(matches!(
            build_from_config(&config),
            Err(ProviderError::NotConfigured(_))
        ));
    }

    #[test]
    fn build_with_key() {
        let config = AppConfig {
            api_key: Some("test-key".into()),
            ..AppConfig::default()
        };
        let provider = build_from_config(&config).unwrap();
        assert_eq!(provider.name(), "gemini");
    }

    #[test]
    fn provider_names() {
        assert_eq!(provider_name("https://api.openai.com/v1"), "openai");
        assert_eq!(provider_name("http://localhost:11434/v1"), "ollama");
        assert_eq!(provider_name("http://10.0.0.2:8000/v1"), "custom");
    }
}
