//! # agent-runtime
//!
//! Hosted LLM providers for the utility agent.
//!
//! ## Providers
//!
//! - **OpenAI** (default): Chat Completions API with native function calling
//! - **Ollama**: local inference via the native `/api/chat` endpoint
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::ProviderConfig;
//!
//! let provider = ProviderConfig::from_lookup(|key| std::env::var(key).ok())?.into_provider()?;
//! let agent = AgentBuilder::new().provider(provider).build()?;
//! ```

use std::sync::Arc;

mod http;

#[cfg(feature = "ollama")]
pub mod ollama;
#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};
#[cfg(feature = "openai")]
pub use openai::{OpenAiConfig, OpenAiProvider};

// Re-export core types for convenience
pub use agent_core::{Agent, AgentError, AgentRuntime, LlmProvider, Result, ToolRegistry};

/// Which hosted provider to talk to, with its settings
#[derive(Clone, Debug)]
pub enum ProviderConfig {
    #[cfg(feature = "openai")]
    OpenAi(OpenAiConfig),
    #[cfg(feature = "ollama")]
    Ollama(OllamaConfig),
}

impl ProviderConfig {
    /// Select a provider from `AGENT_PROVIDER` (default `openai`) and read its settings
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let kind = lookup("AGENT_PROVIDER")
            .map(|k| k.trim().to_ascii_lowercase())
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| "openai".into());

        match kind.as_str() {
            #[cfg(feature = "openai")]
            "openai" => Ok(Self::OpenAi(OpenAiConfig::from_lookup(lookup)?)),
            #[cfg(feature = "ollama")]
            "ollama" => Ok(Self::Ollama(OllamaConfig::from_lookup(lookup))),
            other => Err(AgentError::Config(format!(
                "Unsupported AGENT_PROVIDER '{other}'"
            ))),
        }
    }

    /// Provider display name
    pub const fn name(&self) -> &'static str {
        match self {
            #[cfg(feature = "openai")]
            Self::OpenAi(_) => "OpenAI",
            #[cfg(feature = "ollama")]
            Self::Ollama(_) => "Ollama",
        }
    }

    /// Model used when none is configured
    pub const fn default_model(&self) -> &'static str {
        match self {
            #[cfg(feature = "openai")]
            Self::OpenAi(_) => "gpt-3.5-turbo",
            #[cfg(feature = "ollama")]
            Self::Ollama(_) => "llama3.2",
        }
    }

    /// Override the per-request HTTP timeout
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        match &mut self {
            #[cfg(feature = "openai")]
            Self::OpenAi(config) => config.timeout_secs = secs,
            #[cfg(feature = "ollama")]
            Self::Ollama(config) => config.timeout_secs = secs,
        }
        self
    }

    /// Construct the provider
    pub fn into_provider(self) -> Result<Arc<dyn LlmProvider>> {
        match self {
            #[cfg(feature = "openai")]
            Self::OpenAi(config) => Ok(Arc::new(OpenAiProvider::from_config(config)?)),
            #[cfg(feature = "ollama")]
            Self::Ollama(config) => Ok(Arc::new(OllamaProvider::from_config(config)?)),
        }
    }
}

#[cfg(all(test, feature = "openai", feature = "ollama"))]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_openai() {
        let config = ProviderConfig::from_lookup(|key: &str| {
            (key == "OPENAI_API_KEY").then(|| "sk-test".to_string())
        })
        .unwrap();
        assert!(matches!(config, ProviderConfig::OpenAi(_)));
        assert_eq!(config.default_model(), "gpt-3.5-turbo");
    }

    #[test]
    fn test_openai_without_key_is_config_error() {
        let err = ProviderConfig::from_lookup(|_: &str| None).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let config = ProviderConfig::from_lookup(|key: &str| {
            (key == "AGENT_PROVIDER").then(|| "Ollama".to_string())
        })
        .unwrap()
        .with_timeout_secs(5);
        match config {
            ProviderConfig::Ollama(ref c) => assert_eq!(c.timeout_secs, 5),
            ProviderConfig::OpenAi(_) => panic!("expected Ollama"),
        }
        assert_eq!(config.name(), "Ollama");
    }

    #[test]
    fn test_unknown_provider() {
        let err = ProviderConfig::from_lookup(|key: &str| {
            (key == "AGENT_PROVIDER").then(|| "anthropic".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("anthropic"));
    }
}
