//! Application Configuration
//!
//! Built once at startup from the environment and passed down explicitly.

use std::time::Duration;

use agent_core::{AgentError, Result};
use agent_runtime::ProviderConfig;

/// Everything the chat loop needs to get going
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Hosted provider and its credentials
    pub provider: ProviderConfig,

    /// Model identifier passed to the provider
    pub model: String,

    /// Upper bound on a single agent turn
    pub timeout: Duration,

    /// Reasoning iterations allowed per turn
    pub max_iterations: usize,
}

impl AppConfig {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    pub const DEFAULT_MAX_ITERATIONS: usize = 10;

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout_secs =
            parse_positive(&lookup, "AGENT_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS)?;
        let max_iterations = parse_positive(
            &lookup,
            "AGENT_MAX_ITERATIONS",
            Self::DEFAULT_MAX_ITERATIONS as u64,
        )?;

        let provider = ProviderConfig::from_lookup(&lookup)?.with_timeout_secs(timeout_secs);
        let model = lookup("AGENT_MODEL")
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| provider.default_model().to_string());

        Ok(Self {
            provider,
            model,
            timeout: Duration::from_secs(timeout_secs),
            max_iterations: usize::try_from(max_iterations)
                .map_err(|_| AgentError::Config("AGENT_MAX_ITERATIONS is too large".into()))?,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<u64> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(AgentError::Config(format!(
            "{key} must be a positive integer, got '{raw}'"
        ))),
    }
}
