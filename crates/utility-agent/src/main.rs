//! Utility Agent
//!
//! Command-line chat loop that answers weather and stock price questions
//! through a hosted LLM with function calling.

mod chat;
mod config;

use agent_core::{AgentBuilder, AgentError};
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::chat::{ChatLoop, write_banner};
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the transcript
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        provider = config.provider.name(),
        model = %config.model,
        timeout_secs = config.timeout.as_secs(),
        "Configuration loaded"
    );

    let provider = config.provider.clone().into_provider()?;

    // A rejected credential is fatal; an unreachable service is not
    match provider.health_check().await {
        Ok(true) => tracing::info!("Connected to {}", config.provider.name()),
        Ok(false) => tracing::warn!(
            "{} not reachable - requests will fail until it is",
            config.provider.name()
        ),
        Err(e @ AgentError::Auth(_)) => {
            return Err(AgentError::Config(format!("invalid API key: {e}")).into());
        }
        Err(e) => tracing::warn!(error = %e, "Health check failed"),
    }

    let tools = utility_tools::default_registry();
    tracing::info!("Registered {} tools: {}", tools.len(), tools.names().join(", "));

    let agent = AgentBuilder::new()
        .provider(provider)
        .system_prompt(utility_tools::UTILITY_AGENT_PROMPT)
        .model(&config.model)
        .max_iterations(config.max_iterations)
        .build()?;

    let mut stdout = tokio::io::stdout();
    write_banner(&mut stdout).await?;

    let chat = ChatLoop::new(&agent, &tools, config.timeout);
    chat.run(BufReader::new(tokio::io::stdin()), &mut stdout).await?;

    Ok(())
}
