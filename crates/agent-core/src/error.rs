//! Error Types

use thiserror::Error;

use crate::reasoning::{ERROR_RESPONSE, TIMEOUT_RESPONSE};

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Tool not found in registry
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool validation failed
    #[error("Tool validation error: {0}")]
    ToolValidation(String),

    /// Tool execution failed
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// Maximum iterations reached in reasoning loop
    #[error("Maximum iterations ({0}) reached")]
    MaxIterations(usize),

    /// Runtime call did not finish in time
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Parse error (e.g., tool call parsing)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error (missing credential, bad setting)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limited
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Whether the error is fatal at startup rather than per request
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider(msg) => format!("The AI service encountered an error: {msg}"),
            Self::ProviderUnavailable(_) => "The AI service is currently unavailable.".into(),
            Self::ToolNotFound(name) => format!("The tool '{name}' is not available."),
            Self::ToolValidation(msg) => format!("Invalid tool input: {msg}"),
            Self::ToolExecution(msg) => format!("Tool error: {msg}"),
            Self::MaxIterations(_) => {
                "The request took too long to process. Please try a simpler query.".into()
            }
            Self::Timeout(secs) => format!("Request timed out after {secs} seconds"),
            Self::RateLimited(_) => "You've made too many requests. Please wait a moment.".into(),
            Self::Auth(_) => "Authentication failed. Please check your API key.".into(),
            Self::Config(msg) => format!("Configuration error: {msg}"),
            _ => "An unexpected error occurred.".into(),
        }
    }

    /// User message plus the underlying detail when the message hides it
    pub fn report(&self) -> String {
        match self {
            Self::Provider(_)
            | Self::ToolNotFound(_)
            | Self::ToolValidation(_)
            | Self::ToolExecution(_)
            | Self::Timeout(_)
            | Self::Config(_) => self.user_message(),
            _ => format!("{} ({self})", self.user_message()),
        }
    }

    /// Reply to show in place of an answer when the model itself could not
    /// finish the turn. Transport and credential failures have none.
    pub const fn fallback_reply(&self) -> Option<&'static str> {
        match self {
            Self::Timeout(_) => Some(TIMEOUT_RESPONSE),
            Self::Provider(_)
            | Self::MaxIterations(_)
            | Self::Parse(_)
            | Self::ToolNotFound(_)
            | Self::ToolValidation(_)
            | Self::ToolExecution(_) => Some(ERROR_RESPONSE),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for AgentError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
