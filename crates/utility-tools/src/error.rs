//! Error Types for Utility Tools

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ToolError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ToolError {
    #[error("No weather data for city: {0}")]
    UnknownCity(String),

    #[error("Could not find stock information for ticker: {0}")]
    UnknownTicker(String),

    #[error("Empty {0} argument")]
    EmptyArgument(&'static str),
}
