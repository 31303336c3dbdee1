//! HTTP helpers shared by the providers

use std::time::Duration;

use agent_core::AgentError;
use reqwest::{Client, StatusCode};

/// Build a client with the configured request timeout
pub fn client(timeout_secs: u64) -> Result<Client, AgentError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| AgentError::Config(format!("Failed to build HTTP client: {e}")))
}

/// Map a transport-level failure
pub fn transport_error(provider: &str, err: &reqwest::Error) -> AgentError {
    if err.is_timeout() || err.is_connect() {
        AgentError::ProviderUnavailable(format!("{provider}: {err}"))
    } else if err.is_decode() {
        AgentError::Parse(format!("{provider} response: {err}"))
    } else {
        AgentError::Provider(format!("{provider}: {err}"))
    }
}

/// Map a non-success HTTP status and its body
pub fn status_error(provider: &str, status: StatusCode, body: &str) -> AgentError {
    let detail = error_detail(body);
    let msg = format!("{provider} returned {status}: {detail}");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AgentError::Auth(msg),
        StatusCode::TOO_MANY_REQUESTS => AgentError::RateLimited(msg),
        s if s.is_server_error() => AgentError::ProviderUnavailable(msg),
        _ => AgentError::Provider(msg),
    }
}

/// Pull `error.message` (OpenAI) or `error` (Ollama) out of an error body
fn error_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    value
        .pointer("/error/message")
        .or_else(|| value.get("error"))
        .and_then(serde_json::Value::as_str)
        .map_or_else(|| body.trim().to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error("OpenAI", StatusCode::UNAUTHORIZED, ""),
            AgentError::Auth(_)
        ));
        assert!(matches!(
            status_error("OpenAI", StatusCode::TOO_MANY_REQUESTS, ""),
            AgentError::RateLimited(_)
        ));
        assert!(matches!(
            status_error("Ollama", StatusCode::BAD_GATEWAY, ""),
            AgentError::ProviderUnavailable(_)
        ));
        assert!(matches!(
            status_error("Ollama", StatusCode::BAD_REQUEST, ""),
            AgentError::Provider(_)
        ));
    }

    #[test]
    fn test_error_detail_extraction() {
        let openai = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(error_detail(openai), "Incorrect API key provided");

        let ollama = r#"{"error": "model 'nope' not found"}"#;
        assert_eq!(error_detail(ollama), "model 'nope' not found");

        assert_eq!(error_detail("plain text\n"), "plain text");
    }
}
