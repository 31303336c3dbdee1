//! Ollama LLM Provider
//!
//! Implementation of `LlmProvider` for Ollama's native `/api/chat` endpoint,
//! which accepts tool definitions and returns tool calls with object arguments.

use std::collections::HashMap;

use agent_core::{
    error::{AgentError, Result},
    message::{Message, Role},
    provider::{
        Completion, FinishReason, GenerationOptions, LlmProvider, ModelInfo, TokenUsage,
    },
    tool::{ToolCall, ToolSchema},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::http;

const PROVIDER: &str = "Ollama";

/// Ollama provider configuration
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    /// Ollama host URL
    pub host: String,

    /// Ollama port
    pub port: u16,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".into(),
            port: 11434,
            timeout_secs: 120,
        }
    }
}

impl OllamaConfig {
    /// Read `OLLAMA_HOST` and `OLLAMA_PORT` through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let host = lookup("OLLAMA_HOST")
            .map(|h| h.trim().trim_end_matches('/').to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("OLLAMA_PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);

        Self {
            host,
            port,
            ..defaults
        }
    }

    fn base_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Ollama LLM provider
pub struct OllamaProvider {
    client: Client,
    config: OllamaConfig,
}

impl OllamaProvider {
    /// Create from configuration
    pub fn from_config(config: OllamaConfig) -> Result<Self> {
        Ok(Self {
            client: http::client(config.timeout_secs)?,
            config,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url(), path)
    }

    /// Convert agent messages to Ollama format
    fn convert_messages(messages: &[Message]) -> Vec<OllamaMessage> {
        messages
            .iter()
            .map(|m| OllamaMessage {
                role: m.role.as_str().to_string(),
                content: m.content.clone(),
                tool_calls: m
                    .tool_calls
                    .iter()
                    .map(|c| OllamaToolCall {
                        function: OllamaFunction {
                            name: c.name.clone(),
                            arguments: c.arguments.clone(),
                        },
                    })
                    .collect(),
                tool_name: match m.role {
                    Role::Tool => m.metadata.as_ref().and_then(|md| md.tool_name.clone()),
                    _ => None,
                },
            })
            .collect()
    }

    /// Convert Ollama response to agent completion
    fn convert_completion(response: ChatResponse) -> Completion {
        let tool_calls: Vec<ToolCall> = response
            .message
            .tool_calls
            .into_iter()
            .map(|c| ToolCall {
                name: c.function.name,
                arguments: c.function.arguments,
                id: None,
            })
            .collect();

        let finish_reason = if tool_calls.is_empty() {
            response.done_reason.as_deref().map(FinishReason::parse)
        } else {
            Some(FinishReason::ToolUse)
        };

        let usage = match (response.prompt_eval_count, response.eval_count) {
            (None, None) => None,
            (prompt, eval) => {
                let prompt_tokens = prompt.unwrap_or(0);
                let completion_tokens = eval.unwrap_or(0);
                Some(TokenUsage {
                    prompt_tokens,
                    completion_tokens,
                    total_tokens: prompt_tokens + completion_tokens,
                })
            }
        };

        Completion {
            content: response.message.content,
            tool_calls,
            model: response.model,
            usage,
            finish_reason,
        }
    }

    /// Build Ollama generation options
    fn build_options(opts: &GenerationOptions) -> OllamaOptions {
        OllamaOptions {
            temperature: opts.temperature,
            top_p: opts.top_p,
            num_predict: opts.max_tokens,
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn health_check(&self) -> Result<bool> {
        match self.list_models().await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("Ollama health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolSchema],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let request = ChatRequest {
            model: &options.model,
            messages: Self::convert_messages(messages),
            tools: tools.iter().map(ToolSchema::to_function_definition).collect(),
            stream: false,
            options: Self::build_options(options),
        };

        tracing::debug!(
            model = %options.model,
            messages = messages.len(),
            tools = tools.len(),
            "Sending Ollama chat request"
        );

        let response = self
            .client
            .post(self.url("api/chat"))
            .json(&request)
            .send()
            .await
            .map_err(|e| http::transport_error(PROVIDER, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(http::status_error(PROVIDER, status, &body));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| http::transport_error(PROVIDER, &e))?;

        Ok(Self::convert_completion(body))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let response = self
            .client
            .get(self.url("api/tags"))
            .send()
            .await
            .map_err(|e| AgentError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(http::status_error(PROVIDER, status, &body));
        }

        let tags: TagList = response
            .json()
            .await
            .map_err(|e| http::transport_error(PROVIDER, &e))?;

        Ok(tags
            .models
            .into_iter()
            .map(|m| ModelInfo {
                id: m.name.clone(),
                name: m.name,
            })
            .collect())
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<serde_json::Value>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    #[serde(default)]
    content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<OllamaToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaToolCall {
    function: OllamaFunction,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaFunction {
    name: String,
    #[serde(default)]
    arguments: HashMap<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: String,
    message: OllamaMessage,
    done_reason: Option<String>,
    prompt_eval_count: Option<u32>,
    eval_count: Option<u32>,
}

#[derive(Deserialize)]
struct TagList {
    models: Vec<TagEntry>,
}

#[derive(Deserialize)]
struct TagEntry {
    name: String,
}
