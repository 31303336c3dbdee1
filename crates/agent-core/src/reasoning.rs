//! Reasoning Loop
//!
//! Implements the ReAct (Reason + Act) pattern behind the [`AgentRuntime`]
//! capability: the model is asked for a completion, any tool calls it makes are
//! executed and fed back, and the loop ends when it answers in plain text.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{AgentError, Result};
use crate::message::{Conversation, Message};
use crate::provider::{GenerationOptions, LlmProvider};
use crate::tool::{ToolCall, ToolRegistry, ToolResult};

/// The single capability the chat loop depends on: turn a user message into
/// a response, possibly invoking the given tools along the way.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    async fn run(&self, message: &str, tools: &ToolRegistry) -> Result<String>;

    /// Remember `reply` as the answer to `message` after a failed turn
    async fn record_fallback(&self, _message: &str, _reply: &str) {}
}

/// Answer used when the model finishes without any text
pub const FALLBACK_RESPONSE: &str =
    "I'm sorry, I couldn't generate a proper response. Please try again with a different query.";

/// Answer shown when the model could not complete a turn
pub const ERROR_RESPONSE: &str = "I'm sorry, I encountered an error processing your request. \
For weather queries, please provide a valid city name (e.g., 'What's the weather in London?'). \
For stock queries, please provide a valid ticker symbol (e.g., 'What's the price of AAPL?'). \
I can only help with weather and stock information.";

/// Answer shown when a turn runs past its deadline
pub const TIMEOUT_RESPONSE: &str = "I'm sorry, but your request is taking longer than expected \
to process. Please try again with a simpler query or check your internet connection.";

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// System prompt
    pub system_prompt: String,

    /// Maximum reasoning iterations before giving up
    pub max_iterations: usize,

    /// Generation options
    pub generation: GenerationOptions,

    /// Token budget for the retained conversation
    pub max_context_tokens: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            max_iterations: 10,
            generation: GenerationOptions::default(),
            max_context_tokens: 8192,
        }
    }
}

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant. \
Use the available tools when they help answer the question. Be concise and accurate.";

/// The main Agent struct
///
/// Holds the conversation for the lifetime of the process, the same way a
/// hosted assistant keeps a thread per chat.
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    config: AgentConfig,
    conversation: Mutex<Conversation>,
}

impl Agent {
    /// Create a new agent
    pub fn new(provider: Arc<dyn LlmProvider>, config: AgentConfig) -> Self {
        let conversation = Conversation::new().with_max_context_tokens(config.max_context_tokens);
        Self {
            provider,
            config,
            conversation: Mutex::new(conversation),
        }
    }

    /// Create with default configuration
    pub fn with_defaults(provider: Arc<dyn LlmProvider>) -> Self {
        Self::new(provider, AgentConfig::default())
    }

    /// Build the full system prompt, describing tools inline when the
    /// provider cannot take them natively
    fn build_system_prompt(&self, tools: &ToolRegistry) -> String {
        let mut prompt = self.config.system_prompt.clone();

        if !self.provider.supports_tools() && !tools.is_empty() {
            prompt.push_str("\n\n");
            prompt.push_str(&tools.generate_prompt_section());
        }

        prompt
    }

    /// Run one user turn against a working copy of the conversation.
    ///
    /// The copy is committed only when a final answer is produced, so a failed
    /// or cancelled turn never leaves unanswered tool calls in the history.
    async fn run_turn(&self, message: &str, tools: &ToolRegistry) -> Result<String> {
        let mut conversation = self.conversation.lock().await;
        let mut working = conversation.clone();

        working.set_system_prompt(self.build_system_prompt(tools));
        working.push(Message::user(message));
        working.truncate_to_fit();

        let native_tools = self.provider.supports_tools();
        let schemas = if native_tools { tools.schemas() } else { Vec::new() };

        for iteration in 1..=self.config.max_iterations {
            let completion = self
                .provider
                .complete(working.messages(), &schemas, &self.config.generation)
                .await?;

            tracing::debug!(
                iteration,
                tool_calls = completion.tool_calls.len(),
                "Received completion"
            );

            let mut calls = completion.tool_calls;
            if calls.is_empty() && !native_tools {
                calls.extend(parse_tool_call(&completion.content));
            }

            if calls.is_empty() {
                let content = completion.content.trim();
                let answer = if content.is_empty() {
                    FALLBACK_RESPONSE.to_string()
                } else {
                    content.to_string()
                };
                working.push(Message::assistant(&answer));
                *conversation = working;
                return Ok(answer);
            }

            for call in &mut calls {
                if call.id.is_none() {
                    call.id = Some(uuid::Uuid::new_v4().to_string());
                }
            }

            working.push(Message::assistant_with_tools(completion.content, calls.clone()));

            for call in &calls {
                tracing::debug!(tool = %call.name, "Executing tool");
                let result = execute_tool(tools, call).await;
                let content = if native_tools {
                    result.output.clone()
                } else {
                    format_tool_result(&result)
                };
                working.push(Message::tool(content, &result.name, result.id));
            }
        }

        Err(AgentError::MaxIterations(self.config.max_iterations))
    }

    /// Number of messages retained from previous turns
    pub async fn history_len(&self) -> usize {
        self.conversation.lock().await.len()
    }
}

#[async_trait]
impl AgentRuntime for Agent {
    async fn run(&self, message: &str, tools: &ToolRegistry) -> Result<String> {
        self.run_turn(message, tools).await.inspect_err(|e| {
            tracing::warn!(error = %e, "Agent turn failed");
        })
    }

    async fn record_fallback(&self, message: &str, reply: &str) {
        let mut conversation = self.conversation.lock().await;
        conversation.push(Message::user(message));
        conversation.push(Message::assistant(reply));
        conversation.truncate_to_fit();
    }
}

/// Execute a tool call, turning every failure into a result the model can read
async fn execute_tool(tools: &ToolRegistry, call: &ToolCall) -> ToolResult {
    match tools.execute(call).await {
        Ok(result) => result.with_id(call.id.clone()),
        Err(AgentError::ToolNotFound(name)) => {
            ToolResult::failure(&call.name, format!("Error: Unknown function {name}"))
                .with_id(call.id.clone())
        }
        Err(e) => ToolResult::failure(&call.name, format!("Error: {e}")).with_id(call.id.clone()),
    }
}

/// Format tool result for prompt-driven providers
fn format_tool_result(result: &ToolResult) -> String {
    if result.success {
        format!("[Tool '{}' returned]\n{}", result.name, result.output)
    } else {
        format!("[Tool '{}' failed]\n{}", result.name, result.output)
    }
}

/// Parse a tool call from LLM response text
fn parse_tool_call(content: &str) -> Option<ToolCall> {
    // Look for ```tool ... ``` blocks
    let tool_start = "```tool";
    let tool_end = "```";

    if let Some(start_idx) = content.find(tool_start) {
        let after_marker = &content[start_idx + tool_start.len()..];
        if let Some(end_idx) = after_marker.find(tool_end) {
            let json_str = after_marker[..end_idx].trim();
            if let Ok(call) = serde_json::from_str::<ToolCall>(json_str) {
                return Some(call);
            }
        }
    }

    // Fallback: raw JSON object with a "tool" key
    parse_inline_tool_call(content)
}

fn parse_inline_tool_call(content: &str) -> Option<ToolCall> {
    if !content.contains(r#""tool""#) {
        return None;
    }

    let start = content.find('{')?;
    let end = content.rfind('}')?;

    if end <= start {
        return None;
    }

    serde_json::from_str::<ToolCall>(&content[start..=end]).ok()
}

/// Builder for Agent configuration
#[derive(Default)]
pub struct AgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    config: AgentConfig,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    #[must_use]
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    #[must_use]
    pub const fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    #[must_use]
    pub const fn max_context_tokens(mut self, max: u32) -> Self {
        self.config.max_context_tokens = max;
        self
    }

    pub fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::Config("Provider is required".into()))?;

        Ok(Agent::new(provider, self.config))
    }
}
