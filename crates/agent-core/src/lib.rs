//! # agent-core
//!
//! Core agent logic with provider-agnostic LLM abstraction and an explicit tool system.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Agent (AgentRuntime)                       │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  Reasoning  │  │    Tools    │  │   LlmProvider       │  │
//! │  │    Loop     │──│   Registry  │──│   (Strategy)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers only see [`AgentRuntime::run`]: a message and a tool registry in,
//! a text answer out. The `LlmProvider` trait decides which hosted model
//! actually does the reasoning.

pub mod error;
pub mod message;
pub mod provider;
pub mod reasoning;
pub mod tool;

pub use error::{AgentError, Result};
pub use message::{Conversation, Message, Role};
pub use provider::{Completion, GenerationOptions, LlmProvider};
pub use reasoning::{
    Agent, AgentBuilder, AgentConfig, AgentRuntime, ERROR_RESPONSE, FALLBACK_RESPONSE,
    TIMEOUT_RESPONSE,
};
pub use tool::{ParameterSchema, Tool, ToolCall, ToolRegistry, ToolResult, ToolSchema};
