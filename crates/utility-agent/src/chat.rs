//! Chat Loop
//!
//! Reads one line at a time, forwards it to the agent runtime together with
//! the tool registry, prints the answer, and stops on an exit command or end
//! of input.

use std::time::Duration;

use agent_core::{AgentError, AgentRuntime, ToolRegistry};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Inputs that end the session (trimmed, case-insensitive)
pub const EXIT_COMMANDS: [&str; 3] = ["exit", "quit", "bye"];

const SEPARATOR_WIDTH: usize = 50;

/// Loop state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// What a line of input asks for
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Exit,
    Empty,
    Message(&'a str),
}

impl<'a> Input<'a> {
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else if EXIT_COMMANDS
            .iter()
            .any(|cmd| trimmed.eq_ignore_ascii_case(cmd))
        {
            Self::Exit
        } else {
            Self::Message(trimmed)
        }
    }
}

/// Counters reported when the loop terminates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopSummary {
    /// Messages forwarded to the runtime
    pub turns: usize,

    /// Turns that ended in an error or timeout
    pub failures: usize,
}

/// Write the welcome banner
pub async fn write_banner<O>(output: &mut O) -> std::io::Result<()>
where
    O: AsyncWrite + Unpin,
{
    let banner = format!(
        "Welcome to the Utility Agent!\n\
         You can ask about weather (e.g., 'What's the weather in London?')\n\
         Or stock prices (e.g., 'What's the current price of AAPL?')\n\
         Type 'exit' to quit.\n\
         {}\n",
        "-".repeat(SEPARATOR_WIDTH)
    );
    output.write_all(banner.as_bytes()).await?;
    output.flush().await
}

/// The read-eval-print cycle
pub struct ChatLoop<'a, R: AgentRuntime + ?Sized> {
    runtime: &'a R,
    tools: &'a ToolRegistry,
    timeout: Duration,
}

impl<'a, R: AgentRuntime + ?Sized> ChatLoop<'a, R> {
    pub const fn new(runtime: &'a R, tools: &'a ToolRegistry, timeout: Duration) -> Self {
        Self {
            runtime,
            tools,
            timeout,
        }
    }

    /// Run until an exit command or end of input
    pub async fn run<I, O>(&self, input: I, output: &mut O) -> std::io::Result<LoopSummary>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut summary = LoopSummary::default();
        let mut state = LoopState::Running;

        while state == LoopState::Running {
            output.write_all(b"\nYou: ").await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                tracing::debug!("End of input");
                output.write_all(b"\nGoodbye!\n").await?;
                state = LoopState::Terminated;
                continue;
            };

            match Input::classify(&line) {
                Input::Exit => {
                    output.write_all(b"Goodbye!\n").await?;
                    state = LoopState::Terminated;
                }
                Input::Empty => {}
                Input::Message(message) => {
                    summary.turns += 1;
                    match self.ask(message).await {
                        Ok(response) => {
                            output
                                .write_all(format!("\nAgent: {response}\n").as_bytes())
                                .await?;
                        }
                        Err(e) => {
                            summary.failures += 1;
                            tracing::warn!(error = %e, "Agent runtime call failed");
                            output
                                .write_all(format!("\nError: {}\n", e.report()).as_bytes())
                                .await?;

                            if let Some(reply) = e.fallback_reply() {
                                self.runtime.record_fallback(message, reply).await;
                                output
                                    .write_all(format!("\nAgent: {reply}\n").as_bytes())
                                    .await?;
                            } else {
                                output.write_all(b"Please try again.\n").await?;
                            }
                        }
                    }
                }
            }
            output.flush().await?;
        }

        tracing::info!(turns = summary.turns, failures = summary.failures, "Chat ended");
        Ok(summary)
    }

    /// One bounded call to the runtime
    async fn ask(&self, message: &str) -> agent_core::Result<String> {
        tracing::debug!(message, "Forwarding message to agent runtime");
        tokio::time::timeout(self.timeout, self.runtime.run(message, self.tools))
            .await
            .map_err(|_| AgentError::Timeout(self.timeout.as_secs()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use agent_core::provider::{Completion, GenerationOptions, LlmProvider, ModelInfo};
    use agent_core::{
        Agent, AgentBuilder, ERROR_RESPONSE, Message, TIMEOUT_RESPONSE, ToolCall, ToolSchema,
    };
    use async_trait::async_trait;

    /// Runtime that records every call and answers from a script
    #[derive(Default)]
    struct RecordingRuntime {
        calls: Mutex<Vec<(String, Vec<String>)>>,
        replies: Mutex<VecDeque<agent_core::Result<String>>>,
        fallbacks: Mutex<Vec<(String, String)>>,
    }

    impl RecordingRuntime {
        fn with_replies(replies: Vec<agent_core::Result<String>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<(String, Vec<String>)> {
            self.calls.lock().unwrap().clone()
        }

        fn fallbacks(&self) -> Vec<(String, String)> {
            self.fallbacks.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AgentRuntime for RecordingRuntime {
        async fn run(&self, message: &str, tools: &ToolRegistry) -> agent_core::Result<String> {
            let names = tools.names().into_iter().map(String::from).collect();
            self.calls.lock().unwrap().push((message.to_string(), names));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(format!("echo: {message}")))
        }

        async fn record_fallback(&self, message: &str, reply: &str) {
            self.fallbacks
                .lock()
                .unwrap()
                .push((message.to_string(), reply.to_string()));
        }
    }

    struct SlowRuntime;

    #[async_trait]
    impl AgentRuntime for SlowRuntime {
        async fn run(&self, _message: &str, _tools: &ToolRegistry) -> agent_core::Result<String> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".into())
        }
    }

    async fn drive<R: AgentRuntime>(runtime: &R, input: &str) -> (LoopSummary, String) {
        let tools = utility_tools::default_registry();
        let chat = ChatLoop::new(runtime, &tools, Duration::from_secs(5));
        let mut output = Vec::new();
        let summary = chat.run(input.as_bytes(), &mut output).await.unwrap();
        (summary, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_classify() {
        assert_eq!(Input::classify("exit"), Input::Exit);
        assert_eq!(Input::classify("  EXIT \n"), Input::Exit);
        assert_eq!(Input::classify("Quit"), Input::Exit);
        assert_eq!(Input::classify("bye"), Input::Exit);
        assert_eq!(Input::classify("   "), Input::Empty);
        assert_eq!(Input::classify(" exit now "), Input::Message("exit now"));
    }

    #[tokio::test]
    async fn test_exit_first_makes_no_runtime_call() {
        let runtime = RecordingRuntime::default();
        let (summary, output) = drive(&runtime, "exit\nWhat's the weather in London?\n").await;

        assert!(runtime.calls().is_empty());
        assert_eq!(summary, LoopSummary::default());
        assert!(!output.contains("Agent:"));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_one_call_and_one_response_per_message() {
        let runtime = RecordingRuntime::default();
        let (summary, output) = drive(&runtime, "hello\nWhat's the price of AAPL?\nexit\n").await;

        let calls = runtime.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "hello");
        assert_eq!(calls[1].0, "What's the price of AAPL?");
        assert_eq!(calls[0].1, vec!["get_stock_price", "get_weather"]);
        assert_eq!(summary.turns, 2);
        assert_eq!(output.matches("Agent: ").count(), 2);
        assert_eq!(output.matches("You: ").count(), 3);
    }

    #[tokio::test]
    async fn test_empty_lines_are_skipped() {
        let runtime = RecordingRuntime::default();
        let (summary, _) = drive(&runtime, "\n   \nhi\nexit\n").await;
        assert_eq!(runtime.calls().len(), 1);
        assert_eq!(summary.turns, 1);
    }

    #[tokio::test]
    async fn test_end_of_input_terminates() {
        let runtime = RecordingRuntime::default();
        let (summary, output) = drive(&runtime, "hi").await;
        assert_eq!(summary.turns, 1);
        assert!(output.contains("Agent: echo: hi"));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_runtime_error_keeps_loop_running() {
        let runtime = RecordingRuntime::with_replies(vec![
            Err(AgentError::ProviderUnavailable("connection refused".into())),
            Ok("Back online.".into()),
        ]);
        let (summary, output) = drive(&runtime, "first\nsecond\nexit\n").await;

        assert_eq!(summary, LoopSummary { turns: 2, failures: 1 });
        assert!(output.contains("Error: The AI service is currently unavailable."));
        assert!(output.contains("connection refused"));
        assert_eq!(output.matches("Please try again.").count(), 1);
        assert!(output.contains("Agent: Back online."));
        assert!(runtime.fallbacks().is_empty());
    }

    #[tokio::test]
    async fn test_error_detail_is_printed() {
        let runtime = RecordingRuntime::with_replies(vec![Err(AgentError::Io(
            std::io::Error::other("broken pipe to provider"),
        ))]);
        let (summary, output) = drive(&runtime, "hi
exit
").await;

        assert_eq!(summary.failures, 1);
        assert!(output.contains("Error: An unexpected error occurred."));
        assert!(output.contains("broken pipe to provider"));
        assert!(output.contains("\nPlease try again.\n"));
    }

    #[tokio::test]
    async fn test_failed_turn_gets_guidance_reply() {
        let runtime = RecordingRuntime::with_replies(vec![
            Err(AgentError::Parse("OpenAI response contained no choices".into())),
            Err(AgentError::MaxIterations(10)),
        ]);
        let (summary, output) = drive(&runtime, "Weather in Lundon?
again
exit
").await;

        assert_eq!(summary, LoopSummary { turns: 2, failures: 2 });
        assert!(output.contains("no choices"));
        assert_eq!(output.matches(&format!("Agent: {ERROR_RESPONSE}")).count(), 2);
        assert!(!output.contains("Please try again.\n"));
        assert_eq!(
            runtime.fallbacks(),
            vec![
                ("Weather in Lundon?".to_string(), ERROR_RESPONSE.to_string()),
                ("again".to_string(), ERROR_RESPONSE.to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let runtime = SlowRuntime;
        let tools = utility_tools::default_registry();
        let chat = ChatLoop::new(&runtime, &tools, Duration::from_millis(20));
        let mut output = Vec::new();
        let summary = chat.run(&b"hello\nexit\n"[..], &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(summary.failures, 1);
        assert!(output.contains("Error: Request timed out"));
        assert!(output.contains(&format!("Agent: {TIMEOUT_RESPONSE}")));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[tokio::test]
    async fn test_timed_out_turn_is_remembered() {
        let provider = Arc::new(StalledProvider);
        let agent = AgentBuilder::new().provider(provider).build().unwrap();
        let tools = utility_tools::default_registry();
        let chat = ChatLoop::new(&agent, &tools, Duration::from_millis(20));
        let mut output = Vec::new();
        chat.run(&b"Price of AAPL?\nexit\n"[..], &mut output).await.unwrap();

        assert_eq!(agent.history_len().await, 2);
    }

    #[tokio::test]
    async fn test_banner() {
        let mut output = Vec::new();
        write_banner(&mut output).await.unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Welcome to the Utility Agent!"));
        assert!(output.contains("Type 'exit' to quit."));
    }

    /// Provider that never answers in time
    struct StalledProvider;

    #[async_trait]
    impl LlmProvider for StalledProvider {
        async fn health_check(&self) -> agent_core::Result<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            _messages: &[Message],
            _tools: &[ToolSchema],
            _options: &GenerationOptions,
        ) -> agent_core::Result<Completion> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Completion::text("too late", "test"))
        }

        async fn list_models(&self) -> agent_core::Result<Vec<ModelInfo>> {
            Ok(Vec::new())
        }
    }

    /// Provider that asks for the weather once, then repeats the tool output
    struct WeatherThenEcho {
        script: Mutex<VecDeque<Completion>>,
    }

    #[async_trait]
    impl LlmProvider for WeatherThenEcho {
        async fn health_check(&self) -> agent_core::Result<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            messages: &[Message],
            tools: &[ToolSchema],
            _options: &GenerationOptions,
        ) -> agent_core::Result<Completion> {
            assert_eq!(tools.len(), 2);
            if let Some(next) = self.script.lock().unwrap().pop_front() {
                return Ok(next);
            }
            let tool_output = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            Ok(Completion::text(format!("Here you go: {tool_output}"), "test"))
        }

        async fn list_models(&self) -> agent_core::Result<Vec<ModelInfo>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_weather_question_end_to_end() {
        let provider = Arc::new(WeatherThenEcho {
            script: Mutex::new(
                vec![Completion::tool_use(
                    vec![ToolCall::new("get_weather").with_arg("city", "London")],
                    "test",
                )]
                .into(),
            ),
        });
        let agent: Agent = AgentBuilder::new()
            .provider(provider)
            .system_prompt(utility_tools::UTILITY_AGENT_PROMPT)
            .build()
            .unwrap();

        let (summary, output) = drive(&agent, "What's the weather in London?\nexit\n").await;

        assert_eq!(summary.turns, 1);
        assert!(output.contains("Agent: Here you go: Weather in London: light rain."));
        assert_eq!(output.matches("Agent: ").count(), 1);
    }
}
