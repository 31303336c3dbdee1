//! Weather Tool

use async_trait::async_trait;

use agent_core::{
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema, tool::ParameterSchema,
};

use crate::lookup::{describe_weather, lookup_weather};

/// Tool for looking up the current weather in a city
pub struct WeatherTool;

impl WeatherTool {
    pub const NAME: &'static str = "get_weather";
}

#[async_trait]
impl Tool for WeatherTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Get the current weather for a specified city".into(),
            parameters: vec![ParameterSchema::required_string(
                "city",
                "The name of the city to get weather information for",
            )],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let city = call.str_arg("city")?;
        let lookup = lookup_weather(city);
        let output = describe_weather(city, &lookup);

        match lookup {
            Ok(_) => Ok(ToolResult::success(Self::NAME, output)),
            Err(e) => {
                tracing::debug!(city, error = %e, "Weather lookup missed");
                Ok(ToolResult::failure(Self::NAME, output))
            }
        }
    }
}
