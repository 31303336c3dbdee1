//! # utility-tools
//!
//! The two lookups the utility agent can call:
//!
//! - `get_weather(city)`: current conditions for a city
//! - `get_stock_price(ticker)`: latest price and daily change for a ticker
//!
//! Both are plain functions over in-memory data. [`svckit`] wraps them as
//! `agent_core::Tool`s and [`default_registry`] registers both.

pub mod error;
pub mod lookup;
pub mod model;
pub mod svckit;

use agent_core::ToolRegistry;

pub use error::{Result, ToolError};
pub use lookup::{get_stock_price, get_weather, lookup_quote, lookup_weather};
pub use model::{StockQuote, WeatherReport};
pub use svckit::{StockPriceTool, WeatherTool};

/// Registry holding the weather and stock price tools
pub fn default_registry() -> ToolRegistry {
    let mut tools = ToolRegistry::new();
    tools.register(WeatherTool);
    tools.register(StockPriceTool);
    tools
}

/// Instructions for the utility agent
pub const UTILITY_AGENT_PROMPT: &str = r#"You are a helpful assistant that can look up weather information for cities and stock prices for ticker symbols.

- When asked about weather in a city, call the get_weather function with the city name.
  - If the city name appears to be misspelled, suggest the correct spelling and respond with "I think you meant [correct city]. Please try asking about that city instead."
  - Only call the function with valid city names.
- When asked about a stock price, call the get_stock_price function with the ticker symbol.
  - Only call the function with valid ticker symbols.
- For general questions like "How are you?", "Hello", etc., respond with "I'm a utility agent that can help you with weather and stock prices. How can I assist you today?"
- For any other queries, respond with "I'm sorry, I can only look up weather and stock prices. Please ask me about the weather in a city or the price of a stock."

Always be polite and concise in your responses. Do not call functions with invalid inputs."#;

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::ToolCall;

    #[test]
    fn test_default_registry() {
        let tools = default_registry();
        assert_eq!(tools.names(), vec!["get_stock_price", "get_weather"]);

        let schemas = tools.schemas();
        assert_eq!(schemas[1].parameters[0].name, "city");
        assert!(schemas[1].parameters[0].required);
        assert_eq!(schemas[0].parameters[0].name, "ticker");
    }

    #[tokio::test]
    async fn test_registry_dispatch() {
        let tools = default_registry();
        let result = tools
            .execute(&ToolCall::new("get_weather").with_arg("city", "Paris"))
            .await
            .unwrap();
        assert_eq!(result.output, get_weather("Paris"));
    }

    #[test]
    fn test_prompt_names_both_tools() {
        assert!(UTILITY_AGENT_PROMPT.contains("get_weather"));
        assert!(UTILITY_AGENT_PROMPT.contains("get_stock_price"));
    }
}
