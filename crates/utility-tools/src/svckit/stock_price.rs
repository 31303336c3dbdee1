//! Stock Price Tool

use async_trait::async_trait;

use agent_core::{
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema, tool::ParameterSchema,
};

use crate::lookup::{describe_quote, lookup_quote};

/// Tool for looking up the current price of a stock
pub struct StockPriceTool;

impl StockPriceTool {
    pub const NAME: &'static str = "get_stock_price";
}

#[async_trait]
impl Tool for StockPriceTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Get the current stock price for a specified ticker symbol".into(),
            parameters: vec![ParameterSchema::required_string(
                "ticker",
                "The stock ticker symbol (e.g., AAPL for Apple)",
            )],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let ticker = call.str_arg("ticker")?;
        let lookup = lookup_quote(ticker);
        let output = describe_quote(&lookup);

        match lookup {
            Ok(quote) => {
                tracing::debug!(ticker = %quote.ticker, price = %quote.price, "Quote found");
                Ok(ToolResult::success(Self::NAME, output))
            }
            Err(_) => Ok(ToolResult::failure(Self::NAME, output)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_price_lookup() {
        let call = ToolCall::new("get_stock_price").with_arg("ticker", "nvda");
        let result = StockPriceTool.execute(&call).await.unwrap();
        assert!(result.success);
        assert!(result.output.starts_with("Stock information for NVDA"));
    }

    #[tokio::test]
    async fn test_unknown_ticker() {
        let call = ToolCall::new("get_stock_price").with_arg("ticker", "NOTREAL");
        let result = StockPriceTool.execute(&call).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.output, "Could not find stock information for ticker: NOTREAL");
    }

    #[tokio::test]
    async fn test_output_matches_plain_lookup() {
        for ticker in ["msft", "NOTREAL", ""] {
            let call = ToolCall::new("get_stock_price").with_arg("ticker", ticker);
            let result = StockPriceTool.execute(&call).await.unwrap();
            assert_eq!(result.output, crate::get_stock_price(ticker));
        }
    }

    #[tokio::test]
    async fn test_non_string_ticker_rejected() {
        let call = ToolCall::new("get_stock_price").with_arg("ticker", 42);
        assert!(StockPriceTool.execute(&call).await.is_err());
    }
}
