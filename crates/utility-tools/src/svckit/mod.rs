//! Service Kit - Agent Tools
//!
//! Tool definitions that expose the lookups to the agent runtime.

mod stock_price;
mod weather;

pub use stock_price::StockPriceTool;
pub use weather::WeatherTool;
