//! Domain Models
//!
//! Lookup results and the sentences the tools hand back to the model.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Current conditions for a city
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Canonical city name
    pub city: String,

    /// Short description (e.g., "light rain")
    pub description: String,

    /// Temperature in degrees Celsius
    pub temperature_c: Decimal,

    /// Relative humidity in percent
    pub humidity: u8,

    /// Wind speed in metres per second
    pub wind_speed_ms: Decimal,
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Weather in {}: {}. Temperature: {}°C, Humidity: {}%, Wind Speed: {} m/s",
            self.city, self.description, self.temperature_c, self.humidity, self.wind_speed_ms
        )
    }
}

/// Latest quote for a listed stock
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockQuote {
    /// Ticker symbol, uppercase
    pub ticker: String,

    /// Company name
    pub name: String,

    /// Last traded price in USD
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,

    /// Change against the previous close in USD
    #[serde(with = "rust_decimal::serde::str")]
    pub change: Decimal,
}

impl StockQuote {
    /// Change against the previous close, in percent, two decimal places
    pub fn change_percent(&self) -> Decimal {
        let previous_close = self.price - self.change;
        if previous_close.is_zero() {
            return Decimal::ZERO;
        }
        (self.change / previous_close * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl fmt::Display for StockQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stock information for {}: Current Price: ${}, Change: {} ({:.2}%)",
            self.ticker,
            self.price,
            self.change,
            self.change_percent()
        )
    }
}
