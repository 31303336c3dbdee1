//! Lookups
//!
//! Weather and stock data come from fixed in-memory tables, so both lookups are
//! pure: no I/O, no hidden state, the same input always gives the same sentence.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{Result, ToolError};
use crate::model::{StockQuote, WeatherReport};

/// Look up current conditions for a city (case-insensitive, surrounding whitespace ignored)
pub fn lookup_weather(city: &str) -> Result<WeatherReport> {
    let key = city.trim();
    if key.is_empty() {
        return Err(ToolError::EmptyArgument("city"));
    }

    // (name, description, temperature °C, humidity %, wind m/s)
    let (name, description, temperature_c, humidity, wind_speed_ms): (
        &str,
        &str,
        Decimal,
        u8,
        Decimal,
    ) = match key.to_lowercase().as_str() {
        "london" => ("London", "light rain", dec!(11.8), 82, dec!(4.6)),
        "paris" => ("Paris", "scattered clouds", dec!(14.2), 68, dec!(3.1)),
        "new york" | "new york city" | "nyc" => {
            ("New York", "clear sky", dec!(18.5), 54, dec!(5.7))
        }
        "tokyo" => ("Tokyo", "few clouds", dec!(21.3), 61, dec!(2.4)),
        "berlin" => ("Berlin", "overcast clouds", dec!(9.6), 77, dec!(6.2)),
        "sydney" => ("Sydney", "sunny", dec!(24.9), 48, dec!(7.5)),
        "san francisco" => ("San Francisco", "mist", dec!(15.1), 88, dec!(6.9)),
        "mumbai" => ("Mumbai", "haze", dec!(31.4), 70, dec!(3.8)),
        "toronto" => ("Toronto", "light snow", dec!(-2.3), 85, dec!(5.1)),
        "cairo" => ("Cairo", "clear sky", dec!(29.7), 30, dec!(4.0)),
        _ => return Err(ToolError::UnknownCity(key.to_string())),
    };

    Ok(WeatherReport {
        city: name.to_string(),
        description: description.to_string(),
        temperature_c,
        humidity,
        wind_speed_ms,
    })
}

/// Look up the latest quote for a ticker symbol (case-insensitive)
pub fn lookup_quote(ticker: &str) -> Result<StockQuote> {
    let symbol = ticker.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(ToolError::EmptyArgument("ticker"));
    }

    // (company, price USD, change USD)
    let (name, price, change) = match symbol.as_str() {
        "AAPL" => ("Apple Inc.", dec!(189.84), dec!(1.23)),
        "MSFT" => ("Microsoft Corporation", dec!(415.50), dec!(-2.10)),
        "GOOGL" => ("Alphabet Inc.", dec!(172.63), dec!(0.87)),
        "AMZN" => ("Amazon.com, Inc.", dec!(186.45), dec!(3.02)),
        "TSLA" => ("Tesla, Inc.", dec!(248.50), dec!(-6.75)),
        "NVDA" => ("NVIDIA Corporation", dec!(131.26), dec!(2.44)),
        "META" => ("Meta Platforms, Inc.", dec!(563.09), dec!(-1.58)),
        "NFLX" => ("Netflix, Inc.", dec!(702.25), dec!(9.40)),
        "IBM" => ("International Business Machines", dec!(221.10), dec!(0.35)),
        "JPM" => ("JPMorgan Chase & Co.", dec!(224.70), dec!(-0.92)),
        _ => return Err(ToolError::UnknownTicker(ticker.trim().to_string())),
    };

    Ok(StockQuote {
        ticker: symbol,
        name: name.to_string(),
        price,
        change,
    })
}

/// Human-readable weather for `city`; unknown cities get a placeholder sentence
pub fn get_weather(city: &str) -> String {
    describe_weather(city, &lookup_weather(city))
}

/// Human-readable price for `ticker`; unknown tickers get a placeholder sentence
pub fn get_stock_price(ticker: &str) -> String {
    describe_quote(&lookup_quote(ticker))
}

pub(crate) fn describe_weather(city: &str, lookup: &Result<WeatherReport>) -> String {
    match lookup {
        Ok(report) => report.to_string(),
        Err(ToolError::EmptyArgument(_)) => {
            "Please provide a city name to look up the weather.".to_string()
        }
        Err(_) => format!(
            "Weather information for {} is not available right now.",
            city.trim()
        ),
    }
}

pub(crate) fn describe_quote(lookup: &Result<StockQuote>) -> String {
    match lookup {
        Ok(quote) => quote.to_string(),
        Err(ToolError::EmptyArgument(_)) => {
            "Please provide a ticker symbol to look up a stock price.".to_string()
        }
        Err(e) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_city() {
        let weather = get_weather("London");
        assert!(!weather.is_empty());
        assert!(weather.starts_with("Weather in London:"));
        assert!(weather.contains("Temperature:"));
    }

    #[test]
    fn test_city_matching_ignores_case_and_whitespace() {
        assert_eq!(get_weather("  lOnDoN "), get_weather("London"));
        assert_eq!(lookup_weather("nyc").unwrap().city, "New York");
    }

    #[test]
    fn test_weather_is_idempotent() {
        assert_eq!(get_weather("Tokyo"), get_weather("Tokyo"));
        assert_eq!(get_weather("Atlantis"), get_weather("Atlantis"));
    }

    #[test]
    fn test_unknown_city_placeholder() {
        assert_eq!(
            lookup_weather("Atlantis"),
            Err(ToolError::UnknownCity("Atlantis".into()))
        );
        assert_eq!(
            get_weather("Atlantis"),
            "Weather information for Atlantis is not available right now."
        );
        assert!(get_weather("   ").contains("provide a city"));
    }

    #[test]
    fn test_known_ticker() {
        let price = get_stock_price("AAPL");
        assert!(price.starts_with("Stock information for AAPL: Current Price: $189.84"));
        assert_eq!(get_stock_price("aapl"), price);
    }

    #[test]
    fn test_unknown_ticker_placeholder() {
        assert_eq!(
            get_stock_price("ZZZZ"),
            "Could not find stock information for ticker: ZZZZ"
        );
        assert!(get_stock_price("").contains("provide a ticker"));
    }

    #[test]
    fn test_negative_change() {
        let quote = lookup_quote("MSFT").unwrap();
        assert!(quote.change.is_sign_negative());
        assert!(quote.change_percent().is_sign_negative());
        assert!(get_stock_price("MSFT").contains("Change: -2.10 (-0.50%)"));
    }
}
