//! Alpha Vantage wire format.
//!
//! This module turns Alpha Vantage response bodies into the crate's models:
//! - Real-time quotes via GLOBAL_QUOTE
//! - Company names via OVERVIEW
//! - Daily bars via TIME_SERIES_DAILY
//! - Symbol lookup via SYMBOL_SEARCH
//!
//! Alpha Vantage reports hard errors and quota notices through free-text
//! fields ("Error Message", "Note", "Information"). They are classified here,
//! once, into [`MarketDataError`] variants.

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

use crate::errors::MarketDataError;
use crate::models::{HistoricalPoint, Quote, SymbolMatch};

pub const PROVIDER_ID: &str = "ALPHA_VANTAGE";

pub const FUNCTION_GLOBAL_QUOTE: &str = "GLOBAL_QUOTE";
pub const FUNCTION_OVERVIEW: &str = "OVERVIEW";
pub const FUNCTION_TIME_SERIES_DAILY: &str = "TIME_SERIES_DAILY";
pub const FUNCTION_SYMBOL_SEARCH: &str = "SYMBOL_SEARCH";

/// Number of bars in a "compact" daily series.
pub const COMPACT_WINDOW: usize = 100;

/// Phrases Alpha Vantage uses when a request quota is exhausted.
const RATE_LIMIT_MARKERS: &[&str] = &["call frequency", "rate limit", "requests per"];

/// Size of the daily series to request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputSize {
    /// Latest 100 bars
    Compact,
    /// Full history
    Full,
}

impl OutputSize {
    /// Smallest output size that covers `days` bars.
    pub fn for_days(days: usize) -> Self {
        if days > COMPACT_WINDOW {
            Self::Full
        } else {
            Self::Compact
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Full => "full",
        }
    }
}

// ============================================================================
// Response structures for Alpha Vantage API
// ============================================================================

/// Status fields present on every Alpha Vantage response.
#[derive(Debug, Default, Deserialize)]
struct ApiStatus {
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

impl ApiStatus {
    /// Classify any provider notice carried by the response.
    fn check(&self) -> Result<(), MarketDataError> {
        if let Some(ref msg) = self.error_message {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: msg.clone(),
            });
        }

        for msg in [&self.note, &self.information].into_iter().flatten() {
            if is_rate_limit_notice(msg) {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                    message: msg.clone(),
                });
            }
        }

        // Premium-only endpoints and demo-key notices come back as "Information"
        // with no data.
        if let Some(ref msg) = self.information {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: msg.clone(),
            });
        }

        if let Some(ref msg) = self.note {
            warn!("Alpha Vantage note: {}", msg);
        }

        Ok(())
    }
}

fn is_rate_limit_notice(msg: &str) -> bool {
    let lower = msg.to_lowercase();
    RATE_LIMIT_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// GLOBAL_QUOTE response
#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuoteFields>,
    #[serde(flatten)]
    status: ApiStatus,
}

/// Unknown symbols come back as an empty object, so every field is optional.
#[derive(Debug, Default, Deserialize)]
struct GlobalQuoteFields {
    #[serde(rename = "01. symbol")]
    symbol: Option<String>,
    #[serde(rename = "02. open")]
    open: Option<String>,
    #[serde(rename = "03. high")]
    high: Option<String>,
    #[serde(rename = "04. low")]
    low: Option<String>,
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "06. volume")]
    volume: Option<String>,
    #[serde(rename = "07. latest trading day")]
    latest_trading_day: Option<String>,
    #[serde(rename = "08. previous close")]
    previous_close: Option<String>,
    #[serde(rename = "09. change")]
    change: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

/// OVERVIEW response; only the name is used.
#[derive(Debug, Deserialize)]
struct CompanyOverviewResponse {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(flatten)]
    status: ApiStatus,
}

/// TIME_SERIES_DAILY response
#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyBar>>,
    #[serde(flatten)]
    status: ApiStatus,
}

/// Fields are optional so one incomplete bar does not reject the whole series.
#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "1. open", default)]
    open: Option<String>,
    #[serde(rename = "2. high", default)]
    high: Option<String>,
    #[serde(rename = "3. low", default)]
    low: Option<String>,
    #[serde(rename = "4. close", default)]
    close: Option<String>,
    #[serde(rename = "5. volume", default)]
    volume: Option<String>,
}

/// SYMBOL_SEARCH response
#[derive(Debug, Deserialize)]
struct SymbolSearchResponse {
    #[serde(rename = "bestMatches", default)]
    best_matches: Vec<SearchMatch>,
    #[serde(flatten)]
    status: ApiStatus,
}

#[derive(Debug, Deserialize)]
struct SearchMatch {
    #[serde(rename = "1. symbol")]
    symbol: String,
    #[serde(rename = "2. name", default)]
    name: String,
    #[serde(rename = "3. type", default)]
    asset_type: String,
    #[serde(rename = "4. region", default)]
    region: String,
    #[serde(rename = "5. marketOpen", default)]
    market_open: String,
    #[serde(rename = "6. marketClose", default)]
    market_close: String,
    #[serde(rename = "7. timezone", default)]
    timezone: String,
    #[serde(rename = "8. currency", default)]
    currency: String,
    #[serde(rename = "9. matchScore")]
    match_score: Option<String>,
}

impl From<SearchMatch> for SymbolMatch {
    fn from(m: SearchMatch) -> Self {
        Self {
            match_score: m.match_score.as_deref().and_then(parse_decimal),
            symbol: m.symbol,
            name: m.name,
            asset_type: m.asset_type,
            region: m.region,
            market_open: m.market_open,
            market_close: m.market_close,
            timezone: m.timezone,
            currency: m.currency,
        }
    }
}

// ============================================================================
// Parsers
// ============================================================================

fn decode<'a, T: Deserialize<'a>>(text: &'a str, what: &str) -> Result<T, MarketDataError> {
    serde_json::from_str(text).map_err(|e| MarketDataError::ProviderError {
        provider: PROVIDER_ID.to_string(),
        message: format!("Failed to parse {} response: {}", what, e),
    })
}

/// Parse a date string in YYYY-MM-DD format.
fn parse_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").ok()
}

/// Parse a decimal value from a string, tolerating a trailing percent sign.
fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s.trim().trim_end_matches('%')).ok()
}

fn parse_volume(s: &str) -> Option<u64> {
    s.trim().parse::<u64>().ok()
}

fn required<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str, MarketDataError> {
    field.as_deref().ok_or_else(|| MarketDataError::ProviderError {
        provider: PROVIDER_ID.to_string(),
        message: format!("Missing field '{}'", name),
    })
}

fn invalid_field(name: &str, raw: &str) -> MarketDataError {
    MarketDataError::ProviderError {
        provider: PROVIDER_ID.to_string(),
        message: format!("Invalid value for '{}': {:?}", name, raw),
    }
}

fn required_decimal(field: &Option<String>, name: &str) -> Result<Decimal, MarketDataError> {
    let raw = required(field, name)?;
    parse_decimal(raw).ok_or_else(|| invalid_field(name, raw))
}

/// Parse a GLOBAL_QUOTE body.
///
/// The returned quote carries `symbol` as its name; the caller replaces it
/// once the company name has been resolved.
pub fn parse_global_quote(symbol: &str, text: &str) -> Result<Quote, MarketDataError> {
    let response: GlobalQuoteResponse = decode(text, "quote")?;
    response.status.check()?;

    let fields = response
        .global_quote
        .filter(|q| q.symbol.is_some())
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

    let volume_raw = required(&fields.volume, "06. volume")?;
    let day_raw = required(&fields.latest_trading_day, "07. latest trading day")?;

    Ok(Quote {
        symbol: fields.symbol.clone().unwrap_or_else(|| symbol.to_string()),
        name: symbol.to_string(),
        price: required_decimal(&fields.price, "05. price")?,
        change: required_decimal(&fields.change, "09. change")?,
        change_percent: required_decimal(&fields.change_percent, "10. change percent")?,
        volume: parse_volume(volume_raw).ok_or_else(|| invalid_field("06. volume", volume_raw))?,
        high: required_decimal(&fields.high, "03. high")?,
        low: required_decimal(&fields.low, "04. low")?,
        open: required_decimal(&fields.open, "02. open")?,
        previous_close: required_decimal(&fields.previous_close, "08. previous close")?,
        last_trading_day: parse_date(day_raw)
            .ok_or_else(|| invalid_field("07. latest trading day", day_raw))?,
    })
}

/// Parse an OVERVIEW body into the company's display name.
pub fn parse_company_name(symbol: &str, text: &str) -> Result<String, MarketDataError> {
    let response: CompanyOverviewResponse = decode(text, "company overview")?;
    response.status.check()?;

    response
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty() && n != "None")
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
}

/// Parse a TIME_SERIES_DAILY body into the most recent `days` bars,
/// ordered oldest to newest.
pub fn parse_daily_series(
    symbol: &str,
    text: &str,
    days: usize,
) -> Result<Vec<HistoricalPoint>, MarketDataError> {
    let response: TimeSeriesResponse = decode(text, "daily series")?;
    response.status.check()?;

    let time_series = response
        .time_series
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

    let mut points: Vec<HistoricalPoint> = time_series
        .into_iter()
        .filter_map(|(date_str, bar)| {
            let point = to_point(&date_str, &bar);
            if point.is_none() {
                warn!("Alpha Vantage: skipping malformed bar {} for {}", date_str, symbol);
            }
            point
        })
        .collect();

    // Newest first, keep the window, then flip to ascending
    points.sort_by(|a, b| b.date.cmp(&a.date));
    points.truncate(days);
    points.reverse();

    debug!(
        "Alpha Vantage: parsed {} daily bars for {}",
        points.len(),
        symbol
    );

    Ok(points)
}

fn to_point(date_str: &str, bar: &DailyBar) -> Option<HistoricalPoint> {
    Some(HistoricalPoint {
        date: parse_date(date_str)?,
        price: parse_decimal(bar.close.as_deref()?)?,
        open: parse_decimal(bar.open.as_deref()?)?,
        high: parse_decimal(bar.high.as_deref()?)?,
        low: parse_decimal(bar.low.as_deref()?)?,
        volume: parse_volume(bar.volume.as_deref()?)?,
    })
}

/// Parse a SYMBOL_SEARCH body.
pub fn parse_symbol_search(text: &str) -> Result<Vec<SymbolMatch>, MarketDataError> {
    let response: SymbolSearchResponse = decode(text, "symbol search")?;
    response.status.check()?;

    Ok(response
        .best_matches
        .into_iter()
        .map(SymbolMatch::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const IBM_QUOTE: &str = r#"{
        "Global Quote": {
            "01. symbol": "IBM",
            "02. open": "122.00",
            "03. high": "124.00",
            "04. low": "121.10",
            "05. price": "123.45",
            "06. volume": "3456789",
            "07. latest trading day": "2024-01-15",
            "08. previous close": "121.95",
            "09. change": "1.5000",
            "10. change percent": "1.23%"
        }
    }"#;

    #[test]
    fn test_parse_global_quote_normalizes_numbers() {
        let quote = parse_global_quote("IBM", IBM_QUOTE).unwrap();
        assert_eq!(quote.symbol, "IBM");
        assert_eq!(quote.name, "IBM");
        assert_eq!(quote.price, dec!(123.45));
        assert_eq!(quote.change, dec!(1.5));
        assert_eq!(quote.change_percent, dec!(1.23));
        assert_eq!(quote.volume, 3_456_789);
        assert_eq!(quote.open, dec!(122.00));
        assert_eq!(quote.high, dec!(124.00));
        assert_eq!(quote.low, dec!(121.10));
        assert_eq!(quote.previous_close, dec!(121.95));
        assert_eq!(
            quote.last_trading_day,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_parse_global_quote_empty_is_not_found() {
        let err = parse_global_quote("ZZZZ", r#"{"Global Quote": {}}"#).unwrap_err();
        assert_eq!(err, MarketDataError::SymbolNotFound("ZZZZ".to_string()));

        let err = parse_global_quote("ZZZZ", "{}").unwrap_err();
        assert_eq!(err, MarketDataError::SymbolNotFound("ZZZZ".to_string()));
    }

    #[test]
    fn test_parse_global_quote_rejects_bad_number() {
        let body = IBM_QUOTE.replace("\"123.45\"", "\"n/a\"");
        let err = parse_global_quote("IBM", &body).unwrap_err();
        assert!(
            matches!(err, MarketDataError::ProviderError { ref message, .. } if message.contains("05. price"))
        );
    }

    #[test]
    fn test_error_message_is_provider_error() {
        let body = r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#;
        let err = parse_global_quote("IBM", body).unwrap_err();
        assert!(matches!(err, MarketDataError::ProviderError { .. }));
    }

    #[test]
    fn test_note_frequency_is_rate_limited() {
        let body = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute and 500 calls per day."}"#;
        let err = parse_global_quote("IBM", body).unwrap_err();
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_information_rate_limit_is_rate_limited() {
        let body = r#"{"Information": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."}"#;
        let err = parse_daily_series("IBM", body, 10).unwrap_err();
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_information_without_quota_is_provider_error() {
        let body = r#"{"Information": "This is a premium endpoint."}"#;
        let err = parse_daily_series("IBM", body, 10).unwrap_err();
        assert!(matches!(err, MarketDataError::ProviderError { .. }));
    }

    #[test]
    fn test_garbage_body_is_provider_error() {
        let err = parse_symbol_search("<html>").unwrap_err();
        assert!(matches!(err, MarketDataError::ProviderError { .. }));
    }

    #[test]
    fn test_parse_company_name() {
        let body = r#"{"Symbol": "IBM", "Name": "International Business Machines", "Sector": "TECHNOLOGY"}"#;
        assert_eq!(
            parse_company_name("IBM", body).unwrap(),
            "International Business Machines"
        );

        assert!(parse_company_name("IBM", "{}").is_err());
        assert!(parse_company_name("IBM", r#"{"Name": "None"}"#).is_err());
    }

    #[test]
    fn test_parse_daily_series_orders_and_windows() {
        let body = r#"{
            "Meta Data": {"2. Symbol": "IBM"},
            "Time Series (Daily)": {
                "2024-01-12": {"1. open": "10", "2. high": "11", "3. low": "9", "4. close": "10.5", "5. volume": "100"},
                "2024-01-16": {"1. open": "12", "2. high": "13", "3. low": "11", "4. close": "12.5", "5. volume": "300"},
                "2024-01-10": {"1. open": "8", "2. high": "9", "3. low": "7", "4. close": "8.5", "5. volume": "50"},
                "2024-01-15": {"1. open": "11", "2. high": "12", "3. low": "10", "4. close": "11.5", "5. volume": "200"}
            }
        }"#;

        let points = parse_daily_series("IBM", body, 3).unwrap();
        let dates: Vec<String> = points.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-12", "2024-01-15", "2024-01-16"]);
        assert_eq!(points[2].price, dec!(12.5));
        assert_eq!(points[2].volume, 300);

        let all = parse_daily_series("IBM", body, 30).unwrap();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_parse_daily_series_skips_malformed_bars() {
        let body = r#"{
            "Time Series (Daily)": {
                "2024-01-12": {"1. open": "10", "2. high": "11", "3. low": "9", "4. close": "oops", "5. volume": "100"},
                "2024-01-15": {"1. open": "11", "2. high": "12", "3. low": "10", "4. close": "11.5", "5. volume": "200"}
            }
        }"#;
        let points = parse_daily_series("IBM", body, 10).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].price, dec!(11.5));
    }

    #[test]
    fn test_parse_daily_series_skips_incomplete_bars() {
        let body = r#"{
            "Time Series (Daily)": {
                "2024-01-12": {"1. open": "10", "2. high": "11", "3. low": "9", "4. close": "10.5"},
                "2024-01-15": {"1. open": "11", "2. high": "12", "3. low": "10", "4. close": "11.5", "5. volume": "200"}
            }
        }"#;
        let points = parse_daily_series("IBM", body, 10).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date.to_string(), "2024-01-15");
        assert_eq!(points[0].volume, 200);
    }

    #[test]
    fn test_parse_daily_series_missing_is_not_found() {
        let err = parse_daily_series("ZZZZ", r#"{"Meta Data": {}}"#, 10).unwrap_err();
        assert_eq!(err, MarketDataError::SymbolNotFound("ZZZZ".to_string()));
    }

    #[test]
    fn test_parse_symbol_search() {
        let body = r#"{
            "bestMatches": [
                {
                    "1. symbol": "TSCO.LON",
                    "2. name": "Tesco PLC",
                    "3. type": "Equity",
                    "4. region": "United Kingdom",
                    "5. marketOpen": "08:00",
                    "6. marketClose": "16:30",
                    "7. timezone": "UTC+01",
                    "8. currency": "GBX",
                    "9. matchScore": "0.7273"
                }
            ]
        }"#;
        let matches = parse_symbol_search(body).unwrap();
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.symbol, "TSCO.LON");
        assert_eq!(m.name, "Tesco PLC");
        assert_eq!(m.asset_type, "Equity");
        assert_eq!(m.region, "United Kingdom");
        assert_eq!(m.market_open, "08:00");
        assert_eq!(m.market_close, "16:30");
        assert_eq!(m.timezone, "UTC+01");
        assert_eq!(m.currency, "GBX");
        assert_eq!(m.match_score, Some(dec!(0.7273)));
    }

    #[test]
    fn test_parse_symbol_search_without_matches() {
        assert!(parse_symbol_search(r#"{"bestMatches": []}"#).unwrap().is_empty());
        assert!(parse_symbol_search("{}").unwrap().is_empty());
    }

    #[test]
    fn test_output_size_for_days() {
        assert_eq!(OutputSize::for_days(30), OutputSize::Compact);
        assert_eq!(OutputSize::for_days(100), OutputSize::Compact);
        assert_eq!(OutputSize::for_days(101), OutputSize::Full);
        assert_eq!(OutputSize::Full.as_str(), "full");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("150.25"), Some(dec!(150.25)));
        assert_eq!(parse_decimal("-0.8512%"), Some(dec!(-0.8512)));
        assert!(parse_decimal("invalid").is_none());
    }
}
