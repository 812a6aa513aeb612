//! Alpha Vantage `TIME_SERIES_DAILY` body → flat [`PriceRecord`]s.
//!
//! The body is walked as a `serde_json::Value` rather than derived structs so
//! that every failure can name the exact key that was missing or malformed.

use chrono::NaiveDate;
use robo_domain::entities::price_series::PriceSeries;
use robo_domain::repositories::market_data::DailyPrices;
use robo_domain::value_objects::price_record::PriceRecord;
use serde_json::{Map, Value};
use thiserror::Error;

pub const META_DATA_KEY: &str = "Meta Data";
pub const SYMBOL_KEY: &str = "2. Symbol";
pub const LAST_REFRESHED_KEY: &str = "3. Last Refreshed";
pub const TIME_SERIES_KEY: &str = "Time Series (Daily)";

const ERROR_MESSAGE_KEY: &str = "Error Message";
const NOTICE_KEYS: [&str; 2] = ["Note", "Information"];

const OPEN_KEY: &str = "1. open";
const HIGH_KEY: &str = "2. high";
const LOW_KEY: &str = "3. low";
const CLOSE_KEY: &str = "4. close";
const VOLUME_KEY: &str = "5. volume";

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("provider returned an error: {0}")]
    Api(String),

    #[error("missing field `{0}` in response")]
    MissingField(String),

    #[error("field `{field}` is not a valid number: {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("invalid trading date {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Parses a raw response body. An `"Error Message"` payload, or a throttling
/// notice with no time series, comes back as [`ResponseError::Api`].
pub fn parse_daily_response(body: &str) -> Result<DailyPrices, ResponseError> {
    let value: Value = serde_json::from_str(body)?;
    let Some(root) = value.as_object() else {
        return Err(ResponseError::MissingField(META_DATA_KEY.to_string()));
    };

    if let Some(message) = root.get(ERROR_MESSAGE_KEY) {
        return Err(ResponseError::Api(text_of(message)));
    }

    let Some(days) = root.get(TIME_SERIES_KEY).and_then(Value::as_object) else {
        if let Some(notice) = NOTICE_KEYS.iter().find_map(|key| root.get(*key)) {
            return Err(ResponseError::Api(text_of(notice)));
        }
        return Err(ResponseError::MissingField(TIME_SERIES_KEY.to_string()));
    };

    let meta = root
        .get(META_DATA_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| ResponseError::MissingField(META_DATA_KEY.to_string()))?;
    let last_refreshed = meta
        .get(LAST_REFRESHED_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ResponseError::MissingField(format!("{META_DATA_KEY}.{LAST_REFRESHED_KEY}"))
        })?
        .to_string();
    let symbol = meta
        .get(SYMBOL_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| ResponseError::MissingField(format!("{META_DATA_KEY}.{SYMBOL_KEY}")))?
        .to_string();

    let records = days
        .iter()
        .map(|(date, prices)| parse_day(date, prices))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DailyPrices {
        series: PriceSeries::new(symbol.clone(), records),
        symbol,
        last_refreshed,
    })
}

fn parse_day(date_key: &str, prices: &Value) -> Result<PriceRecord, ResponseError> {
    let date = NaiveDate::parse_from_str(date_key, "%Y-%m-%d")
        .map_err(|_| ResponseError::InvalidDate(date_key.to_string()))?;
    let prices = prices
        .as_object()
        .ok_or_else(|| ResponseError::MissingField(format!("{TIME_SERIES_KEY}.{date_key}")))?;

    Ok(PriceRecord {
        date,
        open: price_field(prices, date_key, OPEN_KEY)?,
        high: price_field(prices, date_key, HIGH_KEY)?,
        low: price_field(prices, date_key, LOW_KEY)?,
        close: price_field(prices, date_key, CLOSE_KEY)?,
        volume: volume_field(prices, date_key)?,
    })
}

fn raw_field<'a>(
    prices: &'a Map<String, Value>,
    date_key: &str,
    key: &str,
) -> Result<(String, &'a Value), ResponseError> {
    let path = format!("{TIME_SERIES_KEY}.{date_key}.{key}");
    match prices.get(key) {
        Some(value) => Ok((path, value)),
        None => Err(ResponseError::MissingField(path)),
    }
}

fn price_field(
    prices: &Map<String, Value>,
    date_key: &str,
    key: &str,
) -> Result<f64, ResponseError> {
    let (path, value) = raw_field(prices, date_key, key)?;
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    match parsed {
        Some(price) if price.is_finite() => Ok(price),
        _ => Err(ResponseError::InvalidNumber {
            field: path,
            value: text_of(value),
        }),
    }
}

fn volume_field(prices: &Map<String, Value>, date_key: &str) -> Result<u64, ResponseError> {
    let (path, value) = raw_field(prices, date_key, VOLUME_KEY)?;
    let parsed = match value {
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    };
    parsed.ok_or_else(|| ResponseError::InvalidNumber {
        field: path,
        value: text_of(value),
    })
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Meta Data": {
            "1. Information": "Daily Prices (open, high, low, close) and Volumes",
            "2. Symbol": "MSFT",
            "3. Last Refreshed": "2019-06-14",
            "4. Output Size": "Full size",
            "5. Time Zone": "US/Eastern"
        },
        "Time Series (Daily)": {
            "2019-06-14": {
                "1. open": "132.2600",
                "2. high": "133.7900",
                "3. low": "131.6400",
                "4. close": "132.4500",
                "5. volume": "17821703"
            },
            "2019-06-13": {
                "1. open": "131.9800",
                "2. high": "132.6700",
                "3. low": "131.5600",
                "4. close": "132.3200",
                "5. volume": "17200848"
            }
        }
    }"#;

    #[test]
    fn parses_meta_and_days() {
        let parsed = parse_daily_response(SAMPLE).expect("parse");
        assert_eq!(parsed.symbol, "MSFT");
        assert_eq!(parsed.last_refreshed, "2019-06-14");
        assert_eq!(parsed.series.len(), 2);

        let latest = parsed.series.latest().expect("latest");
        assert_eq!(latest.date, NaiveDate::from_ymd_opt(2019, 6, 14).expect("date"));
        assert!((latest.open - 132.26).abs() < 1e-9);
        assert!((latest.high - 133.79).abs() < 1e-9);
        assert!((latest.low - 131.64).abs() < 1e-9);
        assert!((latest.close - 132.45).abs() < 1e-9);
        assert_eq!(latest.volume, 17_821_703);
    }

    #[test]
    fn error_message_payload_is_api_error() {
        let body = r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#;
        match parse_daily_response(body) {
            Err(ResponseError::Api(message)) => assert!(message.starts_with("Invalid API call")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn throttle_note_is_api_error() {
        let body = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#;
        assert!(matches!(
            parse_daily_response(body),
            Err(ResponseError::Api(_))
        ));
    }

    #[test]
    fn missing_time_series_names_the_key() {
        let body = r#"{"Meta Data": {"2. Symbol": "MSFT", "3. Last Refreshed": "2019-06-14"}}"#;
        let err = parse_daily_response(body).expect_err("missing series");
        assert!(matches!(&err, ResponseError::MissingField(f) if f == TIME_SERIES_KEY));
        assert!(err.to_string().contains("Time Series (Daily)"));
    }

    #[test]
    fn missing_last_refreshed_names_the_key() {
        let body = r#"{"Meta Data": {}, "Time Series (Daily)": {}}"#;
        let err = parse_daily_response(body).expect_err("missing meta field");
        assert!(err.to_string().contains("3. Last Refreshed"));
    }

    #[test]
    fn missing_symbol_names_the_key() {
        let body = r#"{
            "Meta Data": {"3. Last Refreshed": "2019-06-14"},
            "Time Series (Daily)": {}
        }"#;
        match parse_daily_response(body) {
            Err(ResponseError::MissingField(field)) => assert_eq!(field, "Meta Data.2. Symbol"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_price_field_names_date_and_key() {
        let body = r#"{
            "Meta Data": {"2. Symbol": "MSFT", "3. Last Refreshed": "2019-06-14"},
            "Time Series (Daily)": {
                "2019-06-14": {"1. open": "1", "2. high": "1", "3. low": "1", "5. volume": "1"}
            }
        }"#;
        match parse_daily_response(body) {
            Err(ResponseError::MissingField(field)) => {
                assert_eq!(field, "Time Series (Daily).2019-06-14.4. close")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let body = r#"{
            "Meta Data": {"2. Symbol": "MSFT", "3. Last Refreshed": "2019-06-14"},
            "Time Series (Daily)": {
                "2019-06-14": {"1. open": "n/a", "2. high": "1", "3. low": "1", "4. close": "1", "5. volume": "1"}
            }
        }"#;
        match parse_daily_response(body) {
            Err(ResponseError::InvalidNumber { field, value }) => {
                assert!(field.ends_with("1. open"));
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn bad_date_key_is_rejected() {
        let body = r#"{
            "Meta Data": {"2. Symbol": "MSFT", "3. Last Refreshed": "2019-06-14"},
            "Time Series (Daily)": {"06/14/2019": {}}
        }"#;
        assert!(matches!(
            parse_daily_response(body),
            Err(ResponseError::InvalidDate(_))
        ));
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(matches!(
            parse_daily_response("<html>"),
            Err(ResponseError::Json(_))
        ));
    }
}
