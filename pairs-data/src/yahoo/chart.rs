//! Yahoo Finance v8 chart payload and its conversion into a [`TimeSeries`].

use crate::error::FetchError;
use chrono::{DateTime, Utc};
use pairs_analytics::{Candle, TimeSeries};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

const SECONDS_PER_DAY: i64 = 86_400;

/// Error code Yahoo returns for unknown or delisted symbols.
const NOT_FOUND_CODE: &str = "Not Found";

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub timestamp: Vec<i64>,
    #[serde(default)]
    pub events: Option<ChartEvents>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartMeta {
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartEvents {
    #[serde(default)]
    pub dividends: HashMap<String, DividendEvent>,
    #[serde(default)]
    pub splits: HashMap<String, SplitEvent>,
}

#[derive(Debug, Deserialize)]
pub struct DividendEvent {
    pub amount: f64,
    pub date: i64,
}

#[derive(Debug, Deserialize)]
pub struct SplitEvent {
    pub date: i64,
    pub numerator: f64,
    pub denominator: f64,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

/// Column-wise bar values; any entry may be null.
#[derive(Debug, Default, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

/// Midnight UTC of the exchange-local calendar day containing `timestamp`, so that
/// daily bars from different exchanges line up on date.
pub fn trading_day(timestamp: i64, gmtoffset: i64) -> Option<DateTime<Utc>> {
    let local = timestamp + gmtoffset;
    DateTime::from_timestamp(local.div_euclid(SECONDS_PER_DAY) * SECONDS_PER_DAY, 0)
}

fn value_at(column: &[Option<f64>], index: usize) -> Option<f64> {
    column.get(index).copied().flatten()
}

/// Convert a chart payload into a daily series.
///
/// Bars without a close are skipped; other missing fields and days without corporate
/// actions are zero. When two bars fall on the same day the later one wins.
pub fn into_series(ticker: &str, response: ChartResponse) -> Result<TimeSeries, FetchError> {
    let chart = response.chart;

    if let Some(error) = chart.error {
        return Err(if error.code == NOT_FOUND_CODE {
            FetchError::NotFound {
                ticker: ticker.to_string(),
            }
        } else {
            FetchError::Api {
                ticker: ticker.to_string(),
                message: error.description.unwrap_or(error.code),
            }
        });
    }

    let not_found = || FetchError::NotFound {
        ticker: ticker.to_string(),
    };

    let result = chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(not_found)?;
    let gmtoffset = result.meta.gmtoffset;
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut candles = BTreeMap::new();
    for (index, &timestamp) in result.timestamp.iter().enumerate() {
        let Some(close) = value_at(&quote.close, index) else {
            continue;
        };
        let Some(time) = trading_day(timestamp, gmtoffset) else {
            continue;
        };
        candles.insert(
            time,
            Candle {
                time,
                open: value_at(&quote.open, index).unwrap_or(0.0),
                high: value_at(&quote.high, index).unwrap_or(0.0),
                low: value_at(&quote.low, index).unwrap_or(0.0),
                close,
                volume: value_at(&quote.volume, index).unwrap_or(0.0),
                dividends: 0.0,
                stock_splits: 0.0,
            },
        );
    }

    let events = result.events.unwrap_or_default();
    for dividend in events.dividends.values() {
        let Some(time) = trading_day(dividend.date, gmtoffset) else {
            continue;
        };
        if let Some(candle) = candles.get_mut(&time) {
            candle.dividends += dividend.amount;
        }
    }
    for split in events.splits.values() {
        let Some(time) = trading_day(split.date, gmtoffset) else {
            continue;
        };
        if let Some(candle) = candles.get_mut(&time).filter(|_| split.denominator != 0.0) {
            candle.stock_splits = split.numerator / split.denominator;
        }
    }

    if candles.is_empty() {
        return Err(not_found());
    }

    let candles = candles.into_values().collect::<Vec<_>>();
    TimeSeries::from_candles(ticker, &candles).map_err(|source| FetchError::InvalidSeries {
        ticker: ticker.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pairs_analytics::series::{CLOSE, DIVIDENDS, OPEN, STOCK_SPLITS, VOLUME};

    // Three NYSE sessions (14:30 UTC opens, gmtoffset -5h), the middle one missing a
    // close, and a trailing intraday bar for the last session.
    const AAPL_CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL", "gmtoffset": -18000 },
                "timestamp": [1704205800, 1704292200, 1704378600, 1704398400],
                "events": {
                    "dividends": { "1704378600": { "amount": 0.24, "date": 1704378600 } },
                    "splits": { "1704205800": { "date": 1704205800, "numerator": 4, "denominator": 1, "splitRatio": "4:1" } }
                },
                "indicators": {
                    "quote": [{
                        "open":   [187.15, 184.22, null, 182.0],
                        "high":   [188.44, 185.88, 183.09, 182.5],
                        "low":    [183.89, 183.43, 180.88, 181.2],
                        "close":  [185.64, null, 181.91, 182.1],
                        "volume": [82488700, 58414500, 71983600, null]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    const NOT_FOUND_CHART: &str = r#"{
        "chart": {
            "result": null,
            "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
        }
    }"#;

    fn parse(json: &str) -> ChartResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_trading_day_uses_exchange_calendar() {
        // 2024-01-02 14:30 UTC is 09:30 New York
        let day = trading_day(1_704_205_800, -18_000).unwrap();
        assert_eq!(day, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());

        // 2024-01-02 03:00 UTC is still 2024-01-01 in New York
        let day = trading_day(1_704_164_400, -18_000).unwrap();
        assert_eq!(day, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_into_series() {
        let series = into_series("AAPL", parse(AAPL_CHART)).unwrap();

        assert_eq!(series.symbol(), "AAPL");
        assert_eq!(
            series.index(),
            &[
                Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap(),
            ]
        );
        // Later bar on 2024-01-04 replaces the session bar
        assert_eq!(series.column(CLOSE), Some(&[185.64, 182.1][..]));
        assert_eq!(series.column(OPEN), Some(&[187.15, 182.0][..]));
        assert_eq!(series.column(VOLUME), Some(&[82_488_700.0, 0.0][..]));
        assert_eq!(series.column(DIVIDENDS), Some(&[0.0, 0.24][..]));
        assert_eq!(series.column(STOCK_SPLITS), Some(&[4.0, 0.0][..]));
    }

    #[test]
    fn test_into_series_not_found() {
        let error = into_series("ZZZZ", parse(NOT_FOUND_CHART)).unwrap_err();
        assert_eq!(
            error,
            FetchError::NotFound {
                ticker: "ZZZZ".to_string()
            }
        );
    }

    #[test]
    fn test_into_series_errors() {
        struct TestCase {
            input: &'static str,
            expected: FetchError,
        }

        let tests = vec![
            TestCase {
                // TC0: empty result list
                input: r#"{"chart": {"result": [], "error": null}}"#,
                expected: FetchError::NotFound {
                    ticker: "X".to_string(),
                },
            },
            TestCase {
                // TC1: every close is null
                input: r#"{"chart": {"result": [{
                    "meta": {"gmtoffset": 0},
                    "timestamp": [1704205800],
                    "indicators": {"quote": [{"close": [null]}]}
                }]}}"#,
                expected: FetchError::NotFound {
                    ticker: "X".to_string(),
                },
            },
            TestCase {
                // TC2: other API error codes are surfaced with their description
                input: r#"{"chart": {"result": null, "error": {"code": "Bad Request", "description": "Invalid input - interval=1d is not supported"}}}"#,
                expected: FetchError::Api {
                    ticker: "X".to_string(),
                    message: "Invalid input - interval=1d is not supported".to_string(),
                },
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = into_series("X", parse(test.input)).unwrap_err();
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }
}
