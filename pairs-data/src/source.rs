use crate::{error::FetchError, period::Period};
use async_trait::async_trait;
use pairs_analytics::TimeSeries;
use std::collections::HashMap;
use tracing::debug;

/// Provider of daily OHLCV history for a ticker.
///
/// Returned series always carry the standard OHLCV columns; fields the provider does
/// not supply are zero-filled rather than omitted.
#[async_trait]
pub trait PriceDataSource: Send + Sync {
    async fn fetch(&self, ticker: &str, period: Period) -> Result<TimeSeries, FetchError>;

    /// True if the provider has any history for `ticker`.
    async fn validate_ticker(&self, ticker: &str) -> bool {
        match self.fetch(ticker, Period::default()).await {
            Ok(series) => !series.is_empty(),
            Err(error) => {
                debug!(%ticker, %error, "ticker failed validation");
                false
            }
        }
    }
}

/// In-memory source serving pre-built series, ignoring the requested period.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    series: HashMap<String, TimeSeries>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `series` under its own symbol (case-insensitive).
    pub fn with_series(mut self, series: TimeSeries) -> Self {
        self.series
            .insert(series.symbol().to_ascii_uppercase(), series);
        self
    }
}

#[async_trait]
impl PriceDataSource for StaticSource {
    async fn fetch(&self, ticker: &str, _: Period) -> Result<TimeSeries, FetchError> {
        self.series
            .get(&ticker.to_ascii_uppercase())
            .filter(|series| !series.is_empty())
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                ticker: ticker.to_string(),
            })
    }
}
