//! Daily OHLCV price history for a single instrument.
//!
//! Series are stored column-wise so any named field can be extracted as a price column.

use crate::error::AnalysisError;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Standard column names every fetched series carries.
pub const OPEN: &str = "Open";
pub const HIGH: &str = "High";
pub const LOW: &str = "Low";
pub const CLOSE: &str = "Close";
pub const VOLUME: &str = "Volume";
pub const DIVIDENDS: &str = "Dividends";
pub const STOCK_SPLITS: &str = "Stock Splits";

/// A single OHLCV bar
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub dividends: f64,
    pub stock_splits: f64,
}

impl Candle {
    /// Bar with every field set to `price`, zero volume and no corporate actions.
    pub fn flat(time: DateTime<Utc>, price: f64) -> Self {
        Self {
            time,
            open: price,
            high: price,
            low: price,
            close: price,
            volume: 0.0,
            dividends: 0.0,
            stock_splits: 0.0,
        }
    }
}

/// Ordered, immutable price history with strictly increasing timestamps.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TimeSeries {
    symbol: SmolStr,
    index: Vec<DateTime<Utc>>,
    columns: IndexMap<SmolStr, Vec<f64>>,
}

impl TimeSeries {
    /// Construct a series, checking the index is strictly increasing and every column
    /// has one value per timestamp.
    pub fn new(
        symbol: impl Into<SmolStr>,
        index: Vec<DateTime<Utc>>,
        columns: IndexMap<SmolStr, Vec<f64>>,
    ) -> Result<Self, AnalysisError> {
        let symbol = symbol.into();

        if let Some(pair) = index.windows(2).find(|pair| pair[1] <= pair[0]) {
            return Err(AnalysisError::InvalidInput(format!(
                "series {symbol} timestamps not strictly increasing at {}",
                pair[1]
            )));
        }

        if let Some((name, values)) = columns.iter().find(|(_, values)| values.len() != index.len())
        {
            return Err(AnalysisError::InvalidInput(format!(
                "series {symbol} column '{name}' has {} values for {} timestamps",
                values.len(),
                index.len()
            )));
        }

        Ok(Self {
            symbol,
            index,
            columns,
        })
    }

    /// Construct a series carrying every standard OHLCV column.
    pub fn from_candles(
        symbol: impl Into<SmolStr>,
        candles: &[Candle],
    ) -> Result<Self, AnalysisError> {
        let extract = |field: fn(&Candle) -> f64| candles.iter().map(field).collect::<Vec<_>>();

        let columns = IndexMap::from([
            (SmolStr::new_static(OPEN), extract(|c: &Candle| c.open)),
            (SmolStr::new_static(HIGH), extract(|c: &Candle| c.high)),
            (SmolStr::new_static(LOW), extract(|c: &Candle| c.low)),
            (SmolStr::new_static(CLOSE), extract(|c: &Candle| c.close)),
            (SmolStr::new_static(VOLUME), extract(|c: &Candle| c.volume)),
            (SmolStr::new_static(DIVIDENDS), extract(|c: &Candle| c.dividends)),
            (SmolStr::new_static(STOCK_SPLITS), extract(|c: &Candle| c.stock_splits)),
        ]);

        Self::new(symbol, candles.iter().map(|c| c.time).collect(), columns)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// Values of the named column, or `None` if the series does not carry it.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(SmolStr::as_str)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
