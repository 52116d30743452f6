//! Inner-join of two price series on their shared timestamps.

use crate::{error::AnalysisError, series::TimeSeries};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::cmp::Ordering;
use tracing::debug;

/// Minimum number of overlapping rows for any pair statistic.
pub const MIN_ALIGNED_ROWS: usize = 2;

/// Paired price table restricted to timestamps present in both input series.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AlignedPricePair {
    pub symbol_a: SmolStr,
    pub symbol_b: SmolStr,
    pub price_column: String,
    pub index: Vec<DateTime<Utc>>,
    pub price_a: Vec<f64>,
    pub price_b: Vec<f64>,
}

impl AlignedPricePair {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterate `(timestamp, price_a, price_b)` rows in timestamp order.
    pub fn rows(&self) -> impl Iterator<Item = (DateTime<Utc>, f64, f64)> + '_ {
        self.index
            .iter()
            .zip(self.price_a.iter().zip(&self.price_b))
            .map(|(time, (a, b))| (*time, *a, *b))
    }

    /// Both legs rebased so the first aligned row equals `base`.
    pub fn normalized(&self, base: f64) -> (Vec<f64>, Vec<f64>) {
        let rebase = |prices: &[f64]| -> Vec<f64> {
            match prices.first() {
                Some(&first) => prices.iter().map(|price| price / first * base).collect(),
                None => Vec::new(),
            }
        };
        (rebase(&self.price_a), rebase(&self.price_b))
    }
}

/// Align `series_a` and `series_b` on timestamp equality, extracting `price_column`
/// from each.
///
/// Both indexes are strictly increasing, so the join is a single merge pass.
pub fn align(
    series_a: &TimeSeries,
    series_b: &TimeSeries,
    price_column: &str,
) -> Result<AlignedPricePair, AnalysisError> {
    if series_a.is_empty() || series_b.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Input data cannot be None or empty".to_string(),
        ));
    }

    let column_a = price_column_of(series_a, price_column)?;
    let column_b = price_column_of(series_b, price_column)?;

    let (index_a, index_b) = (series_a.index(), series_b.index());
    let capacity = index_a.len().min(index_b.len());
    let mut index = Vec::with_capacity(capacity);
    let mut price_a = Vec::with_capacity(capacity);
    let mut price_b = Vec::with_capacity(capacity);

    let (mut i, mut j) = (0, 0);
    while i < index_a.len() && j < index_b.len() {
        match index_a[i].cmp(&index_b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                let (a, b) = (column_a[i], column_b[j]);
                if !is_valid_price(a) || !is_valid_price(b) {
                    return Err(AnalysisError::InvalidInput(format!(
                        "non-positive or non-finite {price_column} at {}: {}={a}, {}={b}",
                        index_a[i],
                        series_a.symbol(),
                        series_b.symbol()
                    )));
                }
                index.push(index_a[i]);
                price_a.push(a);
                price_b.push(b);
                i += 1;
                j += 1;
            }
        }
    }

    debug!(
        symbol_a = series_a.symbol(),
        symbol_b = series_b.symbol(),
        rows_a = series_a.len(),
        rows_b = series_b.len(),
        aligned = index.len(),
        "aligned price series"
    );

    if index.len() < MIN_ALIGNED_ROWS {
        return Err(AnalysisError::InsufficientData(format!(
            "{} overlapping data points; at least {MIN_ALIGNED_ROWS} are needed to calculate \
             correlation. Choose stocks from the same index",
            index.len()
        )));
    }

    Ok(AlignedPricePair {
        symbol_a: SmolStr::new(series_a.symbol()),
        symbol_b: SmolStr::new(series_b.symbol()),
        price_column: price_column.to_string(),
        index,
        price_a,
        price_b,
    })
}

fn price_column_of<'a>(
    series: &'a TimeSeries,
    price_column: &str,
) -> Result<&'a [f64], AnalysisError> {
    series
        .column(price_column)
        .ok_or_else(|| AnalysisError::Schema {
            series: SmolStr::new(series.symbol()),
            column: price_column.to_string(),
        })
}

fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}
