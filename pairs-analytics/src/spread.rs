//! Log-return spread and its rolling z-score.
//!
//! For each aligned row after the first:
//! - log return of each leg: ln(p[t] / p[t-1])
//! - log spread: return_a - return_b
//! - rolling mean / sample std of the spread over the trailing `lookback_window` rows
//! - z-score: (spread - mean) / std
//!
//! Rows where any of these is undefined (the first row, the burn-in window, or a
//! zero-deviation window) are dropped, so the output starts once the rolling statistics
//! are fully populated.

use crate::{align::AlignedPricePair, rolling::RollingWindow};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fully populated spread statistics for one timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SpreadRecord {
    pub time: DateTime<Utc>,
    pub price_a: f64,
    pub price_b: f64,
    pub log_return_a: f64,
    pub log_return_b: f64,
    pub log_spread: f64,
    pub spread_mean: f64,
    pub spread_std: f64,
    pub z_score: f64,
}

/// Compute the spread working set for `aligned` over a trailing `lookback_window`.
pub fn compute_spreads(aligned: &AlignedPricePair, lookback_window: usize) -> Vec<SpreadRecord> {
    debug_assert!(lookback_window > 0, "lookback_window must be positive");

    let mut window = RollingWindow::new(lookback_window);
    let mut zero_std_rows = 0usize;

    let records = aligned
        .rows()
        .tuple_windows()
        .filter_map(|((_, prev_a, prev_b), (time, price_a, price_b))| {
            let log_return_a = (price_a / prev_a).ln();
            let log_return_b = (price_b / prev_b).ln();
            let log_spread = log_return_a - log_return_b;

            window.push(log_spread);
            let spread_mean = window.mean()?;
            let spread_std = window.std()?;

            if spread_std == 0.0 {
                zero_std_rows += 1;
                return None;
            }

            Some(SpreadRecord {
                time,
                price_a,
                price_b,
                log_return_a,
                log_return_b,
                log_spread,
                spread_mean,
                spread_std,
                z_score: (log_spread - spread_mean) / spread_std,
            })
        })
        .collect::<Vec<_>>();

    debug!(
        aligned = aligned.len(),
        lookback_window,
        usable = records.len(),
        zero_std_rows,
        "computed log-spread z-scores"
    );

    records
}

/// Spread levels equivalent to the z-score threshold, using the average rolling
/// deviation across the working set.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SpreadBands {
    pub mean_spread_std: f64,
    pub upper: f64,
    pub lower: f64,
}

impl SpreadBands {
    pub fn from_records(records: &[SpreadRecord], z_score_threshold: f64) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let mean_spread_std =
            records.iter().map(|record| record.spread_std).sum::<f64>() / records.len() as f64;
        let upper = z_score_threshold * mean_spread_std;
        Some(Self {
            mean_spread_std,
            upper,
            lower: -upper,
        })
    }
}
