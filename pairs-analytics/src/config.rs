//! Analysis parameters.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Default price column extracted from each series.
pub const DEFAULT_PRICE_COLUMN: &str = "Close";

/// Default number of trailing log-spread observations in the rolling window.
pub const DEFAULT_LOOKBACK_WINDOW: usize = 30;

/// Default absolute z-score beyond which a directional signal is emitted.
pub const DEFAULT_Z_SCORE_THRESHOLD: f64 = 2.0;

/// Parameters accepted by [`PairAnalyzer`](crate::pipeline::PairAnalyzer).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Column extracted from both series (e.g. "Close")
    pub price_column: String,
    /// Rolling window length for spread mean / std
    pub lookback_window: usize,
    /// Strict z-score threshold for entering a position
    pub z_score_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            price_column: DEFAULT_PRICE_COLUMN.to_string(),
            lookback_window: DEFAULT_LOOKBACK_WINDOW,
            z_score_threshold: DEFAULT_Z_SCORE_THRESHOLD,
        }
    }
}

impl AnalysisConfig {
    /// Build a configuration from `PAIRS_PRICE_COLUMN`, `PAIRS_LOOKBACK_WINDOW` and
    /// `PAIRS_Z_THRESHOLD`, falling back to defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            price_column: std::env::var("PAIRS_PRICE_COLUMN")
                .ok()
                .filter(|column| !column.trim().is_empty())
                .unwrap_or(defaults.price_column),
            lookback_window: env_or("PAIRS_LOOKBACK_WINDOW", defaults.lookback_window),
            z_score_threshold: env_or("PAIRS_Z_THRESHOLD", defaults.z_score_threshold),
        }
    }

    /// Set price column
    pub fn with_price_column(mut self, column: impl Into<String>) -> Self {
        self.price_column = column.into();
        self
    }

    /// Set lookback window
    pub fn with_lookback_window(mut self, window: usize) -> Self {
        self.lookback_window = window;
        self
    }

    /// Set z-score threshold
    pub fn with_z_score_threshold(mut self, threshold: f64) -> Self {
        self.z_score_threshold = threshold;
        self
    }

    /// Reject parameters the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.price_column.trim().is_empty() {
            return Err(AnalysisError::InvalidInput(
                "price_column must not be empty".to_string(),
            ));
        }
        if self.lookback_window == 0 {
            return Err(AnalysisError::InvalidInput(
                "lookback_window must be a positive integer".to_string(),
            ));
        }
        if !self.z_score_threshold.is_finite() || self.z_score_threshold <= 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "z_score_threshold must be a positive number, got {}",
                self.z_score_threshold
            )));
        }
        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(%key, %raw, %default, "unparsable environment value, using default");
            default
        }),
        Err(_) => default,
    }
}
