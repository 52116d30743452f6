//! Pearson correlation of an aligned price pair and its trading-readiness tier.

use crate::{
    align::{AlignedPricePair, MIN_ALIGNED_ROWS, align},
    error::AnalysisError,
    series::TimeSeries,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// |r| at or above which a pair is ready to trade.
pub const HIGH_CORRELATION: f64 = 0.8;

/// |r| at or above which a pair is tradeable but not ideal.
pub const MEDIUM_CORRELATION: f64 = 0.5;

/// Strength of the price relationship between two assets.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ReadinessTier {
    High,
    Medium,
    Low,
}

impl ReadinessTier {
    /// Classify on |correlation|; sign is irrelevant since either leg can be shorted.
    pub fn from_correlation(correlation: f64) -> Self {
        let strength = correlation.abs();
        if strength >= HIGH_CORRELATION {
            ReadinessTier::High
        } else if strength >= MEDIUM_CORRELATION {
            ReadinessTier::Medium
        } else {
            ReadinessTier::Low
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            ReadinessTier::High => "Ready to trade - Strong correlation",
            ReadinessTier::Medium => "Can find better trade - Moderate correlation",
            ReadinessTier::Low => "Search for better pairs - Weak correlation",
        }
    }
}

/// Status-tagged correlation result. Failures are reported as a value so presentation
/// code can branch on `status` instead of handling a propagated error.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CorrelationOutcome {
    Success {
        correlation: f64,
        assessment: ReadinessTier,
        recommendation: String,
    },
    Error {
        kind: String,
        message: String,
    },
}

impl CorrelationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CorrelationOutcome::Success { .. })
    }

    pub fn correlation(&self) -> Option<f64> {
        match self {
            CorrelationOutcome::Success { correlation, .. } => Some(*correlation),
            CorrelationOutcome::Error { .. } => None,
        }
    }
}

impl From<Result<f64, AnalysisError>> for CorrelationOutcome {
    fn from(result: Result<f64, AnalysisError>) -> Self {
        match result {
            Ok(correlation) => {
                let assessment = ReadinessTier::from_correlation(correlation);
                CorrelationOutcome::Success {
                    correlation,
                    assessment,
                    recommendation: assessment.recommendation().to_string(),
                }
            }
            Err(error) => CorrelationOutcome::Error {
                kind: error.kind().to_string(),
                message: error.to_string(),
            },
        }
    }
}

/// Pearson correlation coefficient
/// Returns value from -1.0 to +1.0, or `None` if the inputs differ in length, have
/// fewer than two points, or either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < MIN_ALIGNED_ROWS {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (x, y) in xs.iter().zip(ys) {
        let diff_x = x - mean_x;
        let diff_y = y - mean_y;
        cov += diff_x * diff_y;
        var_x += diff_x * diff_x;
        var_y += diff_y * diff_y;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    // Rounding can push |r| marginally past 1
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Correlation of the two aligned price columns.
pub fn correlation(aligned: &AlignedPricePair) -> Result<f64, AnalysisError> {
    pearson(&aligned.price_a, &aligned.price_b).ok_or_else(|| {
        AnalysisError::InsufficientData(format!(
            "correlation undefined for {}/{}: a price column has zero variance",
            aligned.symbol_a, aligned.symbol_b
        ))
    })
}

/// Align two series and score their correlation, reporting any failure as an
/// [`CorrelationOutcome::Error`].
pub fn score_pair(
    series_a: &TimeSeries,
    series_b: &TimeSeries,
    price_column: &str,
) -> CorrelationOutcome {
    let outcome = CorrelationOutcome::from(
        align(series_a, series_b, price_column).and_then(|aligned| correlation(&aligned)),
    );
    log_outcome(&outcome);
    outcome
}

/// Score an already aligned pair.
pub fn score_aligned(aligned: &AlignedPricePair) -> CorrelationOutcome {
    let outcome = CorrelationOutcome::from(correlation(aligned));
    log_outcome(&outcome);
    outcome
}

fn log_outcome(outcome: &CorrelationOutcome) {
    match outcome {
        CorrelationOutcome::Success {
            correlation,
            assessment,
            ..
        } => debug!(correlation, %assessment, "scored pair correlation"),
        CorrelationOutcome::Error { kind, message } => {
            warn!(%kind, %message, "pair correlation unavailable")
        }
    }
}
