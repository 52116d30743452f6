//! One-shot pair analysis: align, score correlation, build spreads, classify, score
//! probabilities and evaluate trade events.
//!
//! Every run owns its derived tables; nothing is shared between runs, so identical
//! requests produce identical reports.

use crate::{
    align::align,
    config::AnalysisConfig,
    correlation::{CorrelationOutcome, score_aligned},
    error::AnalysisError,
    performance::{PerformanceMetrics, TradeOutcome, evaluate, trade_outcomes},
    probability::{SignalRecord, score},
    recommendation::{TradeRecommendation, recommend},
    series::TimeSeries,
    signal::classify,
    spread::{SpreadBands, compute_spreads},
};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use tracing::info;

/// Two price histories plus the parameters to analyse them with.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisRequest {
    pub series_a: TimeSeries,
    pub series_b: TimeSeries,
    pub config: AnalysisConfig,
}

/// Structured output of a pair analysis, free of any rendering concerns.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalysisReport {
    pub symbol_a: SmolStr,
    pub symbol_b: SmolStr,
    pub config: AnalysisConfig,
    pub aligned_rows: usize,
    pub correlation: CorrelationOutcome,
    pub records: Vec<SignalRecord>,
    pub trades: Vec<TradeOutcome>,
    pub metrics: PerformanceMetrics,
    pub bands: Option<SpreadBands>,
    pub recommendation: Option<TradeRecommendation>,
    /// Both legs rebased to 100 at the first aligned row
    pub normalized_a: Vec<f64>,
    pub normalized_b: Vec<f64>,
}

impl AnalysisReport {
    /// Records where the signal changed, in timestamp order.
    pub fn signal_changes(&self) -> impl Iterator<Item = &SignalRecord> {
        self.records.iter().filter(|record| record.signal_changed)
    }
}

/// Runs the signal pipeline for a validated [`AnalysisConfig`].
#[derive(Debug, Clone)]
pub struct PairAnalyzer {
    config: AnalysisConfig,
}

impl PairAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Convenience wrapper for a self-contained request.
    pub fn analyze(request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        Self::new(request.config.clone())?.run(&request.series_a, &request.series_b)
    }

    pub fn run(
        &self,
        series_a: &TimeSeries,
        series_b: &TimeSeries,
    ) -> Result<AnalysisReport, AnalysisError> {
        let config = &self.config;
        info!(
            symbol_a = series_a.symbol(),
            symbol_b = series_b.symbol(),
            price_column = %config.price_column,
            lookback_window = config.lookback_window,
            z_score_threshold = config.z_score_threshold,
            "running pair analysis"
        );

        let aligned = align(series_a, series_b, &config.price_column)?;
        let correlation = score_aligned(&aligned);

        let spreads = compute_spreads(&aligned, config.lookback_window);
        if spreads.is_empty() {
            return Err(AnalysisError::InsufficientData(format!(
                "{} aligned rows leave no usable records for lookback_window {}",
                aligned.len(),
                config.lookback_window
            )));
        }

        let records = score(&classify(&spreads, config.z_score_threshold));
        let trades = trade_outcomes(&records);
        let metrics = evaluate(&records);
        let bands = SpreadBands::from_records(&spreads, config.z_score_threshold);
        let recommendation = recommend(&records);
        let (normalized_a, normalized_b) = aligned.normalized(100.0);

        info!(
            aligned_rows = aligned.len(),
            usable_rows = records.len(),
            total_trades = metrics.total_trades,
            success_rate = metrics.success_rate,
            "pair analysis complete"
        );

        Ok(AnalysisReport {
            symbol_a: aligned.symbol_a.clone(),
            symbol_b: aligned.symbol_b.clone(),
            config: config.clone(),
            aligned_rows: aligned.len(),
            correlation,
            records,
            trades,
            metrics,
            bands,
            recommendation,
            normalized_a,
            normalized_b,
        })
    }
}
