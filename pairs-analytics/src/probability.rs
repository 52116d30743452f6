//! Normal-CDF confidence scores for classified signals.
//!
//! These are descriptive scores derived from the z-score under a standard normal
//! assumption, not calibrated forecasts.

use crate::{
    signal::{ClassifiedSpread, Signal},
    spread::SpreadRecord,
};
use serde::{Deserialize, Serialize};
use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;

/// Final per-timestamp output of the signal pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SignalRecord {
    #[serde(flatten)]
    pub spread: SpreadRecord,
    pub signal: Signal,
    pub signal_changed: bool,
    /// Signal confidence; exactly 0 for Hold
    pub probability: f64,
    /// Tail probability of the current deviation, in (0, 0.5]
    pub prob_mean_reversion: f64,
}

impl SignalRecord {
    pub fn z_score(&self) -> f64 {
        self.spread.z_score
    }

    /// Opening of a new directional position.
    pub fn is_trade_event(&self) -> bool {
        self.signal_changed && self.signal.is_directional()
    }
}

/// Standard normal cumulative distribution function.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// Confidence in `signal` given the z-score that produced it.
///
/// Upper tails are taken as Φ(-z) rather than 1 - Φ(z), which rounds to zero past z ≈ 8.3.
pub fn signal_probability(signal: Signal, z_score: f64) -> f64 {
    match signal {
        Signal::LongAShortB => normal_cdf(z_score),
        Signal::ShortALongB => normal_cdf(-z_score),
        Signal::Hold => 0.0,
    }
}

/// Probability mass beyond the current deviation on its own side of the mean.
pub fn mean_reversion_probability(z_score: f64) -> f64 {
    normal_cdf(-z_score.abs())
}

/// Attach probabilities to every classified record.
pub fn score(classified: &[ClassifiedSpread]) -> Vec<SignalRecord> {
    classified
        .iter()
        .map(|record| SignalRecord {
            spread: record.spread,
            signal: record.signal,
            signal_changed: record.signal_changed,
            probability: signal_probability(record.signal, record.spread.z_score),
            prob_mean_reversion: mean_reversion_probability(record.spread.z_score),
        })
        .collect()
}
