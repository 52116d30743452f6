//! # Pairs-Analytics
//! Statistical pair-trading analytics over two daily price histories.
//!
//! The pipeline runs strictly forward over immutable inputs:
//! - [`align`](align::align): inner-join two [`TimeSeries`](series::TimeSeries) on timestamp.
//! - [`correlation`]: Pearson correlation and a readiness tier, reported as a
//!   status-tagged [`CorrelationOutcome`](correlation::CorrelationOutcome).
//! - [`spread`]: log returns, log spread and its rolling z-score, with burn-in rows dropped.
//! - [`signal`]: strict-threshold Hold / Long_A_Short_B / Short_A_Long_B classification.
//! - [`probability`]: normal-CDF confidence and mean-reversion scores.
//! - [`performance`]: next-record follow-through of every trade event.
//!
//! [`PairAnalyzer`](pipeline::PairAnalyzer) runs all stages for a single request.

/// All [`Error`](std::error::Error)s generated in Pairs-Analytics.
pub mod error;

/// Analysis parameters and their environment overrides.
pub mod config;

/// Columnar OHLCV [`TimeSeries`](series::TimeSeries).
pub mod series;

pub mod align;
pub mod correlation;
pub mod performance;
pub mod pipeline;
pub mod probability;
pub mod recommendation;
pub mod rolling;
pub mod signal;
pub mod spread;

pub use config::AnalysisConfig;
pub use correlation::{CorrelationOutcome, ReadinessTier};
pub use error::AnalysisError;
pub use pipeline::{AnalysisReport, AnalysisRequest, PairAnalyzer};
pub use probability::SignalRecord;
pub use series::{Candle, TimeSeries};
pub use signal::Signal;
