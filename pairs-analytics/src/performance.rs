//! Retrospective scoring of trade events.
//!
//! A trade event is a record whose signal just changed to a directional value. It
//! succeeds when the very next record (in the full sequence, not the next trade event)
//! moves its z-score in the direction the trade expects: up after Long_A_Short_B,
//! down after Short_A_Long_B.
//!
//! A trade event on the final record has no look-ahead. It still counts towards
//! `total_trades` and `avg_probability` but is excluded from the success-rate
//! denominator.

use crate::{probability::SignalRecord, signal::Signal};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of a single trade event.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TradeOutcome {
    /// Position of the event in the full record sequence
    pub position: usize,
    pub time: DateTime<Utc>,
    pub signal: Signal,
    pub probability: f64,
    /// `None` when no following record exists
    pub success: Option<bool>,
}

/// Aggregate signal quality over a run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct PerformanceMetrics {
    pub total_trades: usize,
    /// Trades with a following record to judge against
    pub evaluated_trades: usize,
    pub successful_trades: usize,
    pub success_rate: f64,
    pub avg_probability: f64,
}

/// Judge every trade event in `records` against the record that follows it.
pub fn trade_outcomes(records: &[SignalRecord]) -> Vec<TradeOutcome> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.is_trade_event())
        .map(|(position, record)| {
            let success = records.get(position + 1).map(|next| {
                let (now, later) = (record.z_score(), next.z_score());
                match record.signal {
                    Signal::LongAShortB => later > now,
                    Signal::ShortALongB => later < now,
                    Signal::Hold => false,
                }
            });

            TradeOutcome {
                position,
                time: record.spread.time,
                signal: record.signal,
                probability: record.probability,
                success,
            }
        })
        .collect()
}

/// Aggregate trade outcomes, reporting zeros when there is nothing to average.
pub fn evaluate(records: &[SignalRecord]) -> PerformanceMetrics {
    let outcomes = trade_outcomes(records);

    let total_trades = outcomes.len();
    let evaluated_trades = outcomes.iter().filter(|o| o.success.is_some()).count();
    let successful_trades = outcomes.iter().filter(|o| o.success == Some(true)).count();

    let success_rate = if evaluated_trades > 0 {
        successful_trades as f64 / evaluated_trades as f64
    } else {
        0.0
    };
    let avg_probability = if total_trades > 0 {
        outcomes.iter().map(|o| o.probability).sum::<f64>() / total_trades as f64
    } else {
        0.0
    };

    let metrics = PerformanceMetrics {
        total_trades,
        evaluated_trades,
        successful_trades,
        success_rate,
        avg_probability,
    };
    debug!(?metrics, "evaluated trade events");
    metrics
}
