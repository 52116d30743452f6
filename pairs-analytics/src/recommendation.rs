//! Actionable summary of the most recent signal.

use crate::{probability::SignalRecord, signal::Signal};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Action {
    #[display("No trade")]
    NoTrade,
    #[display("{_0}")]
    Enter(Signal),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TradeRecommendation {
    pub action: Action,
    pub probability: f64,
    pub z_score: f64,
    pub prob_mean_reversion: Option<f64>,
}

/// Recommendation for the final record, or `None` for an empty sequence.
pub fn recommend(records: &[SignalRecord]) -> Option<TradeRecommendation> {
    let latest = records.last()?;

    Some(match latest.signal {
        Signal::Hold => TradeRecommendation {
            action: Action::NoTrade,
            probability: 0.0,
            z_score: latest.z_score(),
            prob_mean_reversion: None,
        },
        signal => TradeRecommendation {
            action: Action::Enter(signal),
            probability: latest.probability,
            z_score: latest.z_score(),
            prob_mean_reversion: Some(latest.prob_mean_reversion),
        },
    })
}
