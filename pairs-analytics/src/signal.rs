//! Discrete trading signals from spread z-scores.

use crate::spread::SpreadRecord;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Position implied by the current spread deviation.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Signal {
    #[default]
    #[display("Hold")]
    Hold,
    /// Spread unusually low: buy A, sell B
    #[serde(rename = "Long_A_Short_B")]
    #[display("Long_A_Short_B")]
    LongAShortB,
    /// Spread unusually high: sell A, buy B
    #[serde(rename = "Short_A_Long_B")]
    #[display("Short_A_Long_B")]
    ShortALongB,
}

impl Signal {
    /// Strict comparison: a z-score exactly at ±threshold holds.
    pub fn from_z_score(z_score: f64, threshold: f64) -> Self {
        if z_score > threshold {
            Signal::ShortALongB
        } else if z_score < -threshold {
            Signal::LongAShortB
        } else {
            Signal::Hold
        }
    }

    pub fn is_directional(&self) -> bool {
        !matches!(self, Signal::Hold)
    }
}

/// Spread record with its classified signal.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ClassifiedSpread {
    #[serde(flatten)]
    pub spread: SpreadRecord,
    pub signal: Signal,
    /// Signal differs from the preceding record's (always true for the first record)
    pub signal_changed: bool,
}

/// Classify every record in timestamp order, flagging transitions.
pub fn classify(records: &[SpreadRecord], threshold: f64) -> Vec<ClassifiedSpread> {
    debug_assert!(threshold > 0.0, "z-score threshold must be positive");

    let mut previous: Option<Signal> = None;
    let classified = records
        .iter()
        .map(|spread| {
            let signal = Signal::from_z_score(spread.z_score, threshold);
            let signal_changed = previous != Some(signal);
            previous = Some(signal);
            ClassifiedSpread {
                spread: *spread,
                signal,
                signal_changed,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        records = classified.len(),
        transitions = classified.iter().filter(|record| record.signal_changed).count(),
        threshold,
        "classified spread signals"
    );

    classified
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn spread(n: i64, z_score: f64) -> SpreadRecord {
        SpreadRecord {
            time: Utc.timestamp_opt(1_700_000_000 + n * 86_400, 0).unwrap(),
            price_a: 1.0,
            price_b: 1.0,
            log_return_a: 0.0,
            log_return_b: 0.0,
            log_spread: 0.0,
            spread_mean: 0.0,
            spread_std: 1.0,
            z_score,
        }
    }

    #[test]
    fn test_signal_threshold_boundaries() {
        struct TestCase {
            input: f64,
            expected: Signal,
        }

        let tests = vec![
            TestCase {
                // TC0
                input: 2.0,
                expected: Signal::Hold,
            },
            TestCase {
                // TC1
                input: -2.0,
                expected: Signal::Hold,
            },
            TestCase {
                // TC2
                input: 2.0001,
                expected: Signal::ShortALongB,
            },
            TestCase {
                // TC3
                input: -2.0001,
                expected: Signal::LongAShortB,
            },
            TestCase {
                // TC4
                input: 0.0,
                expected: Signal::Hold,
            },
            TestCase {
                // TC5
                input: 1.9999,
                expected: Signal::Hold,
            },
            TestCase {
                // TC6
                input: 7.5,
                expected: Signal::ShortALongB,
            },
            TestCase {
                // TC7
                input: -7.5,
                expected: Signal::LongAShortB,
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = Signal::from_z_score(test.input, 2.0);
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_classify_tracks_transitions() {
        let records = [0.5, 0.7, 2.5, 3.0, 1.0, -2.5, -2.6, -0.1]
            .iter()
            .enumerate()
            .map(|(n, &z)| spread(n as i64, z))
            .collect::<Vec<_>>();

        let classified = classify(&records, 2.0);
        let signals = classified.iter().map(|r| r.signal).collect::<Vec<_>>();
        let changed = classified.iter().map(|r| r.signal_changed).collect::<Vec<_>>();

        assert_eq!(
            signals,
            vec![
                Signal::Hold,
                Signal::Hold,
                Signal::ShortALongB,
                Signal::ShortALongB,
                Signal::Hold,
                Signal::LongAShortB,
                Signal::LongAShortB,
                Signal::Hold,
            ]
        );
        assert_eq!(
            changed,
            vec![true, false, true, false, true, true, false, true]
        );
    }

    #[test]
    fn test_first_record_counts_as_changed() {
        let classified = classify(&[spread(0, 0.0)], 1.0);
        assert!(classified[0].signal_changed);
        assert!(classify(&[], 1.0).is_empty());
    }

    #[test]
    fn test_signal_names() {
        assert_eq!(Signal::LongAShortB.to_string(), "Long_A_Short_B");
        assert_eq!(
            serde_json::to_string(&Signal::ShortALongB).unwrap(),
            "\"Short_A_Long_B\""
        );
        assert_eq!(serde_json::to_string(&Signal::Hold).unwrap(), "\"Hold\"");
    }
}
