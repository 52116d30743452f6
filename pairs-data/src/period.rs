use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Length of daily history to request, ending today.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize,
)]
pub enum Period {
    #[default]
    #[display("1y")]
    #[serde(rename = "1y")]
    OneYear,
    #[display("2y")]
    #[serde(rename = "2y")]
    TwoYears,
    #[display("5y")]
    #[serde(rename = "5y")]
    FiveYears,
    #[display("10y")]
    #[serde(rename = "10y")]
    TenYears,
    #[display("max")]
    #[serde(rename = "max")]
    Max,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::OneYear,
        Period::TwoYears,
        Period::FiveYears,
        Period::TenYears,
        Period::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::TenYears => "10y",
            Period::Max => "max",
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        Period::ALL
            .into_iter()
            .find(|period| period.as_str().eq_ignore_ascii_case(input))
            .ok_or_else(|| format!("unsupported period '{input}', expected one of 1y, 2y, 5y, 10y, max"))
    }
}
