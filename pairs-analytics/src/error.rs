use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

/// All errors generated in `pairs-analytics`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Error)]
pub enum AnalysisError {
    #[error("price column '{column}' not found in series {series}")]
    Schema { series: SmolStr, column: String },

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AnalysisError {
    /// Stable discriminator used by structured (non-raising) error results.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Schema { .. } => "schema",
            AnalysisError::InsufficientData(_) => "insufficient_data",
            AnalysisError::InvalidInput(_) => "invalid_input",
        }
    }

    /// Determine if the error would be resolved by choosing a different pair of series,
    /// rather than by changing analysis parameters.
    #[allow(clippy::match_like_matches_macro)]
    pub fn is_pair_mismatch(&self) -> bool {
        match self {
            AnalysisError::InsufficientData(_) => true,
            _ => false,
        }
    }
}
