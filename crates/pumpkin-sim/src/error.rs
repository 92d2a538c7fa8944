use pumpkin_core::{ErrorCode, PumpkinError};

use crate::method::Method;

/// Errors raised by the similarity engines and search.
///
/// Numeric degeneracies (empty profiles, zero norms) are not errors; they
/// score 0.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("{what} is not supported")]
    Unsupported { what: String },

    #[error("unknown similarity method: {0}")]
    UnknownMethod(String),

    #[error("unknown rank method: {0}")]
    UnknownRankMethod(String),

    #[error("unknown matrix metric: {0}")]
    UnknownMatrixMetric(String),

    #[error("unknown pairwise similarity: {0}")]
    UnknownPairwiseSim(String),

    #[error("method {method} needs a graph with information content")]
    MissingInformationContent { method: Method },

    #[error(transparent)]
    Core(#[from] PumpkinError),
}

impl SimError {
    /// The stable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Unsupported { .. } => ErrorCode::UnsupportedConfiguration,
            Self::UnknownMethod(_)
            | Self::UnknownRankMethod(_)
            | Self::UnknownMatrixMetric(_)
            | Self::UnknownPairwiseSim(_) => ErrorCode::InvalidEnumValue,
            Self::MissingInformationContent { .. } => ErrorCode::MissingInformationContent,
            Self::Core(err) => err.code(),
        }
    }
}

pub type Result<T, E = SimError> = std::result::Result<T, E>;
