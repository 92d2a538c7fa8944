//! The similarity methods search can rank by.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Phenodigm,
    SymmetricPhenodigm,
    Resnik,
    SymmetricResnik,
    IcCosine,
    SimGic,
    Jaccard,
    Cosine,
}

impl Method {
    pub const ALL: [Self; 8] = [
        Self::Phenodigm,
        Self::SymmetricPhenodigm,
        Self::Resnik,
        Self::SymmetricResnik,
        Self::IcCosine,
        Self::SimGic,
        Self::Jaccard,
        Self::Cosine,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Phenodigm => "phenodigm",
            Self::SymmetricPhenodigm => "symmetric_phenodigm",
            Self::Resnik => "resnik",
            Self::SymmetricResnik => "symmetric_resnik",
            Self::IcCosine => "ic_cosine",
            Self::SimGic => "sim_gic",
            Self::Jaccard => "jaccard",
            Self::Cosine => "cosine",
        }
    }

    /// Whether the method reads information content.
    #[must_use]
    pub const fn requires_ic(self) -> bool {
        !matches!(self, Self::Jaccard | Self::Cosine)
    }

    /// Whether the method reads negated profile terms.
    #[must_use]
    pub const fn uses_negations(self) -> bool {
        matches!(self, Self::Cosine | Self::IcCosine)
    }

    /// One-line description for listings.
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::Phenodigm => "PhenoDigm score (0-100) against the query's optimum",
            Self::SymmetricPhenodigm => "PhenoDigm averaged over both directions",
            Self::Resnik => "Resnik MICA information content, reduced by a matrix metric",
            Self::SymmetricResnik => "Resnik averaged over both directions",
            Self::IcCosine => "cosine over IC-weighted closures, negations included",
            Self::SimGic => "IC-weighted Jaccard of the closures",
            Self::Jaccard => "Jaccard of the closures",
            Self::Cosine => "cosine over closures, negations included",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = SimError;

    /// Accepts the snake_case name; `-` may stand in for `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == wanted)
            .ok_or_else(|| SimError::UnknownMethod(s.to_string()))
    }
}

/// Names of every method, in listing order.
#[must_use]
pub fn get_methods() -> Vec<&'static str> {
    Method::ALL.iter().map(|method| method.as_str()).collect()
}
