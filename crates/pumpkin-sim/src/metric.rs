//! Term-to-term measures that fill score matrices.

use std::fmt;
use std::str::FromStr;

use fixedbitset::FixedBitSet;
use pumpkin_core::{Graph, IcGraph, Namespace};
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// `|a ∩ b| / |a ∪ b|`, 0 when both sets are empty.
#[must_use]
pub fn jaccard(a: &FixedBitSet, b: &FixedBitSet) -> f64 {
    let shared = a.intersection(b).count();
    let union = a.count_ones(..) + b.count_ones(..) - shared;
    if union == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = shared as f64 / union as f64;
    ratio
}

/// Jaccard of the two terms' ancestor sets.
#[must_use]
pub fn pairwise_jaccard(a: &str, b: &str, graph: &Graph) -> f64 {
    jaccard(&graph.ancestors(a), &graph.ancestors(b))
}

#[must_use]
pub fn mica_ic(a: &str, b: &str, graph: &IcGraph, ns: Option<Namespace>) -> f64 {
    graph.mica_ic(a, b, ns)
}

/// Geometric mean; 0 when any value is 0 (or negative) and for no values.
#[must_use]
pub fn geometric_mean(values: &[f64]) -> f64 {
    if values.is_empty() || values.iter().any(|&v| v <= 0.0) {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    (values.iter().map(|v| v.ln()).sum::<f64>() / n).exp()
}

/// `sqrt(jaccard * mica_ic)`.
#[must_use]
pub fn jac_ic_geomean(a: &str, b: &str, graph: &IcGraph, ns: Option<Namespace>) -> f64 {
    geometric_mean(&[pairwise_jaccard(a, b, graph.graph()), graph.mica_ic(a, b, ns)])
}

/// `IC(a) + IC(b) - 2 * IC(MICA)`.
#[must_use]
pub fn jin_conrath_distance(a: &str, b: &str, graph: &IcGraph) -> f64 {
    graph.ic(a) + graph.ic(b) - 2.0 * graph.mica_ic(a, b, None)
}

/// Euclidean distance of `(IC(a), IC(b))` from `(IC(MICA), IC(MICA))`.
#[must_use]
pub fn pairwise_euclidean(a: &str, b: &str, graph: &IcGraph) -> f64 {
    let mica = graph.mica_ic(a, b, None);
    (graph.ic(a) - mica).hypot(graph.ic(b) - mica)
}

// ---------------------------------------------------------------------------
// PairwiseSim
// ---------------------------------------------------------------------------

/// Cell measure of PhenoDigm-style score matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairwiseSim {
    /// Geometric mean of ancestor Jaccard and MICA IC.
    #[default]
    Geometric,
    /// MICA IC alone.
    Ic,
}

impl PairwiseSim {
    pub const ALL: [Self; 2] = [Self::Geometric, Self::Ic];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Geometric => "geometric",
            Self::Ic => "ic",
        }
    }

    #[must_use]
    pub fn score(self, a: &str, b: &str, graph: &IcGraph, ns: Option<Namespace>) -> f64 {
        match self {
            Self::Geometric => jac_ic_geomean(a, b, graph, ns),
            Self::Ic => graph.mica_ic(a, b, ns),
        }
    }

    /// A term compared with itself: Jaccard is 1 and the MICA is the term.
    #[must_use]
    pub fn self_score(self, term: &str, graph: &IcGraph) -> f64 {
        match self {
            Self::Geometric => geometric_mean(&[1.0, graph.ic(term)]),
            Self::Ic => graph.ic(term),
        }
    }
}

impl fmt::Display for PairwiseSim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PairwiseSim {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|sim| sim.as_str() == wanted)
            .ok_or_else(|| SimError::UnknownPairwiseSim(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// PairwiseDist
// ---------------------------------------------------------------------------

/// Cell measure of distance matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairwiseDist {
    #[default]
    JinConrath,
    Euclidean,
}

impl PairwiseDist {
    #[must_use]
    pub fn distance(self, a: &str, b: &str, graph: &IcGraph) -> f64 {
        match self {
            Self::JinConrath => jin_conrath_distance(a, b, graph),
            Self::Euclidean => pairwise_euclidean(a, b, graph),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(len: usize, ones: &[usize]) -> FixedBitSet {
        let mut set = FixedBitSet::with_capacity(len);
        for &i in ones {
            set.insert(i);
        }
        set
    }

    #[test]
    fn jaccard_of_bitsets() {
        assert!((jaccard(&bits(4, &[0, 1, 2]), &bits(4, &[1, 2, 3])) - 0.5).abs() < 1e-12);
        assert!(jaccard(&bits(4, &[]), &bits(4, &[])).abs() < f64::EPSILON);
        assert!((jaccard(&bits(4, &[2]), &bits(4, &[2])) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn geometric_mean_is_zero_safe() {
        assert!((geometric_mean(&[4.0, 9.0]) - 6.0).abs() < 1e-12);
        assert!(geometric_mean(&[0.0, 0.0]).abs() < f64::EPSILON);
        assert!(geometric_mean(&[0.0, 3.0]).abs() < f64::EPSILON);
        assert!(!geometric_mean(&[1e-300, 1e-300]).is_nan());
        assert!(geometric_mean(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn pairwise_sim_names() {
        assert_eq!("IC".parse::<PairwiseSim>().ok(), Some(PairwiseSim::Ic));
        assert_eq!(PairwiseSim::default().to_string(), "geometric");
        assert!("cosine".parse::<PairwiseSim>().is_err());
    }
}
