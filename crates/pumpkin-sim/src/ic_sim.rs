//! Information-content weighted similarity.
//!
//! # Overview
//!
//! Resnik and PhenoDigm fill an `|A| × |B|` matrix with a per-pair measure
//! (rows follow A's terms in sorted order) and reduce it with
//! [`crate::matrix`]. simGIC and the IC cosine work on whole closures.
//! Only positive terms take part, except in [`IcSemSim::cosine_ic_sim`].
//!
//! An "optimal" matrix is the best score a profile could reach: one cell per
//! term holding the term compared with itself. With a namespace filter the
//! self comparison is not trivially the term itself, so the optimal matrix is
//! the full filtered `A × A` matrix instead.

use std::collections::BTreeSet;

use fixedbitset::FixedBitSet;
use pumpkin_core::{IcGraph, Namespace};
use tracing::trace;

use crate::error::{Result, SimError};
use crate::graph_sim::GraphSemSim;
use crate::matrix::{
    MatrixMetric, ScoreMatrix, flip_matrix, max_percentage_score, sym_bma_percentage_score,
};
use crate::metric::PairwiseSim;
use crate::profile::Profile;

/// Options of [`IcSemSim::resnik_sim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResnikOptions {
    pub reduction: MatrixMetric,
    /// Average the A→B and B→A scores.
    pub symmetric: bool,
    /// Divide by the same reduction of the optimal matrix.
    pub normalized: bool,
    pub ns_filter: Option<Namespace>,
}

/// Options of [`IcSemSim::phenodigm_compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhenodigmOptions {
    pub ns_filter: Option<Namespace>,
    /// Average the score against A's optimum with the flipped score against
    /// B's optimum.
    pub symmetric: bool,
    pub sim_measure: PairwiseSim,
}

#[derive(Debug, Clone, Copy)]
pub struct IcSemSim<'g> {
    graph: &'g IcGraph,
}

impl<'g> IcSemSim<'g> {
    #[must_use]
    pub const fn new(graph: &'g IcGraph) -> Self {
        Self { graph }
    }

    #[must_use]
    pub const fn graph(&self) -> &'g IcGraph {
        self.graph
    }

    // -----------------------------------------------------------------------
    // Matrices
    // -----------------------------------------------------------------------

    /// `M[i][j] = measure(a_i, b_j)`.
    #[must_use]
    pub fn score_matrix(
        &self,
        a: &BTreeSet<String>,
        b: &BTreeSet<String>,
        measure: PairwiseSim,
        ns: Option<Namespace>,
    ) -> ScoreMatrix {
        a.iter()
            .map(|x| b.iter().map(|y| measure.score(x, y, self.graph, ns)).collect())
            .collect()
    }

    /// One single-cell row per term: the term against itself.
    #[must_use]
    pub fn self_vs_self(&self, a: &BTreeSet<String>, measure: PairwiseSim) -> ScoreMatrix {
        a.iter()
            .map(|term| vec![measure.self_score(term, self.graph)])
            .collect()
    }

    fn optimal_matrix(
        &self,
        profile: &BTreeSet<String>,
        measure: PairwiseSim,
        ns: Option<Namespace>,
    ) -> ScoreMatrix {
        match ns {
            Some(ns) => self.score_matrix(profile, profile, measure, Some(ns)),
            None => self.self_vs_self(profile, measure),
        }
    }

    // -----------------------------------------------------------------------
    // Resnik
    // -----------------------------------------------------------------------

    /// Resnik similarity: MICA IC per pair, reduced by `options.reduction`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Unsupported`] for `normalized` together with a
    /// namespace filter: there is no defined optimum for a cross-namespace
    /// comparison.
    pub fn resnik_sim(&self, a: &Profile, b: &Profile, options: &ResnikOptions) -> Result<f64> {
        if options.normalized && options.ns_filter.is_some() {
            return Err(SimError::Unsupported {
                what: "normalized resnik similarity with a namespace filter".to_string(),
            });
        }
        let (a, b) = (a.positive(), b.positive());
        if a.is_empty() || b.is_empty() {
            return Ok(0.0);
        }

        let query = self.score_matrix(a, b, PairwiseSim::Ic, options.ns_filter);
        let score = |matrix: &[Vec<f64>], profile: &BTreeSet<String>| {
            if options.normalized {
                let optimal = self.self_vs_self(profile, PairwiseSim::Ic);
                options.reduction.percentage(matrix, &optimal)
            } else {
                options.reduction.reduce(matrix)
            }
        };

        let forward = score(&query, a);
        if !options.symmetric {
            return Ok(forward);
        }
        let backward = score(&flip_matrix(&query), b);
        Ok(f64::midpoint(forward, backward))
    }

    /// Symmetric, unnormalized best-match-average Resnik.
    #[must_use]
    pub fn symmetric_resnik_bma(&self, a: &Profile, b: &Profile) -> f64 {
        let (a, b) = (a.positive(), b.positive());
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        let query = self.score_matrix(a, b, PairwiseSim::Ic, None);
        let reduction = MatrixMetric::Bma;
        f64::midpoint(reduction.reduce(&query), reduction.reduce(&flip_matrix(&query)))
    }

    // -----------------------------------------------------------------------
    // PhenoDigm
    // -----------------------------------------------------------------------

    /// PhenoDigm score in `[0, 100]`.
    ///
    /// The query matrix is never namespace filtered; the filter only shapes
    /// the optimal matrix.
    #[must_use]
    pub fn phenodigm_compare(&self, a: &Profile, b: &Profile, options: &PhenodigmOptions) -> f64 {
        let (a, b) = (a.positive(), b.positive());
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        let measure = options.sim_measure;
        let query = self.score_matrix(a, b, measure, None);
        let forward = Self::compute_phenodigm_score(
            &query,
            &self.optimal_matrix(a, measure, options.ns_filter),
        );
        if !options.symmetric {
            return forward;
        }
        let backward = Self::compute_phenodigm_score(
            &flip_matrix(&query),
            &self.optimal_matrix(b, measure, options.ns_filter),
        );
        trace!(forward, backward, "symmetric phenodigm");
        f64::midpoint(forward, backward)
    }

    #[must_use]
    pub fn symmetric_phenodigm(
        &self,
        a: &Profile,
        b: &Profile,
        ns_filter: Option<Namespace>,
        sim_measure: PairwiseSim,
    ) -> f64 {
        self.phenodigm_compare(
            a,
            b,
            &PhenodigmOptions {
                ns_filter,
                symmetric: true,
                sim_measure,
            },
        )
    }

    /// `100 * mean(max%, symmetric BMA%)` of `query` against `optimal`.
    #[must_use]
    pub fn compute_phenodigm_score(query: &[Vec<f64>], optimal: &[Vec<f64>]) -> f64 {
        100.0
            * f64::midpoint(
                max_percentage_score(query, optimal),
                sym_bma_percentage_score(query, optimal),
            )
    }

    // -----------------------------------------------------------------------
    // Closure measures
    // -----------------------------------------------------------------------

    /// IC-weighted Jaccard of the positive closures.
    #[must_use]
    pub fn sim_gic(&self, a: &Profile, b: &Profile) -> f64 {
        self.groupwise_sim_gic(&[a.clone(), b.clone()])
    }

    /// `Σ IC(∩ closures) / Σ IC(∪ closures)` across every profile.
    #[must_use]
    pub fn groupwise_sim_gic(&self, profiles: &[Profile]) -> f64 {
        let sim = GraphSemSim::new(self.graph.graph());
        let Some((union, shared)) = sim.union_and_intersection(profiles) else {
            return 0.0;
        };
        let denominator = self.ic_sum(&union);
        if denominator == 0.0 {
            return 0.0;
        }
        self.ic_sum(&shared) / denominator
    }

    /// Cosine with every term weighted by its IC, negated terms included.
    #[must_use]
    pub fn cosine_ic_sim(&self, a: &Profile, b: &Profile, negative_weight: f64) -> f64 {
        GraphSemSim::new(self.graph.graph()).cosine_weighted(a, b, negative_weight, |id| {
            self.graph.ic_of(id)
        })
    }

    fn ic_sum(&self, bits: &FixedBitSet) -> f64 {
        bits.ones().map(|id| self.graph.ic_of(id)).sum()
    }
}
