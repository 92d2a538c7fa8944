//! Semantic distances. Lower is closer; identical profiles are at 0.

use std::collections::BTreeSet;

use pumpkin_core::IcGraph;

use crate::graph_sim::GraphSemSim;
use crate::matrix::{ScoreMatrix, best_min_avg, flip_matrix};
use crate::metric::PairwiseDist;
use crate::profile::Profile;

#[derive(Debug, Clone, Copy)]
pub struct SemanticDist<'g> {
    graph: &'g IcGraph,
}

impl<'g> SemanticDist<'g> {
    #[must_use]
    pub const fn new(graph: &'g IcGraph) -> Self {
        Self { graph }
    }

    /// Euclidean distance between the IC-weighted closure vectors.
    ///
    /// Terms in both closures cancel, so this is `sqrt(Σ IC(t)²)` over the
    /// symmetric difference.
    #[must_use]
    pub fn euclidean_distance(&self, a: &Profile, b: &Profile) -> f64 {
        let sim = GraphSemSim::new(self.graph.graph());
        let (a, b) = (sim.positive_closure(a), sim.positive_closure(b));
        a.symmetric_difference(&b)
            .map(|id| self.graph.ic_of(id).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    #[must_use]
    pub fn distance_matrix(
        &self,
        a: &BTreeSet<String>,
        b: &BTreeSet<String>,
        measure: PairwiseDist,
    ) -> ScoreMatrix {
        a.iter()
            .map(|x| b.iter().map(|y| measure.distance(x, y, self.graph)).collect())
            .collect()
    }

    /// Symmetric best-min-average of the pairwise distance matrix.
    #[must_use]
    pub fn distance_matrix_score(&self, a: &Profile, b: &Profile, measure: PairwiseDist) -> f64 {
        let (a, b) = (a.positive(), b.positive());
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        let matrix = self.distance_matrix(a, b, measure);
        f64::midpoint(best_min_avg(&matrix), best_min_avg(&flip_matrix(&matrix)))
    }
}
