//! Boolean-set similarity over profile closures.
//!
//! # Overview
//!
//! A profile closure is the union of the reflexive ancestors of its positive
//! terms. Negated terms close downwards instead (ruling out a phenotype rules
//! out its specializations) and are kept in a separate set so positive and
//! negative evidence never meet.

use fixedbitset::FixedBitSet;
use pumpkin_core::{Graph, TermId};

use crate::metric::jaccard;
use crate::profile::Profile;

#[derive(Debug, Clone, Copy)]
pub struct GraphSemSim<'g> {
    graph: &'g Graph,
}

impl<'g> GraphSemSim<'g> {
    #[must_use]
    pub const fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    #[must_use]
    pub const fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Ancestor closure of the positive terms.
    #[must_use]
    pub fn positive_closure(&self, profile: &Profile) -> FixedBitSet {
        self.graph.profile_closure(profile.positive(), false)
    }

    /// Descendant closure of the negated terms.
    #[must_use]
    pub fn negative_closure(&self, profile: &Profile) -> FixedBitSet {
        self.graph.profile_closure(profile.negative(), true)
    }

    /// Jaccard over the positive closures.
    #[must_use]
    pub fn jaccard_sim(&self, a: &Profile, b: &Profile) -> f64 {
        jaccard(&self.positive_closure(a), &self.positive_closure(b))
    }

    /// Unweighted cosine; negated evidence counts `negative_weight` as much.
    #[must_use]
    pub fn cosine_sim(&self, a: &Profile, b: &Profile, negative_weight: f64) -> f64 {
        self.cosine_weighted(a, b, negative_weight, |_| 1.0)
    }

    /// Cosine with a per-term weight.
    ///
    /// Positive members contribute `w(t)²` and negated members
    /// `(w(t) * negative_weight)²` to dot products and norms. A zero norm
    /// scores 0.
    pub fn cosine_weighted<W>(&self, a: &Profile, b: &Profile, negative_weight: f64, weight: W) -> f64
    where
        W: Fn(TermId) -> f64,
    {
        let (pos_a, neg_a) = (self.positive_closure(a), self.negative_closure(a));
        let (pos_b, neg_b) = (self.positive_closure(b), self.negative_closure(b));

        let positive = |id: TermId| weight(id).powi(2);
        let negative = |id: TermId| (weight(id) * negative_weight).powi(2);

        let dot = pos_a.intersection(&pos_b).map(positive).sum::<f64>()
            + neg_a.intersection(&neg_b).map(negative).sum::<f64>();
        let norm_a = (pos_a.ones().map(positive).sum::<f64>()
            + neg_a.ones().map(negative).sum::<f64>())
        .sqrt();
        let norm_b = (pos_b.ones().map(positive).sum::<f64>()
            + neg_b.ones().map(negative).sum::<f64>())
        .sqrt();

        let denominator = norm_a * norm_b;
        if denominator == 0.0 {
            return 0.0;
        }
        dot / denominator
    }

    /// `|∩ closures| / |∪ closures|` across every profile; 0 for none.
    #[must_use]
    pub fn groupwise_jaccard(&self, profiles: &[Profile]) -> f64 {
        let Some((union, shared)) = self.union_and_intersection(profiles) else {
            return 0.0;
        };
        let union_size = union.count_ones(..);
        if union_size == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = shared.count_ones(..) as f64 / union_size as f64;
        ratio
    }

    /// Share of `a` covered by `b`: inferred closures when `inferred`,
    /// asserted terms otherwise. Empty `a` is fully covered; empty `b`
    /// covers nothing.
    #[must_use]
    pub fn proportion_subset(&self, a: &Profile, b: &Profile, inferred: bool) -> f64 {
        let (a_terms, b_terms) = (a.positive(), b.positive());
        if a_terms.is_empty() {
            return 1.0;
        }
        if b_terms.is_empty() {
            return 0.0;
        }
        let (covered, total) = if inferred {
            let closure_a = self.positive_closure(a);
            let closure_b = self.positive_closure(b);
            (
                closure_a.intersection(&closure_b).count(),
                closure_a.count_ones(..),
            )
        } else {
            (a_terms.intersection(b_terms).count(), a_terms.len())
        };
        if total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = covered as f64 / total as f64;
        ratio
    }

    pub(crate) fn union_and_intersection(
        &self,
        profiles: &[Profile],
    ) -> Option<(FixedBitSet, FixedBitSet)> {
        let mut closures = profiles.iter().map(|p| self.positive_closure(p));
        let first = closures.next()?;
        let (mut union, mut shared) = (first.clone(), first);
        for closure in closures {
            union.union_with(&closure);
            shared.intersect_with(&closure);
        }
        Some((union, shared))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pumpkin_core::build_graph;

    // HP:1 ← HP:2 ← HP:3, HP:1 ← HP:4
    fn graph() -> Graph {
        build_graph(
            vec![
                ("HP:2", "HP:1"),
                ("HP:3", "HP:2"),
                ("HP:3", "HP:1"),
                ("HP:4", "HP:1"),
            ],
            "HP:1",
        )
        .expect("graph")
    }

    fn profile(terms: &[&str]) -> Profile {
        terms.iter().collect()
    }

    #[test]
    fn jaccard_over_closures() {
        let graph = graph();
        let sim = GraphSemSim::new(&graph);
        // {1,2,3} vs {1,4}
        let score = sim.jaccard_sim(&profile(&["HP:3"]), &profile(&["HP:4"]));
        assert!((score - 0.25).abs() < 1e-12);
        assert!((sim.jaccard_sim(&profile(&["HP:3"]), &profile(&["HP:3"])) - 1.0).abs() < 1e-12);
        assert!(sim.jaccard_sim(&profile(&[]), &profile(&[])).abs() < f64::EPSILON);
    }

    #[test]
    fn negated_terms_are_ignored_by_jaccard() {
        let graph = graph();
        let sim = GraphSemSim::new(&graph);
        let with_negation = profile(&["HP:3", "-HP:4"]);
        let plain = profile(&["HP:3"]);
        assert!((sim.jaccard_sim(&with_negation, &plain) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_counts_negations_separately() {
        let graph = graph();
        let sim = GraphSemSim::new(&graph);
        // Positive closures {1,2,3} vs {1,2}; negative {4} vs {4}.
        let a = profile(&["HP:3", "-HP:4"]);
        let b = profile(&["HP:2", "-HP:4"]);
        let w2 = 0.1_f64.powi(2);
        let expected = (2.0 + w2) / ((3.0 + w2).sqrt() * (2.0 + w2).sqrt());
        assert!((sim.cosine_sim(&a, &b, 0.1) - expected).abs() < 1e-12);
    }

    #[test]
    fn cosine_of_empty_profiles_is_zero() {
        let graph = graph();
        let sim = GraphSemSim::new(&graph);
        assert!(sim.cosine_sim(&profile(&[]), &profile(&["HP:3"]), 0.1).abs() < f64::EPSILON);
        assert!(sim.cosine_sim(&profile(&["HP:404"]), &profile(&["HP:3"]), 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn groupwise_jaccard_of_three() {
        let graph = graph();
        let sim = GraphSemSim::new(&graph);
        let profiles = [profile(&["HP:3"]), profile(&["HP:2"]), profile(&["HP:4"])];
        // ∩ = {1}, ∪ = {1,2,3,4}
        assert!((sim.groupwise_jaccard(&profiles) - 0.25).abs() < 1e-12);
        assert!(sim.groupwise_jaccard(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn proportion_subset_edges() {
        let graph = graph();
        let sim = GraphSemSim::new(&graph);
        let a = profile(&["HP:3"]);
        let b = profile(&["HP:2"]);
        assert!((sim.proportion_subset(&a, &b, true) - 2.0 / 3.0).abs() < 1e-12);
        assert!(sim.proportion_subset(&a, &b, false).abs() < f64::EPSILON);
        assert!((sim.proportion_subset(&profile(&[]), &b, true) - 1.0).abs() < f64::EPSILON);
        assert!(sim.proportion_subset(&a, &profile(&[]), true).abs() < f64::EPSILON);
    }
}
