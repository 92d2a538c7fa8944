//! A closure graph paired with its IC store.
//!
//! MICA resolution order: precomputed matrix (unfiltered queries only), then
//! the [`MicaCache`], then intersect-then-max over the two ancestor sets.
//! When the store's ids ascend with IC the maximum is simply the largest
//! common id; otherwise every common ancestor is scanned.

use tracing::{debug, instrument};

use crate::error::{PumpkinError, Result};
use crate::graph::Graph;
use crate::ic::cache::{CachePolicy, MicaCache, MicaKey};
use crate::ic::store::{IcStore, MicaMatrix};
use crate::namespace::Namespace;
use crate::term::TermId;

#[derive(Debug)]
pub struct IcGraph {
    graph: Graph,
    store: IcStore,
    cache: MicaCache,
    ordered: bool,
}

impl IcGraph {
    /// Pair `graph` with `store` using an unbounded MICA cache.
    ///
    /// # Errors
    ///
    /// Returns [`PumpkinError::IdMapMismatch`] when the store was built for a
    /// different term index.
    pub fn new(graph: Graph, store: IcStore) -> Result<Self> {
        Self::with_cache_policy(graph, store, CachePolicy::default())
    }

    /// # Errors
    ///
    /// Returns [`PumpkinError::IdMapMismatch`] when the store was built for a
    /// different term index.
    pub fn with_cache_policy(graph: Graph, store: IcStore, policy: CachePolicy) -> Result<Self> {
        if graph.index().fingerprint() != store.index().fingerprint() {
            return Err(PumpkinError::IdMapMismatch {
                graph: graph.index().fingerprint().to_string(),
                store: store.index().fingerprint().to_string(),
            });
        }
        let ordered = store.is_ascending();
        if !ordered {
            debug!("IC store is not ordered by id, MICA uses a linear scan");
        }
        Ok(Self {
            graph,
            store,
            cache: MicaCache::new(policy),
            ordered,
        })
    }

    /// Precompute the MICA of every id pair.
    ///
    /// Quadratic in the number of terms. Graphs too large for the `u32`
    /// encoding are returned unchanged.
    #[must_use]
    #[instrument(skip(self), fields(terms = self.graph.len()))]
    pub fn with_mica_matrix(mut self) -> Self {
        let n = self.graph.len();
        let matrix = MicaMatrix::from_fn(n, |a, b| self.compute_mica(a, b, None));
        match matrix {
            Some(matrix) => {
                debug!(pairs = matrix.len(), "MICA matrix precomputed");
                self.store.set_mica_matrix(matrix);
            }
            None => debug!("too many terms for a MICA matrix"),
        }
        self
    }

    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    #[must_use]
    pub const fn store(&self) -> &IcStore {
        &self.store
    }

    #[must_use]
    pub const fn cache(&self) -> &MicaCache {
        &self.cache
    }

    /// Whether ids ascend with IC.
    #[must_use]
    pub const fn is_ic_ordered(&self) -> bool {
        self.ordered
    }

    /// IC of `term`; 0 when unknown.
    #[must_use]
    pub fn ic(&self, term: &str) -> f64 {
        self.store.ic_of(term)
    }

    #[must_use]
    pub fn ic_of(&self, id: TermId) -> f64 {
        self.store.ic(id)
    }

    /// Int-encoded MICA of two curies, optionally restricted to `ns`.
    ///
    /// `None` when either term is unknown or they share no ancestor.
    #[must_use]
    pub fn mica(&self, a: &str, b: &str, ns: Option<Namespace>) -> Option<TermId> {
        let (Some(a), Some(b)) = (self.graph.id(a), self.graph.id(b)) else {
            return None;
        };
        self.mica_of(a, b, ns)
    }

    /// Int-encoded MICA of two ids.
    #[must_use]
    pub fn mica_of(&self, a: TermId, b: TermId, ns: Option<Namespace>) -> Option<TermId> {
        if ns.is_none() {
            if let Some(hit) = self.store.mica_matrix().and_then(|matrix| matrix.get(a, b)) {
                return hit;
            }
        }
        self.cache
            .get_or_insert_with(MicaKey::new(a, b, ns), || self.compute_mica(a, b, ns))
    }

    /// Curie of the MICA.
    #[must_use]
    pub fn mica_id(&self, a: &str, b: &str, ns: Option<Namespace>) -> Option<&str> {
        self.mica(a, b, ns).and_then(|id| self.graph.term(id))
    }

    /// IC of the MICA; 0 when there is none.
    #[must_use]
    pub fn mica_ic(&self, a: &str, b: &str, ns: Option<Namespace>) -> f64 {
        self.mica(a, b, ns).map_or(0.0, |id| self.store.ic(id))
    }

    /// MICA by scanning every common ancestor for the highest IC. Ties go to
    /// the term with more ancestors, then to the larger curie, matching the
    /// IC encoding. Bypasses the matrix and the cache.
    #[must_use]
    pub fn mica_id_linear(&self, a: &str, b: &str, ns: Option<Namespace>) -> Option<TermId> {
        let (Some(a), Some(b)) = (self.graph.id(a), self.graph.id(b)) else {
            return None;
        };
        self.scan_mica(a, b, ns, true)
    }

    fn compute_mica(&self, a: TermId, b: TermId, ns: Option<Namespace>) -> Option<TermId> {
        self.scan_mica(a, b, ns, !self.ordered)
    }

    fn scan_mica(&self, a: TermId, b: TermId, ns: Option<Namespace>, linear: bool) -> Option<TermId> {
        let ancestors_a = self.graph.ancestors_of(a);
        let ancestors_b = self.graph.ancestors_of(b);
        let filter = ns.and_then(|ns| self.graph.namespace(ns));
        let common = ancestors_a
            .intersection(&ancestors_b)
            .filter(|&id| filter.is_none_or(|bits| bits.contains(id)));
        if linear {
            let depth = |id: TermId| self.graph.ancestors_of(id).count_ones(..);
            common.max_by(|&x, &y| {
                self.store
                    .ic(x)
                    .total_cmp(&self.store.ic(y))
                    .then_with(|| depth(x).cmp(&depth(y)))
                    .then_with(|| self.graph.term(x).cmp(&self.graph.term(y)))
            })
        } else {
            common.last()
        }
    }
}

impl AsRef<Graph> for IcGraph {
    fn as_ref(&self) -> &Graph {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphBuilder, build_graph};
    use crate::{Annotations, TermIndex};
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::Arc;

    // HP:1 ← HP:2 ← HP:3, HP:1 ← HP:4, MP:5 ← HP:1
    fn edges() -> Vec<(&'static str, &'static str)> {
        vec![
            ("HP:2", "HP:1"),
            ("HP:3", "HP:2"),
            ("HP:3", "HP:1"),
            ("HP:4", "HP:1"),
            ("MP:5", "HP:1"),
            ("MP:5", "HP:4"),
        ]
    }

    fn annotations() -> Annotations {
        BTreeMap::from([
            ("a".to_string(), BTreeSet::from(["HP:3".to_string()])),
            ("b".to_string(), BTreeSet::from(["MP:5".to_string(), "HP:2".to_string()])),
        ])
    }

    fn ic_graph() -> IcGraph {
        GraphBuilder::new("HP:1")
            .build_ic(edges(), &annotations())
            .expect("ic graph")
    }

    #[test]
    fn mismatched_index_is_rejected() {
        let graph = build_graph(edges(), "HP:1").expect("graph");
        let other = Arc::new(TermIndex::from_ordered(["HP:1"]));
        let store = IcStore::new(other, vec![0.0]).expect("store");
        let err = IcGraph::new(graph, store).expect_err("mismatch");
        assert!(matches!(err, PumpkinError::IdMapMismatch { .. }));
    }

    #[test]
    fn mica_is_most_informative_shared_ancestor() {
        let graph = ic_graph();
        assert_eq!(graph.mica_id("HP:3", "HP:2", None), Some("HP:2"));
        assert_eq!(graph.mica_id("HP:3", "MP:5", None), Some("HP:1"));
        assert_eq!(graph.mica_id("HP:4", "MP:5", None), Some("HP:4"));
        assert_eq!(graph.mica_id("HP:3", "HP:3", None), Some("HP:3"));
    }

    #[test]
    fn unknown_terms_have_no_mica() {
        let graph = ic_graph();
        assert_eq!(graph.mica_id("HP:3", "HP:404", None), None);
        assert!(graph.mica_ic("HP:404", "HP:3", None).abs() < f64::EPSILON);
    }

    #[test]
    fn namespace_filter_restricts_candidates() {
        let graph = ic_graph();
        assert_eq!(graph.mica_id("MP:5", "MP:5", Some(Namespace::Mp)), Some("MP:5"));
        assert_eq!(graph.mica_id("HP:4", "MP:5", Some(Namespace::Mp)), None);
        assert_eq!(graph.mica_id("HP:4", "MP:5", Some(Namespace::Hp)), Some("HP:4"));
    }

    #[test]
    fn matrix_and_cache_agree_with_linear_scan() {
        let graph = ic_graph().with_mica_matrix();
        assert!(graph.store().mica_matrix().is_some());
        let terms = graph.graph().index().terms().to_vec();
        for a in &terms {
            for b in &terms {
                assert_eq!(
                    graph.mica(a, b, None),
                    graph.mica_id_linear(a, b, None),
                    "{a} / {b}"
                );
            }
        }
        // Served by the matrix, so the cache stays cold.
        assert_eq!(graph.cache().stats().misses, 0);
    }

    #[test]
    fn repeated_lookups_hit_the_cache() {
        let graph = ic_graph();
        let _ = graph.mica("HP:3", "MP:5", None);
        let _ = graph.mica("MP:5", "HP:3", None);
        let stats = graph.cache().stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));
    }

    #[test]
    fn unordered_store_falls_back_to_linear_scan() {
        let graph = build_graph(edges(), "HP:1").expect("graph");
        // Curie order is not IC order here: HP:2 outranks HP:4.
        let ic: Vec<f64> = graph
            .index()
            .terms()
            .iter()
            .map(|term| match term.as_str() {
                "HP:1" => 0.0,
                "HP:2" => 2.0,
                "HP:3" => 3.0,
                _ => 1.0,
            })
            .collect();
        let store = IcStore::new(graph.shared_index(), ic).expect("store");
        let graph = IcGraph::new(graph, store).expect("ic graph");
        assert!(!graph.is_ic_ordered());
        assert_eq!(graph.mica_id("HP:3", "HP:2", None), Some("HP:2"));
        assert_eq!(graph.mica_id("HP:4", "MP:5", None), Some("HP:4"));
        assert!((graph.mica_ic("HP:4", "MP:5", None) - 1.0).abs() < f64::EPSILON);
    }
}
