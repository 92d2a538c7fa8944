//! Memory-light closure backend: a `petgraph` DiGraph walked on demand.

use fixedbitset::FixedBitSet;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, Reversed};

use crate::term::TermId;

/// Direct `child → ancestor` edges keyed by term id.
///
/// Node index `i` is term id `i`, so DFS results map straight into bitsets.
#[derive(Debug, Clone)]
pub struct WalkGraph {
    graph: DiGraph<TermId, ()>,
}

impl WalkGraph {
    /// Build a walk graph over `term_count` ids. Edges naming ids outside the
    /// range and self loops are skipped.
    pub fn new<I>(term_count: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (TermId, TermId)>,
    {
        let mut graph = DiGraph::with_capacity(term_count, term_count);
        for id in 0..term_count {
            graph.add_node(id);
        }
        for (child, ancestor) in edges {
            if child == ancestor || child >= term_count || ancestor >= term_count {
                continue;
            }
            let (from, to) = (NodeIndex::new(child), NodeIndex::new(ancestor));
            // Avoid duplicate edges (petgraph allows them by default).
            if !graph.contains_edge(from, to) {
                graph.add_edge(from, to, ());
            }
        }
        Self { graph }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Reflexive ancestors of `id`. Empty for out-of-range ids.
    #[must_use]
    pub fn ancestors(&self, id: TermId) -> FixedBitSet {
        let mut bits = FixedBitSet::with_capacity(self.node_count());
        if id >= self.node_count() {
            return bits;
        }
        let mut dfs = Dfs::new(&self.graph, NodeIndex::new(id));
        while let Some(node) = dfs.next(&self.graph) {
            bits.insert(node.index());
        }
        bits
    }

    /// Reflexive descendants of `id`. Empty for out-of-range ids.
    #[must_use]
    pub fn descendants(&self, id: TermId) -> FixedBitSet {
        let mut bits = FixedBitSet::with_capacity(self.node_count());
        if id >= self.node_count() {
            return bits;
        }
        let reversed = Reversed(&self.graph);
        let mut dfs = Dfs::new(reversed, NodeIndex::new(id));
        while let Some(node) = dfs.next(reversed) {
            bits.insert(node.index());
        }
        bits
    }
}
