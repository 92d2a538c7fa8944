//! Build a [`Graph`] or [`IcGraph`] from closure edges.
//!
//! # Overview
//!
//! The closure file is restricted to the root's subtree: only the root and
//! its descendants are encoded, every closure is made reflexive and ancestors
//! above the root are dropped. Without annotations ids follow the sorted
//! curies; [`GraphBuilder::build_ic`] re-encodes the graph so ids ascend with
//! information content (ties by ancestor count, then curie), which lets MICA
//! be read off as the largest common id.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

use crate::Annotations;
use crate::error::{PumpkinError, Result};
use crate::graph::closure::{Backend, ClosureStore, Graph};
use crate::graph::walk::WalkGraph;
use crate::ic::cache::CachePolicy;
use crate::ic::compute::information_content;
use crate::ic::graph::IcGraph;
use crate::ic::store::IcStore;
use crate::term::TermIndex;

// ---------------------------------------------------------------------------
// GraphBuilder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct GraphBuilder {
    root: String,
    backend: Backend,
    cache_policy: CachePolicy,
}

impl GraphBuilder {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            backend: Backend::default(),
            cache_policy: CachePolicy::default(),
        }
    }

    #[must_use]
    pub const fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// MICA cache policy for graphs built with [`Self::build_ic`].
    #[must_use]
    pub const fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    /// Encode `(child, ancestor)` closure edges with ids in curie order.
    ///
    /// # Errors
    ///
    /// Returns [`PumpkinError::RootNotFound`] when no edge names the root as
    /// an ancestor.
    #[instrument(skip(self, edges), fields(root = %self.root, backend = %self.backend))]
    pub fn build<I, S>(&self, edges: I) -> Result<Graph>
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let raw = RawClosure::from_edges(edges, &self.root)?;
        let graph = raw.encode(raw.sorted_terms(), self.backend);
        debug!(terms = graph.len(), "closure graph built");
        Ok(graph)
    }

    /// Encode the closure, compute information content from `annotations`
    /// and re-encode so ids ascend with IC.
    ///
    /// # Errors
    ///
    /// Returns [`PumpkinError::RootNotFound`] when no edge names the root as
    /// an ancestor.
    #[instrument(
        skip(self, edges, annotations),
        fields(root = %self.root, backend = %self.backend, entities = annotations.len())
    )]
    pub fn build_ic<I, S>(&self, edges: I, annotations: &Annotations) -> Result<IcGraph>
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let raw = RawClosure::from_edges(edges, &self.root)?;
        // IC is computed once on a provisional encoding, then carried over.
        let provisional = raw.encode(raw.sorted_terms(), Backend::Bitset);
        let provisional_ic = information_content(&provisional, annotations);

        // Equal IC: fewer ancestors first, so a term always outranks its
        // own ancestors and is its own MICA.
        let mut order: Vec<(f64, usize, &str)> = provisional
            .index()
            .iter()
            .map(|(id, term)| {
                let depth = provisional.ancestors_of(id).count_ones(..);
                (provisional_ic[id], depth, term)
            })
            .collect();
        order.sort_by(|a, b| {
            a.0.total_cmp(&b.0)
                .then_with(|| a.1.cmp(&b.1))
                .then_with(|| a.2.cmp(b.2))
        });

        let ic: Vec<f64> = order.iter().map(|(value, _, _)| *value).collect();
        let graph = raw.encode(order.iter().map(|(_, _, term)| *term), self.backend);
        let store = IcStore::new(graph.shared_index(), ic)?;
        debug!(terms = graph.len(), max_ic = store.max_ic(), "IC graph built");
        IcGraph::with_cache_policy(graph, store, self.cache_policy)
    }
}

/// Build a bitset-backed [`Graph`] rooted at `root`.
///
/// # Errors
///
/// See [`GraphBuilder::build`].
pub fn build_graph<I, S>(edges: I, root: &str) -> Result<Graph>
where
    I: IntoIterator<Item = (S, S)>,
    S: Into<String>,
{
    GraphBuilder::new(root).build(edges)
}

/// Build a bitset-backed [`IcGraph`] rooted at `root`.
///
/// # Errors
///
/// See [`GraphBuilder::build_ic`].
pub fn build_ic_graph<I, S>(edges: I, root: &str, annotations: &Annotations) -> Result<IcGraph>
where
    I: IntoIterator<Item = (S, S)>,
    S: Into<String>,
{
    GraphBuilder::new(root).build_ic(edges, annotations)
}

// ---------------------------------------------------------------------------
// RawClosure
// ---------------------------------------------------------------------------

/// String-keyed closures restricted to one root's subtree.
#[derive(Debug)]
struct RawClosure {
    root: String,
    ancestors: HashMap<String, HashSet<String>>,
    descendants: HashMap<String, HashSet<String>>,
    edges: Vec<(String, String)>,
}

impl RawClosure {
    fn from_edges<I, S>(edges: I, root: &str) -> Result<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut ancestors: HashMap<String, HashSet<String>> = HashMap::new();
        let mut descendants: HashMap<String, HashSet<String>> = HashMap::new();
        let mut all_edges = Vec::new();
        for (child, ancestor) in edges {
            let (child, ancestor) = (child.into(), ancestor.into());
            ancestors
                .entry(child.clone())
                .or_default()
                .insert(ancestor.clone());
            descendants
                .entry(ancestor.clone())
                .or_default()
                .insert(child.clone());
            all_edges.push((child, ancestor));
        }

        let Some(below_root) = descendants.get(root) else {
            return Err(PumpkinError::RootNotFound(root.to_string()));
        };
        let mut subtree: HashSet<String> = below_root.clone();
        subtree.insert(root.to_string());

        let restrict = |closures: &HashMap<String, HashSet<String>>| {
            subtree
                .iter()
                .map(|term| {
                    let mut set: HashSet<String> = closures
                        .get(term)
                        .map(|related| related.intersection(&subtree).cloned().collect())
                        .unwrap_or_default();
                    set.insert(term.clone());
                    (term.clone(), set)
                })
                .collect::<HashMap<_, _>>()
        };
        let restricted_ancestors = restrict(&ancestors);
        let restricted_descendants = restrict(&descendants);

        let total = all_edges.len();
        all_edges.retain(|(child, ancestor)| subtree.contains(child) && subtree.contains(ancestor));
        let outside = ancestors.keys().filter(|term| !subtree.contains(*term)).count();
        if outside > 0 {
            debug!(
                outside,
                dropped_edges = total - all_edges.len(),
                "terms outside the root subtree ignored"
            );
        }

        Ok(Self {
            root: root.to_string(),
            ancestors: restricted_ancestors,
            descendants: restricted_descendants,
            edges: all_edges,
        })
    }

    fn sorted_terms(&self) -> Vec<String> {
        self.ancestors
            .keys()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Assign ids in `order` and materialize the chosen backend.
    fn encode<I, S>(&self, order: I, backend: Backend) -> Graph
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index = Arc::new(TermIndex::from_ordered(order));
        let n = index.len();
        let to_bits = |closures: &HashMap<String, HashSet<String>>, term: &str| {
            let mut bits = FixedBitSet::with_capacity(n);
            for related in closures.get(term).into_iter().flatten() {
                if let Some(id) = index.id(related) {
                    bits.insert(id);
                }
            }
            bits
        };

        let store = match backend {
            Backend::Bitset => ClosureStore::Bitset {
                ancestors: index
                    .terms()
                    .iter()
                    .map(|term| to_bits(&self.ancestors, term.as_str()))
                    .collect(),
                descendants: index
                    .terms()
                    .iter()
                    .map(|term| to_bits(&self.descendants, term.as_str()))
                    .collect(),
            },
            Backend::Walk => ClosureStore::Walk(WalkGraph::new(
                n,
                self.edges
                    .iter()
                    .filter_map(|(child, ancestor)| Some((index.id(child)?, index.id(ancestor)?))),
            )),
        };

        Graph::from_parts(self.root.clone(), index, store)
    }
}
