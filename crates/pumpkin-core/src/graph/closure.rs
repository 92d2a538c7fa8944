//! The encoded closure graph and its storage backends.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use fixedbitset::FixedBitSet;
use serde::{Deserialize, Serialize};

use crate::error::PumpkinError;
use crate::graph::walk::WalkGraph;
use crate::namespace::Namespace;
use crate::term::{TermId, TermIndex};

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// How closures are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// One precomputed bitset per term and direction.
    #[default]
    Bitset,
    /// A `petgraph` DiGraph walked per query.
    Walk,
}

impl Backend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bitset => "bitset",
            Self::Walk => "walk",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = PumpkinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bitset" => Ok(Self::Bitset),
            "walk" => Ok(Self::Walk),
            _ => Err(PumpkinError::UnknownBackend(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum ClosureStore {
    Bitset {
        ancestors: Vec<FixedBitSet>,
        descendants: Vec<FixedBitSet>,
    },
    Walk(WalkGraph),
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// Reflexive ancestor/descendant closures of every term under one root.
///
/// Built with [`crate::graph::GraphBuilder`]. Unknown terms are never an
/// error here: their closures are empty sets.
#[derive(Debug, Clone)]
pub struct Graph {
    root: String,
    index: Arc<TermIndex>,
    store: ClosureStore,
    namespaces: HashMap<Namespace, FixedBitSet>,
}

impl Graph {
    pub(crate) fn from_parts(root: String, index: Arc<TermIndex>, store: ClosureStore) -> Self {
        let namespaces = Namespace::ALL
            .into_iter()
            .map(|ns| {
                let mut bits = FixedBitSet::with_capacity(index.len());
                for (id, term) in index.iter() {
                    if ns.contains(term) {
                        bits.insert(id);
                    }
                }
                (ns, bits)
            })
            .collect();
        Self {
            root,
            index,
            store,
            namespaces,
        }
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    #[must_use]
    pub fn index(&self) -> &TermIndex {
        &self.index
    }

    /// Shared handle to the id mapping, for pairing with an IC store.
    #[must_use]
    pub fn shared_index(&self) -> Arc<TermIndex> {
        Arc::clone(&self.index)
    }

    #[must_use]
    pub const fn backend(&self) -> Backend {
        match self.store {
            ClosureStore::Bitset { .. } => Backend::Bitset,
            ClosureStore::Walk(_) => Backend::Walk,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[must_use]
    pub fn id(&self, term: &str) -> Option<TermId> {
        self.index.id(term)
    }

    #[must_use]
    pub fn term(&self, id: TermId) -> Option<&str> {
        self.index.term(id)
    }

    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.index.contains(term)
    }

    /// An all-zero set sized for this graph.
    #[must_use]
    pub fn empty_set(&self) -> FixedBitSet {
        FixedBitSet::with_capacity(self.len())
    }

    #[must_use]
    pub fn ancestors_of(&self, id: TermId) -> Cow<'_, FixedBitSet> {
        match &self.store {
            ClosureStore::Bitset { ancestors, .. } => ancestors
                .get(id)
                .map_or_else(|| Cow::Owned(self.empty_set()), Cow::Borrowed),
            ClosureStore::Walk(walk) => Cow::Owned(walk.ancestors(id)),
        }
    }

    #[must_use]
    pub fn descendants_of(&self, id: TermId) -> Cow<'_, FixedBitSet> {
        match &self.store {
            ClosureStore::Bitset { descendants, .. } => descendants
                .get(id)
                .map_or_else(|| Cow::Owned(self.empty_set()), Cow::Borrowed),
            ClosureStore::Walk(walk) => Cow::Owned(walk.descendants(id)),
        }
    }

    /// Reflexive ancestors of `term`; empty when the term is unknown.
    #[must_use]
    pub fn ancestors(&self, term: &str) -> Cow<'_, FixedBitSet> {
        self.id(term)
            .map_or_else(|| Cow::Owned(self.empty_set()), |id| self.ancestors_of(id))
    }

    /// Reflexive descendants of `term`; empty when the term is unknown.
    #[must_use]
    pub fn descendants(&self, term: &str) -> Cow<'_, FixedBitSet> {
        self.id(term)
            .map_or_else(|| Cow::Owned(self.empty_set()), |id| self.descendants_of(id))
    }

    /// Descendants for negated terms, ancestors otherwise.
    #[must_use]
    pub fn closure(&self, term: &str, negative: bool) -> Cow<'_, FixedBitSet> {
        if negative {
            self.descendants(term)
        } else {
            self.ancestors(term)
        }
    }

    /// Union of [`Self::closure`] over every term.
    pub fn profile_closure<I, S>(&self, terms: I, negative: bool) -> FixedBitSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut bits = self.empty_set();
        for term in terms {
            bits.union_with(&self.closure(term.as_ref(), negative));
        }
        bits
    }

    /// Ids whose curie belongs to `ns`.
    #[must_use]
    pub fn namespace(&self, ns: Namespace) -> Option<&FixedBitSet> {
        self.namespaces.get(&ns)
    }

    /// Curies of the set bits, in id order.
    pub fn terms_of<'a>(&'a self, bits: &'a FixedBitSet) -> impl Iterator<Item = &'a str> + 'a {
        bits.ones().filter_map(|id| self.term(id))
    }
}
