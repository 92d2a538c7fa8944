//! Bidirectional curie ↔ dense integer encoding.
//!
//! A [`TermIndex`] is built once and never mutated; graphs and IC stores
//! share it through an `Arc`. Its [`fingerprint`](TermIndex::fingerprint)
//! identifies the exact ordering so that stores built for one index cannot be
//! paired with a graph using another.

use std::collections::HashMap;

/// Dense id of a term inside one [`TermIndex`].
pub type TermId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermIndex {
    terms: Vec<String>,
    ids: HashMap<String, TermId>,
    fingerprint: String,
}

impl TermIndex {
    /// Build an index whose ids follow the iteration order of `terms`.
    ///
    /// Repeated terms keep the id of their first occurrence.
    pub fn from_ordered<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered: Vec<String> = Vec::new();
        let mut ids = HashMap::new();
        for term in terms {
            let term = term.into();
            if ids.contains_key(&term) {
                continue;
            }
            ids.insert(term.clone(), ordered.len());
            ordered.push(term);
        }
        let fingerprint = compute_fingerprint(&ordered);
        Self {
            terms: ordered,
            ids,
            fingerprint,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[must_use]
    pub fn id(&self, term: &str) -> Option<TermId> {
        self.ids.get(term).copied()
    }

    #[must_use]
    pub fn term(&self, id: TermId) -> Option<&str> {
        self.terms.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.ids.contains_key(term)
    }

    /// Terms in id order.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, &str)> {
        self.terms.iter().map(String::as_str).enumerate()
    }

    /// `blake3:<hex>` digest of the ordered term list.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn compute_fingerprint(terms: &[String]) -> String {
    let mut hasher = blake3::Hasher::new();
    for term in terms {
        hasher.update(term.as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}
