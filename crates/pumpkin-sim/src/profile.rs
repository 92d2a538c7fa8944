//! Term profiles with optional negated terms.
//!
//! A leading `-` marks a term as explicitly absent. Only the cosine measures
//! read negated terms; every other measure uses [`Profile::positive`].

use std::collections::{BTreeMap, BTreeSet};

use pumpkin_core::Annotations;
use serde::{Deserialize, Serialize};

pub const NEGATION_PREFIX: char = '-';

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    positive: BTreeSet<String>,
    negative: BTreeSet<String>,
}

impl Profile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term; `-HP:0000001` is recorded as a negated `HP:0000001`.
    /// Blank entries are ignored.
    pub fn insert(&mut self, term: &str) {
        let term = term.trim();
        match term.strip_prefix(NEGATION_PREFIX) {
            Some(negated) if !negated.trim().is_empty() => {
                self.negative.insert(negated.trim().to_string());
            }
            Some(_) => {}
            None if term.is_empty() => {}
            None => {
                self.positive.insert(term.to_string());
            }
        }
    }

    /// Parse a comma-separated list such as `HP:0000280,-HP:0000478`.
    #[must_use]
    pub fn parse_list(list: &str) -> Self {
        list.split(',').collect()
    }

    #[must_use]
    pub const fn positive(&self) -> &BTreeSet<String> {
        &self.positive
    }

    #[must_use]
    pub const fn negative(&self) -> &BTreeSet<String> {
        &self.negative
    }

    #[must_use]
    pub fn has_negations(&self) -> bool {
        !self.negative.is_empty()
    }

    /// Number of positive and negated terms together.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Profile {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut profile = Self::new();
        for term in iter {
            profile.insert(term.as_ref());
        }
        profile
    }
}

/// Entity id → profile, iterated in id order.
pub type Dataset = BTreeMap<String, Profile>;

/// Treat every annotated entity as a profile.
#[must_use]
pub fn dataset_from_annotations(annotations: &Annotations) -> Dataset {
    annotations
        .iter()
        .map(|(entity, terms)| (entity.clone(), terms.iter().collect()))
        .collect()
}
