//! One-against-many profile search.
//!
//! # Overview
//!
//! [`search`] scores a query profile against every profile of a [`Dataset`]
//! with one [`Method`], then sorts and ranks the matches with
//! [`rank_results`]. Entities are visited in id order, so equal scores keep
//! that order after the stable sort.
//!
//! Boolean-set methods run on any [`SearchGraph`]; IC methods need an
//! [`IcGraph`] and fail with [`SimError::MissingInformationContent`]
//! otherwise, before any scoring happens.

use pumpkin_core::{Graph, IcGraph, Namespace};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{Result, SimError};
use crate::graph_sim::GraphSemSim;
use crate::ic_sim::{IcSemSim, PhenodigmOptions, ResnikOptions};
use crate::matrix::MatrixMetric;
use crate::method::Method;
use crate::metric::PairwiseSim;
use crate::profile::{Dataset, Profile};
use crate::rank::{RankMethod, rank_results};

/// Default weight of negated evidence in the cosine measures.
pub const DEFAULT_NEGATIVE_WEIGHT: f64 = 0.1;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxon {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// One scored entity.
///
/// `rank` is 0 until [`rank_results`] assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimMatch {
    pub id: String,
    pub rank: usize,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxon: Option<Taxon>,
}

impl SimMatch {
    #[must_use]
    pub fn new(id: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            rank: 0,
            score,
            label: None,
            kind: None,
            taxon: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub results: Vec<SimMatch>,
}

impl SearchResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Ids in rank order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|m| m.id.as_str())
    }
}

// ---------------------------------------------------------------------------
// Graph seam
// ---------------------------------------------------------------------------

/// A graph search can score against: closures always, IC when available.
pub trait SearchGraph {
    fn closure_graph(&self) -> &Graph;

    fn ic_graph(&self) -> Option<&IcGraph> {
        None
    }
}

impl SearchGraph for Graph {
    fn closure_graph(&self) -> &Graph {
        self
    }
}

impl SearchGraph for IcGraph {
    fn closure_graph(&self) -> &Graph {
        self.graph()
    }

    fn ic_graph(&self) -> Option<&IcGraph> {
        Some(self)
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Knobs shared by every method; each method reads the ones it understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Cosine measures only.
    pub negative_weight: f64,
    /// Resnik and PhenoDigm.
    pub ns_filter: Option<Namespace>,
    /// PhenoDigm cell measure.
    pub sim_measure: PairwiseSim,
    /// Resnik reduction.
    pub reduction: MatrixMetric,
    /// Resnik normalization.
    pub normalized: bool,
    /// Keep only the best `limit` matches.
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            negative_weight: DEFAULT_NEGATIVE_WEIGHT,
            ns_filter: None,
            sim_measure: PairwiseSim::default(),
            reduction: MatrixMetric::default(),
            normalized: false,
            limit: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score `target` against `query` with `method`.
///
/// # Errors
///
/// [`SimError::MissingInformationContent`] for an IC method on a graph
/// without IC, and [`SimError::Unsupported`] for normalized Resnik with a
/// namespace filter.
pub fn compare<G>(
    query: &Profile,
    target: &Profile,
    graph: &G,
    method: Method,
    options: &SearchOptions,
) -> Result<f64>
where
    G: SearchGraph + ?Sized,
{
    let ic_engine = || {
        graph
            .ic_graph()
            .map(IcSemSim::new)
            .ok_or(SimError::MissingInformationContent { method })
    };

    let score = match method {
        Method::Jaccard => GraphSemSim::new(graph.closure_graph()).jaccard_sim(query, target),
        Method::Cosine => GraphSemSim::new(graph.closure_graph()).cosine_sim(
            query,
            target,
            options.negative_weight,
        ),
        Method::IcCosine => ic_engine()?.cosine_ic_sim(query, target, options.negative_weight),
        Method::SimGic => ic_engine()?.sim_gic(query, target),
        Method::Resnik | Method::SymmetricResnik => {
            let resnik = ResnikOptions {
                reduction: options.reduction,
                symmetric: method == Method::SymmetricResnik,
                normalized: options.normalized,
                ns_filter: options.ns_filter,
            };
            ic_engine()?.resnik_sim(query, target, &resnik)?
        }
        Method::Phenodigm | Method::SymmetricPhenodigm => {
            let phenodigm = PhenodigmOptions {
                ns_filter: options.ns_filter,
                symmetric: method == Method::SymmetricPhenodigm,
                sim_measure: options.sim_measure,
            };
            ic_engine()?.phenodigm_compare(query, target, &phenodigm)
        }
    };
    Ok(score)
}

/// Score every dataset entity against `query`, rank, and truncate to
/// `options.limit`.
///
/// # Errors
///
/// Same as [`compare`]. An IC method on a graph without IC fails even for
/// an empty dataset.
#[instrument(skip(query, dataset, graph, options), fields(entities = dataset.len()))]
pub fn search<G>(
    query: &Profile,
    dataset: &Dataset,
    graph: &G,
    method: Method,
    rank_method: RankMethod,
    options: &SearchOptions,
) -> Result<SearchResult>
where
    G: SearchGraph + ?Sized,
{
    if method.requires_ic() && graph.ic_graph().is_none() {
        return Err(SimError::MissingInformationContent { method });
    }

    let mut results = dataset
        .iter()
        .map(|(id, target)| {
            let score = compare(query, target, graph, method, options)?;
            Ok(SimMatch::new(id.as_str(), score))
        })
        .collect::<Result<Vec<_>>>()?;

    rank_results(&mut results, rank_method);
    if let Some(limit) = options.limit {
        results.truncate(limit);
    }
    debug!(matches = results.len(), "search complete");
    Ok(SearchResult { results })
}
