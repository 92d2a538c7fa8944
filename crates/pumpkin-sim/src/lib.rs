#![forbid(unsafe_code)]
//! pumpkin-sim library.
//!
//! Semantic similarity, distance and ranked search over term profiles, on top
//! of the closure and IC graphs of `pumpkin-core`.
//!
//! # Overview
//!
//! - [`profile::Profile`] is a set of curies, some possibly negated.
//! - [`graph_sim::GraphSemSim`] scores profiles on closures alone (Jaccard,
//!   cosine, proportional subset).
//! - [`ic_sim::IcSemSim`] adds information content (Resnik, PhenoDigm,
//!   simGIC, IC cosine).
//! - [`dist::SemanticDist`] measures distances (Euclidean, Jin-Conrath).
//! - [`search::search`] ranks a dataset against a query with any
//!   [`method::Method`].
//!
//! # Conventions
//!
//! - **Errors**: Configuration problems are [`SimError`]s; degenerate input
//!   (empty profiles, zero norms) scores 0.
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`).

pub mod dist;
pub mod error;
pub mod graph_sim;
pub mod ic_sim;
pub mod matrix;
pub mod method;
pub mod metric;
pub mod profile;
pub mod rank;
pub mod search;

pub use dist::SemanticDist;
pub use error::{Result, SimError};
pub use graph_sim::GraphSemSim;
pub use ic_sim::{IcSemSim, PhenodigmOptions, ResnikOptions};
pub use matrix::MatrixMetric;
pub use method::{Method, get_methods};
pub use metric::{PairwiseDist, PairwiseSim};
pub use profile::{Dataset, Profile, dataset_from_annotations};
pub use rank::{RankMethod, rank_results, rerank_ties};
pub use search::{SearchGraph, SearchOptions, SearchResult, SimMatch, Taxon, compare, search};
