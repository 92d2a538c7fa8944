#![forbid(unsafe_code)]
//! pumpkin-core library.
//!
//! Encodes an ontology's transitive closure into dense integer ids and answers
//! ancestor, descendant and most-informative-common-ancestor (MICA) queries
//! over it.
//!
//! # Overview
//!
//! - [`term::TermIndex`] maps curies to dense ids and back.
//! - [`graph::Graph`] holds the reflexive ancestor/descendant closures of every
//!   term below a root, backed either by precomputed bitsets or by a
//!   `petgraph` walk.
//! - [`ic`] computes information content from an annotation corpus and wraps
//!   a graph plus IC store into an [`ic::IcGraph`] with memoized MICA lookup.
//! - [`io`] reads the tab-separated closure and annotation files.
//! - [`config`] loads `pumpkin.toml`.
//!
//! # Conventions
//!
//! - **Errors**: Fallible operations return [`error::Result`] with a
//!   [`PumpkinError`] carrying a stable [`ErrorCode`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).
//! - **Ids**: Term ids are only meaningful relative to the [`TermIndex`] that
//!   issued them.

use std::collections::{BTreeMap, BTreeSet};

pub mod config;
pub mod error;
pub mod graph;
pub mod ic;
pub mod io;
pub mod namespace;
pub mod term;

pub use error::{ErrorCode, PumpkinError, Result};
pub use graph::{Backend, Graph, GraphBuilder, build_graph, build_ic_graph};
pub use ic::{CachePolicy, IcGraph, IcStore, MicaCache};
pub use namespace::Namespace;
pub use term::{TermId, TermIndex};

/// Entity id → the set of terms it is annotated with.
pub type Annotations = BTreeMap<String, BTreeSet<String>>;
