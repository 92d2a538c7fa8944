//! Closure graph: reflexive ancestor and descendant sets per term.
//!
//! # Overview
//!
//! The closure file already lists every `(child, ancestor)` pair of the
//! transitive closure. [`build::GraphBuilder`] restricts it to the subtree of a
//! chosen root, assigns dense ids and stores the closures with one of two
//! backends:
//!
//! - [`Backend::Bitset`] keeps one precomputed `FixedBitSet` per term and
//!   direction. Lookups borrow.
//! - [`Backend::Walk`] keeps only a `petgraph` `DiGraph` and runs a DFS per
//!   query. Lookups allocate.
//!
//! Both return `Cow<FixedBitSet>` so callers never care which one is in use.
//!
//! ## Pipeline
//!
//! ```text
//! closure edges (child, ancestor)
//!        ↓  build::RawClosure::from_edges()   (restrict to root subtree, reflexive)
//! RawClosure (string keyed)
//!        ↓  RawClosure::encode(order, backend)
//! Graph (dense ids, bitsets or petgraph walk, namespace sets)
//!        ↓  GraphBuilder::build_ic()          (IC-ascending re-encoding)
//! IcGraph
//! ```

pub mod build;
pub mod closure;
pub mod walk;

pub use build::{GraphBuilder, build_graph, build_ic_graph};
pub use closure::{Backend, Graph};
pub use walk::WalkGraph;
