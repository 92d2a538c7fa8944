//! Information content and MICA lookup.
//!
//! # Overview
//!
//! - [`compute`] counts annotations (propagated to ancestors, with Laplacian
//!   smoothing for unobserved terms) and turns frequencies into
//!   `IC(t) = -ln(freq(t))`.
//! - [`store::IcStore`] holds one IC value per term id, tied to the
//!   [`crate::TermIndex`] it was built for.
//! - [`graph::IcGraph`] pairs a closure graph with a store and answers MICA
//!   queries through an optional precomputed matrix and a [`cache::MicaCache`].

pub mod cache;
pub mod compute;
pub mod graph;
pub mod store;

pub use cache::{CachePolicy, CacheSnapshot, MicaCache, MicaKey};
pub use compute::{AnnotationCounts, annotation_counts, ic_from_frequency, information_content};
pub use graph::IcGraph;
pub use store::{IcStore, MicaMatrix};
