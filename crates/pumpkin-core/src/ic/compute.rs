//! Annotation counting and IC computation.
//!
//! Every `(entity, term)` annotation adds one to the counts of all reflexive
//! ancestors of the term and one to the explicit annotation total. Terms
//! unknown to the graph are skipped. Afterwards every term whose observed
//! count is zero receives one pseudo-annotation (Laplacian smoothing),
//! propagated to its ancestors the same way. The zero set is taken from a
//! snapshot before smoothing starts, so the result does not depend on term
//! order.

use tracing::{debug, instrument, warn};

use crate::Annotations;
use crate::graph::Graph;
use crate::term::TermId;

/// Per-term annotation counts after propagation and smoothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationCounts {
    /// Indexed by term id.
    pub counts: Vec<u64>,
    /// Explicit annotations plus one per smoothed term.
    pub explicit_annotations: u64,
    /// Number of terms that received a pseudo-annotation.
    pub smoothed: usize,
    /// Annotations naming terms outside the graph.
    pub skipped: usize,
}

#[instrument(skip_all, fields(terms = graph.len(), entities = annotations.len()))]
pub fn annotation_counts(graph: &Graph, annotations: &Annotations) -> AnnotationCounts {
    let mut counts = vec![0_u64; graph.len()];
    let mut explicit_annotations = 0_u64;
    let mut skipped = 0_usize;

    for terms in annotations.values() {
        for term in terms {
            let ancestors = graph.ancestors(term);
            if ancestors.ones().next().is_none() {
                skipped += 1;
                continue;
            }
            for id in ancestors.ones() {
                counts[id] += 1;
            }
            explicit_annotations += 1;
        }
    }

    if skipped > 0 {
        warn!(skipped, "annotations on terms outside the graph were ignored");
    }

    let unobserved: Vec<TermId> = counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count == 0)
        .map(|(id, _)| id)
        .collect();
    for &id in &unobserved {
        explicit_annotations += 1;
        for ancestor in graph.ancestors_of(id).ones() {
            counts[ancestor] += 1;
        }
    }

    debug!(
        explicit_annotations,
        smoothed = unobserved.len(),
        "annotation counts computed"
    );

    AnnotationCounts {
        counts,
        explicit_annotations,
        smoothed: unobserved.len(),
        skipped,
    }
}

/// IC per term id of `graph`.
#[must_use]
pub fn information_content(graph: &Graph, annotations: &Annotations) -> Vec<f64> {
    let tally = annotation_counts(graph, annotations);
    if tally.explicit_annotations == 0 {
        return vec![0.0; tally.counts.len()];
    }
    #[allow(clippy::cast_precision_loss)]
    let total = tally.explicit_annotations as f64;
    tally
        .counts
        .iter()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let count = count as f64;
            ic_from_frequency(count / total)
        })
        .collect()
}

/// `-ln(frequency)`, with 0 for frequencies of exactly 0 or 1.
#[must_use]
pub fn ic_from_frequency(frequency: f64) -> f64 {
    if frequency <= 0.0 || frequency >= 1.0 {
        0.0
    } else {
        -frequency.ln()
    }
}
