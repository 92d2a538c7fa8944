//! IC values per term id, plus the optional precomputed MICA matrix.

use std::sync::Arc;

use crate::error::{PumpkinError, Result};
use crate::term::{TermId, TermIndex};

// ---------------------------------------------------------------------------
// IcStore
// ---------------------------------------------------------------------------

/// Information content indexed by term id.
///
/// The store remembers the [`TermIndex`] it was built against; pairing it
/// with a graph that uses a different index is rejected by
/// [`crate::IcGraph::new`].
#[derive(Debug, Clone)]
pub struct IcStore {
    index: Arc<TermIndex>,
    ic: Vec<f64>,
    micas: Option<MicaMatrix>,
}

impl IcStore {
    /// # Errors
    ///
    /// Returns [`PumpkinError::IcLengthMismatch`] when `ic` does not hold
    /// exactly one value per indexed term.
    pub fn new(index: Arc<TermIndex>, ic: Vec<f64>) -> Result<Self> {
        if ic.len() != index.len() {
            return Err(PumpkinError::IcLengthMismatch {
                expected: index.len(),
                actual: ic.len(),
            });
        }
        Ok(Self {
            index,
            ic,
            micas: None,
        })
    }

    #[must_use]
    pub fn index(&self) -> &TermIndex {
        &self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ic.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ic.is_empty()
    }

    /// IC of an id; 0 for ids outside the store.
    #[must_use]
    pub fn ic(&self, id: TermId) -> f64 {
        self.ic.get(id).copied().unwrap_or(0.0)
    }

    /// IC of a curie; 0 for unknown curies.
    #[must_use]
    pub fn ic_of(&self, term: &str) -> f64 {
        self.index.id(term).map_or(0.0, |id| self.ic(id))
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.ic
    }

    #[must_use]
    pub fn max_ic(&self) -> f64 {
        self.ic.iter().copied().fold(0.0, f64::max)
    }

    /// Whether ids ascend with IC, which makes "largest common id" the MICA.
    #[must_use]
    pub fn is_ascending(&self) -> bool {
        self.ic.windows(2).all(|pair| pair[0] <= pair[1])
    }

    #[must_use]
    pub const fn mica_matrix(&self) -> Option<&MicaMatrix> {
        self.micas.as_ref()
    }

    pub(crate) fn set_mica_matrix(&mut self, matrix: MicaMatrix) {
        self.micas = Some(matrix);
    }
}

// ---------------------------------------------------------------------------
// MicaMatrix
// ---------------------------------------------------------------------------

/// Flattened upper-triangular table of MICA ids for every pair `i <= j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MicaMatrix {
    size: usize,
    micas: Vec<u32>,
}

impl MicaMatrix {
    /// Marks a pair with no common ancestor.
    pub const NONE: u32 = u32::MAX;

    /// Position of the unordered pair `(a, b)` in a matrix over `size` terms.
    #[must_use]
    pub const fn triangular_index(size: usize, a: usize, b: usize) -> usize {
        let (i, j) = if a <= b { (a, b) } else { (b, a) };
        i * (2 * size - i + 1) / 2 + (j - i)
    }

    /// Fill the table from `mica(i, j)` for every `i <= j`.
    ///
    /// Returns `None` when `size` ids do not fit the `u32` encoding.
    pub fn from_fn<F>(size: usize, mica: F) -> Option<Self>
    where
        F: Fn(TermId, TermId) -> Option<TermId>,
    {
        let limit = usize::try_from(Self::NONE).ok()?;
        if size >= limit {
            return None;
        }
        let mut micas = Vec::with_capacity(size * (size + 1) / 2);
        for i in 0..size {
            for j in i..size {
                let encoded = mica(i, j)
                    .and_then(|id| u32::try_from(id).ok())
                    .unwrap_or(Self::NONE);
                micas.push(encoded);
            }
        }
        Some(Self { size, micas })
    }

    /// Number of terms covered.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of stored pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.micas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.micas.is_empty()
    }

    /// `None` when either id is out of range; `Some(None)` when the pair has
    /// no common ancestor.
    #[must_use]
    pub fn get(&self, a: TermId, b: TermId) -> Option<Option<TermId>> {
        if a >= self.size || b >= self.size {
            return None;
        }
        let raw = *self.micas.get(Self::triangular_index(self.size, a, b))?;
        if raw == Self::NONE {
            return Some(None);
        }
        Some(usize::try_from(raw).ok())
    }
}
