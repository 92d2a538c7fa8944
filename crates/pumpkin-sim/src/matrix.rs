//! Reductions of pairwise score matrices to a single score.
//!
//! Rows are query terms, columns are target terms. Every function accepts
//! ragged input: rows may differ in length and empty rows are skipped. An
//! empty matrix reduces to 0. The `*_percentage_score` variants divide a
//! query reduction by the same reduction of an optimal matrix and yield 0
//! when the optimal reduction is 0.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

pub type ScoreMatrix = Vec<Vec<f64>>;

// ---------------------------------------------------------------------------
// Reductions
// ---------------------------------------------------------------------------

#[must_use]
pub fn max_score(matrix: &[Vec<f64>]) -> f64 {
    matrix
        .iter()
        .flatten()
        .copied()
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Mean of the row maxima.
#[must_use]
pub fn bma_score(matrix: &[Vec<f64>]) -> f64 {
    mean(matrix.iter().filter_map(|row| row_max(row)))
}

/// Mean over the row maxima and the column maxima together.
#[must_use]
pub fn sym_bma_score(matrix: &[Vec<f64>]) -> f64 {
    let columns = flip_matrix(matrix);
    mean(
        matrix
            .iter()
            .chain(columns.iter())
            .filter_map(|row| row_max(row)),
    )
}

/// Mean of every cell.
#[must_use]
pub fn avg_score(matrix: &[Vec<f64>]) -> f64 {
    mean(matrix.iter().flatten().copied())
}

/// Mean of the row minima, for distance matrices.
#[must_use]
pub fn best_min_avg(matrix: &[Vec<f64>]) -> f64 {
    mean(matrix.iter().filter_map(|row| row.iter().copied().reduce(f64::min)))
}

/// Transpose; missing cells of ragged rows are left out.
#[must_use]
pub fn flip_matrix(matrix: &[Vec<f64>]) -> ScoreMatrix {
    let width = matrix.iter().map(Vec::len).max().unwrap_or(0);
    (0..width)
        .map(|col| matrix.iter().filter_map(|row| row.get(col).copied()).collect())
        .collect()
}

#[must_use]
pub fn max_percentage_score(query: &[Vec<f64>], optimal: &[Vec<f64>]) -> f64 {
    percentage(max_score(query), max_score(optimal))
}

#[must_use]
pub fn bma_percentage_score(query: &[Vec<f64>], optimal: &[Vec<f64>]) -> f64 {
    percentage(bma_score(query), bma_score(optimal))
}

#[must_use]
pub fn sym_bma_percentage_score(query: &[Vec<f64>], optimal: &[Vec<f64>]) -> f64 {
    percentage(sym_bma_score(query), sym_bma_score(optimal))
}

#[must_use]
pub fn avg_percentage_score(query: &[Vec<f64>], optimal: &[Vec<f64>]) -> f64 {
    percentage(avg_score(query), avg_score(optimal))
}

#[must_use]
pub fn best_min_avg_percentage_score(query: &[Vec<f64>], optimal: &[Vec<f64>]) -> f64 {
    percentage(best_min_avg(query), best_min_avg(optimal))
}

fn row_max(row: &[f64]) -> Option<f64> {
    row.iter().copied().reduce(f64::max)
}

fn percentage(query: f64, optimal: f64) -> f64 {
    if optimal == 0.0 { 0.0 } else { query / optimal }
}

pub(crate) fn mean<I: Iterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = count as f64;
    sum / count
}

// ---------------------------------------------------------------------------
// MatrixMetric
// ---------------------------------------------------------------------------

/// Which reduction a measure applies to its score matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixMetric {
    /// Best-match average.
    #[default]
    Bma,
    Max,
    Avg,
}

impl MatrixMetric {
    pub const ALL: [Self; 3] = [Self::Bma, Self::Max, Self::Avg];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bma => "bma",
            Self::Max => "max",
            Self::Avg => "avg",
        }
    }

    #[must_use]
    pub fn reduce(self, matrix: &[Vec<f64>]) -> f64 {
        match self {
            Self::Bma => bma_score(matrix),
            Self::Max => max_score(matrix),
            Self::Avg => avg_score(matrix),
        }
    }

    #[must_use]
    pub fn percentage(self, query: &[Vec<f64>], optimal: &[Vec<f64>]) -> f64 {
        match self {
            Self::Bma => bma_percentage_score(query, optimal),
            Self::Max => max_percentage_score(query, optimal),
            Self::Avg => avg_percentage_score(query, optimal),
        }
    }
}

impl fmt::Display for MatrixMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatrixMetric {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str() == wanted)
            .ok_or_else(|| SimError::UnknownMatrixMetric(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn sample() -> ScoreMatrix {
        vec![vec![1.0, 2.0, 3.0], vec![4.0, 0.5, 0.0]]
    }

    #[test]
    fn reductions_on_rectangular_matrix() {
        let m = sample();
        assert!(close(max_score(&m), 4.0));
        assert!(close(bma_score(&m), 3.5));
        // Row maxima 3, 4; column maxima 4, 2, 3.
        assert!(close(sym_bma_score(&m), 16.0 / 5.0));
        assert!(close(avg_score(&m), 10.5 / 6.0));
        assert!(close(best_min_avg(&m), 0.5));
    }

    #[test]
    fn flip_transposes_and_handles_ragged_rows() {
        assert_eq!(
            flip_matrix(&sample()),
            vec![vec![1.0, 4.0], vec![2.0, 0.5], vec![3.0, 0.0]]
        );
        let ragged = vec![vec![1.0], vec![2.0, 3.0], vec![]];
        assert_eq!(flip_matrix(&ragged), vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(close(bma_score(&ragged), 2.0));
    }

    #[test]
    fn empty_matrices_reduce_to_zero() {
        let empty: ScoreMatrix = Vec::new();
        assert!(close(max_score(&empty), 0.0));
        assert!(close(bma_score(&empty), 0.0));
        assert!(close(sym_bma_score(&empty), 0.0));
        assert!(close(avg_score(&empty), 0.0));
        assert!(close(best_min_avg(&[vec![]]), 0.0));
    }

    #[test]
    fn percentages_divide_by_optimal() {
        let query = sample();
        let optimal = vec![vec![8.0]];
        assert!(close(max_percentage_score(&query, &optimal), 0.5));
        assert!(close(bma_percentage_score(&query, &optimal), 3.5 / 8.0));
        assert!(close(avg_percentage_score(&query, &optimal), 1.75 / 8.0));
        assert!(close(best_min_avg_percentage_score(&query, &optimal), 0.5 / 8.0));
        assert!(close(sym_bma_percentage_score(&query, &optimal), 3.2 / 8.0));
        assert!(close(max_percentage_score(&query, &[vec![0.0]]), 0.0));
    }

    #[test]
    fn metric_parse_and_dispatch() {
        assert_eq!("BMA".parse::<MatrixMetric>().ok(), Some(MatrixMetric::Bma));
        assert!(matches!(
            "median".parse::<MatrixMetric>(),
            Err(SimError::UnknownMatrixMetric(_))
        ));
        let m = sample();
        assert!(close(MatrixMetric::Max.reduce(&m), 4.0));
        assert!(close(MatrixMetric::Avg.percentage(&m, &m), 1.0));
    }
}
