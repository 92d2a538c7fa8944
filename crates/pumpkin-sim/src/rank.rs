//! Ranking of scored matches.
//!
//! # Overview
//!
//! Results are sorted by descending score (stable, so equal scores keep
//! dataset order) and given dense ranks: equal scores share a rank and the
//! next distinct score takes the next integer. [`rerank_ties`] then turns
//! dense ranks into the requested tie convention.
//!
//! | method | scores `[9, 9, 8]` |
//! |--------|--------------------|
//! | min    | `[1, 1, 2]`        |
//! | max    | `[2, 2, 3]`        |
//! | avg    | `[2, 2, 3]`        |
//!
//! For `max` and `avg` a tie group occupies the ordinal positions after the
//! previous group's assigned rank. `avg` takes the mean of those positions,
//! rounding halves to even.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::search::SimMatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMethod {
    /// Dense ranks, unchanged.
    #[default]
    Min,
    Avg,
    Max,
}

impl RankMethod {
    pub const ALL: [Self; 3] = [Self::Min, Self::Avg, Self::Max];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Avg => "avg",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for RankMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankMethod {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == wanted)
            .ok_or_else(|| SimError::UnknownRankMethod(s.to_string()))
    }
}

/// Sort by descending score and assign ranks.
pub fn rank_results(results: &mut [SimMatch], method: RankMethod) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut dense = Vec::with_capacity(results.len());
    let mut previous: Option<f64> = None;
    let mut rank = 0;
    for result in results.iter() {
        if previous != Some(result.score) {
            rank += 1;
            previous = Some(result.score);
        }
        dense.push(rank);
    }

    for (result, rank) in results.iter_mut().zip(rerank_ties(&dense, method)) {
        result.rank = rank;
    }
}

/// Convert non-decreasing dense ranks to `method`'s tie convention.
#[must_use]
pub fn rerank_ties(ranks: &[usize], method: RankMethod) -> Vec<usize> {
    if method == RankMethod::Min {
        return ranks.to_vec();
    }

    let mut out = Vec::with_capacity(ranks.len());
    let mut previous = 0;
    for group in ranks.chunk_by(|a, b| a == b) {
        let size = group.len();
        let assigned = match method {
            RankMethod::Max => previous + size,
            RankMethod::Avg | RankMethod::Min => mean_position(previous, size),
        };
        out.extend(std::iter::repeat_n(assigned, size));
        previous = assigned;
    }
    out
}

/// Mean of positions `previous+1 ..= previous+size`, halves to even.
fn mean_position(previous: usize, size: usize) -> usize {
    let triangle = |n: usize| n * (n + 1) / 2;
    let sum = triangle(previous + size) - triangle(previous);
    let (quotient, remainder) = (sum / size, sum % size);
    match (2 * remainder).cmp(&size) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal if quotient % 2 == 0 => quotient,
        std::cmp::Ordering::Equal => quotient + 1,
    }
}
