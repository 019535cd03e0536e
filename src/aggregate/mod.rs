//! Global priority aggregation and ranking.
//!
//! Combines a criteria priority vector with per-criterion alternative
//! priority vectors into one global score per alternative:
//! `global[a] = Σ_c criteria[c] · by_criterion[c][a]`.
//!
//! The result is a convex combination of vectors that each sum to 1, so it
//! sums to 1 by construction; no renormalization is applied.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One alternative's place in the final ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    /// Original insertion position of the alternative.
    pub index: usize,
    /// Alternative name.
    pub name: String,
    /// Global priority.
    pub priority: f64,
    /// Rank (1 = best).
    pub rank: u32,
}

/// Weighted-aggregate global priority per alternative.
///
/// `by_criterion` holds one alternative priority vector per criterion, in
/// criterion order; all vectors must have the same length.
#[must_use]
pub fn global_priorities(criteria: &[f64], by_criterion: &[Vec<f64>]) -> Vec<f64> {
    let alternative_count = by_criterion.first().map_or(0, Vec::len);
    let mut globals = vec![0.0; alternative_count];

    for (weight, priorities) in criteria.iter().zip(by_criterion) {
        for (global, priority) in globals.iter_mut().zip(priorities) {
            *global += weight * priority;
        }
    }
    globals
}

/// Rank alternatives by descending global priority.
///
/// The sort is stable: exact ties keep original insertion order. Each entry
/// keeps its original index so downstream analysis can refer back into the
/// priority vectors.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn rank(names: &[String], globals: &[f64]) -> Vec<RankedAlternative> {
    let mut ranking: Vec<RankedAlternative> = names
        .iter()
        .zip(globals)
        .enumerate()
        .map(|(index, (name, &priority))| RankedAlternative {
            index,
            name: name.clone(),
            priority,
            rank: 0,
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.priority
            .partial_cmp(&a.priority)
            .unwrap_or(Ordering::Equal)
    });
    for (position, entry) in ranking.iter_mut().enumerate() {
        entry.rank = position as u32 + 1;
    }
    ranking
}
