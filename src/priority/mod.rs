//! Priority derivation and consistency measurement.
//!
//! Derives a normalized priority vector from a comparison matrix using the
//! geometric-mean approximation to the principal eigenvector, then measures
//! how internally consistent the judgments are:
//!
//! 1. `gmean[i] = (Π_j m[i][j])^(1/n)` for each row, normalized to sum to 1.
//! 2. `λmax = (1/n) · Σ_i (Σ_j m[i][j] · p[j]) / p[i]`, the principal
//!    eigenvalue estimate (equals `n` exactly for a perfectly consistent
//!    matrix).
//! 3. `CI = (λmax − n) / (n − 1)` for `n > 1`, else 0.
//! 4. `CR = CI / RI[n]` against Saaty's random-index table; `CR ≤ 0.10` is
//!    the accepted threshold. Comparisons of 2 or fewer items are always
//!    perfectly consistent.
//!
//! The formulas and the RI table are fixed: downstream consistency gating
//! depends on exact thresholds, so this module must stay deterministic.

use serde::{Deserialize, Serialize};

use crate::matrix::ComparisonMatrix;

/// Saaty's random consistency index, indexed by matrix order 1..=10.
///
/// Orders above 10 reuse the last entry.
pub const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// The accepted consistency-ratio threshold.
pub const CONSISTENCY_THRESHOLD: f64 = 0.10;

/// Priorities and consistency metrics derived from one comparison matrix.
///
/// Recomputed in full on every judgment change; never partially updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyAnalysis {
    /// Normalized priority weights, one per entity, summing to 1.
    pub priorities: Vec<f64>,
    /// Principal eigenvalue estimate.
    pub lambda_max: f64,
    /// Consistency index.
    pub ci: f64,
    /// Consistency ratio.
    pub cr: f64,
    /// `cr <= 0.10 || n <= 2`; consistency is not meaningful below 3 entities.
    pub is_consistent: bool,
}

impl ConsistencyAnalysis {
    /// Synthetic analysis for a manually specified weight vector.
    ///
    /// Manual weights bypass pairwise comparison entirely, so they are
    /// perfectly consistent by definition: `λmax = n`, `ci = cr = 0`.
    /// The weights are normalized to sum to 1.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_manual_weights(weights: &[f64]) -> Self {
        let sum: f64 = weights.iter().sum();
        let priorities = if sum > 0.0 {
            weights.iter().map(|w| w / sum).collect()
        } else {
            weights.to_vec()
        };
        Self {
            lambda_max: priorities.len() as f64,
            priorities,
            ci: 0.0,
            cr: 0.0,
            is_consistent: true,
        }
    }

    /// Consistency quality on a 0-100 scale for display gauges.
    ///
    /// 100 at `cr = 0`, falling linearly to 0 at the threshold.
    #[must_use]
    pub fn quality(&self) -> f64 {
        if self.cr <= 0.0 {
            100.0
        } else {
            ((1.0 - self.cr / CONSISTENCY_THRESHOLD) * 100.0).clamp(0.0, 100.0)
        }
    }
}

/// Derive priorities and consistency metrics from a comparison matrix.
///
/// Total over all well-formed matrices: order 0 yields the empty analysis
/// and order 1 yields a single priority of 1 with `λmax = 1`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn analyze(matrix: &ComparisonMatrix) -> ConsistencyAnalysis {
    let n = matrix.order();
    if n == 0 {
        return ConsistencyAnalysis {
            priorities: Vec::new(),
            lambda_max: 0.0,
            ci: 0.0,
            cr: 0.0,
            is_consistent: true,
        };
    }

    let priorities = priority_vector(matrix);
    let lambda_max = lambda_max(matrix, &priorities);
    let ci = consistency_index(lambda_max, n);
    let cr = consistency_ratio(ci, n);

    ConsistencyAnalysis {
        priorities,
        lambda_max,
        ci,
        cr,
        is_consistent: cr <= CONSISTENCY_THRESHOLD || n <= 2,
    }
}

/// Normalized geometric-mean priority vector of a matrix.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn priority_vector(matrix: &ComparisonMatrix) -> Vec<f64> {
    let n = matrix.order();
    if n == 0 {
        return Vec::new();
    }

    let mut priorities: Vec<f64> = (0..n)
        .map(|i| {
            let product: f64 = matrix.row(i).iter().product();
            product.powf(1.0 / n as f64)
        })
        .collect();

    let sum: f64 = priorities.iter().sum();
    for p in &mut priorities {
        *p /= sum;
    }
    priorities
}

/// Principal eigenvalue estimate for a matrix and its priority vector.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn lambda_max(matrix: &ComparisonMatrix, priorities: &[f64]) -> f64 {
    let n = matrix.order();
    if n == 0 {
        return 0.0;
    }

    let total: f64 = (0..n)
        .map(|i| {
            let weighted_sum: f64 = matrix
                .row(i)
                .iter()
                .zip(priorities)
                .map(|(value, p)| value * p)
                .sum();
            weighted_sum / priorities[i]
        })
        .sum();
    total / n as f64
}

/// Consistency index `(λmax − n) / (n − 1)`; 0 for degenerate orders.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn consistency_index(lambda_max: f64, n: usize) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    (lambda_max - n as f64) / (n as f64 - 1.0)
}

/// Consistency ratio `CI / RI[n]`; 0 for orders of 2 or fewer.
#[must_use]
pub fn consistency_ratio(ci: f64, n: usize) -> f64 {
    if n <= 2 {
        return 0.0;
    }
    let ri = RANDOM_INDEX[n.min(RANDOM_INDEX.len()) - 1];
    ci / ri
}

/// Format a unit-interval value as a percentage with two decimals.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Format a consistency ratio with four decimals.
#[must_use]
pub fn format_cr(cr: f64) -> String {
    format!("{cr:.4}")
}
