//! What-if sensitivity analysis over criteria weights.
//!
//! Operates on committed results: the per-criterion alternative priority
//! vectors stay fixed while the criteria weights are perturbed, and global
//! priorities are recomputed for each perturbed vector. Three analyses are
//! provided:
//!
//! - **Tornado impacts**: ±20% perturbation per criterion, ranking which
//!   weight most threatens the current outcome.
//! - **Weight sweeps**: one global-priority curve per alternative as a
//!   chosen criterion's weight runs from 0% to 100%.
//! - **Critical points**: the first weight at which the committed top two
//!   alternatives swap, per criterion; none found means the decision is
//!   robust.
//!
//! A [`SensitivityWeights`] working copy holds the user's manual
//! re-weighting, independent from the committed results.

use serde::{Deserialize, Serialize};

use crate::aggregate::{global_priorities, RankedAlternative};
use crate::error::ModelError;

/// Renormalization kicks in once the weight sum drifts further than this
/// from 1.
pub const RENORMALIZE_TOLERANCE: f64 = 0.001;

/// Relative perturbation applied per criterion in the tornado analysis.
pub const TORNADO_VARIATION: f64 = 0.2;

/// Number of points in a weight-sweep curve (0%, 5%, ..., 100%).
pub const SWEEP_POINTS: usize = 21;

/// A mutable working copy of the criteria priority vector.
///
/// Edits go through [`SensitivityWeights::set`], which renormalizes the
/// full vector by uniform scaling whenever the sum drifts from 1. Uniform
/// scaling keeps every weight proportional to what the user last expressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityWeights {
    weights: Vec<f64>,
}

impl SensitivityWeights {
    /// Start a working copy from the committed criteria priorities.
    #[must_use]
    pub fn new(committed: &[f64]) -> Self {
        Self {
            weights: committed.to_vec(),
        }
    }

    /// Current weights.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Set one weight, then renormalize the vector to sum to 1.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::CriterionOutOfRange`] if `index` does not
    /// refer to a criterion.
    pub fn set(&mut self, index: usize, value: f64) -> Result<(), ModelError> {
        if index >= self.weights.len() {
            return Err(ModelError::CriterionOutOfRange {
                index,
                count: self.weights.len(),
            });
        }
        self.weights[index] = value.max(0.0);
        self.renormalize();
        Ok(())
    }

    fn renormalize(&mut self) {
        let total: f64 = self.weights.iter().sum();
        if total > 0.0 && (total - 1.0).abs() > RENORMALIZE_TOLERANCE {
            for w in &mut self.weights {
                *w /= total;
            }
        }
    }
}

/// How strongly one criterion's weight can move the outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionImpact {
    /// Criterion position.
    pub criterion: usize,
    /// Largest global-priority change across alternatives between the
    /// up- and down-perturbed weight vectors.
    pub impact: f64,
}

/// Global-priority curves across a weight sweep of one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepCurves {
    /// Criterion whose weight was swept.
    pub criterion: usize,
    /// Swept weight values, as fractions of 1.
    pub points: Vec<f64>,
    /// One curve per alternative, indexed like the alternative list; each
    /// curve holds the alternative's global priority at every point.
    pub curves: Vec<Vec<f64>>,
}

/// A weight at which the committed top two alternatives swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalPoint {
    /// Criterion whose weight crosses the inversion.
    pub criterion: usize,
    /// The criterion's committed weight.
    pub current_weight: f64,
    /// The first swept weight at which the swap occurs.
    pub inversion_weight: f64,
    /// Distance between the committed and inversion weights.
    pub margin: f64,
    /// The alternative that overtakes (the committed #2).
    pub winner: String,
    /// The alternative that is overtaken (the committed #1).
    pub loser: String,
}

/// One alternative's standing under re-weighted criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReweightedAlternative {
    /// Original insertion position of the alternative.
    pub index: usize,
    /// Alternative name.
    pub name: String,
    /// Global priority under the working weights.
    pub priority: f64,
    /// Difference from the committed global priority.
    pub change: f64,
    /// Rank under the working weights (1 = best).
    pub rank: u32,
}

/// Rebuild a weight vector with `criterion` pinned to `weight` and the
/// remaining weights rescaled proportionally so the total stays 1.
///
/// If the other weights sum to 0 they stay 0.
fn with_pinned_weight(base: &[f64], criterion: usize, weight: f64) -> Vec<f64> {
    let other_total: f64 = base
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != criterion)
        .map(|(_, w)| w)
        .sum();

    base.iter()
        .enumerate()
        .map(|(i, &w)| {
            if i == criterion {
                weight
            } else if other_total > 0.0 {
                w * (1.0 - weight) / other_total
            } else {
                0.0
            }
        })
        .collect()
}

/// Tornado analysis: perturb each criterion's weight by ±20% and measure
/// the largest swing any alternative's global priority takes.
///
/// The perturbed vector is renormalized by its own sum, preserving the
/// relative ratios of all weights. Results are sorted by descending impact
/// (stable, so equal impacts keep criterion order).
#[must_use]
pub fn tornado(base: &[f64], by_criterion: &[Vec<f64>]) -> Vec<CriterionImpact> {
    let mut impacts: Vec<CriterionImpact> = (0..base.len())
        .map(|criterion| {
            let up = perturbed(base, criterion, 1.0 + TORNADO_VARIATION);
            let down = perturbed(base, criterion, 1.0 - TORNADO_VARIATION);

            let globals_up = global_priorities(&up, by_criterion);
            let globals_down = global_priorities(&down, by_criterion);

            let impact = globals_up
                .iter()
                .zip(&globals_down)
                .map(|(u, d)| (u - d).abs())
                .fold(0.0, f64::max);

            CriterionImpact { criterion, impact }
        })
        .collect();

    impacts.sort_by(|a, b| {
        b.impact
            .partial_cmp(&a.impact)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    impacts
}

fn perturbed(base: &[f64], criterion: usize, factor: f64) -> Vec<f64> {
    let mut weights = base.to_vec();
    weights[criterion] = (weights[criterion] * factor).clamp(0.0, 1.0);
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for w in &mut weights {
            *w /= total;
        }
    }
    weights
}

/// Sweep one criterion's weight across 21 points from 0% to 100% and
/// recompute every alternative's global priority at each point.
#[must_use]
pub fn weight_sweep(base: &[f64], by_criterion: &[Vec<f64>], criterion: usize) -> SweepCurves {
    let alternative_count = by_criterion.first().map_or(0, Vec::len);
    let points: Vec<f64> = (0..=100u32)
        .step_by(5)
        .map(|percent| f64::from(percent) / 100.0)
        .collect();

    let mut curves = vec![Vec::with_capacity(points.len()); alternative_count];
    for &point in &points {
        let weights = with_pinned_weight(base, criterion, point);
        let globals = global_priorities(&weights, by_criterion);
        for (curve, global) in curves.iter_mut().zip(globals) {
            curve.push(global);
        }
    }

    SweepCurves {
        criterion,
        points,
        curves,
    }
}

/// Find, per criterion, the first weight at which the committed #1
/// alternative drops strictly below the committed #2.
///
/// Sweeps each weight from 0% to 100% in 1% steps with the remaining
/// weights rescaled proportionally. An empty result means no tested
/// variation flips the top ranking: the decision is robust.
///
/// Rankings with fewer than two entries have nothing to invert and yield
/// an empty result.
#[must_use]
pub fn critical_points(
    base: &[f64],
    by_criterion: &[Vec<f64>],
    ranking: &[RankedAlternative],
) -> Vec<CriticalPoint> {
    let (Some(first), Some(second)) = (ranking.first(), ranking.get(1)) else {
        return Vec::new();
    };

    (0..base.len())
        .filter_map(|criterion| {
            let inversion = (0..=100u32).find_map(|percent| {
                let weight = f64::from(percent) / 100.0;
                let weights = with_pinned_weight(base, criterion, weight);
                let globals = global_priorities(&weights, by_criterion);
                (globals[first.index] < globals[second.index]).then_some(weight)
            })?;

            Some(CriticalPoint {
                criterion,
                current_weight: base[criterion],
                inversion_weight: inversion,
                margin: (inversion - base[criterion]).abs(),
                winner: second.name.clone(),
                loser: first.name.clone(),
            })
        })
        .collect()
}

/// True when no critical point was found for any criterion.
#[must_use]
pub fn is_robust(points: &[CriticalPoint]) -> bool {
    points.is_empty()
}

/// Ranking under the working weights, with per-alternative deltas against
/// the committed global priorities.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn reweighted_ranking(
    weights: &SensitivityWeights,
    by_criterion: &[Vec<f64>],
    names: &[String],
    committed_globals: &[f64],
) -> Vec<ReweightedAlternative> {
    let globals = global_priorities(weights.weights(), by_criterion);

    let mut ranking: Vec<ReweightedAlternative> = names
        .iter()
        .zip(&globals)
        .enumerate()
        .map(|(index, (name, &priority))| ReweightedAlternative {
            index,
            name: name.clone(),
            priority,
            change: priority - committed_globals.get(index).copied().unwrap_or(0.0),
            rank: 0,
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.priority
            .partial_cmp(&a.priority)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (position, entry) in ranking.iter_mut().enumerate() {
        entry.rank = position as u32 + 1;
    }
    ranking
}
