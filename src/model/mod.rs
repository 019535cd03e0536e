//! The decision model: single source of truth for one AHP session.
//!
//! A [`DecisionModel`] holds the objective, the criteria and alternative
//! lists, every comparison matrix, and the cached consistency analyses.
//! The engine modules ([`crate::priority`], [`crate::aggregate`],
//! [`crate::sensitivity`]) are stateless and operate on views of it.
//!
//! Mutation and consistency refresh are separate, explicitly callable
//! steps: [`DecisionModel::apply_judgment`] only writes the matrix, and the
//! caller decides when to run [`DecisionModel::refresh_criteria_consistency`]
//! or [`DecisionModel::refresh_alternatives_consistency`] (for example,
//! debounced under rapid slider input).
//!
//! All validation happens synchronously at a state-transition boundary and
//! a failed transition leaves the model exactly as it was.

use serde::{Deserialize, Serialize};

use crate::aggregate::{self, RankedAlternative};
use crate::error::{AhpError, JudgmentSet, ModelError};
use crate::matrix::ComparisonMatrix;
use crate::priority::{self, ConsistencyAnalysis};
use crate::scale;

/// Minimum number of criteria and of alternatives.
pub const MIN_ENTITIES: usize = 2;

/// Maximum number of criteria and of alternatives.
pub const MAX_ENTITIES: usize = 10;

/// Allowed deviation of a manual weight sum from 100%.
pub const MANUAL_WEIGHT_TOLERANCE: f64 = 0.1;

/// How the criteria priority vector is obtained.
///
/// Manual weights bypass pairwise comparison entirely; they are percentages
/// expected to sum to 100 and are wrapped into a synthetic, perfectly
/// consistent analysis when priorities are needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaWeighting {
    /// Weights derived from a pairwise comparison matrix.
    Pairwise(ComparisonMatrix),
    /// Weights specified directly as percentages.
    Manual(Vec<f64>),
}

/// Committed computation results, derived on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Results {
    /// Normalized criteria weights.
    pub criteria_priorities: Vec<f64>,
    /// One alternative priority vector per criterion, in criterion order.
    pub alternative_priorities: Vec<Vec<f64>>,
    /// Global priority per alternative, in insertion order.
    pub global_priorities: Vec<f64>,
    /// Alternatives sorted by descending global priority.
    pub ranking: Vec<RankedAlternative>,
}

/// The full working state of one decision.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionModel {
    objective: String,
    criteria: Vec<String>,
    alternatives: Vec<String>,
    weighting: CriteriaWeighting,
    alternatives_matrices: Vec<ComparisonMatrix>,
    criteria_analysis: Option<ConsistencyAnalysis>,
    alternatives_analyses: Vec<Option<ConsistencyAnalysis>>,
}

impl Default for DecisionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionModel {
    /// An empty model: no objective, no entities, pairwise weighting.
    #[must_use]
    pub fn new() -> Self {
        Self {
            objective: String::new(),
            criteria: Vec::new(),
            alternatives: Vec::new(),
            weighting: CriteriaWeighting::Pairwise(ComparisonMatrix::new(0)),
            alternatives_matrices: Vec::new(),
            criteria_analysis: None,
            alternatives_analyses: Vec::new(),
        }
    }

    /// Rebuild a model from persisted parts.
    ///
    /// Used by project deserialization; list invariants are re-validated by
    /// the computation gates, not here.
    pub(crate) fn from_parts(
        objective: String,
        criteria: Vec<String>,
        alternatives: Vec<String>,
        weighting: CriteriaWeighting,
        alternatives_matrices: Vec<ComparisonMatrix>,
    ) -> Self {
        let criterion_count = criteria.len();
        Self {
            objective,
            criteria,
            alternatives,
            weighting,
            alternatives_matrices,
            criteria_analysis: None,
            alternatives_analyses: vec![None; criterion_count],
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The decision objective.
    #[must_use]
    pub fn objective(&self) -> &str {
        &self.objective
    }

    /// Set the decision objective.
    pub fn set_objective(&mut self, objective: impl Into<String>) {
        self.objective = objective.into();
    }

    /// Ordered criteria names.
    #[must_use]
    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    /// Ordered alternative names.
    #[must_use]
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// The active criteria weighting variant.
    #[must_use]
    pub const fn weighting(&self) -> &CriteriaWeighting {
        &self.weighting
    }

    /// True while manual criteria weights are active.
    #[must_use]
    pub const fn uses_manual_weights(&self) -> bool {
        matches!(self.weighting, CriteriaWeighting::Manual(_))
    }

    /// The alternatives comparison matrix for one criterion.
    #[must_use]
    pub fn alternatives_matrix(&self, criterion: usize) -> Option<&ComparisonMatrix> {
        self.alternatives_matrices.get(criterion)
    }

    /// Cached criteria consistency analysis, if refreshed.
    #[must_use]
    pub const fn criteria_analysis(&self) -> Option<&ConsistencyAnalysis> {
        self.criteria_analysis.as_ref()
    }

    /// Cached alternatives consistency analysis for one criterion.
    #[must_use]
    pub fn alternatives_analysis(&self, criterion: usize) -> Option<&ConsistencyAnalysis> {
        self.alternatives_analyses.get(criterion)?.as_ref()
    }

    // ========================================================================
    // Entity lists
    // ========================================================================

    /// Add a criterion.
    ///
    /// The name is trimmed; the criteria comparison matrix is rebuilt for
    /// the new count and a fresh alternatives matrix is appended for the
    /// new criterion.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the name is empty after trimming, already
    /// present, or the list is full. The model is unchanged on error.
    pub fn add_criterion(&mut self, name: &str) -> Result<(), ModelError> {
        let name = Self::validated_name(name, &self.criteria)?;
        if self.criteria.len() >= MAX_ENTITIES {
            return Err(ModelError::TooManyCriteria {
                maximum: MAX_ENTITIES,
            });
        }

        self.criteria.push(name);
        self.rebuild_criteria_weighting();
        self.alternatives_matrices
            .push(ComparisonMatrix::new(self.alternatives.len()));
        self.alternatives_analyses.push(None);
        tracing::debug!(count = self.criteria.len(), "Criterion added");
        Ok(())
    }

    /// Remove the criterion at `index`, along with its alternatives matrix
    /// and analysis. The criteria comparison matrix is rebuilt.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::CriterionOutOfRange`] if `index` is out of
    /// range.
    pub fn remove_criterion(&mut self, index: usize) -> Result<(), ModelError> {
        if index >= self.criteria.len() {
            return Err(ModelError::CriterionOutOfRange {
                index,
                count: self.criteria.len(),
            });
        }

        self.criteria.remove(index);
        self.alternatives_matrices.remove(index);
        self.alternatives_analyses.remove(index);
        if let CriteriaWeighting::Manual(weights) = &mut self.weighting {
            weights.remove(index);
        }
        self.rebuild_criteria_weighting();
        tracing::debug!(count = self.criteria.len(), "Criterion removed");
        Ok(())
    }

    /// Add an alternative.
    ///
    /// Every alternatives comparison matrix is rebuilt for the new count;
    /// existing alternative judgments are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the name is empty after trimming, already
    /// present, or the list is full. The model is unchanged on error.
    pub fn add_alternative(&mut self, name: &str) -> Result<(), ModelError> {
        let name = Self::validated_name(name, &self.alternatives)?;
        if self.alternatives.len() >= MAX_ENTITIES {
            return Err(ModelError::TooManyAlternatives {
                maximum: MAX_ENTITIES,
            });
        }

        self.alternatives.push(name);
        self.rebuild_alternatives_matrices();
        tracing::debug!(count = self.alternatives.len(), "Alternative added");
        Ok(())
    }

    /// Remove the alternative at `index` and rebuild every alternatives
    /// comparison matrix.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::AlternativeOutOfRange`] if `index` is out of
    /// range.
    pub fn remove_alternative(&mut self, index: usize) -> Result<(), ModelError> {
        if index >= self.alternatives.len() {
            return Err(ModelError::AlternativeOutOfRange {
                index,
                count: self.alternatives.len(),
            });
        }

        self.alternatives.remove(index);
        self.rebuild_alternatives_matrices();
        tracing::debug!(count = self.alternatives.len(), "Alternative removed");
        Ok(())
    }

    fn validated_name(name: &str, existing: &[String]) -> Result<String, ModelError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ModelError::EmptyName);
        }
        if existing.iter().any(|n| n == name) {
            return Err(ModelError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(name.to_string())
    }

    fn rebuild_criteria_weighting(&mut self) {
        match &mut self.weighting {
            CriteriaWeighting::Pairwise(_) => {
                self.weighting =
                    CriteriaWeighting::Pairwise(ComparisonMatrix::new(self.criteria.len()));
            }
            CriteriaWeighting::Manual(weights) => {
                weights.resize(self.criteria.len(), 0.0);
            }
        }
        self.criteria_analysis = None;
    }

    fn rebuild_alternatives_matrices(&mut self) {
        let order = self.alternatives.len();
        for matrix in &mut self.alternatives_matrices {
            *matrix = ComparisonMatrix::new(order);
        }
        for analysis in &mut self.alternatives_analyses {
            *analysis = None;
        }
    }

    // ========================================================================
    // Criteria weighting
    // ========================================================================

    /// Switch to manual criteria weights, given as percentages.
    ///
    /// The sum is validated at the computation gate, not here, so partial
    /// entry is allowed while the user is still typing.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::WeightCountMismatch`] if the vector length
    /// does not match the criteria count.
    pub fn set_manual_weights(&mut self, weights: Vec<f64>) -> Result<(), ModelError> {
        if weights.len() != self.criteria.len() {
            return Err(ModelError::WeightCountMismatch {
                expected: self.criteria.len(),
                actual: weights.len(),
            });
        }
        self.weighting = CriteriaWeighting::Manual(weights);
        self.criteria_analysis = None;
        Ok(())
    }

    /// Switch back to pairwise criteria weighting with a fresh matrix.
    pub fn use_pairwise_weighting(&mut self) {
        self.weighting = CriteriaWeighting::Pairwise(ComparisonMatrix::new(self.criteria.len()));
        self.criteria_analysis = None;
    }

    // ========================================================================
    // Judgments
    // ========================================================================

    /// Apply one slider judgment to the targeted comparison matrix.
    ///
    /// `position` is a Saaty control position in `[-9, 9]`; it is decoded
    /// through the scale codec and written with the matrix's reciprocal
    /// `set` primitive. Consistency is deliberately not recomputed here;
    /// call the matching refresh when ready.
    ///
    /// # Errors
    ///
    /// Returns [`AhpError`] if criteria judgments are routed while manual
    /// weights are active, the criterion index is out of range, or the
    /// matrix rejects the pair.
    pub fn apply_judgment(
        &mut self,
        set: JudgmentSet,
        a: usize,
        b: usize,
        position: i8,
    ) -> Result<(), AhpError> {
        let value = scale::comparison_value(position);
        match set {
            JudgmentSet::Criteria => match &mut self.weighting {
                CriteriaWeighting::Manual(_) => {
                    return Err(ModelError::ManualWeightsActive.into());
                }
                CriteriaWeighting::Pairwise(matrix) => matrix.set(a, b, value)?,
            },
            JudgmentSet::Alternatives { criterion } => {
                let count = self.alternatives_matrices.len();
                let matrix = self.alternatives_matrices.get_mut(criterion).ok_or(
                    ModelError::CriterionOutOfRange {
                        index: criterion,
                        count,
                    },
                )?;
                matrix.set(a, b, value)?;
            }
        }
        tracing::debug!(%set, a, b, position, "Judgment applied");
        Ok(())
    }

    /// Recompute the criteria consistency analysis.
    ///
    /// In manual mode this produces the synthetic, perfectly consistent
    /// analysis from the current weights.
    pub fn refresh_criteria_consistency(&mut self) {
        self.criteria_analysis = Some(match &self.weighting {
            CriteriaWeighting::Pairwise(matrix) => priority::analyze(matrix),
            CriteriaWeighting::Manual(weights) => ConsistencyAnalysis::from_manual_weights(weights),
        });
        tracing::debug!("Criteria consistency refreshed");
    }

    /// Recompute the alternatives consistency analysis for one criterion.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::CriterionOutOfRange`] if `criterion` is out of
    /// range.
    pub fn refresh_alternatives_consistency(&mut self, criterion: usize) -> Result<(), ModelError> {
        let count = self.alternatives_matrices.len();
        let matrix =
            self.alternatives_matrices
                .get(criterion)
                .ok_or(ModelError::CriterionOutOfRange {
                    index: criterion,
                    count,
                })?;
        self.alternatives_analyses[criterion] = Some(priority::analyze(matrix));
        tracing::debug!(criterion, "Alternatives consistency refreshed");
        Ok(())
    }

    // ========================================================================
    // Validation and results
    // ========================================================================

    /// Validate every judgment set, criteria first, then alternatives in
    /// criterion order.
    ///
    /// Distinguishes judgment sets that are missing (never refreshed, or
    /// with unjudged pairs) from sets that are complete but inconsistent,
    /// and reports the first offender so the caller can re-select the
    /// corresponding input view.
    ///
    /// # Errors
    ///
    /// Returns the first [`ModelError`] found, in validation order.
    pub fn validate_judgments(&self) -> Result<(), ModelError> {
        match &self.weighting {
            CriteriaWeighting::Manual(weights) => {
                if weights.len() != self.criteria.len() {
                    return Err(ModelError::WeightCountMismatch {
                        expected: self.criteria.len(),
                        actual: weights.len(),
                    });
                }
                let sum: f64 = weights.iter().sum();
                if (sum - 100.0).abs() > MANUAL_WEIGHT_TOLERANCE {
                    return Err(ModelError::WeightSumInvalid { sum });
                }
            }
            CriteriaWeighting::Pairwise(matrix) => {
                Self::validate_set(matrix, self.criteria_analysis.as_ref(), JudgmentSet::Criteria)?;
            }
        }

        for (criterion, matrix) in self.alternatives_matrices.iter().enumerate() {
            Self::validate_set(
                matrix,
                self.alternatives_analyses[criterion].as_ref(),
                JudgmentSet::Alternatives { criterion },
            )?;
        }
        Ok(())
    }

    fn validate_set(
        matrix: &ComparisonMatrix,
        analysis: Option<&ConsistencyAnalysis>,
        set: JudgmentSet,
    ) -> Result<(), ModelError> {
        let Some(analysis) = analysis else {
            return Err(ModelError::MissingJudgments { set });
        };
        if !matrix.is_complete() {
            return Err(ModelError::MissingJudgments { set });
        }
        if !analysis.is_consistent {
            return Err(ModelError::InconsistentJudgments {
                set,
                cr: analysis.cr,
            });
        }
        Ok(())
    }

    fn validate_entities(&self) -> Result<(), ModelError> {
        if self.criteria.len() < MIN_ENTITIES {
            return Err(ModelError::TooFewCriteria {
                minimum: MIN_ENTITIES,
            });
        }
        if self.criteria.len() > MAX_ENTITIES {
            return Err(ModelError::TooManyCriteria {
                maximum: MAX_ENTITIES,
            });
        }
        if self.alternatives.len() < MIN_ENTITIES {
            return Err(ModelError::TooFewAlternatives {
                minimum: MIN_ENTITIES,
            });
        }
        if self.alternatives.len() > MAX_ENTITIES {
            return Err(ModelError::TooManyAlternatives {
                maximum: MAX_ENTITIES,
            });
        }
        Ok(())
    }

    /// The normalized criteria priority vector.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingJudgments`] if the criteria analysis
    /// has not been refreshed in pairwise mode.
    pub fn criteria_priorities(&self) -> Result<Vec<f64>, ModelError> {
        match &self.weighting {
            CriteriaWeighting::Manual(weights) => {
                Ok(ConsistencyAnalysis::from_manual_weights(weights).priorities)
            }
            CriteriaWeighting::Pairwise(_) => self
                .criteria_analysis
                .as_ref()
                .map(|analysis| analysis.priorities.clone())
                .ok_or(ModelError::MissingJudgments {
                    set: JudgmentSet::Criteria,
                }),
        }
    }

    /// Validate the full model and compute committed results.
    ///
    /// Runs the entity-count checks, the judgment gate, the priority
    /// engine per judgment set, and the aggregator. Never partially
    /// updates: the model itself is not modified.
    ///
    /// # Errors
    ///
    /// Returns the first [`ModelError`] in criteria-then-alternatives
    /// order.
    pub fn compute_results(&self) -> Result<Results, ModelError> {
        self.validate_entities()?;
        if let Err(e) = self.validate_judgments() {
            tracing::warn!(error = %e, "Judgment validation failed");
            return Err(e);
        }

        let criteria_priorities = self.criteria_priorities()?;
        let alternative_priorities: Vec<Vec<f64>> = self
            .alternatives_analyses
            .iter()
            .enumerate()
            .map(|(criterion, analysis)| {
                analysis
                    .as_ref()
                    .map(|a| a.priorities.clone())
                    .ok_or(ModelError::MissingJudgments {
                        set: JudgmentSet::Alternatives { criterion },
                    })
            })
            .collect::<Result<_, _>>()?;

        let global_priorities =
            aggregate::global_priorities(&criteria_priorities, &alternative_priorities);
        let ranking = aggregate::rank(&self.alternatives, &global_priorities);

        tracing::info!(
            criteria = self.criteria.len(),
            alternatives = self.alternatives.len(),
            best = ranking.first().map_or("none", |r| r.name.as_str()),
            "Results computed"
        );

        Ok(Results {
            criteria_priorities,
            alternative_priorities,
            global_priorities,
            ranking,
        })
    }

    /// Discard everything and return to the empty model.
    pub fn reset(&mut self) {
        *self = Self::new();
        tracing::debug!("Model reset");
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    /// A 2-criterion, 2-alternative model with every judgment applied and
    /// refreshed.
    fn ready_model() -> DecisionModel {
        let mut model = DecisionModel::new();
        model.set_objective("Choose a laptop");
        model.add_criterion("Price").unwrap();
        model.add_criterion("Performance").unwrap();
        model.add_alternative("Laptop A").unwrap();
        model.add_alternative("Laptop B").unwrap();

        model
            .apply_judgment(JudgmentSet::Criteria, 0, 1, 3)
            .unwrap();
        model.refresh_criteria_consistency();
        for criterion in 0..2 {
            model
                .apply_judgment(JudgmentSet::Alternatives { criterion }, 0, 1, 2)
                .unwrap();
            model.refresh_alternatives_consistency(criterion).unwrap();
        }
        model
    }

    #[test]
    fn test_add_criterion_trims_and_stores() {
        let mut model = DecisionModel::new();
        model.add_criterion("  Price  ").unwrap();
        assert_eq!(model.criteria(), ["Price"]);
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let mut model = DecisionModel::new();
        assert_eq!(model.add_criterion("   "), Err(ModelError::EmptyName));
        assert!(model.criteria().is_empty());
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let mut model = DecisionModel::new();
        model.add_criterion("Price").unwrap();
        assert_eq!(
            model.add_criterion("Price"),
            Err(ModelError::DuplicateName {
                name: "Price".to_string()
            })
        );
    }

    #[test]
    fn test_add_rejects_eleventh_entity() {
        let mut model = DecisionModel::new();
        for i in 0..MAX_ENTITIES {
            model.add_criterion(&format!("C{i}")).unwrap();
        }
        assert_eq!(
            model.add_criterion("C10"),
            Err(ModelError::TooManyCriteria {
                maximum: MAX_ENTITIES
            })
        );
        assert_eq!(model.criteria().len(), MAX_ENTITIES);
    }

    #[test]
    fn test_adding_criterion_rebuilds_criteria_matrix() {
        let mut model = DecisionModel::new();
        model.add_criterion("A").unwrap();
        model.add_criterion("B").unwrap();
        model.apply_judgment(JudgmentSet::Criteria, 0, 1, 5).unwrap();

        model.add_criterion("C").unwrap();
        let CriteriaWeighting::Pairwise(matrix) = model.weighting() else {
            panic!("expected pairwise weighting");
        };
        assert_eq!(matrix.order(), 3);
        // Rebuilt: the earlier judgment is gone
        assert_eq!(matrix.get(0, 1), 1.0);
        assert!(!matrix.is_judged(0, 1));
    }

    #[test]
    fn test_adding_alternative_rebuilds_alternative_matrices() {
        let mut model = ready_model();
        assert!(model.alternatives_matrix(0).unwrap().is_complete());

        model.add_alternative("Laptop C").unwrap();
        let matrix = model.alternatives_matrix(0).unwrap();
        assert_eq!(matrix.order(), 3);
        assert!(!matrix.is_complete());
        assert!(model.alternatives_analysis(0).is_none());
    }

    #[test]
    fn test_remove_criterion_drops_its_matrix() {
        let mut model = ready_model();
        model.remove_criterion(0).unwrap();
        assert_eq!(model.criteria(), ["Performance"]);
        assert_eq!(model.alternatives_matrices.len(), 1);
        assert_eq!(model.alternatives_analyses.len(), 1);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut model = DecisionModel::new();
        assert_eq!(
            model.remove_criterion(0),
            Err(ModelError::CriterionOutOfRange { index: 0, count: 0 })
        );
        assert_eq!(
            model.remove_alternative(3),
            Err(ModelError::AlternativeOutOfRange { index: 3, count: 0 })
        );
    }

    #[test]
    fn test_judgment_does_not_refresh_consistency() {
        let mut model = DecisionModel::new();
        model.add_criterion("A").unwrap();
        model.add_criterion("B").unwrap();
        model.apply_judgment(JudgmentSet::Criteria, 0, 1, 4).unwrap();
        // Mutation and refresh are separate steps
        assert!(model.criteria_analysis().is_none());
        model.refresh_criteria_consistency();
        assert!(model.criteria_analysis().is_some());
    }

    #[test]
    fn test_criteria_judgment_rejected_in_manual_mode() {
        let mut model = DecisionModel::new();
        model.add_criterion("A").unwrap();
        model.add_criterion("B").unwrap();
        model.set_manual_weights(vec![60.0, 40.0]).unwrap();

        let err = model
            .apply_judgment(JudgmentSet::Criteria, 0, 1, 3)
            .unwrap_err();
        assert_eq!(err, AhpError::Model(ModelError::ManualWeightsActive));
    }

    #[test]
    fn test_manual_weights_length_checked() {
        let mut model = DecisionModel::new();
        model.add_criterion("A").unwrap();
        model.add_criterion("B").unwrap();
        assert_eq!(
            model.set_manual_weights(vec![100.0]),
            Err(ModelError::WeightCountMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test_case(vec![60.0, 40.0], true; "exact hundred")]
    #[test_case(vec![60.05, 40.0], true; "within tolerance")]
    #[test_case(vec![60.0, 41.0], false; "one percent over")]
    #[test_case(vec![50.0, 40.0], false; "ten percent short")]
    fn test_manual_weight_sum_gate(weights: Vec<f64>, valid: bool) {
        let mut model = DecisionModel::new();
        model.add_criterion("A").unwrap();
        model.add_criterion("B").unwrap();
        model.add_alternative("X").unwrap();
        model.add_alternative("Y").unwrap();
        model.set_manual_weights(weights).unwrap();
        for criterion in 0..2 {
            model
                .apply_judgment(JudgmentSet::Alternatives { criterion }, 0, 1, 2)
                .unwrap();
            model.refresh_alternatives_consistency(criterion).unwrap();
        }

        let result = model.validate_judgments();
        if valid {
            assert!(result.is_ok());
        } else {
            assert!(matches!(result, Err(ModelError::WeightSumInvalid { .. })));
        }
    }

    #[test]
    fn test_validation_reports_criteria_first() {
        let mut model = DecisionModel::new();
        model.add_criterion("A").unwrap();
        model.add_criterion("B").unwrap();
        model.add_alternative("X").unwrap();
        model.add_alternative("Y").unwrap();

        // Nothing judged anywhere: the criteria set is reported first
        assert_eq!(
            model.validate_judgments(),
            Err(ModelError::MissingJudgments {
                set: JudgmentSet::Criteria
            })
        );
    }

    #[test]
    fn test_validation_walks_alternatives_in_criterion_order() {
        let mut model = ready_model();
        model.add_criterion("Weight").unwrap();
        // The new criterion's alternatives matrix was never judged
        assert_eq!(
            model.compute_results(),
            Err(ModelError::MissingJudgments {
                set: JudgmentSet::Criteria
            })
        );
        // Criteria matrix was rebuilt by the add; re-judge and refresh
        model.apply_judgment(JudgmentSet::Criteria, 0, 1, 3).unwrap();
        model.apply_judgment(JudgmentSet::Criteria, 0, 2, 3).unwrap();
        model.apply_judgment(JudgmentSet::Criteria, 1, 2, 1).unwrap();
        model.refresh_criteria_consistency();

        assert_eq!(
            model.validate_judgments(),
            Err(ModelError::MissingJudgments {
                set: JudgmentSet::Alternatives { criterion: 2 }
            })
        );
    }

    #[test]
    fn test_validation_distinguishes_inconsistent_from_missing() {
        let mut model = DecisionModel::new();
        for name in ["A", "B", "C"] {
            model.add_criterion(name).unwrap();
        }
        model.add_alternative("X").unwrap();
        model.add_alternative("Y").unwrap();

        // An intransitive preference cycle among the criteria
        model.apply_judgment(JudgmentSet::Criteria, 0, 1, 9).unwrap();
        model.apply_judgment(JudgmentSet::Criteria, 1, 2, 9).unwrap();
        model.apply_judgment(JudgmentSet::Criteria, 2, 0, 9).unwrap();
        model.refresh_criteria_consistency();

        let err = model.validate_judgments().unwrap_err();
        assert!(matches!(
            err,
            ModelError::InconsistentJudgments {
                set: JudgmentSet::Criteria,
                ..
            }
        ));
    }

    #[test]
    fn test_compute_results_requires_two_of_each() {
        let mut model = DecisionModel::new();
        model.add_criterion("A").unwrap();
        assert_eq!(
            model.compute_results(),
            Err(ModelError::TooFewCriteria { minimum: 2 })
        );
    }

    #[test]
    fn test_compute_results_end_to_end() {
        let model = ready_model();
        let results = model.compute_results().unwrap();

        assert_eq!(results.criteria_priorities.len(), 2);
        assert_eq!(results.alternative_priorities.len(), 2);
        assert_eq!(results.global_priorities.len(), 2);

        let sum: f64 = results.global_priorities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);

        // Laptop A was judged better under both criteria
        assert_eq!(results.ranking[0].name, "Laptop A");
        assert_eq!(results.ranking[0].rank, 1);
        assert_eq!(results.ranking[1].rank, 2);
    }

    #[test]
    fn test_compute_results_is_idempotent() {
        let model = ready_model();
        let first = model.compute_results().unwrap();
        let second = model.compute_results().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_manual_weights_flow_to_results() {
        let mut model = DecisionModel::new();
        model.add_criterion("A").unwrap();
        model.add_criterion("B").unwrap();
        model.add_alternative("X").unwrap();
        model.add_alternative("Y").unwrap();
        model.set_manual_weights(vec![75.0, 25.0]).unwrap();
        for criterion in 0..2 {
            model
                .apply_judgment(JudgmentSet::Alternatives { criterion }, 0, 1, 2)
                .unwrap();
            model.refresh_alternatives_consistency(criterion).unwrap();
        }

        let results = model.compute_results().unwrap();
        assert!((results.criteria_priorities[0] - 0.75).abs() < 1e-12);
        assert!((results.criteria_priorities[1] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_failed_transition_leaves_state_unchanged() {
        let mut model = ready_model();
        let before = model.clone();
        assert!(model.add_criterion("Price").is_err());
        assert!(model.add_alternative("").is_err());
        assert_eq!(model, before);
    }

    #[test]
    fn test_reset_returns_to_empty() {
        let mut model = ready_model();
        model.reset();
        assert_eq!(model, DecisionModel::new());
    }

    #[test]
    fn test_manual_weight_vector_resizes_with_criteria() {
        let mut model = DecisionModel::new();
        model.add_criterion("A").unwrap();
        model.add_criterion("B").unwrap();
        model.set_manual_weights(vec![60.0, 40.0]).unwrap();

        model.add_criterion("C").unwrap();
        assert_eq!(
            model.weighting(),
            &CriteriaWeighting::Manual(vec![60.0, 40.0, 0.0])
        );

        model.remove_criterion(1).unwrap();
        assert_eq!(
            model.weighting(),
            &CriteriaWeighting::Manual(vec![60.0, 0.0])
        );
    }
}
