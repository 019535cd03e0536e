//! Error types for the AHP decision engine.
//!
//! This module defines a hierarchical error system:
//! - [`AhpError`]: Top-level application errors
//! - [`ModelError`]: Decision model validation errors
//! - [`MatrixError`]: Comparison matrix mutation errors
//! - [`ProjectError`]: Project persistence errors
//!
//! Every variant is a validation failure surfaced synchronously at a state
//! transition boundary; a failed transition leaves all state unchanged. The
//! priority, aggregation, and sensitivity functions are total over
//! well-formed matrices and never return errors.

use thiserror::Error;

/// Identifies which pairwise judgment set a validation failure refers to.
///
/// Validation walks criteria first, then each criterion's alternatives in
/// criterion order; the first offending set is reported so the caller can
/// re-select the corresponding input view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgmentSet {
    /// The criteria-versus-criteria comparison set.
    Criteria,
    /// The alternatives comparison set under one criterion.
    Alternatives {
        /// Position of the criterion the comparisons belong to.
        criterion: usize,
    },
}

impl std::fmt::Display for JudgmentSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Criteria => write!(f, "criteria"),
            Self::Alternatives { criterion } => {
                write!(f, "alternatives under criterion {criterion}")
            }
        }
    }
}

/// Top-level application error.
///
/// This is the main error type returned by public API functions.
/// It wraps all subsystem errors for unified error handling.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AhpError {
    /// Decision model validation error.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Comparison matrix mutation error.
    #[error("Matrix error: {0}")]
    Matrix(#[from] MatrixError),

    /// Project persistence error.
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),
}

/// Decision model validation errors.
///
/// These errors reject invalid entity lists, weight vectors, and judgment
/// states at the boundary of a state transition.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// Fewer than the minimum number of criteria.
    #[error("At least {minimum} criteria are required")]
    TooFewCriteria {
        /// The minimum allowed count.
        minimum: usize,
    },

    /// More than the maximum number of criteria.
    #[error("At most {maximum} criteria are allowed")]
    TooManyCriteria {
        /// The maximum allowed count.
        maximum: usize,
    },

    /// Fewer than the minimum number of alternatives.
    #[error("At least {minimum} alternatives are required")]
    TooFewAlternatives {
        /// The minimum allowed count.
        minimum: usize,
    },

    /// More than the maximum number of alternatives.
    #[error("At most {maximum} alternatives are allowed")]
    TooManyAlternatives {
        /// The maximum allowed count.
        maximum: usize,
    },

    /// An entity name is already present in the list.
    #[error("Duplicate name: {name}")]
    DuplicateName {
        /// The rejected name.
        name: String,
    },

    /// An entity name is empty after trimming.
    #[error("Name must not be empty")]
    EmptyName,

    /// A criterion index does not refer to an existing criterion.
    #[error("Criterion index {index} out of range (count: {count})")]
    CriterionOutOfRange {
        /// The rejected index.
        index: usize,
        /// The number of criteria.
        count: usize,
    },

    /// An alternative index does not refer to an existing alternative.
    #[error("Alternative index {index} out of range (count: {count})")]
    AlternativeOutOfRange {
        /// The rejected index.
        index: usize,
        /// The number of alternatives.
        count: usize,
    },

    /// Manual criteria weights do not sum to 100%.
    #[error("Manual weights sum to {sum:.1}%, expected 100% ± 0.1")]
    WeightSumInvalid {
        /// The actual sum of the weight percentages.
        sum: f64,
    },

    /// The manual weight vector length does not match the criteria count.
    #[error("Expected {expected} manual weights, got {actual}")]
    WeightCountMismatch {
        /// The number of criteria.
        expected: usize,
        /// The number of weights provided.
        actual: usize,
    },

    /// A pairwise judgment was routed to criteria while manual weights are
    /// active.
    #[error("Criteria judgments are disabled while manual weights are active")]
    ManualWeightsActive,

    /// A judgment set has no consistency analysis yet, or its matrix is
    /// incomplete.
    #[error("Judgments missing for {set}")]
    MissingJudgments {
        /// The first judgment set with missing judgments.
        set: JudgmentSet,
    },

    /// A judgment set is complete but logically inconsistent.
    #[error("Inconsistent judgments for {set}: CR = {cr:.4} exceeds 0.10")]
    InconsistentJudgments {
        /// The first inconsistent judgment set.
        set: JudgmentSet,
        /// The offending consistency ratio.
        cr: f64,
    },
}

/// Comparison matrix mutation errors.
///
/// The matrix `set` primitive is the only mutation path; these errors
/// prevent malformed matrices from ever existing, so downstream engines
/// need no runtime validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatrixError {
    /// Attempted to judge an entity against itself.
    #[error("Cannot judge index {index} against itself")]
    DiagonalJudgment {
        /// The diagonal index.
        index: usize,
    },

    /// A row or column index is outside the matrix.
    #[error("Index ({row}, {col}) out of bounds for order {order}")]
    IndexOutOfBounds {
        /// The row index.
        row: usize,
        /// The column index.
        col: usize,
        /// The matrix order.
        order: usize,
    },

    /// A comparison value must be strictly positive.
    #[error("Comparison value must be positive, got {value}")]
    NonPositiveValue {
        /// The rejected value.
        value: f64,
    },
}

/// Project persistence errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProjectError {
    /// No project is stored under the given name.
    #[error("Project not found: {name}")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// A project name must not be empty.
    #[error("Project name must not be empty")]
    NameEmpty,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    // Type assertions - verify all errors implement required traits
    assert_impl_all!(AhpError: Send, Sync, std::error::Error, Clone);
    assert_impl_all!(ModelError: Send, Sync, std::error::Error, Clone);
    assert_impl_all!(MatrixError: Send, Sync, std::error::Error, Clone);
    assert_impl_all!(ProjectError: Send, Sync, std::error::Error, Clone);

    #[test]
    fn test_ahp_error_display_model() {
        let err = AhpError::Model(ModelError::TooFewCriteria { minimum: 2 });
        assert_eq!(
            err.to_string(),
            "Model error: At least 2 criteria are required"
        );
    }

    #[test]
    fn test_ahp_error_display_matrix() {
        let err = AhpError::Matrix(MatrixError::DiagonalJudgment { index: 3 });
        assert_eq!(
            err.to_string(),
            "Matrix error: Cannot judge index 3 against itself"
        );
    }

    #[test]
    fn test_ahp_error_display_project() {
        let err = AhpError::Project(ProjectError::NotFound {
            name: "car choice".to_string(),
        });
        assert_eq!(err.to_string(), "Project error: Project not found: car choice");
    }

    #[test]
    fn test_ahp_error_from_model_error() {
        let model_err = ModelError::EmptyName;
        let err: AhpError = model_err.into();
        assert!(matches!(err, AhpError::Model(_)));
    }

    #[test]
    fn test_ahp_error_from_matrix_error() {
        let matrix_err = MatrixError::NonPositiveValue { value: -1.0 };
        let err: AhpError = matrix_err.into();
        assert!(matches!(err, AhpError::Matrix(_)));
    }

    #[test]
    fn test_ahp_error_from_project_error() {
        let project_err = ProjectError::NameEmpty;
        let err: AhpError = project_err.into();
        assert!(matches!(err, AhpError::Project(_)));
    }

    #[test]
    fn test_model_error_display_weight_sum() {
        let err = ModelError::WeightSumInvalid { sum: 98.5 };
        assert_eq!(
            err.to_string(),
            "Manual weights sum to 98.5%, expected 100% ± 0.1"
        );
    }

    #[test]
    fn test_model_error_display_missing_judgments() {
        let err = ModelError::MissingJudgments {
            set: JudgmentSet::Alternatives { criterion: 2 },
        };
        assert_eq!(
            err.to_string(),
            "Judgments missing for alternatives under criterion 2"
        );
    }

    #[test]
    fn test_model_error_display_inconsistent_judgments() {
        let err = ModelError::InconsistentJudgments {
            set: JudgmentSet::Criteria,
            cr: 0.2345,
        };
        assert_eq!(
            err.to_string(),
            "Inconsistent judgments for criteria: CR = 0.2345 exceeds 0.10"
        );
    }

    #[test]
    fn test_model_error_display_duplicate_name() {
        let err = ModelError::DuplicateName {
            name: "Price".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate name: Price");
    }

    #[test]
    fn test_matrix_error_display_out_of_bounds() {
        let err = MatrixError::IndexOutOfBounds {
            row: 4,
            col: 1,
            order: 3,
        };
        assert_eq!(err.to_string(), "Index (4, 1) out of bounds for order 3");
    }

    #[test]
    fn test_matrix_error_display_non_positive() {
        let err = MatrixError::NonPositiveValue { value: 0.0 };
        assert_eq!(err.to_string(), "Comparison value must be positive, got 0");
    }

    #[test]
    fn test_project_error_display_not_found() {
        let err = ProjectError::NotFound {
            name: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "Project not found: missing");
    }

    #[test]
    fn test_project_error_display_name_empty() {
        let err = ProjectError::NameEmpty;
        assert_eq!(err.to_string(), "Project name must not be empty");
    }

    #[test]
    fn test_judgment_set_display() {
        assert_eq!(JudgmentSet::Criteria.to_string(), "criteria");
        assert_eq!(
            JudgmentSet::Alternatives { criterion: 0 }.to_string(),
            "alternatives under criterion 0"
        );
    }

    #[test]
    fn test_judgment_set_serialize() {
        assert_eq!(
            serde_json::to_string(&JudgmentSet::Criteria).unwrap(),
            "\"criteria\""
        );
        assert_eq!(
            serde_json::to_string(&JudgmentSet::Alternatives { criterion: 1 }).unwrap(),
            r#"{"alternatives":{"criterion":1}}"#
        );
    }

    #[test]
    fn test_model_error_clone_eq() {
        let err = ModelError::InconsistentJudgments {
            set: JudgmentSet::Criteria,
            cr: 0.15,
        };
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
