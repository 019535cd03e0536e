//! Reciprocal pairwise-comparison matrices.
//!
//! A [`ComparisonMatrix`] is a square matrix of positive reals where entry
//! `(i, j)` expresses how much entity `i` is preferred over entity `j`.
//! Two invariants are structural, never validated after the fact:
//!
//! - the diagonal is all ones;
//! - reciprocity: `m[i][j] * m[j][i] == 1` for all `i != j`, because
//!   [`ComparisonMatrix::set`] writes both cells of a pair atomically and is
//!   the only mutation primitive.
//!
//! Each unordered pair additionally carries an explicit "judged" flag, so a
//! genuine judgment of equal importance (value 1) is distinguishable from a
//! pair that was never touched.

use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

/// A square reciprocal comparison matrix with per-pair judgment tracking.
///
/// Created as an all-ones matrix sized to the current entity count and
/// discarded/rebuilt whenever that count changes. Order 0 and 1 matrices
/// are degenerate but valid: trivially consistent, with no pairs to judge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "MatrixRepr", try_from = "MatrixRepr")]
pub struct ComparisonMatrix {
    order: usize,
    values: Vec<f64>,
    judged: Vec<bool>,
}

impl ComparisonMatrix {
    /// Create an `order` × `order` matrix filled with ones, nothing judged.
    #[must_use]
    pub fn new(order: usize) -> Self {
        Self {
            order,
            values: vec![1.0; order * order],
            judged: vec![false; order * order],
        }
    }

    /// Number of rows (and columns).
    #[must_use]
    pub const fn order(&self) -> usize {
        self.order
    }

    /// True for the degenerate order-0 matrix.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.order == 0
    }

    /// The comparison value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.order && col < self.order, "index out of bounds");
        self.values[row * self.order + col]
    }

    /// A full row of comparison values.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        assert!(row < self.order, "row out of bounds");
        &self.values[row * self.order..(row + 1) * self.order]
    }

    /// Record a judgment: entity `row` is `value` times as important as
    /// entity `col`.
    ///
    /// Writes `value` at `(row, col)` and `1/value` at `(col, row)` in one
    /// step and marks the pair as judged.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError`] if the indices are equal or out of bounds,
    /// or if `value` is not strictly positive. The matrix is unchanged on
    /// error.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MatrixError> {
        if row >= self.order || col >= self.order {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                order: self.order,
            });
        }
        if row == col {
            return Err(MatrixError::DiagonalJudgment { index: row });
        }
        if value <= 0.0 || !value.is_finite() {
            return Err(MatrixError::NonPositiveValue { value });
        }

        self.values[row * self.order + col] = value;
        self.values[col * self.order + row] = 1.0 / value;
        self.judged[row * self.order + col] = true;
        self.judged[col * self.order + row] = true;
        Ok(())
    }

    /// Whether the pair `(row, col)` has received a judgment.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    #[must_use]
    pub fn is_judged(&self, row: usize, col: usize) -> bool {
        assert!(row < self.order && col < self.order, "index out of bounds");
        self.judged[row * self.order + col]
    }

    /// True once every off-diagonal pair has been judged.
    ///
    /// Relies on the explicit judged flags: a pair deliberately judged as
    /// equal importance counts as complete even though its value is 1.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        for i in 0..self.order {
            for j in (i + 1)..self.order {
                if !self.judged[i * self.order + j] {
                    return false;
                }
            }
        }
        true
    }
}

/// Wire representation: nested value rows plus the judged mask.
///
/// Records written before the judged mask existed are plain nested arrays;
/// those load with `judged = (value != 1)`, the historical convention.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum MatrixRepr {
    Masked {
        values: Vec<Vec<f64>>,
        judged: Vec<Vec<bool>>,
    },
    Legacy(Vec<Vec<f64>>),
}

impl From<ComparisonMatrix> for MatrixRepr {
    fn from(matrix: ComparisonMatrix) -> Self {
        let n = matrix.order;
        let values = (0..n)
            .map(|i| matrix.values[i * n..(i + 1) * n].to_vec())
            .collect();
        let judged = (0..n)
            .map(|i| matrix.judged[i * n..(i + 1) * n].to_vec())
            .collect();
        Self::Masked { values, judged }
    }
}

impl TryFrom<MatrixRepr> for ComparisonMatrix {
    type Error = String;

    fn try_from(repr: MatrixRepr) -> Result<Self, Self::Error> {
        let (rows, judged_rows) = match repr {
            MatrixRepr::Masked { values, judged } => (values, Some(judged)),
            MatrixRepr::Legacy(values) => (values, None),
        };

        let order = rows.len();
        let mut values = Vec::with_capacity(order * order);
        for row in &rows {
            if row.len() != order {
                return Err(format!(
                    "matrix is not square: row of length {} in order-{order} matrix",
                    row.len()
                ));
            }
            for &value in row {
                if value <= 0.0 || !value.is_finite() {
                    return Err(format!("comparison value must be positive, got {value}"));
                }
                values.push(value);
            }
        }

        let judged = match judged_rows {
            Some(mask_rows) => {
                if mask_rows.len() != order || mask_rows.iter().any(|r| r.len() != order) {
                    return Err("judged mask does not match matrix order".to_string());
                }
                mask_rows.into_iter().flatten().collect()
            }
            None => values.iter().map(|&v| (v - 1.0).abs() > f64::EPSILON).collect(),
        };

        Ok(Self {
            order,
            values,
            judged,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_new_is_all_ones() {
        let matrix = ComparisonMatrix::new(3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(matrix.get(i, j), 1.0);
            }
        }
        assert!(!matrix.is_complete());
    }

    #[test]
    fn test_order_zero_is_empty_and_complete() {
        let matrix = ComparisonMatrix::new(0);
        assert!(matrix.is_empty());
        assert_eq!(matrix.order(), 0);
        assert!(matrix.is_complete());
    }

    #[test]
    fn test_order_one_is_complete() {
        let matrix = ComparisonMatrix::new(1);
        assert!(matrix.is_complete());
        assert_eq!(matrix.get(0, 0), 1.0);
    }

    #[test]
    fn test_set_writes_both_cells() {
        let mut matrix = ComparisonMatrix::new(3);
        matrix.set(0, 1, 4.0).unwrap();
        assert_eq!(matrix.get(0, 1), 4.0);
        assert_eq!(matrix.get(1, 0), 0.25);
    }

    #[test]
    fn test_set_rejects_diagonal() {
        let mut matrix = ComparisonMatrix::new(3);
        let err = matrix.set(1, 1, 2.0).unwrap_err();
        assert_eq!(err, MatrixError::DiagonalJudgment { index: 1 });
    }

    #[test]
    fn test_set_rejects_out_of_bounds() {
        let mut matrix = ComparisonMatrix::new(2);
        let err = matrix.set(0, 5, 2.0).unwrap_err();
        assert_eq!(
            err,
            MatrixError::IndexOutOfBounds {
                row: 0,
                col: 5,
                order: 2
            }
        );
    }

    #[test]
    fn test_set_rejects_non_positive() {
        let mut matrix = ComparisonMatrix::new(2);
        assert!(matrix.set(0, 1, 0.0).is_err());
        assert!(matrix.set(0, 1, -3.0).is_err());
        assert!(matrix.set(0, 1, f64::NAN).is_err());
        // Unchanged after rejected writes
        assert_eq!(matrix.get(0, 1), 1.0);
        assert!(!matrix.is_judged(0, 1));
    }

    #[test]
    fn test_judged_equal_importance_counts_as_complete() {
        let mut matrix = ComparisonMatrix::new(2);
        assert!(!matrix.is_complete());
        // An explicit "equal importance" judgment leaves the value at 1
        matrix.set(0, 1, 1.0).unwrap();
        assert!(matrix.is_complete());
        assert_eq!(matrix.get(0, 1), 1.0);
    }

    #[test]
    fn test_is_complete_requires_every_pair() {
        let mut matrix = ComparisonMatrix::new(3);
        matrix.set(0, 1, 3.0).unwrap();
        matrix.set(0, 2, 5.0).unwrap();
        assert!(!matrix.is_complete());
        matrix.set(1, 2, 2.0).unwrap();
        assert!(matrix.is_complete());
    }

    #[test]
    fn test_serde_round_trip_preserves_values_and_mask() {
        let mut matrix = ComparisonMatrix::new(3);
        matrix.set(0, 1, 1.0 / 3.0).unwrap();
        matrix.set(1, 2, 7.0).unwrap();

        let json = serde_json::to_string(&matrix).unwrap();
        let restored: ComparisonMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(matrix, restored);
        assert!(restored.is_judged(0, 1));
        assert!(!restored.is_judged(0, 2));
    }

    #[test]
    fn test_deserialize_legacy_nested_arrays() {
        let json = "[[1.0,3.0],[0.3333333333333333,1.0]]";
        let matrix: ComparisonMatrix = serde_json::from_str(json).unwrap();
        assert_eq!(matrix.order(), 2);
        assert_eq!(matrix.get(0, 1), 3.0);
        // Legacy convention: value != 1 means judged
        assert!(matrix.is_judged(0, 1));
        assert!(!matrix.is_judged(0, 0));
    }

    #[test]
    fn test_deserialize_rejects_non_square() {
        let json = "[[1.0,2.0],[0.5]]";
        assert!(serde_json::from_str::<ComparisonMatrix>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_non_positive() {
        let json = "[[1.0,-2.0],[0.5,1.0]]";
        assert!(serde_json::from_str::<ComparisonMatrix>(json).is_err());
    }

    proptest! {
        #[test]
        fn prop_reciprocity_holds_after_any_set(
            order in 2usize..=10,
            row in 0usize..10,
            col in 0usize..10,
            value in 1.0f64 / 9.0..=9.0,
        ) {
            let row = row % order;
            let col = col % order;
            let mut matrix = ComparisonMatrix::new(order);
            if matrix.set(row, col, value).is_ok() {
                let product = matrix.get(row, col) * matrix.get(col, row);
                prop_assert!((product - 1.0).abs() < 1e-12);
            }
        }
    }
}
