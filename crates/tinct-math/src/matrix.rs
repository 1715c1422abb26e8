//! General small-matrix algebra.
//!
//! [`Matrix`] is the general-purpose companion to the fixed [`Mat3`]: an
//! immutable list-of-rows with shape checked at construction. Color work
//! only ever needs 3x3 and 3x1, but the encoding layer solves its
//! white-point system through this type, and determinant/inverse are
//! implemented for arbitrary sizes (closed form through 4x4, elimination
//! with partial pivoting beyond).
//!
//! [`RowVector`] and [`ColVector`] are thin wrappers distinguishing
//! orientation for multiplication semantics.
//!
//! [`Mat3`]: crate::Mat3

use std::fmt;

use serde::Serialize;

use tinct_core::{Error, Result};

use crate::{Mat3, Vec3};

/// Determinant magnitude below which a matrix is treated as singular.
const SINGULARITY_THRESHOLD: f64 = 1e-10;

/// An immutable dense matrix of `f64` elements.
///
/// Row and column counts are fixed at construction; every row must have
/// the same length.
///
/// # Example
///
/// ```rust
/// use tinct_math::Matrix;
///
/// let m = Matrix::from_rows(vec![
///     vec![1.0, 2.0],
///     vec![3.0, 4.0],
/// ]).unwrap();
///
/// assert_eq!(m.determinant().unwrap(), -2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    rows: Vec<Vec<f64>>,
    row_count: usize,
    col_count: usize,
}

impl Matrix {
    /// Creates a matrix from rows, checking that all rows have the same
    /// length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != col_count {
                return Err(Error::RaggedRows {
                    row: i,
                    expected: col_count,
                    got: row.len(),
                });
            }
        }
        Ok(Self {
            rows,
            row_count,
            col_count,
        })
    }

    /// Creates an `n` x `n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let rows = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        Self {
            rows,
            row_count: n,
            col_count: n,
        }
    }

    /// Creates a square matrix with `diagonal` on the main diagonal.
    pub fn diagonal(diagonal: &[f64]) -> Self {
        let n = diagonal.len();
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { diagonal[i] } else { 0.0 })
                    .collect()
            })
            .collect();
        Self {
            rows,
            row_count: n,
            col_count: n,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    #[inline]
    pub fn col_count(&self) -> usize {
        self.col_count
    }

    /// The (row, col) shape.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.col_count)
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.row_count == self.col_count
    }

    /// Element at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    /// The rows of the matrix.
    #[inline]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Multiplies every element by a scalar.
    pub fn mul_scalar(&self, scalar: f64) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| row.iter().map(|v| v * scalar).collect())
            .collect();
        Self {
            rows,
            row_count: self.row_count,
            col_count: self.col_count,
        }
    }

    /// Standard row-by-column matrix product.
    ///
    /// The left operand's column count must equal the right operand's row
    /// count.
    pub fn mul_mat(&self, other: &Self) -> Result<Self> {
        if self.col_count != other.row_count {
            return Err(Error::dimension_mismatch(
                "matrix multiply",
                self.shape(),
                other.shape(),
            ));
        }
        let rows = (0..self.row_count)
            .map(|i| {
                (0..other.col_count)
                    .map(|j| {
                        (0..self.col_count)
                            .map(|k| self.rows[i][k] * other.rows[k][j])
                            .sum()
                    })
                    .collect()
            })
            .collect();
        Ok(Self {
            rows,
            row_count: self.row_count,
            col_count: other.col_count,
        })
    }

    /// Multiplies by a column vector.
    pub fn mul_col(&self, vector: &ColVector) -> Result<ColVector> {
        if self.col_count != vector.len() {
            return Err(Error::dimension_mismatch(
                "matrix-vector multiply",
                self.shape(),
                (vector.len(), 1),
            ));
        }
        let values = self
            .rows
            .iter()
            .map(|row| row.iter().zip(vector.values()).map(|(a, b)| a * b).sum())
            .collect();
        Ok(ColVector::new(values))
    }

    /// Adds a same-shape matrix.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, "matrix add", |a, b| a + b)
    }

    /// Subtracts a same-shape matrix.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, "matrix subtract", |a, b| a - b)
    }

    fn zip_with(&self, other: &Self, operation: &'static str, f: impl Fn(f64, f64) -> f64) -> Result<Self> {
        if self.shape() != other.shape() {
            return Err(Error::dimension_mismatch(operation, self.shape(), other.shape()));
        }
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| a.iter().zip(b).map(|(x, y)| f(*x, *y)).collect())
            .collect();
        Ok(Self {
            rows,
            row_count: self.row_count,
            col_count: self.col_count,
        })
    }

    /// Returns the transpose.
    pub fn transpose(&self) -> Self {
        let rows = (0..self.col_count)
            .map(|j| (0..self.row_count).map(|i| self.rows[i][j]).collect())
            .collect();
        Self {
            rows,
            row_count: self.col_count,
            col_count: self.row_count,
        }
    }

    /// Computes the determinant.
    ///
    /// Closed-form cofactor expansion for orders 0 through 4; Gaussian
    /// elimination with partial pivoting (tracking sign flips from row
    /// swaps) for anything larger. Non-square matrices are a domain error.
    pub fn determinant(&self) -> Result<f64> {
        if !self.is_square() {
            return Err(Error::NotSquare {
                rows: self.row_count,
                cols: self.col_count,
            });
        }
        let m = &self.rows;
        let det = match self.row_count {
            0 => 1.0,
            1 => m[0][0],
            2 => m[0][0] * m[1][1] - m[0][1] * m[1][0],
            3 => {
                m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
                    - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
                    + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
            }
            4 => {
                // Expand along the first row; each cofactor is a 3x3
                // determinant.
                let mut det = 0.0;
                for j in 0..4 {
                    let minor = self.minor(0, j);
                    let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                    det += sign * m[0][j] * minor.determinant()?;
                }
                det
            }
            _ => self.determinant_by_elimination(),
        };
        Ok(det)
    }

    /// Gaussian elimination with partial pivoting.
    fn determinant_by_elimination(&self) -> f64 {
        let n = self.row_count;
        let mut work = self.rows.clone();
        let mut det = 1.0;

        for col in 0..n {
            // Pivot on the largest magnitude in this column.
            let pivot_row = (col..n)
                .max_by(|&a, &b| {
                    work[a][col]
                        .abs()
                        .partial_cmp(&work[b][col].abs())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .unwrap_or(col);
            if work[pivot_row][col].abs() < SINGULARITY_THRESHOLD {
                return 0.0;
            }
            if pivot_row != col {
                work.swap(pivot_row, col);
                det = -det;
            }
            det *= work[col][col];
            for row in (col + 1)..n {
                let factor = work[row][col] / work[col][col];
                for k in col..n {
                    work[row][k] -= factor * work[col][k];
                }
            }
        }
        det
    }

    /// The matrix with `row` and `col` removed.
    fn minor(&self, row: usize, col: usize) -> Self {
        let rows: Vec<Vec<f64>> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != row)
            .map(|(_, r)| {
                r.iter()
                    .enumerate()
                    .filter(|(j, _)| *j != col)
                    .map(|(_, v)| *v)
                    .collect()
            })
            .collect();
        let n = rows.len();
        Self {
            rows,
            row_count: n,
            col_count: n,
        }
    }

    /// Computes the inverse.
    ///
    /// Closed form for 1x1 and 2x2; Gauss-Jordan elimination with partial
    /// pivoting otherwise. Raises [`Error::SingularMatrix`] when
    /// `|det| < 1e-10`.
    pub fn inverse(&self) -> Result<Self> {
        if !self.is_square() {
            return Err(Error::NotSquare {
                rows: self.row_count,
                cols: self.col_count,
            });
        }
        let det = self.determinant()?;
        if det.abs() < SINGULARITY_THRESHOLD {
            return Err(Error::singular(det));
        }

        match self.row_count {
            1 => Self::from_rows(vec![vec![1.0 / self.rows[0][0]]]),
            2 => {
                let m = &self.rows;
                let inv_det = 1.0 / det;
                Self::from_rows(vec![
                    vec![m[1][1] * inv_det, -m[0][1] * inv_det],
                    vec![-m[1][0] * inv_det, m[0][0] * inv_det],
                ])
            }
            _ => self.inverse_by_gauss_jordan(),
        }
    }

    /// Gauss-Jordan elimination of `[self | I]` with partial pivoting.
    fn inverse_by_gauss_jordan(&self) -> Result<Self> {
        let n = self.row_count;
        let mut work = self.rows.clone();
        let mut inverse = Self::identity(n).rows;

        for col in 0..n {
            let pivot_row = (col..n)
                .max_by(|&a, &b| {
                    work[a][col]
                        .abs()
                        .partial_cmp(&work[b][col].abs())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .unwrap_or(col);
            let pivot = work[pivot_row][col];
            if pivot.abs() < SINGULARITY_THRESHOLD {
                return Err(Error::singular(0.0));
            }
            work.swap(pivot_row, col);
            inverse.swap(pivot_row, col);

            let scale = 1.0 / work[col][col];
            for k in 0..n {
                work[col][k] *= scale;
                inverse[col][k] *= scale;
            }
            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = work[row][col];
                for k in 0..n {
                    work[row][k] -= factor * work[col][k];
                    inverse[row][k] -= factor * inverse[col][k];
                }
            }
        }
        Self::from_rows(inverse)
    }

    /// Converts a 3x3 matrix to the fixed [`Mat3`] type.
    pub fn to_mat3(&self) -> Result<Mat3> {
        if self.shape() != (3, 3) {
            return Err(Error::dimension_mismatch("to_mat3", self.shape(), (3, 3)));
        }
        Ok(Mat3::from_rows([
            [self.rows[0][0], self.rows[0][1], self.rows[0][2]],
            [self.rows[1][0], self.rows[1][1], self.rows[1][2]],
            [self.rows[2][0], self.rows[2][1], self.rows[2][2]],
        ]))
    }

    /// Creates a 3x3 matrix from the fixed [`Mat3`] type.
    pub fn from_mat3(m: &Mat3) -> Self {
        Self {
            rows: m.m.iter().map(|r| r.to_vec()).collect(),
            row_count: 3,
            col_count: 3,
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row:?}")?;
        }
        Ok(())
    }
}

/// A 1 x n row vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowVector {
    values: Vec<f64>,
}

impl RowVector {
    /// Creates a row vector.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Component count.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the vector has no components.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The components.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Multiplies by a matrix on the right: `row * M`.
    pub fn mul_mat(&self, matrix: &Matrix) -> Result<RowVector> {
        if self.len() != matrix.row_count() {
            return Err(Error::dimension_mismatch(
                "vector-matrix multiply",
                (1, self.len()),
                matrix.shape(),
            ));
        }
        let values = (0..matrix.col_count())
            .map(|j| {
                self.values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| v * matrix.get(i, j))
                    .sum()
            })
            .collect();
        Ok(RowVector::new(values))
    }

    /// Reinterprets as a column vector.
    pub fn transpose(&self) -> ColVector {
        ColVector::new(self.values.clone())
    }
}

/// An n x 1 column vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColVector {
    values: Vec<f64>,
}

impl ColVector {
    /// Creates a column vector.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Component count.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the vector has no components.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The components.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Reinterprets as a row vector.
    pub fn transpose(&self) -> RowVector {
        RowVector::new(self.values.clone())
    }

    /// Converts a three-component column to [`Vec3`].
    pub fn to_vec3(&self) -> Result<Vec3> {
        if self.len() != 3 {
            return Err(Error::dimension_mismatch("to_vec3", (self.len(), 1), (3, 1)));
        }
        Ok(Vec3::new(self.values[0], self.values[1], self.values[2]))
    }
}

impl From<Vec3> for ColVector {
    fn from(v: Vec3) -> Self {
        Self::new(vec![v.x, v.y, v.z])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(values: &[&[f64]]) -> Matrix {
        Matrix::from_rows(values.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, Error::RaggedRows { .. }));
    }

    #[test]
    fn test_shape_mismatch_on_add() {
        let a = Matrix::identity(2);
        let b = Matrix::identity(3);
        assert!(matches!(a.add(&b), Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_multiply() {
        let a = square(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = square(&[&[5.0, 6.0], &[7.0, 8.0]]);
        let c = a.mul_mat(&b).unwrap();
        assert_eq!(c.rows(), &[vec![19.0, 22.0], vec![43.0, 50.0]]);
    }

    #[test]
    fn test_multiply_shape_mismatch() {
        let a = Matrix::identity(2);
        let b = Matrix::identity(3);
        assert!(a.mul_mat(&b).is_err());
    }

    #[test]
    fn test_determinants_by_order() {
        assert_eq!(Matrix::from_rows(vec![]).unwrap().determinant().unwrap(), 1.0);
        assert_eq!(square(&[&[7.0]]).determinant().unwrap(), 7.0);
        assert_eq!(square(&[&[1.0, 2.0], &[3.0, 4.0]]).determinant().unwrap(), -2.0);
        let d3 = square(&[&[1.0, 2.0, 3.0], &[0.0, 1.0, 4.0], &[5.0, 6.0, 0.0]]);
        assert!((d3.determinant().unwrap() - 1.0).abs() < 1e-12);
        let d4 = square(&[
            &[1.0, 0.0, 2.0, -1.0],
            &[3.0, 0.0, 0.0, 5.0],
            &[2.0, 1.0, 4.0, -3.0],
            &[1.0, 0.0, 5.0, 0.0],
        ]);
        assert!((d4.determinant().unwrap() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_determinant_by_elimination_matches_cofactors() {
        // 5x5 block diagonal built from known 2x2/3x3 determinants:
        // det = (-2) * 1 = -2
        let m = square(&[
            &[1.0, 2.0, 0.0, 0.0, 0.0],
            &[3.0, 4.0, 0.0, 0.0, 0.0],
            &[0.0, 0.0, 1.0, 2.0, 3.0],
            &[0.0, 0.0, 0.0, 1.0, 4.0],
            &[0.0, 0.0, 5.0, 6.0, 0.0],
        ]);
        assert!((m.determinant().unwrap() + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_round_trip() {
        let m = square(&[&[1.0, 2.0, 3.0], &[0.0, 1.0, 4.0], &[5.0, 6.0, 0.0]]);
        let inv = m.inverse().unwrap();
        let product = m.mul_mat(&inv).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((product.get(i, j) - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_inverse_2x2_closed_form() {
        let m = square(&[&[4.0, 7.0], &[2.0, 6.0]]);
        let inv = m.inverse().unwrap();
        assert!((inv.get(0, 0) - 0.6).abs() < 1e-12);
        assert!((inv.get(0, 1) + 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_singular_inverse_raises() {
        let m = square(&[&[1.0, 2.0], &[2.0, 4.0]]);
        assert!(matches!(m.inverse(), Err(Error::SingularMatrix { .. })));
    }

    #[test]
    fn test_row_col_vectors() {
        let m = square(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let row = RowVector::new(vec![1.0, 1.0]);
        assert_eq!(row.mul_mat(&m).unwrap().values(), &[4.0, 6.0]);

        let col = ColVector::new(vec![1.0, 1.0]);
        assert_eq!(m.mul_col(&col).unwrap().values(), &[3.0, 7.0]);
    }

    #[test]
    fn test_mat3_interop() {
        let m = Matrix::from_mat3(&Mat3::IDENTITY);
        assert_eq!(m.to_mat3().unwrap(), Mat3::IDENTITY);
    }

    #[test]
    fn test_transpose() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.get(2, 1), 6.0);
    }
}
