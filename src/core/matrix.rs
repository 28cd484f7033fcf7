//! Small dense matrix arithmetic for the filter.
//!
//! The estimator works on matrices of a handful of rows and columns, so a
//! row-major `Vec<f32>` with explicit dimensions is sufficient. No
//! large-matrix performance concerns apply.

/// Dense row-major matrix of `f32` values.
///
/// Shape is fixed at construction. Arithmetic methods panic on shape
/// mismatch; shapes are validated once when the model is built, so a
/// mismatch here is a programming error rather than a runtime condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

/// Pivots smaller than this are treated as zero during inversion.
const PIVOT_EPSILON: f32 = 1e-9;

impl Matrix {
    /// Create a matrix from row-major data.
    ///
    /// Returns `None` if `data.len() != rows * cols`.
    pub fn from_rows(rows: usize, cols: usize, data: Vec<f32>) -> Option<Self> {
        if data.len() != rows * cols {
            return None;
        }
        Some(Self { rows, cols, data })
    }

    /// Zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Identity matrix of size `n`.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Square matrix with the given values on the diagonal.
    pub fn diagonal(values: &[f32]) -> Self {
        let n = values.len();
        let mut m = Self::zeros(n, n);
        for (i, &v) in values.iter().enumerate() {
            m.data[i * n + i] = v;
        }
        m
    }

    /// Identity scaled by a constant.
    pub fn scaled_identity(n: usize, scale: f32) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = scale;
        }
        m
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Shape as a "RxC" string, used in error reporting.
    pub fn shape(&self) -> String {
        format!("{}x{}", self.rows, self.cols)
    }

    /// Element at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    /// Set element at (row, col).
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row * self.cols + col] = value;
    }

    /// Diagonal elements.
    pub fn diag(&self) -> Vec<f32> {
        let n = self.rows.min(self.cols);
        (0..n).map(|i| self.get(i, i)).collect()
    }

    /// Trace (sum of diagonal elements).
    pub fn trace(&self) -> f32 {
        self.diag().iter().sum()
    }

    /// Transpose.
    pub fn transpose(&self) -> Matrix {
        let mut t = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                t.data[j * self.rows + i] = self.get(i, j);
            }
        }
        t
    }

    /// Matrix product `self * other`.
    ///
    /// # Panics
    ///
    /// Panics if `self.cols != other.rows`.
    pub fn mul(&self, other: &Matrix) -> Matrix {
        assert_eq!(
            self.cols, other.rows,
            "matrix product shape mismatch: {} * {}",
            self.shape(),
            other.shape()
        );
        let mut c = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.get(i, k);
                if a == 0.0 {
                    continue;
                }
                for j in 0..other.cols {
                    c.data[i * other.cols + j] += a * other.get(k, j);
                }
            }
        }
        c
    }

    /// Matrix-vector product `self * v`.
    ///
    /// # Panics
    ///
    /// Panics if `v.len() != self.cols`.
    pub fn mul_vec(&self, v: &[f32]) -> Vec<f32> {
        assert_eq!(
            self.cols,
            v.len(),
            "matrix-vector shape mismatch: {} * {}",
            self.shape(),
            v.len()
        );
        let mut out = vec![0.0; self.rows];
        for i in 0..self.rows {
            for j in 0..self.cols {
                out[i] += self.get(i, j) * v[j];
            }
        }
        out
    }

    /// Element-wise sum `self + other`.
    ///
    /// # Panics
    ///
    /// Panics if shapes differ.
    pub fn add(&self, other: &Matrix) -> Matrix {
        assert_eq!(
            (self.rows, self.cols),
            (other.rows, other.cols),
            "matrix sum shape mismatch: {} + {}",
            self.shape(),
            other.shape()
        );
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a + b)
            .collect();
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// Element-wise difference `self - other`.
    ///
    /// # Panics
    ///
    /// Panics if shapes differ.
    pub fn sub(&self, other: &Matrix) -> Matrix {
        assert_eq!(
            (self.rows, self.cols),
            (other.rows, other.cols),
            "matrix difference shape mismatch: {} - {}",
            self.shape(),
            other.shape()
        );
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a - b)
            .collect();
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// Inverse via Gauss-Jordan elimination with partial pivoting.
    ///
    /// Returns `None` if the matrix is not square or a pivot falls below
    /// the epsilon threshold (singular or near-singular).
    pub fn inverse(&self) -> Option<Matrix> {
        if self.rows != self.cols {
            return None;
        }
        let n = self.rows;
        let mut a = self.clone();
        let mut inv = Matrix::identity(n);

        for col in 0..n {
            // Find the largest pivot in this column
            let mut pivot_row = col;
            let mut pivot_abs = a.get(col, col).abs();
            for row in (col + 1)..n {
                let v = a.get(row, col).abs();
                if v > pivot_abs {
                    pivot_row = row;
                    pivot_abs = v;
                }
            }
            if pivot_abs < PIVOT_EPSILON {
                return None;
            }
            if pivot_row != col {
                a.swap_rows(col, pivot_row);
                inv.swap_rows(col, pivot_row);
            }

            // Normalize the pivot row
            let pivot = a.get(col, col);
            for j in 0..n {
                let v = a.get(col, j) / pivot;
                a.set(col, j, v);
                let v = inv.get(col, j) / pivot;
                inv.set(col, j, v);
            }

            // Eliminate the column from all other rows
            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = a.get(row, col);
                if factor == 0.0 {
                    continue;
                }
                for j in 0..n {
                    let v = a.get(row, j) - factor * a.get(col, j);
                    a.set(row, j, v);
                    let v = inv.get(row, j) - factor * inv.get(col, j);
                    inv.set(row, j, v);
                }
            }
        }

        Some(inv)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_rows_length_checked() {
        assert!(Matrix::from_rows(2, 2, vec![1.0, 2.0, 3.0]).is_none());
        assert!(Matrix::from_rows(2, 2, vec![1.0, 2.0, 3.0, 4.0]).is_some());
    }

    #[test]
    fn test_identity_mul() {
        let m = Matrix::from_rows(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let i = Matrix::identity(2);
        assert_eq!(m.mul(&i), m);
        assert_eq!(i.mul(&m), m);
    }

    #[test]
    fn test_mul_rectangular() {
        // [1 2 3; 4 5 6] * [1; 0; 1] as a 3x1 matrix
        let a = Matrix::from_rows(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = Matrix::from_rows(3, 1, vec![1.0, 0.0, 1.0]).unwrap();
        let c = a.mul(&b);
        assert_eq!(c.rows(), 2);
        assert_eq!(c.cols(), 1);
        assert_relative_eq!(c.get(0, 0), 4.0);
        assert_relative_eq!(c.get(1, 0), 10.0);
    }

    #[test]
    fn test_mul_vec() {
        let a = Matrix::from_rows(2, 2, vec![1.0, 1.0, 0.0, 1.0]).unwrap();
        let v = a.mul_vec(&[2.0, 3.0]);
        assert_relative_eq!(v[0], 5.0);
        assert_relative_eq!(v[1], 3.0);
    }

    #[test]
    fn test_transpose() {
        let a = Matrix::from_rows(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = a.transpose();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
        assert_relative_eq!(t.get(0, 1), 4.0);
        assert_relative_eq!(t.get(2, 0), 3.0);
    }

    #[test]
    fn test_trace() {
        let a = Matrix::diagonal(&[1.5, 2.5, 3.0]);
        assert_relative_eq!(a.trace(), 7.0);
    }

    #[test]
    fn test_inverse_2x2() {
        let a = Matrix::from_rows(2, 2, vec![4.0, 7.0, 2.0, 6.0]).unwrap();
        let inv = a.inverse().unwrap();
        let product = a.mul(&inv);
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(product.get(i, j), expected, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_inverse_1x1() {
        let a = Matrix::from_rows(1, 1, vec![0.1]).unwrap();
        let inv = a.inverse().unwrap();
        assert_relative_eq!(inv.get(0, 0), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_inverse_singular() {
        // Rank-deficient: second row is twice the first
        let a = Matrix::from_rows(2, 2, vec![1.0, 2.0, 2.0, 4.0]).unwrap();
        assert!(a.inverse().is_none());
    }

    #[test]
    fn test_inverse_near_zero() {
        let a = Matrix::from_rows(1, 1, vec![1e-12]).unwrap();
        assert!(a.inverse().is_none());
    }

    #[test]
    fn test_inverse_rectangular_rejected() {
        let a = Matrix::zeros(2, 3);
        assert!(a.inverse().is_none());
    }

    #[test]
    fn test_inverse_requires_pivoting() {
        // Zero in the (0,0) position forces a row swap
        let a = Matrix::from_rows(2, 2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
        let inv = a.inverse().unwrap();
        assert_relative_eq!(inv.get(0, 1), 1.0);
        assert_relative_eq!(inv.get(1, 0), 1.0);
        assert_relative_eq!(inv.get(0, 0), 0.0);
    }

    #[test]
    #[should_panic]
    fn test_mul_shape_mismatch_panics() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 3);
        let _ = a.mul(&b);
    }
}
