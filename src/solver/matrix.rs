//! Dense row-major matrix used by the least-squares solver.

/// Dense `rows x cols` matrix stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl DenseMatrix {
    /// Create a zero matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Create an `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Create a matrix from row slices. All rows must have the same length.
    pub fn from_rows(rows: &[&[f64]]) -> Self {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut m = Self::new(rows.len(), cols);
        for (i, row) in rows.iter().enumerate() {
            debug_assert_eq!(row.len(), cols, "ragged rows");
            m.data[i * cols..(i + 1) * cols].copy_from_slice(row);
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Set matrix element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Dot product of columns `p` and `q`.
    pub fn column_dot(&self, p: usize, q: usize) -> f64 {
        (0..self.rows).map(|i| self.get(i, p) * self.get(i, q)).sum()
    }

    /// Dot product of column `p` with a vector of length `rows`.
    pub fn column_dot_vec(&self, p: usize, v: &[f64]) -> f64 {
        (0..self.rows).map(|i| self.get(i, p) * v[i]).sum()
    }

    /// Apply a plane rotation to columns `p` and `q`:
    ///   col_p <- c * col_p - s * col_q
    ///   col_q <- s * col_p + c * col_q
    pub fn rotate_columns(&mut self, p: usize, q: usize, c: f64, s: f64) {
        for i in 0..self.rows {
            let xp = self.get(i, p);
            let xq = self.get(i, q);
            self.set(i, p, c * xp - s * xq);
            self.set(i, q, s * xp + c * xq);
        }
    }

    /// Matrix-vector product `A x`.
    pub fn mul_vec(&self, x: &[f64]) -> Vec<f64> {
        (0..self.rows)
            .map(|i| (0..self.cols).map(|j| self.get(i, j) * x[j]).sum())
            .collect()
    }
}
