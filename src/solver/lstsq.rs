//! Minimum-norm least squares via one-sided Jacobi SVD.
//!
//! The Hestenes method rotates pairs of columns of `A` until all columns are
//! mutually orthogonal. On convergence `A V = W` where `V` is orthogonal and
//! the columns of `W` have norms equal to the singular values. The
//! pseudo-inverse solution is then
//!
//! ```text
//! x = sum_j  v_j * (w_j . b) / |w_j|^2      over |w_j| > rcond * max |w|
//! ```
//!
//! which is the minimum-norm minimizer of `|A x - b|` and works for square,
//! tall, wide and rank-deficient systems alike. Columns that collapse to
//! rounding noise (norm at most `NULL_COLUMN_TOLERANCE` times the Frobenius
//! norm of `A`) span the null space and are skipped.

use tracing::trace;

use super::matrix::DenseMatrix;
use super::{DEFAULT_MAX_SWEEPS, NULL_COLUMN_TOLERANCE, ORTHOGONALITY_TOLERANCE};
use crate::error::{BalanceError, Result};

/// Least-squares solver.
#[derive(Debug, Clone)]
pub struct LeastSquares {
    /// Maximum number of Jacobi sweeps
    pub max_sweeps: usize,
}

impl Default for LeastSquares {
    fn default() -> Self {
        Self::new()
    }
}

impl LeastSquares {
    /// Create a solver with the default sweep limit.
    pub fn new() -> Self {
        Self {
            max_sweeps: DEFAULT_MAX_SWEEPS,
        }
    }

    /// Set the maximum number of sweeps.
    pub fn with_max_sweeps(mut self, max_sweeps: usize) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    /// Solve `min |A x - b|`, returning the minimum-norm `x`.
    pub fn solve(&self, a: &DenseMatrix, b: &[f64]) -> Result<Vec<f64>> {
        debug_assert_eq!(a.rows(), b.len(), "rhs length must match row count");

        let n = a.cols();
        let frobenius = (0..n).map(|j| a.column_dot(j, j)).sum::<f64>().sqrt();
        let negligible = NULL_COLUMN_TOLERANCE * frobenius;

        let (w, v) = self.orthogonalize(a, negligible)?;

        let norms: Vec<f64> = (0..n).map(|j| w.column_dot(j, j).sqrt()).collect();
        let largest = norms.iter().copied().fold(0.0, f64::max);
        let rcond = f64::EPSILON * a.rows().max(n) as f64;
        let cutoff = (rcond * largest).max(negligible);

        let mut x = vec![0.0; n];
        for (j, &sigma) in norms.iter().enumerate() {
            if sigma == 0.0 || sigma <= cutoff {
                continue;
            }
            let weight = w.column_dot_vec(j, b) / (sigma * sigma);
            for (k, xk) in x.iter_mut().enumerate() {
                *xk += weight * v.get(k, j);
            }
        }

        Ok(x)
    }

    /// Rotate columns of `a` to mutual orthogonality; returns `(A V, V)`.
    ///
    /// Pairs involving a column with norm at most `negligible` are left alone.
    fn orthogonalize(
        &self,
        a: &DenseMatrix,
        negligible: f64,
    ) -> Result<(DenseMatrix, DenseMatrix)> {
        let n = a.cols();
        let mut w = a.clone();
        let mut v = DenseMatrix::identity(n);
        let tolerance = ORTHOGONALITY_TOLERANCE * (a.rows() as f64).max(1.0);
        let floor = negligible * negligible;

        let mut off_diagonal = 0.0;
        for sweep in 0..self.max_sweeps {
            off_diagonal = 0.0f64;
            let mut rotated = false;

            for p in 0..n {
                for q in (p + 1)..n {
                    let alpha = w.column_dot(p, p);
                    let beta = w.column_dot(q, q);
                    if alpha <= floor || beta <= floor {
                        continue;
                    }

                    let gamma = w.column_dot(p, q);
                    let scale = (alpha * beta).sqrt();
                    if gamma == 0.0 || gamma.abs() <= tolerance * scale {
                        continue;
                    }
                    off_diagonal = off_diagonal.max(gamma.abs() / scale);
                    rotated = true;

                    let zeta = (beta - alpha) / (2.0 * gamma);
                    let t = zeta.signum() / (zeta.abs() + (1.0 + zeta * zeta).sqrt());
                    let c = 1.0 / (1.0 + t * t).sqrt();
                    let s = c * t;

                    w.rotate_columns(p, q, c, s);
                    v.rotate_columns(p, q, c, s);
                }
            }

            trace!(sweep, off_diagonal, "jacobi sweep");
            if !rotated {
                return Ok((w, v));
            }
        }

        Err(BalanceError::convergence_failure(self.max_sweeps, off_diagonal))
    }
}
