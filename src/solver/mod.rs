//! Balancing solver.
//!
//! This module provides the numerical engine that turns a [`Reaction`]
//! into integer stoichiometric coefficients.
//!
//! ## Conservation System
//!
//! For `R` reactants and `P` products, each element `e` contributes one
//! equation
//!
//! ```text
//! sum_r  n(e, r) x_r  -  sum_p  n(e, p) x_p  =  0
//! ```
//!
//! where `n(e, t)` is the atom count of `e` in term `t`. The system is
//! homogeneous, so the last product's coefficient is fixed to 1 and moved to
//! the right-hand side:
//!
//! ```text
//! [ N_react  -N_prod' ] [ x ]  =  [ n(e, last) ]
//! ```
//!
//! The result is solved as a minimum-norm least-squares problem, which
//! tolerates redundant element rows and both tall and wide systems. The real
//! solution is then scaled to the smallest positive integers and checked for
//! exact conservation.
//!
//! [`Reaction`]: crate::equation::Reaction

mod balancer;
mod lstsq;
mod matrix;
mod normalize;

pub use balancer::{conservation_system, Balancer, SolverConfig};
pub use lstsq::LeastSquares;
pub use matrix::DenseMatrix;
pub use normalize::{gcd, integer_ratios};

/// Default maximum number of Jacobi sweeps.
pub const DEFAULT_MAX_SWEEPS: usize = 60;

/// Default relative magnitude below which a coefficient is zero.
pub const DEFAULT_ZERO_TOLERANCE: f64 = 1e-9;

/// Default largest multiplier tried when clearing fractions.
pub const DEFAULT_MAX_MULTIPLIER: u64 = 10_000;

/// Relative column correlation below which columns count as orthogonal.
pub const ORTHOGONALITY_TOLERANCE: f64 = 1e-15;

/// Column norm, relative to the matrix's Frobenius norm, treated as zero.
///
/// Rank-deficient systems leave columns of rounding noise behind; these are
/// neither rotated nor used in the solution.
pub const NULL_COLUMN_TOLERANCE: f64 = 1e-12;

/// Distance from the nearest integer accepted as integral.
pub const INTEGER_TOLERANCE: f64 = 1e-6;
