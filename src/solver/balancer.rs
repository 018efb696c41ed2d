//! Stoichiometric balancing of a [`Reaction`].

use tracing::debug;

use super::lstsq::LeastSquares;
use super::matrix::DenseMatrix;
use super::normalize::integer_ratios;
use super::{DEFAULT_MAX_MULTIPLIER, DEFAULT_MAX_SWEEPS, DEFAULT_ZERO_TOLERANCE};
use crate::equation::{AtomCounts, Reaction, Term};
use crate::error::{BalanceError, Result};

/// Numerical settings for the balancer.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum Jacobi sweeps for the least-squares solve.
    pub max_sweeps: usize,
    /// Relative magnitude below which a solved coefficient counts as zero.
    pub zero_tolerance: f64,
    /// Largest integer multiplier tried when clearing fractions.
    pub max_multiplier: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_sweeps: DEFAULT_MAX_SWEEPS,
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
            max_multiplier: DEFAULT_MAX_MULTIPLIER,
        }
    }
}

/// Solves element conservation for integer coefficients.
#[derive(Debug, Clone, Default)]
pub struct Balancer {
    config: SolverConfig,
}

impl Balancer {
    /// Create a balancer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a balancer with custom settings.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Replace every coefficient of `reaction` with the minimal positive
    /// integers that conserve each element.
    ///
    /// The reaction is left untouched on error.
    pub fn balance(&self, reaction: &mut Reaction) -> Result<()> {
        let reactant_count = reaction.reactants().len();
        if reactant_count == 0 || reaction.products().is_empty() {
            return Err(BalanceError::DegenerateSolution);
        }

        let symbols = reaction.element_symbols()?;
        let atoms = reaction
            .terms()
            .map(Term::atoms)
            .collect::<Result<Vec<AtomCounts>>>()?;

        let (matrix, rhs) = conservation_system(&symbols, &atoms, reactant_count);
        debug!(
            elements = ?symbols,
            rows = matrix.rows(),
            cols = matrix.cols(),
            "assembled conservation system"
        );

        let mut solution = LeastSquares::new()
            .with_max_sweeps(self.config.max_sweeps)
            .solve(&matrix, &rhs)?;
        solution.push(1.0);
        debug!(?solution, "least-squares solution");

        let coefficients = integer_ratios(
            &solution,
            self.config.zero_tolerance,
            self.config.max_multiplier,
        )?;

        if let Some(index) = coefficients.iter().position(|&c| c == 0) {
            let compound = reaction
                .terms()
                .nth(index)
                .map(|t| t.compound.to_string())
                .unwrap_or_default();
            return Err(BalanceError::ZeroCoefficient { compound });
        }

        check_conservation(&symbols, &atoms, reactant_count, &coefficients)?;
        debug!(?coefficients, "balanced");

        for (term, &c) in reaction.terms_mut().zip(&coefficients) {
            term.coefficient = c as f64;
        }

        Ok(())
    }
}

/// Build `A x = b` with the last product's coefficient fixed to 1.
///
/// Row `i` is the conservation of `symbols[i]`: reactant columns carry
/// `+count`, product columns (all but the last) carry `-count`, and the
/// right-hand side is the last product's count.
pub fn conservation_system(
    symbols: &[String],
    atoms: &[AtomCounts],
    reactant_count: usize,
) -> (DenseMatrix, Vec<f64>) {
    let unknowns = atoms.len().saturating_sub(1);
    let mut matrix = DenseMatrix::new(symbols.len(), unknowns);
    let mut rhs = vec![0.0; symbols.len()];

    for (i, symbol) in symbols.iter().enumerate() {
        for (j, counts) in atoms.iter().take(unknowns).enumerate() {
            let sign = if j < reactant_count { 1.0 } else { -1.0 };
            matrix.set(i, j, sign * counts.get(symbol) as f64);
        }
        if let Some(last) = atoms.last() {
            rhs[i] = last.get(symbol) as f64;
        }
    }

    (matrix, rhs)
}

/// Verify exact conservation of every element in integer arithmetic.
fn check_conservation(
    symbols: &[String],
    atoms: &[AtomCounts],
    reactant_count: usize,
    coefficients: &[i64],
) -> Result<()> {
    for symbol in symbols {
        let mut reactants: i64 = 0;
        let mut products: i64 = 0;

        for (j, (counts, &c)) in atoms.iter().zip(coefficients).enumerate() {
            let count =
                i64::try_from(counts.get(symbol)).map_err(|_| BalanceError::CoefficientOverflow)?;
            let side = if j < reactant_count {
                &mut reactants
            } else {
                &mut products
            };
            let total = c
                .checked_mul(count)
                .and_then(|n| n.checked_add(*side))
                .ok_or(BalanceError::CoefficientOverflow)?;
            *side = total;
        }

        if reactants != products {
            return Err(BalanceError::NotConserved {
                element: symbol.clone(),
                reactants,
                products,
            });
        }
    }
    Ok(())
}
