//! Error types for the stoichiometric balancer.
//!
//! This module provides a unified error type [`BalanceError`] that covers
//! all error conditions that can occur during pre-validation, formula and
//! equation parsing, balancing, and batch I/O. Every variant belongs to one
//! coarse [`ErrorKind`].

use thiserror::Error;

/// Result type alias using [`BalanceError`].
pub type Result<T> = std::result::Result<T, BalanceError>;

/// Coarse classification of a [`BalanceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed equation or formula text
    Format,
    /// Rejected by the regex pre-validation gate
    Validation,
    /// No valid positive-integer coefficients exist
    Unbalanceable,
    /// Reading equations or writing results failed
    Io,
}

/// Unified error type for all balancing operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BalanceError {
    // ============ Format Errors ============
    /// Equation does not contain exactly one arrow token
    #[error("Invalid equation format: expected exactly one '->' or '⇌', found {found}")]
    ArrowCount { found: usize },

    /// A `+`-separated term is empty or has only a coefficient
    #[error("Missing compound in '{term}'")]
    MissingCompound { term: String },

    /// Leading coefficient does not parse or is not a finite non-negative number
    #[error("Invalid coefficient '{coefficient}' in '{term}'")]
    InvalidCoefficient { term: String, coefficient: String },

    /// Character the formula grammar does not recognize (strict mode)
    #[error("Unexpected character '{ch}' at position {position} in formula '{formula}'")]
    UnexpectedCharacter {
        formula: String,
        position: usize,
        ch: char,
    },

    /// Digits with no preceding element or group (strict mode)
    #[error("Stray number '{digits}' at position {position} in formula '{formula}'")]
    StrayNumber {
        formula: String,
        position: usize,
        digits: String,
    },

    /// Closing parenthesis with no open group
    #[error("Unmatched ')' at position {position} in formula '{formula}'")]
    UnmatchedParen { formula: String, position: usize },

    /// Group still open at end of formula (strict mode)
    #[error("Unclosed '(' in formula '{formula}'")]
    UnclosedGroup { formula: String },

    /// Atom count or group multiplier is zero or does not fit in `u32`
    #[error("Invalid count '{digits}' at position {position} in formula '{formula}'")]
    InvalidCount {
        formula: String,
        position: usize,
        digits: String,
    },

    /// Compound that contains no atoms, e.g. `()`
    #[error("Compound '{formula}' contains no elements")]
    EmptyCompound { formula: String },

    // ============ Validation Errors ============
    /// Pre-validation found no arrow token
    #[error("Equation must contain '->' or '⇌'")]
    MissingArrow,

    /// Pre-validation rejected a compound segment
    #[error("Invalid compound: '{segment}'")]
    InvalidSegment { segment: String },

    // ============ Balancing Errors ============
    /// Jacobi SVD did not converge
    #[error("Least-squares solve did not converge after {sweeps} sweeps (off-diagonal: {off_diagonal:.2e})")]
    ConvergenceFailure { sweeps: usize, off_diagonal: f64 },

    /// Solution contains NaN or infinity
    #[error("Solver produced a non-finite coefficient")]
    NonFiniteSolution,

    /// Solution is the zero vector
    #[error("Solver produced an all-zero solution")]
    DegenerateSolution,

    /// No small integer multiple of the solution is integral
    #[error("No integer coefficients found within multiplier limit {limit}")]
    NoIntegerSolution { limit: u64 },

    /// A compound would receive a zero coefficient
    #[error("Compound '{compound}' does not take part in a balanced reaction")]
    ZeroCoefficient { compound: String },

    /// Solution has both positive and negative entries
    #[error("No solution with all positive coefficients")]
    MixedSigns,

    /// Integer coefficients or atom totals overflow `i64`
    #[error("Integer overflow in atom counts or coefficients")]
    CoefficientOverflow,

    /// Rounded coefficients do not conserve an element
    #[error("Element '{element}' is not conserved ({reactants} on the left, {products} on the right)")]
    NotConserved {
        element: String,
        reactants: i64,
        products: i64,
    },

    // ============ I/O Errors ============
    /// Error reading equation input
    #[error("Input error: {message}")]
    InputError { message: String },

    /// Error writing results
    #[error("Output error: {message}")]
    OutputError { message: String },
}

impl BalanceError {
    /// Coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ArrowCount { .. }
            | Self::MissingCompound { .. }
            | Self::InvalidCoefficient { .. }
            | Self::UnexpectedCharacter { .. }
            | Self::StrayNumber { .. }
            | Self::UnmatchedParen { .. }
            | Self::UnclosedGroup { .. }
            | Self::InvalidCount { .. }
            | Self::EmptyCompound { .. } => ErrorKind::Format,

            Self::MissingArrow | Self::InvalidSegment { .. } => ErrorKind::Validation,

            Self::ConvergenceFailure { .. }
            | Self::NonFiniteSolution
            | Self::DegenerateSolution
            | Self::NoIntegerSolution { .. }
            | Self::ZeroCoefficient { .. }
            | Self::MixedSigns
            | Self::CoefficientOverflow
            | Self::NotConserved { .. } => ErrorKind::Unbalanceable,

            Self::InputError { .. } | Self::OutputError { .. } => ErrorKind::Io,
        }
    }

    /// Create a missing compound error
    pub fn missing_compound(term: impl Into<String>) -> Self {
        Self::MissingCompound { term: term.into() }
    }

    /// Create an invalid coefficient error
    pub fn invalid_coefficient(term: impl Into<String>, coefficient: impl Into<String>) -> Self {
        Self::InvalidCoefficient {
            term: term.into(),
            coefficient: coefficient.into(),
        }
    }

    /// Create a convergence failure error
    pub fn convergence_failure(sweeps: usize, off_diagonal: f64) -> Self {
        Self::ConvergenceFailure {
            sweeps,
            off_diagonal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(BalanceError::missing_compound("2").kind(), ErrorKind::Format);
        assert_eq!(BalanceError::MissingArrow.kind(), ErrorKind::Validation);
        assert_eq!(
            BalanceError::convergence_failure(60, 1e-3).kind(),
            ErrorKind::Unbalanceable
        );
    }

    #[test]
    fn test_error_messages() {
        let err = BalanceError::UnmatchedParen {
            formula: "OH)2".to_string(),
            position: 2,
        };
        assert_eq!(err.to_string(), "Unmatched ')' at position 2 in formula 'OH)2'");

        let err = BalanceError::NotConserved {
            element: "H".to_string(),
            reactants: 4,
            products: 10,
        };
        assert!(err.to_string().contains("'H'"));
    }
}
