//! # Stoich Core
//!
//! A chemical equation balancer.
//!
//! This library provides:
//! - A parser for molecular formulas with arbitrarily nested groups
//! - An equation model of reactants and products with coefficients
//! - A least-squares balancer that reduces coefficients to minimal integers
//!   and checks conservation of every element exactly
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`formula`] - Parser for molecular formulas such as `Ca(OH)2`
//! - [`equation`] - Reaction model, equation parsing and regex pre-validation
//! - [`solver`] - Conservation matrix, least-squares solve and integer normalization
//! - [`balancer`] - Validate, parse and balance equation text in one call
//! - [`batch`] - Line-oriented balancing for the CLI (CLI only)
//!
//! ## Usage
//!
//! ### Library
//!
//! ```
//! assert_eq!(stoich_core::balance("H2 + O2 -> H2O").unwrap(), "2H2 + O2 -> 2H2O");
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! stoich "Fe + O2 -> Fe2O3"
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { balance_equation } from 'stoich_core';
//!
//! balance_equation('CH4 + O2 -> CO2 + H2O');
//! ```
//!
//! ## Balancing Method
//!
//! For a reaction with `n` compounds over `m` distinct elements:
//!
//! 1. Build the `m x n` conservation matrix, reactants positive and products negative
//! 2. Fix the last product's coefficient to 1 and solve the remaining
//!    `m x (n-1)` system in the least-squares sense
//! 3. Scale the solution to the smallest positive integer vector
//! 4. Verify that every element is conserved in exact integer arithmetic

pub mod balancer;
pub mod equation;
pub mod error;
pub mod formula;
pub mod solver;

#[cfg(feature = "cli")]
pub mod batch;

// Re-export main types for convenience
pub use balancer::{BalancerConfig, EquationBalancer};
pub use equation::{Reaction, Term};
pub use error::{BalanceError, ErrorKind, Result};
pub use formula::{Compound, FormulaParser, ParseMode};
pub use solver::{Balancer, SolverConfig, DEFAULT_MAX_MULTIPLIER};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmBalancer;

/// Balance a chemical equation with the default configuration.
///
/// Returns the equation rendered with minimal positive integer coefficients,
/// omitting coefficients of 1.
pub fn balance(equation: &str) -> Result<String> {
    EquationBalancer::new().balance(equation)
}
