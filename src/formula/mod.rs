//! Chemical formula parser.
//!
//! Turns a single formula such as `Al2(SO4)3` into a [`Compound`] tree of
//! [`Element`]s and parenthesized [`Group`]s. Coefficients are not part of a
//! formula; they are handled by the [`equation`](crate::equation) module.
//!
//! # Grammar
//!
//! ```text
//! formula  = { part }
//! part     = element | group
//! element  = upper [lower] [count]
//! group    = '(' formula ')' [count]
//! count    = digit { digit }          (positive, fits in u32)
//! upper    = 'A'..'Z'
//! lower    = 'a'..'z'
//! ```
//!
//! Counts multiply: every atom inside a group is scaled by the group's count,
//! and nested groups compose, so `K4(Fe(CN)6)` holds six carbon atoms.
//!
//! # Modes
//!
//! In [`ParseMode::Strict`] (the default) any character outside the grammar,
//! a number with nothing to multiply (`2H`, `(3O)`), or a group left open at
//! the end of input is an error. [`ParseMode::Lenient`] skips such characters
//! and numbers and closes open groups. An unmatched `)` and a zero count are
//! errors in both modes.
//!
//! # Example
//!
//! ```
//! use stoich_core::formula;
//!
//! let compound = formula::parse("Ca(OH)2").unwrap();
//! assert_eq!(compound.to_string(), "Ca(OH)2");
//! ```

mod parser;
mod types;

pub use parser::{FormulaParser, ParseMode};
pub use types::*;

use crate::error::Result;

/// Parse a formula with a strict parser.
pub fn parse(formula: &str) -> Result<Compound> {
    FormulaParser::new().parse(formula)
}
