//! Equation model: reactions, terms and equation text handling.
//!
//! This module provides the [`Reaction`] representation that the balancer
//! works on, the atom counting over compound trees, the splitting of
//! equation text into sides and terms, and the regex [`Validator`].
//!
//! # Equation Syntax
//!
//! ```text
//! equation = side arrow side
//! side     = term { '+' term }
//! term     = [number] formula
//! arrow    = "->" | "⇌"
//! number   = digit { digit } [ '.' { digit } ] | '.' digit { digit }
//! ```
//!
//! Whitespace around `+`, around the arrow and between a coefficient and
//! its formula is ignored. Balanced output is always rendered with `->`.

mod atoms;
mod parse;
mod reaction;
mod validate;

pub use atoms::{count_atoms, AtomCounts};
pub use parse::{parse_reaction, parse_side, parse_term, split_sides, ARROWS};
pub use reaction::{Reaction, Term};
pub use validate::Validator;
