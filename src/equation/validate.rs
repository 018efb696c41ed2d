//! Regex pre-validation of equation text.
//!
//! This is a quick gate run before parsing. It does not replace the formula
//! parser: it accepts some malformed input (e.g. unbalanced parentheses) that
//! the parser later rejects.

use std::sync::LazyLock;

use regex::Regex;

use super::parse::ARROWS;
use crate::error::{BalanceError, Result};

/// Optional coefficient followed by one or more `(`-prefixed, `)n`-suffixed
/// element units.
static SEGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d*\.?\d*\s*(?:\(*[A-Z][a-z]?\d*(?:\)\d*)*)+$")
        .expect("segment pattern is a valid regex")
});

/// Syntax pre-check for equations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Check that the equation has an arrow and every compound segment looks
    /// like a formula.
    ///
    /// Empty segments pass; the equation parser reports them as missing
    /// compounds.
    pub fn validate(&self, equation: &str) -> Result<()> {
        if !ARROWS.iter().any(|a| equation.contains(a)) {
            return Err(BalanceError::MissingArrow);
        }

        let flattened = ARROWS
            .iter()
            .fold(equation.to_string(), |acc, arrow| acc.replace(arrow, "+"));

        for segment in flattened.split('+').map(str::trim) {
            if segment.is_empty() {
                continue;
            }
            if !SEGMENT_REGEX.is_match(segment) {
                return Err(BalanceError::InvalidSegment {
                    segment: segment.to_string(),
                });
            }
        }

        Ok(())
    }
}
