//! Splitting equation text into sides and terms.

use super::reaction::Reaction;
use crate::error::{BalanceError, Result};
use crate::formula::{Compound, FormulaParser};

/// Arrow tokens accepted between the two sides.
pub const ARROWS: [&str; 2] = ["->", "⇌"];

/// Parse a full equation such as `2H2 + O2 -> 2H2O` into a [`Reaction`].
pub fn parse_reaction(equation: &str, parser: &FormulaParser) -> Result<Reaction> {
    let (left, right) = split_sides(equation)?;
    let mut reaction = Reaction::new();

    for (coefficient, compound) in parse_side(left, parser)? {
        reaction.add_reactant(coefficient, compound)?;
    }
    for (coefficient, compound) in parse_side(right, parser)? {
        reaction.add_product(coefficient, compound)?;
    }

    Ok(reaction)
}

/// Split at the single arrow token.
pub fn split_sides(equation: &str) -> Result<(&str, &str)> {
    let found: usize = ARROWS.iter().map(|a| equation.matches(a).count()).sum();
    if found != 1 {
        return Err(BalanceError::ArrowCount { found });
    }

    ARROWS
        .iter()
        .find_map(|arrow| equation.split_once(arrow))
        .map(|(left, right)| (left.trim(), right.trim()))
        .ok_or(BalanceError::ArrowCount { found: 0 })
}

/// Parse the `+`-separated terms of one side.
pub fn parse_side(side: &str, parser: &FormulaParser) -> Result<Vec<(f64, Compound)>> {
    side.split('+')
        .map(|term| parse_term(term.trim(), parser))
        .collect()
}

/// Parse one term: an optional leading number followed by a formula.
pub fn parse_term(term: &str, parser: &FormulaParser) -> Result<(f64, Compound)> {
    let (literal, formula) = split_coefficient(term);
    let formula = formula.trim_start();

    if formula.is_empty() {
        return Err(BalanceError::missing_compound(term));
    }

    let coefficient = if literal.is_empty() {
        1.0
    } else {
        literal
            .parse::<f64>()
            .map_err(|_| BalanceError::invalid_coefficient(term, literal))?
    };

    let compound = parser.parse(formula)?;
    if !compound.has_atoms() {
        return Err(BalanceError::EmptyCompound {
            formula: formula.to_string(),
        });
    }

    Ok((coefficient, compound))
}

/// Split off the leading `digits [. digits]` literal.
fn split_coefficient(term: &str) -> (&str, &str) {
    let mut seen_dot = false;
    let end = term
        .char_indices()
        .find(|&(_, ch)| {
            if ch == '.' && !seen_dot {
                seen_dot = true;
                false
            } else {
                !ch.is_ascii_digit()
            }
        })
        .map_or(term.len(), |(i, _)| i);
    term.split_at(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::formula::ParseMode;

    fn term(s: &str) -> Result<(f64, Compound)> {
        parse_term(s, &FormulaParser::new())
    }

    #[test]
    fn test_split_sides() {
        assert_eq!(split_sides("H2 + O2 -> H2O").unwrap(), ("H2 + O2", "H2O"));
        assert_eq!(split_sides("N2 + 3H2 ⇌ 2NH3").unwrap(), ("N2 + 3H2", "2NH3"));
    }

    #[test]
    fn test_split_sides_arrow_count() {
        assert_eq!(
            split_sides("H2 + O2").unwrap_err(),
            BalanceError::ArrowCount { found: 0 }
        );
        assert_eq!(
            split_sides("A -> B -> C").unwrap_err(),
            BalanceError::ArrowCount { found: 2 }
        );
        assert!(split_sides("A -> B ⇌ C").is_err());
    }

    #[test]
    fn test_parse_term_coefficients() {
        let (c, compound) = term("2H2O").unwrap();
        assert_eq!(c, 2.0);
        assert_eq!(compound.to_string(), "H2O");

        let (c, _) = term("O2").unwrap();
        assert_eq!(c, 1.0);

        let (c, _) = term("1.5O2").unwrap();
        assert_eq!(c, 1.5);

        let (c, compound) = term("3 Ca(OH)2").unwrap();
        assert_eq!(c, 3.0);
        assert_eq!(compound.to_string(), "Ca(OH)2");
    }

    #[test]
    fn test_parse_term_missing_compound() {
        assert_eq!(term("").unwrap_err(), BalanceError::missing_compound(""));
        assert_eq!(term("12").unwrap_err(), BalanceError::missing_compound("12"));
    }

    #[test]
    fn test_parse_term_invalid_coefficient() {
        assert_eq!(
            term(".H2").unwrap_err(),
            BalanceError::invalid_coefficient(".H2", ".")
        );
        // A second dot belongs to the formula, which rejects it.
        assert_eq!(term("1.5.H2").unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn test_parse_term_empty_group() {
        assert!(matches!(
            term("()").unwrap_err(),
            BalanceError::EmptyCompound { .. }
        ));
    }

    #[test]
    fn test_parse_reaction() {
        let r = parse_reaction("CH4 + 2O2 -> CO2 + 2H2O", &FormulaParser::new()).unwrap();
        assert_eq!(r.reactants().len(), 2);
        assert_eq!(r.products().len(), 2);
        assert_eq!(r.coefficients(), vec![1.0, 2.0, 1.0, 2.0]);
    }

    #[test]
    fn test_parse_reaction_missing_operand() {
        let err = parse_reaction("H2 + -> H2O", &FormulaParser::new()).unwrap_err();
        assert_eq!(err, BalanceError::missing_compound(""));
        assert_eq!(err.kind(), ErrorKind::Format);

        assert!(parse_reaction("-> H2O", &FormulaParser::new()).is_err());
    }

    #[test]
    fn test_parse_reaction_lenient() {
        let parser = FormulaParser::with_mode(ParseMode::Lenient);
        let r = parse_reaction("H2 + O2 -> H2O!", &parser).unwrap();
        assert_eq!(r.to_string(), "H2 + O2 -> H2O");
    }
}
