//! Reaction model: coefficient/compound terms on two sides of an arrow.

use std::fmt;

use super::atoms::{count_atoms, AtomCounts};
use crate::error::{BalanceError, Result};
use crate::formula::Compound;

/// One species in a reaction with its stoichiometric coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    /// Coefficient; the literal from the input until the reaction is balanced
    pub coefficient: f64,
    /// The parsed species
    pub compound: Compound,
}

impl Term {
    /// Create a new term.
    pub fn new(coefficient: f64, compound: Compound) -> Self {
        Self {
            coefficient,
            compound,
        }
    }

    /// Atom totals of the compound, ignoring the coefficient.
    pub fn atoms(&self) -> Result<AtomCounts> {
        count_atoms(&self.compound)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coefficient != 1.0 {
            write!(f, "{}", self.coefficient)?;
        }
        write!(f, "{}", self.compound)
    }
}

/// A chemical reaction: reactants on the left, products on the right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reaction {
    reactants: Vec<Term>,
    products: Vec<Term>,
}

impl Reaction {
    /// Create an empty reaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reactant.
    pub fn add_reactant(&mut self, coefficient: f64, compound: Compound) -> Result<()> {
        check_term(coefficient, &compound)?;
        self.reactants.push(Term::new(coefficient, compound));
        Ok(())
    }

    /// Append a product.
    pub fn add_product(&mut self, coefficient: f64, compound: Compound) -> Result<()> {
        check_term(coefficient, &compound)?;
        self.products.push(Term::new(coefficient, compound));
        Ok(())
    }

    pub fn reactants(&self) -> &[Term] {
        &self.reactants
    }

    pub fn products(&self) -> &[Term] {
        &self.products
    }

    /// All terms, reactants first.
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.reactants.iter().chain(self.products.iter())
    }

    /// All terms mutably, reactants first.
    pub fn terms_mut(&mut self) -> impl Iterator<Item = &mut Term> {
        self.reactants.iter_mut().chain(self.products.iter_mut())
    }

    /// Current coefficients, reactants first.
    pub fn coefficients(&self) -> Vec<f64> {
        self.terms().map(|t| t.coefficient).collect()
    }

    /// Union of element symbols over all terms, in first-seen order.
    pub fn element_symbols(&self) -> Result<Vec<String>> {
        let mut symbols: Vec<String> = Vec::new();
        for term in self.terms() {
            for (symbol, _) in term.atoms()?.iter() {
                if !symbols.iter().any(|s| s == symbol) {
                    symbols.push(symbol.to_string());
                }
            }
        }
        Ok(symbols)
    }

    /// True if every element is conserved under the current coefficients.
    pub fn is_balanced(&self) -> Result<bool> {
        let totals = |side: &[Term]| -> Result<AtomTotals> {
            let mut sums = AtomTotals::default();
            for term in side {
                for (symbol, count) in term.atoms()?.iter() {
                    sums.add(symbol, term.coefficient * count as f64);
                }
            }
            Ok(sums)
        };
        let left = totals(&self.reactants)?;
        let right = totals(&self.products)?;

        Ok(self
            .element_symbols()?
            .iter()
            .all(|s| left.get(s) == right.get(s)))
    }
}

/// Coefficient-weighted atom totals for one side.
#[derive(Default)]
struct AtomTotals(Vec<(String, f64)>);

impl AtomTotals {
    fn add(&mut self, symbol: &str, amount: f64) {
        match self.0.iter_mut().find(|(s, _)| s == symbol) {
            Some((_, total)) => *total += amount,
            None => self.0.push((symbol.to_string(), amount)),
        }
    }

    fn get(&self, symbol: &str) -> f64 {
        self.0
            .iter()
            .find(|(s, _)| s == symbol)
            .map_or(0.0, |(_, total)| *total)
    }
}

fn check_term(coefficient: f64, compound: &Compound) -> Result<()> {
    if !(coefficient.is_finite() && coefficient >= 0.0) {
        return Err(BalanceError::invalid_coefficient(
            compound.to_string(),
            coefficient.to_string(),
        ));
    }
    count_atoms(compound).map(|_| ())
}

fn write_side(f: &mut fmt::Formatter<'_>, terms: &[Term]) -> fmt::Result {
    let mut first = true;
    for term in terms.iter().filter(|t| t.coefficient != 0.0) {
        if !first {
            write!(f, " + ")?;
        }
        write!(f, "{}", term)?;
        first = false;
    }
    Ok(())
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_side(f, &self.reactants)?;
        write!(f, " -> ")?;
        write_side(f, &self.products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::formula;

    fn compound(s: &str) -> Compound {
        formula::parse(s).unwrap()
    }

    fn water_reaction(h2: f64, o2: f64, h2o: f64) -> Reaction {
        let mut r = Reaction::new();
        r.add_reactant(h2, compound("H2")).unwrap();
        r.add_reactant(o2, compound("O2")).unwrap();
        r.add_product(h2o, compound("H2O")).unwrap();
        r
    }

    #[test]
    fn test_render_omits_unit_coefficients() {
        assert_eq!(water_reaction(1.0, 1.0, 1.0).to_string(), "H2 + O2 -> H2O");
        assert_eq!(water_reaction(2.0, 1.0, 2.0).to_string(), "2H2 + O2 -> 2H2O");
    }

    #[test]
    fn test_render_skips_zero_terms() {
        assert_eq!(water_reaction(2.0, 0.0, 2.0).to_string(), "2H2 -> 2H2O");
    }

    #[test]
    fn test_render_fractional_coefficient() {
        assert_eq!(water_reaction(1.0, 0.5, 1.0).to_string(), "H2 + 0.5O2 -> H2O");
    }

    #[test]
    fn test_render_groups() {
        let mut r = Reaction::new();
        r.add_reactant(3.0, compound("Ca(OH)2")).unwrap();
        r.add_reactant(2.0, compound("H3PO4")).unwrap();
        r.add_product(1.0, compound("Ca3(PO4)2")).unwrap();
        r.add_product(6.0, compound("H2O")).unwrap();
        assert_eq!(r.to_string(), "3Ca(OH)2 + 2H3PO4 -> Ca3(PO4)2 + 6H2O");
    }

    #[test]
    fn test_rejects_invalid_coefficients() {
        let mut r = Reaction::new();
        let err = r.add_reactant(-1.0, compound("H2")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(r.add_product(f64::NAN, compound("H2O")).is_err());
        assert!(r.add_product(f64::INFINITY, compound("H2O")).is_err());
        assert!(r.add_product(0.0, compound("H2O")).is_ok());
    }

    #[test]
    fn test_element_symbols_first_seen() {
        let mut r = Reaction::new();
        r.add_reactant(1.0, compound("CH4")).unwrap();
        r.add_reactant(1.0, compound("O2")).unwrap();
        r.add_product(1.0, compound("CO2")).unwrap();
        r.add_product(1.0, compound("H2O")).unwrap();
        assert_eq!(r.element_symbols().unwrap(), vec!["C", "H", "O"]);
    }

    #[test]
    fn test_is_balanced() {
        assert!(water_reaction(2.0, 1.0, 2.0).is_balanced().unwrap());
        assert!(!water_reaction(1.0, 1.0, 1.0).is_balanced().unwrap());
        assert!(water_reaction(1.0, 0.5, 1.0).is_balanced().unwrap());
    }

    #[test]
    fn test_rejects_overflowing_atom_counts() {
        let mut r = Reaction::new();
        let err = r
            .add_reactant(1.0, compound("((H4294967295)4294967295)4294967295"))
            .unwrap_err();
        assert_eq!(err, BalanceError::CoefficientOverflow);
        assert!(r.reactants().is_empty());
    }
}
