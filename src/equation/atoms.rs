//! Per-element atom totals.

use crate::error::{BalanceError, Result};
use crate::formula::{Compound, Part};

/// Atom count per element symbol, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomCounts {
    entries: Vec<(String, u64)>,
}

impl AtomCounts {
    /// Create an empty count table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `symbol`, zero if absent.
    pub fn get(&self, symbol: &str) -> u64 {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .map_or(0, |(_, n)| *n)
    }

    /// Add `count` atoms of `symbol`.
    pub fn add(&mut self, symbol: &str, count: u64) -> Result<()> {
        match self.entries.iter_mut().find(|(s, _)| s == symbol) {
            Some((_, n)) => {
                *n = n
                    .checked_add(count)
                    .ok_or(BalanceError::CoefficientOverflow)?;
            }
            None => self.entries.push((symbol.to_string(), count)),
        }
        Ok(())
    }

    /// Add every count of `other`.
    pub fn merge(&mut self, other: &AtomCounts) -> Result<()> {
        for (symbol, count) in other.iter() {
            self.add(symbol, count)?;
        }
        Ok(())
    }

    /// Multiply every count by `factor`.
    pub fn scale(&mut self, factor: u64) -> Result<()> {
        for (_, n) in &mut self.entries {
            *n = n.checked_mul(factor).ok_or(BalanceError::CoefficientOverflow)?;
        }
        Ok(())
    }

    /// Iterate over `(symbol, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(s, n)| (s.as_str(), *n))
    }

    /// Number of distinct elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Count the atoms in a compound.
///
/// A group's total is the sum of its children's totals times its
/// multiplier, so nested groups scale by every enclosing multiplier.
/// Fails with [`BalanceError::CoefficientOverflow`] if a total exceeds `u64`.
pub fn count_atoms(compound: &Compound) -> Result<AtomCounts> {
    let mut counts = AtomCounts::new();
    for part in compound.parts() {
        match part {
            Part::Element(e) => counts.add(e.symbol(), u64::from(e.count()))?,
            Part::Group(g) => {
                let mut inner = count_atoms(g.compound())?;
                inner.scale(u64::from(g.multiplier()))?;
                counts.merge(&inner)?;
            }
        }
    }
    Ok(counts)
}
