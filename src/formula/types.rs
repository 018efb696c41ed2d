//! Compound tree types produced by the formula parser.

use std::fmt;

/// A chemical element with its atom count, e.g. `O2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    symbol: String,
    count: u32,
}

impl Element {
    /// Create a new element. `count` must be at least 1.
    pub fn new(symbol: impl Into<String>, count: u32) -> Self {
        debug_assert!(count > 0, "element count must be positive");
        Self {
            symbol: symbol.into(),
            count,
        }
    }

    /// Atomic symbol, e.g. `"Ca"`.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Atom count (subscript).
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)?;
        if self.count > 1 {
            write!(f, "{}", self.count)?;
        }
        Ok(())
    }
}

/// A parenthesized sub-formula with a multiplier, e.g. `(OH)2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    compound: Compound,
    multiplier: u32,
}

impl Group {
    /// Create a new group. `multiplier` must be at least 1.
    pub fn new(compound: Compound, multiplier: u32) -> Self {
        debug_assert!(multiplier > 0, "group multiplier must be positive");
        Self {
            compound,
            multiplier,
        }
    }

    /// The enclosed compound.
    pub fn compound(&self) -> &Compound {
        &self.compound
    }

    /// Multiplier applied to every atom in the group.
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.compound)?;
        if self.multiplier > 1 {
            write!(f, "{}", self.multiplier)?;
        }
        Ok(())
    }
}

/// One child of a compound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// A single element
    Element(Element),
    /// A nested group
    Group(Group),
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Element(e) => e.fmt(f),
            Part::Group(g) => g.fmt(f),
        }
    }
}

/// A chemical species as written in a formula, without coefficient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    parts: Vec<Part>,
}

impl Compound {
    /// Create an empty compound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compound from its ordered parts.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    /// Append a part.
    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Ordered children.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// True if the compound has no children at all.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// True if at least one element appears anywhere in the tree.
    pub fn has_atoms(&self) -> bool {
        self.parts.iter().any(|part| match part {
            Part::Element(_) => true,
            Part::Group(g) => g.compound.has_atoms(),
        })
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            part.fmt(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_display() {
        assert_eq!(Element::new("H", 2).to_string(), "H2");
        assert_eq!(Element::new("Fe", 1).to_string(), "Fe");
    }

    #[test]
    fn test_group_display() {
        let oh = Compound::from_parts(vec![
            Part::Element(Element::new("O", 1)),
            Part::Element(Element::new("H", 1)),
        ]);
        let mut ca_oh2 = Compound::new();
        ca_oh2.push(Part::Element(Element::new("Ca", 1)));
        ca_oh2.push(Part::Group(Group::new(oh.clone(), 2)));
        assert_eq!(ca_oh2.to_string(), "Ca(OH)2");

        let single = Group::new(oh, 1);
        assert_eq!(single.to_string(), "(OH)");
    }

    #[test]
    fn test_has_atoms() {
        assert!(!Compound::new().has_atoms());

        let empty_group = Compound::from_parts(vec![Part::Group(Group::new(Compound::new(), 3))]);
        assert!(!empty_group.is_empty());
        assert!(!empty_group.has_atoms());
    }
}
