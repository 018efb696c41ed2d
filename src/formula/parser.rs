//! Stack-based parser for chemical formulas.

use std::iter::Peekable;
use std::str::Chars;

use super::types::{Compound, Element, Group, Part};
use crate::error::{BalanceError, Result};

/// How the parser treats input outside the formula grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Reject unknown characters, stray numbers and unclosed groups
    #[default]
    Strict,
    /// Skip unknown characters and stray numbers, close open groups at the end
    Lenient,
}

/// Formula parser. Stateless; one instance can parse any number of formulas.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormulaParser {
    mode: ParseMode,
}

/// An open container in the parse arena.
struct Frame {
    slots: Vec<Slot>,
    multiplier: u32,
}

impl Frame {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            multiplier: 1,
        }
    }
}

/// A child recorded during the scan. Groups point at their arena frame.
enum Slot {
    Element(Element),
    Group(usize),
}

/// Character cursor tracking the char position for error reporting.
struct Cursor<'a> {
    chars: Peekable<Chars<'a>>,
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.position += 1;
        Some(ch)
    }

    fn read_digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            digits.push(ch);
            self.advance();
        }
        digits
    }
}

impl FormulaParser {
    /// Create a strict parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given mode.
    pub fn with_mode(mode: ParseMode) -> Self {
        Self { mode }
    }

    /// The parser's mode.
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Parse a formula such as `Ca(OH)2` into a compound tree.
    ///
    /// An empty formula yields an empty compound.
    pub fn parse(&self, formula: &str) -> Result<Compound> {
        let strict = self.mode == ParseMode::Strict;

        // Frame 0 is the root compound; `stack` holds indices of open frames.
        let mut frames = vec![Frame::new()];
        let mut stack = vec![0usize];
        let mut cursor = Cursor::new(formula);

        while let Some(ch) = cursor.peek() {
            let position = cursor.position;
            let top = stack[stack.len() - 1];

            match ch {
                '(' => {
                    cursor.advance();
                    let index = frames.len();
                    frames.push(Frame::new());
                    frames[top].slots.push(Slot::Group(index));
                    stack.push(index);
                }
                ')' => {
                    cursor.advance();
                    if stack.len() == 1 {
                        return Err(BalanceError::UnmatchedParen {
                            formula: formula.to_string(),
                            position,
                        });
                    }
                    stack.pop();
                    if let Some(multiplier) = read_count(&mut cursor, formula)? {
                        frames[top].multiplier = multiplier;
                    }
                }
                'A'..='Z' => {
                    cursor.advance();
                    let mut symbol = String::from(ch);
                    if let Some(lower) = cursor.peek().filter(char::is_ascii_lowercase) {
                        symbol.push(lower);
                        cursor.advance();
                    }
                    let count = read_count(&mut cursor, formula)?.unwrap_or(1);
                    frames[top]
                        .slots
                        .push(Slot::Element(Element::new(symbol, count)));
                }
                '0'..='9' => {
                    // Counts are consumed with their element or group, so any
                    // digit reached here has nothing to multiply.
                    let digits = cursor.read_digits();
                    if strict {
                        return Err(BalanceError::StrayNumber {
                            formula: formula.to_string(),
                            position,
                            digits,
                        });
                    }
                }
                _ => {
                    cursor.advance();
                    if strict {
                        return Err(BalanceError::UnexpectedCharacter {
                            formula: formula.to_string(),
                            position,
                            ch,
                        });
                    }
                }
            }
        }

        if strict && stack.len() > 1 {
            return Err(BalanceError::UnclosedGroup {
                formula: formula.to_string(),
            });
        }

        Ok(assemble(&mut frames, 0))
    }
}

/// Read an optional run of digits as a positive `u32`.
fn read_count(cursor: &mut Cursor<'_>, formula: &str) -> Result<Option<u32>> {
    let position = cursor.position;
    let digits = cursor.read_digits();
    if digits.is_empty() {
        return Ok(None);
    }
    match digits.parse::<u32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(BalanceError::InvalidCount {
            formula: formula.to_string(),
            position,
            digits,
        }),
    }
}

/// Build the owned tree rooted at `index`, draining the arena as it goes.
fn assemble(frames: &mut [Frame], index: usize) -> Compound {
    let slots = std::mem::take(&mut frames[index].slots);
    let mut compound = Compound::new();
    for slot in slots {
        let part = match slot {
            Slot::Element(element) => Part::Element(element),
            Slot::Group(child) => {
                let multiplier = frames[child].multiplier;
                Part::Group(Group::new(assemble(frames, child), multiplier))
            }
        };
        compound.push(part);
    }
    compound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn strict(formula: &str) -> Result<Compound> {
        FormulaParser::new().parse(formula)
    }

    fn lenient(formula: &str) -> Result<Compound> {
        FormulaParser::with_mode(ParseMode::Lenient).parse(formula)
    }

    #[test]
    fn test_parse_simple() {
        let c = strict("H2O").unwrap();
        assert_eq!(
            c.parts(),
            &[
                Part::Element(Element::new("H", 2)),
                Part::Element(Element::new("O", 1)),
            ]
        );
    }

    #[test]
    fn test_parse_two_letter_symbols() {
        let c = strict("NaCl").unwrap();
        assert_eq!(c.parts().len(), 2);
        assert_eq!(c.to_string(), "NaCl");
    }

    #[test]
    fn test_parse_group() {
        let c = strict("Ca(OH)2").unwrap();
        assert_eq!(c.parts().len(), 2);
        match &c.parts()[1] {
            Part::Group(g) => {
                assert_eq!(g.multiplier(), 2);
                assert_eq!(g.compound().to_string(), "OH");
            }
            other => panic!("expected group, got {:?}", other),
        }
        assert_eq!(c.to_string(), "Ca(OH)2");
    }

    #[test]
    fn test_parse_nested_groups() {
        let c = strict("K4(Fe(CN)6)").unwrap();
        assert_eq!(c.to_string(), "K4(Fe(CN)6)");
        let Part::Group(outer) = &c.parts()[1] else {
            panic!("expected group");
        };
        assert_eq!(outer.multiplier(), 1);
        let Part::Group(inner) = &outer.compound().parts()[1] else {
            panic!("expected nested group");
        };
        assert_eq!(inner.multiplier(), 6);
    }

    #[test]
    fn test_parse_multidigit_counts() {
        let c = strict("C12H22O11").unwrap();
        assert_eq!(c.parts()[0], Part::Element(Element::new("C", 12)));
        assert_eq!(c.parts()[2], Part::Element(Element::new("O", 11)));
    }

    #[test]
    fn test_parse_empty() {
        let c = strict("").unwrap();
        assert!(c.is_empty());
    }

    #[test]
    fn test_unmatched_close_paren() {
        let err = strict("OH)2").unwrap_err();
        assert_eq!(
            err,
            BalanceError::UnmatchedParen {
                formula: "OH)2".to_string(),
                position: 2,
            }
        );
        // Unmatched parens are rejected in both modes.
        assert!(lenient("OH)2").is_err());
    }

    #[test]
    fn test_unclosed_group() {
        let err = strict("Ca(OH").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(matches!(err, BalanceError::UnclosedGroup { .. }));

        let c = lenient("Ca(OH").unwrap();
        assert_eq!(c.to_string(), "Ca(OH)");
    }

    #[test]
    fn test_stray_number() {
        let err = strict("2H").unwrap_err();
        assert!(matches!(err, BalanceError::StrayNumber { position: 0, .. }));
        assert!(strict("(2H)").is_err());

        assert_eq!(lenient("2H").unwrap().to_string(), "H");
        assert_eq!(lenient("(23OH)2").unwrap().to_string(), "(OH)2");
    }

    #[test]
    fn test_unexpected_character() {
        let err = strict("H2 O").unwrap_err();
        assert_eq!(
            err,
            BalanceError::UnexpectedCharacter {
                formula: "H2 O".to_string(),
                position: 2,
                ch: ' ',
            }
        );
        assert!(strict("h2o").is_err());

        assert_eq!(lenient("H2 O").unwrap().to_string(), "H2O");
        assert_eq!(lenient("H2·O!").unwrap().to_string(), "H2O");
    }

    #[test]
    fn test_zero_and_overflowing_counts() {
        assert!(matches!(
            strict("H0").unwrap_err(),
            BalanceError::InvalidCount { .. }
        ));
        assert!(lenient("(OH)0").is_err());
        assert!(strict("H99999999999").is_err());
    }
}
