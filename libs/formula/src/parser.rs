//! Single-pass formula scanner.
//!
//! ```text
//! formula        := term*
//! term           := element_symbol isotope_tag? count? | group
//! group          := ('(' | '[') formula (')' | ']') count?
//! element_symbol := UPPER LOWER*
//! isotope_tag    := '{' DIGIT+ '}'
//! count          := DIGIT+
//! ```
//!
//! Groups are handled with an explicit frame stack rather than recursion, so
//! nesting depth is limited only by memory.

use crate::counts::ElementCount;
use crate::error::{Error, MalformedReason, Result};
use smallvec::SmallVec;
use std::iter::Peekable;
use std::str::CharIndices;

/// Parses `formula` into its element counts.
///
/// A symbol without digits counts once, a group without a multiplier is taken
/// once. Zero counts and zero multipliers contribute nothing.
///
/// ```
/// let counts = stoich_formula::parse("Fe2(SO4)3").unwrap();
/// assert_eq!(counts.get("Fe"), 2);
/// assert_eq!(counts.get("S"), 3);
/// assert_eq!(counts.get("O"), 12);
/// ```
pub fn parse(formula: &str) -> Result<ElementCount> {
    Scanner::new(formula).run()
}

/// Returns `Ok(())` when `formula` parses.
pub fn validate(formula: &str) -> Result<()> {
    parse(formula).map(|_| ())
}

/// Outer accumulation saved while a group is open.
#[derive(Debug)]
struct ParseFrame {
    outer: ElementCount,
    opened_at: usize,
}

struct Scanner<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    stack: SmallVec<[ParseFrame; 4]>,
    working: ElementCount,
    symbol: String,
    digits: Option<u32>,
    tagged: bool,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            stack: SmallVec::new(),
            working: ElementCount::new(),
            symbol: String::new(),
            digits: None,
            tagged: false,
        }
    }

    fn run(mut self) -> Result<ElementCount> {
        while let Some((pos, c)) = self.chars.next() {
            match c {
                'A'..='Z' => {
                    self.finish_symbol(pos)?;
                    self.symbol.push(c);
                }
                'a'..='z' => {
                    // Lowercase only extends a symbol whose letters are still open.
                    if self.symbol.is_empty() || self.digits.is_some() || self.tagged {
                        return Err(Error::malformed(pos, MalformedReason::InvalidCharacter(c)));
                    }
                    self.symbol.push(c);
                }
                '0'..='9' => {
                    if self.symbol.is_empty() {
                        return Err(Error::malformed(pos, MalformedReason::CountWithoutElement));
                    }
                    let count = push_digit(self.digits.unwrap_or(0), c)
                        .ok_or(Error::malformed(pos, MalformedReason::CountOverflow))?;
                    self.digits = Some(count);
                }
                '{' => self.isotope_tag(pos)?,
                '(' | '[' => {
                    self.finish_symbol(pos)?;
                    let outer = std::mem::take(&mut self.working);
                    self.stack.push(ParseFrame {
                        outer,
                        opened_at: pos,
                    });
                }
                ')' | ']' => self.close_group(pos)?,
                _ => return Err(Error::malformed(pos, MalformedReason::InvalidCharacter(c))),
            }
        }

        let end = self.input.len();
        self.finish_symbol(end)?;
        if let Some(frame) = self.stack.last() {
            return Err(Error::malformed(
                frame.opened_at,
                MalformedReason::UnmatchedOpeningDelimiter,
            ));
        }
        Ok(self.working)
    }

    /// Adds the buffered symbol to the working set and clears the buffers.
    fn finish_symbol(&mut self, pos: usize) -> Result<()> {
        if self.symbol.is_empty() {
            return Ok(());
        }
        let count = self.digits.take().unwrap_or(1);
        self.working
            .add(&self.symbol, count)
            .map_err(|_| Error::malformed(pos, MalformedReason::CountOverflow))?;
        self.symbol.clear();
        self.tagged = false;
        Ok(())
    }

    /// `{digits}` directly after the symbol letters, appended to the symbol.
    fn isotope_tag(&mut self, pos: usize) -> Result<()> {
        if self.symbol.is_empty() || self.digits.is_some() || self.tagged {
            return Err(Error::malformed(pos, MalformedReason::InvalidIsotopeTag));
        }
        let mut saw_digit = false;
        loop {
            match self.chars.next() {
                Some((_, d @ '0'..='9')) => {
                    self.symbol.push(d);
                    saw_digit = true;
                }
                Some((_, '}')) if saw_digit => break,
                _ => return Err(Error::malformed(pos, MalformedReason::InvalidIsotopeTag)),
            }
        }
        self.tagged = true;
        Ok(())
    }

    fn close_group(&mut self, pos: usize) -> Result<()> {
        self.finish_symbol(pos)?;

        let mut multiplier: Option<u32> = None;
        while let Some(&(digit_pos, d @ '0'..='9')) = self.chars.peek() {
            self.chars.next();
            multiplier = Some(
                push_digit(multiplier.unwrap_or(0), d)
                    .ok_or(Error::malformed(digit_pos, MalformedReason::CountOverflow))?,
            );
        }

        let frame = self
            .stack
            .pop()
            .ok_or(Error::malformed(pos, MalformedReason::UnmatchedClosingDelimiter))?;

        let mut group = std::mem::replace(&mut self.working, frame.outer);
        group
            .multiply(multiplier.unwrap_or(1))
            .map_err(|_| Error::malformed(pos, MalformedReason::CountOverflow))?;
        self.working
            .merge(&group)
            .map_err(|_| Error::malformed(pos, MalformedReason::CountOverflow))?;
        Ok(())
    }
}

fn push_digit(acc: u32, digit: char) -> Option<u32> {
    let d = digit.to_digit(10)?;
    acc.checked_mul(10)?.checked_add(d)
}
