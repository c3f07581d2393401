use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cell::CellValue;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub const fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub const fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// The value of a cell in the next generation given its current value and its number of
    /// live neighbours. Total over every `(value, neighbors)` pair; counts past 8 never match.
    pub const fn next(&self, value: CellValue, neighbors: u8) -> CellValue {
        if neighbors > 8 {
            return CellValue::Dead;
        }

        let mask = 1u16 << neighbors;
        let set = match value {
            CellValue::Dead => self.births(),
            CellValue::Alive => self.survivals(),
        };

        if set & mask == mask {
            CellValue::Alive
        } else {
            CellValue::Dead
        }
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleSet({self})")
    }
}

/// Formats as `B3/S23`
impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |mask: u16| -> String {
            (0..=8u8)
                .filter(|n| mask & (1u16 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Empty rule string")]
    Empty,

    #[error("Invalid character '{0}' in rule string")]
    InvalidChar(char),

    #[error("Neighbour count {0} is out of range, expected 0 to 8")]
    OutOfRange(u32),

    #[error("Rule string has no survival part")]
    MissingSurvival,
}

/// Accepts `b3s23`, `B3/S23` and the nameless `3/23`. Letters are case insensitive.
impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum State {
            Birth,
            Survival,
        }

        let s = s.trim();
        if s.is_empty() {
            return Err(RuleError::Empty);
        }

        let mut state = State::Birth;
        let mut seen_survival = false;
        let (mut b, mut s_mask) = (0u16, 0u16);

        for c in s.chars() {
            match c {
                'b' | 'B' => {
                    state = State::Birth;
                }
                's' | 'S' | '/' => {
                    state = State::Survival;
                    seen_survival = true;
                }
                n => {
                    let n = n.to_digit(10).ok_or(RuleError::InvalidChar(n))?;

                    if n > 8 {
                        return Err(RuleError::OutOfRange(n));
                    }

                    match state {
                        State::Birth => b |= 1u16 << n,
                        State::Survival => s_mask |= 1u16 << n,
                    }
                }
            }
        }

        if !seen_survival {
            return Err(RuleError::MissingSurvival);
        }

        Ok(RuleSet::new(b, s_mask))
    }
}
