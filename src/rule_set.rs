use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// A life-like rule.
///
/// # Representation
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

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// State of a cell in the next generation, given its current state and how many of its
    /// (up to 8) neighbors are alive.
    #[inline]
    pub fn next(&self, alive: bool, neighbors: u8) -> bool {
        debug_assert!(neighbors <= 8, "a cell has at most 8 neighbors");

        let mask = 1 << neighbors;

        if alive {
            self.survivals() & mask != 0
        } else {
            self.births() & mask != 0
        }
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |set: u16| -> String {
            (0..=8u8)
                .filter(|n| set & (1 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Rule string is empty")]
    Empty,

    #[error("Expected 'B' or 'S', found '{got}'")]
    UnexpectedSection { got: char },

    #[error("Invalid neighbor count '{got}', expected a digit in 0..=8")]
    InvalidCount { got: char },

    #[error("Neighbor count {n} listed twice")]
    Duplicate { n: u8 },
}

impl FromStr for RuleSet {
    type Err = RuleError;

    /// Parses `B3/S23`, `b3s23` and the nameless `3/23` forms. Section letters are case
    /// insensitive and the slash is optional when both sections are named.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum State {
            Birth,
            Survival,
        }

        let s = s.trim();
        if s.is_empty() {
            return Err(RuleError::Empty);
        }

        // Nameless rules start with the birth counts directly
        let mut state = State::Birth;
        let mut named = false;
        let (mut b, mut s_bits) = (0u16, 0u16);

        for (i, c) in s.chars().enumerate() {
            match c {
                'b' | 'B' if i == 0 => {
                    named = true;
                    state = State::Birth;
                }
                's' | 'S' => {
                    state = State::Survival;
                }
                '/' if !named => {
                    state = State::Survival;
                }
                '/' => {}
                d if d.is_ascii_digit() => {
                    let n = d as u8 - b'0';
                    if n > 8 {
                        return Err(RuleError::InvalidCount { got: d });
                    }

                    let set = match state {
                        State::Birth => &mut b,
                        State::Survival => &mut s_bits,
                    };

                    if *set & (1 << n) != 0 {
                        return Err(RuleError::Duplicate { n });
                    }

                    *set |= 1 << n;
                }
                c if c.is_ascii_alphabetic() => {
                    return Err(RuleError::UnexpectedSection { got: c });
                }
                c => return Err(RuleError::InvalidCount { got: c }),
            }
        }

        Ok(RuleSet::new(b, s_bits))
    }
}

#[cfg(test)]
mod test {
    use super::B3S23;
    use super::RuleError;
    use super::RuleSet;

    #[test]
    fn life_transitions() {
        for n in 0..=8 {
            assert_eq!(B3S23.next(false, n), n == 3, "dead cell with {n} neighbors");
            assert_eq!(B3S23.next(true, n), n == 2 || n == 3, "live cell with {n} neighbors");
        }
    }

    #[test]
    fn parse_forms() {
        assert_eq!("B3/S23".parse::<RuleSet>(), Ok(B3S23));
        assert_eq!("b3s23".parse::<RuleSet>(), Ok(B3S23));
        assert_eq!("3/23".parse::<RuleSet>(), Ok(B3S23));

        let highlife: RuleSet = "B36/S23".parse().unwrap();
        assert_eq!(highlife.births(), 0b100_1000);
        assert_eq!(highlife.survivals(), 0b1100);
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<RuleSet>(), Err(RuleError::Empty));
        assert_eq!(
            "B9/S23".parse::<RuleSet>(),
            Err(RuleError::InvalidCount { got: '9' })
        );
        assert_eq!(
            "B3/X23".parse::<RuleSet>(),
            Err(RuleError::UnexpectedSection { got: 'X' })
        );
        assert_eq!("B33/S23".parse::<RuleSet>(), Err(RuleError::Duplicate { n: 3 }));
    }

    #[test]
    fn display_round_trips() {
        assert_eq!(B3S23.to_string(), "B3/S23");

        let rule: RuleSet = "B/S".parse().unwrap();
        assert_eq!(rule.to_string(), "B/S");
        assert_eq!(rule.to_string().parse::<RuleSet>(), Ok(rule));
    }
}
