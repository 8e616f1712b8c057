// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed-point route costs.
//!
//! Rate sheets quote prices as decimal literals like `0.0125`. Push those through
//! `f64` and back and sooner or later an export says `0.012499999999999999`.
//! A [`Cost`] keeps the integer mantissa plus the number of fractional digits it
//! was written with, so the literal survives a parse/format round trip and every
//! comparison is exact integer arithmetic.
//!
//! Equality and ordering are by numeric value (`0.04 == 0.040`). Display uses the
//! scale the value was parsed with, so `0.040` prints as `0.040`.
//!
//! | Input      | units | scale | Display   |
//! |------------|-------|-------|-----------|
//! | `0.04`     | 4     | 2     | `0.04`    |
//! | `0.040`    | 40    | 3     | `0.040`   |
//! | `12`       | 12    | 0     | `12`      |
//! | `007.50`   | 750   | 2     | `7.50`    |

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Maximum number of fractional digits a cost may carry.
pub const MAX_SCALE: u8 = 18;

const POW10: [u64; MAX_SCALE as usize + 1] = {
    let mut table = [1u64; MAX_SCALE as usize + 1];
    let mut i = 1;
    while i < table.len() {
        table[i] = table[i - 1] * 10;
        i += 1;
    }
    table
};

/// Non-negative decimal cost stored as `units / 10^scale`.
#[derive(Debug, Clone, Copy)]
pub struct Cost {
    units: u64,
    scale: u8,
}

impl Cost {
    /// The integer zero, written `0`.
    pub const ZERO: Cost = Cost { units: 0, scale: 0 };

    /// Build a cost from a mantissa and a scale.
    ///
    /// Returns `None` when `scale` exceeds [`MAX_SCALE`].
    pub fn from_units(units: u64, scale: u8) -> Option<Self> {
        (scale <= MAX_SCALE).then_some(Cost { units, scale })
    }

    /// Integer mantissa.
    pub fn units(&self) -> u64 {
        self.units
    }

    /// Number of fractional digits.
    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.units == 0
    }

    /// Mantissa rescaled to `scale` (which must be >= `self.scale`).
    ///
    /// u64 * 10^18 always fits in u128.
    fn widened(&self, scale: u8) -> u128 {
        u128::from(self.units) * u128::from(POW10[usize::from(scale - self.scale)])
    }
}

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.scale == other.scale {
            return self.units.cmp(&other.units);
        }
        let scale = self.scale.max(other.scale);
        self.widened(scale).cmp(&other.widened(scale))
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.units);
        }
        let divisor = POW10[usize::from(self.scale)];
        write!(
            f,
            "{}.{:0width$}",
            self.units / divisor,
            self.units % divisor,
            width = usize::from(self.scale)
        )
    }
}

/// Why a cost literal was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CostParseError {
    /// The field was empty.
    Empty,
    /// Nothing before the decimal point (`.5`).
    MissingIntegerDigits,
    /// Nothing after the decimal point (`5.`).
    MissingFractionDigits,
    /// Something other than a digit or a single decimal point.
    InvalidCharacter { position: usize, found: char },
    /// More fractional digits than [`MAX_SCALE`].
    TooPrecise { digits: usize },
    /// The mantissa does not fit in 64 bits.
    Overflow,
}

impl fmt::Display for CostParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostParseError::Empty => write!(f, "empty cost"),
            CostParseError::MissingIntegerDigits => {
                write!(f, "cost has no digits before the decimal point")
            }
            CostParseError::MissingFractionDigits => {
                write!(f, "cost has no digits after the decimal point")
            }
            CostParseError::InvalidCharacter { position, found } => {
                write!(f, "unexpected {:?} at position {} in cost", found, position)
            }
            CostParseError::TooPrecise { digits } => write!(
                f,
                "cost has {} fractional digits (max {})",
                digits, MAX_SCALE
            ),
            CostParseError::Overflow => write!(f, "cost is too large"),
        }
    }
}

impl std::error::Error for CostParseError {}

impl FromStr for Cost {
    type Err = CostParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(CostParseError::Empty);
        }

        let (int_part, frac_part) = match s.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (s, None),
        };

        let mut units: u64 = 0;
        for (position, c) in s.char_indices() {
            if frac_part.is_some() && position == int_part.len() {
                continue;
            }
            let digit = c
                .to_digit(10)
                .ok_or(CostParseError::InvalidCharacter { position, found: c })?;
            units = units
                .checked_mul(10)
                .and_then(|u| u.checked_add(u64::from(digit)))
                .ok_or(CostParseError::Overflow)?;
        }

        if int_part.is_empty() {
            return Err(CostParseError::MissingIntegerDigits);
        }

        let scale = match frac_part {
            None => 0,
            Some("") => return Err(CostParseError::MissingFractionDigits),
            Some(frac) if frac.len() > usize::from(MAX_SCALE) => {
                return Err(CostParseError::TooPrecise { digits: frac.len() })
            }
            Some(frac) => frac.len() as u8,
        };

        Ok(Cost { units, scale })
    }
}

impl Serialize for Cost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        literal.parse().map_err(serde::de::Error::custom)
    }
}
