// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a route-cost index.
//!
//! Prefixes and phone numbers share one notation: a `+` marker followed by
//! ASCII digits, nothing else. Both are checked by [`normalized_digits`], which
//! hands back the digit run without the marker. The index never sees the marker.
//!
//! | Type           | Role                                             |
//! |----------------|--------------------------------------------------|
//! | `Prefix`       | Validated routing key (`+1415`)                  |
//! | `RouteEntry`   | One `(prefix, cost)` record from a rate sheet    |
//! | `MergeOutcome` | What an insertion did to the stored cost         |
//! | `RouteMatch`   | Longest matching prefix for a query              |
//! | `Resolution`   | Route, no route, or malformed query              |
//! | `LookupResult` | A number paired with its resolution              |
//!
//! # Invariants
//!
//! - **Prefix**: at least one digit, digits only after the marker.
//! - **LookupResult**: a `Route` cost is the cost of the *longest* stored
//!   prefix of the number. Shorter matches never leak through.

use std::fmt;
use std::str::FromStr;

use crate::cost::Cost;

/// Country-code marker every normalized number starts with.
pub const MARKER: char = '+';

/// Why a prefix or phone number is not in normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    /// Empty string.
    Empty,
    /// Does not start with `+`.
    MissingMarker,
    /// Only the `+` marker, no digits.
    NoDigits,
    /// A character other than an ASCII digit after the marker.
    InvalidCharacter { position: usize, found: char },
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberError::Empty => write!(f, "empty number"),
            NumberError::MissingMarker => write!(f, "number does not start with '{}'", MARKER),
            NumberError::NoDigits => write!(f, "number has no digits"),
            NumberError::InvalidCharacter { position, found } => {
                write!(f, "unexpected {:?} at position {}", found, position)
            }
        }
    }
}

impl std::error::Error for NumberError {}

/// Strip the `+` marker and check that only ASCII digits remain.
///
/// ```
/// use callroute::normalized_digits;
///
/// assert_eq!(normalized_digits("+1415"), Ok("1415"));
/// assert!(normalized_digits("1415").is_err());
/// assert!(normalized_digits("+1 415").is_err());
/// ```
pub fn normalized_digits(number: &str) -> Result<&str, NumberError> {
    if number.is_empty() {
        return Err(NumberError::Empty);
    }
    let digits = number
        .strip_prefix(MARKER)
        .ok_or(NumberError::MissingMarker)?;
    if digits.is_empty() {
        return Err(NumberError::NoDigits);
    }
    if let Some((offset, found)) = digits.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        return Err(NumberError::InvalidCharacter {
            position: offset + MARKER.len_utf8(),
            found,
        });
    }
    Ok(digits)
}

/// A validated routing prefix.
///
/// Stored without the `+` marker; `Display` puts it back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Prefix(String);

impl Prefix {
    /// Parse a `+digits` prefix.
    pub fn parse(s: &str) -> Result<Self, NumberError> {
        normalized_digits(s).map(|digits| Prefix(digits.to_string()))
    }

    /// Build from digit bytes already known to be ASCII digits.
    pub(crate) fn from_digit_bytes(digits: &[u8]) -> Self {
        debug_assert!(!digits.is_empty() && digits.iter().all(u8::is_ascii_digit));
        Prefix(digits.iter().map(|&b| char::from(b)).collect())
    }

    /// Digits without the marker.
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// Number of digits (the marker is not counted).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a prefix has at least one digit.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `number` (normalized) starts with this prefix.
    pub fn matches(&self, number: &str) -> bool {
        normalized_digits(number).is_ok_and(|digits| digits.starts_with(self.digits()))
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", MARKER, self.0)
    }
}

impl FromStr for Prefix {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Prefix::parse(s)
    }
}

/// One record from a carrier rate sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub prefix: Prefix,
    pub cost: Cost,
}

impl RouteEntry {
    pub fn new(prefix: Prefix, cost: Cost) -> Self {
        RouteEntry { prefix, cost }
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.prefix, self.cost)
    }
}

/// Effect of a single insertion under the merge policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The prefix was new.
    Inserted,
    /// The prefix existed with a higher cost, which was replaced.
    Improved { previous: Cost },
    /// The prefix existed with a cost no higher than the incoming one.
    Unchanged,
}

/// Longest stored prefix of a query and the cost bound to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch {
    /// Digits matched, not counting the marker.
    pub prefix_len: usize,
    pub cost: Cost,
}

impl RouteMatch {
    /// The matched prefix as a slice of the (normalized) query it came from.
    pub fn prefix_of<'q>(&self, query: &'q str) -> &'q str {
        &query[..self.prefix_len + MARKER.len_utf8()]
    }
}

/// Outcome of resolving one number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Cost of the longest matching prefix.
    Route(Cost),
    /// Well-formed number, no stored prefix matches.
    NoRoute,
    /// The number is not normalized; treated as no route.
    Malformed(NumberError),
}

impl Resolution {
    /// The routed cost, `None` for no route or malformed input.
    pub fn cost(&self) -> Option<Cost> {
        match self {
            Resolution::Route(cost) => Some(*cost),
            Resolution::NoRoute | Resolution::Malformed(_) => None,
        }
    }

    pub fn is_route(&self) -> bool {
        matches!(self, Resolution::Route(_))
    }

    /// Short machine-readable status.
    pub fn status(&self) -> &'static str {
        match self {
            Resolution::Route(_) => "route",
            Resolution::NoRoute => "no_route",
            Resolution::Malformed(_) => "malformed",
        }
    }
}

/// Text written in place of a cost when no route exists.
pub const NO_ROUTE: &str = "0";

/// A number and what it resolved to.
///
/// `Display` renders the export line `<number>,<cost>`, with `0` when no
/// route was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub number: String,
    pub resolution: Resolution,
}

impl LookupResult {
    pub fn cost(&self) -> Option<Cost> {
        self.resolution.cost()
    }
}

impl fmt::Display for LookupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cost() {
            Some(cost) => write!(f, "{},{}", self.number, cost),
            None => write!(f, "{},{}", self.number, NO_ROUTE),
        }
    }
}
