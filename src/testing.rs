//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::cost::Cost;
use crate::index::PrefixIndex;
use crate::types::{Prefix, RouteEntry};

/// Carrier rate sheet from the reference scenario.
pub const SCENARIO_ROUTES: &str = "+1512,0.04\n+1415,0.02\n+1415234,0.03\n+1415246,0.01\n";

/// Phone list from the reference scenario.
pub const SCENARIO_NUMBERS: &str = "+15124156620\n+14152345678\n+19876543210\n";

/// Expected export for the reference scenario.
pub const SCENARIO_EXPORT: &str = "+15124156620,0.04\n+14152345678,0.03\n+19876543210,0\n";

/// Parse a cost literal, panicking on bad test input.
pub fn cost(literal: &str) -> Cost {
    literal
        .parse()
        .unwrap_or_else(|e| panic!("bad test cost {:?}: {}", literal, e))
}

/// Build a route entry from literals.
pub fn entry(prefix: &str, cost_literal: &str) -> RouteEntry {
    let prefix = Prefix::parse(prefix)
        .unwrap_or_else(|e| panic!("bad test prefix {:?}: {}", prefix, e));
    RouteEntry::new(prefix, cost(cost_literal))
}

/// Build an index from `(prefix, cost)` literal pairs.
///
/// This is the canonical implementation used across all tests.
pub fn index_from_pairs(pairs: &[(&str, &str)]) -> PrefixIndex {
    pairs.iter().map(|(p, c)| entry(p, c)).collect()
}

/// Render every entry as `+prefix,cost`, in prefix order.
pub fn dump(index: &PrefixIndex) -> Vec<String> {
    index
        .entries()
        .map(|(prefix, cost)| format!("{},{}", prefix, cost))
        .collect()
}
