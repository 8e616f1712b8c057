// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for longest-prefix lookups.
//!
//! Builds an index from fuzzer-chosen prefixes, then checks each query against
//! a probe of every truncation.

#![no_main]

use arbitrary::Arbitrary;
use callroute::{normalized_digits, Cost, Prefix, PrefixIndex};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    routes: Vec<(String, u16)>,
    queries: Vec<String>,
}

fuzz_target!(|input: Input| {
    let mut index = PrefixIndex::new();
    for (digits, units) in &input.routes {
        let Ok(prefix) = Prefix::parse(&format!("+{}", digits)) else {
            continue;
        };
        let cost = Cost::from_units(u64::from(*units), 2).unwrap();
        index.insert(&prefix, cost);
    }

    for query in &input.queries {
        let found = index.lookup(query);
        let Ok(digits) = normalized_digits(query) else {
            assert!(found.is_none());
            continue;
        };
        let expected = (1..=digits.len()).rev().find_map(|len| {
            let prefix = Prefix::parse(&format!("+{}", &digits[..len])).ok()?;
            index.get(&prefix)
        });
        assert_eq!(found, expected);
    }
});
