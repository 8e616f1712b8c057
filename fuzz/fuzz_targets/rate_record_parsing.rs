// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for rate-sheet record parsing.
//!
//! Every line of a carrier file goes through `parse_record`. It must reject
//! garbage with an error, never a panic, and anything it accepts must print
//! back to a record that parses to the same thing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use callroute::load::parse_record;

fuzz_target!(|data: &[u8]| {
    let line = String::from_utf8_lossy(data);
    if let Ok(entry) = parse_record(&line) {
        let printed = entry.to_string();
        let reparsed = parse_record(&printed).expect("printed record should parse");
        assert_eq!(reparsed, entry);
        assert_eq!(reparsed.to_string(), printed);
    }
});
