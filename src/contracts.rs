// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the merge and lookup rules.
//!
//! Debug-mode assertions that re-derive each answer the slow, obvious way and
//! compare. These contracts:
//!
//! 1. Are **zero-cost in release builds** (`debug_assert!` only)
//! 2. Catch a broken trie at the call that broke it, not three reports later
//! 3. Spell out the rules in one place
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function       | Rule                                              |
//! |-------------------------|---------------------------------------------------|
//! | `check_merge_minimum`   | stored cost = min(previous, incoming)             |
//! | `check_longest_match`   | trie walk = longest hit of a per-length probe     |

use crate::cost::Cost;
use crate::index::DigitTrie;
use crate::types::{MergeOutcome, RouteMatch};

// ============================================================================
// MERGE CONTRACTS
// ============================================================================

/// Check that an insertion left the minimum behind and reported it honestly.
///
/// # Panics (debug builds only)
/// Panics if the stored cost is not `min(previous, incoming)`, or the outcome
/// does not describe what happened.
#[inline]
pub fn check_merge_minimum(
    previous: Option<Cost>,
    incoming: Cost,
    stored: Option<Cost>,
    outcome: MergeOutcome,
) {
    let expected = previous.map_or(incoming, |p| p.min(incoming));
    debug_assert!(
        stored == Some(expected),
        "Contract violation: merge minimum - previous {:?}, incoming {}, stored {:?}",
        previous,
        incoming,
        stored
    );

    let expected_outcome = match previous {
        None => MergeOutcome::Inserted,
        Some(p) if incoming < p => MergeOutcome::Improved { previous: p },
        Some(_) => MergeOutcome::Unchanged,
    };
    debug_assert!(
        outcome == expected_outcome,
        "Contract violation: merge outcome {:?}, expected {:?}",
        outcome,
        expected_outcome
    );
}

// ============================================================================
// LOOKUP CONTRACTS
// ============================================================================

/// Check a longest-match answer against exact probes of every truncation.
///
/// The probe is O(len²) and only runs in debug builds.
///
/// # Panics (debug builds only)
/// Panics if the trie walk and the probe disagree.
#[inline]
pub fn check_longest_match(trie: &DigitTrie, digits: &[u8], found: Option<RouteMatch>) {
    if cfg!(debug_assertions) {
        let expected = (1..=digits.len()).rev().find_map(|len| {
            trie.get(&digits[..len]).map(|cost| RouteMatch {
                prefix_len: len,
                cost,
            })
        });
        debug_assert!(
            found == expected,
            "Contract violation: longest match for {:?} - walk {:?}, probe {:?}",
            String::from_utf8_lossy(digits),
            found,
            expected
        );
    }
}
