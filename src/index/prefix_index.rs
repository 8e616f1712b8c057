// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The merged route-cost index.
//!
//! One `PrefixIndex` holds every carrier's rate sheet at once. Carrier identity
//! is gone after insertion: all that survives is the cheapest cost seen for each
//! prefix. That makes the merge a pointwise minimum, which is associative,
//! commutative and idempotent, so it doesn't matter how many files you load, in
//! what order, or how many times.
//!
//! # Invariants
//!
//! - At most one cost per prefix.
//! - The stored cost is the minimum of every cost ever inserted for it.
//! - Costs only go down; nothing is ever removed.
//!
//! Debug builds check the merge and longest-match rules on every call via
//! [`contracts`](crate::contracts).

use serde::Serialize;

use super::trie::{DigitTrie, Entries};
use crate::contracts;
use crate::cost::Cost;
use crate::types::{normalized_digits, MergeOutcome, NumberError, Prefix, RouteEntry, RouteMatch};

/// Size figures for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Distinct prefixes stored.
    pub prefixes: usize,
    /// Trie nodes, root included.
    pub nodes: usize,
    /// Heap bytes held by the index.
    pub approx_bytes: usize,
}

/// Running count of merge outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeTally {
    pub inserted: usize,
    pub improved: usize,
    pub unchanged: usize,
}

impl MergeTally {
    pub fn record(&mut self, outcome: MergeOutcome) {
        match outcome {
            MergeOutcome::Inserted => self.inserted += 1,
            MergeOutcome::Improved { .. } => self.improved += 1,
            MergeOutcome::Unchanged => self.unchanged += 1,
        }
    }

    /// Records seen.
    pub fn total(&self) -> usize {
        self.inserted + self.improved + self.unchanged
    }

    pub fn absorb(&mut self, other: MergeTally) {
        self.inserted += other.inserted;
        self.improved += other.improved;
        self.unchanged += other.unchanged;
    }
}

/// Prefix → cheapest cost, with longest-prefix lookup.
#[derive(Debug, Clone, Default)]
pub struct PrefixIndex {
    trie: DigitTrie,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for roughly `prefixes` entries.
    pub fn with_capacity(prefixes: usize) -> Self {
        Self {
            trie: DigitTrie::with_capacity(prefixes),
        }
    }

    /// Insert under the merge policy.
    pub fn insert(&mut self, prefix: &Prefix, cost: Cost) -> MergeOutcome {
        #[cfg(debug_assertions)]
        let previous = self.get(prefix);

        let outcome = self.trie.insert(prefix, cost);

        #[cfg(debug_assertions)]
        contracts::check_merge_minimum(previous, cost, self.get(prefix), outcome);

        outcome
    }

    pub fn insert_entry(&mut self, entry: &RouteEntry) -> MergeOutcome {
        self.insert(&entry.prefix, entry.cost)
    }

    /// Exact-match cost for a prefix.
    pub fn get(&self, prefix: &Prefix) -> Option<Cost> {
        self.trie.get(prefix.digits().as_bytes())
    }

    /// Longest stored prefix of `query`.
    ///
    /// `Err` when the query is not a normalized number; `Ok(None)` when it is
    /// but nothing matches.
    pub fn longest_match(&self, query: &str) -> Result<Option<RouteMatch>, NumberError> {
        let digits = normalized_digits(query)?.as_bytes();
        let found = self.trie.longest_match(digits);
        contracts::check_longest_match(&self.trie, digits, found);
        Ok(found)
    }

    /// Cost of the longest matching prefix, `None` for no route.
    ///
    /// Malformed queries are no route too.
    ///
    /// ```
    /// use callroute::{Prefix, PrefixIndex};
    ///
    /// let mut index = PrefixIndex::new();
    /// index.insert(&Prefix::parse("+1").unwrap(), "0.05".parse().unwrap());
    /// index.insert(&Prefix::parse("+1415").unwrap(), "0.02".parse().unwrap());
    ///
    /// assert_eq!(index.lookup("+14155550000").unwrap().to_string(), "0.02");
    /// assert_eq!(index.lookup("+12125550000").unwrap().to_string(), "0.05");
    /// assert_eq!(index.lookup("+447911123456"), None);
    /// assert_eq!(index.lookup("not a number"), None);
    /// ```
    pub fn lookup(&self, query: &str) -> Option<Cost> {
        self.longest_match(query).ok().flatten().map(|m| m.cost)
    }

    /// Distinct prefixes stored.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            prefixes: self.trie.len(),
            nodes: self.trie.node_count(),
            approx_bytes: self.trie.approx_bytes(),
        }
    }

    /// Every `(prefix, cost)` in lexicographic prefix order.
    pub fn entries(&self) -> Entries<'_> {
        self.trie.entries()
    }

    /// Fold `other` into `self` under the merge policy.
    pub fn merge(&mut self, other: &PrefixIndex) -> MergeTally {
        let mut tally = MergeTally::default();
        for (prefix, cost) in other.entries() {
            tally.record(self.insert(&prefix, cost));
        }
        tally
    }

    /// Merge two indexes, walking the smaller one.
    pub fn merged(self, other: PrefixIndex) -> PrefixIndex {
        let (mut base, rest) = if self.len() >= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        base.merge(&rest);
        base
    }
}

impl Extend<RouteEntry> for PrefixIndex {
    fn extend<I: IntoIterator<Item = RouteEntry>>(&mut self, entries: I) {
        for entry in entries {
            self.insert_entry(&entry);
        }
    }
}

impl FromIterator<RouteEntry> for PrefixIndex {
    fn from_iter<I: IntoIterator<Item = RouteEntry>>(entries: I) -> Self {
        let mut index = PrefixIndex::new();
        index.extend(entries);
        index
    }
}
