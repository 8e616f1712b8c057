//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use callroute::PrefixIndex;

// Re-export canonical test utilities from callroute::testing
pub use callroute::testing::{
    cost, dump, entry, index_from_pairs, SCENARIO_EXPORT, SCENARIO_NUMBERS, SCENARIO_ROUTES,
};

// ============================================================================
// FILE FIXTURES
// ============================================================================

/// Write `contents` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write fixture");
    path
}

/// A temp directory holding the reference scenario files.
pub fn scenario_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write_file(dir.path(), "route-costs-4.txt", SCENARIO_ROUTES);
    write_file(dir.path(), "phone-numbers-3.txt", SCENARIO_NUMBERS);
    dir
}

// ============================================================================
// REFERENCE MODEL
// ============================================================================

/// Flat `(digits, cost)` list with the same min-merge rule, searched by brute
/// force. Slow and obviously right.
#[derive(Debug, Default)]
pub struct ReferenceTable {
    entries: Vec<(String, callroute::Cost)>,
}

impl ReferenceTable {
    pub fn insert(&mut self, digits: &str, cost: callroute::Cost) {
        match self.entries.iter_mut().find(|(d, _)| d == digits) {
            Some((_, existing)) => {
                if cost < *existing {
                    *existing = cost;
                }
            }
            None => self.entries.push((digits.to_string(), cost)),
        }
    }

    /// Cost of the longest stored prefix of `digits`.
    pub fn lookup(&self, digits: &str) -> Option<callroute::Cost> {
        self.entries
            .iter()
            .filter(|(d, _)| digits.starts_with(d.as_str()))
            .max_by_key(|(d, _)| d.len())
            .map(|(_, c)| *c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sorted `+digits,cost` lines, comparable with [`dump`].
    pub fn dump(&self) -> Vec<String> {
        let mut lines: Vec<(String, String)> = self
            .entries
            .iter()
            .map(|(d, c)| (d.clone(), format!("+{},{}", d, c)))
            .collect();
        lines.sort();
        lines.into_iter().map(|(_, line)| line).collect()
    }
}

/// Build both an index and a reference table from the same entries.
pub fn build_both(entries: &[(String, callroute::Cost)]) -> (PrefixIndex, ReferenceTable) {
    let mut index = PrefixIndex::new();
    let mut reference = ReferenceTable::default();
    for (digits, cost) in entries {
        let prefix = callroute::Prefix::parse(&format!("+{}", digits)).expect("valid prefix");
        index.insert(&prefix, *cost);
        reference.insert(digits, *cost);
    }
    (index, reference)
}
