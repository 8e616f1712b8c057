//! Prefix index behaviour at the edges.

use callroute::{MergeOutcome, PrefixIndex, Resolution};

use crate::common::{cost, dump, entry, index_from_pairs};

#[test]
fn test_empty_index_routes_nothing() {
    let index = PrefixIndex::new();
    assert!(index.is_empty());
    assert_eq!(index.lookup("+14155550000"), None);
    assert_eq!(index.resolve("+14155550000").resolution, Resolution::NoRoute);
    assert_eq!(index.entries().count(), 0);
}

#[test]
fn test_merge_outcomes() {
    let mut index = PrefixIndex::new();
    let e = entry("+1415", "0.05");
    assert_eq!(index.insert_entry(&e), MergeOutcome::Inserted);
    assert_eq!(
        index.insert_entry(&entry("+1415", "0.02")),
        MergeOutcome::Improved { previous: cost("0.05") }
    );
    assert_eq!(index.insert_entry(&entry("+1415", "0.09")), MergeOutcome::Unchanged);
    assert_eq!(index.insert_entry(&entry("+1415", "0.020")), MergeOutcome::Unchanged);
    assert_eq!(index.len(), 1);
    assert_eq!(dump(&index), ["+1415,0.02"]);
}

#[test]
fn test_longest_prefix_beats_cheaper_shorter() {
    let index = index_from_pairs(&[("+1", "0.01"), ("+1415", "0.09")]);
    assert_eq!(index.lookup("+14155550000"), Some(cost("0.09")));
    assert_eq!(index.lookup("+12125550000"), Some(cost("0.01")));
}

#[test]
fn test_query_equal_to_prefix() {
    let index = index_from_pairs(&[("+1415", "0.02")]);
    assert_eq!(index.lookup("+1415"), Some(cost("0.02")));
    assert_eq!(index.lookup("+141"), None);
}

#[test]
fn test_longest_match_reports_length() {
    let index = index_from_pairs(&[("+44", "0.10"), ("+4420", "0.07")]);
    let query = "+442071234567";
    let found = index.longest_match(query).unwrap().unwrap();
    assert_eq!(found.prefix_len, 4);
    assert_eq!(found.prefix_of(query), "+4420");
    assert!(index.longest_match("4420").is_err());
    assert_eq!(index.longest_match("+33").unwrap(), None);
}

#[test]
fn test_zero_cost_is_a_route() {
    let index = index_from_pairs(&[("+1800", "0")]);
    let result = index.resolve("+18005550000");
    assert_eq!(result.resolution, Resolution::Route(cost("0")));
    assert_eq!(result.to_string(), "+18005550000,0");
}

#[test]
fn test_entries_are_lexicographic() {
    let index = index_from_pairs(&[("+2", "0.2"), ("+12", "0.12"), ("+1", "0.1"), ("+10", "0.10")]);
    assert_eq!(dump(&index), ["+1,0.1", "+10,0.10", "+12,0.12", "+2,0.2"]);
}

#[test]
fn test_merge_whole_index() {
    let mut a = index_from_pairs(&[("+1", "0.05"), ("+44", "0.10")]);
    let b = index_from_pairs(&[("+1", "0.04"), ("+44", "0.12"), ("+33", "0.08")]);
    let tally = a.merge(&b);
    assert_eq!(tally.inserted, 1);
    assert_eq!(tally.improved, 1);
    assert_eq!(tally.unchanged, 1);
    assert_eq!(tally.total(), 3);
    assert_eq!(dump(&a), ["+1,0.04", "+33,0.08", "+44,0.10"]);
}

#[test]
fn test_merged_is_symmetric() {
    let a = index_from_pairs(&[("+1", "0.05"), ("+44", "0.10"), ("+4420", "0.07")]);
    let b = index_from_pairs(&[("+1", "0.04")]);
    let ab = a.clone().merged(b.clone());
    let ba = b.merged(a);
    assert_eq!(dump(&ab), dump(&ba));
}

#[test]
fn test_stats() {
    let index = index_from_pairs(&[("+1415", "0.02"), ("+1416", "0.03")]);
    let stats = index.stats();
    assert_eq!(stats.prefixes, 2);
    // root, 1, 4, 1, then 5 and 6
    assert_eq!(stats.nodes, 6);
    assert!(stats.approx_bytes > 0);
}
