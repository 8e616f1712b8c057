//! Longest-prefix resolution properties.

use callroute::{normalized_digits, resolve_all, Resolution};
use proptest::prelude::*;

use crate::common::build_both;
use crate::strategies::{entries_strategy, query_strategy};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// The trie agrees with a brute-force longest-prefix search.
    #[test]
    fn prop_lookup_matches_reference(entries in entries_strategy(), query in query_strategy()) {
        let (index, reference) = build_both(&entries);
        let expected = normalized_digits(&query).ok().and_then(|d| reference.lookup(d));
        prop_assert_eq!(index.lookup(&query), expected);
    }

    /// The reported match is a prefix of the query and is stored.
    #[test]
    fn prop_match_is_stored_prefix(entries in entries_strategy(), query in query_strategy()) {
        let (index, _) = build_both(&entries);
        if let Ok(Some(found)) = index.longest_match(&query) {
            let matched = found.prefix_of(&query);
            prop_assert!(query.starts_with(matched));
            let prefix = callroute::Prefix::parse(matched).unwrap();
            prop_assert_eq!(index.get(&prefix), Some(found.cost));
        }
    }

    /// No stored prefix longer than the match also matches.
    #[test]
    fn prop_no_longer_match_exists(entries in entries_strategy(), query in query_strategy()) {
        let (index, _) = build_both(&entries);
        if let Ok(digits) = normalized_digits(&query) {
            let best = index.longest_match(&query).unwrap().map_or(0, |m| m.prefix_len);
            for (prefix, _) in index.entries() {
                if digits.starts_with(prefix.digits()) {
                    prop_assert!(prefix.len() <= best);
                }
            }
        }
    }

    /// A batch yields one result per input, in input order, each equal to a
    /// single lookup.
    #[test]
    fn prop_batch_preserves_order(
        entries in entries_strategy(),
        queries in prop::collection::vec(query_strategy(), 0..40),
    ) {
        let (index, _) = build_both(&entries);
        let results: Vec<_> = resolve_all(&index, &queries).collect();
        prop_assert_eq!(results.len(), queries.len());
        for (result, query) in results.iter().zip(&queries) {
            prop_assert_eq!(&result.number, query);
            prop_assert_eq!(result.cost(), index.lookup(query));
            if normalized_digits(query).is_err() {
                prop_assert!(matches!(result.resolution, Resolution::Malformed(_)), "expected malformed");
            }
        }
    }
}
