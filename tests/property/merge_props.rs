//! Merge policy properties.

use callroute::{load_files, Cost, Prefix, PrefixIndex};
use proptest::prelude::*;

use crate::common::{build_both, dump, write_file};
use crate::strategies::{cost_strategy, digits_strategy, entries_strategy, query_strategy};

fn prefix(digits: &str) -> Prefix {
    Prefix::parse(&format!("+{}", digits)).unwrap()
}

fn sheet(entries: &[&(String, Cost)]) -> String {
    entries
        .iter()
        .map(|(digits, cost)| format!("+{},{}\n", digits, cost))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Each stored cost is the minimum of every cost seen for its prefix.
    #[test]
    fn prop_stored_cost_is_minimum(entries in entries_strategy()) {
        let (index, _) = build_both(&entries);
        for (digits, _) in &entries {
            let min = entries
                .iter()
                .filter(|(d, _)| d == digits)
                .map(|(_, c)| *c)
                .min()
                .unwrap();
            prop_assert_eq!(index.get(&prefix(digits)), Some(min));
        }
    }

    /// One stored entry per distinct prefix, matching the reference.
    #[test]
    fn prop_matches_reference_contents(entries in entries_strategy()) {
        let (index, reference) = build_both(&entries);
        prop_assert_eq!(index.len(), reference.len());
        prop_assert_eq!(dump(&index), reference.dump());
    }

    /// Loading the same entries twice changes nothing.
    #[test]
    fn prop_idempotent(entries in entries_strategy()) {
        let (mut index, _) = build_both(&entries);
        let before = dump(&index);
        for (digits, cost) in &entries {
            index.insert(&prefix(digits), *cost);
        }
        prop_assert_eq!(dump(&index), before);
    }

    /// Insertion order does not change which cost wins.
    #[test]
    fn prop_order_independent(entries in entries_strategy()) {
        let (forward, _) = build_both(&entries);
        let mut reversed = entries.clone();
        reversed.reverse();
        let (backward, _) = build_both(&reversed);

        let values = |index: &PrefixIndex| -> Vec<_> { index.entries().collect() };
        prop_assert_eq!(values(&forward), values(&backward));
    }

    /// Entries split across two rate sheets give the same lookups whichever
    /// sheet is loaded first.
    #[test]
    fn prop_file_order_independent(
        entries in entries_strategy(),
        split in prop::collection::vec(any::<bool>(), 1..60),
        queries in prop::collection::vec(query_strategy(), 1..20),
    ) {
        let (left, right): (Vec<_>, Vec<_>) = entries
            .iter()
            .enumerate()
            .partition(|(i, _)| split[i % split.len()]);
        let left: Vec<_> = left.into_iter().map(|(_, e)| e).collect();
        let right: Vec<_> = right.into_iter().map(|(_, e)| e).collect();

        let dir = tempfile::tempdir().unwrap();
        let a = write_file(dir.path(), "route-costs-a.txt", &sheet(&left));
        let b = write_file(dir.path(), "route-costs-b.txt", &sheet(&right));

        let mut forward = PrefixIndex::new();
        load_files(&[&a, &b], &mut forward).unwrap();
        let mut backward = PrefixIndex::new();
        load_files(&[&b, &a], &mut backward).unwrap();

        let (single, _) = build_both(&entries);
        for query in &queries {
            prop_assert_eq!(forward.lookup(query), backward.lookup(query));
            prop_assert_eq!(forward.lookup(query), single.lookup(query));
        }
    }

    /// Merging two indexes equals loading everything into one.
    #[test]
    fn prop_merge_equals_union(left in entries_strategy(), right in entries_strategy()) {
        let (mut a, _) = build_both(&left);
        let (b, _) = build_both(&right);
        a.merge(&b);

        let all: Vec<_> = left.iter().chain(right.iter()).cloned().collect();
        let (union, _) = build_both(&all);
        prop_assert_eq!(dump(&a), dump(&union));
    }

    /// A higher cost never replaces a lower one.
    #[test]
    fn prop_never_raises(digits in digits_strategy(), low in cost_strategy(), high in cost_strategy()) {
        prop_assume!(low <= high);
        let mut index = PrefixIndex::new();
        index.insert(&prefix(&digits), low);
        index.insert(&prefix(&digits), high);
        prop_assert_eq!(index.get(&prefix(&digits)), Some(low));
    }
}
