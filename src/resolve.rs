// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Resolving numbers against the index, one at a time or in batches.
//!
//! A batch is just a lazy `map` over the input: one result per number, in input
//! order, produced as the caller pulls. Nothing is buffered, so a 50k-line phone
//! list streams to the writer in constant memory. A malformed number becomes a
//! `Malformed` result in its slot; it never ends the batch.
//!
//! ```text
//! numbers ──▶ ResolveAll ──▶ LookupResult ──▶ writer / terminal
//!                 │
//!                 └── PrefixIndex::longest_match (one trie walk each)
//! ```

use std::iter::FusedIterator;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::index::PrefixIndex;
use crate::types::{LookupResult, Resolution};

/// Resolve one number.
pub fn resolve(index: &PrefixIndex, number: &str) -> LookupResult {
    let resolution = match index.longest_match(number) {
        Ok(Some(found)) => Resolution::Route(found.cost),
        Ok(None) => Resolution::NoRoute,
        Err(reason) => Resolution::Malformed(reason),
    };
    LookupResult {
        number: number.to_string(),
        resolution,
    }
}

/// Lazily resolve a sequence of numbers, preserving order.
///
/// ```
/// use callroute::{resolve_all, Prefix, PrefixIndex};
///
/// let mut index = PrefixIndex::new();
/// index.insert(&Prefix::parse("+1512").unwrap(), "0.04".parse().unwrap());
///
/// let lines: Vec<String> = resolve_all(&index, ["+15124156620", "+19876543210"])
///     .map(|r| r.to_string())
///     .collect();
/// assert_eq!(lines, ["+15124156620,0.04", "+19876543210,0"]);
/// ```
pub fn resolve_all<I>(index: &PrefixIndex, numbers: I) -> ResolveAll<'_, I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    ResolveAll {
        index,
        numbers: numbers.into_iter(),
    }
}

/// Iterator returned by [`resolve_all`].
#[derive(Debug, Clone)]
pub struct ResolveAll<'a, I> {
    index: &'a PrefixIndex,
    numbers: I,
}

impl<I> Iterator for ResolveAll<'_, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = LookupResult;

    fn next(&mut self) -> Option<LookupResult> {
        let number = self.numbers.next()?;
        Some(resolve(self.index, number.as_ref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.numbers.size_hint()
    }
}

impl<I> ExactSizeIterator for ResolveAll<'_, I>
where
    I: ExactSizeIterator,
    I::Item: AsRef<str>,
{
}

impl<I> FusedIterator for ResolveAll<'_, I>
where
    I: FusedIterator,
    I::Item: AsRef<str>,
{
}

/// Resolve an in-memory list on the rayon pool. Output order matches input.
#[cfg(feature = "parallel")]
pub fn resolve_par<S>(index: &PrefixIndex, numbers: &[S]) -> Vec<LookupResult>
where
    S: AsRef<str> + Sync,
{
    numbers
        .par_iter()
        .map(|number| resolve(index, number.as_ref()))
        .collect()
}

impl PrefixIndex {
    /// Resolve one number. See [`resolve`].
    pub fn resolve(&self, number: &str) -> LookupResult {
        resolve(self, number)
    }

    /// Lazily resolve many numbers. See [`resolve_all`].
    pub fn resolve_all<I>(&self, numbers: I) -> ResolveAll<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        resolve_all(self, numbers)
    }
}
