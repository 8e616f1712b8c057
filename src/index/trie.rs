// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Digit trie: the storage behind [`PrefixIndex`](super::PrefixIndex).
//!
//! A hash map keyed by prefix answers "longest match" by probing every
//! truncation of the query, one hash per length. The trie walks the query once,
//! top-down, and remembers the deepest node that carries a cost. Same answer,
//! one pass, no hashing.
//!
//! # Layout
//!
//! ```text
//! nodes: [root, n1, n2, ...]      costs: [c0, c1, ...]
//!          │
//!          └─ children[0..10]: u32 node ids (0 = absent; the root is never a child)
//!             slot: u32 index into costs (NO_SLOT = no prefix ends here)
//! ```
//!
//! Nodes live in one `Vec` and refer to each other by `u32` id, so a node is 44
//! bytes with no per-node allocation. Costs sit in a separate dense `Vec`, which
//! makes `len()` free and keeps the node array small for interior nodes, which
//! are the majority on real rate sheets.
//!
//! | Operation      | Complexity       |
//! |----------------|------------------|
//! | Insert         | O(prefix length) |
//! | Exact get      | O(prefix length) |
//! | Longest match  | O(query length)  |
//! | Entries        | O(nodes)         |

use std::mem;

use crate::cost::Cost;
use crate::types::{MergeOutcome, Prefix, RouteMatch};

const RADIX: usize = 10;
const ROOT: u32 = 0;
const ABSENT: u32 = 0;
const NO_SLOT: u32 = u32::MAX;

#[derive(Debug, Clone)]
struct Node {
    children: [u32; RADIX],
    slot: u32,
}

impl Node {
    const EMPTY: Node = Node {
        children: [ABSENT; RADIX],
        slot: NO_SLOT,
    };

    #[inline]
    fn slot(&self) -> Option<usize> {
        (self.slot != NO_SLOT).then_some(self.slot as usize)
    }
}

/// Map a byte to its digit value, `None` for anything but `0`-`9`.
#[inline]
fn digit(byte: u8) -> Option<usize> {
    byte.is_ascii_digit().then(|| usize::from(byte - b'0'))
}

/// Arena-backed trie over decimal digits.
#[derive(Debug, Clone)]
pub struct DigitTrie {
    nodes: Vec<Node>,
    costs: Vec<Cost>,
}

impl Default for DigitTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitTrie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::EMPTY],
            costs: Vec::new(),
        }
    }

    /// Pre-size for roughly `prefixes` entries.
    ///
    /// Real rate sheets share most of their digits, so nodes are reserved at
    /// twice the entry count rather than entries times average length.
    pub fn with_capacity(prefixes: usize) -> Self {
        let mut nodes = Vec::with_capacity(prefixes.saturating_mul(2).max(1));
        nodes.push(Node::EMPTY);
        Self {
            nodes,
            costs: Vec::with_capacity(prefixes),
        }
    }

    /// Number of stored prefixes.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Heap bytes held by the node and cost arrays.
    pub fn approx_bytes(&self) -> usize {
        self.nodes.capacity() * mem::size_of::<Node>()
            + self.costs.capacity() * mem::size_of::<Cost>()
    }

    /// Insert under the merge policy: keep the lower cost.
    pub fn insert(&mut self, prefix: &Prefix, cost: Cost) -> MergeOutcome {
        let mut node = ROOT as usize;
        for &byte in prefix.digits().as_bytes() {
            // Unreachable: Prefix guarantees ASCII digits.
            let Some(d) = digit(byte) else {
                return MergeOutcome::Unchanged;
            };
            let child = self.nodes[node].children[d];
            node = if child == ABSENT {
                let id = self.nodes.len() as u32;
                self.nodes.push(Node::EMPTY);
                self.nodes[node].children[d] = id;
                id as usize
            } else {
                child as usize
            };
        }

        match self.nodes[node].slot() {
            None => {
                self.nodes[node].slot = self.costs.len() as u32;
                self.costs.push(cost);
                MergeOutcome::Inserted
            }
            Some(slot) if cost < self.costs[slot] => {
                let previous = mem::replace(&mut self.costs[slot], cost);
                MergeOutcome::Improved { previous }
            }
            Some(_) => MergeOutcome::Unchanged,
        }
    }

    /// Node reached by following `digits` exactly, if any.
    fn descend(&self, digits: &[u8]) -> Option<usize> {
        let mut node = ROOT as usize;
        for &byte in digits {
            let child = self.nodes[node].children[digit(byte)?];
            if child == ABSENT {
                return None;
            }
            node = child as usize;
        }
        Some(node)
    }

    /// Exact-match lookup of a digit string.
    pub fn get(&self, digits: &[u8]) -> Option<Cost> {
        if digits.is_empty() {
            return None;
        }
        let node = self.descend(digits)?;
        self.nodes[node].slot().map(|slot| self.costs[slot])
    }

    /// Deepest stored prefix of `digits`.
    ///
    /// Stops at the first non-digit byte, so callers that validate first get a
    /// full walk and callers that don't still get a sensible answer.
    pub fn longest_match(&self, digits: &[u8]) -> Option<RouteMatch> {
        let mut node = ROOT as usize;
        let mut best = None;
        for (depth, &byte) in digits.iter().enumerate() {
            let Some(d) = digit(byte) else { break };
            let child = self.nodes[node].children[d];
            if child == ABSENT {
                break;
            }
            node = child as usize;
            if let Some(slot) = self.nodes[node].slot() {
                best = Some(RouteMatch {
                    prefix_len: depth + 1,
                    cost: self.costs[slot],
                });
            }
        }
        best
    }

    /// All stored `(prefix, cost)` pairs in lexicographic prefix order.
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            trie: self,
            stack: vec![(ROOT, 0)],
            path: Vec::new(),
        }
    }
}

/// Pre-order walk over a [`DigitTrie`], children visited `0` through `9`.
pub struct Entries<'a> {
    trie: &'a DigitTrie,
    /// (node id, next child digit to visit)
    stack: Vec<(u32, u8)>,
    /// Digits from the root to the top-of-stack node.
    path: Vec<u8>,
}

impl Iterator for Entries<'_> {
    type Item = (Prefix, Cost);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.last_mut() {
            let node = &self.trie.nodes[frame.0 as usize];
            let mut next_child = None;
            while usize::from(frame.1) < RADIX {
                let d = frame.1;
                frame.1 += 1;
                let child = node.children[usize::from(d)];
                if child != ABSENT {
                    next_child = Some((d, child));
                    break;
                }
            }

            match next_child {
                Some((d, child)) => {
                    self.path.push(b'0' + d);
                    self.stack.push((child, 0));
                    if let Some(slot) = self.trie.nodes[child as usize].slot() {
                        return Some((Prefix::from_digit_bytes(&self.path), self.trie.costs[slot]));
                    }
                }
                None => {
                    self.stack.pop();
                    self.path.pop();
                }
            }
        }
        None
    }
}
