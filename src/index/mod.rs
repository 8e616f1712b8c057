// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction: where carrier rate sheets become one lookup structure.
//!
//! - **Trie**: digit-keyed arena, one walk per longest-prefix lookup
//! - **PrefixIndex**: the trie plus the merge policy and query validation
//! - **SharedIndex**: the same index behind a reader-writer lock

mod prefix_index;
#[cfg(feature = "parallel")]
mod shared;
mod trie;

pub use prefix_index::*;
#[cfg(feature = "parallel")]
pub use shared::*;
pub use trie::{DigitTrie, Entries};
