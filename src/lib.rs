// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Least-cost call routing: carrier rate sheets in, per-number costs out.
//!
//! Carriers publish `<prefix>,<cost>` rate sheets. Loading several sheets into
//! one [`PrefixIndex`] keeps the cheapest cost seen for each prefix. A phone
//! number then costs whatever its longest matching prefix costs, or nothing if
//! no prefix matches.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │  load/       │────▶│  index/          │────▶│  resolve.rs  │
//! │ (rate sheets,│     │ (DigitTrie,      │     │ (resolve,    │
//! │  manifests)  │     │  min-merge)      │     │  ResolveAll) │
//! └──────────────┘     └──────────────────┘     └──────────────┘
//!                              │                        │
//!                              ▼                        ▼
//!                      ┌──────────────┐         ┌──────────────┐
//!                      │ contracts.rs │         │  export.rs   │
//!                      │ (debug-only  │         │ (CSV / JSON  │
//!                      │  invariants) │         │  lines)      │
//!                      └──────────────┘         └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use callroute::{Prefix, PrefixIndex};
//!
//! let mut index = PrefixIndex::new();
//! index.insert(&Prefix::parse("+1415").unwrap(), "0.02".parse().unwrap());
//! index.insert(&Prefix::parse("+1415234").unwrap(), "0.03".parse().unwrap());
//! index.insert(&Prefix::parse("+1415").unwrap(), "0.05".parse().unwrap());
//!
//! // The longest prefix wins, even when a shorter one is cheaper.
//! assert_eq!(index.lookup("+14152345678").unwrap().to_string(), "0.03");
//! // The cheaper duplicate was kept.
//! assert_eq!(index.lookup("+14159999999").unwrap().to_string(), "0.02");
//! assert_eq!(index.lookup("+19876543210"), None);
//! ```

pub mod contracts;
pub mod cost;
pub mod export;
pub mod index;
pub mod load;
pub mod pipeline;
mod resolve;
pub mod telemetry;
pub mod testing;
mod types;

pub use cost::{Cost, CostParseError, MAX_SCALE};
pub use export::{export, export_file, ExportSummary, OutputFormat, ResultWriter};
#[cfg(feature = "parallel")]
pub use index::SharedIndex;
pub use index::{DigitTrie, Entries, IndexStats, MergeTally, PrefixIndex};
pub use load::{load_file, load_files, load_reader, parse_record, LoadReport, RecordError};
#[cfg(feature = "parallel")]
pub use resolve::resolve_par;
pub use resolve::{resolve, resolve_all, ResolveAll};
pub use types::{
    normalized_digits, LookupResult, MergeOutcome, NumberError, Prefix, Resolution, RouteEntry,
    RouteMatch, MARKER, NO_ROUTE,
};
