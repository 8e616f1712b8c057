// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel rate-sheet loading.
//!
//! Each file is parsed into its own index on the rayon pool. The per-file
//! indexes are then merged in file order, so the result is exactly what a
//! sequential [`load_files`](super::load_files) would build, tie literals
//! included.
//!
//! The merge tallies in the returned reports describe each file on its own,
//! not its effect on the combined index.

use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::info;

use super::{load_file, LoadReport};
use crate::index::PrefixIndex;

/// Load rate sheets concurrently and merge them.
///
/// The first I/O error wins; nothing is returned for the other files.
pub fn load_files_parallel<P>(
    paths: &[P],
    progress: Option<&ProgressBar>,
) -> io::Result<(PrefixIndex, Vec<LoadReport>)>
where
    P: AsRef<Path> + Sync,
{
    let start = Instant::now();
    let done = AtomicUsize::new(0);
    let total = paths.len();

    let loaded = paths
        .par_iter()
        .map(|path| {
            let mut index = PrefixIndex::new();
            let report = load_file(path.as_ref(), &mut index)?;

            if let Some(pb) = progress {
                let count = done.fetch_add(1, Ordering::Relaxed) + 1;
                pb.set_position(count as u64);
                pb.set_message(format!("{}/{}", count, total));
            }
            Ok((index, report))
        })
        .collect::<io::Result<Vec<_>>>()?;

    let mut parts = loaded.into_iter();
    let Some((mut index, first)) = parts.next() else {
        return Ok((PrefixIndex::new(), Vec::new()));
    };
    let mut reports = Vec::with_capacity(total);
    reports.push(first);
    for (part, report) in parts {
        index.merge(&part);
        reports.push(report);
    }

    info!(
        files = total,
        prefixes = index.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "merged rate sheets"
    );
    Ok((index, reports))
}
