// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Manifest-driven runs: load every carrier, then price every phone list.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

use crate::export::{export_file, ExportSummary};
use crate::index::{IndexStats, PrefixIndex};
use crate::load::{LoadReport, RunManifest};

/// One priced phone list.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRecord {
    pub numbers: PathBuf,
    pub output: PathBuf,
    pub summary: ExportSummary,
}

/// What a manifest run did.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub loads: Vec<LoadReport>,
    pub stats: IndexStats,
    pub exports: Vec<ExportRecord>,
    pub elapsed: Duration,
}

/// Load the manifest's carriers into one index.
pub fn load_carriers(manifest: &RunManifest, base_dir: &Path) -> io::Result<(PrefixIndex, Vec<LoadReport>)> {
    let paths = manifest.carrier_paths(base_dir);

    #[cfg(feature = "parallel")]
    {
        crate::load::load_files_parallel(&paths, None)
    }

    #[cfg(not(feature = "parallel"))]
    {
        let mut index = PrefixIndex::new();
        let reports = crate::load::load_files(&paths, &mut index)?;
        Ok((index, reports))
    }
}

/// Execute a manifest. Relative paths resolve against `base_dir`.
pub fn run_manifest(manifest: &RunManifest, base_dir: &Path) -> io::Result<RunSummary> {
    let start = Instant::now();
    let (index, loads) = load_carriers(manifest, base_dir)?;
    let stats = index.stats();

    let mut exports = Vec::with_capacity(manifest.numbers.len());
    for (numbers, output) in manifest.export_targets(base_dir) {
        let summary = export_file(&index, &numbers, &output, manifest.format)?;
        exports.push(ExportRecord {
            numbers,
            output,
            summary,
        });
    }

    let elapsed = start.elapsed();
    info!(
        carriers = loads.len(),
        prefixes = stats.prefixes,
        exports = exports.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "manifest run complete"
    );
    Ok(RunSummary {
        loads,
        stats,
        exports,
        elapsed,
    })
}
