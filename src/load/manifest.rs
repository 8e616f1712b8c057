// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Run manifests.
//!
//! A manifest names the rate sheets to load and the phone lists to price, so a
//! nightly run is one file instead of a long command line:
//!
//! ```json
//! {
//!   "version": 1,
//!   "carriers": ["route-costs-10.txt", "route-costs-106000.txt"],
//!   "numbers": ["phone-numbers-3.txt"],
//!   "output": "results",
//!   "format": "csv"
//! }
//! ```
//!
//! Relative paths resolve against the directory holding the manifest.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::with_path;
use crate::export::OutputFormat;

/// The only manifest version this build reads.
pub const MANIFEST_VERSION: u32 = 1;

fn default_output() -> PathBuf {
    PathBuf::from("results")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunManifest {
    pub version: u32,
    /// Rate sheets, merged in order.
    pub carriers: Vec<PathBuf>,
    /// Phone lists to price. Each gets an output file of the same name.
    #[serde(default)]
    pub numbers: Vec<PathBuf>,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
}

impl RunManifest {
    pub fn from_json(json: &str) -> io::Result<Self> {
        let manifest: RunManifest = serde_json::from_str(json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn from_path(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| with_path(e, path))?;
        Self::from_json(&json).map_err(|e| with_path(e, path))
    }

    fn validate(&self) -> io::Result<()> {
        if self.version != MANIFEST_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "unsupported manifest version {} (expected {})",
                    self.version, MANIFEST_VERSION
                ),
            ));
        }
        if self.carriers.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "manifest lists no carrier rate sheets",
            ));
        }
        Ok(())
    }

    /// Carrier paths resolved against `base`.
    pub fn carrier_paths(&self, base: &Path) -> Vec<PathBuf> {
        self.carriers.iter().map(|p| base.join(p)).collect()
    }

    /// `(phone list, output file)` pairs resolved against `base`.
    pub fn export_targets(&self, base: &Path) -> Vec<(PathBuf, PathBuf)> {
        let output_dir = base.join(&self.output);
        self.numbers
            .iter()
            .map(|numbers| {
                let name = numbers.file_name().unwrap_or(numbers.as_os_str());
                (base.join(numbers), output_dir.join(name))
            })
            .collect()
    }
}
