// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Loading carrier rate sheets and phone lists.
//!
//! Rate sheets are one `<prefix>,<cost>` record per line, no header. A bad
//! record is logged, counted and skipped; the rest of the file still loads.
//! Only real I/O failures (file missing, read error) stop a load, and those come
//! back as `io::Error` for the caller to report.
//!
//! Lines are read as bytes and decoded lossily, so a stray non-UTF-8 byte costs
//! one rejected record rather than the whole file.

pub mod manifest;
pub mod numbers;
#[cfg(feature = "parallel")]
pub mod parallel;

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cost::{Cost, CostParseError};
use crate::index::{MergeTally, PrefixIndex};
use crate::types::{NumberError, Prefix, RouteEntry};

pub use manifest::*;
pub use numbers::*;
#[cfg(feature = "parallel")]
pub use parallel::*;

/// Rejected records kept verbatim in a [`LoadReport`]; the rest are only counted.
pub const MAX_REJECT_SAMPLES: usize = 10;

const READ_BUFFER: usize = 1 << 16;

/// UTF-8 byte order mark some spreadsheet exports put at the start of a file.
pub(crate) const BOM: char = '\u{feff}';

/// Why a rate-sheet record was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Not exactly two comma-separated fields.
    FieldCount { found: usize },
    /// The prefix field is not `+digits`.
    Prefix(NumberError),
    /// The cost field is not a non-negative decimal.
    Cost(CostParseError),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::FieldCount { found } => {
                write!(f, "expected 2 fields (prefix,cost), found {}", found)
            }
            RecordError::Prefix(e) => write!(f, "invalid prefix: {}", e),
            RecordError::Cost(e) => write!(f, "invalid cost: {}", e),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::FieldCount { .. } => None,
            RecordError::Prefix(e) => Some(e),
            RecordError::Cost(e) => Some(e),
        }
    }
}

/// Parse one `<prefix>,<cost>` record.
///
/// Whitespace around the record and around each field is ignored.
///
/// ```
/// use callroute::load::parse_record;
///
/// let entry = parse_record("+1415, 0.02\r").unwrap();
/// assert_eq!(entry.to_string(), "+1415,0.02");
/// assert!(parse_record("1415,0.02").is_err());
/// assert!(parse_record("+1415,0.02,extra").is_err());
/// ```
pub fn parse_record(line: &str) -> Result<RouteEntry, RecordError> {
    let line = line.trim();
    let mut fields = line.split(',');
    let (Some(prefix), Some(cost), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(RecordError::FieldCount {
            found: line.split(',').count(),
        });
    };

    let prefix = Prefix::parse(prefix.trim()).map_err(RecordError::Prefix)?;
    let cost: Cost = cost.trim().parse().map_err(RecordError::Cost)?;
    Ok(RouteEntry::new(prefix, cost))
}

/// A record that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRecord {
    /// 1-based line number.
    pub line: usize,
    pub text: String,
    pub reason: String,
}

/// What one load did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// File name or other label for the source.
    pub source: String,
    /// Non-blank lines read.
    pub records: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Merge outcomes for accepted records.
    pub merge: MergeTally,
    /// First few rejected records.
    pub rejects: Vec<RejectedRecord>,
    pub elapsed: Duration,
}

impl LoadReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    fn reject(&mut self, line: usize, text: &str, error: &RecordError) {
        self.rejected += 1;
        if self.rejects.len() < MAX_REJECT_SAMPLES {
            self.rejects.push(RejectedRecord {
                line,
                text: text.to_string(),
                reason: error.to_string(),
            });
        }
    }

    /// Fold another report's counts into this one.
    pub fn absorb(&mut self, other: &LoadReport) {
        self.records += other.records;
        self.accepted += other.accepted;
        self.rejected += other.rejected;
        self.merge.absorb(other.merge);
        let room = MAX_REJECT_SAMPLES.saturating_sub(self.rejects.len());
        self.rejects.extend(other.rejects.iter().take(room).cloned());
        self.elapsed += other.elapsed;
    }
}

/// Stream a rate sheet into `index`.
pub fn load_reader<R: BufRead>(
    mut reader: R,
    source: &str,
    index: &mut PrefixIndex,
) -> io::Result<LoadReport> {
    let start = Instant::now();
    let mut report = LoadReport::new(source);
    let mut buf = Vec::with_capacity(64);
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = if line_no == 1 {
            line.trim_start_matches(BOM).trim()
        } else {
            line.trim()
        };
        if line.is_empty() {
            continue;
        }
        report.records += 1;

        match parse_record(line) {
            Ok(entry) => {
                report.accepted += 1;
                report.merge.record(index.insert_entry(&entry));
            }
            Err(error) => {
                warn!(source, line = line_no, record = line, %error, "rejected route record");
                report.reject(line_no, line, &error);
            }
        }
    }

    report.elapsed = start.elapsed();
    debug!(
        source,
        records = report.records,
        inserted = report.merge.inserted,
        improved = report.merge.improved,
        unchanged = report.merge.unchanged,
        "rate sheet parsed"
    );
    Ok(report)
}

/// Load one rate-sheet file into `index`.
pub fn load_file(path: &Path, index: &mut PrefixIndex) -> io::Result<LoadReport> {
    let file = File::open(path).map_err(|e| with_path(e, path))?;
    let source = source_name(path);
    let report = load_reader(BufReader::with_capacity(READ_BUFFER, file), &source, index)
        .map_err(|e| with_path(e, path))?;
    info!(
        source = %source,
        accepted = report.accepted,
        rejected = report.rejected,
        prefixes = index.len(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "loaded route costs"
    );
    Ok(report)
}

/// Load several rate sheets, one after another, into the same index.
pub fn load_files<P: AsRef<Path>>(paths: &[P], index: &mut PrefixIndex) -> io::Result<Vec<LoadReport>> {
    paths
        .iter()
        .map(|path| load_file(path.as_ref(), index))
        .collect()
}

/// Short label for log lines and reports.
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Attach the path to an I/O error message.
pub(crate) fn with_path(error: io::Error, path: &Path) -> io::Error {
    io::Error::new(error.kind(), format!("{}: {}", path.display(), error))
}
