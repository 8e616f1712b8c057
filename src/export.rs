// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Writing resolved costs.
//!
//! CSV is the contract: `<number>,<cost>` per line, `0` when there is no route,
//! input order preserved. JSON lines exist for tooling that needs to tell a
//! missing route from a zero-cost one:
//!
//! ```text
//! {"number":"+14152345678","cost":"0.03","status":"route"}
//! {"number":"+19876543210","cost":null,"status":"no_route"}
//! ```
//!
//! Everything streams: one number is read, resolved and written before the
//! next is read.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cost::Cost;
use crate::index::PrefixIndex;
use crate::load::{open_numbers, source_name, with_path};
use crate::resolve::resolve_all;
use crate::types::{LookupResult, Resolution};

/// Export encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<number>,<cost>`
    #[default]
    Csv,
    /// One JSON object per line.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" | "jsonl" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected csv or json)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
struct JsonRow<'a> {
    number: &'a str,
    cost: Option<Cost>,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Buffered writer for lookup results.
pub struct ResultWriter<W: Write> {
    out: BufWriter<W>,
    format: OutputFormat,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(inner: W, format: OutputFormat) -> Self {
        Self {
            out: BufWriter::new(inner),
            format,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn write(&mut self, result: &LookupResult) -> io::Result<()> {
        match self.format {
            OutputFormat::Csv => writeln!(self.out, "{}", result),
            OutputFormat::Json => {
                let reason = match &result.resolution {
                    Resolution::Malformed(e) => Some(e.to_string()),
                    _ => None,
                };
                let row = JsonRow {
                    number: &result.number,
                    cost: result.cost(),
                    status: result.resolution.status(),
                    reason,
                };
                serde_json::to_writer(&mut self.out, &row)?;
                self.out.write_all(b"\n")
            }
        }
    }

    /// Flush and hand back the inner writer.
    pub fn finish(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }
}

/// Per-status counts for one export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub total: usize,
    pub routed: usize,
    pub no_route: usize,
    pub malformed: usize,
    pub elapsed: Duration,
}

impl ExportSummary {
    pub fn record(&mut self, result: &LookupResult) {
        self.total += 1;
        match result.resolution {
            Resolution::Route(_) => self.routed += 1,
            Resolution::NoRoute => self.no_route += 1,
            Resolution::Malformed(_) => self.malformed += 1,
        }
    }
}

/// Resolve every number and write the results, in order.
///
/// A read error stops the export after everything before it has been written.
pub fn export<I, W>(
    index: &PrefixIndex,
    numbers: I,
    writer: &mut ResultWriter<W>,
) -> io::Result<ExportSummary>
where
    I: IntoIterator<Item = io::Result<String>>,
    W: Write,
{
    let start = Instant::now();
    let mut summary = ExportSummary::default();
    let mut read_error = None;

    let numbers = numbers.into_iter().map_while(|line| match line {
        Ok(number) => Some(number),
        Err(e) => {
            read_error = Some(e);
            None
        }
    });

    for result in resolve_all(index, numbers) {
        summary.record(&result);
        writer.write(&result)?;
    }

    if let Some(e) = read_error {
        return Err(e);
    }
    summary.elapsed = start.elapsed();
    Ok(summary)
}

/// Export a phone list file to `output`, creating parent directories.
pub fn export_file(
    index: &PrefixIndex,
    numbers_path: &Path,
    output: &Path,
    format: OutputFormat,
) -> io::Result<ExportSummary> {
    let numbers = open_numbers(numbers_path)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| with_path(e, parent))?;
    }
    if is_same_file(numbers_path, output)? {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "{}: export would overwrite its own phone list",
                output.display()
            ),
        ));
    }
    let file = File::create(output).map_err(|e| with_path(e, output))?;

    let mut writer = ResultWriter::new(file, format);
    let summary = export(index, numbers, &mut writer).map_err(|e| with_path(e, numbers_path))?;
    writer
        .finish()?
        .sync_all()
        .map_err(|e| with_path(e, output))?;

    info!(
        numbers = %source_name(numbers_path),
        output = %output.display(),
        total = summary.total,
        routed = summary.routed,
        no_route = summary.no_route,
        malformed = summary.malformed,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "exported route costs"
    );
    Ok(summary)
}

/// True when `output` already exists and resolves to the same file as `input`.
fn is_same_file(input: &Path, output: &Path) -> io::Result<bool> {
    let Ok(output) = fs::canonicalize(output) else {
        return Ok(false);
    };
    let input = fs::canonicalize(input).map_err(|e| with_path(e, input))?;
    Ok(input == output)
}
