// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Interactive menu.
//!
//! ```text
//! 1.) Load a route-cost file        files in the data dir named *route*
//! 2.) Look up the cost of a number
//! 3.) Print costs for a phone list  files in the data dir named *phone*
//! 4.) Write costs for a phone list  <results dir>/<same file name>
//! 5.) Exit
//! ```
//!
//! Loads accumulate: every file chosen under (1) is merged into the same
//! index. A bad selection or a failed load prints a message and returns to the
//! menu. Only a failure to write to the terminal ends the session, as does
//! end of input.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use callroute::export::{export_file, OutputFormat};
use callroute::load::{load_file, open_numbers};
use callroute::PrefixIndex;
use tracing::info;

use super::display::{
    format_size, resolution_label, themed, timing_ms, BOLD, CYAN, GRAY, GREEN, MAGENTA, RED,
    UNDERLINE, YELLOW,
};

pub struct Shell<R, W> {
    input: R,
    out: W,
    data_dir: PathBuf,
    results_dir: PathBuf,
    index: PrefixIndex,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, out: W, data_dir: PathBuf, results_dir: PathBuf) -> Self {
        Self {
            input,
            out,
            data_dir,
            results_dir,
            index: PrefixIndex::new(),
        }
    }

    pub fn index(&self) -> &PrefixIndex {
        &self.index
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.menu()?;
            let Some(choice) = self.prompt()? else {
                return Ok(());
            };
            let outcome = match choice.as_str() {
                "1" => self.load_routes(),
                "2" => self.lookup_one(),
                "3" => self.price_list(false),
                "4" => self.price_list(true),
                "5" | "q" | "exit" => return Ok(()),
                _ => {
                    writeln!(self.out, "\n{}", themed(MAGENTA, &[], "Invalid input!"))?;
                    Ok(())
                }
            };
            if let Err(e) = outcome {
                writeln!(self.out, "\n{}", themed(RED, &[], &e.to_string()))?;
            }
        }
    }

    fn menu(&mut self) -> io::Result<()> {
        let stats = self.index.stats();
        writeln!(self.out, "\n{}", themed(CYAN, &[UNDERLINE], "Welcome to callroute!"))?;
        writeln!(
            self.out,
            "\n{}\n",
            themed(
                CYAN,
                &[],
                &format!(
                    "{} route costs currently loaded in memory ({}).",
                    stats.prefixes,
                    format_size(stats.approx_bytes)
                )
            )
        )?;
        for item in [
            "1.) Load file into memory",
            "2.) Look up cost for a number",
            "3.) Look up costs for all numbers in a file",
            "4.) Write costs for all numbers in a file to a file",
        ] {
            writeln!(self.out, "{}", themed(GREEN, &[], item))?;
        }
        writeln!(self.out, "{}\n", themed(RED, &[], "5.) Exit"))?;
        writeln!(self.out, "Please make a selection:")
    }

    /// Read one trimmed line. `None` at end of input.
    fn prompt(&mut self) -> io::Result<Option<String>> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// List data files whose name contains `filter` and let the user pick one.
    fn choose_file(&mut self, filter: &str) -> io::Result<Option<PathBuf>> {
        let files = matching_files(&self.data_dir, filter)?;

        writeln!(self.out, "\n{}\n", themed(CYAN, &[UNDERLINE], "Load a file:"))?;
        for (i, name) in files.iter().enumerate() {
            writeln!(self.out, "{}.) {}", i + 1, themed(MAGENTA, &[], name))?;
        }
        writeln!(self.out, "{}\n", themed(YELLOW, &[], "q.) Main menu"))?;
        writeln!(self.out, "Please make a selection:")?;

        let Some(choice) = self.prompt()? else {
            return Ok(None);
        };
        if choice == "q" {
            return Ok(None);
        }
        match choice.parse::<usize>() {
            Ok(n) if (1..=files.len()).contains(&n) => Ok(Some(self.data_dir.join(&files[n - 1]))),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid selection '{}'", choice),
            )),
        }
    }

    fn load_routes(&mut self) -> io::Result<()> {
        let Some(path) = self.choose_file("route")? else {
            return Ok(());
        };
        let start = Instant::now();
        let report = load_file(&path, &mut self.index)?;

        writeln!(
            self.out,
            "\nLoaded {} records from {} ({} rejected, {} improved).",
            report.accepted, report.source, report.rejected, report.merge.improved
        )?;
        self.completed(start)
    }

    fn lookup_one(&mut self) -> io::Result<()> {
        writeln!(self.out, "\n{}", themed(CYAN, &[], "Enter a number with the prefix:"))?;
        let Some(number) = self.prompt()? else {
            return Ok(());
        };
        let result = self.index.resolve(&number);
        writeln!(
            self.out,
            "\n{} {} : {}",
            themed(MAGENTA, &[], "Cost:"),
            themed(GREEN, &[BOLD], &result.number),
            resolution_label(&result.resolution)
        )
    }

    fn price_list(&mut self, persist: bool) -> io::Result<()> {
        let Some(path) = self.choose_file("phone")? else {
            return Ok(());
        };
        let start = Instant::now();

        if persist {
            let name = path.file_name().unwrap_or(path.as_os_str());
            let output = self.results_dir.join(name);
            let summary = export_file(&self.index, &path, &output, OutputFormat::Csv)?;
            writeln!(
                self.out,
                "\n{}",
                themed(
                    MAGENTA,
                    &[],
                    &format!(
                        "Result file {} created! ({} numbers, {} without a route)",
                        output.display(),
                        summary.total,
                        summary.no_route + summary.malformed
                    )
                )
            )?;
        } else {
            for number in open_numbers(&path)? {
                let result = self.index.resolve(&number?);
                writeln!(
                    self.out,
                    "{} : {}",
                    themed(GRAY, &[], &result.number),
                    resolution_label(&result.resolution)
                )?;
            }
        }
        self.completed(start)
    }

    fn completed(&mut self, start: Instant) -> io::Result<()> {
        let elapsed = start.elapsed();
        info!(elapsed_ms = elapsed.as_millis() as u64, "shell action finished");
        writeln!(
            self.out,
            "\n{}",
            themed(YELLOW, &[], &format!("Completed in {}.", timing_ms(elapsed)))
        )
    }
}

/// Sorted names of regular files in `dir` containing `filter`.
fn matching_files(dir: &Path, filter: &str) -> io::Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", dir.display(), e)))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.contains(filter) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}
