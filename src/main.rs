// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use callroute::export::{export, export_file, ResultWriter};
use callroute::load::{open_numbers, LoadReport, RunManifest};
use callroute::pipeline::{run_manifest, RunSummary};
use callroute::telemetry::{init_tracing, TracingConfig};
use callroute::{IndexStats, PrefixIndex};

mod cli;
use cli::display::{field, format_size, row, section_bot, section_top, themed, timing_ms, RED, YELLOW};
use cli::shell::Shell;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let tracing = TracingConfig {
        log_level: cli.log_level.clone(),
        json_logs: cli.json_logs,
    };
    if let Err(e) = init_tracing(&tracing) {
        eprintln!("❌ {:#}", e);
        std::process::exit(2);
    }

    if let Err(e) = run(cli.command) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Lookup {
            routes,
            numbers,
            format,
        } => {
            let (index, _) = load_routes(&routes)?;
            let stdout = io::stdout();
            let mut writer = ResultWriter::new(stdout.lock(), format);
            for result in index.resolve_all(&numbers) {
                writer.write(&result)?;
            }
            writer.finish()?.flush()?;
        }

        Commands::Resolve {
            routes,
            numbers,
            output,
            format,
        } => {
            let (index, _) = load_routes(&routes)?;
            match output {
                Some(output) => {
                    export_file(&index, &numbers, &output, format)
                        .with_context(|| format!("exporting to {}", output.display()))?;
                }
                None => {
                    let lines = open_numbers(&numbers)?;
                    let stdout = io::stdout();
                    let mut writer = ResultWriter::new(stdout.lock(), format);
                    export(&index, lines, &mut writer)?;
                    writer.finish()?.flush()?;
                }
            }
        }

        Commands::Run { manifest, json } => {
            let parsed = RunManifest::from_path(&manifest)?;
            let base = manifest_dir(&manifest);
            let summary = run_manifest(&parsed, &base)
                .with_context(|| format!("running {}", manifest.display()))?;
            if json {
                print_json(&summary)?;
            } else {
                print_loads(&summary.loads);
                print_stats(&summary.stats);
                print_exports(&summary);
            }
        }

        Commands::Inspect { routes, json } => {
            let (index, reports) = load_routes(&routes)?;
            let stats = index.stats();
            if json {
                print_json(&serde_json::json!({ "loads": reports, "stats": stats }))?;
            } else {
                print_loads(&reports);
                print_stats(&stats);
            }
        }

        Commands::Shell {
            data_dir,
            results_dir,
        } => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut shell = Shell::new(stdin.lock(), stdout.lock(), data_dir, results_dir);
            shell.run()?;
            info!(prefixes = shell.index().len(), "shell closed");
        }
    }
    Ok(())
}

/// Load and min-merge every rate sheet.
#[cfg(feature = "parallel")]
fn load_routes(paths: &[PathBuf]) -> Result<(PrefixIndex, Vec<LoadReport>)> {
    use indicatif::{ProgressBar, ProgressStyle};

    let progress = (paths.len() > 1 && atty::is(atty::Stream::Stderr)).then(|| {
        let pb = ProgressBar::new(paths.len() as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
        )
        .map(|style| style.progress_chars("━━╸"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb.set_prefix("Loading");
        pb
    });

    let loaded = callroute::load::load_files_parallel(paths, progress.as_ref())
        .context("loading rate sheets")?;
    if let Some(pb) = progress {
        pb.finish_with_message(format!("{} prefixes", loaded.0.len()));
    }
    Ok(loaded)
}

#[cfg(not(feature = "parallel"))]
fn load_routes(paths: &[PathBuf]) -> Result<(PrefixIndex, Vec<LoadReport>)> {
    let mut index = PrefixIndex::new();
    let reports = callroute::load::load_files(paths, &mut index).context("loading rate sheets")?;
    Ok((index, reports))
}

fn manifest_dir(manifest: &Path) -> PathBuf {
    match manifest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn print_loads(reports: &[LoadReport]) {
    println!("{}", section_top("RATE SHEETS"));
    for report in reports {
        println!("{}", row(&themed(YELLOW, &[], &report.source)));
        println!("{}", field("  accepted", &report.accepted.to_string()));
        let rejected = report.rejected.to_string();
        if report.rejected > 0 {
            println!("{}", field("  rejected", &themed(RED, &[], &rejected)));
        } else {
            println!("{}", field("  rejected", &rejected));
        }
        println!(
            "{}",
            field(
                "  merged",
                &format!(
                    "{} new, {} cheaper, {} kept",
                    report.merge.inserted, report.merge.improved, report.merge.unchanged
                )
            )
        );
        println!("{}", field("  elapsed", &timing_ms(report.elapsed)));
        for reject in &report.rejects {
            println!(
                "{}",
                row(&themed(RED, &[], &format!("  line {}: {}", reject.line, reject.reason)))
            );
        }
    }
    println!("{}", section_bot());
}

fn print_stats(stats: &IndexStats) {
    println!("{}", section_top("INDEX"));
    println!("{}", field("prefixes", &stats.prefixes.to_string()));
    println!("{}", field("trie nodes", &stats.nodes.to_string()));
    println!("{}", field("memory", &format_size(stats.approx_bytes)));
    println!("{}", section_bot());
}

fn print_exports(summary: &RunSummary) {
    println!("{}", section_top("EXPORTS"));
    for record in &summary.exports {
        println!("{}", row(&themed(YELLOW, &[], &record.output.display().to_string())));
        println!(
            "{}",
            field(
                "  numbers",
                &format!(
                    "{} ({} routed, {} no route, {} malformed)",
                    record.summary.total,
                    record.summary.routed,
                    record.summary.no_route,
                    record.summary.malformed
                )
            )
        );
        println!("{}", field("  elapsed", &timing_ms(record.summary.elapsed)));
    }
    println!("{}", field("total", &timing_ms(summary.elapsed)));
    println!("{}", section_bot());
}
