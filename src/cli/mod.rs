// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the callroute command-line interface.
//!
//! `lookup` and `resolve` price numbers against one or more rate sheets,
//! `run` does the same from a manifest, `inspect` reports what a set of rate
//! sheets loads to, and `shell` is the interactive menu.

pub mod display;
pub mod shell;

use std::path::PathBuf;

use callroute::OutputFormat;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "callroute",
    about = "Least-cost call routing over carrier rate sheets",
    version
)]
pub struct Cli {
    /// Log filter when RUST_LOG is unset (e.g. warn, info, callroute=debug)
    #[arg(long, global = true, env = "CALLROUTE_LOG", default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the cost of each number
    Lookup {
        /// Carrier rate sheet (repeatable; costs are min-merged)
        #[arg(short, long = "routes", required = true)]
        routes: Vec<PathBuf>,

        /// Numbers in +digits form
        #[arg(required = true)]
        numbers: Vec<String>,

        #[arg(short, long, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },

    /// Price every number in a phone list
    Resolve {
        /// Carrier rate sheet (repeatable; costs are min-merged)
        #[arg(short, long = "routes", required = true)]
        routes: Vec<PathBuf>,

        /// Phone list, one number per line
        #[arg(short, long)]
        numbers: PathBuf,

        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },

    /// Load and export everything a run manifest lists
    Run {
        /// Path to the manifest JSON
        manifest: PathBuf,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load rate sheets and report what they produced
    Inspect {
        /// Carrier rate sheet (repeatable)
        #[arg(short, long = "routes", required = true)]
        routes: Vec<PathBuf>,

        /// Print the reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive menu over a data directory
    Shell {
        /// Directory holding route-cost and phone-number files
        #[arg(long, env = "CALLROUTE_DATA_DIR", default_value = "data")]
        data_dir: PathBuf,

        /// Directory exports are written to
        #[arg(long, env = "CALLROUTE_RESULTS_DIR", default_value = "results")]
        results_dir: PathBuf,
    },
}
