//! Custom cargo commands for callroute.
//!
//! Usage:
//!   cargo xtask test                  - Run all tests
//!   cargo xtask check                 - Contract call sites, tests, clippy
//!   cargo xtask bench                 - Run benchmarks
//!   cargo xtask gen-data [DIR] [N]    - Write synthetic rate sheets and phone lists

use anyhow::{bail, Context, Result};
use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("gen-data") => {
            let dir = args.get(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("data"));
            let count = match args.get(2) {
                Some(n) => n.parse().with_context(|| format!("invalid route count '{}'", n))?,
                None => 100_000,
            };
            gen_data(&dir, count)?;
        }
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  test                Run all Rust tests
  check               Contract call sites + cargo test + clippy
  bench               Run benchmarks
  gen-data [DIR] [N]  Write route-costs-*.txt and phone-numbers-*.txt (default: data, 100000)
"#
    );
}

fn test() -> Result<()> {
    run_cargo(&["test"])
}

fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] contract call sites...");
    check_contract_calls()?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

// ============================================================================
// Synthetic data
// ============================================================================

/// Deterministic xorshift so generated files are reproducible.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn digits(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(b'0' + (self.next() % 10) as u8))
            .collect()
    }
}

fn gen_data(dir: &Path, routes: usize) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let mut rng = Rng(0x9e37_79b9_7f4a_7c15);

    // two carriers with overlapping prefixes so merging has work to do
    for carrier in ["a", "b"] {
        let path = dir.join(format!("route-costs-{}-{}.txt", routes, carrier));
        let mut out = BufWriter::new(File::create(&path)?);
        for _ in 0..routes {
            let len = 1 + (rng.next() % 7) as usize;
            let cost = rng.next() % 1000;
            writeln!(out, "+{},0.{:03}", rng.digits(len), cost)?;
        }
        out.flush()?;
        println!("  wrote {}", path.display());
    }

    for count in [3usize, 10_000] {
        let path = dir.join(format!("phone-numbers-{}.txt", count));
        let mut out = BufWriter::new(File::create(&path)?);
        for _ in 0..count {
            writeln!(out, "+{}", rng.digits(11))?;
        }
        out.flush()?;
        println!("  wrote {}", path.display());
    }
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

/// The index must keep calling both contracts.
fn check_contract_calls() -> Result<()> {
    let path = project_root()?.join("src/index/prefix_index.rs");
    let source = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    for contract in ["check_merge_minimum", "check_longest_match"] {
        if !source.contains(&format!("contracts::{}", contract)) {
            bail!("{} no longer calls contracts::{}", path.display(), contract);
        }
    }
    Ok(())
}
