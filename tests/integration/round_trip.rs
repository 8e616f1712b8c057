//! Rate sheets and phone lists through the file-level API.

use std::fs;

use callroute::export::{export_file, OutputFormat};
use callroute::load::{load_file, load_files};
use callroute::PrefixIndex;

use crate::common::{dump, scenario_dir, write_file, SCENARIO_EXPORT};

#[test]
fn test_scenario_round_trip() {
    let dir = scenario_dir();
    let mut index = PrefixIndex::new();
    let report = load_file(&dir.path().join("route-costs-4.txt"), &mut index).unwrap();
    assert_eq!(report.accepted, 4);

    let output = dir.path().join("results/phone-numbers-3.txt");
    let summary = export_file(
        &index,
        &dir.path().join("phone-numbers-3.txt"),
        &output,
        OutputFormat::Csv,
    )
    .unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), SCENARIO_EXPORT);
    assert_eq!((summary.routed, summary.no_route), (2, 1));
}

#[test]
fn test_two_carriers_min_merge() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "route-costs-a.txt", "+1415,0.05\n+44,0.10\n");
    let b = write_file(dir.path(), "route-costs-b.txt", "+1415,0.02\n+44,0.12\n+4420,0.07\n");
    let mut index = PrefixIndex::new();
    let reports = load_files(&[a, b], &mut index).unwrap();

    assert_eq!(reports[1].merge.improved, 1);
    assert_eq!(reports[1].merge.unchanged, 1);
    assert_eq!(dump(&index), ["+1415,0.02", "+44,0.10", "+4420,0.07"]);
}

#[test]
fn test_export_feeds_back_as_phone_list() {
    let dir = scenario_dir();
    let mut index = PrefixIndex::new();
    load_file(&dir.path().join("route-costs-4.txt"), &mut index).unwrap();

    let first = dir.path().join("out/first.txt");
    let second = dir.path().join("out/second.txt");
    export_file(&index, &dir.path().join("phone-numbers-3.txt"), &first, OutputFormat::Csv).unwrap();
    export_file(&index, &first, &second, OutputFormat::Csv).unwrap();

    assert_eq!(fs::read_to_string(&second).unwrap(), SCENARIO_EXPORT);
}

#[test]
fn test_json_export_lines() {
    let dir = scenario_dir();
    let mut index = PrefixIndex::new();
    load_file(&dir.path().join("route-costs-4.txt"), &mut index).unwrap();
    let output = dir.path().join("costs.jsonl");
    export_file(&index, &dir.path().join("phone-numbers-3.txt"), &output, OutputFormat::Json).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    let rows: Vec<serde_json::Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1]["number"], "+14152345678");
    assert_eq!(rows[1]["cost"], "0.03");
    assert_eq!(rows[2]["status"], "no_route");
}
