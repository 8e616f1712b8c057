//! Manifest-driven runs.

use std::fs;

use callroute::load::RunManifest;
use callroute::pipeline::run_manifest;

use crate::common::{scenario_dir, write_file, SCENARIO_EXPORT, SCENARIO_NUMBERS};

#[test]
fn test_manifest_with_two_carriers_and_json() {
    let dir = scenario_dir();
    write_file(dir.path(), "route-costs-cheap.txt", "+1512,0.01\n");
    let manifest_path = write_file(
        dir.path(),
        "run.json",
        r#"{
            "version": 1,
            "carriers": ["route-costs-4.txt", "route-costs-cheap.txt"],
            "numbers": ["phone-numbers-3.txt"],
            "output": "out",
            "format": "json"
        }"#,
    );

    let manifest = RunManifest::from_path(&manifest_path).unwrap();
    let summary = run_manifest(&manifest, dir.path()).unwrap();

    assert_eq!(summary.loads.len(), 2);
    assert_eq!(summary.stats.prefixes, 4);
    let text = fs::read_to_string(dir.path().join("out/phone-numbers-3.txt")).unwrap();
    let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
    assert_eq!(first["cost"], "0.01");
}

#[test]
fn test_manifest_without_numbers_only_loads() {
    let dir = scenario_dir();
    let manifest = RunManifest::from_json(r#"{"version":1,"carriers":["route-costs-4.txt"]}"#).unwrap();
    let summary = run_manifest(&manifest, dir.path()).unwrap();
    assert!(summary.exports.is_empty());
    assert!(!dir.path().join("results").exists());
}

#[test]
fn test_default_output_dir() {
    let dir = scenario_dir();
    let manifest = RunManifest::from_json(
        r#"{"version":1,"carriers":["route-costs-4.txt"],"numbers":["phone-numbers-3.txt"]}"#,
    )
    .unwrap();
    run_manifest(&manifest, dir.path()).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("results/phone-numbers-3.txt")).unwrap(),
        SCENARIO_EXPORT
    );
}

#[test]
fn test_output_into_data_dir_keeps_phone_list() {
    let dir = scenario_dir();
    let manifest = RunManifest::from_json(
        r#"{"version":1,"carriers":["route-costs-4.txt"],"numbers":["phone-numbers-3.txt"],"output":"."}"#,
    )
    .unwrap();

    let err = run_manifest(&manifest, dir.path()).unwrap_err();

    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    assert_eq!(
        fs::read_to_string(dir.path().join("phone-numbers-3.txt")).unwrap(),
        SCENARIO_NUMBERS
    );
}
