//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use merger_search::convert::{dataset_from_csv, vnexpress_metadata};
use merger_search::{Dashboard, Dataset};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const FIXTURE_CSV: &str = include_str!("../fixtures/data.csv");

pub fn fixture_dataset() -> Dataset {
    dataset_from_csv(FIXTURE_CSV, Some(vnexpress_metadata())).expect("fixture converts")
}

/// Write the fixture dataset as JSON into a fresh temp dir.
pub fn fixture_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("data.json");
    let json = fixture_dataset().to_json_pretty().expect("serializes");
    fs::write(&path, json).expect("writes fixture");
    (dir, path)
}

pub fn fixture_dashboard() -> (TempDir, Dashboard) {
    let (dir, path) = fixture_file();
    let dashboard = Dashboard::load(&path).expect("fixture loads");
    (dir, dashboard)
}
