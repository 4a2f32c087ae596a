//! End-to-end behaviour of a loaded dashboard session.

mod common;

use common::{fixture_dashboard, fixture_dataset, fixture_file};
use merger_search::convert::dataset_from_csv;
use merger_search::filter::FilterState;
use merger_search::search::{Relevance, SearchOutcome, MAX_RESULTS};
use merger_search::{Dashboard, Error};
use std::collections::BTreeSet;
use std::fs;

fn hit_names(outcome: SearchOutcome) -> Vec<String> {
    match outcome {
        SearchOutcome::Hits(hits) => hits.iter().map(|h| h.unit.new_name.clone()).collect(),
        other => panic!("expected hits, got {:?}", other),
    }
}

#[test]
fn loads_from_disk_and_indexes_every_unit() {
    let (_dir, dashboard) = fixture_dashboard();
    assert_eq!(dashboard.dataset().units.len(), 11);
    assert_eq!(dashboard.index().len(), 11);
    assert_eq!(dashboard.view().total_units, 11);

    let stats = &dashboard.dataset().statistics;
    assert_eq!(stats.total_merged, 8);
    assert_eq!(stats.total_unchanged, 3);
    assert_eq!(stats.merger_distribution["2"], 3);
    assert_eq!(stats.merger_distribution["3"], 3);
    assert_eq!(stats.merger_distribution["4"], 2);
}

#[test]
fn unreadable_or_invalid_data_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = Dashboard::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(missing, Error::DataUnavailable { .. }));
    assert!(missing.is_fatal());

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{\"statistics\": ").unwrap();
    let invalid = Dashboard::load(&broken).unwrap_err();
    assert!(matches!(invalid, Error::MalformedData(_)));
    assert!(invalid.is_fatal());
}

#[test]
fn accent_free_query_finds_accented_names() {
    let (_dir, dashboard) = fixture_dashboard();
    let names = hit_names(dashboard.search("ha noi"));

    // the only name match comes first, then province matches in file order
    assert_eq!(
        names,
        [
            "Xã Hà Nội Mới",
            "Phường Hoàn Kiếm",
            "Phường Cửa Nam",
            "Phường Ba Đình",
            "Xã Minh Châu",
            "Phường Hà Đông",
        ]
    );
}

#[test]
fn relevance_tiers_in_results() {
    let (_dir, dashboard) = fixture_dashboard();
    match dashboard.search("Hà Nội") {
        SearchOutcome::Hits(hits) => {
            assert_eq!(hits[0].relevance, Relevance::NameContains);
            assert!(hits[1..].iter().all(|h| h.relevance == Relevance::Elsewhere));
        }
        other => panic!("expected hits, got {:?}", other),
    }

    match dashboard.search("phuong") {
        SearchOutcome::Hits(hits) => {
            assert_eq!(hits.len(), 7);
            assert!(hits.len() <= MAX_RESULTS);
            assert!(hits.iter().all(|h| h.relevance == Relevance::NamePrefix));
        }
        other => panic!("expected hits, got {:?}", other),
    }
}

#[test]
fn old_unit_names_are_searchable() {
    let (_dir, dashboard) = fixture_dashboard();
    assert_eq!(hit_names(dashboard.search("truc bach")), ["Phường Ba Đình"]);
    assert_eq!(hit_names(dashboard.search("NẠI HIÊN")), ["Phường Sơn Trà"]);
}

#[test]
fn short_and_unmatched_queries() {
    let (_dir, dashboard) = fixture_dashboard();
    assert!(matches!(dashboard.search("h"), SearchOutcome::NoQuery));
    assert!(matches!(dashboard.search("   "), SearchOutcome::NoQuery));
    assert!(matches!(dashboard.search("berlin"), SearchOutcome::NoResults));
}

#[test]
fn toggle_toggle_clear_scenario() {
    let (_dir, mut dashboard) = fixture_dashboard();
    let unfiltered = dashboard.view().clone();

    dashboard.toggle(1).unwrap();
    assert_eq!(dashboard.state(), FilterState::Filtered(&BTreeSet::from([1])));
    let names: Vec<&str> = dashboard.view().provinces.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Hà Nội", "Đà Nẵng", "Sơn La"]);
    assert_eq!(dashboard.view().total_units, 3);

    dashboard.toggle(3).unwrap();
    assert_eq!(dashboard.state(), FilterState::Filtered(&BTreeSet::from([1, 3])));
    let view = dashboard.view();
    assert_eq!(view.total_units, 6);
    assert_eq!(view.provinces[0].name, "Hà Nội");
    assert_eq!(view.provinces[0].total_units, 3);
    assert_eq!(view.provinces[0].merged_units, 2);
    assert_eq!(view.provinces[0].unchanged_units, 1);
    assert_eq!(view.provinces[1].name, "Đà Nẵng");
    assert_eq!(view.provinces[1].total_units, 2);

    dashboard.clear();
    assert_eq!(dashboard.state(), FilterState::Unfiltered);
    assert_eq!(dashboard.view(), &unfiltered);
    assert_eq!(dashboard.view().total_units, 11);
}

#[test]
fn export_covers_the_unfiltered_dataset_and_converts_back() {
    let (dir, mut dashboard) = fixture_dashboard();
    dashboard.toggle(4).unwrap();

    let outcome = dashboard.export(dir.path());
    let path = outcome.path.expect("export written");
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(&[0xEF, 0xBB, 0xBF]));

    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.split("\r\n").collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(
        lines[0],
        "\u{FEFF}\"Tỉnh\",\"Phường, xã mới\",\"Phường, xã trước sáp nhập\""
    );
    assert_eq!(
        lines[4],
        "\"Hà Nội\",\"Xã Minh Châu\",\"Không sáp nhập\""
    );
    assert!(!text.ends_with("\r\n"));

    let rebuilt = dataset_from_csv(&text, None).unwrap();
    let original = fixture_dataset();
    assert_eq!(rebuilt.units, original.units);
    assert_eq!(rebuilt.provinces, original.provinces);
    assert_eq!(rebuilt.statistics, original.statistics);
}

#[test]
fn dataset_json_round_trips_through_disk() {
    let (_dir, path) = fixture_file();
    let loaded = merger_search::Dataset::load(&path).unwrap();
    assert_eq!(loaded, fixture_dataset());
    assert_eq!(loaded.provinces[0].name, "Hà Nội");
    assert_eq!(loaded.provinces[2].id, "Thừa Thiên Huế");
}
