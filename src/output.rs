//! JSON rendering of command results.
//!
//! Search results use a script-filter item list (`{"items": [...]}`) so
//! launchers can show them directly; the other views are plain documents.

use crate::aggregate::FilteredAggregate;
use crate::dataset::{AdministrativeUnit, Dataset, Province};
use crate::notice::Notice;
use crate::search::{SearchHit, SearchOutcome};
use crate::session::Dashboard;
use crate::utils;
use serde::Serialize;
use std::error::Error;

/// A script-filter result row.
#[derive(Serialize, Debug)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    pub valid: bool,
}

#[derive(Serialize, Debug)]
pub struct ItemList {
    pub items: Vec<Item>,
}

/// A hit row. `arg` is the id of the hit's province, for `province <ID>`.
fn hit_item(hit: &SearchHit, dataset: &Dataset) -> Item {
    let unit = &hit.unit;
    let province = dataset.province_by_name(&unit.province);
    if province.is_none() {
        log::warn!("No province named {:?} for {:?}", unit.province, unit.new_name);
    }
    Item {
        uid: Some(format!("{}/{}", unit.province, unit.new_name)),
        title: format!("{} - {}", unit.new_name, unit.province),
        subtitle: Some(unit.old_units_text()),
        arg: province.map(|p| p.id.clone()),
        valid: true,
    }
}

/// Items for a search over `dataset`. `NoQuery` yields an empty list;
/// `NoResults` a single non-actionable row.
pub fn search_items(outcome: &SearchOutcome, dataset: &Dataset) -> ItemList {
    let items = match outcome {
        SearchOutcome::NoQuery => Vec::new(),
        SearchOutcome::NoResults => vec![Item {
            uid: None,
            title: "Không tìm thấy kết quả".to_string(),
            subtitle: None,
            arg: None,
            valid: false,
        }],
        SearchOutcome::Hits(hits) => hits.iter().map(|hit| hit_item(hit, dataset)).collect(),
    };
    ItemList { items }
}

/// A numbered row of the detail table.
#[derive(Serialize, Debug, PartialEq)]
pub struct UnitRow {
    pub index: usize,
    pub new_name: String,
    pub province: String,
    pub old_units: String,
    #[serde(rename = "type")]
    pub kind: String,
}

fn unit_rows<'a>(units: impl Iterator<Item = &'a AdministrativeUnit>) -> Vec<UnitRow> {
    units
        .enumerate()
        .map(|(i, unit)| UnitRow {
            index: i + 1,
            new_name: unit.new_name.clone(),
            province: unit.province.clone(),
            old_units: unit.old_units_text(),
            kind: unit.type_text(),
        })
        .collect()
}

#[derive(Serialize, Debug)]
pub struct SummaryRow {
    pub name: String,
    pub total_units: usize,
    pub merged_units: usize,
    pub unchanged_units: usize,
}

#[derive(Serialize, Debug)]
pub struct FilteredView {
    pub heading: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub total_units: usize,
    pub merged_units: usize,
    pub unchanged_units: usize,
    pub provinces: Vec<SummaryRow>,
    pub rows: Vec<UnitRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
}

fn summary_rows(view: &FilteredAggregate) -> Vec<SummaryRow> {
    view.provinces
        .iter()
        .map(|p| SummaryRow {
            name: p.name.clone(),
            total_units: p.total_units,
            merged_units: p.merged_units,
            unchanged_units: p.unchanged_units,
        })
        .collect()
}

pub fn filtered_view(dashboard: &Dashboard, notices: Vec<Notice>) -> FilteredView {
    let view = dashboard.view();
    FilteredView {
        heading: dashboard.heading(),
        status: dashboard.filter_status(),
        total_units: view.total_units,
        merged_units: view.merged_units(),
        unchanged_units: view.unchanged_units(),
        provinces: summary_rows(view),
        rows: unit_rows(view.units().map(|u| &**u)),
        notices,
    }
}

#[derive(Serialize, Debug)]
pub struct ProvinceDetails {
    pub heading: String,
    pub total_units: usize,
    pub merged_units: usize,
    pub unchanged_units: usize,
    pub rows: Vec<UnitRow>,
}

pub fn province_details(province: &Province) -> ProvinceDetails {
    ProvinceDetails {
        heading: format!("Chi tiết {}", province.name),
        total_units: province.total_units,
        merged_units: province.merged_units,
        unchanged_units: province.unchanged_units,
        rows: unit_rows(province.units.iter().map(|u| &**u)),
    }
}

/// Print a value as JSON on stdout, pretty when `pretty_json` is set.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    let json = if utils::get_env_bool("pretty_json") {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
