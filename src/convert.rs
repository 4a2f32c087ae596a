//! Build the JSON dataset from the flat crawl table.
//!
//! The table has one row per new unit with the columns of [`HEADERS`]; the
//! old-units column is either "Không sáp nhập" or a comma-separated list.

use crate::dataset::{AdministrativeUnit, Dataset, Metadata, Province, Statistics, UNCHANGED_TEXT};
use crate::error::{Error, Result};
use crate::export::HEADERS;
use csv::{ReaderBuilder, StringRecord};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Metadata stamped on datasets built from the VnExpress crawl.
pub fn vnexpress_metadata() -> Metadata {
    Metadata {
        source: "VnExpress - Tra cứu 3.321 phường, xã trên cả nước sau sắp xếp".to_string(),
        url: "https://vnexpress.net/tra-cuu-3-321-phuong-xa-tren-ca-nuoc-sau-sap-xep-4903454.html"
            .to_string(),
        last_updated: "2025-07-04".to_string(),
    }
}

fn csv_error(err: csv::Error) -> Error {
    Error::Csv {
        line: err.position().map_or(0, |p| p.line() as usize),
        message: err.to_string(),
    }
}

fn column(header: &StringRecord, name: &str) -> Result<usize> {
    header
        .iter()
        .position(|f| f.trim() == name)
        .ok_or_else(|| Error::Csv {
            line: 1,
            message: format!("missing column {:?}", name),
        })
}

fn unit_from_row(province: &str, new_name: &str, old_units: &str) -> AdministrativeUnit {
    if old_units == UNCHANGED_TEXT {
        AdministrativeUnit::unchanged(new_name, province)
    } else {
        AdministrativeUnit::merged(new_name, province, old_units.split(',').map(str::trim))
    }
}

/// Parse the crawl table and derive provinces and statistics.
///
/// Provinces are identified by their name and sorted by unit count, largest
/// first; provinces with equal counts keep table order.
pub fn dataset_from_csv(text: &str, metadata: Option<Metadata>) -> Result<Dataset> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    // Rows are checked against the header width below, with their line number.
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let header = reader.headers().map_err(csv_error)?.clone();

    let [province_col, new_col, old_col] = [
        column(&header, HEADERS[0])?,
        column(&header, HEADERS[1])?,
        column(&header, HEADERS[2])?,
    ];
    let width = province_col.max(new_col).max(old_col) + 1;

    let mut units = Vec::new();
    let mut provinces: Vec<Province> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.len() < width {
            return Err(Error::Csv {
                line: record.position().map_or(0, |p| p.line() as usize),
                message: format!("expected {} fields, found {}", width, record.len()),
            });
        }

        let province_name = &record[province_col];
        let unit = Arc::new(unit_from_row(
            province_name,
            &record[new_col],
            &record[old_col],
        ));

        let slot = *slots.entry(province_name.to_string()).or_insert_with(|| {
            provinces.push(Province {
                id: province_name.to_string(),
                name: province_name.to_string(),
                units: Vec::new(),
                total_units: 0,
                merged_units: 0,
                unchanged_units: 0,
            });
            provinces.len() - 1
        });

        let province = &mut provinces[slot];
        province.units.push(Arc::clone(&unit));
        province.total_units += 1;
        if unit.is_unchanged {
            province.unchanged_units += 1;
        } else {
            province.merged_units += 1;
        }
        units.push(unit);
    }

    let mut merger_distribution = BTreeMap::new();
    for unit in units.iter().filter(|u| !u.is_unchanged) {
        *merger_distribution
            .entry(unit.old_units.len().to_string())
            .or_insert(0) += 1;
    }

    let statistics = Statistics {
        total_units: units.len(),
        total_provinces: provinces.len(),
        total_merged: provinces.iter().map(|p| p.merged_units).sum(),
        total_unchanged: provinces.iter().map(|p| p.unchanged_units).sum(),
        merger_distribution,
    };

    provinces.sort_by(|a, b| b.total_units.cmp(&a.total_units));

    log::info!(
        "Converted {} units across {} provinces ({} merged, {} unchanged)",
        statistics.total_units,
        statistics.total_provinces,
        statistics.total_merged,
        statistics.total_unchanged
    );

    Ok(Dataset {
        metadata,
        statistics,
        provinces,
        units,
    })
}
