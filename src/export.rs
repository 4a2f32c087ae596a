//! CSV export of the full unit list.
//!
//! Byte layout is fixed: UTF-8 with BOM, CRLF between records, every field
//! quoted with embedded quotes doubled, no trailing line break.

use crate::dataset::AdministrativeUnit;
use crate::error::{Error, Result};
use chrono::{NaiveDate, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

pub const HEADERS: [&str; 3] = ["Tỉnh", "Phường, xã mới", "Phường, xã trước sáp nhập"];

const BOM: &str = "\u{FEFF}";
const RECORD_SEPARATOR: &str = "\r\n";

/// Quote a field unconditionally, doubling embedded quotes.
pub fn escape_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn record<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields
        .into_iter()
        .map(escape_field)
        .collect::<Vec<_>>()
        .join(",")
}

/// One CSV record for a unit: province, new name, old-units text.
pub fn unit_record(unit: &AdministrativeUnit) -> String {
    let old_units = unit.old_units_text();
    record([
        unit.province.as_str(),
        unit.new_name.as_str(),
        old_units.as_str(),
    ])
}

/// The complete file contents, BOM included.
pub fn render(units: &[Arc<AdministrativeUnit>]) -> String {
    let mut rows = Vec::with_capacity(units.len() + 1);
    rows.push(record(HEADERS));
    rows.extend(units.iter().map(|unit| unit_record(unit)));

    let mut content = String::from(BOM);
    content.push_str(&rows.join(RECORD_SEPARATOR));
    content
}

/// `don-vi-hanh-chinh-2025_<date>.csv`
pub fn file_name(date: NaiveDate) -> String {
    format!("don-vi-hanh-chinh-2025_{}.csv", date.format("%Y-%m-%d"))
}

/// Write the export into `dir`, named after today's (UTC) date.
///
/// The file appears only once fully written; a failed export leaves no
/// partial file behind.
pub fn write_export(units: &[Arc<AdministrativeUnit>], dir: &Path) -> Result<PathBuf> {
    let target = dir.join(file_name(Utc::now().date_naive()));
    log::trace!("Exporting {} units to {}", units.len(), target.display());

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(render(units).as_bytes())?;
    tmp.flush()?;
    tmp.persist(&target).map_err(|e| Error::Export(e.error))?;

    log::info!("Exported {} units to {}", units.len(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_and_always_quotes() {
        assert_eq!(escape_field("plain"), "\"plain\"");
        assert_eq!(escape_field("a, b"), "\"a, b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field(""), "\"\"");
    }

    #[test]
    fn merged_unit_row_keeps_commas() {
        let unit = AdministrativeUnit::merged("Phường A", "Hà Nội", ["X, Y", "Z"]);
        assert_eq!(unit_record(&unit), "\"Hà Nội\",\"Phường A\",\"X, Y, Z\"");
    }

    #[test]
    fn unchanged_unit_row() {
        let unit = AdministrativeUnit::unchanged("Xã B", "Huế");
        assert_eq!(unit_record(&unit), "\"Huế\",\"Xã B\",\"Không sáp nhập\"");
    }

    #[test]
    fn full_file_layout() {
        let units = vec![
            Arc::new(AdministrativeUnit::merged("Phường A", "Hà Nội", ["X, Y", "Z"])),
            Arc::new(AdministrativeUnit::unchanged("Xã B", "Huế")),
        ];
        let expected = concat!(
            "\u{FEFF}",
            "\"Tỉnh\",\"Phường, xã mới\",\"Phường, xã trước sáp nhập\"\r\n",
            "\"Hà Nội\",\"Phường A\",\"X, Y, Z\"\r\n",
            "\"Huế\",\"Xã B\",\"Không sáp nhập\""
        );
        assert_eq!(render(&units), expected);
        assert!(render(&units).as_bytes().starts_with(&[0xEF, 0xBB, 0xBF]));
    }

    #[test]
    fn empty_dataset_is_header_only() {
        assert_eq!(
            render(&[]),
            "\u{FEFF}\"Tỉnh\",\"Phường, xã mới\",\"Phường, xã trước sáp nhập\""
        );
    }

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        assert_eq!(file_name(date), "don-vi-hanh-chinh-2025_2025-07-04.csv");
    }

    #[test]
    fn writes_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let units = vec![Arc::new(AdministrativeUnit::unchanged("Xã B", "Huế"))];
        let path = write_export(&units, dir.path()).unwrap();

        assert_eq!(path.parent(), Some(dir.path()));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render(&units));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_directory_is_an_export_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = write_export(&[], &missing).unwrap_err();
        assert!(matches!(err, Error::Export(_)));
        assert!(!err.is_fatal());
    }
}
