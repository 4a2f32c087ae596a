//! The pre-built dataset: statistics, provinces and the flat unit list.
//!
//! Loaded once per session; nothing in here is mutated afterwards. Units are
//! held behind `Arc` so the search index and the per-province summaries can
//! point at them without copying.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Old-units text shown for a unit that was not merged.
pub const UNCHANGED_TEXT: &str = "Không sáp nhập";

/// A post-merger ward or commune.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdministrativeUnit {
    pub new_name: String,
    /// Prior units absorbed into this one; empty iff `is_unchanged`.
    #[serde(default)]
    pub old_units: Vec<String>,
    pub is_unchanged: bool,
    pub province: String,
}

impl AdministrativeUnit {
    pub fn unchanged(new_name: impl Into<String>, province: impl Into<String>) -> Self {
        Self {
            new_name: new_name.into(),
            old_units: Vec::new(),
            is_unchanged: true,
            province: province.into(),
        }
    }

    pub fn merged<I, S>(new_name: impl Into<String>, province: impl Into<String>, old_units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            new_name: new_name.into(),
            old_units: old_units.into_iter().map(Into::into).collect(),
            is_unchanged: false,
            province: province.into(),
        }
    }

    /// Size category used by the merger filter: 1 for unchanged units,
    /// otherwise the number of absorbed units.
    pub fn merger_size(&self) -> usize {
        if self.is_unchanged {
            1
        } else {
            self.old_units.len()
        }
    }

    /// "Không sáp nhập", or the absorbed units joined by ", ".
    pub fn old_units_text(&self) -> String {
        if self.is_unchanged {
            UNCHANGED_TEXT.to_string()
        } else {
            self.old_units.join(", ")
        }
    }

    /// Type column of the detail table.
    pub fn type_text(&self) -> String {
        if self.is_unchanged {
            "Không đổi".to_string()
        } else {
            format!("Sáp nhập {} đơn vị", self.old_units.len())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Province {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub units: Vec<Arc<AdministrativeUnit>>,
    pub total_units: usize,
    pub merged_units: usize,
    pub unchanged_units: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub source: String,
    pub url: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_units: usize,
    pub total_provinces: usize,
    pub total_merged: usize,
    pub total_unchanged: usize,
    /// Merged-unit counts keyed by merger size as a decimal string.
    #[serde(default)]
    pub merger_distribution: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub statistics: Statistics,
    pub provinces: Vec<Province>,
    pub units: Vec<Arc<AdministrativeUnit>>,
}

impl Dataset {
    /// Read and parse the dataset file.
    pub fn load(path: &Path) -> Result<Self> {
        log::trace!("Loading dataset from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|source| Error::DataUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_json(&contents)?;
        log::debug!(
            "Loaded {} units across {} provinces",
            dataset.units.len(),
            dataset.provinces.len()
        );
        Ok(dataset)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        // Files saved by spreadsheet tools may carry a BOM.
        let contents = contents.strip_prefix('\u{FEFF}').unwrap_or(contents);
        Ok(serde_json::from_str(contents)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn province(&self, id: &str) -> Option<&Province> {
        self.provinces.iter().find(|p| p.id == id)
    }

    pub fn province_by_name(&self, name: &str) -> Option<&Province> {
        self.provinces.iter().find(|p| p.name == name)
    }
}
