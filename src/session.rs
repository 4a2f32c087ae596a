//! The dashboard session.
//!
//! A `Dashboard` exists only once its dataset has loaded, and it builds the
//! search index on construction, so searching an unbuilt index cannot happen.
//! Every filter change recomputes the aggregate before returning; `view()`
//! is never stale.

use crate::aggregate::{aggregate, FilteredAggregate};
use crate::dataset::{Dataset, Province};
use crate::error::Result;
use crate::export;
use crate::filter::{FilterState, MergerFilter};
use crate::notice::Notice;
use crate::search::{SearchIndex, SearchOutcome};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Dashboard {
    dataset: Dataset,
    index: SearchIndex,
    filter: MergerFilter,
    view: FilteredAggregate,
}

/// What an export attempt produced.
#[derive(Debug)]
pub struct ExportOutcome {
    pub notice: Notice,
    pub path: Option<PathBuf>,
}

impl Dashboard {
    pub fn load(path: &Path) -> Result<Self> {
        match Dataset::load(path) {
            Ok(dataset) => Ok(Self::new(dataset)),
            Err(e) => {
                log::error!("Error loading dataset: {}", e);
                Err(e)
            }
        }
    }

    pub fn new(dataset: Dataset) -> Self {
        let index = SearchIndex::build(&dataset.units);
        let filter = MergerFilter::new();
        let view = aggregate(&dataset.units, &filter);
        Self {
            dataset,
            index,
            filter,
            view,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn filter(&self) -> &MergerFilter {
        &self.filter
    }

    pub fn state(&self) -> FilterState<'_> {
        self.filter.state()
    }

    /// The aggregate for the current filter.
    pub fn view(&self) -> &FilteredAggregate {
        &self.view
    }

    pub fn search(&self, raw: &str) -> SearchOutcome {
        self.index.lookup(raw)
    }

    /// Toggle a merger size and refresh the view. An invalid size leaves the
    /// session unchanged.
    pub fn toggle(&mut self, size: i64) -> Result<Notice> {
        let toggle = self.filter.toggle(size)?;
        self.refresh();
        Ok(Notice::toggled(toggle))
    }

    pub fn clear(&mut self) -> Notice {
        self.filter.clear();
        self.refresh();
        Notice::cleared()
    }

    fn refresh(&mut self) {
        self.view = aggregate(&self.dataset.units, &self.filter);
    }

    /// Heading over the detail table.
    pub fn heading(&self) -> String {
        if self.view.is_empty() {
            "Không tìm thấy dữ liệu".to_string()
        } else if self.filter.is_empty() {
            "Tất cả dữ liệu".to_string()
        } else {
            format!("Kết quả lọc: {}", self.filter.labels().join(", "))
        }
    }

    /// Status line above the table; absent when unfiltered.
    pub fn filter_status(&self) -> Option<String> {
        match self.filter.state() {
            FilterState::Unfiltered => None,
            FilterState::Filtered(_) => {
                Some(format!("Hiển thị: {}", self.filter.labels().join(", ")))
            }
        }
    }

    pub fn province(&self, id: &str) -> Option<&Province> {
        self.dataset.province(id)
    }

    /// Export the full, unfiltered unit list. Failures are reported through
    /// the notice and leave the session usable.
    pub fn export(&self, dir: &Path) -> ExportOutcome {
        match export::write_export(&self.dataset.units, dir) {
            Ok(path) => ExportOutcome {
                notice: Notice::exported(),
                path: Some(path),
            },
            Err(e) => {
                log::error!("Error exporting CSV: {}", e);
                ExportOutcome {
                    notice: Notice::export_failed(),
                    path: None,
                }
            }
        }
    }
}
