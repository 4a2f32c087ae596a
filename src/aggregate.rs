//! Per-province aggregation of the filtered unit list.

use crate::dataset::AdministrativeUnit;
use crate::filter::MergerFilter;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvinceSummary {
    pub name: String,
    pub units: Vec<Arc<AdministrativeUnit>>,
    pub total_units: usize,
    pub merged_units: usize,
    pub unchanged_units: usize,
}

impl ProvinceSummary {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            units: Vec::new(),
            total_units: 0,
            merged_units: 0,
            unchanged_units: 0,
        }
    }

    fn push(&mut self, unit: &Arc<AdministrativeUnit>) {
        self.units.push(Arc::clone(unit));
        self.total_units += 1;
        if unit.is_unchanged {
            self.unchanged_units += 1;
        } else {
            self.merged_units += 1;
        }
    }
}

/// The filtered view: provinces ordered by unit count, largest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilteredAggregate {
    pub provinces: Vec<ProvinceSummary>,
    pub total_units: usize,
}

impl FilteredAggregate {
    pub fn is_empty(&self) -> bool {
        self.total_units == 0
    }

    pub fn merged_units(&self) -> usize {
        self.provinces.iter().map(|p| p.merged_units).sum()
    }

    pub fn unchanged_units(&self) -> usize {
        self.provinces.iter().map(|p| p.unchanged_units).sum()
    }

    /// Every included unit, province by province.
    pub fn units(&self) -> impl Iterator<Item = &Arc<AdministrativeUnit>> {
        self.provinces.iter().flat_map(|p| p.units.iter())
    }
}

/// Group the units passing `filter` by province.
///
/// Provinces with equal totals keep the order in which they first appear in
/// the filtered list.
pub fn aggregate(units: &[Arc<AdministrativeUnit>], filter: &MergerFilter) -> FilteredAggregate {
    let mut provinces: Vec<ProvinceSummary> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut total_units = 0;

    for unit in units.iter().filter(|u| filter.matches(u)) {
        let slot = *slots.entry(unit.province.as_str()).or_insert_with(|| {
            provinces.push(ProvinceSummary::new(&unit.province));
            provinces.len() - 1
        });
        provinces[slot].push(unit);
        total_units += 1;
    }

    provinces.sort_by(|a, b| b.total_units.cmp(&a.total_units));

    log::debug!(
        "Aggregated {} units into {} provinces",
        total_units,
        provinces.len()
    );
    FilteredAggregate {
        provinces,
        total_units,
    }
}
