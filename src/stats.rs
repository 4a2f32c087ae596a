//! Chart data: statistics cards, the top-provinces bar chart and the
//! merger-size distribution pie.

use crate::dataset::{Dataset, Statistics};
use serde::Serialize;

/// Bars in the top-provinces chart.
pub const TOP_PROVINCES: usize = 15;

/// Colour band of a bar, by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    /// Ranks 1-3
    Top,
    /// Ranks 4-10
    High,
    Rest,
}

impl Band {
    fn for_rank(index: usize) -> Self {
        match index {
            0..=2 => Band::Top,
            3..=9 => Band::High,
            _ => Band::Rest,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Band::Top => "#e74c3c",
            Band::High => "#3498db",
            Band::Rest => "#95a5a6",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvinceBar {
    pub id: String,
    pub name: String,
    pub total_units: usize,
    pub merged_units: usize,
    pub unchanged_units: usize,
    pub band: Band,
}

/// First [`TOP_PROVINCES`] provinces in dataset order (the file is already
/// sorted by unit count).
pub fn top_provinces(dataset: &Dataset) -> Vec<ProvinceBar> {
    dataset
        .provinces
        .iter()
        .take(TOP_PROVINCES)
        .enumerate()
        .map(|(rank, p)| ProvinceBar {
            id: p.id.clone(),
            name: p.name.clone(),
            total_units: p.total_units,
            merged_units: p.merged_units,
            unchanged_units: p.unchanged_units,
            band: Band::for_rank(rank),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSlice {
    pub size: u32,
    pub label: String,
    pub count: usize,
    /// Share of all slices, 0-100. Serialised with one decimal place.
    #[serde(serialize_with = "one_decimal")]
    pub percentage: f64,
}

fn one_decimal<S: serde::Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 10.0).round() / 10.0)
}

/// Distribution slices ordered by merger size. Keys that are not integers
/// are skipped.
pub fn merger_distribution(statistics: &Statistics) -> Vec<DistributionSlice> {
    let mut entries: Vec<(u32, usize)> = statistics
        .merger_distribution
        .iter()
        .filter_map(|(key, &count)| match key.trim().parse::<u32>() {
            Ok(size) => Some((size, count)),
            Err(_) => {
                log::warn!("Ignoring merger distribution key {:?}", key);
                None
            }
        })
        .collect();
    entries.sort_by_key(|&(size, _)| size);

    let total: usize = entries.iter().map(|&(_, count)| count).sum();
    entries
        .into_iter()
        .map(|(size, count)| DistributionSlice {
            size,
            label: format!("{} đơn vị", size),
            count,
            percentage: if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            },
        })
        .collect()
}

/// Group digits with `.` as the vi-VN locale does: 3321 → "3.321".
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total_units: String,
    pub total_provinces: usize,
    pub merged_units: String,
    pub unchanged_units: usize,
    pub top_provinces: Vec<ProvinceBar>,
    pub merger_distribution: Vec<DistributionSlice>,
}

/// Everything the statistics cards and both charts display.
pub fn overview(dataset: &Dataset) -> Overview {
    let stats = &dataset.statistics;
    Overview {
        total_units: format_count(stats.total_units),
        total_provinces: stats.total_provinces,
        merged_units: format_count(stats.total_merged),
        unchanged_units: stats.total_unchanged,
        top_provinces: top_provinces(dataset),
        merger_distribution: merger_distribution(stats),
    }
}
