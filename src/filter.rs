//! Merger-size filter set.
//!
//! Size `1` selects units that were not merged; any larger size selects units
//! merged from exactly that many prior units. Selected sizes combine with OR.

use crate::dataset::AdministrativeUnit;
use crate::error::{Error, Result};
use std::collections::BTreeSet;

/// Sentinel size for "unchanged unit".
pub const UNCHANGED: u32 = 1;

/// Result of a [`MergerFilter::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    pub size: u32,
    pub added: bool,
}

/// Observable state of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState<'a> {
    Unfiltered,
    Filtered(&'a BTreeSet<u32>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergerFilter {
    sizes: BTreeSet<u32>,
}

impl MergerFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `size` if absent, remove it if present.
    pub fn toggle(&mut self, size: i64) -> Result<Toggle> {
        let size = u32::try_from(size)
            .ok()
            .filter(|s| *s >= UNCHANGED)
            .ok_or(Error::InvalidMergerSize(size))?;

        let added = if self.sizes.remove(&size) {
            false
        } else {
            self.sizes.insert(size);
            true
        };

        log::debug!(
            "Merger filter {} {} -> {:?}",
            if added { "added" } else { "removed" },
            size,
            self.sizes
        );
        Ok(Toggle { size, added })
    }

    pub fn clear(&mut self) {
        self.sizes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn contains(&self, size: u32) -> bool {
        self.sizes.contains(&size)
    }

    /// Selected sizes in ascending order.
    pub fn sizes(&self) -> impl Iterator<Item = u32> + '_ {
        self.sizes.iter().copied()
    }

    pub fn state(&self) -> FilterState<'_> {
        if self.sizes.is_empty() {
            FilterState::Unfiltered
        } else {
            FilterState::Filtered(&self.sizes)
        }
    }

    /// Whether `unit` passes. An empty filter passes everything.
    pub fn matches(&self, unit: &AdministrativeUnit) -> bool {
        if self.sizes.is_empty() {
            return true;
        }

        self.sizes.iter().any(|&size| {
            if size == UNCHANGED {
                unit.is_unchanged
            } else {
                !unit.is_unchanged && unit.merger_size() == size as usize
            }
        })
    }

    /// Display labels for the selected sizes, ascending.
    pub fn labels(&self) -> Vec<String> {
        self.sizes.iter().map(|&size| size_label(size)).collect()
    }
}

impl FromIterator<u32> for MergerFilter {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            sizes: iter.into_iter().filter(|s| *s >= UNCHANGED).collect(),
        }
    }
}

/// Short label for a merger size, as shown in the filter status line.
pub fn size_label(size: u32) -> String {
    if size == UNCHANGED {
        crate::dataset::UNCHANGED_TEXT.to_string()
    } else {
        format!("{} đơn vị", size)
    }
}

/// Longer label used in toggle notices.
pub fn size_description(size: u32) -> String {
    if size == UNCHANGED {
        crate::dataset::UNCHANGED_TEXT.to_string()
    } else {
        format!("Sáp nhập {} đơn vị", size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut filter = MergerFilter::new();
        assert_eq!(filter.state(), FilterState::Unfiltered);

        assert_eq!(filter.toggle(3).unwrap(), Toggle { size: 3, added: true });
        assert!(filter.contains(3));
        assert_eq!(filter.toggle(3).unwrap(), Toggle { size: 3, added: false });
        assert!(filter.is_empty());
        assert_eq!(filter.state(), FilterState::Unfiltered);
    }

    #[test]
    fn toggle_then_clear_walks_the_states() {
        let mut filter = MergerFilter::new();
        filter.toggle(1).unwrap();
        assert_eq!(
            filter.state(),
            FilterState::Filtered(&BTreeSet::from([1]))
        );
        filter.toggle(3).unwrap();
        assert_eq!(
            filter.state(),
            FilterState::Filtered(&BTreeSet::from([1, 3]))
        );
        filter.clear();
        assert_eq!(filter.state(), FilterState::Unfiltered);
    }

    #[test]
    fn rejects_non_positive_sizes() {
        let mut filter = MergerFilter::new();
        assert!(matches!(filter.toggle(0), Err(Error::InvalidMergerSize(0))));
        assert!(matches!(filter.toggle(-2), Err(Error::InvalidMergerSize(-2))));
        assert!(matches!(
            filter.toggle(i64::from(u32::MAX) + 1),
            Err(Error::InvalidMergerSize(_))
        ));
        assert!(filter.is_empty());
    }

    #[test]
    fn matching_is_inclusive_or() {
        let kept = AdministrativeUnit::unchanged("Xã A", "Huế");
        let two = AdministrativeUnit::merged("Phường B", "Huế", ["X", "Y"]);
        let three = AdministrativeUnit::merged("Phường C", "Huế", ["X", "Y", "Z"]);

        let filter: MergerFilter = [1u32, 3].into_iter().collect();
        assert!(filter.matches(&kept));
        assert!(!filter.matches(&two));
        assert!(filter.matches(&three));

        assert!(MergerFilter::new().matches(&two));
    }

    #[test]
    fn size_one_never_selects_single_source_mergers() {
        let odd = AdministrativeUnit::merged("Phường D", "Huế", ["Phường E"]);
        let filter: MergerFilter = [1u32].into_iter().collect();
        assert!(!filter.matches(&odd));
    }

    #[test]
    fn sizes_select_units_of_that_merger_size() {
        let kept = AdministrativeUnit::unchanged("Xã A", "Huế");
        let pair = AdministrativeUnit::merged("Phường B", "Huế", ["X", "Y"]);
        let filter: MergerFilter = [1u32, 2].into_iter().collect();
        assert!(filter.matches(&kept));
        assert!(filter.matches(&pair));

        let filter: MergerFilter = [kept.merger_size() as u32 + 2].into_iter().collect();
        assert!(!filter.matches(&kept));
        assert!(!filter.matches(&pair));
    }

    #[test]
    fn labels_are_sorted() {
        let filter: MergerFilter = [4u32, 1, 2].into_iter().collect();
        assert_eq!(filter.labels(), ["Không sáp nhập", "2 đơn vị", "4 đơn vị"]);
        assert_eq!(size_description(3), "Sáp nhập 3 đơn vị");
    }

    proptest! {
        #[test]
        fn double_toggle_is_identity(start in prop::collection::btree_set(1u32..12, 0..6), size in 1i64..12) {
            let mut filter: MergerFilter = start.iter().copied().collect();
            let before = filter.clone();
            let first = filter.toggle(size).unwrap();
            let second = filter.toggle(size).unwrap();
            prop_assert_ne!(first.added, second.added);
            prop_assert_eq!(filter, before);
        }
    }
}
