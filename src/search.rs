//! Search index and query engine.
//!
//! The index is built once from the dataset's flat unit list and never
//! changes afterwards. Each entry pairs a unit with its folded search key
//! (`new_name province old_units...`). A query is folded the same way, matched
//! by substring, ranked in three tiers and cut to [`MAX_RESULTS`].

use crate::dataset::AdministrativeUnit;
use crate::normalize::normalize;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

/// Upper bound on hits returned by one query.
pub const MAX_RESULTS: usize = 10;

/// Trimmed queries shorter than this are not searched.
pub const MIN_QUERY_CHARS: usize = 2;

/// How well a hit matched. Higher sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Relevance {
    /// Matched only through the province or old-unit names
    Elsewhere = 0,
    /// New name contains the query
    NameContains = 1,
    /// New name starts with the query
    NamePrefix = 2,
}

#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub unit: Arc<AdministrativeUnit>,
    /// Folded `new_name province old_units...`
    pub key: String,
    name_key: String,
}

impl IndexEntry {
    fn new(unit: &Arc<AdministrativeUnit>) -> Self {
        let mut text = format!("{} {}", unit.new_name, unit.province);
        if !unit.old_units.is_empty() {
            text.push(' ');
            text.push_str(&unit.old_units.join(" "));
        }

        Self {
            unit: Arc::clone(unit),
            key: normalize(&text),
            name_key: normalize(&unit.new_name),
        }
    }

    fn relevance(&self, query: &str) -> Relevance {
        if self.name_key.starts_with(query) {
            Relevance::NamePrefix
        } else if self.name_key.contains(query) {
            Relevance::NameContains
        } else {
            Relevance::Elsewhere
        }
    }
}

/// A ranked search result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub unit: Arc<AdministrativeUnit>,
    pub relevance: Relevance,
}

/// What the caller should show for a raw query string.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// Query too short after trimming; hide the result list.
    NoQuery,
    /// Query ran and matched nothing.
    NoResults,
    Hits(Vec<SearchHit>),
}

#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    /// Build one entry per unit, in dataset order.
    pub fn build(units: &[Arc<AdministrativeUnit>]) -> Self {
        let entries: Vec<IndexEntry> = units.par_iter().map(IndexEntry::new).collect();
        log::debug!("Built search index with {} entries", entries.len());
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Entries whose key contains the folded query, before ranking.
    pub fn candidates<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a IndexEntry> + 'a {
        let query = normalize(query);
        self.entries
            .iter()
            .filter(move |entry| entry.key.contains(&query))
    }

    /// Rank matching units and keep the best [`MAX_RESULTS`].
    ///
    /// Ties keep dataset order. The query is folded but not trimmed; use
    /// [`SearchIndex::lookup`] for raw user input.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let query = normalize(query);

        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .filter(|entry| entry.key.contains(&query))
            .map(|entry| SearchHit {
                unit: Arc::clone(&entry.unit),
                relevance: entry.relevance(&query),
            })
            .collect();

        // stable: equal relevance keeps index order
        hits.sort_by(|a, b| b.relevance.cmp(&a.relevance));
        hits.truncate(MAX_RESULTS);
        hits
    }

    /// Apply the input contract (trim, minimum length) and search.
    pub fn lookup(&self, raw: &str) -> SearchOutcome {
        let query = raw.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return SearchOutcome::NoQuery;
        }

        let hits = self.search(query);
        log::trace!("Query {:?} returned {} hits", query, hits.len());
        if hits.is_empty() {
            SearchOutcome::NoResults
        } else {
            SearchOutcome::Hits(hits)
        }
    }
}
