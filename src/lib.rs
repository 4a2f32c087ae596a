//! Search and filtering over the 2025 Vietnamese ward/commune merger dataset.
//!
//! - [`normalize`]: accent folding shared by indexing and queries
//! - [`search`]: the search index and ranked substring queries
//! - [`filter`] / [`aggregate`]: merger-size filter and per-province summaries
//! - [`session::Dashboard`]: one loaded dataset with its index and filter
//! - [`export`] / [`convert`]: CSV out, CSV → JSON dataset in
//! - [`stats`] / [`markers`]: chart and map data

pub mod aggregate;
pub mod convert;
pub mod dataset;
pub mod error;
pub mod export;
pub mod filter;
pub mod markers;
pub mod normalize;
pub mod notice;
pub mod output;
pub mod search;
pub mod session;
pub mod stats;
pub mod utils;

pub use dataset::{AdministrativeUnit, Dataset, Province};
pub use error::{Error, Result};
pub use session::Dashboard;
