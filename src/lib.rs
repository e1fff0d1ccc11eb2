//! AI maturity index pipeline.
//!
//! Collects public economic indicators per country, combines them with
//! qualitative scores into a weighted composite index, ranks countries by
//! it, and renders the result as charts, an HTML report, and tables.
//!
//! The index computation is the pure function [`indexer::build_index`];
//! the stages around it communicate through the CSV files in [`io`].

pub mod cli;
pub mod collector;
pub mod commands;
pub mod config;
pub mod core;
pub mod indexer;
pub mod io;
pub mod observability;
pub mod render;
pub mod viewer;

pub use crate::core::{
    CountryRow, CountryTable, Error, Factor, Indicator, IndicatorRecord, QualitativeScores,
    Result,
};
pub use crate::indexer::{build_index, IndexOutput, IndexReport, IndexSettings, ScoreSource};
