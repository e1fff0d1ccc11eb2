//! Presentation of a computed index.
//!
//! Writers take an [`IndexView`] (the ranked rows to show plus the visual
//! artifacts found on disk) and print it in one of three formats.

pub mod json;
pub mod markdown;
pub mod terminal;

pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;

use crate::core::{CountryRow, Factor, Result};
use crate::indexer::top_n;
use crate::render;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewFormat {
    Terminal,
    Markdown,
    Json,
}

pub trait IndexWriter {
    fn write_index(&mut self, view: &IndexView<'_>) -> Result<()>;
}

/// Relative standing of a country within the loaded index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// Index values splitting the full ranking into thirds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Terciles {
    pub lower: f64,
    pub upper: f64,
}

impl Terciles {
    /// Cut points at the 1/3 and 2/3 positions of the ascending values.
    pub fn from_rows(rows: &[CountryRow]) -> Self {
        let mut values: Vec<f64> = rows.iter().map(|r| r.ai_maturity_index).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        let at = |fraction: f64| -> f64 {
            if values.is_empty() {
                return 0.0;
            }
            let index = ((values.len() - 1) as f64 * fraction).round() as usize;
            values.get(index).copied().unwrap_or(0.0)
        };
        Self {
            lower: at(1.0 / 3.0),
            upper: at(2.0 / 3.0),
        }
    }

    pub fn tier(&self, value: f64) -> Tier {
        if value >= self.upper {
            Tier::High
        } else if value >= self.lower {
            Tier::Medium
        } else {
            Tier::Low
        }
    }
}

/// What a writer shows.
#[derive(Debug, Clone)]
pub struct IndexView<'a> {
    /// Rows to print, highest index first
    pub rows: &'a [CountryRow],
    /// Countries in the loaded index, before any limit
    pub total: usize,
    pub terciles: Terciles,
    pub visuals: Vec<PathBuf>,
}

impl<'a> IndexView<'a> {
    /// View over `rows`, optionally limited to the first `top`.
    ///
    /// Tiers are computed over all rows so a limit does not shift them.
    pub fn new(rows: &'a [CountryRow], top: Option<usize>) -> Self {
        let shown = match top {
            Some(n) => top_n(rows, n),
            None => rows,
        };
        Self {
            rows: shown,
            total: rows.len(),
            terciles: Terciles::from_rows(rows),
            visuals: Vec::new(),
        }
    }

    pub fn with_visuals_from(mut self, visuals_dir: &Path) -> Self {
        self.visuals = render::existing_artifacts(visuals_dir);
        self
    }

    pub fn is_truncated(&self) -> bool {
        self.rows.len() < self.total
    }
}

/// One line per weighted factor, for legends.
pub fn factor_legend(weights: &crate::config::IndexWeights) -> Vec<String> {
    Factor::ALL
        .iter()
        .map(|f| format!("{} ({:.0}%)", f.display_name(), weights.weight(*f) * 100.0))
        .collect()
}

pub fn create_writer<'w>(
    format: ViewFormat,
    out: Box<dyn Write + 'w>,
    legend: Vec<String>,
) -> Box<dyn IndexWriter + 'w> {
    match format {
        ViewFormat::Terminal => Box::new(TerminalWriter::new(out).with_legend(legend)),
        ViewFormat::Markdown => Box::new(MarkdownWriter::new(out).with_legend(legend)),
        ViewFormat::Json => Box::new(JsonWriter::new(out)),
    }
}

#[cfg(test)]
pub(crate) fn sample_row(iso: &str, index: f64) -> CountryRow {
    CountryRow {
        country_iso: iso.into(),
        internet_users_pct: 80.0,
        gdp_per_capita: 30_000.0,
        ai_use_cases_score: 3.5,
        regulation_score: 3.0,
        governance_frameworks_score: 4.0,
        talent_availability_score: 2.5,
        internet_users_pct_normalized: 0.6,
        gdp_per_capita_normalized: 0.4,
        ai_maturity_index: index,
    }
}
