//! Raw data collection.
//!
//! Downloads the indicator series the index is built from and saves them
//! as CSV in the raw data directory. A failed download is logged and
//! reported in the summary but does not abort the other downloads; the
//! indexer detects the gap as a missing input file.

pub mod retry;
pub mod world_bank;

pub use world_bank::{parse_page, to_indicator_records, ApiRecord, Page, PageMeta, WorldBankClient};

use crate::config::{AppConfig, PathsConfig};
use crate::core::{Indicator, Result};
use crate::io;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Reports downloaded by hand; recognised but not parsed.
const MANUAL_REPORTS: [&str; 2] = ["imf_gfsr.pdf", "mckinsey_banking_report.pdf"];

/// Result of collecting one indicator.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Saved {
        path: PathBuf,
        records: usize,
        countries: usize,
    },
    /// The API returned no usable records; nothing was written
    Empty,
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSummary {
    pub indicators: Vec<(Indicator, FetchOutcome)>,
    pub policy_page: Option<PathBuf>,
    pub manual_reports: Vec<PathBuf>,
}

impl CollectionSummary {
    pub fn all_saved(&self) -> bool {
        self.indicators
            .iter()
            .all(|(_, outcome)| matches!(outcome, FetchOutcome::Saved { .. }))
    }
}

pub struct Collector {
    client: WorldBankClient,
    paths: PathsConfig,
}

impl Collector {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            client: WorldBankClient::new(config.collector.clone())?,
            paths: config.paths.clone(),
        })
    }

    pub async fn run(&self) -> Result<CollectionSummary> {
        io::ensure_dir(&self.paths.raw_dir)?;

        let policy_page = self.save_policy_page().await;

        let mut indicators = Vec::with_capacity(Indicator::ALL.len());
        for indicator in Indicator::ALL {
            let outcome = self.collect_indicator(indicator).await;
            indicators.push((indicator, outcome));
        }

        Ok(CollectionSummary {
            indicators,
            policy_page,
            manual_reports: self.find_manual_reports(),
        })
    }

    async fn collect_indicator(&self, indicator: Indicator) -> FetchOutcome {
        let records = match self.client.fetch_indicator(indicator).await {
            Ok(records) => records,
            Err(e) => {
                log::error!("Failed to fetch {}: {}", indicator.code(), e);
                return FetchOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        if records.is_empty() {
            return FetchOutcome::Empty;
        }

        let path = self.paths.indicator_file(indicator);
        if let Err(e) = io::write_indicator_records(&path, &records) {
            log::error!("Failed to write {}: {}", path.display(), e);
            return FetchOutcome::Failed {
                reason: e.to_string(),
            };
        }

        let countries = records
            .iter()
            .map(|r| r.country_iso.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        FetchOutcome::Saved {
            path,
            records: records.len(),
            countries,
        }
    }

    async fn save_policy_page(&self) -> Option<PathBuf> {
        let text = match self.client.fetch_policy_page().await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Could not fetch policy page: {}", e);
                return None;
            }
        };
        let path = self.paths.policy_page_file();
        match io::write_file(&path, &text) {
            Ok(()) => Some(path),
            Err(e) => {
                log::warn!("Could not save policy page to {}: {}", path.display(), e);
                None
            }
        }
    }

    fn find_manual_reports(&self) -> Vec<PathBuf> {
        MANUAL_REPORTS
            .iter()
            .map(|name| self.paths.raw_dir.join(name))
            .filter(|path| {
                let present = io::file_exists(path);
                if present {
                    log::info!("Found {}; PDF text extraction is not supported", path.display());
                } else {
                    log::debug!("{} not found", path.display());
                }
                present
            })
            .collect()
    }
}
