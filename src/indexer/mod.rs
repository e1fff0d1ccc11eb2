//! Index construction.
//!
//! `build_index` is the whole indexer as one pure function:
//!
//! 1. reduce each raw series to its most recent value per country
//! 2. inner-join internet usage with GDP per capita
//! 3. attach qualitative scores (mocked or prepared), inner-joined
//! 4. min-max normalize the two economic fields over the joined set
//! 5. compute the weighted composite
//! 6. rank, highest index first
//!
//! All file access happens in the commands that call it.

pub mod composite;
pub mod dedup;
pub mod merge;
pub mod normalize;
pub mod ranking;
pub mod scores;

pub use composite::{apply_composite, composite_score};
pub use dedup::{latest_values, select_most_recent, DedupReport};
pub use merge::{inner_join, inner_join_all, DroppedCountries, JoinReport};
pub use normalize::{min_max_normalize, NormalizationReport};
pub use ranking::{rank_by_index, top_n};
pub use scores::{MockScoreGenerator, ScoreSource};

use crate::config::{IndexWeights, NormalizationConfig};
use crate::core::{CountryRow, Indicator, IndicatorRecord};
use serde::Serialize;

/// Audit trail of one index run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexReport {
    pub internet_users: DedupReport,
    pub gdp_per_capita: DedupReport,
    pub economic_join: JoinReport,
    pub scores_join: JoinReport,
    pub normalization: Vec<NormalizationReport>,
    pub rows: usize,
}

impl IndexReport {
    /// Countries dropped by either join
    pub fn dropped_countries(&self) -> usize {
        self.economic_join.dropped_total() + self.scores_join.dropped_total()
    }

    pub fn degenerate_fields(&self) -> Vec<&str> {
        self.normalization
            .iter()
            .filter(|n| n.degenerate)
            .map(|n| n.field.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexOutput {
    /// Ranked rows, highest index first
    pub rows: Vec<CountryRow>,
    pub report: IndexReport,
}

/// Settings that shape an index run.
#[derive(Debug, Clone, Default)]
pub struct IndexSettings {
    pub weights: IndexWeights,
    pub normalization: NormalizationConfig,
}

/// Build the ranked index table from raw indicator records.
pub fn build_index(
    internet_users: &[IndicatorRecord],
    gdp_per_capita: &[IndicatorRecord],
    scores: ScoreSource,
    settings: &IndexSettings,
) -> IndexOutput {
    let (internet, internet_report) =
        latest_values(Indicator::InternetUsers.column(), internet_users);
    let (gdp, gdp_report) = latest_values(Indicator::GdpPerCapita.column(), gdp_per_capita);

    let (economic, economic_join) = inner_join(&internet, &gdp);
    economic_join.log();

    let countries: Vec<&str> = economic.iter().map(|(iso, _)| iso).collect();
    let qualitative = scores.into_table(&countries);
    let (merged, scores_join) = inner_join(&economic, &qualitative);
    scores_join.log();

    let mut rows: Vec<CountryRow> = merged
        .into_rows()
        .into_iter()
        .map(|(country_iso, ((internet_users_pct, gdp_per_capita), s))| CountryRow {
            country_iso,
            internet_users_pct,
            gdp_per_capita,
            ai_use_cases_score: s.ai_use_cases_score,
            regulation_score: s.regulation_score,
            governance_frameworks_score: s.governance_frameworks_score,
            talent_availability_score: s.talent_availability_score,
            internet_users_pct_normalized: 0.0,
            gdp_per_capita_normalized: 0.0,
            ai_maturity_index: 0.0,
        })
        .collect();

    let normalization = normalize_economic_fields(&mut rows, &settings.normalization);
    apply_composite(&mut rows, &settings.weights);
    rank_by_index(&mut rows);

    log::info!(
        "Indexed {} countries ({} dropped by joins)",
        rows.len(),
        economic_join.dropped_total() + scores_join.dropped_total()
    );

    let report = IndexReport {
        internet_users: internet_report,
        gdp_per_capita: gdp_report,
        economic_join,
        scores_join,
        normalization,
        rows: rows.len(),
    };
    IndexOutput { rows, report }
}

fn normalize_economic_fields(
    rows: &mut [CountryRow],
    config: &NormalizationConfig,
) -> Vec<NormalizationReport> {
    let fallback = config.degenerate_fallback;

    let internet: Vec<f64> = rows.iter().map(|r| r.internet_users_pct).collect();
    let (internet_n, internet_report) =
        min_max_normalize(Indicator::InternetUsers.column(), &internet, fallback);

    let gdp: Vec<f64> = rows.iter().map(|r| r.gdp_per_capita).collect();
    let (gdp_n, gdp_report) = min_max_normalize(Indicator::GdpPerCapita.column(), &gdp, fallback);

    for ((row, i), g) in rows.iter_mut().zip(internet_n).zip(gdp_n) {
        row.internet_users_pct_normalized = i;
        row.gdp_per_capita_normalized = g;
    }

    vec![internet_report, gdp_report]
}
