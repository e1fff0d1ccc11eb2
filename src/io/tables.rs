//! CSV file contracts between pipeline stages.
//!
//! | file                         | writer    | reader            |
//! |------------------------------|-----------|-------------------|
//! | raw indicator series         | collector | indexer           |
//! | qualitative scores (opt-in)  | user      | indexer           |
//! | ranked index                 | indexer   | renderer, viewer  |

use super::{file_exists, write_atomic};
use crate::core::{CountryRow, CountryTable, Error, IndicatorRecord, QualitativeScores, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

pub const INDICATOR_COLUMNS: [&str; 4] = ["country_name", "country_iso", "year", "value"];

pub const SCORE_COLUMNS: [&str; 5] = [
    "country_iso",
    "ai_use_cases_score",
    "regulation_score",
    "governance_frameworks_score",
    "talent_availability_score",
];

pub const INDEX_COLUMNS: [&str; 10] = [
    "country_iso",
    "internet_users_pct",
    "gdp_per_capita",
    "ai_use_cases_score",
    "regulation_score",
    "governance_frameworks_score",
    "talent_availability_score",
    "internet_users_pct_normalized",
    "gdp_per_capita_normalized",
    "ai_maturity_index",
];

/// Read one raw indicator series written by `collect`.
pub fn read_indicator_records(path: &Path) -> Result<Vec<IndicatorRecord>> {
    let reader = open_reader(path, "collect")?;
    read_all(reader, path, &INDICATOR_COLUMNS)
}

pub fn write_indicator_records(path: &Path, records: &[IndicatorRecord]) -> Result<()> {
    write_all(path, &INDICATOR_COLUMNS, records)
}

/// Read the ranked index written by `index`, skipping rows without a country code.
pub fn read_index_rows(path: &Path) -> Result<Vec<CountryRow>> {
    let reader = open_reader(path, "index")?;
    let mut rows: Vec<CountryRow> = read_all(reader, path, &INDEX_COLUMNS)?;
    let before = rows.len();
    rows.retain(|row| !row.country_iso.trim().is_empty());
    if rows.len() < before {
        log::debug!(
            "Skipped {} index rows without a country code in {}",
            before - rows.len(),
            path.display()
        );
    }
    Ok(rows)
}

pub fn write_index_rows(path: &Path, rows: &[CountryRow]) -> Result<()> {
    write_all(path, &INDEX_COLUMNS, rows)
}

#[derive(Debug, Serialize, Deserialize)]
struct ScoreRecord {
    country_iso: String,
    ai_use_cases_score: f64,
    regulation_score: f64,
    governance_frameworks_score: f64,
    talent_availability_score: f64,
}

/// Read a prepared qualitative score table.
///
/// Every score must be a finite number and each country may appear once;
/// the first row that breaks either rule fails with its line number.
pub fn read_qualitative_scores(path: &Path) -> Result<CountryTable<QualitativeScores>> {
    if !file_exists(path) {
        return Err(Error::Configuration(format!(
            "Scores file not found: {}",
            path.display()
        )));
    }
    let mut reader = csv::Reader::from_path(path)?;
    check_headers(&mut reader, path, &SCORE_COLUMNS)?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    for result in reader.records() {
        let record = result.map_err(|e| record_error(path, &e))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let r: ScoreRecord = record
            .deserialize(Some(&headers))
            .map_err(|e| Error::invalid_record(path, line, e.to_string()))?;
        let scores = QualitativeScores {
            ai_use_cases_score: r.ai_use_cases_score,
            regulation_score: r.regulation_score,
            governance_frameworks_score: r.governance_frameworks_score,
            talent_availability_score: r.talent_availability_score,
        };
        if let Some((column, value)) = first_non_finite(&scores) {
            return Err(Error::invalid_record(
                path,
                line,
                format!("{} for {} must be a finite number, got {}", column, r.country_iso, value),
            ));
        }
        if !seen.insert(r.country_iso.clone()) {
            return Err(Error::invalid_record(
                path,
                line,
                format!("duplicate country code {}", r.country_iso),
            ));
        }
        rows.push((r.country_iso, scores));
    }
    Ok(CountryTable::from_rows("qualitative_scores", rows))
}

fn first_non_finite(scores: &QualitativeScores) -> Option<(&'static str, f64)> {
    [
        (SCORE_COLUMNS[1], scores.ai_use_cases_score),
        (SCORE_COLUMNS[2], scores.regulation_score),
        (SCORE_COLUMNS[3], scores.governance_frameworks_score),
        (SCORE_COLUMNS[4], scores.talent_availability_score),
    ]
    .into_iter()
    .find(|(_, value)| !value.is_finite())
}

fn open_reader(path: &Path, producer: &str) -> Result<csv::Reader<File>> {
    if !file_exists(path) {
        return Err(Error::missing_input(path, producer));
    }
    Ok(csv::Reader::from_path(path)?)
}

fn read_all<T: DeserializeOwned>(
    mut reader: csv::Reader<File>,
    path: &Path,
    required: &[&str],
) -> Result<Vec<T>> {
    check_headers(&mut reader, path, required)?;
    reader
        .deserialize::<T>()
        .map(|row| row.map_err(|e| record_error(path, &e)))
        .collect()
}

fn check_headers(reader: &mut csv::Reader<File>, path: &Path, required: &[&str]) -> Result<()> {
    let headers = reader.headers()?;
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h.trim() == *column))
        .collect();
    if !missing.is_empty() {
        return Err(Error::invalid_record(
            path,
            1,
            format!("missing column(s): {}", missing.join(", ")),
        ));
    }
    Ok(())
}

fn record_error(path: &Path, error: &csv::Error) -> Error {
    let line = error.position().map(|p| p.line()).unwrap_or(0);
    Error::invalid_record(path, line, error.to_string())
}

fn write_all<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    write_atomic(path, &bytes)
}
