//! Inner joins over per-country tables.
//!
//! A country missing from any joined table is dropped; nothing is imputed.
//! Dropped codes are counted per table so a run can be audited.

use crate::core::CountryTable;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Countries a join dropped from one input table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedCountries {
    pub table: String,
    pub countries: Vec<String>,
}

impl DroppedCountries {
    pub fn count(&self) -> usize {
        self.countries.len()
    }
}

/// Outcome of one inner join.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JoinReport {
    pub matched: usize,
    pub dropped: Vec<DroppedCountries>,
}

impl JoinReport {
    pub fn dropped_total(&self) -> usize {
        self.dropped.iter().map(DroppedCountries::count).sum()
    }

    /// Log dropped counts at warn level when any country was dropped.
    pub fn log(&self) {
        for dropped in self.dropped.iter().filter(|d| d.count() > 0) {
            log::warn!(
                "Inner join dropped {} countries only present in {}",
                dropped.count(),
                dropped.table
            );
            log::debug!("Dropped from {}: {}", dropped.table, dropped.countries.join(", "));
        }
    }

    fn build<'a>(
        matched: usize,
        kept: &BTreeSet<&'a str>,
        tables: impl IntoIterator<Item = (&'a str, BTreeSet<&'a str>)>,
    ) -> Self {
        let dropped = tables
            .into_iter()
            .map(|(name, codes)| DroppedCountries {
                table: name.to_string(),
                countries: codes
                    .difference(kept)
                    .map(|code| (*code).to_string())
                    .collect(),
            })
            .collect();
        Self { matched, dropped }
    }
}

/// Join two tables on country code, keeping the left table's row order.
pub fn inner_join<L: Clone, R: Clone>(
    left: &CountryTable<L>,
    right: &CountryTable<R>,
) -> (CountryTable<(L, R)>, JoinReport) {
    let right_index = first_occurrence_index(right);

    let mut joined = CountryTable::new(format!("{}+{}", left.name(), right.name()));
    for (iso, value) in left.iter() {
        if let Some(other) = right_index.get(iso) {
            joined.push(iso, (value.clone(), (*other).clone()));
        }
    }

    let kept = joined.codes();
    let report = JoinReport::build(
        joined.len(),
        &kept,
        [(left.name(), left.codes()), (right.name(), right.codes())],
    );
    (joined, report)
}

/// Join any number of numeric tables at once.
///
/// Each output row carries one value per input table, in input order. The
/// row order follows the first table.
pub fn inner_join_all(tables: &[CountryTable<f64>]) -> (CountryTable<Vec<f64>>, JoinReport) {
    let Some((first, rest)) = tables.split_first() else {
        return (CountryTable::new("empty"), JoinReport::default());
    };

    let indexes: Vec<HashMap<&str, &f64>> = rest.iter().map(first_occurrence_index).collect();
    let name = tables
        .iter()
        .map(CountryTable::name)
        .collect::<Vec<_>>()
        .join("+");

    let mut joined = CountryTable::new(name);
    for (iso, value) in first.iter() {
        let others: Option<Vec<f64>> = indexes
            .iter()
            .map(|index| index.get(iso).map(|v| **v))
            .collect();
        if let Some(others) = others {
            let mut values = Vec::with_capacity(tables.len());
            values.push(*value);
            values.extend(others);
            joined.push(iso, values);
        }
    }

    let kept = joined.codes();
    let report = JoinReport::build(
        joined.len(),
        &kept,
        tables.iter().map(|t| (t.name(), t.codes())),
    );
    (joined, report)
}

fn first_occurrence_index<T>(table: &CountryTable<T>) -> HashMap<&str, &T> {
    let mut index = HashMap::with_capacity(table.len());
    for (iso, value) in table.iter() {
        index.entry(iso).or_insert(value);
    }
    index
}
