//! Most-recent-year selection.
//!
//! Raw indicator files hold one row per country per year. The index only
//! uses the latest observation of each country.

use crate::core::{CountryTable, IndicatorRecord};
use serde::Serialize;
use std::collections::HashSet;

/// Counts describing how one raw series was reduced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DedupReport {
    pub input_records: usize,
    /// Records without a value or country code; never selected
    pub skipped_records: usize,
    pub countries: usize,
}

/// Keep, for each country, the record with the greatest year.
///
/// Records are ordered by year descending, equal years keeping their input
/// position, and the first record of each country is kept. The result uses
/// that same order.
pub fn select_most_recent(records: &[IndicatorRecord]) -> Vec<&IndicatorRecord> {
    let mut by_year: Vec<&IndicatorRecord> = records.iter().collect();
    // Stable sort: equal years keep their original relative order
    by_year.sort_by(|a, b| b.year.cmp(&a.year));

    let mut seen = HashSet::new();
    by_year
        .into_iter()
        .filter(|record| seen.insert(record.country_iso.as_str()))
        .collect()
}

/// Reduce a raw series to one value per country.
pub fn latest_values(
    name: &str,
    records: &[IndicatorRecord],
) -> (CountryTable<f64>, DedupReport) {
    let usable: Vec<IndicatorRecord> = records
        .iter()
        .filter(|r| is_usable(r))
        .cloned()
        .collect();
    let skipped_records = records.len() - usable.len();
    if skipped_records > 0 {
        log::debug!(
            "{}: skipped {} records without a value or country code",
            name,
            skipped_records
        );
    }

    let rows = select_most_recent(&usable)
        .into_iter()
        .filter_map(|r| r.value.map(|v| (r.country_iso.clone(), v)))
        .collect::<Vec<_>>();

    let report = DedupReport {
        input_records: records.len(),
        skipped_records,
        countries: rows.len(),
    };
    (CountryTable::from_rows(name, rows), report)
}

fn is_usable(record: &IndicatorRecord) -> bool {
    !record.country_iso.trim().is_empty() && record.value.is_some_and(f64::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(iso: &str, year: i32, value: f64) -> IndicatorRecord {
        IndicatorRecord::new(iso, iso, year, Some(value))
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(select_most_recent(&[]).is_empty());
        let (table, report) = latest_values("gdp_per_capita", &[]);
        assert!(table.is_empty());
        assert_eq!(report, DedupReport::default());
    }

    #[test]
    fn test_keeps_maximum_year_per_country() {
        let records = vec![
            rec("USA", 2019, 60_000.0),
            rec("USA", 2020, 65_000.0),
            rec("DEU", 2021, 50_000.0),
        ];
        let selected = select_most_recent(&records);
        let picked: Vec<(&str, i32)> = selected
            .iter()
            .map(|r| (r.country_iso.as_str(), r.year))
            .collect();
        assert_eq!(picked, vec![("DEU", 2021), ("USA", 2020)]);
    }

    #[test]
    fn test_same_year_tie_keeps_first_in_input_order() {
        let records = vec![rec("FRA", 2020, 1.0), rec("FRA", 2020, 2.0)];
        let selected = select_most_recent(&records);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, Some(1.0));
    }

    #[test]
    fn test_absent_values_are_skipped_before_selection() {
        let records = vec![
            IndicatorRecord::new("Japan", "JPN", 2022, None),
            rec("JPN", 2021, 83.0),
            IndicatorRecord::new("World", "", 2022, Some(66.0)),
        ];
        let (table, report) = latest_values("internet_users_pct", &records);
        assert_eq!(table.get("JPN"), Some(&83.0));
        assert_eq!(table.len(), 1);
        assert_eq!(report.skipped_records, 2);
        assert_eq!(report.countries, 1);
    }

    #[test]
    fn test_non_finite_values_are_skipped() {
        let records = vec![rec("ITA", 2022, f64::NAN), rec("ITA", 2020, 74.0)];
        let (table, _) = latest_values("internet_users_pct", &records);
        assert_eq!(table.get("ITA"), Some(&74.0));
    }
}
