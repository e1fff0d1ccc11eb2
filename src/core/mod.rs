//! Data model shared by every pipeline stage.
//!
//! Raw indicator series come in as [`IndicatorRecord`]s, are reduced to one
//! value per country in a [`CountryTable`], and leave the indexer as ranked
//! [`CountryRow`]s whose field order is the output CSV column order.

pub mod errors;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub use errors::{Error, Result, ResultExt};

/// Economic indicators pulled from the statistics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Individuals using the Internet (% of population)
    InternetUsers,
    /// GDP per capita (constant US$)
    GdpPerCapita,
}

impl Indicator {
    pub const ALL: [Indicator; 2] = [Indicator::InternetUsers, Indicator::GdpPerCapita];

    /// World Bank indicator code
    pub const fn code(self) -> &'static str {
        match self {
            Self::InternetUsers => "IT.NET.USER.ZS",
            Self::GdpPerCapita => "NY.GDP.PCAP.KD",
        }
    }

    /// Raw CSV file name written by the collector
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::InternetUsers => "world_bank_internet_users.csv",
            Self::GdpPerCapita => "world_bank_gdp_per_capita.csv",
        }
    }

    /// Column name the value takes after merging
    pub const fn column(self) -> &'static str {
        match self {
            Self::InternetUsers => "internet_users_pct",
            Self::GdpPerCapita => "gdp_per_capita",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// One observation of one indicator for one country and year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub country_name: String,
    pub country_iso: String,
    pub year: i32,
    pub value: Option<f64>,
}

impl IndicatorRecord {
    pub fn new(
        country_name: impl Into<String>,
        country_iso: impl Into<String>,
        year: i32,
        value: Option<f64>,
    ) -> Self {
        Self {
            country_name: country_name.into(),
            country_iso: country_iso.into(),
            year,
            value,
        }
    }
}

/// Single-value-per-country table keyed by ISO code.
///
/// Row order is significant: joins keep the left table's order and ranking
/// ties fall back to it.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryTable<T> {
    name: String,
    rows: Vec<(String, T)>,
}

impl<T> CountryTable<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn from_rows(name: impl Into<String>, rows: Vec<(String, T)>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn push(&mut self, country_iso: impl Into<String>, value: T) {
        self.rows.push((country_iso.into(), value));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.rows.iter().map(|(iso, value)| (iso.as_str(), value))
    }

    pub fn get(&self, country_iso: &str) -> Option<&T> {
        self.rows
            .iter()
            .find(|(iso, _)| iso == country_iso)
            .map(|(_, value)| value)
    }

    /// Set of country codes present in the table
    pub fn codes(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|(iso, _)| iso.as_str()).collect()
    }

    pub fn into_rows(self) -> Vec<(String, T)> {
        self.rows
    }
}

/// Qualitative assessment scores, nominally on a 2.0-5.0 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualitativeScores {
    pub ai_use_cases_score: f64,
    pub regulation_score: f64,
    pub governance_frameworks_score: f64,
    /// Carried into the output but not weighted into the index
    pub talent_availability_score: f64,
}

/// Final per-country row. Field order is the output CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRow {
    pub country_iso: String,
    pub internet_users_pct: f64,
    pub gdp_per_capita: f64,
    pub ai_use_cases_score: f64,
    pub regulation_score: f64,
    pub governance_frameworks_score: f64,
    pub talent_availability_score: f64,
    pub internet_users_pct_normalized: f64,
    pub gdp_per_capita_normalized: f64,
    pub ai_maturity_index: f64,
}

impl CountryRow {
    pub fn factor(&self, factor: Factor) -> f64 {
        match factor {
            Factor::InternetUsers => self.internet_users_pct_normalized,
            Factor::GdpPerCapita => self.gdp_per_capita_normalized,
            Factor::AiUseCases => self.ai_use_cases_score,
            Factor::Regulation => self.regulation_score,
            Factor::GovernanceFrameworks => self.governance_frameworks_score,
        }
    }
}

/// The five inputs of the composite index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    InternetUsers,
    GdpPerCapita,
    AiUseCases,
    Regulation,
    GovernanceFrameworks,
}

impl Factor {
    pub const ALL: [Factor; 5] = [
        Factor::InternetUsers,
        Factor::GdpPerCapita,
        Factor::AiUseCases,
        Factor::Regulation,
        Factor::GovernanceFrameworks,
    ];

    /// Output column the factor is read from
    pub const fn column(self) -> &'static str {
        match self {
            Self::InternetUsers => "internet_users_pct_normalized",
            Self::GdpPerCapita => "gdp_per_capita_normalized",
            Self::AiUseCases => "ai_use_cases_score",
            Self::Regulation => "regulation_score",
            Self::GovernanceFrameworks => "governance_frameworks_score",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::InternetUsers => "Internet Usage",
            Self::GdpPerCapita => "GDP per Capita",
            Self::AiUseCases => "AI Use Cases",
            Self::Regulation => "Regulation",
            Self::GovernanceFrameworks => "Governance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_table_preserves_insertion_order() {
        let mut table = CountryTable::new("gdp_per_capita");
        table.push("USA", 65_000.0);
        table.push("DEU", 50_000.0);

        let order: Vec<&str> = table.iter().map(|(iso, _)| iso).collect();
        assert_eq!(order, vec!["USA", "DEU"]);
        assert_eq!(table.get("DEU"), Some(&50_000.0));
        assert_eq!(table.get("FRA"), None);
    }

    #[test]
    fn test_factor_columns_match_row_fields() {
        let row = CountryRow {
            country_iso: "USA".into(),
            internet_users_pct: 90.0,
            gdp_per_capita: 65_000.0,
            ai_use_cases_score: 3.1,
            regulation_score: 3.2,
            governance_frameworks_score: 3.3,
            talent_availability_score: 4.9,
            internet_users_pct_normalized: 0.1,
            gdp_per_capita_normalized: 0.2,
            ai_maturity_index: 0.0,
        };
        let values: Vec<f64> = Factor::ALL.iter().map(|f| row.factor(*f)).collect();
        assert_eq!(values, vec![0.1, 0.2, 3.1, 3.2, 3.3]);
    }

    #[test]
    fn test_indicator_codes() {
        assert_eq!(Indicator::InternetUsers.code(), "IT.NET.USER.ZS");
        assert_eq!(Indicator::GdpPerCapita.code(), "NY.GDP.PCAP.KD");
        assert_eq!(Indicator::GdpPerCapita.to_string(), "gdp_per_capita");
    }
}
