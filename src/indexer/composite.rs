//! Weighted composite score.
//!
//! Two of the five factors are normalized to [0, 1]; the three qualitative
//! scores keep their native 2-5 scale. The index is therefore not bounded
//! by 1 even though the weights sum to 1.

use crate::config::IndexWeights;
use crate::core::{CountryRow, Factor};

/// Weighted sum of the five index factors of one row.
pub fn composite_score(row: &CountryRow, weights: &IndexWeights) -> f64 {
    Factor::ALL
        .iter()
        .map(|factor| row.factor(*factor) * weights.weight(*factor))
        .sum()
}

/// Fill `ai_maturity_index` on every row.
pub fn apply_composite(rows: &mut [CountryRow], weights: &IndexWeights) {
    for row in rows.iter_mut() {
        row.ai_maturity_index = composite_score(row, weights);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(internet_n: f64, gdp_n: f64, use_cases: f64, regulation: f64, governance: f64) -> CountryRow {
        CountryRow {
            country_iso: "TST".into(),
            internet_users_pct: 0.0,
            gdp_per_capita: 0.0,
            ai_use_cases_score: use_cases,
            regulation_score: regulation,
            governance_frameworks_score: governance,
            talent_availability_score: 5.0,
            internet_users_pct_normalized: internet_n,
            gdp_per_capita_normalized: gdp_n,
            ai_maturity_index: 0.0,
        }
    }

    #[test]
    fn test_weighted_sum() {
        let score = composite_score(&row(1.0, 0.0, 4.0, 3.0, 2.0), &IndexWeights::default());
        let expected = 0.15 + 0.0 + 4.0 * 0.25 + 3.0 * 0.25 + 2.0 * 0.20;
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_talent_score_is_not_weighted() {
        let weights = IndexWeights::default();
        let mut a = row(0.5, 0.5, 3.0, 3.0, 3.0);
        let base = composite_score(&a, &weights);
        a.talent_availability_score = 2.0;
        assert_eq!(composite_score(&a, &weights), base);
    }

    #[test]
    fn test_index_can_exceed_one() {
        let score = composite_score(&row(1.0, 1.0, 5.0, 5.0, 5.0), &IndexWeights::default());
        assert!(score > 1.0);
        assert!((score - 3.8).abs() < 1e-9);
    }

    #[test]
    fn test_apply_composite_fills_rows() {
        let mut rows = vec![row(0.0, 0.0, 2.0, 2.0, 2.0), row(1.0, 1.0, 2.0, 2.0, 2.0)];
        apply_composite(&mut rows, &IndexWeights::default());
        assert!((rows[0].ai_maturity_index - 1.4).abs() < 1e-9);
        assert!((rows[1].ai_maturity_index - 1.7).abs() < 1e-9);
    }
}
