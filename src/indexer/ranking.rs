//! Canonical output order.

use crate::core::CountryRow;

/// Sort by `ai_maturity_index`, highest first.
///
/// The sort is stable: rows with equal scores keep their merged-table order.
pub fn rank_by_index(rows: &mut [CountryRow]) {
    rows.sort_by(|a, b| b.ai_maturity_index.total_cmp(&a.ai_maturity_index));
}

/// First `n` rows of an already ranked table.
pub fn top_n(rows: &[CountryRow], n: usize) -> &[CountryRow] {
    &rows[..n.min(rows.len())]
}
