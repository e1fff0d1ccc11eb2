//! Visual artifacts for a ranked index.
//!
//! Four static SVG charts plus one self-contained HTML report, all written
//! into the visuals directory.

pub mod html;
pub mod svg;

pub use html::{HtmlReportWriter, REPORT_TITLE};
pub use svg::{bar_chart, heatmap, horizontal_bar_chart, ColumnLabels};

use crate::core::{CountryRow, Result, ResultExt};
use crate::indexer::top_n;
use crate::io;
use std::path::{Path, PathBuf};

pub const BAR_CHART_FILE: &str = "ai_maturity_bar_chart.svg";
pub const HEATMAP_FILE: &str = "ai_maturity_heatmap.svg";
pub const TOP_BAR_CHART_FILE: &str = "ai_maturity_top_10_bar_chart.svg";
pub const TOP_HEATMAP_FILE: &str = "ai_maturity_top_10_heatmap.svg";
pub const REPORT_FILE: &str = "ai_maturity_index.html";

pub const TOP_COUNT: usize = 10;

/// Every file `render_all` produces, in write order.
pub const ARTIFACT_FILES: [&str; 5] = [
    BAR_CHART_FILE,
    HEATMAP_FILE,
    TOP_BAR_CHART_FILE,
    TOP_HEATMAP_FILE,
    REPORT_FILE,
];

/// Write all charts and the report for `rows`, already ranked.
///
/// Returns the written paths.
pub fn render_all(rows: &[CountryRow], visuals_dir: &Path) -> Result<Vec<PathBuf>> {
    io::ensure_dir(visuals_dir)?;
    let top = top_n(rows, TOP_COUNT);

    let charts = [
        (BAR_CHART_FILE, bar_chart(rows, "AI Maturity Index by Country")?),
        (
            HEATMAP_FILE,
            heatmap(
                rows,
                "Heatmap of AI Maturity Factors by Country",
                ColumnLabels::Columns,
            )?,
        ),
        (
            TOP_BAR_CHART_FILE,
            horizontal_bar_chart(top, "Top 10 Countries by AI Maturity Index")?,
        ),
        (
            TOP_HEATMAP_FILE,
            heatmap(
                top,
                "Top 10 Countries: AI Maturity Factors",
                ColumnLabels::Display,
            )?,
        ),
    ];

    let mut written = Vec::with_capacity(ARTIFACT_FILES.len());
    for (name, svg) in charts {
        let path = visuals_dir.join(name);
        io::write_atomic(&path, svg.as_bytes())
            .context(format!("Writing {}", path.display()))?;
        log::info!("Saved {}", path.display());
        written.push(path);
    }

    let report_path = visuals_dir.join(REPORT_FILE);
    let mut report = Vec::new();
    HtmlReportWriter::new(&mut report).write_report(rows)?;
    io::write_atomic(&report_path, &report)
        .context(format!("Writing {}", report_path.display()))?;
    log::info!("Saved {}", report_path.display());
    written.push(report_path);

    Ok(written)
}

/// Artifacts from [`ARTIFACT_FILES`] present in `visuals_dir`.
pub fn existing_artifacts(visuals_dir: &Path) -> Vec<PathBuf> {
    ARTIFACT_FILES
        .iter()
        .map(|name| visuals_dir.join(name))
        .filter(|path| io::file_exists(path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rows(n: usize) -> Vec<CountryRow> {
        (0..n)
            .map(|i| CountryRow {
                country_iso: format!("C{i:02}"),
                internet_users_pct: 50.0 + i as f64,
                gdp_per_capita: 1_000.0 * (i + 1) as f64,
                ai_use_cases_score: 3.0,
                regulation_score: 3.0,
                governance_frameworks_score: 3.0,
                talent_availability_score: 3.0,
                internet_users_pct_normalized: 0.5,
                gdp_per_capita_normalized: 0.5,
                ai_maturity_index: (n - i) as f64 / 10.0,
            })
            .collect()
    }

    #[test]
    fn test_render_all_writes_every_artifact() {
        let dir = TempDir::new().unwrap();
        let visuals = dir.path().join("visuals");
        let written = render_all(&rows(12), &visuals).unwrap();

        assert_eq!(written.len(), ARTIFACT_FILES.len());
        assert_eq!(existing_artifacts(&visuals), written);
    }

    #[test]
    fn test_top_charts_hold_ten_countries() {
        let dir = TempDir::new().unwrap();
        render_all(&rows(12), dir.path()).unwrap();

        let top = std::fs::read_to_string(dir.path().join(TOP_BAR_CHART_FILE)).unwrap();
        assert!(top.contains(">C09</text>"));
        assert!(!top.contains(">C10</text>"));

        let full = std::fs::read_to_string(dir.path().join(BAR_CHART_FILE)).unwrap();
        assert!(full.contains(">C11</text>"));
    }

    #[test]
    fn test_render_empty_index() {
        let dir = TempDir::new().unwrap();
        let written = render_all(&[], dir.path()).unwrap();
        assert_eq!(written.len(), 5);
    }

    #[test]
    fn test_report_replaces_previous_without_temp_leftovers() {
        let dir = TempDir::new().unwrap();
        let report = dir.path().join(REPORT_FILE);
        std::fs::write(&report, "stale").unwrap();

        render_all(&rows(3), dir.path()).unwrap();

        let html = std::fs::read_to_string(&report).unwrap();
        assert!(html.contains("C02"));
        assert!(!html.contains("stale"));
        assert!(!dir.path().join(format!(".{}.tmp", REPORT_FILE)).exists());
    }

    #[test]
    fn test_existing_artifacts_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(existing_artifacts(dir.path()).is_empty());
    }
}
