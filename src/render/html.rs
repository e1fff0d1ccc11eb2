use super::svg::{self, ColumnLabels};
use crate::core::{CountryRow, Result};
use chrono::{DateTime, Local};
use html_escape::encode_text;
use std::fmt::Write as _;
use std::io::Write;

pub const REPORT_TITLE: &str = "AI Maturity Index";

/// Self-contained dashboard: a sortable ranking table, the full-set charts
/// inlined as SVG, and the rows as embedded JSON.
pub struct HtmlReportWriter<W: Write> {
    writer: W,
    template: &'static str,
    generated: DateTime<Local>,
}

impl<W: Write> HtmlReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            template: include_str!("templates/report.html"),
            generated: Local::now(),
        }
    }

    /// Fix the timestamp printed in the report header.
    pub fn with_timestamp(mut self, generated: DateTime<Local>) -> Self {
        self.generated = generated;
        self
    }

    pub fn write_report(&mut self, rows: &[CountryRow]) -> Result<()> {
        let html = self.render_html(rows)?;
        self.writer.write_all(html.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn render_html(&self, rows: &[CountryRow]) -> Result<String> {
        let json_data = serde_json::to_string(rows)?;
        let bar_chart = svg::bar_chart(rows, "AI Maturity Index by Country")?;
        let heatmap = svg::heatmap(
            rows,
            "Heatmap of AI Maturity Factors by Country",
            ColumnLabels::Columns,
        )?;

        let html = self
            .template
            .replace("{{{TITLE}}}", &encode_text(REPORT_TITLE))
            .replace(
                "{{{GENERATED}}}",
                &self.generated.format("%Y-%m-%d %H:%M:%S").to_string(),
            )
            .replace("{{{COUNTRY_COUNT}}}", &rows.len().to_string())
            .replace("{{{TABLE_ROWS}}}", &table_rows(rows)?)
            .replace("{{{BAR_CHART}}}", &bar_chart)
            .replace("{{{HEATMAP}}}", &heatmap)
            .replace("{{{JSON_DATA}}}", &script_safe(&json_data));

        Ok(html)
    }
}

fn table_rows(rows: &[CountryRow]) -> Result<String> {
    let mut out = String::new();
    for (rank, row) in rows.iter().enumerate() {
        writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.4}</td></tr>",
            rank + 1,
            encode_text(&row.country_iso),
            row.internet_users_pct,
            row.gdp_per_capita,
            row.ai_use_cases_score,
            row.regulation_score,
            row.governance_frameworks_score,
            row.talent_availability_score,
            row.ai_maturity_index
        )?;
    }
    Ok(out)
}

/// JSON embedded in a script element must not close it early.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
