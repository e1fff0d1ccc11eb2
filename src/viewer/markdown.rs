use super::{IndexView, IndexWriter};
use crate::core::Result;
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
    legend: Vec<String>,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            legend: Vec::new(),
        }
    }

    pub fn with_legend(mut self, legend: Vec<String>) -> Self {
        self.legend = legend;
        self
    }

    fn write_table(&mut self, view: &IndexView<'_>) -> Result<()> {
        writeln!(
            self.writer,
            "| Rank | Country | Internet % | GDP per capita | Use cases | Regulation | Governance | Talent | Index | Tier |"
        )?;
        writeln!(
            self.writer,
            "|-----:|---------|-----------:|---------------:|----------:|-----------:|-----------:|-------:|------:|------|"
        )?;
        for (rank, row) in view.rows.iter().enumerate() {
            writeln!(
                self.writer,
                "| {} | {} | {:.1} | {:.0} | {:.2} | {:.2} | {:.2} | {:.2} | {:.3} | {} |",
                rank + 1,
                row.country_iso.replace('|', "\\|"),
                row.internet_users_pct,
                row.gdp_per_capita,
                row.ai_use_cases_score,
                row.regulation_score,
                row.governance_frameworks_score,
                row.talent_availability_score,
                row.ai_maturity_index,
                view.terciles.tier(row.ai_maturity_index).label()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> IndexWriter for MarkdownWriter<W> {
    fn write_index(&mut self, view: &IndexView<'_>) -> Result<()> {
        writeln!(self.writer, "# AI Maturity Index")?;
        writeln!(self.writer)?;
        if view.is_truncated() {
            writeln!(self.writer, "Top {} of {} countries.", view.rows.len(), view.total)?;
        } else {
            writeln!(self.writer, "{} countries.", view.total)?;
        }
        writeln!(self.writer)?;

        self.write_table(view)?;

        if !self.legend.is_empty() {
            writeln!(self.writer, "## Weighted factors")?;
            writeln!(self.writer)?;
            for line in &self.legend {
                writeln!(self.writer, "- {line}")?;
            }
            writeln!(self.writer)?;
        }

        if !view.visuals.is_empty() {
            writeln!(self.writer, "## Visuals")?;
            writeln!(self.writer)?;
            for path in &view.visuals {
                writeln!(self.writer, "- `{}`", path.display())?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}
