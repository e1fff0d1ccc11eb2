use super::{IndexView, IndexWriter, Tier};
use crate::core::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use std::io::Write;

pub struct TerminalWriter<W: Write> {
    writer: W,
    legend: Vec<String>,
}

impl<W: Write> TerminalWriter<W> {
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

    fn write_header(&mut self, view: &IndexView<'_>) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        writeln!(self.writer, "{}", "           AI MATURITY INDEX".bold().cyan())?;
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        if view.is_truncated() {
            writeln!(
                self.writer,
                "Showing top {} of {} countries",
                view.rows.len(),
                view.total
            )?;
        } else {
            writeln!(self.writer, "{} countries", view.total)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_table(&mut self, view: &IndexView<'_>) -> Result<()> {
        if view.rows.is_empty() {
            writeln!(self.writer, "{}", "The index is empty.".yellow())?;
            return Ok(());
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                "Rank",
                "Country",
                "Internet %",
                "GDP per capita",
                "Use cases",
                "Regulation",
                "Governance",
                "Talent",
                "Index",
            ]);

        for (rank, row) in view.rows.iter().enumerate() {
            let tier = view.terciles.tier(row.ai_maturity_index);
            table.add_row(vec![
                Cell::new(rank + 1).set_alignment(CellAlignment::Right),
                Cell::new(&row.country_iso),
                number(format!("{:.1}", row.internet_users_pct)),
                number(format!("{:.0}", row.gdp_per_capita)),
                number(format!("{:.2}", row.ai_use_cases_score)),
                number(format!("{:.2}", row.regulation_score)),
                number(format!("{:.2}", row.governance_frameworks_score)),
                number(format!("{:.2}", row.talent_availability_score)),
                number(format!("{:.3}", row.ai_maturity_index)).fg(tier_color(tier)),
            ]);
        }

        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_legend(&mut self) -> Result<()> {
        if self.legend.is_empty() {
            return Ok(());
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "Weighted factors".bold())?;
        for line in &self.legend {
            writeln!(self.writer, "  • {line}")?;
        }
        writeln!(
            self.writer,
            "Index colour: {} / {} / {} third of countries",
            Tier::High.label().green(),
            Tier::Medium.label().yellow(),
            Tier::Low.label().red()
        )?;
        Ok(())
    }

    fn write_visuals(&mut self, view: &IndexView<'_>) -> Result<()> {
        writeln!(self.writer)?;
        if view.visuals.is_empty() {
            writeln!(
                self.writer,
                "No visuals found. Run `ai-maturity render` to create them."
            )?;
            return Ok(());
        }
        writeln!(self.writer, "{}", "Visuals".bold())?;
        for path in &view.visuals {
            writeln!(self.writer, "  {}", path.display())?;
        }
        Ok(())
    }
}

impl<W: Write> IndexWriter for TerminalWriter<W> {
    fn write_index(&mut self, view: &IndexView<'_>) -> Result<()> {
        self.write_header(view)?;
        self.write_table(view)?;
        self.write_legend()?;
        self.write_visuals(view)?;
        self.writer.flush()?;
        Ok(())
    }
}

fn number(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::High => Color::Green,
        Tier::Medium => Color::Yellow,
        Tier::Low => Color::Red,
    }
}
