use super::{IndexView, IndexWriter, Tier};
use crate::core::{CountryRow, Result};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

#[derive(Serialize)]
struct JsonIndex<'a> {
    total_countries: usize,
    countries: Vec<JsonCountry<'a>>,
    visuals: &'a [PathBuf],
}

#[derive(Serialize)]
struct JsonCountry<'a> {
    rank: usize,
    tier: Tier,
    #[serde(flatten)]
    row: &'a CountryRow,
}

impl<W: Write> IndexWriter for JsonWriter<W> {
    fn write_index(&mut self, view: &IndexView<'_>) -> Result<()> {
        let document = JsonIndex {
            total_countries: view.total,
            countries: view
                .rows
                .iter()
                .enumerate()
                .map(|(i, row)| JsonCountry {
                    rank: i + 1,
                    tier: view.terciles.tier(row.ai_maturity_index),
                    row,
                })
                .collect(),
            visuals: &view.visuals,
        };
        serde_json::to_writer_pretty(&mut self.writer, &document)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
