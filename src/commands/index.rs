use crate::config::AppConfig;
use crate::core::Indicator;
use crate::indexer::{build_index, IndexOutput, IndexSettings, ScoreSource};
use crate::io;
use crate::observability::{set_current_file, set_stage, PipelineStage};
use anyhow::Result;
use colored::*;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// Prepared qualitative scores; generated when absent
    pub scores: Option<PathBuf>,
    /// Overrides `[scores] seed` for generated scores
    pub seed: Option<u64>,
}

/// Build the ranked index from the raw series and write it to the processed dir.
///
/// Nothing is written unless every input was read and the index was built.
pub fn compute_index(config: &AppConfig, options: &IndexOptions) -> Result<IndexOutput> {
    let _stage = set_stage(PipelineStage::Index);

    let internet_users = read_series(config, Indicator::InternetUsers)?;
    let gdp_per_capita = read_series(config, Indicator::GdpPerCapita)?;
    let scores = score_source(config, options)?;

    let settings = IndexSettings {
        weights: config.weights.clone(),
        normalization: config.normalization.clone(),
    };
    let output = build_index(&internet_users, &gdp_per_capita, scores, &settings);

    let index_path = config.paths.index_file();
    {
        let _file = set_current_file(&index_path);
        io::write_index_rows(&index_path, &output.rows)?;
    }

    if output.rows.is_empty() {
        println!(
            "{} no country has every indicator; wrote an empty index to {}",
            "Warning:".yellow().bold(),
            index_path.display()
        );
    } else {
        println!(
            "{} {}",
            "AI Maturity Index calculated and saved to".green(),
            index_path.display()
        );
    }
    print_report_summary(&output);

    Ok(output)
}

fn read_series(config: &AppConfig, indicator: Indicator) -> Result<Vec<crate::core::IndicatorRecord>> {
    let path = config.paths.indicator_file(indicator);
    let _file = set_current_file(&path);
    let records = io::read_indicator_records(&path)?;
    log::info!("Read {} {} records from {}", records.len(), indicator, path.display());
    Ok(records)
}

fn score_source(config: &AppConfig, options: &IndexOptions) -> Result<ScoreSource> {
    if let Some(path) = &options.scores {
        let _file = set_current_file(path);
        let table = io::read_qualitative_scores(path)?;
        log::info!("Using {} prepared score rows from {}", table.len(), path.display());
        return Ok(ScoreSource::Table(table));
    }

    let mut scores = config.scores.clone();
    if let Some(seed) = options.seed {
        scores.seed = seed;
    }
    log::info!("Generating qualitative scores with seed {}", scores.seed);
    Ok(ScoreSource::mock(&scores))
}

fn print_report_summary(output: &IndexOutput) {
    let report = &output.report;
    println!(
        "  {} countries ranked, {} dropped by joins",
        report.rows,
        report.dropped_countries()
    );
    for field in report.degenerate_fields() {
        println!(
            "  {} {} has a single distinct value; normalized to the fallback",
            "note:".cyan(),
            field
        );
    }
}
