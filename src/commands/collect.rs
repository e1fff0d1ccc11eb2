use crate::collector::{CollectionSummary, Collector, FetchOutcome};
use crate::config::AppConfig;
use crate::observability::{set_stage, PipelineStage};
use anyhow::{Context, Result};
use colored::*;

/// Download every indicator and the policy page, printing what was saved.
///
/// Individual download failures are reported in the summary, not returned.
pub fn collect_data(config: &AppConfig) -> Result<CollectionSummary> {
    let _stage = set_stage(PipelineStage::Collect);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    let collector = Collector::new(config)?;
    let summary = runtime.block_on(collector.run())?;

    print_summary(&summary);
    Ok(summary)
}

/// `collect` subcommand: fails when any indicator could not be saved.
pub fn handle_collect(config: &AppConfig) -> Result<()> {
    let summary = collect_data(config)?;
    if !summary.all_saved() {
        let missing = summary
            .indicators
            .iter()
            .filter(|(_, outcome)| !matches!(outcome, FetchOutcome::Saved { .. }))
            .count();
        anyhow::bail!(
            "{} of {} indicators could not be collected",
            missing,
            summary.indicators.len()
        );
    }
    Ok(())
}

fn print_summary(summary: &CollectionSummary) {
    println!("{}", "Collection summary".bold());
    for (indicator, outcome) in &summary.indicators {
        match outcome {
            FetchOutcome::Saved {
                path,
                records,
                countries,
            } => println!(
                "  {} {}: {} records for {} countries saved to {}",
                "✓".green(),
                indicator.code(),
                records,
                countries,
                path.display()
            ),
            FetchOutcome::Empty => println!(
                "  {} {}: no data returned",
                "!".yellow(),
                indicator.code()
            ),
            FetchOutcome::Failed { reason } => {
                println!("  {} {}: {}", "✗".red(), indicator.code(), reason)
            }
        }
    }
    match &summary.policy_page {
        Some(path) => println!("  {} policy page saved to {}", "✓".green(), path.display()),
        None => println!("  {} policy page not saved", "!".yellow()),
    }
    for report in &summary.manual_reports {
        println!(
            "  {} {} present; text extraction is not supported",
            "·".dimmed(),
            report.display()
        );
    }
}
