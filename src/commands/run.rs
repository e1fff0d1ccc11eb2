use super::collect::collect_data;
use super::index::{compute_index, IndexOptions};
use super::render::handle_render;
use crate::config::AppConfig;
use anyhow::Result;
use colored::*;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub skip_collect: bool,
    pub index: IndexOptions,
}

/// Collect, index, and render in one process.
///
/// A partial collection does not stop the run; indexing then reports any
/// series that is still missing.
pub fn handle_run(config: &AppConfig, options: &RunOptions) -> Result<()> {
    if options.skip_collect {
        log::info!("Skipping collection; using raw data in {}", config.paths.raw_dir.display());
    } else {
        let summary = collect_data(config)?;
        if !summary.all_saved() {
            println!(
                "{} some indicators were not collected; continuing with what is on disk",
                "Warning:".yellow().bold()
            );
        }
    }

    compute_index(config, &options.index)?;
    handle_render(config)?;
    Ok(())
}
