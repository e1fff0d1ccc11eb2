use crate::config::AppConfig;
use crate::io;
use crate::observability::{set_current_file, set_stage, PipelineStage};
use crate::render::render_all;
use anyhow::Result;
use colored::*;
use std::path::PathBuf;

/// Write the charts and the HTML report for the ranked index on disk.
pub fn handle_render(config: &AppConfig) -> Result<Vec<PathBuf>> {
    let _stage = set_stage(PipelineStage::Render);

    let index_path = config.paths.index_file();
    let rows = {
        let _file = set_current_file(&index_path);
        io::read_index_rows(&index_path)?
    };
    if rows.is_empty() {
        log::warn!("{} holds no countries; charts will be empty", index_path.display());
    }

    let written = render_all(&rows, &config.paths.visuals_dir)?;
    println!("{}", "Visualizations saved:".green());
    for path in &written {
        println!("  {}", path.display());
    }
    Ok(written)
}
