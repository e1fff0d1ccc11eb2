use crate::config::AppConfig;
use crate::io;
use crate::observability::{set_current_file, set_stage, PipelineStage};
use crate::viewer::{create_writer, factor_legend, IndexView, ViewFormat};
use anyhow::Result;

#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    pub format: ViewFormat,
    pub top: Option<usize>,
}

/// Print the ranked index and the visuals available for it.
pub fn handle_view(config: &AppConfig, options: ViewOptions) -> Result<()> {
    let _stage = set_stage(PipelineStage::View);

    let index_path = config.paths.index_file();
    let rows = {
        let _file = set_current_file(&index_path);
        io::read_index_rows(&index_path)?
    };

    let view = IndexView::new(&rows, options.top).with_visuals_from(&config.paths.visuals_dir);
    let stdout = std::io::stdout();
    let mut writer = create_writer(
        options.format,
        Box::new(stdout.lock()),
        factor_legend(&config.weights),
    );
    writer.write_index(&view)?;
    Ok(())
}
