use ai_maturity::cli::{log_level, Cli, Commands};
use ai_maturity::commands::{self, IndexOptions, RunOptions, ViewOptions};
use ai_maturity::config::{resolve_config, CONFIG_FILE_NAME};
use ai_maturity::observability::install_panic_hook;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(log_level(cli.verbosity))
        .parse_default_env()
        .init();

    if let Commands::Init { force } = cli.command {
        let path = cli
            .config
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        return commands::init_config(&path, force);
    }

    let config = resolve_config(cli.config.as_deref(), cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Collect => commands::handle_collect(&config),
        Commands::Index { scores, seed } => {
            commands::compute_index(&config, &IndexOptions { scores, seed }).map(|_| ())
        }
        Commands::Render => commands::handle_render(&config).map(|_| ()),
        Commands::View { format, top } => commands::handle_view(
            &config,
            ViewOptions {
                format: format.into(),
                top,
            },
        ),
        Commands::Run {
            skip_collect,
            scores,
        } => commands::handle_run(
            &config,
            &RunOptions {
                skip_collect,
                index: IndexOptions { scores, seed: None },
            },
        ),
        Commands::Init { .. } => Ok(()),
    }
}
