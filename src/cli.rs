use crate::viewer::ViewFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ai-maturity")]
#[command(about = "Builds a ranked AI maturity index for countries", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    ///
    /// -v shows progress, -vv adds debug detail, -vvv traces everything.
    /// RUST_LOG overrides this when set.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Configuration file (defaults to the nearest .ai-maturity.toml)
    #[arg(long, global = true, env = "AI_MATURITY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root for the data and visuals directories
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download raw indicator data
    Collect,

    /// Compute the ranked index from collected data
    Index {
        /// CSV of prepared qualitative scores used instead of generated ones
        #[arg(long)]
        scores: Option<PathBuf>,

        /// Seed for generated qualitative scores
        #[arg(long, conflicts_with = "scores")]
        seed: Option<u64>,
    },

    /// Write charts and the HTML report for the computed index
    Render,

    /// Print the computed index
    View {
        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Show only the top N countries
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,
    },

    /// Run collect, index, and render in order
    Run {
        /// Skip downloading and use the raw data already on disk
        #[arg(long = "skip-collect")]
        skip_collect: bool,

        /// CSV of prepared qualitative scores used instead of generated ones
        #[arg(long)]
        scores: Option<PathBuf>,
    },

    /// Initialize a new configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Terminal,
    Markdown,
    Json,
}

impl From<OutputFormat> for ViewFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ViewFormat::Terminal,
            OutputFormat::Markdown => ViewFormat::Markdown,
            OutputFormat::Json => ViewFormat::Json,
        }
    }
}

/// Log level for a `-v` count.
pub fn log_level(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}
