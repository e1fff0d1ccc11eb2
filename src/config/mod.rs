// Sub-modules
pub mod retry;
mod scoring;

// Core configuration types
mod core;
mod loader;

pub use self::core::{AppConfig, CollectorConfig, PathsConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
pub use retry::{RetryConfig, RetryStrategy};
pub use scoring::{IndexWeights, NormalizationConfig, ScoreRange, ScoresConfig};

use std::path::Path;

/// Resolve configuration for a command: explicit file, else discovery.
pub fn resolve_config(
    explicit: Option<&Path>,
    data_dir: Option<&Path>,
) -> crate::core::Result<AppConfig> {
    let config = match explicit {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };
    Ok(match data_dir {
        Some(dir) => config.with_data_dir(dir),
        None => config,
    })
}
