use std::fs;
use std::path::{Path, PathBuf};

use super::core::AppConfig;
use super::scoring::{IndexWeights, ScoresConfig};
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".ai-maturity.toml";

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<AppConfig, String> {
    let mut config = toml::from_str::<AppConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Err(e) = config.weights.validate() {
        if config.weights.sum() > 0.0 && all_weights_in_range(&config.weights) {
            log::warn!("{}. Renormalizing weights.", e);
            config.weights.normalize();
        } else {
            log::warn!("Invalid index weights: {}. Using defaults.", e);
            config.weights = IndexWeights::default();
        }
    }

    if let Err(e) = config.scores.validate() {
        log::warn!("Invalid score ranges: {}. Using defaults.", e);
        config.scores = ScoresConfig {
            seed: config.scores.seed,
            ..ScoresConfig::default()
        };
    }

    if !config.normalization.degenerate_fallback.is_finite() {
        return Err("normalization.degenerate_fallback must be a finite number".to_string());
    }

    Ok(config)
}

fn all_weights_in_range(weights: &IndexWeights) -> bool {
    crate::core::Factor::ALL
        .iter()
        .all(|f| IndexWeights::is_valid_weight(weights.weight(*f)))
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<AppConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load an explicitly named config file; a missing file is an error.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        Error::Configuration(format!("Cannot read {}: {}", path.display(), e))
    })?;
    parse_and_validate_config(&contents).map_err(Error::Configuration)
}

/// Search upward from the current directory for a config file.
pub fn load_config() -> AppConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return AppConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            AppConfig::default()
        })
}
