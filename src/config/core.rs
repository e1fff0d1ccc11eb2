use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::retry::RetryConfig;
use super::scoring::{IndexWeights, NormalizationConfig, ScoresConfig};
use crate::core::Indicator;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Where each stage reads and writes its files
    #[serde(default)]
    pub paths: PathsConfig,

    /// Indicator download settings
    #[serde(default)]
    pub collector: CollectorConfig,

    /// Composite index weights
    #[serde(default)]
    pub weights: IndexWeights,

    /// Mocked qualitative score generation
    #[serde(default)]
    pub scores: ScoresConfig,

    /// Min-max normalization policy
    #[serde(default)]
    pub normalization: NormalizationConfig,
}

impl AppConfig {
    /// Re-root every relative path under `data_dir`
    pub fn with_data_dir(mut self, data_dir: &Path) -> Self {
        self.paths = self.paths.rooted_at(data_dir);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,

    #[serde(default = "default_processed_dir")]
    pub processed_dir: PathBuf,

    #[serde(default = "default_visuals_dir")]
    pub visuals_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_dir: default_raw_dir(),
            processed_dir: default_processed_dir(),
            visuals_dir: default_visuals_dir(),
        }
    }
}

impl PathsConfig {
    pub fn indicator_file(&self, indicator: Indicator) -> PathBuf {
        self.raw_dir.join(indicator.file_name())
    }

    pub fn policy_page_file(&self) -> PathBuf {
        self.raw_dir.join("oecd_ai_policy_data.txt")
    }

    pub fn index_file(&self) -> PathBuf {
        self.processed_dir.join("ai_maturity_index.csv")
    }

    fn rooted_at(self, root: &Path) -> Self {
        let reroot = |p: PathBuf| if p.is_absolute() { p } else { root.join(p) };
        Self {
            raw_dir: reroot(self.raw_dir),
            processed_dir: reroot(self.processed_dir),
            visuals_dir: reroot(self.visuals_dir),
        }
    }
}

fn default_raw_dir() -> PathBuf {
    PathBuf::from("data/raw_data")
}

fn default_processed_dir() -> PathBuf {
    PathBuf::from("data/processed_data")
}

fn default_visuals_dir() -> PathBuf {
    PathBuf::from("visuals")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Statistics API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_per_page")]
    pub per_page: u32,

    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Pause between page requests
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Policy page saved verbatim as raw text
    #[serde(default = "default_policy_url")]
    pub policy_url: String,

    /// Keep only these ISO codes; all countries when absent
    #[serde(default)]
    pub countries: Option<Vec<String>>,

    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            per_page: default_per_page(),
            request_timeout_seconds: default_request_timeout_seconds(),
            page_delay_ms: default_page_delay_ms(),
            policy_url: default_policy_url(),
            countries: None,
            retry: RetryConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    "http://api.worldbank.org/v2".to_string()
}

fn default_per_page() -> u32 {
    500
}

fn default_request_timeout_seconds() -> u64 {
    30
}

fn default_page_delay_ms() -> u64 {
    1000
}

fn default_policy_url() -> String {
    "https://www.oecd.ai/dashboards/policy-data".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let paths = PathsConfig::default();
        assert_eq!(
            paths.indicator_file(Indicator::GdpPerCapita),
            PathBuf::from("data/raw_data/world_bank_gdp_per_capita.csv")
        );
        assert_eq!(
            paths.index_file(),
            PathBuf::from("data/processed_data/ai_maturity_index.csv")
        );
    }

    #[test]
    fn test_with_data_dir_reroots_relative_paths_only() {
        let config = AppConfig {
            paths: PathsConfig {
                visuals_dir: PathBuf::from("/tmp/visuals"),
                ..Default::default()
            },
            ..Default::default()
        }
        .with_data_dir(Path::new("/work"));

        assert_eq!(config.paths.raw_dir, PathBuf::from("/work/data/raw_data"));
        assert_eq!(config.paths.visuals_dir, PathBuf::from("/tmp/visuals"));
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
