//! Retry configuration for indicator downloads.
//!
//! Only timeout-class request failures are retried. Any other request
//! failure aborts the fetch for that indicator on the first attempt.
//!
//! # Configuration Example
//!
//! ```toml
//! [collector.retry]
//! max_attempts = 3
//! base_delay_ms = 1000
//! strategy = "exponential"
//! ```
//!
//! # Retry Strategies
//!
//! - **Constant**: Same delay between each attempt
//! - **Linear**: Delay increases linearly (base * attempt)
//! - **Exponential**: Delay doubles each attempt (base * 2^(attempt-1))

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry configuration for timeout-class failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay after the first failed attempt in milliseconds (default: 1000)
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Retry strategy (default: exponential)
    #[serde(default)]
    pub strategy: RetryStrategy,

    /// Upper bound for any single delay in seconds (default: 60)
    #[serde(default = "default_max_delay_seconds")]
    pub max_delay_seconds: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            strategy: RetryStrategy::default(),
            max_delay_seconds: default_max_delay_seconds(),
        }
    }
}

impl RetryConfig {
    /// Single attempt, no waiting.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Delay to wait after failed attempt `attempt` (1-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        let base_ms = self.base_delay_ms;

        let delay_ms = match self.strategy {
            RetryStrategy::Constant => base_ms,
            RetryStrategy::Linear => base_ms.saturating_mul(u64::from(attempt)),
            RetryStrategy::Exponential => {
                base_ms.saturating_mul(2u64.saturating_pow(attempt - 1))
            }
        };

        Duration::from_millis(delay_ms).min(Duration::from_secs(self.max_delay_seconds))
    }

    /// Whether another attempt is allowed after `attempt` attempts failed.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

/// Retry delay strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetryStrategy {
    /// Same delay between each attempt.
    Constant,
    /// Delay increases linearly: base * attempt.
    Linear,
    /// Delay doubles each attempt: base * 2^(attempt-1).
    #[default]
    Exponential,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_max_delay_seconds() -> u64 {
    60
}
