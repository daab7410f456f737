//! Application configuration.
//!
//! Settings come from an optional YAML file; every field has a default, so
//! an empty file (or no file at all) is a valid configuration. Command-line
//! flags are applied on top by `main`.
//!
//! ```yaml
//! timeout_secs: 10
//! user_agent: "Mozilla/5.0 (X11; Linux x86_64)"
//! per_source_limit: 10
//! analysis_batch: 5
//! sentiment_template: market_sentiment
//! seed_tickers: [RELIANCE, TCS, ITC]
//! ```

use crate::aggregator::DEFAULT_PER_SOURCE_LIMIT;
use crate::analysis::DEFAULT_BATCH;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Per-request timeout for each source fetch.
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Headlines kept per source after extraction.
    pub per_source_limit: usize,
    /// Headlines sent to the classifier in one request.
    pub analysis_batch: usize,
    /// Name of the `awful_aj` chat template used for classification.
    pub sentiment_template: String,
    /// Tickers every owner starts with in the in-memory portfolio.
    pub seed_tickers: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            per_source_limit: DEFAULT_PER_SOURCE_LIMIT,
            analysis_batch: DEFAULT_BATCH,
            sentiment_template: "market_sentiment".to_string(),
            seed_tickers: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // an empty document deserializes as unit, not as an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config = Self::from_yaml(&yaml).map_err(|source| ConfigError::Yaml {
            path: display,
            source,
        })?;
        info!(?config, "Loaded configuration");
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = AppConfig::from_yaml("").unwrap();
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.per_source_limit, 10);
        assert_eq!(config.analysis_batch, 5);
        assert_eq!(config.sentiment_template, "market_sentiment");
        assert!(config.seed_tickers.is_empty());
    }

    #[test]
    fn test_partial_yaml_overrides_fields() {
        let config = AppConfig::from_yaml("timeout_secs: 3\nseed_tickers: [RELIANCE, TCS]\n").unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.seed_tickers, ["RELIANCE", "TCS"]);
        assert_eq!(config.per_source_limit, 10);
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        assert!(AppConfig::from_yaml("timeout_secs: [not, a, number]").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
