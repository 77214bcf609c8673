//! Runtime configuration for the `topomon` binary.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `TOPOMON_*` environment variables (`TOPOMON_ALERTS__OFFLINE_THRESHOLD_MINUTES=5`).

use std::path::Path;

use ::config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::layout::{LayoutOptions, LayoutStrategy};
use crate::status::AlertPolicy;

pub const ENV_PREFIX: &str = "TOPOMON";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSection {
    /// Strategy used when the command line does not name one
    pub strategy: LayoutStrategy,
    pub options: LayoutOptions,
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            strategy: LayoutStrategy::Hierarchical,
            options: LayoutOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub alerts: AlertPolicy,
    pub layout: LayoutSection,
}

impl MonitorConfig {
    /// Load configuration, reading `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Parse configuration from TOML text, without the environment layer.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(input, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;

    #[test]
    fn test_empty_uses_defaults() {
        let cfg = MonitorConfig::from_toml("").unwrap();
        assert_eq!(cfg, MonitorConfig::default());
        assert_eq!(cfg.alerts.offline_threshold_minutes, 2);
        assert_eq!(cfg.layout.strategy, LayoutStrategy::Hierarchical);
    }

    #[test]
    fn test_partial_override() {
        let cfg = MonitorConfig::from_toml(
            r#"
            [alerts]
            offline_threshold_minutes = 5

            [layout]
            strategy = "extended-star"

            [layout.options]
            radius = 180.0
            hub = "core"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.alerts.offline_threshold_minutes, 5);
        assert_eq!(cfg.alerts.response_time_threshold_ms, 1000.0);
        assert_eq!(cfg.layout.strategy, LayoutStrategy::ExtendedStar);
        assert_eq!(cfg.layout.options.radius, Some(180.0));
        assert_eq!(cfg.layout.options.hub, Some(NodeId::from("core")));
    }

    #[test]
    fn test_bad_strategy_rejected() {
        let result = MonitorConfig::from_toml(
            r#"
            [layout]
            strategy = "spiral"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = MonitorConfig::load(Some(Path::new("/nonexistent/topomon.toml")));
        assert!(result.is_err());
    }
}
