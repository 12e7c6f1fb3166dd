//! Engine configuration.
//!
//! Every tunable decision the engine makes lives in [`EngineConfig`]: the
//! classification ratios, whether exact zeros take part in continuous
//! bucketing, how degenerate PSI terms are resolved, and whether the two
//! dataset passes run as a fork-join pair. Defaults reproduce the classic
//! monitoring behaviour. A YAML file may override any subset of the fields:
//!
//! ```yaml
//! continuous_unique_ratio: 0.05
//! zero_share:
//!   policy: smooth
//!   epsilon: 0.001
//! execution: fork_join
//! ```

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{error::DriftError, stability::ZeroSharePolicy};

pub const DEFAULT_CONTINUOUS_UNIQUE_RATIO: f64 = 0.02;
pub const DEFAULT_CATEGORICAL_UNIQUE_RATIO: f64 = 0.9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    #[default]
    Sequential,
    /// Reference pass and current-data preparation run concurrently; the
    /// current pass finishes once the reference thresholds are available.
    ForkJoin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// A numeric column whose unique count exceeds this share of its observed
    /// values is continuous; otherwise it is discrete.
    pub continuous_unique_ratio: f64,
    /// A string column whose unique share exceeds this is identifier-like and
    /// left out of scoring.
    pub categorical_unique_ratio: f64,
    /// Leave exact zeros out of the continuous bucket counts.
    pub exclude_zero_from_buckets: bool,
    pub zero_share: ZeroSharePolicy,
    pub execution: ExecutionMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            continuous_unique_ratio: DEFAULT_CONTINUOUS_UNIQUE_RATIO,
            categorical_unique_ratio: DEFAULT_CATEGORICAL_UNIQUE_RATIO,
            exclude_zero_from_buckets: true,
            zero_share: ZeroSharePolicy::default(),
            execution: ExecutionMode::default(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Opening engine config {path:?}"))?;
        let config: EngineConfig = serde_yaml::from_str(&raw)
            .with_context(|| format!("Parsing engine config {path:?}"))?;
        config
            .validate()
            .with_context(|| format!("Validating engine config {path:?}"))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DriftError> {
        for (name, ratio) in [
            ("continuous_unique_ratio", self.continuous_unique_ratio),
            ("categorical_unique_ratio", self.categorical_unique_ratio),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(DriftError::InvalidConfig(format!(
                    "{name} must be within (0, 1], got {ratio}"
                )));
            }
        }
        if let ZeroSharePolicy::Smooth { epsilon } = self.zero_share
            && !(epsilon > 0.0 && epsilon < 1.0)
        {
            return Err(DriftError::InvalidConfig(format!(
                "smoothing epsilon must be within (0, 1), got {epsilon}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.exclude_zero_from_buckets);
        assert_eq!(config.execution, ExecutionMode::Sequential);
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let yaml = "continuous_unique_ratio: 0.05\nzero_share:\n  policy: skip\nexecution: fork_join\n";
        let config: EngineConfig = serde_yaml::from_str(yaml).expect("parse config");
        assert_eq!(config.continuous_unique_ratio, 0.05);
        assert_eq!(config.categorical_unique_ratio, DEFAULT_CATEGORICAL_UNIQUE_RATIO);
        assert_eq!(config.zero_share, ZeroSharePolicy::Skip);
        assert_eq!(config.execution, ExecutionMode::ForkJoin);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let yaml = "continuous_ratio: 0.05\n";
        assert!(serde_yaml::from_str::<EngineConfig>(yaml).is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let config = EngineConfig {
            categorical_unique_ratio: 1.5,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DriftError::InvalidConfig(_))
        ));

        let config = EngineConfig {
            zero_share: ZeroSharePolicy::Smooth { epsilon: 0.0 },
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
