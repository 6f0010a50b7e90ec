//! Engine tunables. Every value has a serde default, so a config file only
//! needs the fields it changes:
//!
//! ```json
//! { "comparator": { "frequency_threshold": 10 }, "stack": { "max_stack_to_pot_ratio": 12 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::comparator::ComparatorConfig;
use crate::distribution::DistributionConfig;
use crate::error::{GradeError, GradeResult};
use crate::stack::StackConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub comparator: ComparatorConfig,
    #[serde(default)]
    pub distribution: DistributionConfig,
    #[serde(default)]
    pub stack: StackConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> GradeResult<()> {
        self.comparator.validate()?;
        self.stack.validate()?;
        if !self.distribution.sum_tolerance.is_finite() || self.distribution.sum_tolerance < 0.0 {
            return Err(GradeError::InvalidValue(format!(
                "sum_tolerance must be non-negative, got {}",
                self.distribution.sum_tolerance
            )));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> GradeResult<EngineConfig> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> GradeResult<EngineConfig> {
        log::debug!("reading engine config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        EngineConfig::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::MissingHandPolicy;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "comparator": { "frequency_threshold": 10 } }"#).unwrap();
        assert_eq!(config.comparator.frequency_threshold, 10.0);
        assert_eq!(config.stack.max_stack_to_pot_ratio, 10.0);
        assert_eq!(config.distribution.sum_tolerance, 0.01);
        assert_eq!(config.distribution.missing_hands, MissingHandPolicy::ImplicitFold);
    }

    #[test]
    fn missing_hand_policy_from_json() {
        let config = EngineConfig::from_json(r#"{ "distribution": { "missing_hands": "reject" } }"#).unwrap();
        assert_eq!(config.distribution.missing_hands, MissingHandPolicy::Reject);
    }

    #[test]
    fn negative_threshold_rejected() {
        assert!(EngineConfig::from_json(r#"{ "comparator": { "frequency_threshold": -1 } }"#).is_err());
    }
}
