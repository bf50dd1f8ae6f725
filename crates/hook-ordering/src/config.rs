//! Configuration for the ordering engine

use crate::domain::value_objects::SchedulingPreference;
use serde::{Deserialize, Serialize};

/// Ordering configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Preference applied when the metadata source declares none
    pub default_preference: SchedulingPreference,
    /// Log constraints naming handlers outside the set at WARN (otherwise DEBUG)
    pub warn_unknown_targets: bool,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            default_preference: SchedulingPreference::Late,
            warn_unknown_targets: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OrderingConfig::default();
        assert_eq!(config.default_preference, SchedulingPreference::Late);
        assert!(config.warn_unknown_targets);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: OrderingConfig =
            serde_json::from_str(r#"{ "default_preference": "early" }"#).unwrap();
        assert_eq!(config.default_preference, SchedulingPreference::Early);
        assert!(config.warn_unknown_targets);
    }
}
