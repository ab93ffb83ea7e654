//! Per-machine configuration.
//!
//! Actors usually keep their tuning in data files, so the configuration is
//! plain serde data with defaults for every field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid machine config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Options shared by [`StateMachine`](crate::StateMachine) and
/// [`AutoStateMachine`](crate::AutoStateMachine).
///
/// # Example
///
/// ```rust
/// use tickstate::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "log_transitions": true }"#).unwrap();
/// assert!(config.log_transitions);
/// assert_eq!(config.history_capacity, 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Emit an `info` event for every completed transition.
    pub log_transitions: bool,

    /// Number of recent transitions to keep. Zero disables history.
    pub history_capacity: usize,
}

impl MachineConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.log_transitions = enabled;
        self
    }

    pub fn with_history(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_quiet() {
        let config = MachineConfig::default();
        assert!(!config.log_transitions);
        assert_eq!(config.history_capacity, 0);
    }

    #[test]
    fn empty_json_uses_defaults() {
        let config = MachineConfig::from_json("{}").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn json_overrides_fields() {
        let config =
            MachineConfig::from_json(r#"{ "log_transitions": true, "history_capacity": 16 }"#)
                .unwrap();

        assert_eq!(
            config,
            MachineConfig::default().with_logging(true).with_history(16)
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = MachineConfig::from_json(r#"{ "show_logs": true }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn config_round_trips() {
        let config = MachineConfig::default().with_history(4);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(MachineConfig::from_json(&json).unwrap(), config);
    }
}
