use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::search::SearchStrategy;
use crate::BitrunError;

/// Runtime configuration for multi-pass compression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How run lengths are explored.
    pub strategy: SearchStrategy,
    /// Upper bound on compression passes.
    pub max_passes: usize,
    /// Stop as soon as a pass fails to shrink its input.
    pub require_gain: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::Bisection,
            max_passes: 10,
            require_gain: true,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), BitrunError> {
        if self.max_passes == 0 {
            return Err(BitrunError::Config("max_passes must be at least 1".into()));
        }
        Ok(())
    }

    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, BitrunError> {
        let text = std::fs::read_to_string(path)?;
        let config: Config =
            serde_json::from_str(&text).map_err(|e| BitrunError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"strategy": "exhaustive"}"#).unwrap();
        assert_eq!(config.strategy, SearchStrategy::Exhaustive);
        assert_eq!(config.max_passes, 10);
        assert!(config.require_gain);
    }

    #[test]
    fn zero_passes_rejected() {
        let config = Config {
            max_passes: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(BitrunError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bitrun.json");
        std::fs::write(&path, r#"{"max_passes": 3, "require_gain": false}"#).unwrap();
        let config = Config::from_json_file(&path).unwrap();
        assert_eq!(config.max_passes, 3);
        assert!(!config.require_gain);
        assert_eq!(config.strategy, SearchStrategy::Bisection);

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(Config::from_json_file(&path), Err(BitrunError::Config(_))));
    }
}
