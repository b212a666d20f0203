use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Board dimension used when none is configured.
pub const DEFAULT_SIZE: usize = 4;

/// Smallest board on which two tiles can be placed.
pub const MIN_SIZE: usize = 2;

/// Construction-time settings for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Side length N of the N×N grid.
    pub size: usize,
}

impl EngineConfig {
    pub fn with_size(size: usize) -> Self {
        EngineConfig { size }
    }

    /// Reject dimensions that cannot host the two opening tiles.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.size < MIN_SIZE {
            return Err(EngineError::InvalidConfiguration { size: self.size });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { size: DEFAULT_SIZE }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_four_by_four() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.size, 4);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_sizes() {
        for size in [0, 1] {
            assert_eq!(
                EngineConfig::with_size(size).validate(),
                Err(EngineError::InvalidConfiguration { size })
            );
        }
        assert!(EngineConfig::with_size(2).validate().is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_default() {
        let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
        let cfg: EngineConfig = serde_json::from_str(r#"{"size": 6}"#).unwrap();
        assert_eq!(cfg.size, 6);
    }
}
