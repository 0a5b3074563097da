use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top level configuration. Every field has a default, so an empty JSON object
/// is a valid config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Scales used when turning readings into percentages
    pub calibration: Calibration,
}

/// Floor and ceiling of each percentage scale. A reading at the floor is 0%,
/// one at the ceiling is 100%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Calibration {
    pub rsrp_floor_dbm: f64,
    pub rsrp_ceiling_dbm: f64,
    pub sinr_floor_db: f64,
    pub sinr_ceiling_db: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            rsrp_floor_dbm: -140.0,
            rsrp_ceiling_dbm: -75.0,
            sinr_floor_db: 0.0,
            sinr_ceiling_db: 40.0,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{scale} floor {floor} must differ from its ceiling {ceiling}")]
    EmptyScale {
        scale: &'static str,
        floor: f64,
        ceiling: f64,
    },
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.calibration.validate()?;
        Ok(config)
    }
}

impl Calibration {
    /// A scale whose floor equals its ceiling has no range to rescale into.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scales = [
            ("rsrp", self.rsrp_floor_dbm, self.rsrp_ceiling_dbm),
            ("sinr", self.sinr_floor_db, self.sinr_ceiling_db),
        ];
        for (scale, floor, ceiling) in scales {
            if floor == ceiling || !floor.is_finite() || !ceiling.is_finite() {
                return Err(ConfigError::EmptyScale {
                    scale,
                    floor,
                    ceiling,
                });
            }
        }
        Ok(())
    }
}
