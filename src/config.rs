//! Engine configuration, persisted as TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the list engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// SAMM meta-model version used to build namespace IRIs.
    #[serde(default = "default_samm_version")]
    pub samm_version: String,
    /// Maximum number of cells a chain walk visits before giving up.
    #[serde(default = "default_max_list_length")]
    pub max_list_length: usize,
}

fn default_samm_version() -> String {
    "2.1.0".into()
}
fn default_max_list_length() -> usize {
    10_000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            samm_version: default_samm_version(),
            max_list_length: default_max_list_length(),
        }
    }
}

impl EngineConfig {
    /// Check field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_list_length == 0 {
            return Err(ConfigError::Invalid {
                message: "max_list_length must be > 0".into(),
            });
        }
        let version_ok = !self.samm_version.is_empty()
            && self
                .samm_version
                .split('.')
                .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()));
        if !version_ok {
            return Err(ConfigError::Invalid {
                message: format!(
                    "samm_version must look like \"2.1.0\", got \"{}\"",
                    self.samm_version
                ),
            });
        }
        Ok(())
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.samm_version, "2.1.0");
        assert_eq!(config.max_list_length, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EngineConfig = toml::from_str("max_list_length = 12\n").unwrap();
        assert_eq!(config.max_list_length, 12);
        assert_eq!(config.samm_version, "2.1.0");
    }

    #[test]
    fn rejects_zero_length_cap() {
        let config = EngineConfig {
            max_list_length: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_non_numeric_version() {
        let config = EngineConfig {
            samm_version: "2.x".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("engine.toml");
        let config = EngineConfig {
            samm_version: "2.0.0".into(),
            max_list_length: 64,
        };
        config.save(&path).unwrap();
        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "max_list_length = \"many\"").unwrap();
        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
