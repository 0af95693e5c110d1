//! # Configuration
//!
//! YAML description of a design run: the filters to design, the numerical
//! options of the pipeline and the logging setup.
//!
//! ## Example Configuration
//!
//! ```yaml
//! options:
//!   real_pole_tolerance: 1.0e-6
//!   sweep_points: 32768
//!
//! filters:
//!   - name: Fast
//!     passband_edge: 20000.0
//!     stopband_edge: 25000.0
//!     passband_ripple_db: 0.1
//!     stopband_attenuation_db: 97.5
//!
//! logging:
//!   level: debug
//!   format: json
//! ```
//!
//! Missing sections fall back to their defaults. Nothing is read from the
//! environment; callers pass the path explicitly.

use crate::design::{DesignOptions, EllipticDesigner, FilterSpec};
use crate::observe::LogConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Error type for configuration operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to read or write the configuration file
    ReadError(String),
    /// Failed to parse or serialize the configuration
    ParseError(String),
    /// Invalid configuration value
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(msg) => write!(f, "failed to read config: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "failed to parse config: {}", msg),
            ConfigError::ValidationError(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Complete design-run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    /// Configuration version
    pub version: String,
    pub options: DesignOptions,
    /// Filters to design, in output order
    pub filters: Vec<FilterSpec>,
    pub logging: LogConfig,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            options: DesignOptions::default(),
            filters: Vec::new(),
            logging: LogConfig::default(),
        }
    }
}

impl DesignConfig {
    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            serde_yaml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))
    }

    /// Validate options and every filter spec.
    ///
    /// Filter names must be unique since they name the emitted tables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.options
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("options: {}", e)))?;

        let mut seen = HashSet::new();
        for spec in &self.filters {
            spec.validate().map_err(|e| {
                ConfigError::ValidationError(format!("filter '{}': {}", spec.name, e))
            })?;
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate filter name '{}'",
                    spec.name
                )));
            }
        }

        Ok(())
    }

    /// Designer configured with these options.
    pub fn designer(&self) -> EllipticDesigner {
        EllipticDesigner::new(self.options)
    }

    /// Generate example configuration YAML.
    pub fn example_yaml() -> String {
        let config = Self {
            filters: vec![FilterSpec::fast(), FilterSpec::best()],
            ..Default::default()
        };

        serde_yaml::to_string(&config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::{LogFormat, LogLevel};

    #[test]
    fn test_default_config() {
        let config = DesignConfig::default();
        assert_eq!(config.options.sweep_points, 32768);
        assert_eq!(config.options.real_pole_tolerance, 1e-6);
        assert!(config.filters.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
options:
  real_pole_tolerance: 1.0e-7
  sweep_points: 8192

filters:
  - name: Fast
    passband_edge: 20000.0
    stopband_edge: 25000.0
    passband_ripple_db: 0.1
    stopband_attenuation_db: 97.5

logging:
  level: debug
  format: json
"#;

        let config = DesignConfig::parse(yaml).unwrap();
        assert_eq!(config.options.real_pole_tolerance, 1e-7);
        assert_eq!(config.options.sweep_points, 8192);
        // Unset option keeps its default
        assert_eq!(config.options.repeated_pole_tolerance, 1e-6);
        assert_eq!(config.filters, vec![FilterSpec::fast()]);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_error() {
        let err = DesignConfig::parse("filters: [ { name: 3").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));

        let missing_field = "filters:\n  - name: Broken\n    passband_edge: 1.0\n";
        assert!(DesignConfig::parse(missing_field).is_err());
    }

    #[test]
    fn test_validation() {
        let mut config = DesignConfig {
            filters: vec![FilterSpec::fast()],
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.filters.push(FilterSpec::fast());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate filter name 'Fast'"));

        config.filters = vec![FilterSpec::new("Bad", 2.0, 1.0, 0.1, 40.0)];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("filter 'Bad'"));

        config.filters.clear();
        config.options.sweep_points = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_example_yaml() {
        let yaml = DesignConfig::example_yaml();
        assert!(yaml.contains("filters:"));
        assert!(yaml.contains("name: Best"));
        let parsed = DesignConfig::parse(&yaml).unwrap();
        assert_eq!(parsed.filters.len(), 2);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cauer.yaml");

        let config = DesignConfig {
            filters: vec![FilterSpec::new("Small", 1.0, 1.5, 0.5, 40.0)],
            logging: LogConfig::batch(),
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = DesignConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DesignConfig::load_from(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn test_designer_uses_options() {
        let config = DesignConfig::parse("options:\n  repeated_pole_tolerance: 0.5\n").unwrap();
        let designer = config.designer();
        assert_eq!(designer.options().repeated_pole_tolerance, 0.5);
        assert_eq!(designer.decomposer().repeated_pole_tolerance, 0.5);
    }
}
