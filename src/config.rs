//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use crate::processing::similarity::SimilarityAlgorithm;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub matching: MatchingConfig,
    pub fields: FieldsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub algorithm: SimilarityAlgorithm,
    /// Jaro-Winkler similarity a resume keyword needs to count as a near miss
    pub fuzzy_threshold: f32,
    pub max_missing_keywords: usize,
}

/// Optional extra fields. A field is only evaluated when it is enabled here
/// and a value is supplied on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsConfig {
    pub enable_job_title: bool,
    pub enable_location: bool,
    pub known_locations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            algorithm: SimilarityAlgorithm::Indel,
            fuzzy_threshold: 0.92,
            max_missing_keywords: 15,
        }
    }
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            enable_job_title: true,
            enable_location: true,
            known_locations: [
                "Bangalore", "Bengaluru", "Chennai", "Delhi", "Hyderabad", "Kolkata",
                "Mumbai", "Noida", "Gurgaon", "Pune", "Remote",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there on first run
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.matching.fuzzy_threshold) {
            return Err(ScreenerError::Configuration(format!(
                "matching.fuzzy_threshold must be between 0.0 and 1.0, got {}",
                self.matching.fuzzy_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_roundtrips_through_toml() {
        let config = Config::default();
        let content = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();

        assert_eq!(parsed.matching.algorithm, SimilarityAlgorithm::Indel);
        assert_eq!(parsed.fields.known_locations, config.fields.known_locations);
        assert_eq!(parsed.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert!(config.fields.enable_location);
    }

    #[test]
    fn test_partial_config_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[matching]\nalgorithm = \"JaroWinkler\"\n\n[output]\ndetailed = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.matching.algorithm, SimilarityAlgorithm::JaroWinkler);
        assert_eq!(config.matching.fuzzy_threshold, 0.92);
        assert_eq!(config.matching.max_missing_keywords, 15);
        assert!(config.fields.enable_job_title);
        assert!(config.fields.known_locations.iter().any(|city| city == "Pune"));
        assert!(config.output.detailed);
        assert_eq!(config.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.matching.fuzzy_threshold = 1.5;
        config.save_to(&path).unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ScreenerError::Configuration(_))));
    }
}
