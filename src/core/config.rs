use super::conversion::ConversionRequest;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://m.search.naver.com";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Fallback values for options a conversion leaves unset
    #[serde(default)]
    pub defaults: ConversionRequest,
}

impl AppConfig {
    /// Loads the config at the default location, or built-in defaults when
    /// no config file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "naverfx", "naverfx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.defaults.validate().with_context(|| {
            format!("Invalid defaults in config file: {}", path.as_ref().display())
        })?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
provider:
  base_url: "http://localhost:8080"
defaults:
  bank: "shb"
  amount: 10
  from: "EUR"
  to: "JPY"
  unit: "cashBuy"
  direction: "up"
  content_id: 142
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.provider.base_url, "http://localhost:8080");
        assert_eq!(config.defaults.bank, "shb");
        assert_eq!(config.defaults.amount, 10.0);
        assert_eq!(config.defaults.from, "EUR");
        assert_eq!(config.defaults.to, "JPY");
        assert_eq!(config.defaults.unit, "cashBuy");
        assert_eq!(config.defaults.direction, "up");
        assert_eq!(config.defaults.content_id, 142);
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let yaml_str = r#"
defaults:
  to: "EUR"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.defaults.to, "EUR");
        assert_eq!(config.defaults.from, "USD");
        assert_eq!(config.defaults.bank, "keb");
        assert_eq!(config.defaults.content_id, 141);

        let empty: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(empty, AppConfig::default());
    }

    #[test]
    fn test_load_from_path() -> Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        fs::write(file.path(), "provider:\n  base_url: \"http://example.com\"\n")?;

        let config = AppConfig::load_from_path(file.path())?;
        assert_eq!(config.provider.base_url, "http://example.com");
        assert_eq!(config.defaults, ConversionRequest::default());
        Ok(())
    }

    #[test]
    fn test_load_rejects_invalid_defaults() -> Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        fs::write(file.path(), "defaults:\n  amount: -5\n  from: \"usd\"\n")?;

        let err = AppConfig::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid defaults in config file"));
        assert!(err.root_cause().to_string().contains("greater than 0"));
        Ok(())
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = AppConfig::load_from_path("/nonexistent/naverfx/config.yaml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
