use super::currency::CurrencyCode;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const API_KEY_ENV: &str = "XCONV_API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
}

impl Default for ExchangeRateProviderConfig {
    fn default() -> Self {
        ExchangeRateProviderConfig {
            base_url: "https://v6.exchangerate-api.com".to_string(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FrankfurterProviderConfig {
    pub base_url: String,
}

impl Default for FrankfurterProviderConfig {
    fn default() -> Self {
        FrankfurterProviderConfig {
            base_url: "https://api.frankfurter.app".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub exchangerate: ExchangeRateProviderConfig,
    #[serde(default)]
    pub frankfurter: FrankfurterProviderConfig,
}

/// Widget state on load.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DefaultsConfig {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let currencies = super::currency::list_currencies();
        DefaultsConfig {
            from: currencies[0],
            to: currencies[1],
            amount: "1".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

impl AppConfig {
    /// Loads the config from the default location. A missing file means defaults.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        let config = if config_path.exists() {
            Self::from_file(&config_path)?
        } else {
            debug!("No config at {}, using defaults", config_path.display());
            AppConfig::default()
        };
        Ok(config.with_env_overrides())
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "xconv", "xconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Ok(Self::from_file(path)?.with_env_overrides())
    }

    /// Parses a config file as written, without `XCONV_API_KEY` applied.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    fn with_env_overrides(self) -> Self {
        self.with_api_key_override(std::env::var(API_KEY_ENV).ok())
    }

    fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            debug!("Using API key from {API_KEY_ENV}");
            self.providers.exchangerate.api_key = key.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  exchangerate:
    base_url: "http://example.com/convert"
    api_key: "secret"
  frankfurter:
    base_url: "http://example.com/history"
defaults:
  from: "gbp"
  to: "JPY"
  amount: "250"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.providers.exchangerate.base_url,
            "http://example.com/convert"
        );
        assert_eq!(config.providers.exchangerate.api_key, "secret");
        assert_eq!(
            config.providers.frankfurter.base_url,
            "http://example.com/history"
        );
        assert_eq!(config.defaults.from.code(), "GBP");
        assert_eq!(config.defaults.to.code(), "JPY");
        assert_eq!(config.defaults.amount, "250");
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(
            config.providers.frankfurter.base_url,
            "https://api.frankfurter.app"
        );
        assert_eq!(
            config.providers.exchangerate.base_url,
            "https://v6.exchangerate-api.com"
        );
        assert!(config.providers.exchangerate.api_key.is_empty());
        assert_eq!(config.defaults.from.code(), "USD");
        assert_eq!(config.defaults.to.code(), "EUR");
        assert_eq!(config.defaults.amount, "1");
    }

    #[test]
    fn test_unknown_default_currency_is_rejected() {
        let yaml_str = r#"
defaults:
  from: "XXX"
  to: "EUR"
  amount: "1"
"#;
        assert!(serde_yaml::from_str::<AppConfig>(yaml_str).is_err());
    }

    #[test]
    fn test_load_from_path() -> Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        fs::write(
            file.path(),
            "providers:\n  frankfurter:\n    base_url: \"http://localhost:1\"\n",
        )?;
        let config = AppConfig::load_from_path(file.path())?;
        assert_eq!(config.providers.frankfurter.base_url, "http://localhost:1");

        let missing = AppConfig::load_from_path(file.path().with_extension("missing"));
        assert!(missing.is_err());
        Ok(())
    }

    #[test]
    fn test_api_key_override() -> Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        fs::write(
            file.path(),
            "providers:\n  exchangerate:\n    base_url: \"http://localhost:1\"\n    api_key: \"file-key\"\n",
        )?;
        let config = AppConfig::from_file(file.path())?;
        assert_eq!(config.providers.exchangerate.api_key, "file-key");

        let config = config.with_api_key_override(Some("   ".to_string()));
        assert_eq!(config.providers.exchangerate.api_key, "file-key");
        let config = config.with_api_key_override(None);
        assert_eq!(config.providers.exchangerate.api_key, "file-key");

        let config = config.with_api_key_override(Some(" env-key \n".to_string()));
        assert_eq!(config.providers.exchangerate.api_key, "env-key");
        Ok(())
    }
}
