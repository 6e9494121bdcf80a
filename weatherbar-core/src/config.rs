use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};
use crate::model::Credentials;
use crate::provider::ProviderId;

/// Configuration for a single provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key, passed to the provider inside the request URL.
    pub api: String,
    /// Location the forecast is requested for.
    pub location: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional default provider id, e.g. "openweathermap" or "darkskynet".
    pub default_provider: Option<String>,

    /// Example TOML:
    /// [providers.darkskynet]
    /// api = "..."
    /// location = "Lisbon"
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl Config {
    /// Return the default provider as a strongly-typed ProviderId.
    pub fn default_provider_id(&self) -> Result<ProviderId> {
        let s = self.default_provider.as_ref().ok_or_else(|| {
            Error::Config(
                "no default provider configured.\n\
                 Hint: run `weatherbar configure <provider>` (e.g. `weatherbar configure darkskynet`) first."
                    .to_string(),
            )
        })?;

        ProviderId::try_from(s.as_str())
    }

    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    pub fn is_provider_configured(&self, id: ProviderId) -> bool {
        self.providers.contains_key(id.as_str())
    }

    /// Credentials for a provider, or `ConfigMissing` when its section is
    /// absent.
    pub fn credentials(&self, id: ProviderId) -> Result<Credentials> {
        let cfg = self.provider_config(id).ok_or(Error::ConfigMissing(id))?;

        Ok(Credentials {
            api_key: cfg.api.clone(),
            location: cfg.location.clone(),
        })
    }

    /// Store default provider as string.
    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    /// Set/replace a provider's credentials. The first configured provider
    /// becomes the default.
    pub fn upsert_provider(&mut self, id: ProviderId, api: String, location: String) {
        self.providers
            .insert(id.as_str().to_string(), ProviderConfig { api, location });

        if self.default_provider.is_none() {
            self.default_provider = Some(id.to_string());
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub(crate) fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize configuration: {e}")))?;

        fs::write(path, toml)?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherbar", "weatherbar").ok_or_else(|| {
            Error::Config("could not determine platform config directory".to_string())
        })?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
