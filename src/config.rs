use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{PruneError, Result};

pub const DEFAULT_ADDRESS: &str = "https://app.terraform.io";
pub const CONFIG_ENV: &str = "TFE_PRUNE_CONFIG";
pub const ORGANIZATION_ENV: &str = "TFE_ORGANIZATION";
pub const TOKEN_ENV: &str = "TFE_TOKEN";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api: ApiConfig,
    /// Only ever taken from `TFE_ORGANIZATION`; config files cannot set it.
    pub organization: String,
}

/// Connection settings for the Terraform Enterprise API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub address: String,
    pub token: String,
    pub timeout: Duration,
    /// Retry 5xx responses and connection failures in addition to 429.
    pub retry_server_errors: bool,
    pub max_retries: u32,
    pub retry_wait_min: Duration,
    pub retry_wait_max: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            token: String::new(),
            timeout: Duration::from_secs(30),
            retry_server_errors: true,
            max_retries: 30,
            retry_wait_min: Duration::from_millis(100),
            retry_wait_max: Duration::from_millis(400),
        }
    }
}

impl Config {
    /// Load defaults, then the TOML file (if any), then environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| env_string(CONFIG_ENV).map(PathBuf::from));

        match explicit {
            Some(path) => {
                let patch = Self::load_patch(&path)?.ok_or_else(|| {
                    PruneError::Config(format!("config file {} not found", path.display()))
                })?;
                config.merge_patch(patch);
            }
            None => {
                if let Some(patch) = Self::load_global()? {
                    config.merge_patch(patch);
                }
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// The target organization, failing when `TFE_ORGANIZATION` was not set.
    pub fn require_organization(&self) -> Result<&str> {
        let organization = self.organization.trim();
        if organization.is_empty() {
            return Err(PruneError::MissingEnv(ORGANIZATION_ENV));
        }
        Ok(organization)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("team-token-prune/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| PruneError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| PruneError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.api {
            self.api.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("TFE_ADDRESS") {
            self.api.address = value;
        } else if let Some(host) = env_string("TFE_HOSTNAME") {
            self.api.address = format!("https://{host}");
        }
        if let Some(value) = env_string(TOKEN_ENV) {
            self.api.token = value;
        }
        if let Some(value) = env_string(ORGANIZATION_ENV) {
            self.organization = value;
        }
        if let Some(value) = env_u32("TFE_PRUNE_MAX_RETRIES")? {
            self.api.max_retries = value;
        }
        if let Some(value) = env_bool("TFE_PRUNE_RETRY_SERVER_ERRORS") {
            self.api.retry_server_errors = value;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub api: Option<ApiPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ApiPatch {
    pub address: Option<String>,
    pub token: Option<String>,
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
    pub retry_server_errors: Option<bool>,
    pub max_retries: Option<u32>,
    #[serde(default, with = "humantime_serde")]
    pub retry_wait_min: Option<Duration>,
    #[serde(default, with = "humantime_serde")]
    pub retry_wait_max: Option<Duration>,
}

impl ApiConfig {
    fn merge(&mut self, patch: ApiPatch) {
        if let Some(value) = patch.address {
            self.address = value;
        }
        if let Some(value) = patch.token {
            self.token = value;
        }
        if let Some(value) = patch.timeout {
            self.timeout = value;
        }
        if let Some(value) = patch.retry_server_errors {
            self.retry_server_errors = value;
        }
        if let Some(value) = patch.max_retries {
            self.max_retries = value;
        }
        if let Some(value) = patch.retry_wait_min {
            self.retry_wait_min = value;
        }
        if let Some(value) = patch.retry_wait_max {
            self.retry_wait_max = value;
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_u32(key: &str) -> Result<Option<u32>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<u32>().map(Some).map_err(|err| {
            PruneError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}
