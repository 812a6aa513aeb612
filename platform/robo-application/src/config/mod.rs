use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";
pub const DEFAULT_API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_PRICES_CSV: &str = "db/prices.csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing API key: env {var} is not set")]
    MissingApiKey { var: String },

    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Every section is optional; an absent file is the same as an empty one.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub paths: PathsConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Name of the env var holding the key. The key itself never lives in the file.
    pub api_key_env: String,
    pub timeout_ms: u64,
    pub output_size: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            output_size: "full".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct PathsConfig {
    pub prices_csv: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            prices_csv: PathBuf::from(DEFAULT_PRICES_CSV),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields, default)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "text".to_string(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn resolve_api_key(config: &Config) -> Result<SecretString, ConfigError> {
    api_key_from(&config.provider.api_key_env, |var| env::var(var).ok())
}

/// Blank values count as missing so a stray `KEY=` never reaches the provider.
pub fn api_key_from(
    var: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    match lookup(var) {
        Some(key) if !key.trim().is_empty() => Ok(SecretString::new(key.trim().into())),
        _ => Err(ConfigError::MissingApiKey {
            var: var.to_string(),
        }),
    }
}
