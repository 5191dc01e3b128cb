use std::{env, num::NonZeroU32, path::PathBuf, time::Duration};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Free-tier quota of the ORS directions endpoint.
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 40;
pub const DEFAULT_MODEL_DIR: &str = "models";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: \"{value}\"")]
    Invalid { name: &'static str, value: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Where directions come from.
#[derive(Debug, Clone, PartialEq)]
pub enum OrsConfig {
    /// The hosted API, authenticated with a key.
    Remote { api_key: String, base_url: String },
    /// A self-hosted ORS instance, no key.
    Local { base_url: String },
}

impl OrsConfig {
    pub fn remote(api_key: impl Into<String>) -> Self {
        OrsConfig::Remote {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        match self {
            OrsConfig::Remote { base_url, .. } | OrsConfig::Local { base_url } => base_url,
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        match self {
            OrsConfig::Remote { api_key, .. } => Some(api_key),
            OrsConfig::Local { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub ors: OrsConfig,
    pub timeout: Duration,
    pub rate_limit_per_minute: NonZeroU32,
    pub model_dir: PathBuf,
}

impl ServiceConfig {
    pub fn new(ors: OrsConfig) -> Self {
        Self {
            ors,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            rate_limit_per_minute: NonZeroU32::new(DEFAULT_RATE_LIMIT_PER_MINUTE)
                .unwrap_or(NonZeroU32::MIN),
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
        }
    }

    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`ServiceConfig::from_env`] but with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let ors = match (get("ORS_API_KEY"), get("ORS_BASE_URL")) {
            (Some(api_key), base_url) => OrsConfig::Remote {
                api_key,
                base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            },
            (None, Some(base_url)) => OrsConfig::Local { base_url },
            (None, None) => return Err(ConfigError::Missing("ORS_API_KEY")),
        };

        let mut config = ServiceConfig::new(ors);

        if let Some(raw) = get("ORS_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::Invalid {
                    name: "ORS_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = get("ORS_RATE_LIMIT_PER_MINUTE") {
            config.rate_limit_per_minute = raw
                .trim()
                .parse::<u32>()
                .ok()
                .and_then(NonZeroU32::new)
                .ok_or(ConfigError::Invalid {
                    name: "ORS_RATE_LIMIT_PER_MINUTE",
                    value: raw.clone(),
                })?;
        }

        if let Some(dir) = get("TRAVEL_TIME_MODEL_DIR") {
            config.model_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}
