use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use url::Url;

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Where the session token lives; None means the per-user default
    pub config_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("CAMPAIGN_API_BASE_URL") {
            if !v.trim().is_empty() {
                self.api.base_url = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("CAMPAIGN_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Ok(v) = env::var("CAMPAIGN_CLI_CONFIG_DIR") {
            self.session.config_dir = Some(PathBuf::from(v));
        }

        self
    }

    /// Parsed backend base URL
    pub fn base_url(&self) -> ClientResult<Url> {
        Url::parse(&self.api.base_url)
            .map_err(|e| ClientError::config(format!("base url '{}': {}", self.api.base_url, e)))
    }

    /// Directory holding the session file
    pub fn config_dir(&self) -> ClientResult<PathBuf> {
        if let Some(dir) = &self.session.config_dir {
            return Ok(dir.clone());
        }
        let home = env::var("HOME")
            .map_err(|_| ClientError::config("HOME environment variable not set"))?;
        Ok(PathBuf::from(home).join(".config").join("campaign-manager"))
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: DEFAULT_API_BASE_URL.to_string(),
            },
            logging: LoggingConfig {
                level: "campaign_manager=debug,warn".to_string(),
            },
            session: SessionConfig { config_dir: None },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: DEFAULT_API_BASE_URL.to_string(),
            },
            logging: LoggingConfig {
                level: "campaign_manager=info,warn".to_string(),
            },
            session: SessionConfig { config_dir: None },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: DEFAULT_API_BASE_URL.to_string(),
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
            },
            session: SessionConfig { config_dir: None },
        }
    }
}
