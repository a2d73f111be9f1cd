use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

const SESSION_FILE: &str = "session.json";

/// The one thing the console keeps between runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub access_token: String,
    pub email: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl SessionInfo {
    pub fn new(access_token: String, email: Option<String>) -> Self {
        Self {
            access_token,
            email,
            saved_at: Utc::now(),
        }
    }
}

/// Session file inside the CLI config directory
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self::new(config.config_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    pub fn load(&self) -> anyhow::Result<Option<SessionInfo>> {
        let session_file = self.file();

        if !session_file.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&session_file)
            .with_context(|| format!("failed to read {}", session_file.display()))?;
        let session: SessionInfo = serde_json::from_str(&content)
            .with_context(|| format!("invalid session file {}", session_file.display()))?;
        Ok(Some(session))
    }

    pub fn save(&self, session: &SessionInfo) -> anyhow::Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let content = serde_json::to_string_pretty(session)?;
        fs::write(self.file(), content)?;
        Ok(())
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        let session_file = self.file();
        if session_file.exists() {
            fs::remove_file(&session_file)
                .with_context(|| format!("failed to remove {}", session_file.display()))?;
        }
        Ok(())
    }
}
