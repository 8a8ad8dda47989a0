//! Configuration Management
//!
//! Handles persistent configuration storage for zsquery.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default ZStack management server port
pub const DEFAULT_PORT: u16 = 8080;

const DEFAULT_HOST: &str = "localhost";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Management server host name or address
    #[serde(default)]
    pub host: Option<String>,
    /// Management server API port
    #[serde(default)]
    pub port: Option<u16>,
    /// Session UUID issued by a previous login
    #[serde(default)]
    pub session_uuid: Option<String>,
    /// Last data source read
    #[serde(default)]
    pub last_data_source: Option<String>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zsquery").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Get effective host (CLI/config > ZSTACK_HOST > localhost)
    pub fn effective_host(&self) -> String {
        self.host
            .clone()
            .or_else(|| env_var("ZSTACK_HOST"))
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    /// Get effective port (CLI/config > ZSTACK_PORT > 8080)
    pub fn effective_port(&self) -> u16 {
        self.port
            .or_else(|| {
                let raw = env_var("ZSTACK_PORT")?;
                match raw.parse() {
                    Ok(port) => Some(port),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid ZSTACK_PORT: {}", raw);
                        None
                    }
                }
            })
            .unwrap_or(DEFAULT_PORT)
    }

    /// Get effective session (CLI/config > ZSTACK_SESSION_UUID)
    pub fn effective_session(&self) -> Option<String> {
        self.session_uuid
            .clone()
            .or_else(|| env_var("ZSTACK_SESSION_UUID"))
    }

    /// Remember the last data source read and save
    pub fn set_last_data_source(&mut self, key: &str) -> Result<()> {
        self.last_data_source = Some(key.to_string());
        self.save()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values_win() {
        let config = Config {
            host: Some("10.0.0.1".to_string()),
            port: Some(9090),
            session_uuid: Some("s".to_string()),
            last_data_source: None,
        };
        assert_eq!(config.effective_host(), "10.0.0.1");
        assert_eq!(config.effective_port(), 9090);
        assert_eq!(config.effective_session().as_deref(), Some("s"));
    }

    #[test]
    fn test_missing_fields_deserialize() {
        let config: Config = serde_json::from_str(r#"{"host": "zs"}"#).unwrap();
        assert_eq!(config.host.as_deref(), Some("zs"));
        assert!(config.port.is_none());
        assert!(config.session_uuid.is_none());
    }
}
