//! ZStack Client
//!
//! Main client for the ZStack management server, combining the HTTP wrapper
//! with the server address and an already-issued session.

use super::http::ZStackHttpClient;
use crate::config::Config;
use anyhow::{Context, Result};
use serde_json::Value;
use url::Url;

/// Main ZStack client
#[derive(Clone)]
pub struct ZStackClient {
    pub http: ZStackHttpClient,
    /// Management server root, e.g. `http://10.0.0.1:8080`
    pub base_url: String,
    pub session_uuid: Option<String>,
}

impl ZStackClient {
    /// Create a new client for the given management server root
    pub fn new(base_url: &str, session_uuid: Option<String>) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .with_context(|| format!("Invalid ZStack endpoint: {}", base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("Unsupported scheme in ZStack endpoint: {}", parsed.scheme());
        }

        let http = ZStackHttpClient::new()?;

        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            session_uuid,
        })
    }

    /// Create a client from the effective configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let endpoint = format!("http://{}:{}", config.effective_host(), config.effective_port());
        Self::new(&endpoint, config.effective_session())
    }

    /// Make a GET request to a ZStack API
    pub async fn get(&self, url: &str) -> Result<Value> {
        self.http.get(url, self.session_uuid.as_deref()).await
    }

    /// Build a ZStack v1 API URL
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/zstack/v1/{}",
            self.base_url,
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        let client = ZStackClient::new("http://10.0.0.1:8080/", None).unwrap();
        assert_eq!(client.api_url("clusters"), "http://10.0.0.1:8080/zstack/v1/clusters");
        assert_eq!(
            client.api_url("/l3-networks"),
            "http://10.0.0.1:8080/zstack/v1/l3-networks"
        );
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        assert!(ZStackClient::new("not a url", None).is_err());
        assert!(ZStackClient::new("ftp://10.0.0.1", None).is_err());
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            host: Some("zstack.local".to_string()),
            port: Some(8989),
            session_uuid: Some("abc".to_string()),
            ..Config::default()
        };
        let client = ZStackClient::from_config(&config).unwrap();
        assert_eq!(client.base_url, "http://zstack.local:8989");
        assert_eq!(client.session_uuid.as_deref(), Some("abc"));
    }
}
