//! HTTP utilities for ZStack REST API calls

use anyhow::{Context, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// A non-success HTTP status returned by the management server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("API request failed: {status}")]
pub struct ApiError {
    pub status: StatusCode,
}

/// HTTP client wrapper for ZStack API calls
#[derive(Clone)]
pub struct ZStackHttpClient {
    client: Client,
}

impl ZStackHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("zsquery/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make a GET request to a ZStack API
    pub async fn get(&self, url: &str, session_uuid: Option<&str>) -> Result<Value> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(session) = session_uuid {
            request = request.header(AUTHORIZATION, format!("OAuth {}", session));
        }

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(ApiError { status }.into());
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).context("Failed to parse response JSON")
    }
}

/// Format a ZStack API error for display
/// Maps the typed status or transport failure to a short message instead of
/// echoing API details
pub fn format_zstack_error(error: &anyhow::Error) -> String {
    if let Some(api) = error.chain().find_map(|c| c.downcast_ref::<ApiError>()) {
        return match api.status.as_u16() {
            401 => "Authentication failed. Check the ZStack session UUID.",
            403 => "Permission denied. The session's account cannot read this resource.",
            404 => "Resource not found. Check the management server address.",
            400 => "Invalid request. Check the query conditions.",
            500..=599 => "ZStack management server temporarily unavailable. Please try again.",
            _ => "Request failed. Check your network connection and try again.",
        }
        .to_string();
    }

    if let Some(transport) = error.chain().find_map(|c| c.downcast_ref::<reqwest::Error>()) {
        if transport.is_connect() {
            return "Cannot reach the ZStack management server. Check the host and port."
                .to_string();
        }
        if transport.is_timeout() {
            return "Request to the ZStack management server timed out.".to_string();
        }
        return "Request failed. Check your network connection and try again.".to_string();
    }

    let error_str = format!("{:#}", error);
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(80)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}
