//! ZStack API interaction module
//!
//! # Module Structure
//!
//! - [`client`] - Main ZStack client holding the server address and session
//! - [`http`] - HTTP utilities for REST API calls
//!
//! # Example
//!
//! ```ignore
//! use zsquery::zstack::client::ZStackClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = ZStackClient::new("http://10.0.0.1:8080", Some(session))?;
//!     let zones = client.get(&client.api_url("zones")).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
