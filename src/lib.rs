//! Query and filter ZStack inventories the way the Terraform data sources
//! read them.

pub mod config;
pub mod datasource;
pub mod resource;
pub mod zstack;

/// Version injected at compile time via ZSQUERY_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("ZSQUERY_VERSION") {
    Some(v) => v,
    None => "dev",
};
