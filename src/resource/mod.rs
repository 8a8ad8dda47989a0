//! Resource abstraction layer
//!
//! Typed ZStack inventories, the field name table that translates logical
//! (snake_case) attribute names into API field names, and the attribute filter
//! that narrows inventory lists.
//!
//! # Architecture
//!
//! - [`registry`] - Loads field mappings and data source definitions from embedded JSON
//! - [`fetcher`] - Queries inventories from ZStack with pagination support
//! - [`filter`] - Client-side equality filter over [`Filterable`] records
//! - [`inventory`] - Typed inventories returned by the query APIs
//!
//! # Example
//!
//! ```ignore
//! use zsquery::resource::{fetch_inventories, filter_resources, ClusterInventory};
//!
//! async fn kvm_clusters(client: &ZStackClient) -> anyhow::Result<Vec<ClusterInventory>> {
//!     let clusters: Vec<ClusterInventory> = fetch_inventories(client, "clusters", &[]).await?;
//!     let filters = BTreeMap::from([("hypervisorType".to_string(), "KVM".to_string())]);
//!     Ok(filter_resources(&clusters, &filters)?.into_iter().cloned().collect())
//! }
//! ```

pub mod fetcher;
pub mod filter;
pub mod inventory;
pub mod registry;

pub use fetcher::{
    conditions_from_logical, fetch_inventories, fetch_inventories_paginated, query_url,
    PaginatedResult, QueryCondition, QueryOp,
};
pub use filter::{filter_resources, FieldValue, FilterError, Filterable};
pub use inventory::*;
pub use registry::*;
