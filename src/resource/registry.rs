//! Resource Registry - field mappings and data source definitions
//!
//! This module loads the ZStack field mapping table and the data source
//! definitions from an embedded JSON file and provides lookup functions for
//! the rest of the application. The table is parsed once on first access and
//! never mutated afterwards.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded registry JSON (compiled into the binary)
const REGISTRY_FILES: &[&str] = &[include_str!("../resources/zstack.json")];

/// Logical attribute name -> API field name, for one resource category
pub type FieldMappings = HashMap<String, String>;

/// Which typed inventory a data source deserializes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryKind {
    Zone,
    Cluster,
    Image,
    InstanceOffering,
    VirtualRouter,
    L3Network,
}

/// Data source definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceDef {
    pub display_name: String,
    /// Field mapping category used to translate attribute names
    pub category: String,
    /// Path below `/zstack/v1/`
    pub api_path: String,
    pub inventory: InventoryKind,
    /// Name of the list attribute in the rendered state
    pub state_attribute: String,
}

/// Root structure of resources/*.json
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub field_mappings: HashMap<String, FieldMappings>,
    #[serde(default)]
    pub data_sources: HashMap<String, DataSourceDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<RegistryConfig> = OnceLock::new();

/// Get the registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static RegistryConfig {
    REGISTRY.get_or_init(|| {
        let mut final_config = RegistryConfig {
            field_mappings: HashMap::new(),
            data_sources: HashMap::new(),
        };

        for content in REGISTRY_FILES {
            let partial: RegistryConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded registry JSON: {}", e));
            final_config.field_mappings.extend(partial.field_mappings);
            final_config.data_sources.extend(partial.data_sources);
        }

        final_config
    })
}

/// Get all mappings registered for a category.
///
/// A category registered without any mappings yields an empty map, not `None`.
pub fn category_mappings(category: &str) -> Option<&'static FieldMappings> {
    get_registry().field_mappings.get(category)
}

/// Translate a logical (snake_case) attribute name into its API field name.
///
/// Returns `None` when either the category or the attribute is not registered.
pub fn field_mapping(category: &str, logical: &str) -> Option<&'static str> {
    category_mappings(category)?
        .get(logical)
        .map(|s| s.as_str())
}

/// Like [`field_mapping`], but an unmapped name is assumed to already be the
/// API field name.
pub fn wire_field_name<'a>(category: &str, logical: &'a str) -> &'a str {
    field_mapping(category, logical).unwrap_or(logical)
}

/// Get a data source definition by key
pub fn get_data_source(key: &str) -> Option<&'static DataSourceDef> {
    get_registry().data_sources.get(key)
}

/// Get all data source keys, sorted
pub fn get_all_data_source_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = get_registry()
        .data_sources
        .keys()
        .map(|s| s.as_str())
        .collect();
    keys.sort_unstable();
    keys
}
