//! Data Source Reads
//!
//! The read path of the ZStack data sources: query the inventories, narrow
//! them with the attribute filter and render a state document whose
//! attribute names are snake_case.

use crate::resource::{
    conditions_from_logical, fetch_inventories, filter_resources, get_data_source,
    wire_field_name, ClusterInventory, DataSourceDef, FilterError, Filterable, ImageInventory,
    InstanceOfferingInventory, InventoryKind, L3NetworkInventory, VirtualRouterInventory,
    ZoneInventory,
};
use crate::zstack::client::ZStackClient;
use crate::zstack::http::format_zstack_error;
use anyhow::{Context, Result};
use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// User-supplied data source configuration
#[derive(Debug, Clone, Default)]
pub struct DataSourceConfig {
    /// Server-side equality conditions, keyed by logical attribute name
    pub query: BTreeMap<String, String>,
    /// Client-side equality filters, keyed by logical attribute name
    pub filter: BTreeMap<String, String>,
}

/// Read one data source and render its state
pub async fn read_data_source(
    client: &ZStackClient,
    key: &str,
    config: &DataSourceConfig,
) -> Result<Value> {
    let Some(def) = get_data_source(key) else {
        return Err(anyhow::anyhow!("Unknown data source: {}", key));
    };

    tracing::info!(
        "Reading {} (query: {:?}, filter: {:?})",
        key,
        config.query,
        config.filter
    );

    let items = match def.inventory {
        InventoryKind::Zone => read_inventories::<ZoneInventory>(client, def, config).await,
        InventoryKind::Cluster => read_inventories::<ClusterInventory>(client, def, config).await,
        InventoryKind::Image => read_inventories::<ImageInventory>(client, def, config).await,
        InventoryKind::InstanceOffering => {
            read_inventories::<InstanceOfferingInventory>(client, def, config).await
        }
        InventoryKind::VirtualRouter => {
            read_inventories::<VirtualRouterInventory>(client, def, config).await
        }
        InventoryKind::L3Network => {
            read_inventories::<L3NetworkInventory>(client, def, config).await
        }
    }
    .with_context(|| format!("Failed to read data source {}", key))?;

    let mut state = Map::new();
    state.insert("id".to_string(), Value::String(key.to_string()));
    state.insert(def.state_attribute.clone(), Value::Array(items));
    Ok(Value::Object(state))
}

/// Read several data sources concurrently, results in input order
pub async fn read_data_sources(
    client: &ZStackClient,
    keys: &[String],
    config: &DataSourceConfig,
) -> Result<Vec<Value>> {
    try_join_all(keys.iter().map(|key| read_data_source(client, key, config))).await
}

async fn read_inventories<T>(
    client: &ZStackClient,
    def: &DataSourceDef,
    config: &DataSourceConfig,
) -> Result<Vec<Value>>
where
    T: DeserializeOwned + Serialize + Filterable,
{
    let conditions = conditions_from_logical(&def.category, &config.query);
    let filters = wire_filters(&def.category, &config.filter);

    let inventories: Vec<T> = fetch_inventories(client, &def.api_path, &conditions).await?;

    let matched = filter_resources(&inventories, &filters)
        .with_context(|| format!("Invalid filter for {}", def.display_name))?;

    matched.into_iter().map(render_state).collect()
}

/// User-facing message for a failed read.
///
/// Filter errors are configuration mistakes and shown in full; everything else
/// goes through [`format_zstack_error`].
pub fn describe_read_error(error: &anyhow::Error) -> String {
    if error.chain().any(|cause| cause.is::<FilterError>()) {
        format!("{:#}", error)
    } else {
        format_zstack_error(error)
    }
}

/// Translate logical filter keys into API field names
pub fn wire_filters(
    category: &str,
    filter: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    filter
        .iter()
        .map(|(name, value)| (wire_field_name(category, name).to_string(), value.clone()))
        .collect()
}

/// Render an inventory as a state object with snake_case attribute names
fn render_state<T: Serialize>(inventory: &T) -> Result<Value> {
    let value = serde_json::to_value(inventory).context("Failed to render inventory")?;
    Ok(match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (to_snake_case(&k), v))
                .collect(),
        ),
        other => other,
    })
}

/// Convert a camelCase API name into snake_case.
///
/// Runs of capitals count as one word: `enableIPAM` -> `enable_ipam`.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1);
            let starts_word = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
                _ => false,
            };
            if starts_word {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{category_mappings, get_all_data_source_keys};

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("zoneUuid"), "zone_uuid");
        assert_eq!(to_snake_case("enableIPAM"), "enable_ipam");
        assert_eq!(to_snake_case("l2NetworkUuid"), "l2_network_uuid");
        assert_eq!(to_snake_case("md5Sum"), "md5_sum");
        assert_eq!(to_snake_case("name"), "name");
        assert_eq!(to_snake_case("type"), "type");
    }

    #[test]
    fn test_wire_filters_map_logical_names() {
        let filter = BTreeMap::from([
            ("cpu_num".to_string(), "2".to_string()),
            ("name".to_string(), "small".to_string()),
        ]);
        let wire = wire_filters("instance", &filter);
        assert_eq!(wire.get("cpuNum").map(String::as_str), Some("2"));
        assert_eq!(wire.get("name").map(String::as_str), Some("small"));
    }

    #[test]
    fn test_instance_offering_scenario() {
        let offerings: Vec<InstanceOfferingInventory> = [("a", 2), ("b", 4), ("c", 2)]
            .iter()
            .map(|(name, cpu)| InstanceOfferingInventory {
                name: name.to_string(),
                cpu_num: *cpu,
                ..Default::default()
            })
            .collect();

        let filter = BTreeMap::from([("cpu_num".to_string(), "2".to_string())]);
        let matched = filter_resources(&offerings, &wire_filters("instance", &filter)).unwrap();

        let names: Vec<&str> = matched.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_render_state_uses_snake_case() {
        let cluster = ClusterInventory {
            uuid: "c1".to_string(),
            zone_uuid: "z1".to_string(),
            hypervisor_type: "KVM".to_string(),
            ..Default::default()
        };
        let state = render_state(&cluster).unwrap();
        assert_eq!(state["zone_uuid"], "z1");
        assert_eq!(state["hypervisor_type"], "KVM");
        assert!(state.get("zoneUuid").is_none());
    }

    fn declared_fields(kind: InventoryKind) -> &'static [&'static str] {
        match kind {
            InventoryKind::Zone => ZoneInventory::FIELDS,
            InventoryKind::Cluster => ClusterInventory::FIELDS,
            InventoryKind::Image => ImageInventory::FIELDS,
            InventoryKind::InstanceOffering => InstanceOfferingInventory::FIELDS,
            InventoryKind::VirtualRouter => VirtualRouterInventory::FIELDS,
            InventoryKind::L3Network => L3NetworkInventory::FIELDS,
        }
    }

    /// Every mapped API name must be a declared field of the data source's inventory
    #[test]
    fn test_mappings_target_declared_fields() {
        for key in get_all_data_source_keys() {
            let def = get_data_source(key).unwrap();
            let declared = declared_fields(def.inventory);
            for (logical, wire) in category_mappings(&def.category).unwrap() {
                assert!(
                    declared.contains(&wire.as_str()),
                    "{}: {} -> {} is not a field",
                    key,
                    logical,
                    wire
                );
                assert_eq!(&to_snake_case(wire), logical);
            }
        }
    }

    /// Every camelCase field must be reachable from its snake_case state name
    #[test]
    fn test_declared_fields_have_mappings() {
        for key in get_all_data_source_keys() {
            let def = get_data_source(key).unwrap();
            let mappings = category_mappings(&def.category).unwrap();
            for field in declared_fields(def.inventory) {
                let logical = to_snake_case(field);
                if logical == *field {
                    continue;
                }
                assert_eq!(
                    mappings.get(&logical).map(String::as_str),
                    Some(*field),
                    "{}: state attribute {} does not map back to {}",
                    key,
                    logical,
                    field
                );
                assert_eq!(wire_field_name(&def.category, &logical), *field);
            }
        }
    }
}
