//! ZStack inventories
//!
//! Typed snapshots of the resources returned by the ZStack query APIs. Field
//! names on the wire are camelCase; ZStack leaves out null fields, so every
//! inventory falls back to defaults for anything missing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoneInventory {
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub state: String,
    #[serde(rename = "type")]
    pub kind: String,
}

crate::filterable!(ZoneInventory {
    "uuid" => uuid: str,
    "name" => name: str,
    "description" => description: opt,
    "state" => state: str,
    "type" => kind: str,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterInventory {
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub state: String,
    pub hypervisor_type: String,
    pub zone_uuid: String,
    #[serde(rename = "type")]
    pub kind: String,
}

crate::filterable!(ClusterInventory {
    "uuid" => uuid: str,
    "name" => name: str,
    "description" => description: opt,
    "state" => state: str,
    "hypervisorType" => hypervisor_type: str,
    "zoneUuid" => zone_uuid: str,
    "type" => kind: str,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageInventory {
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub state: String,
    pub status: String,
    pub size: i64,
    pub actual_size: i64,
    pub md5_sum: Option<String>,
    pub url: Option<String>,
    pub media_type: String,
    pub guest_os_type: Option<String>,
    pub format: String,
    pub platform: Option<String>,
    pub architecture: Option<String>,
    pub system: bool,
    pub virtio: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub backup_storage_refs: Vec<Value>,
}

crate::filterable!(ImageInventory {
    "uuid" => uuid: str,
    "name" => name: str,
    "description" => description: opt,
    "state" => state: str,
    "status" => status: str,
    "size" => size: int,
    "actualSize" => actual_size: int,
    "md5Sum" => md5_sum: opt,
    "url" => url: opt,
    "mediaType" => media_type: str,
    "guestOsType" => guest_os_type: opt,
    "format" => format: str,
    "platform" => platform: opt,
    "architecture" => architecture: opt,
    "system" => system: bool,
    "virtio" => virtio: bool,
    "type" => kind: str,
    "backupStorageRefs" => backup_storage_refs: other,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstanceOfferingInventory {
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub cpu_num: i32,
    pub cpu_speed: i64,
    pub memory_size: i64,
    pub allocator_strategy: Option<String>,
    pub sort_key: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub state: String,
}

crate::filterable!(InstanceOfferingInventory {
    "uuid" => uuid: str,
    "name" => name: str,
    "description" => description: opt,
    "cpuNum" => cpu_num: int,
    "cpuSpeed" => cpu_speed: int,
    "memorySize" => memory_size: int,
    "allocatorStrategy" => allocator_strategy: opt,
    "sortKey" => sort_key: int,
    "type" => kind: str,
    "state" => state: str,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualRouterInventory {
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    pub zone_uuid: String,
    pub cluster_uuid: Option<String>,
    pub host_uuid: Option<String>,
    pub image_uuid: String,
    pub instance_offering_uuid: Option<String>,
    pub management_network_uuid: String,
    pub public_network_uuid: Option<String>,
    pub appliance_vm_type: String,
    pub ha_status: Option<String>,
    pub state: String,
    pub status: Option<String>,
    pub agent_port: i32,
    pub cpu_num: i32,
    pub memory_size: i64,
    pub vm_nics: Vec<Value>,
}

crate::filterable!(VirtualRouterInventory {
    "uuid" => uuid: str,
    "name" => name: str,
    "description" => description: opt,
    "zoneUuid" => zone_uuid: str,
    "clusterUuid" => cluster_uuid: opt,
    "hostUuid" => host_uuid: opt,
    "imageUuid" => image_uuid: str,
    "instanceOfferingUuid" => instance_offering_uuid: opt,
    "managementNetworkUuid" => management_network_uuid: str,
    "publicNetworkUuid" => public_network_uuid: opt,
    "applianceVmType" => appliance_vm_type: str,
    "haStatus" => ha_status: opt,
    "state" => state: str,
    "status" => status: opt,
    "agentPort" => agent_port: int,
    "cpuNum" => cpu_num: int,
    "memorySize" => memory_size: int,
    "vmNics" => vm_nics: other,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct L3NetworkInventory {
    pub uuid: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub zone_uuid: String,
    pub l2_network_uuid: String,
    pub state: String,
    pub dns_domain: Option<String>,
    pub system: bool,
    pub category: Option<String>,
    pub ip_version: i32,
    #[serde(rename = "enableIPAM")]
    pub enable_ipam: bool,
}

crate::filterable!(L3NetworkInventory {
    "uuid" => uuid: str,
    "name" => name: str,
    "description" => description: opt,
    "type" => kind: str,
    "zoneUuid" => zone_uuid: str,
    "l2NetworkUuid" => l2_network_uuid: str,
    "state" => state: str,
    "dnsDomain" => dns_domain: opt,
    "system" => system: bool,
    "category" => category: opt,
    "ipVersion" => ip_version: int,
    "enableIPAM" => enable_ipam: bool,
});
