//! JSON device file.
//!
//! ```json
//! {
//!   "name": "lab-switch",
//!   "ports": [
//!     { "name": "GigabitEthernet0/1", "id": "PS-T001-010.0" },
//!     { "name": "TenGigabitEthernet0/1", "id": "Uplink" }
//!   ],
//!   "neighbors": { "PS-T001-010.0": "server-01.lab" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::store::OidStore;
use crate::switch::{Port, SwitchBuilder};
use crate::value::Value;

/// Device description loaded from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    /// Display name; the command line takes precedence.
    #[serde(default)]
    pub name: Option<String>,
    /// Ports in ifIndex order.
    #[serde(default)]
    pub ports: Vec<PortConfig>,
    /// Neighbor device id per port id.
    #[serde(default)]
    pub neighbors: BTreeMap<String, String>,
}

/// One port entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortConfig {
    pub name: String,
    pub id: String,
}

impl DeviceConfig {
    /// Parse a device description.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("invalid device file: {}", e).into()))
    }

    /// Read and parse a device file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            target: None,
            source,
        })?;
        tracing::debug!(target: "snmp_switch::agent", { path = %path.display() }, "loading device file");
        Self::from_json(&json)
    }

    /// Build the switch store, serving `name` as sysName.
    ///
    /// Neighbor lookups answer the mapped device id, or the port id itself
    /// when the map has no entry for it.
    pub fn into_store(self, name: &str) -> OidStore {
        let neighbors = self.neighbors;
        SwitchBuilder::new()
            .name(name)
            .ports(
                self.ports
                    .into_iter()
                    .map(|port| Port::new(port.name, port.id)),
            )
            .device_id_lookup(move |id| {
                let device = neighbors.get(id).map(String::as_str).unwrap_or(id);
                Ok(Value::from(device))
            })
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::switch;

    const DEVICE: &str = r#"{
        "name": "lab-switch",
        "ports": [
            { "name": "GigabitEthernet0/1", "id": "PS-T001-010.0" },
            { "name": "GigabitEthernet0/2", "id": "PS-T001-020.0" }
        ],
        "neighbors": { "PS-T001-010.0": "server-01.lab" }
    }"#;

    #[test]
    fn test_parse() {
        let config = DeviceConfig::from_json(DEVICE).unwrap();
        assert_eq!(config.name.as_deref(), Some("lab-switch"));
        assert_eq!(config.ports.len(), 2);
        assert_eq!(config.ports[1].id, "PS-T001-020.0");
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(DeviceConfig::from_json("{}").unwrap(), DeviceConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = DeviceConfig::from_json(r#"{"portz": []}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = DeviceConfig::load(Path::new("/nonexistent/switch.json")).unwrap_err();
        assert!(matches!(err, Error::Io { target: None, .. }));
    }

    #[test]
    fn test_store_neighbors() {
        let store = DeviceConfig::from_json(DEVICE).unwrap().into_store("core");
        assert_eq!(store.get(&switch::sys_name()).unwrap().1, Value::from("core"));

        let device_id = switch::cdp_cache_device_id();
        let (_, first) = store.get(&device_id.extend(&[1, 1])).unwrap();
        let (_, second) = store.get(&device_id.extend(&[2, 1])).unwrap();
        assert_eq!(first, Value::from("server-01.lab"));
        assert_eq!(second, Value::from("PS-T001-020.0"));
    }
}
