//! Store construction for an emulated network switch.
//!
//! [`SwitchBuilder`] lays out the subtrees a switch answers for:
//!
//! | Object             | OID                                      | Value                  |
//! |--------------------|------------------------------------------|------------------------|
//! | sysDescr.0         | 1.3.6.1.2.1.1.1.0                        | description            |
//! | sysObjectID.0      | 1.3.6.1.2.1.1.2.0                        | object id              |
//! | sysUpTime.0        | 1.3.6.1.2.1.1.3.0                        | computed time ticks    |
//! | sysName.0          | 1.3.6.1.2.1.1.5.0                        | display name           |
//! | ifNumber.0         | 1.3.6.1.2.1.2.1.0                        | port count             |
//! | ifDescr.i          | 1.3.6.1.2.1.2.2.1.2.i                    | port name              |
//! | ifType.i           | 1.3.6.1.2.1.2.2.1.3.i                    | ethernetCsmacd (6)     |
//! | cdpCacheDeviceId   | 1.3.6.1.4.1.9.9.23.1.2.1.1.6.i.1         | lookup(port id)        |
//! | cdpCachePlatform   | 1.3.6.1.4.1.9.9.23.1.2.1.1.8.i.1         | "Emulated Switch"      |
//!
//! `i` is the 1-based position of the port. The neighbor cache entries only
//! exist when a device-id lookup is configured; the lookup runs on every read.
//!
//! ```
//! use snmp_switch::switch::{self, SwitchBuilder};
//! use snmp_switch::store::is_descendant;
//! use snmp_switch::Value;
//!
//! let store = SwitchBuilder::new()
//!     .port("GigabitEthernet0/1", "PS-T001-010.0")
//!     .port("GigabitEthernet0/2", "PS-T001-020.0")
//!     .device_id_lookup(|id| Ok(Value::from(format!("neighbor-of-{id}"))))
//!     .build();
//!
//! let (oid, value) = store.get_next(&switch::if_descr()).unwrap();
//! assert!(is_descendant(&oid, &switch::if_descr()));
//! assert_eq!(value, Value::from("GigabitEthernet0/1"));
//!
//! let (_, neighbor) = store.get_next(&switch::cdp_cache_device_id()).unwrap();
//! assert_eq!(neighbor, Value::from("neighbor-of-PS-T001-010.0"));
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::oid::Oid;
use crate::store::{OidStore, ProducerError, StoreValue};
use crate::value::Value;

/// Resolves the neighbor device identity attached to a port id.
pub type DeviceIdLookup = Arc<dyn Fn(&str) -> Result<Value, ProducerError> + Send + Sync>;

/// Default display name of a switch.
pub const DEFAULT_NAME: &str = "Untitled Switch";

/// Platform string reported for every neighbor cache entry.
pub const EMULATED_PLATFORM: &str = "Emulated Switch";

/// ifType value for ethernet ports.
const ETHERNET_CSMACD: i32 = 6;

const SYSTEM: &[u32] = &[1, 3, 6, 1, 2, 1, 1];
const INTERFACES: &[u32] = &[1, 3, 6, 1, 2, 1, 2];
const IF_ENTRY: &[u32] = &[1, 3, 6, 1, 2, 1, 2, 2, 1];
const CDP_CACHE_ENTRY: &[u32] = &[1, 3, 6, 1, 4, 1, 9, 9, 23, 1, 2, 1, 1];

// -- system group (.1.3.6.1.2.1.1.*) --

fn system(leaf: u32) -> Oid {
    Oid::from_slice(SYSTEM).extend(&[leaf, 0])
}

pub fn sys_descr() -> Oid {
    system(1)
}
pub fn sys_object_id() -> Oid {
    system(2)
}
pub fn sys_up_time() -> Oid {
    system(3)
}
pub fn sys_name() -> Oid {
    system(5)
}

// -- interfaces (.1.3.6.1.2.1.2.*) --

pub fn if_number() -> Oid {
    Oid::from_slice(INTERFACES).extend(&[1, 0])
}

/// ifDescr column; instances are `ifDescr.<ifIndex>`.
pub fn if_descr() -> Oid {
    Oid::from_slice(IF_ENTRY).child(2)
}

/// ifType column.
pub fn if_type() -> Oid {
    Oid::from_slice(IF_ENTRY).child(3)
}

// -- CISCO-CDP-MIB cdpCacheEntry (.1.3.6.1.4.1.9.9.23.1.2.1.1.*) --

/// cdpCacheDeviceId column; instances are `.<ifIndex>.1`.
pub fn cdp_cache_device_id() -> Oid {
    Oid::from_slice(CDP_CACHE_ENTRY).child(6)
}

/// cdpCachePlatform column.
pub fn cdp_cache_platform() -> Oid {
    Oid::from_slice(CDP_CACHE_ENTRY).child(8)
}

/// A switch port: display name plus the id used for neighbor lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub name: String,
    pub id: String,
}

impl Port {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// Builder for a switch [`OidStore`].
pub struct SwitchBuilder {
    name: String,
    description: String,
    object_id: Oid,
    ports: Vec<Port>,
    lookup: Option<DeviceIdLookup>,
}

impl SwitchBuilder {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            description: EMULATED_PLATFORM.to_string(),
            // ciscoProducts, a generic catalyst
            object_id: Oid::from_slice(&[1, 3, 6, 1, 4, 1, 9, 1, 1208]),
            ports: Vec::new(),
            lookup: None,
        }
    }

    /// Set the display name reported as sysName.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set sysDescr.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set sysObjectID.
    pub fn object_id(mut self, object_id: Oid) -> Self {
        self.object_id = object_id;
        self
    }

    /// Append a port. Ports are numbered in insertion order starting at 1.
    pub fn port(mut self, name: impl Into<String>, id: impl Into<String>) -> Self {
        self.ports.push(Port::new(name, id));
        self
    }

    /// Append several ports.
    pub fn ports(mut self, ports: impl IntoIterator<Item = Port>) -> Self {
        self.ports.extend(ports);
        self
    }

    /// Populate the neighbor cache, resolving each entry through `lookup`.
    pub fn device_id_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Result<Value, ProducerError> + Send + Sync + 'static,
    {
        self.lookup = Some(Arc::new(lookup));
        self
    }

    /// Build the store. sysUpTime counts from this call.
    pub fn build(self) -> OidStore {
        let started = Instant::now();
        let mut store = OidStore::new();

        store.insert(sys_descr(), Value::from(self.description));
        store.insert(sys_object_id(), Value::ObjectIdentifier(self.object_id));
        store.insert(
            sys_up_time(),
            StoreValue::computed(move |_, _| {
                let ticks = started.elapsed().as_millis() / 10;
                Ok(Value::TimeTicks(ticks as u32))
            }),
        );
        store.insert(sys_name(), Value::from(self.name));
        store.insert(if_number(), Value::Integer(self.ports.len() as i32));

        for (position, Port { name, id }) in self.ports.into_iter().enumerate() {
            let if_index = position as u32 + 1;

            store.insert(if_descr().child(if_index), Value::from(name));
            store.insert(if_type().child(if_index), Value::Integer(ETHERNET_CSMACD));

            if let Some(lookup) = &self.lookup {
                let lookup = Arc::clone(lookup);
                store.insert(
                    cdp_cache_device_id().extend(&[if_index, 1]),
                    StoreValue::computed(move |_, _| lookup(&id)),
                );
                store.insert(
                    cdp_cache_platform().extend(&[if_index, 1]),
                    Value::from(EMULATED_PLATFORM),
                );
            }
        }

        tracing::debug!(target: "snmp_switch::store", { snmp.entries = store.len() }, "switch store built");
        store
    }
}

impl Default for SwitchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SwitchBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchBuilder")
            .field("name", &self.name)
            .field("ports", &self.ports)
            .field("lookup", &self.lookup.is_some())
            .finish_non_exhaustive()
    }
}
