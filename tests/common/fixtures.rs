//! Common test fixtures and constants.

use snmp_switch::store::OidStore;
use snmp_switch::switch::{Port, SwitchBuilder};
use snmp_switch::{Oid, Value, oid};

// =============================================================================
// Captured net-snmp requests (community "community", OID .1.1)
// =============================================================================

/// Community the captured requests carry.
pub const COMMUNITY: &str = "community";

/// `snmpget -v2c -c community host .1.1`
pub const GET: &[u8] = b"0%\x02\x01\x01\x04\tcommunity\xa0\x15\x02\x04$=W\xfd\x02\x01\x00\x02\x01\x000\x070\x05\x06\x01)\x05\x00";
pub const GET_REQUEST_ID: i32 = 0x243D_57FD;

/// `snmpset -v2c -c community host .1.1 i 5`
pub const SET: &[u8] = b"0&\x02\x01\x01\x04\tcommunity\xa3\x16\x02\x04ce\xd84\x02\x01\x00\x02\x01\x000\x080\x06\x06\x01)\x02\x01\x05";
pub const SET_REQUEST_ID: i32 = 0x6365_D834;

/// First step of `snmpwalk -v2c -c community host .1.1`
pub const WALK: &[u8] = b"0%\x02\x01\x01\x04\tcommunity\xa1\x15\x02\x04!\xe521\x02\x01\x00\x02\x01\x000\x070\x05\x06\x01)\x05\x00";
pub const WALK_REQUEST_ID: i32 = 0x21E5_3231;

/// `snmpbulkget -v2c -c community host .1.1 .1.2`
pub const BULK: &[u8] = b"0,\x02\x01\x01\x04\tcommunity\xa5\x1c\x02\x04'\x0c\xcfj\x02\x01\x00\x02\x01\n0\x0e0\x05\x06\x01)\x05\x000\x05\x06\x01*\x05\x00";
pub const BULK_REQUEST_ID: i32 = 0x270C_CF6A;

/// `snmpget -v2c -c wrong_community host .1.1`
pub const WRONG_COMMUNITY: &[u8] = b"0+\x02\x01\x01\x04\x0fwrong_community\xa0\x15\x02\x04d\xab\xdb\xcc\x02\x01\x00\x02\x01\x000\x070\x05\x06\x01)\x05\x00";

/// Concatenate captured messages into one datagram.
pub fn payload(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

// =============================================================================
// Stores
// =============================================================================

/// Store answering the captured requests: `.1.1 = "test"`, `.1.2 = 42`.
pub fn capture_store() -> OidStore {
    [
        (oid!(1, 1), Value::from("test")),
        (oid!(1, 2), Value::Integer(42)),
    ]
    .into_iter()
    .collect()
}

/// Ports of the reference five-port switch.
pub fn lab_ports() -> Vec<Port> {
    vec![
        Port::new("GigabitEthernet0/1", "PS-T001-010.0"),
        Port::new("GigabitEthernet0/2", "PS-T001-020.0"),
        Port::new("GigabitEthernet0/3", "PS-T001-030.0"),
        Port::new("GigabitEthernet0/4", "PS-T001-040.0"),
        Port::new("TenGigabitEthernet0/1", "Uplink"),
    ]
}

/// Five-port switch whose neighbors are named after the port id.
pub fn lab_switch() -> OidStore {
    SwitchBuilder::new()
        .name("lab-switch")
        .ports(lab_ports())
        .device_id_lookup(|id| Ok(Value::from(format!("neighbor-{id}"))))
        .build()
}

// =============================================================================
// Subtree roots (for walks)
// =============================================================================

/// System subtree root: 1.3.6.1.2.1.1
pub fn system_subtree() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1)
}

/// Interfaces subtree root: 1.3.6.1.2.1.2
pub fn interfaces_subtree() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 2)
}
