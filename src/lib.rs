// Allow large error types - the Error enum includes OIDs inline for debugging convenience.
#![allow(clippy::result_large_err)]

//! # snmp-switch
//!
//! SNMP v1/v2c agent emulating the management surface of a network switch.
//!
//! ## Features
//!
//! - Ordered OID store with static and computed values
//! - GET, GETNEXT and SET dispatch with per-binding error signaling
//! - Zero-copy BER encoding/decoding of community messages
//! - Switch store builder covering the interface table and CDP neighbor cache
//! - Async UDP agent built on Tokio
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snmp_switch::{Agent, Value};
//! use snmp_switch::switch::SwitchBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), snmp_switch::Error> {
//!     let store = SwitchBuilder::new()
//!         .name("lab-switch")
//!         .port("GigabitEthernet0/1", "PS-T001-010.0")
//!         .port("GigabitEthernet0/2", "PS-T001-020.0")
//!         .device_id_lookup(|port_id| Ok(Value::from(format!("host-{port_id}"))))
//!         .build();
//!
//!     let agent = Agent::builder()
//!         .port(10161)
//!         .community("public")
//!         .name("lab-switch")
//!         .store(store)
//!         .build()
//!         .await?;
//!
//!     agent.run().await
//! }
//! ```
//!
//! ## Message handling
//!
//! A datagram may carry several messages; each is answered in order until a
//! message fails to decode or carries the wrong community. See
//! [`handler`] for how store outcomes map to response status.

pub mod agent;
pub mod ber;
pub mod error;
pub mod handler;
pub mod message;
pub mod oid;
pub mod pdu;
pub mod prelude;
pub mod store;
pub mod switch;
pub mod value;
pub mod varbind;
pub mod version;

pub(crate) mod util;

#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use agent::{Agent, AgentBuilder};
pub use error::{DecodeErrorKind, Error, ErrorStatus, OidErrorKind, Result};
pub use handler::{Dispatcher, Operation, Response};
pub use message::CommunityMessage;
pub use oid::Oid;
pub use pdu::{Pdu, PduType};
pub use store::{OidStore, StoreError, StoreValue};
pub use value::Value;
pub use varbind::VarBind;
pub use version::Version;
