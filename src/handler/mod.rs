//! Request dispatch for the emulated agent.
//!
//! - [`Dispatcher`] - Validates the community and runs an [`Operation`]
//!   against the shared [`OidStore`](crate::store::OidStore)
//! - [`Response`] - Bindings, message status and no-such-instance positions
//!   produced by one dispatch
//!
//! # Outcome mapping
//!
//! | Operation | Store outcome        | Response                                     |
//! |-----------|----------------------|----------------------------------------------|
//! | Get       | value                | `(oid, value)`                               |
//! | Get       | unknown identifier   | `(oid, noSuchInstance)`, position flagged    |
//! | GetNext   | value                | `(next, value)`                              |
//! | GetNext   | no successor         | binding dropped, status `noSuchName`         |
//! | Set       | replaced             | request binding echoed                       |
//! | Set       | unknown identifier   | request binding echoed, position flagged     |
//! | Set       | exception value      | status `badValue`, nothing stored            |
//! | other     |                      | no bindings, status `genErr`                 |
//!
//! A failing value producer answers `genErr` with the failing binding's
//! position as error index. A community mismatch produces no response.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use snmp_switch::handler::{Dispatcher, Operation};
//! use snmp_switch::store::OidStore;
//! use snmp_switch::{Value, VarBind, oid};
//!
//! let mut store = OidStore::new();
//! store.insert(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), Value::from("switch-a"));
//!
//! let dispatcher = Dispatcher::new(Arc::new(store), "public");
//! let request = [VarBind::null(oid!(1, 3, 6, 1, 2, 1, 1))];
//!
//! let response = dispatcher.dispatch(b"public", Operation::GetNext, &request).unwrap();
//! assert_eq!(response.varbinds[0].value, Value::from("switch-a"));
//!
//! assert!(dispatcher.dispatch(b"private", Operation::GetNext, &request).is_none());
//! ```

mod dispatch;
mod payload;
mod results;

pub use dispatch::Dispatcher;
pub use results::{Operation, Response};
