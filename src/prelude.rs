//! Prelude module for convenient imports.
//!
//! ```rust,no_run
//! use snmp_switch::prelude::*;
//! ```
//!
//! This imports:
//! - Serving: [`Agent`], [`AgentBuilder`], [`Dispatcher`], [`SwitchBuilder`]
//! - Store: [`OidStore`], [`StoreValue`], [`StoreError`]
//! - Core types: [`Oid`], [`Value`], [`VarBind`], [`Version`]
//! - Error handling: [`Error`], [`Result`]
//! - The [`oid!`] macro for compile-time OID construction

pub use crate::agent::{Agent, AgentBuilder};
pub use crate::error::{Error, Result};
pub use crate::handler::Dispatcher;
pub use crate::oid::Oid;
pub use crate::store::{OidStore, StoreError, StoreValue};
pub use crate::switch::SwitchBuilder;
pub use crate::value::Value;
pub use crate::varbind::VarBind;
pub use crate::version::Version;

#[doc(no_inline)]
pub use crate::oid;
