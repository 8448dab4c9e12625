//! CLI support for the `snmp-switch` binary.
//!
//! This module provides argument parsing, tracing setup and the JSON device
//! file format.
//!
//! This module is only available with the `cli` feature.

pub mod args;
pub mod config;
