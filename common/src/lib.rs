//! # netsweep common
//!
//! Models and contracts shared by the discovery/probing engine and the command line.
//!
//! * **[`models`]**: host inventory entries, scan requests and probe outcomes.
//! * **[`network`]**: target expressions, port ranges and hardware addresses.
//! * **[`diagnostics`]**: the sink every component reports recoverable events to.
//! * **[`error`]**: the error taxonomy.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod models;
pub mod network;
pub mod vendors;
