//! # netsweep core
//!
//! The host-discovery and port-probing engine.
//!
//! * **[`discovery`]**: turns address-cache text into an ordered host inventory.
//! * **[`prober`]**: one bounded-timeout probe per (host, port, protocol), classified.
//! * **[`scanner`]**: expands a request into work units and runs them on a bounded pool.
//! * **[`report`]**: folds outcomes, in any order, into a sorted report.
//!
//! [`system`] and [`network`] hold the operating-system and socket boundaries
//! the above are written against.

pub mod discovery;
pub mod network;
pub mod prober;
pub mod report;
pub mod scanner;
pub mod system;
pub mod vendors;
