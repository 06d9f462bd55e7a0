//! # Models
//!
//! * [`host_entry::HostEntry`]: one row of the operating system's address cache.
//! * [`request::ScanRequest`]: what to probe, how long to wait and how wide to fan out.
//! * [`probe::ProbeOutcome`]: the classified result of probing one port.

pub mod host_entry;
pub mod probe;
pub mod request;

pub use host_entry::{EntryType, HostEntry};
pub use probe::{PortState, ProbeOutcome, Protocol};
pub use request::{
    DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT, MAX_PROBES, MAX_TARGET_HOSTS, ScanRequest, TargetSet,
    check_scan_size,
};
