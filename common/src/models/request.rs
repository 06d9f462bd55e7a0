use std::collections::BTreeSet;
use std::time::Duration;

use crate::error::InvalidArgument;
use crate::models::probe::Protocol;
use crate::network::ports::PortRange;
use crate::network::target;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1_000);
pub const DEFAULT_CONCURRENCY: usize = 64;

/// Largest host set a scan accepts, one `/16`.
pub const MAX_TARGET_HOSTS: u64 = 1 << 16;
/// Largest host × port work set a scan accepts.
pub const MAX_PROBES: u64 = 1 << 24;

/// Rejects scans whose host set or work set exceeds the limits above.
///
/// Cheap enough to run before anything is expanded or allocated.
pub fn check_scan_size(hosts: u64, ports: u64) -> Result<(), InvalidArgument> {
    if hosts > MAX_TARGET_HOSTS {
        return Err(InvalidArgument::TooManyTargets {
            hosts,
            limit: MAX_TARGET_HOSTS,
        });
    }

    let probes = hosts.saturating_mul(ports);
    if probes > MAX_PROBES {
        return Err(InvalidArgument::TooManyProbes {
            probes,
            limit: MAX_PROBES,
        });
    }
    Ok(())
}

/// Which hosts a scan covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSet {
    /// An explicit set of addresses or hostnames.
    Hosts(BTreeSet<String>),
    /// Every neighbour currently present in the address-resolution cache.
    Discover,
}

impl TargetSet {
    pub fn hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Hosts(hosts.into_iter().map(Into::into).collect())
    }
}

/// A (host set × port range × protocol) probing job.
///
/// Built by the caller and only read by the engine. [`ScanRequest::validate`] runs
/// before any probe is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub targets: TargetSet,
    pub ports: PortRange,
    pub protocol: Protocol,
    pub timeout: Duration,
    pub concurrency: usize,
    /// Probe the work set in random order. The report is sorted either way.
    pub shuffle: bool,
}

impl ScanRequest {
    pub fn new(targets: TargetSet, ports: PortRange) -> Self {
        Self {
            targets,
            ports,
            protocol: Protocol::Tcp,
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            shuffle: false,
        }
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn validate(&self) -> Result<(), InvalidArgument> {
        self.ports.validate()?;

        if self.concurrency == 0 {
            return Err(InvalidArgument::ZeroConcurrency);
        }
        if self.timeout.is_zero() {
            return Err(InvalidArgument::ZeroTimeout);
        }

        if let TargetSet::Hosts(hosts) = &self.targets {
            if hosts.is_empty() {
                return Err(InvalidArgument::EmptyTargets);
            }
            if let Some(bad) = hosts.iter().find(|host| !target::is_valid_host(host)) {
                return Err(InvalidArgument::MalformedHost(bad.clone()));
            }
            check_scan_size(hosts.len() as u64, self.ports.len() as u64)?;
        }

        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
