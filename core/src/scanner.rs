//! # Scan Orchestrator
//!
//! Expands a [`ScanRequest`] into (host, port) work units and runs them on a pool of
//! `concurrency` workers. Workers pull units from a shared queue and publish each
//! [`ProbeOutcome`] over a channel; a single collector feeds them to the
//! [`ReportAggregator`].
//!
//! **Cancellation:** cooperative and per unit. Once the token fires, no worker takes
//! a new unit. Units already inside a probe finish naturally, bounded by the
//! per-probe timeout, and their outcomes are kept. Units never started are absent
//! from the report.
//!
//! A scan that was not cancelled but lost units to a failed worker is reported as
//! [`Completion::Incomplete`].
//!
//! **Size:** the work set is materialised up front, so requests (and discovered host
//! sets) beyond [`MAX_TARGET_HOSTS`](netsweep_common::models::MAX_TARGET_HOSTS) hosts
//! or [`MAX_PROBES`](netsweep_common::models::MAX_PROBES) units are refused before
//! any probe is sent.

use std::collections::{HashSet, VecDeque};
use std::net::IpAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use netsweep_common::diagnostics::{DiagnosticEvent, Diagnostics};
use netsweep_common::error::ScanError;
use netsweep_common::models::{
    HostEntry, PortState, ProbeOutcome, Protocol, ScanRequest, TargetSet, check_scan_size,
};
use netsweep_common::network::mac;
use netsweep_common::network::ports::PortRange;
use rand::seq::SliceRandom;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::discovery;
use crate::prober::{PortProber, SocketProber};
use crate::report::{Completion, ReportAggregator, ScanReport};
use crate::system::{AddressCacheSource, ArpCommand};

/// Called with `(completed, total)` after every outcome.
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

#[derive(Debug, Clone)]
struct WorkUnit {
    host: Arc<str>,
    port: u16,
}

type WorkQueue = Arc<Mutex<VecDeque<WorkUnit>>>;

/// Runs scans against an injected prober and address-cache source.
pub struct ScanEngine {
    prober: Arc<dyn PortProber>,
    cache: Box<dyn AddressCacheSource>,
    diagnostics: Arc<dyn Diagnostics>,
    on_progress: Option<ProgressCallback>,
}

impl ScanEngine {
    pub fn new(
        prober: Arc<dyn PortProber>,
        cache: Box<dyn AddressCacheSource>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            prober,
            cache,
            diagnostics,
            on_progress: None,
        }
    }

    /// Real sockets and `arp -a`.
    pub fn system(diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self::new(
            Arc::new(SocketProber::new()),
            Box::new(ArpCommand::default()),
            diagnostics,
        )
    }

    pub fn with_progress<F>(mut self, on_progress: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.on_progress = Some(Box::new(on_progress));
        self
    }

    /// Executes `request` and returns the sorted report.
    ///
    /// Fails before probing anything when the request is invalid or the address
    /// cache cannot be read. Individual probe failures never fail the scan.
    pub async fn run_scan(
        &self,
        request: &ScanRequest,
        cancel: &CancellationToken,
    ) -> Result<ScanReport, ScanError> {
        request.validate()?;

        let hosts = self.resolve_targets(&request.targets).await?;
        check_scan_size(hosts.len() as u64, request.ports.len() as u64)?;
        let mut units = work_units(&hosts, request.ports);
        if request.shuffle {
            units.shuffle(&mut rand::rng());
        }

        let total = units.len();
        self.diagnostics.record(DiagnosticEvent::ScanStarted {
            hosts: hosts.len(),
            ports: request.ports.len(),
            protocol: request.protocol,
        });
        if total == 0 {
            return Ok(ScanReport::empty(Completion::Complete));
        }

        let queue: WorkQueue = Arc::new(Mutex::new(VecDeque::from(units)));
        let worker_count = request.concurrency.min(total);
        let (tx, mut rx) = mpsc::channel::<ProbeOutcome>(worker_count);

        let mut pool = JoinSet::new();
        for _ in 0..worker_count {
            pool.spawn(worker(
                Arc::clone(&queue),
                Arc::clone(&self.prober),
                tx.clone(),
                cancel.clone(),
                request.protocol,
                request.timeout,
            ));
        }
        drop(tx);

        let mut aggregator = ReportAggregator::new();
        let mut completed = 0;
        while let Some(outcome) = rx.recv().await {
            completed += 1;
            self.record_outcome(&mut aggregator, outcome);
            if let Some(on_progress) = &self.on_progress {
                on_progress(completed, total);
            }
        }

        while let Some(joined) = pool.join_next().await {
            if let Err(err) = joined {
                self.diagnostics.record(DiagnosticEvent::WorkerFailed {
                    message: err.to_string(),
                });
            }
        }

        let completion = if completed == total {
            Completion::Complete
        } else if cancel.is_cancelled() {
            self.diagnostics
                .record(DiagnosticEvent::ScanCancelled { completed, total });
            Completion::Cancelled
        } else {
            Completion::Incomplete
        };

        Ok(aggregator.finish(completion))
    }

    fn record_outcome(&self, aggregator: &mut ReportAggregator, outcome: ProbeOutcome) {
        if outcome.state == PortState::Error {
            if let Some(error) = &outcome.cause {
                self.diagnostics.record(DiagnosticEvent::ProbeFailed {
                    host: outcome.host.clone(),
                    port: outcome.port,
                    error: error.clone(),
                });
            }
        }

        let (host, port) = (outcome.host.clone(), outcome.port);
        if aggregator.record(outcome).is_some() {
            self.diagnostics
                .record(DiagnosticEvent::DuplicateOutcome { host, port });
        }
    }

    async fn resolve_targets(&self, targets: &TargetSet) -> Result<Vec<String>, ScanError> {
        match targets {
            TargetSet::Hosts(hosts) => Ok(hosts.iter().cloned().collect()),
            TargetSet::Discover => {
                let entries =
                    discovery::discover_hosts(self.cache.as_ref(), self.diagnostics.as_ref())
                        .await?;
                Ok(discovered_targets(entries, self.diagnostics.as_ref()))
            }
        }
    }
}

/// Probes units from `queue` until it is empty, the token fires, or the collector
/// goes away.
async fn worker(
    queue: WorkQueue,
    prober: Arc<dyn PortProber>,
    tx: mpsc::Sender<ProbeOutcome>,
    cancel: CancellationToken,
    protocol: Protocol,
    timeout: Duration,
) {
    loop {
        if cancel.is_cancelled() {
            break;
        }
        let Some(unit) = next_unit(&queue) else {
            break;
        };

        let outcome = prober.probe(&unit.host, unit.port, protocol, timeout).await;
        if tx.send(outcome).await.is_err() {
            break;
        }
    }
}

fn next_unit(queue: &Mutex<VecDeque<WorkUnit>>) -> Option<WorkUnit> {
    queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
}

/// Host-major cross product of `hosts` and `ports`.
fn work_units(hosts: &[String], ports: PortRange) -> Vec<WorkUnit> {
    hosts
        .iter()
        .flat_map(|host| {
            let host: Arc<str> = Arc::from(host.as_str());
            ports.iter().map(move |port| WorkUnit {
                host: Arc::clone(&host),
                port,
            })
        })
        .collect()
}

/// Addresses worth probing from a cache listing, first occurrence first.
///
/// Multicast and broadcast rows are routinely present in the cache but never answer
/// a unicast probe, so they are skipped, as are repeated addresses.
fn discovered_targets(entries: Vec<HostEntry>, diagnostics: &dyn Diagnostics) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut targets: Vec<String> = Vec::new();

    for entry in entries {
        let skip_reason = match entry.address.parse::<IpAddr>() {
            Err(_) => Some("not an IP address"),
            Ok(ip) if !is_unicast(ip) => Some("multicast or broadcast address"),
            Ok(_) if mac::is_broadcast(&entry.hardware_address) => {
                Some("broadcast hardware address")
            }
            Ok(_) if seen.contains(&entry.address) => Some("listed more than once"),
            Ok(_) => None,
        };

        match skip_reason {
            Some(reason) => diagnostics.record(DiagnosticEvent::TargetSkipped {
                address: entry.address,
                reason,
            }),
            None => {
                seen.insert(entry.address.clone());
                targets.push(entry.address);
            }
        }
    }

    targets
}

fn is_unicast(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => !(v4.is_multicast() || v4.is_broadcast() || v4.is_unspecified()),
        IpAddr::V6(v6) => !(v6.is_multicast() || v6.is_unspecified()),
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
