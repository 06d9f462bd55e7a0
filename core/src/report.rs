//! # Result Aggregator
//!
//! Pure data assembly: outcomes go in in completion order, a report comes out
//! grouped by host and sorted by port. No I/O happens here.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::net::IpAddr;

use netsweep_common::models::{PortState, ProbeOutcome};

/// Whether every unit of work ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Complete,
    /// Stopped early; outcomes for units that never started are absent.
    Cancelled,
    /// Not cancelled, but some units produced no outcome because a worker failed.
    Incomplete,
}

/// Number of outcomes per [`PortState`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StateCounts {
    pub open: usize,
    pub closed: usize,
    pub filtered: usize,
    pub error: usize,
}

impl StateCounts {
    pub fn add(&mut self, state: PortState) {
        match state {
            PortState::Open => self.open += 1,
            PortState::Closed => self.closed += 1,
            PortState::Filtered => self.filtered += 1,
            PortState::Error => self.error += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.open + self.closed + self.filtered + self.error
    }
}

impl<'a> FromIterator<&'a ProbeOutcome> for StateCounts {
    fn from_iter<I: IntoIterator<Item = &'a ProbeOutcome>>(iter: I) -> Self {
        let mut counts = StateCounts::default();
        for outcome in iter {
            counts.add(outcome.state);
        }
        counts
    }
}

/// Collects outcomes as they complete.
#[derive(Debug, Default)]
pub struct ReportAggregator {
    hosts: HashMap<String, BTreeMap<u16, ProbeOutcome>>,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an outcome. A second outcome for the same (host, port) replaces the
    /// first, which is handed back so the caller can report it.
    pub fn record(&mut self, outcome: ProbeOutcome) -> Option<ProbeOutcome> {
        self.hosts
            .entry(outcome.host.clone())
            .or_default()
            .insert(outcome.port, outcome)
    }

    /// Number of distinct (host, port) pairs recorded so far.
    pub fn len(&self) -> usize {
        self.hosts.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn finish(self, completion: Completion) -> ScanReport {
        let mut hosts: Vec<HostReport> = self
            .hosts
            .into_iter()
            .map(|(host, ports)| HostReport {
                host,
                outcomes: ports.into_values().collect(),
            })
            .collect();
        hosts.sort_by(|a, b| compare_hosts(&a.host, &b.host));

        ScanReport { hosts, completion }
    }
}

/// IP addresses in numeric order first, then hostnames alphabetically.
fn compare_hosts(a: &str, b: &str) -> Ordering {
    match (a.parse::<IpAddr>(), b.parse::<IpAddr>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// All outcomes for one host, ascending by port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostReport {
    host: String,
    outcomes: Vec<ProbeOutcome>,
}

impl HostReport {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn outcomes(&self) -> &[ProbeOutcome] {
        &self.outcomes
    }

    pub fn open_ports(&self) -> impl Iterator<Item = &ProbeOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_open())
    }

    pub fn counts(&self) -> StateCounts {
        self.outcomes.iter().collect()
    }
}

/// The read-only result of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    hosts: Vec<HostReport>,
    completion: Completion,
}

impl ScanReport {
    pub fn empty(completion: Completion) -> Self {
        Self {
            hosts: Vec::new(),
            completion,
        }
    }

    pub fn hosts(&self) -> &[HostReport] {
        &self.hosts
    }

    pub fn host(&self, host: &str) -> Option<&HostReport> {
        self.hosts.iter().find(|report| report.host == host)
    }

    pub fn completion(&self) -> Completion {
        self.completion
    }

    pub fn is_partial(&self) -> bool {
        self.completion != Completion::Complete
    }

    pub fn outcome_count(&self) -> usize {
        self.hosts.iter().map(|report| report.outcomes.len()).sum()
    }

    pub fn counts(&self) -> StateCounts {
        self.hosts
            .iter()
            .flat_map(|report| report.outcomes.iter())
            .collect()
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

#[cfg(test)]
mod tests {
    use super::*;
    use netsweep_common::models::Protocol;

    fn outcome(host: &str, port: u16, state: PortState) -> ProbeOutcome {
        ProbeOutcome::new(host, port, Protocol::Tcp, state)
    }

    #[test]
    fn groups_by_host_and_sorts_by_port() {
        let mut aggregator = ReportAggregator::new();
        for (host, port) in [("10.0.0.2", 443), ("10.0.0.1", 80), ("10.0.0.2", 22), ("10.0.0.1", 22)] {
            aggregator.record(outcome(host, port, PortState::Closed));
        }

        let report = aggregator.finish(Completion::Complete);

        let layout: Vec<(&str, Vec<u16>)> = report
            .hosts()
            .iter()
            .map(|h| (h.host(), h.outcomes().iter().map(|o| o.port).collect()))
            .collect();
        assert_eq!(
            layout,
            vec![("10.0.0.1", vec![22, 80]), ("10.0.0.2", vec![22, 443])]
        );
        assert!(!report.is_partial());
    }

    #[test]
    fn duplicate_pairs_keep_the_last_write() {
        let mut aggregator = ReportAggregator::new();
        assert_eq!(aggregator.record(outcome("10.0.0.1", 80, PortState::Filtered)), None);
        let replaced = aggregator.record(outcome("10.0.0.1", 80, PortState::Open));

        assert_eq!(replaced.map(|o| o.state), Some(PortState::Filtered));
        assert_eq!(aggregator.len(), 1);

        let report = aggregator.finish(Completion::Complete);
        assert_eq!(report.outcome_count(), 1);
        assert_eq!(report.host("10.0.0.1").unwrap().outcomes()[0].state, PortState::Open);
    }

    #[test]
    fn hosts_sort_numerically_then_by_name() {
        let mut aggregator = ReportAggregator::new();
        for host in ["nas.lan", "10.0.0.10", "10.0.0.9", "::1", "backup.lan"] {
            aggregator.record(outcome(host, 1, PortState::Closed));
        }

        let report = aggregator.finish(Completion::Cancelled);
        let order: Vec<&str> = report.hosts().iter().map(HostReport::host).collect();

        assert_eq!(order, ["10.0.0.9", "10.0.0.10", "::1", "backup.lan", "nas.lan"]);
        assert!(report.is_partial());
    }

    #[test]
    fn only_complete_reports_are_whole() {
        assert!(!ScanReport::empty(Completion::Complete).is_partial());
        assert!(ScanReport::empty(Completion::Cancelled).is_partial());
        assert!(ScanReport::empty(Completion::Incomplete).is_partial());
    }

    #[test]
    fn counts_and_open_ports() {
        let mut aggregator = ReportAggregator::new();
        aggregator.record(outcome("10.0.0.1", 22, PortState::Open));
        aggregator.record(outcome("10.0.0.1", 23, PortState::Closed));
        aggregator.record(outcome("10.0.0.1", 24, PortState::Filtered));
        aggregator.record(outcome("10.0.0.1", 25, PortState::Error));
        aggregator.record(outcome("10.0.0.1", 80, PortState::Open));

        let report = aggregator.finish(Completion::Complete);
        let host = report.host("10.0.0.1").unwrap();

        let open: Vec<u16> = host.open_ports().map(|o| o.port).collect();
        assert_eq!(open, [22, 80]);
        assert_eq!(
            host.counts(),
            StateCounts {
                open: 2,
                closed: 1,
                filtered: 1,
                error: 1
            }
        );
        assert_eq!(report.counts().total(), 5);
    }
}
