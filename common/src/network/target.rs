//! # Scan Target Model
//!
//! Defines the possible inputs for a port scan.
//!
//! This module handles parsing and representing targets, which can be:
//! * A single IP address or hostname.
//! * An IPv4 Range (e.g., `192.168.1.1-100`).
//! * A CIDR block (e.g., `192.168.1.0/24`).
//! * Every neighbour in the address-resolution cache (`arp`).
//! * A comma separated mix of the above (without `arp`).

use std::collections::BTreeSet;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::error::InvalidArgument;
use crate::models::{MAX_TARGET_HOSTS, TargetSet};
use crate::network::range::{self, Ipv4Range};

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Represents a distinct target to be scanned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// Scan every host currently listed in the address cache.
    Arp,
    /// Scan a single address or hostname.
    Host { name: String },
    /// Scan a range of IPv4 addresses.
    Range { ipv4_range: Ipv4Range },
    /// Holds a list of different targets
    Multi { targets: Vec<Target> },
}

impl FromStr for Target {
    type Err = InvalidArgument;

    /// Parses a string into a `Target`.
    ///
    /// Supported formats:
    /// * **Keyword**: "arp" (case-insensitive).
    /// * **Host**: IPv4/IPv6 address or DNS name (e.g., "192.168.1.5", "nas.lan").
    /// * **Range**: "Start-End" (e.g., "192.168.1.1-50", "192.168.1.1-192.168.1.50").
    /// * **CIDR**: "Network/Prefix" (e.g., "192.168.1.0/24").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let malformed = |reason: String| InvalidArgument::MalformedTarget {
            input: s.to_string(),
            reason,
        };

        if s.eq_ignore_ascii_case("arp") {
            return Ok(Target::Arp);
        }

        if s.contains(',') {
            return parse_commas(s);
        }

        if let Ok(addr) = s.parse::<IpAddr>() {
            return Ok(Target::Host {
                name: addr.to_string(),
            });
        }

        if let Some(target) = parse_cidr_range(s).map_err(malformed)? {
            return Ok(target);
        }

        if let Some(target) = parse_ip_range(s).map_err(malformed)? {
            return Ok(target);
        }

        if is_valid_host(s) {
            return Ok(Target::Host {
                name: s.to_ascii_lowercase(),
            });
        }

        Err(malformed("not an address, range, CIDR block or hostname".into()))
    }
}

impl Target {
    /// Number of hosts the target expands to, counted without expanding it.
    ///
    /// Overlapping parts are counted once each, so this is an upper bound.
    pub fn host_count(&self) -> u64 {
        match self {
            Target::Arp => 0,
            Target::Host { .. } => 1,
            Target::Range { ipv4_range } => ipv4_range.len(),
            Target::Multi { targets } => targets
                .iter()
                .fold(0u64, |total, target| total.saturating_add(target.host_count())),
        }
    }

    /// Flattens the target into the host set a scan request works on.
    ///
    /// Targets larger than [`MAX_TARGET_HOSTS`] are rejected before any address is
    /// materialised.
    pub fn into_target_set(self) -> Result<TargetSet, InvalidArgument> {
        if self == Target::Arp {
            return Ok(TargetSet::Discover);
        }

        let hosts = self.host_count();
        if hosts > MAX_TARGET_HOSTS {
            return Err(InvalidArgument::TooManyTargets {
                hosts,
                limit: MAX_TARGET_HOSTS,
            });
        }

        let mut hosts = BTreeSet::new();
        collect_hosts(self, &mut hosts)?;
        Ok(TargetSet::Hosts(hosts))
    }
}

/// This prevents code duplication between single-target and multi-target resolution.
fn collect_hosts(target: Target, hosts: &mut BTreeSet<String>) -> Result<(), InvalidArgument> {
    match target {
        Target::Arp => {
            return Err(InvalidArgument::MalformedTarget {
                input: "arp".into(),
                reason: "address cache discovery cannot be combined with other targets".into(),
            });
        }
        Target::Host { name } => {
            hosts.insert(name);
        }
        Target::Range { ipv4_range } => {
            hosts.extend(ipv4_range.to_iter().map(|ip| ip.to_string()));
        }
        Target::Multi { targets } => {
            for target in targets {
                collect_hosts(target, hosts)?;
            }
        }
    }
    Ok(())
}

/// Whether `s` is usable as a probe destination: an IP literal or an RFC 1123 hostname.
///
/// The last label of a hostname must not be all digits, so dotted-quad typos such as
/// `10.0.0.256` are never mistaken for names.
pub fn is_valid_host(s: &str) -> bool {
    if s.parse::<IpAddr>().is_ok() {
        return true;
    }

    let name = s.strip_suffix('.').unwrap_or(s);
    if name.is_empty() || name.len() > MAX_HOSTNAME_LEN {
        return false;
    }

    let labels_ok = name.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld_ok = name
        .rsplit('.')
        .next()
        .is_some_and(|tld| !tld.chars().all(|c| c.is_ascii_digit()));

    labels_ok && tld_ok
}

/// Parses a comma-separated list of targets (e.g., "192.168.1.5, 10.0.0.1-50, nas.lan").
fn parse_commas(s: &str) -> Result<Target, InvalidArgument> {
    let mut targets = Vec::new();

    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        targets.push(Target::from_str(part)?);
    }

    if targets.is_empty() {
        return Err(InvalidArgument::EmptyTargets);
    }

    Ok(Target::Multi { targets })
}

/// Parses a range string like "1.1.1.1-2.2.2.2" or "1.1.1.1-50".
///
/// Returns `Ok(None)` when the start is not an IPv4 address, so hyphenated
/// hostnames fall through to hostname parsing.
fn parse_ip_range(s: &str) -> Result<Option<Target>, String> {
    let Some((start_str, end_str)) = s.split_once('-') else {
        return Ok(None);
    };

    let Ok(start_addr) = start_str.trim().parse::<Ipv4Addr>() else {
        return Ok(None);
    };

    let end_addr = parse_range_end_addr(end_str.trim(), &start_addr, s)?;
    if u32::from(end_addr) < u32::from(start_addr) {
        return Err(format!("range end {end_addr} precedes start {start_addr}"));
    }

    let ipv4_range = Ipv4Range::new(start_addr, end_addr);
    Ok(Some(Target::Range { ipv4_range }))
}

/// Helper to parse the end address of a range.
///
/// Handles abbreviated forms like "192.168.1.1-50" (implies 192.168.1.50)
/// and full forms like "192.168.1.1-192.168.1.255".
fn parse_range_end_addr(
    end_str: &str,
    start_addr: &Ipv4Addr,
    original_s: &str,
) -> Result<Ipv4Addr, String> {
    if let Ok(full_addr) = end_str.parse::<Ipv4Addr>() {
        return Ok(full_addr);
    }

    if end_str.is_empty() {
        return Err(format!("End range cannot be empty: {original_s}"));
    }

    let mut end_octets = start_addr.octets();
    let partial_octets: Vec<u8> = end_str
        .split('.')
        .map(|octet_str| octet_str.parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|e| format!("Invalid end range '{end_str}': {e}"))?;

    if partial_octets.len() > 4 {
        return Err(format!("End range has too many octets: {end_str}"));
    }

    let start_index = 4 - partial_octets.len();
    end_octets[start_index..].copy_from_slice(&partial_octets);

    Ok(Ipv4Addr::from(end_octets))
}

/// Parses CIDR notation like "192.168.1.0/24".
fn parse_cidr_range(s: &str) -> Result<Option<Target>, String> {
    let Some((ip_str, prefix_str)) = s.split_once('/') else {
        return Ok(None);
    };

    let ipv4_addr = ip_str
        .parse::<Ipv4Addr>()
        .map_err(|e| format!("Invalid IP in CIDR '{ip_str}': {e}"))?;

    let prefix = prefix_str
        .parse::<u8>()
        .map_err(|e| format!("Invalid prefix in CIDR '{prefix_str}': {e}"))?;

    let ipv4_range = range::cidr_range(ipv4_addr, prefix)?;

    Ok(Some(Target::Range { ipv4_range }))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
