use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use netsweep_common::config::Config;
use netsweep_common::diagnostics::TracingDiagnostics;
use netsweep_core::discovery::{DiscoveredHost, DiscoveryService};
use netsweep_core::system::ArpCommand;
use netsweep_core::vendors::MacOuiRepo;
use tracing::{Instrument, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::mprint;
use crate::terminal::format::{self, Detail};
use crate::terminal::{colors, print, spinner};

const NO_LABEL: &str = "(no interface)";

pub async fn discover(cfg: &Config) -> anyhow::Result<()> {
    let span = info_span!("discovery", indicatif.pb_show = true);
    span.pb_set_style(&spinner::discovery_style()?);
    span.pb_set_message("Reading the ARP cache...");

    let service = DiscoveryService::new(Box::new(ArpCommand::default()), Box::new(MacOuiRepo));

    let start_time: Instant = Instant::now();
    let hosts: Vec<DiscoveredHost> = service
        .perform_discovery(&TracingDiagnostics)
        .instrument(span)
        .await
        .context("could not read the ARP cache")?;

    discovery_ends(hosts, start_time.elapsed(), cfg);
    Ok(())
}

/// Groups hosts by interface label, keeping the order in which labels first appear.
fn group_by_interface(hosts: Vec<DiscoveredHost>) -> Vec<(String, Vec<DiscoveredHost>)> {
    let mut groups: Vec<(String, Vec<DiscoveredHost>)> = Vec::new();
    for host in hosts {
        match groups
            .iter_mut()
            .find(|(label, _)| *label == host.entry.interface_label)
        {
            Some((_, members)) => members.push(host),
            None => groups.push((host.entry.interface_label.clone(), vec![host])),
        }
    }
    groups
}

fn discovery_ends(hosts: Vec<DiscoveredHost>, total_time: Duration, cfg: &Config) {
    if hosts.is_empty() {
        no_hosts_found(cfg);
        return;
    }

    let host_count = hosts.len();
    for (label, members) in group_by_interface(hosts) {
        let label = if label.is_empty() { NO_LABEL } else { label.as_str() };
        print::header(label, cfg.quiet);
        print_hosts(&members, cfg);
    }
    print_summary(host_count, total_time, cfg);
}

fn no_hosts_found(cfg: &Config) {
    print::header("ZERO HOSTS DETECTED", cfg.quiet);
    if cfg.quiet < 2 {
        print::no_results();
    }
}

fn print_hosts(hosts: &[DiscoveredHost], cfg: &Config) {
    for (idx, host) in hosts.iter().enumerate() {
        match cfg.quiet {
            0 | 1 => print_host_tree(host, idx),
            _ => mprint!(&format!("{} {}", host.entry.address, host.entry.hardware_address)),
        }
        if cfg.quiet < 2 && idx + 1 != hosts.len() {
            mprint!();
        }
    }
}

fn print_summary(hosts_len: usize, total_time: Duration, cfg: &Config) {
    if cfg.quiet > 1 {
        return;
    }

    let hosts: ColoredString = format!("{hosts_len} neighbours").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: String = format!("Discovery Complete: {hosts} listed in {total_time}")
        .color(colors::TEXT_DEFAULT)
        .to_string();

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => {
            mprint!();
            mprint!(&output);
        }
    }
}

fn print_host_tree(host: &DiscoveredHost, idx: usize) {
    print::tree_head(idx, &host.entry.address);

    let mut details: Vec<Detail> = vec![
        format::mac_to_detail(&host.entry.hardware_address),
        format::entry_type_to_detail(host.entry.entry_type),
    ];
    if let Some(vendor_detail) = format::vendor_to_detail(&host.vendor) {
        details.push(vendor_detail);
    }

    print::as_tree_one_level(details);
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
