use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use netsweep_common::config::Config;
use netsweep_common::diagnostics::TracingDiagnostics;
use netsweep_common::models::PortState;
use netsweep_core::report::{Completion, HostReport, ScanReport};
use netsweep_core::scanner::ScanEngine;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info_span, warn};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::commands::ScanArgs;
use crate::mprint;
use crate::terminal::format::{self, Detail};
use crate::terminal::{colors, print, spinner};

pub async fn scan(args: ScanArgs, cfg: &Config) -> anyhow::Result<()> {
    let request = args.into_request()?;

    let span = info_span!("scan", indicatif.pb_show = true);
    span.pb_set_style(&spinner::scan_style()?);
    span.pb_set_message(&format!("Probing {}", request.protocol));

    let progress_span = span.clone();
    let engine = ScanEngine::system(Arc::new(TracingDiagnostics)).with_progress(
        move |completed, total| {
            progress_span.pb_set_length(total as u64);
            progress_span.pb_set_position(completed as u64);
        },
    );

    let cancel = CancellationToken::new();
    let cancel_for_signal = cancel.clone();
    let signal_handle = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, letting in-flight probes finish");
            cancel_for_signal.cancel();
        }
    });

    let start_time: Instant = Instant::now();
    let result = engine.run_scan(&request, &cancel).instrument(span).await;
    signal_handle.abort();

    let report: ScanReport = result.context("scan aborted")?;
    scan_ends(&report, start_time.elapsed(), cfg);
    Ok(())
}

fn scan_ends(report: &ScanReport, total_time: Duration, cfg: &Config) {
    if report.hosts().is_empty() {
        print::header("ZERO HOSTS SCANNED", cfg.quiet);
        if cfg.quiet < 2 {
            print::no_results();
        }
        print_summary(report, total_time, cfg);
        return;
    }

    print::header("Scan Results", cfg.quiet);
    for (idx, host) in report.hosts().iter().enumerate() {
        match cfg.quiet {
            0 | 1 => print_host_tree(host, idx, cfg),
            _ => print_open_ports_plain(host),
        }
        if cfg.quiet < 2 && idx + 1 != report.hosts().len() {
            mprint!();
        }
    }
    print_summary(report, total_time, cfg);
}

fn host_details(host: &HostReport, cfg: &Config) -> Vec<Detail> {
    let mut details: Vec<Detail> = host.open_ports().map(format::outcome_to_detail).collect();

    if details.is_empty() {
        details.push(("Open".to_string(), "none".color(colors::SEPARATOR)));
    }
    if cfg.shows_counts() {
        details.push(format::counts_to_detail(&host.counts()));
    }
    if cfg.shows_failures() {
        details.extend(
            host.outcomes()
                .iter()
                .filter(|outcome| outcome.state == PortState::Error)
                .map(format::failure_to_detail),
        );
    }

    details
}

fn print_host_tree(host: &HostReport, idx: usize, cfg: &Config) {
    print::tree_head(idx, host.host());
    print::as_tree_one_level(host_details(host, cfg));
}

fn print_open_ports_plain(host: &HostReport) {
    for outcome in host.open_ports() {
        mprint!(&format!("{} {}/{}", outcome.host, outcome.port, outcome.protocol));
    }
}

fn print_summary(report: &ScanReport, total_time: Duration, cfg: &Config) {
    if cfg.quiet > 1 {
        return;
    }

    let open: ColoredString = format!("{} open ports", report.counts().open).bold().green();
    let hosts: ColoredString = format!("{} hosts", report.hosts().len()).bold();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let status: &str = match report.completion() {
        Completion::Complete => "Scan Complete",
        Completion::Cancelled => "Scan Cancelled",
        Completion::Incomplete => "Scan Incomplete",
    };
    let mut output: String = format!("{status}: {open} on {hosts} in {total_time}");
    if report.is_partial() {
        output.push_str(&format!(" {}", "(partial)".yellow()));
    }
    let output: String = output.color(colors::TEXT_DEFAULT).to_string();

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

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
