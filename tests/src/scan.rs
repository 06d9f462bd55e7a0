#![cfg(test)]
use std::sync::Arc;

use netsweep_common::diagnostics::{CollectingDiagnostics, DiagnosticEvent};
use netsweep_common::models::{PortState, Protocol, ScanRequest, TargetSet};
use netsweep_common::network::ports::PortRange;
use netsweep_core::report::Completion;
use netsweep_core::scanner::ScanEngine;
use tokio_util::sync::CancellationToken;

use crate::util::{self, WAIT};

fn request(hosts: &[&str], port: u16) -> ScanRequest {
    ScanRequest::new(TargetSet::hosts(hosts.iter().copied()), PortRange { start: port, end: port })
        .with_timeout(WAIT)
        .with_concurrency(4)
}

#[tokio::test]
async fn scans_a_loopback_listener() {
    let (_listener, port) = util::tcp_listener().await;
    let diagnostics = Arc::new(CollectingDiagnostics::new());
    let engine = ScanEngine::system(diagnostics.clone());

    let report = engine
        .run_scan(&request(&["127.0.0.1"], port), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.completion(), Completion::Complete);
    let host = report.host("127.0.0.1").unwrap();
    let open: Vec<u16> = host.open_ports().map(|o| o.port).collect();
    assert_eq!(open, vec![port]);
    assert!(diagnostics
        .events()
        .iter()
        .any(|e| matches!(e, DiagnosticEvent::ScanStarted { hosts: 1, ports: 1, protocol: Protocol::Tcp })));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn every_host_appears_even_when_nothing_listens() {
    let (_listener, port) = util::tcp_listener().await;
    let engine = ScanEngine::system(Arc::new(CollectingDiagnostics::new()));

    let report = engine
        .run_scan(&request(&["127.0.0.2", "127.0.0.1"], port), &CancellationToken::new())
        .await
        .unwrap();

    let states: Vec<(&str, PortState)> = report
        .hosts()
        .iter()
        .map(|h| (h.host(), h.outcomes()[0].state))
        .collect();
    assert_eq!(
        states,
        vec![("127.0.0.1", PortState::Open), ("127.0.0.2", PortState::Closed)]
    );
}

#[tokio::test]
async fn udp_scan_reports_the_echo_port() {
    let port = util::udp_echo().await;
    let engine = ScanEngine::system(Arc::new(CollectingDiagnostics::new()));

    let report = engine
        .run_scan(
            &request(&["127.0.0.1"], port).with_protocol(Protocol::Udp),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    let outcome = &report.host("127.0.0.1").unwrap().outcomes()[0];
    assert_eq!(outcome.protocol, Protocol::Udp);
    assert_eq!(outcome.state, PortState::Open);
}

#[tokio::test]
async fn cancelled_scan_returns_a_partial_report() {
    let (_listener, port) = util::tcp_listener().await;
    let cancel = CancellationToken::new();
    cancel.cancel();
    let engine = ScanEngine::system(Arc::new(CollectingDiagnostics::new()));

    let report = engine.run_scan(&request(&["127.0.0.1"], port), &cancel).await.unwrap();

    assert!(report.is_partial());
    assert!(report.hosts().is_empty());
}
