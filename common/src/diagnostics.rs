//! # Diagnostics
//!
//! Components never log through process-wide state. Every call that can run into a
//! recoverable condition receives a [`Diagnostics`] sink and records a
//! [`DiagnosticEvent`] on it; the caller decides where those events go.

use std::sync::{Mutex, PoisonError};

use tracing::{debug, error, info, warn};

use crate::error::{ParseError, ProbeError};
use crate::models::{HostEntry, Protocol};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// A cache line produced a host entry.
    CacheEntryParsed(HostEntry),
    /// A cache line was skipped.
    MalformedCacheLine { error: ParseError, text: String },
    /// A discovered address was left out of the scan.
    TargetSkipped { address: String, reason: &'static str },
    ScanStarted {
        hosts: usize,
        ports: usize,
        protocol: Protocol,
    },
    /// A probe ended in the `Error` state.
    ProbeFailed {
        host: String,
        port: u16,
        error: ProbeError,
    },
    /// A second outcome arrived for the same (host, port); the newer one was kept.
    DuplicateOutcome { host: String, port: u16 },
    ScanCancelled { completed: usize, total: usize },
    /// A probe worker stopped abnormally.
    WorkerFailed { message: String },
}

pub trait Diagnostics: Send + Sync {
    fn record(&self, event: DiagnosticEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::CacheEntryParsed(entry) => debug!(
                "Cache entry on '{}': {} at {} ({})",
                entry.interface_label, entry.address, entry.hardware_address, entry.entry_type
            ),
            DiagnosticEvent::MalformedCacheLine { error, text } => {
                warn!("Skipping cache line, {error}: '{}'", text.trim())
            }
            DiagnosticEvent::TargetSkipped { address, reason } => {
                debug!("Not scanning {address}: {reason}")
            }
            DiagnosticEvent::ScanStarted {
                hosts,
                ports,
                protocol,
            } => info!("Probing {ports} {protocol} port(s) on {hosts} host(s)"),
            DiagnosticEvent::ProbeFailed { host, port, error } => {
                debug!("Probe of {host}:{port} failed: {error}")
            }
            DiagnosticEvent::DuplicateOutcome { host, port } => {
                warn!("Duplicate outcome for {host}:{port}, keeping the latest")
            }
            DiagnosticEvent::ScanCancelled { completed, total } => {
                warn!("Scan cancelled after {completed} of {total} probes")
            }
            DiagnosticEvent::WorkerFailed { message } => error!("Probe worker failed: {message}"),
        }
    }
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn parse_errors(&self) -> Vec<ParseError> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                DiagnosticEvent::MalformedCacheLine { error, .. } => Some(error),
                _ => None,
            })
            .collect()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn record(&self, event: DiagnosticEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
