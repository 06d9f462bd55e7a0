//! # Error Taxonomy
//!
//! Errors that stop an operation before it starts ([`ExternalToolError`],
//! [`InvalidArgument`]) are returned to the caller. Errors scoped to a single
//! cache line ([`ParseError`]) or a single probe ([`ProbeError`]) are absorbed
//! and recorded in the output instead.

use std::io;

use thiserror::Error;

/// The address-cache dump command could not run or exited abnormally.
#[derive(Debug, Error)]
pub enum ExternalToolError {
    #[error("failed to start `{tool}`: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },
    #[error("`{tool}` exited with {status}{}", format_stderr(.stderr))]
    Status {
        tool: String,
        status: String,
        stderr: String,
    },
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// A malformed line in the address-cache output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: expected address, hardware address and type, found {found} field(s)")]
    MissingFields { line: usize, found: usize },
    #[error("line {line}: entry for {address} has no hardware address yet")]
    IncompleteEntry { line: usize, address: String },
}

/// A transport-layer failure observed while probing a single port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ProbeError {
    pub kind: io::ErrorKind,
    pub message: String,
}

impl From<io::Error> for ProbeError {
    fn from(err: io::Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// A scan request that cannot be executed as given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("port range {start}-{end} is inverted")]
    InvertedRange { start: u16, end: u16 },
    #[error("port {0} is outside 1-65535")]
    PortOutOfRange(u64),
    #[error("malformed port specification '{0}'")]
    MalformedPorts(String),
    #[error("malformed host '{0}'")]
    MalformedHost(String),
    #[error("invalid target '{input}': {reason}")]
    MalformedTarget { input: String, reason: String },
    #[error("concurrency limit must be at least 1")]
    ZeroConcurrency,
    #[error("per-probe timeout must be greater than zero")]
    ZeroTimeout,
    #[error("no targets to scan")]
    EmptyTargets,
    #[error("{hosts} hosts requested, at most {limit} per scan")]
    TooManyTargets { hosts: u64, limit: u64 },
    #[error("{probes} probes requested, at most {limit} per scan")]
    TooManyProbes { probes: u64, limit: u64 },
}

/// Failures that abort a whole scan invocation.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    #[error("host discovery failed: {0}")]
    ExternalTool(#[from] ExternalToolError),
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
