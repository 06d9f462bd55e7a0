use std::fmt;

use crate::error::ProbeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => f.write_str("tcp"),
            Self::Udp => f.write_str("udp"),
        }
    }
}

/// Reachability classification of a single port.
///
/// `Filtered` means nothing came back before the timeout. The probe alone cannot tell
/// a silent drop from an unreachable route, and for UDP it also covers services that
/// are open but never answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PortState {
    Open,
    Closed,
    Filtered,
    Error,
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Filtered => "filtered",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Result of probing one (host, port) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub host: String,
    pub port: u16,
    pub protocol: Protocol,
    pub state: PortState,
    pub cause: Option<ProbeError>,
}

impl ProbeOutcome {
    pub fn new(host: impl Into<String>, port: u16, protocol: Protocol, state: PortState) -> Self {
        Self {
            host: host.into(),
            port,
            protocol,
            state,
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: ProbeError) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn is_open(&self) -> bool {
        self.state == PortState::Open
    }
}
